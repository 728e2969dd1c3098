//! Artist pages: flat listing, search, detail, and mutations.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::forms::{blank_to_none, ArtistInput};
use crate::models::Artist;
use crate::services::{
    format_start_time, partition_shows, search_results, EntitySummary, SearchResults, ShowEntry,
};
use crate::utils::error::AppError;

const ARTIST_SUMMARY_SQL: &str = "SELECT a.id, a.name, \
     COUNT(s.id) FILTER (WHERE s.start_time >= NOW()) AS num_upcoming_shows \
     FROM artists a LEFT JOIN shows s ON s.artist_id = a.id \
     GROUP BY a.id, a.name \
     ORDER BY a.name";

const ARTIST_SHOWS_SQL: &str = "SELECT v.id AS counterpart_id, v.name AS counterpart_name, \
     v.image_link AS counterpart_image_link, s.start_time \
     FROM shows s JOIN venues v ON v.id = s.venue_id \
     WHERE s.artist_id = $1 ORDER BY s.start_time";

/// The artists list page carries bare {id, name} pairs, no grouping.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ArtistListItem {
    pub id: Uuid,
    pub name: String,
}

/// A show shown on the artist detail page, pointing at the venue hosting it.
#[derive(Debug, Serialize)]
pub struct ArtistShowRecord {
    pub venue_id: Uuid,
    pub venue_name: String,
    pub venue_image_link: String,
    pub start_time: String,
}

impl ArtistShowRecord {
    fn from_entry(entry: ShowEntry) -> Self {
        Self {
            venue_id: entry.counterpart_id,
            venue_name: entry.counterpart_name,
            venue_image_link: entry.counterpart_image_link,
            start_time: format_start_time(&entry.start_time),
        }
    }
}

/// Artist detail page payload.
#[derive(Debug, Serialize)]
pub struct ArtistPage {
    pub id: Uuid,
    pub name: String,
    pub genres: Vec<String>,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub image_link: String,
    pub website_link: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
    pub past_shows: Vec<ArtistShowRecord>,
    pub upcoming_shows: Vec<ArtistShowRecord>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

/// Assemble the detail payload, partitioning shows against one `now`.
pub fn artist_page(artist: Artist, entries: Vec<ShowEntry>, now: DateTime<Utc>) -> ArtistPage {
    let (past, upcoming) = partition_shows(entries, now);
    let past_shows: Vec<ArtistShowRecord> =
        past.into_iter().map(ArtistShowRecord::from_entry).collect();
    let upcoming_shows: Vec<ArtistShowRecord> = upcoming
        .into_iter()
        .map(ArtistShowRecord::from_entry)
        .collect();

    ArtistPage {
        id: artist.id,
        name: artist.name,
        genres: artist.genres,
        city: artist.city,
        state: artist.state,
        phone: artist.phone,
        image_link: artist.image_link,
        website_link: artist.website_link,
        facebook_link: artist.facebook_link,
        seeking_venue: artist.seeking_venue,
        seeking_description: artist.seeking_description,
        past_shows_count: past_shows.len(),
        upcoming_shows_count: upcoming_shows.len(),
        past_shows,
        upcoming_shows,
    }
}

pub async fn list(pool: &PgPool) -> Result<Vec<ArtistListItem>, AppError> {
    let items = sqlx::query_as("SELECT id, name FROM artists ORDER BY name")
        .fetch_all(pool)
        .await?;
    Ok(items)
}

pub async fn search(pool: &PgPool, search_term: &str) -> Result<SearchResults, AppError> {
    let rows: Vec<EntitySummary> = sqlx::query_as(ARTIST_SUMMARY_SQL).fetch_all(pool).await?;
    Ok(search_results(rows, search_term))
}

pub async fn find(pool: &PgPool, artist_id: Uuid) -> Result<Artist, AppError> {
    sqlx::query_as::<_, Artist>("SELECT * FROM artists WHERE id = $1")
        .bind(artist_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Artist with id '{artist_id}' was not found")))
}

pub async fn detail(pool: &PgPool, artist_id: Uuid) -> Result<ArtistPage, AppError> {
    let artist = find(pool, artist_id).await?;
    let entries: Vec<ShowEntry> = sqlx::query_as(ARTIST_SHOWS_SQL)
        .bind(artist_id)
        .fetch_all(pool)
        .await?;
    Ok(artist_page(artist, entries, Utc::now()))
}

pub async fn insert(pool: &PgPool, input: ArtistInput) -> Result<Uuid, AppError> {
    let mut tx = pool.begin().await?;
    let id = Uuid::new_v4();
    sqlx::query(
        "INSERT INTO artists (id, name, genres, city, state, phone, image_link, \
         website_link, facebook_link, seeking_venue, seeking_description) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
    )
    .bind(id)
    .bind(&input.name)
    .bind(&input.genres)
    .bind(&input.city)
    .bind(&input.state)
    .bind(&input.phone)
    .bind(&input.image_link)
    .bind(blank_to_none(input.website_link))
    .bind(blank_to_none(input.facebook_link))
    .bind(input.seeking_venue)
    .bind(blank_to_none(input.seeking_description))
    .execute(&mut *tx)
    .await?;
    tx.commit().await?;
    Ok(id)
}

/// Full-field overwrite of an existing artist.
pub async fn update(pool: &PgPool, artist_id: Uuid, input: ArtistInput) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;
    sqlx::query(
        "UPDATE artists SET name = $2, genres = $3, city = $4, state = $5, phone = $6, \
         image_link = $7, website_link = $8, facebook_link = $9, seeking_venue = $10, \
         seeking_description = $11, updated_at = NOW() \
         WHERE id = $1",
    )
    .bind(artist_id)
    .bind(&input.name)
    .bind(&input.genres)
    .bind(&input.city)
    .bind(&input.state)
    .bind(&input.phone)
    .bind(&input.image_link)
    .bind(blank_to_none(input.website_link))
    .bind(blank_to_none(input.facebook_link))
    .bind(input.seeking_venue)
    .bind(blank_to_none(input.seeking_description))
    .execute(&mut *tx)
    .await?;
    tx.commit().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample_artist() -> Artist {
        let now = Utc::now();
        Artist {
            id: Uuid::new_v4(),
            name: "Guns N Petals".to_string(),
            genres: vec!["Rock n Roll".to_string()],
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            phone: "326-123-5000".to_string(),
            image_link: "https://images.example.com/gnp.jpg".to_string(),
            website_link: Some("https://gunsnpetalsband.com".to_string()),
            facebook_link: None,
            seeking_venue: true,
            seeking_description: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn entry(start_time: DateTime<Utc>) -> ShowEntry {
        ShowEntry {
            counterpart_id: Uuid::new_v4(),
            counterpart_name: "The Musical Hop".to_string(),
            counterpart_image_link: "https://images.example.com/hop.jpg".to_string(),
            start_time,
        }
    }

    #[test]
    fn test_artist_page_counts_sum_to_total() {
        let now = Utc::now();
        let entries = vec![
            entry(now - Duration::days(10)),
            entry(now - Duration::days(1)),
            entry(now + Duration::days(1)),
        ];
        let page = artist_page(sample_artist(), entries, now);
        assert_eq!(page.past_shows_count, 2);
        assert_eq!(page.upcoming_shows_count, 1);
        assert_eq!(page.past_shows_count + page.upcoming_shows_count, 3);
    }

    #[test]
    fn test_artist_page_with_no_shows() {
        let page = artist_page(sample_artist(), Vec::new(), Utc::now());
        assert!(page.past_shows.is_empty());
        assert!(page.upcoming_shows.is_empty());
        assert_eq!(page.past_shows_count, 0);
        assert_eq!(page.upcoming_shows_count, 0);
    }

    #[test]
    fn test_artist_show_records_point_at_the_venue() {
        let now = Utc::now();
        let page = artist_page(sample_artist(), vec![entry(now + Duration::days(3))], now);
        assert_eq!(page.upcoming_shows[0].venue_name, "The Musical Hop");
    }
}
