//! Venue pages: location-grouped listing, search, detail, and mutations.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::forms::{blank_to_none, VenueInput};
use crate::models::Venue;
use crate::services::{
    format_start_time, partition_shows, search_results, EntitySummary, SearchResults, ShowEntry,
};
use crate::utils::error::AppError;

const VENUE_AREA_SQL: &str = "SELECT v.id, v.name, v.city, v.state, \
     COUNT(s.id) FILTER (WHERE s.start_time >= NOW()) AS num_upcoming_shows \
     FROM venues v LEFT JOIN shows s ON s.venue_id = v.id \
     GROUP BY v.id, v.name, v.city, v.state \
     ORDER BY v.state, v.city, v.name";

const VENUE_SUMMARY_SQL: &str = "SELECT v.id, v.name, \
     COUNT(s.id) FILTER (WHERE s.start_time >= NOW()) AS num_upcoming_shows \
     FROM venues v LEFT JOIN shows s ON s.venue_id = v.id \
     GROUP BY v.id, v.name \
     ORDER BY v.name";

const VENUE_SHOWS_SQL: &str = "SELECT a.id AS counterpart_id, a.name AS counterpart_name, \
     a.image_link AS counterpart_image_link, s.start_time \
     FROM shows s JOIN artists a ON a.id = s.artist_id \
     WHERE s.venue_id = $1 ORDER BY s.start_time";

#[derive(Debug, Clone, FromRow)]
pub struct VenueAreaRow {
    pub id: Uuid,
    pub name: String,
    pub city: String,
    pub state: String,
    pub num_upcoming_shows: i64,
}

/// One (city, state) group on the venues list page.
#[derive(Debug, Serialize)]
pub struct CityGroup {
    pub city: String,
    pub state: String,
    pub venues: Vec<EntitySummary>,
}

/// A show shown on the venue detail page, pointing at the artist playing it.
#[derive(Debug, Serialize)]
pub struct VenueShowRecord {
    pub artist_id: Uuid,
    pub artist_name: String,
    pub artist_image_link: String,
    pub start_time: String,
}

impl VenueShowRecord {
    fn from_entry(entry: ShowEntry) -> Self {
        Self {
            artist_id: entry.counterpart_id,
            artist_name: entry.counterpart_name,
            artist_image_link: entry.counterpart_image_link,
            start_time: format_start_time(&entry.start_time),
        }
    }
}

/// Venue detail page payload.
#[derive(Debug, Serialize)]
pub struct VenuePage {
    pub id: Uuid,
    pub name: String,
    pub genres: Vec<String>,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub image_link: String,
    pub website_link: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
    pub past_shows: Vec<VenueShowRecord>,
    pub upcoming_shows: Vec<VenueShowRecord>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

/// Fold venue rows into their (city, state) groups. Key equality is exact
/// string match; group order follows first appearance in the row order
/// (state, then city).
pub fn group_by_location(rows: Vec<VenueAreaRow>) -> Vec<CityGroup> {
    let mut groups: Vec<CityGroup> = Vec::new();
    for row in rows {
        let summary = EntitySummary {
            id: row.id,
            name: row.name,
            num_upcoming_shows: row.num_upcoming_shows,
        };
        match groups
            .iter_mut()
            .find(|group| group.city == row.city && group.state == row.state)
        {
            Some(group) => group.venues.push(summary),
            None => groups.push(CityGroup {
                city: row.city,
                state: row.state,
                venues: vec![summary],
            }),
        }
    }
    groups
}

/// Assemble the detail payload, partitioning shows against one `now`.
pub fn venue_page(venue: Venue, entries: Vec<ShowEntry>, now: DateTime<Utc>) -> VenuePage {
    let (past, upcoming) = partition_shows(entries, now);
    let past_shows: Vec<VenueShowRecord> =
        past.into_iter().map(VenueShowRecord::from_entry).collect();
    let upcoming_shows: Vec<VenueShowRecord> = upcoming
        .into_iter()
        .map(VenueShowRecord::from_entry)
        .collect();

    VenuePage {
        id: venue.id,
        name: venue.name,
        genres: venue.genres,
        city: venue.city,
        state: venue.state,
        address: venue.address,
        phone: venue.phone,
        image_link: venue.image_link,
        website_link: venue.website_link,
        facebook_link: venue.facebook_link,
        seeking_talent: venue.seeking_talent,
        seeking_description: venue.seeking_description,
        past_shows_count: past_shows.len(),
        upcoming_shows_count: upcoming_shows.len(),
        past_shows,
        upcoming_shows,
    }
}

pub async fn list_grouped(pool: &PgPool) -> Result<Vec<CityGroup>, AppError> {
    let rows: Vec<VenueAreaRow> = sqlx::query_as(VENUE_AREA_SQL).fetch_all(pool).await?;
    Ok(group_by_location(rows))
}

pub async fn search(pool: &PgPool, search_term: &str) -> Result<SearchResults, AppError> {
    let rows: Vec<EntitySummary> = sqlx::query_as(VENUE_SUMMARY_SQL).fetch_all(pool).await?;
    Ok(search_results(rows, search_term))
}

pub async fn find(pool: &PgPool, venue_id: Uuid) -> Result<Venue, AppError> {
    sqlx::query_as::<_, Venue>("SELECT * FROM venues WHERE id = $1")
        .bind(venue_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Venue with id '{venue_id}' was not found")))
}

pub async fn detail(pool: &PgPool, venue_id: Uuid) -> Result<VenuePage, AppError> {
    let venue = find(pool, venue_id).await?;
    let entries: Vec<ShowEntry> = sqlx::query_as(VENUE_SHOWS_SQL)
        .bind(venue_id)
        .fetch_all(pool)
        .await?;
    Ok(venue_page(venue, entries, Utc::now()))
}

pub async fn insert(pool: &PgPool, input: VenueInput) -> Result<Uuid, AppError> {
    let mut tx = pool.begin().await?;
    let id = Uuid::new_v4();
    sqlx::query(
        "INSERT INTO venues (id, name, genres, city, state, address, phone, image_link, \
         website_link, facebook_link, seeking_talent, seeking_description) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)",
    )
    .bind(id)
    .bind(&input.name)
    .bind(&input.genres)
    .bind(&input.city)
    .bind(&input.state)
    .bind(&input.address)
    .bind(&input.phone)
    .bind(&input.image_link)
    .bind(blank_to_none(input.website_link))
    .bind(blank_to_none(input.facebook_link))
    .bind(input.seeking_talent)
    .bind(blank_to_none(input.seeking_description))
    .execute(&mut *tx)
    .await?;
    tx.commit().await?;
    Ok(id)
}

/// Full-field overwrite of an existing venue.
pub async fn update(pool: &PgPool, venue_id: Uuid, input: VenueInput) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;
    sqlx::query(
        "UPDATE venues SET name = $2, genres = $3, city = $4, state = $5, address = $6, \
         phone = $7, image_link = $8, website_link = $9, facebook_link = $10, \
         seeking_talent = $11, seeking_description = $12, updated_at = NOW() \
         WHERE id = $1",
    )
    .bind(venue_id)
    .bind(&input.name)
    .bind(&input.genres)
    .bind(&input.city)
    .bind(&input.state)
    .bind(&input.address)
    .bind(&input.phone)
    .bind(&input.image_link)
    .bind(blank_to_none(input.website_link))
    .bind(blank_to_none(input.facebook_link))
    .bind(input.seeking_talent)
    .bind(blank_to_none(input.seeking_description))
    .execute(&mut *tx)
    .await?;
    tx.commit().await?;
    Ok(())
}

/// Delete the venue only; shows referencing it make the foreign key fail,
/// which surfaces as a constraint violation rather than a cascade.
pub async fn delete(pool: &PgPool, venue_id: Uuid) -> Result<String, AppError> {
    let mut tx = pool.begin().await?;
    let name: String = sqlx::query_scalar("SELECT name FROM venues WHERE id = $1")
        .bind(venue_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Venue with id '{venue_id}' was not found")))?;
    sqlx::query("DELETE FROM venues WHERE id = $1")
        .bind(venue_id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use std::collections::HashSet;

    fn area_row(name: &str, city: &str, state: &str, upcoming: i64) -> VenueAreaRow {
        VenueAreaRow {
            id: Uuid::new_v4(),
            name: name.to_string(),
            city: city.to_string(),
            state: state.to_string(),
            num_upcoming_shows: upcoming,
        }
    }

    fn sample_venue() -> Venue {
        let now = Utc::now();
        Venue {
            id: Uuid::new_v4(),
            name: "The Musical Hop".to_string(),
            genres: vec!["Jazz".to_string(), "Folk".to_string()],
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            address: "1015 Folsom Street".to_string(),
            phone: "123-123-1234".to_string(),
            image_link: "https://images.example.com/hop.jpg".to_string(),
            website_link: None,
            facebook_link: None,
            seeking_talent: false,
            seeking_description: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn entry(start_time: DateTime<Utc>) -> ShowEntry {
        ShowEntry {
            counterpart_id: Uuid::new_v4(),
            counterpart_name: "Guns N Petals".to_string(),
            counterpart_image_link: "https://images.example.com/gnp.jpg".to_string(),
            start_time,
        }
    }

    #[test]
    fn test_grouping_partitions_the_venue_set() {
        let rows = vec![
            area_row("The Dueling Pianos Bar", "New York", "NY", 0),
            area_row("Park Square Live Music & Coffee", "New York", "NY", 1),
            area_row("The Musical Hop", "San Francisco", "CA", 2),
        ];
        let total = rows.len();
        let ids: HashSet<Uuid> = rows.iter().map(|r| r.id).collect();

        let groups = group_by_location(rows);

        let grouped_ids: Vec<Uuid> = groups
            .iter()
            .flat_map(|g| g.venues.iter().map(|v| v.id))
            .collect();
        assert_eq!(grouped_ids.len(), total, "no venue may be omitted");
        let unique: HashSet<Uuid> = grouped_ids.iter().copied().collect();
        assert_eq!(unique, ids, "no venue may appear in two groups");
        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn test_grouping_keys_are_exact_matches() {
        // Same city name in two states stays in two groups.
        let rows = vec![
            area_row("Venue A", "Springfield", "IL", 0),
            area_row("Venue B", "Springfield", "MO", 0),
        ];
        let groups = group_by_location(rows);
        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn test_grouping_preserves_row_order() {
        let rows = vec![
            area_row("First", "San Francisco", "CA", 0),
            area_row("Second", "New York", "NY", 0),
            area_row("Third", "San Francisco", "CA", 0),
        ];
        let groups = group_by_location(rows);
        assert_eq!(groups[0].state, "CA");
        assert_eq!(groups[0].venues.len(), 2);
        assert_eq!(groups[1].state, "NY");
    }

    #[test]
    fn test_grouping_zero_venues_is_empty() {
        assert!(group_by_location(Vec::new()).is_empty());
    }

    #[test]
    fn test_venue_page_counts_sum_to_total() {
        let now = Utc::now();
        let entries = vec![
            entry(now - Duration::days(2)),
            entry(now + Duration::days(2)),
            entry(now + Duration::days(9)),
        ];
        let page = venue_page(sample_venue(), entries, now);
        assert_eq!(page.past_shows_count, 1);
        assert_eq!(page.upcoming_shows_count, 2);
        assert_eq!(page.past_shows_count + page.upcoming_shows_count, 3);
        assert_eq!(page.past_shows.len(), page.past_shows_count);
        assert_eq!(page.upcoming_shows.len(), page.upcoming_shows_count);
    }

    #[test]
    fn test_venue_page_formats_show_records() {
        let start_time = DateTime::parse_from_rfc3339("2026-09-01T20:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let page = venue_page(sample_venue(), vec![entry(start_time)], start_time);
        assert_eq!(page.upcoming_shows[0].start_time, "2026-09-01 20:00:00");
        assert_eq!(page.upcoming_shows[0].artist_name, "Guns N Petals");
    }
}
