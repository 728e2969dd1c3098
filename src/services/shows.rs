//! Shows list page and show creation.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::forms::ShowInput;
use crate::services::format_start_time;
use crate::utils::error::AppError;

const SHOW_LIST_SQL: &str = "SELECT s.venue_id, v.name AS venue_name, s.artist_id, \
     a.name AS artist_name, a.image_link AS artist_image_link, s.start_time \
     FROM shows s \
     JOIN artists a ON a.id = s.artist_id \
     JOIN venues v ON v.id = s.venue_id \
     ORDER BY s.start_time";

#[derive(Debug, Clone, FromRow)]
pub struct ShowListRow {
    pub venue_id: Uuid,
    pub venue_name: String,
    pub artist_id: Uuid,
    pub artist_name: String,
    pub artist_image_link: String,
    pub start_time: DateTime<Utc>,
}

/// One row on the shows page: the Show×Artist×Venue join with a display
/// timestamp. The whole table is returned, no pagination.
#[derive(Debug, Serialize)]
pub struct ShowListItem {
    pub venue_id: Uuid,
    pub venue_name: String,
    pub artist_id: Uuid,
    pub artist_name: String,
    pub artist_image_link: String,
    pub start_time: String,
}

impl ShowListItem {
    fn from_row(row: ShowListRow) -> Self {
        Self {
            venue_id: row.venue_id,
            venue_name: row.venue_name,
            artist_id: row.artist_id,
            artist_name: row.artist_name,
            artist_image_link: row.artist_image_link,
            start_time: format_start_time(&row.start_time),
        }
    }
}

pub async fn list(pool: &PgPool) -> Result<Vec<ShowListItem>, AppError> {
    let rows: Vec<ShowListRow> = sqlx::query_as(SHOW_LIST_SQL).fetch_all(pool).await?;
    Ok(rows.into_iter().map(ShowListItem::from_row).collect())
}

/// Insert a show. Dangling artist/venue ids fail the foreign keys and come
/// back as a constraint violation.
pub async fn insert(pool: &PgPool, input: ShowInput) -> Result<Uuid, AppError> {
    let mut tx = pool.begin().await?;
    let id = Uuid::new_v4();
    sqlx::query("INSERT INTO shows (id, artist_id, venue_id, start_time) VALUES ($1, $2, $3, $4)")
        .bind(id)
        .bind(input.artist_id)
        .bind(input.venue_id)
        .bind(input.start_time)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;
    Ok(id)
}
