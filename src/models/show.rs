use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Show {
    pub id: Uuid,
    pub artist_id: Uuid,
    pub venue_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}
