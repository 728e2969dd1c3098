use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

/// Show create submission. The ids are type-checked here; whether they point
/// at real rows is left to the database foreign keys.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ShowInput {
    pub artist_id: Uuid,
    pub venue_id: Uuid,
    pub start_time: DateTime<Utc>,
}
