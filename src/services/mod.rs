//! Read-model payload builders for the list, search, and detail pages.
//!
//! Queries fetch plain rows; the grouping, search filtering, and
//! past/upcoming partitioning are pure functions over those rows so the
//! page semantics can be tested without a database.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

pub mod artists;
pub mod shows;
pub mod venues;

/// Display format for show start times.
pub const START_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn format_start_time(start_time: &DateTime<Utc>) -> String {
    start_time.format(START_TIME_FORMAT).to_string()
}

/// One venue or artist in a list/search result, with its upcoming-show count.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct EntitySummary {
    pub id: Uuid,
    pub name: String,
    pub num_upcoming_shows: i64,
}

#[derive(Debug, Serialize)]
pub struct SearchResults {
    pub count: usize,
    pub data: Vec<EntitySummary>,
}

/// Case-insensitive substring match against name. An empty term matches
/// every row.
pub fn filter_by_name(rows: Vec<EntitySummary>, search_term: &str) -> Vec<EntitySummary> {
    let needle = search_term.to_lowercase();
    rows.into_iter()
        .filter(|row| row.name.to_lowercase().contains(&needle))
        .collect()
}

pub fn search_results(rows: Vec<EntitySummary>, search_term: &str) -> SearchResults {
    let data = filter_by_name(rows, search_term);
    SearchResults {
        count: data.len(),
        data,
    }
}

/// A show attached to a detail page, carrying the counterpart record
/// (the artist when listing a venue's shows, the venue when listing an
/// artist's).
#[derive(Debug, Clone, FromRow)]
pub struct ShowEntry {
    pub counterpart_id: Uuid,
    pub counterpart_name: String,
    pub counterpart_image_link: String,
    pub start_time: DateTime<Utc>,
}

/// Split a detail page's shows into (past, upcoming) against one `now`
/// captured at query time. A show starting exactly at `now` is upcoming.
pub fn partition_shows(
    entries: Vec<ShowEntry>,
    now: DateTime<Utc>,
) -> (Vec<ShowEntry>, Vec<ShowEntry>) {
    entries.into_iter().partition(|entry| entry.start_time < now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn summary(name: &str) -> EntitySummary {
        EntitySummary {
            id: Uuid::new_v4(),
            name: name.to_string(),
            num_upcoming_shows: 0,
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
    fn test_search_is_case_insensitive_substring() {
        let rows = vec![summary("The Musical Hop"), summary("The Dueling Pianos Bar")];
        let matched = filter_by_name(rows, "Hop");
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].name, "The Musical Hop");

        let rows = vec![summary("The Musical Hop")];
        let matched = filter_by_name(rows, "mUsIcAl");
        assert_eq!(matched.len(), 1);
    }

    #[test]
    fn test_empty_search_term_matches_everything() {
        let rows = vec![summary("A"), summary("B"), summary("C")];
        let results = search_results(rows, "");
        assert_eq!(results.count, 3);
        assert_eq!(results.data.len(), 3);
    }

    #[test]
    fn test_search_with_no_matches_is_empty_not_error() {
        let results = search_results(vec![summary("The Musical Hop")], "karaoke");
        assert_eq!(results.count, 0);
        assert!(results.data.is_empty());
    }

    #[test]
    fn test_partition_counts_sum_to_total() {
        let now = Utc::now();
        let entries = vec![
            entry(now - Duration::days(30)),
            entry(now - Duration::hours(1)),
            entry(now + Duration::hours(1)),
            entry(now + Duration::days(7)),
            entry(now + Duration::days(30)),
        ];
        let total = entries.len();
        let (past, upcoming) = partition_shows(entries, now);
        assert_eq!(past.len(), 2);
        assert_eq!(upcoming.len(), 3);
        assert_eq!(past.len() + upcoming.len(), total);
    }

    #[test]
    fn test_show_starting_exactly_now_is_upcoming() {
        let now = Utc::now();
        let (past, upcoming) = partition_shows(vec![entry(now)], now);
        assert!(past.is_empty());
        assert_eq!(upcoming.len(), 1);
    }

    #[test]
    fn test_partition_of_no_shows_is_empty() {
        let (past, upcoming) = partition_shows(Vec::new(), Utc::now());
        assert!(past.is_empty());
        assert!(upcoming.is_empty());
    }

    #[test]
    fn test_format_start_time() {
        let start_time = DateTime::parse_from_rfc3339("2026-06-15T21:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(format_start_time(&start_time), "2026-06-15 21:30:00");
    }
}
