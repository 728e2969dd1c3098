//! Typed form inputs and field validation.
//!
//! Every create/edit body is deserialized once into an input struct and
//! validated with `validator`. Failures are collected into the full list of
//! (field, message) pairs rather than stopping at the first error.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::{ValidationError, ValidationErrors};

pub mod artist;
pub mod show;
pub mod venue;

pub use artist::ArtistInput;
pub use show::ShowInput;
pub use venue::VenueInput;

/// Genre vocabulary for the multi-select genre fields.
pub const GENRES: &[&str] = &[
    "Alternative",
    "Blues",
    "Classical",
    "Country",
    "Electronic",
    "Folk",
    "Funk",
    "Hip-Hop",
    "Heavy Metal",
    "Instrumental",
    "Jazz",
    "Musical Theatre",
    "Pop",
    "Punk",
    "R&B",
    "Reggae",
    "Rock n Roll",
    "Soul",
    "Other",
];

/// State vocabulary for the state select field (50 states plus DC).
pub const STATES: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL", "GA", "HI", "ID", "IL", "IN", "IA",
    "KS", "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ", "NM",
    "NY", "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VT", "VA", "WA",
    "WV", "WI", "WY",
];

static PHONE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{3}[-.\s]?\d{3}[-.\s]?\d{4}$").unwrap());
static LINK_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^https?://\S+$").unwrap());

/// Search submissions arrive urlencoded with a single `search_term` field;
/// a missing field behaves like an empty term.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub search_term: String,
}

/// What the create forms are built from: the fixed select vocabularies.
#[derive(Debug, Serialize)]
pub struct FormChoices {
    pub genres: &'static [&'static str],
    pub states: &'static [&'static str],
}

pub fn form_choices() -> FormChoices {
    FormChoices {
        genres: GENRES,
        states: STATES,
    }
}

/// The show form has no select vocabularies; its payload names the fields a
/// submission must carry instead.
#[derive(Debug, Serialize)]
pub struct ShowFormFields {
    pub fields: &'static [&'static str],
}

pub fn show_form_fields() -> ShowFormFields {
    ShowFormFields {
        fields: &["artist_id", "venue_id", "start_time"],
    }
}

/// One validation failure, addressed to the field it occurred on.
#[derive(Debug, Clone, Serialize, PartialEq, Eq, PartialOrd, Ord)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    /// The `field: message` line shown to the user.
    pub fn flash_line(&self) -> String {
        format!("{}: {}", self.field, self.message)
    }
}

/// Flatten `ValidationErrors` into the full, deterministic field-error list.
pub fn collect_field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut collected = Vec::new();
    for (field, field_errors) in errors.field_errors() {
        for err in field_errors {
            collected.push(FieldError {
                field: field.to_string(),
                message: err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| err.code.to_string()),
            });
        }
    }

    // field_errors() iterates a HashMap; sort so output order is stable
    collected.sort();
    collected
}

/// Optional form fields arrive as empty strings; store them as NULL.
pub fn blank_to_none(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn required_error() -> ValidationError {
    let mut err = ValidationError::new("required");
    err.message = Some("This field is required".into());
    err
}

pub(crate) fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if phone.is_empty() {
        return Err(required_error());
    }
    if PHONE_REGEX.is_match(phone) {
        Ok(())
    } else {
        let mut err = ValidationError::new("invalid_phone");
        err.message = Some("Phone number must look like 123-456-7890".into());
        Err(err)
    }
}

pub(crate) fn validate_state(state: &str) -> Result<(), ValidationError> {
    if STATES.contains(&state) {
        Ok(())
    } else {
        let mut err = ValidationError::new("invalid_state");
        err.message = Some("State must be a two-letter US state code".into());
        Err(err)
    }
}

pub(crate) fn validate_genres(genres: &Vec<String>) -> Result<(), ValidationError> {
    if genres.is_empty() {
        let mut err = ValidationError::new("genres_empty");
        err.message = Some("At least one genre must be selected".into());
        return Err(err);
    }
    for genre in genres {
        if !GENRES.contains(&genre.as_str()) {
            let mut err = ValidationError::new("invalid_genre");
            err.message = Some(format!("'{genre}' is not a recognized genre").into());
            return Err(err);
        }
    }
    Ok(())
}

pub(crate) fn validate_required_link(link: &str) -> Result<(), ValidationError> {
    if link.is_empty() {
        return Err(required_error());
    }
    validate_link_shape(link)
}

pub(crate) fn validate_optional_link(link: &str) -> Result<(), ValidationError> {
    if link.is_empty() {
        return Ok(());
    }
    validate_link_shape(link)
}

fn validate_link_shape(link: &str) -> Result<(), ValidationError> {
    if LINK_REGEX.is_match(link) {
        Ok(())
    } else {
        let mut err = ValidationError::new("invalid_link");
        err.message = Some("Must be a valid http(s) URL".into());
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_accepts_common_formats() {
        assert!(validate_phone("123-456-7890").is_ok());
        assert!(validate_phone("123.456.7890").is_ok());
        assert!(validate_phone("1234567890").is_ok());
    }

    #[test]
    fn test_phone_rejects_bad_formats() {
        assert!(validate_phone("").is_err());
        assert!(validate_phone("12-34").is_err());
        assert!(validate_phone("phone me").is_err());
        assert!(validate_phone("123-456-78901").is_err());
    }

    #[test]
    fn test_state_vocabulary() {
        assert!(validate_state("NY").is_ok());
        assert!(validate_state("CA").is_ok());
        assert!(validate_state("ZZ").is_err());
        assert!(validate_state("").is_err());
    }

    #[test]
    fn test_genres_must_be_known_and_nonempty() {
        assert!(validate_genres(&vec!["Jazz".to_string(), "Folk".to_string()]).is_ok());
        assert!(validate_genres(&vec![]).is_err());
        assert!(validate_genres(&vec!["Polka".to_string()]).is_err());
    }

    #[test]
    fn test_links() {
        assert!(validate_required_link("https://example.com/venue.jpg").is_ok());
        assert!(validate_required_link("").is_err());
        assert!(validate_optional_link("").is_ok());
        assert!(validate_optional_link("not a url").is_err());
    }

    #[test]
    fn test_show_form_names_its_fields() {
        let form = show_form_fields();
        assert_eq!(form.fields, &["artist_id", "venue_id", "start_time"]);
    }

    #[test]
    fn test_blank_to_none() {
        assert_eq!(blank_to_none(Some("  ".to_string())), None);
        assert_eq!(blank_to_none(None), None);
        assert_eq!(
            blank_to_none(Some("https://x.com".to_string())),
            Some("https://x.com".to_string())
        );
    }
}
