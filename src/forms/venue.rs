use serde::Deserialize;
use validator::Validate;

/// Venue create/edit submission. Edits are full-field overwrites, so the
/// same input shape serves both.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct VenueInput {
    #[serde(default)]
    #[validate(length(min = 1, message = "This field is required"))]
    pub name: String,

    #[serde(default)]
    #[validate(custom(function = "super::validate_genres"))]
    pub genres: Vec<String>,

    #[serde(default)]
    #[validate(length(min = 1, message = "This field is required"))]
    pub city: String,

    #[serde(default)]
    #[validate(custom(function = "super::validate_state"))]
    pub state: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "This field is required"))]
    pub address: String,

    #[serde(default)]
    #[validate(custom(function = "super::validate_phone"))]
    pub phone: String,

    #[serde(default)]
    #[validate(custom(function = "super::validate_required_link"))]
    pub image_link: String,

    #[validate(custom(function = "super::validate_optional_link"))]
    pub website_link: Option<String>,

    #[validate(custom(function = "super::validate_optional_link"))]
    pub facebook_link: Option<String>,

    #[serde(default)]
    pub seeking_talent: bool,

    pub seeking_description: Option<String>,
}
