use serde::Deserialize;
use validator::Validate;

/// Artist create/edit submission. Same field set as the venue form minus the
/// street address, with seeking_venue in place of seeking_talent.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ArtistInput {
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
    pub seeking_venue: bool,

    pub seeking_description: Option<String>,
}
