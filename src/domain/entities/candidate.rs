use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use uuid::Uuid;
use validator::Validate;

use super::education::Education;
use super::experience::Experience;
use super::option_fields::{deserialize_patch, PatchString};
use super::user::UserIdentity;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: Uuid,
    pub user_id: Uuid,
    pub headline: Option<String>,
    pub bio: Option<String>,
    pub phone: Option<String>,
    pub location_city: Option<String>,
    pub location_state: Option<String>,
    pub location_country: Option<String>,
    pub skills: Vec<String>,
    pub links: Json<BTreeMap<String, String>>,
    pub resume_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Candidate {
    /// Human-readable location, joining the non-empty parts with ", ".
    pub fn location_display(&self) -> String {
        [
            self.location_city.as_deref(),
            self.location_state.as_deref(),
            self.location_country.as_deref(),
        ]
        .iter()
        .filter_map(|part| part.map(str::trim))
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
    }
}

/// Candidate plus everything a profile-derived résumé copies from.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateProfile {
    pub candidate: Candidate,
    pub user: UserIdentity,
    pub experiences: Vec<Experience>,
    pub educations: Vec<Education>,
}

/// PATCH body for profile edits. Nullable columns use tri-state patch
/// fields; `skills` and `links` are full replacements.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfile {
    #[serde(default, deserialize_with = "deserialize_patch")]
    #[validate(length(max = 160, message = "Headline must be at most 160 characters"))]
    pub headline: PatchString,

    #[serde(default, deserialize_with = "deserialize_patch")]
    #[validate(length(max = 4000, message = "Bio must be at most 4000 characters"))]
    pub bio: PatchString,

    #[serde(default, deserialize_with = "deserialize_patch")]
    pub phone: PatchString,

    #[serde(default, deserialize_with = "deserialize_patch")]
    pub location_city: PatchString,

    #[serde(default, deserialize_with = "deserialize_patch")]
    pub location_state: PatchString,

    #[serde(default, deserialize_with = "deserialize_patch")]
    pub location_country: PatchString,

    #[serde(default)]
    pub skills: Option<Vec<String>>,

    #[serde(default)]
    pub links: Option<BTreeMap<String, String>>,

    #[serde(default, deserialize_with = "deserialize_patch")]
    pub resume_url: PatchString,
}

impl UpdateProfile {
    pub fn is_empty(&self) -> bool {
        self.headline.is_unchanged()
            && self.bio.is_unchanged()
            && self.phone.is_unchanged()
            && self.location_city.is_unchanged()
            && self.location_state.is_unchanged()
            && self.location_country.is_unchanged()
            && self.skills.is_none()
            && self.links.is_none()
            && self.resume_url.is_unchanged()
    }
}
