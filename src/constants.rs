use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

pub static START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);

/// Wire format for date strings inside a résumé document.
pub const CONTENT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Bucket used when lifting flat profile skill tags into a résumé document.
pub const PROFILE_SKILL_CATEGORY: &str = "Technical";

/// Neutral proficiency assigned to profile-derived skills.
pub const PROFILE_SKILL_LEVEL: u8 = 3;

pub const SKILL_LEVEL_MIN: u8 = 1;
pub const SKILL_LEVEL_MAX: u8 = 5;
