use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::errors::AppError;

use super::option_fields::{deserialize_patch, OptionField, PatchString};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub id: Uuid,
    pub candidate_id: Uuid,
    pub title: String,
    pub company: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub currently: bool,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewExperience {
    #[validate(length(min = 1, max = 160, message = "Title cannot be empty"))]
    pub title: String,

    #[serde(default)]
    pub company: Option<String>,

    pub start_date: NaiveDate,

    #[serde(default)]
    pub end_date: Option<NaiveDate>,

    #[serde(default)]
    pub currently: bool,

    #[serde(default)]
    pub description: Option<String>,
}

impl NewExperience {
    pub fn prepare_for_insert(&self, candidate_id: Uuid) -> Experience {
        let now = Utc::now();
        Experience {
            id: Uuid::new_v4(),
            candidate_id,
            title: self.title.clone(),
            company: self.company.clone(),
            start_date: self.start_date,
            // An ongoing position carries no end date.
            end_date: if self.currently { None } else { self.end_date },
            currently: self.currently,
            description: self.description.clone(),
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateExperience {
    #[serde(default)]
    #[validate(length(min = 1, max = 160, message = "Title cannot be empty"))]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "deserialize_patch")]
    pub company: PatchString,

    #[serde(default)]
    pub start_date: Option<NaiveDate>,

    #[serde(default, deserialize_with = "deserialize_patch")]
    pub end_date: OptionField<NaiveDate>,

    #[serde(default)]
    pub currently: Option<bool>,

    #[serde(default, deserialize_with = "deserialize_patch")]
    pub description: PatchString,
}

impl UpdateExperience {
    /// Produce the row as it would look after the patch. Validation of the
    /// date range always runs against this resulting state.
    pub fn apply_to(self, mut current: Experience) -> Experience {
        if let Some(title) = self.title {
            current.title = title;
        }
        current.company = self.company.apply_to(current.company);
        if let Some(start_date) = self.start_date {
            current.start_date = start_date;
        }
        current.end_date = self.end_date.apply_to(current.end_date);
        if let Some(currently) = self.currently {
            current.currently = currently;
        }
        if current.currently {
            current.end_date = None;
        }
        current.description = self.description.apply_to(current.description);
        current.updated_at = Utc::now();
        current
    }
}

/// End before start is never a valid range.
pub fn check_date_range(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    field: &str,
) -> Result<(), AppError> {
    if let (Some(start), Some(end)) = (start, end) {
        if end < start {
            return Err(AppError::invalid_field(
                field,
                "End date cannot be before start date",
            ));
        }
    }
    Ok(())
}
