use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::option_fields::{deserialize_patch, OptionField, PatchString};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub id: Uuid,
    pub candidate_id: Uuid,
    pub school: String,
    pub degree: Option<String>,
    pub field: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewEducation {
    #[validate(length(min = 1, max = 160, message = "School cannot be empty"))]
    pub school: String,

    #[serde(default)]
    pub degree: Option<String>,

    #[serde(default)]
    pub field: Option<String>,

    #[serde(default)]
    pub start_date: Option<NaiveDate>,

    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

impl NewEducation {
    pub fn prepare_for_insert(&self, candidate_id: Uuid) -> Education {
        let now = Utc::now();
        Education {
            id: Uuid::new_v4(),
            candidate_id,
            school: self.school.clone(),
            degree: self.degree.clone(),
            field: self.field.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEducation {
    #[serde(default)]
    #[validate(length(min = 1, max = 160, message = "School cannot be empty"))]
    pub school: Option<String>,

    #[serde(default, deserialize_with = "deserialize_patch")]
    pub degree: PatchString,

    #[serde(default, deserialize_with = "deserialize_patch")]
    pub field: PatchString,

    #[serde(default, deserialize_with = "deserialize_patch")]
    pub start_date: OptionField<NaiveDate>,

    #[serde(default, deserialize_with = "deserialize_patch")]
    pub end_date: OptionField<NaiveDate>,
}

impl UpdateEducation {
    pub fn apply_to(self, mut current: Education) -> Education {
        if let Some(school) = self.school {
            current.school = school;
        }
        current.degree = self.degree.apply_to(current.degree);
        current.field = self.field.apply_to(current.field);
        current.start_date = self.start_date.apply_to(current.start_date);
        current.end_date = self.end_date.apply_to(current.end_date);
        current.updated_at = Utc::now();
        current
    }
}
