use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use uuid::Uuid;
use validator::Validate;

use super::content::ResumeContent;
use super::option_fields::{deserialize_patch, OptionField};
use super::template::ResumeStyle;

/// Layout tag copied from the chosen template at creation/edit time. A plain
/// value, not a live template reference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "resume_layout", rename_all = "lowercase")]
pub enum ResumeLayout {
    #[default]
    Modern,
    Classic,
    Creative,
    Minimalist,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Resume {
    pub id: Uuid,
    pub candidate_id: Uuid,
    pub title: String,
    pub layout: ResumeLayout,
    pub content: Json<ResumeContent>,
    pub style: Option<Json<ResumeStyle>>,
    pub is_public: bool,
    pub is_primary: bool,
    pub pdf_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewResume {
    #[validate(length(min = 1, max = 160, message = "Title cannot be empty"))]
    pub title: String,

    pub content: ResumeContent,

    #[serde(default)]
    pub layout: Option<ResumeLayout>,

    #[serde(default)]
    pub style: Option<ResumeStyle>,
}

impl NewResume {
    pub fn prepare_for_insert(self, candidate_id: Uuid) -> ResumeInsert {
        let now = Utc::now();
        ResumeInsert {
            id: Uuid::new_v4(),
            candidate_id,
            title: self.title,
            layout: self.layout.unwrap_or_default(),
            content: self.content,
            style: self.style,
            is_public: false,
            is_primary: false,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResumeInsert {
    pub id: Uuid,
    pub candidate_id: Uuid,
    pub title: String,
    pub layout: ResumeLayout,
    pub content: ResumeContent,
    pub style: Option<ResumeStyle>,
    pub is_public: bool,
    pub is_primary: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ResumeInsert> for Resume {
    fn from(insert: ResumeInsert) -> Self {
        Resume {
            id: insert.id,
            candidate_id: insert.candidate_id,
            title: insert.title,
            layout: insert.layout,
            content: Json(insert.content),
            style: insert.style.map(Json),
            is_public: insert.is_public,
            is_primary: insert.is_primary,
            pdf_url: None,
            created_at: insert.created_at,
            updated_at: insert.updated_at,
        }
    }
}

/// PATCH body for résumé edits. Only supplied fields change; `style` is
/// tri-state so a client can clear the snapshot with an explicit null.
/// `isPrimary` is deliberately absent — promotion has its own operation.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResume {
    #[serde(default)]
    #[validate(length(min = 1, max = 160, message = "Title cannot be empty"))]
    pub title: Option<String>,

    #[serde(default)]
    pub content: Option<ResumeContent>,

    #[serde(default)]
    pub layout: Option<ResumeLayout>,

    #[serde(default, deserialize_with = "deserialize_patch")]
    pub style: OptionField<ResumeStyle>,

    #[serde(default)]
    pub is_public: Option<bool>,
}

impl UpdateResume {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.layout.is_none()
            && self.style.is_unchanged()
            && self.is_public.is_none()
    }
}
