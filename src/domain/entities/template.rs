use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use uuid::{uuid, Uuid};

use super::resume::ResumeLayout;

/// Sections a template can render, in the order they appear in its structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Personal,
    Experience,
    Education,
    Skills,
    Projects,
    Languages,
    Certifications,
}

/// Visual parameters a résumé snapshots from its template at creation/edit
/// time. Stored per résumé so later template edits never leak into existing
/// documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeStyle {
    pub colors: StylePalette,
    pub fonts: StyleFonts,
    pub spacing: StyleSpacing,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StylePalette {
    pub primary: String,
    pub secondary: String,
    pub background: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleFonts {
    pub headings: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleSpacing {
    pub section: u32,
    pub item: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateStructure {
    pub sections: Vec<SectionKind>,
    pub layout: ResumeLayout,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ResumeTemplate {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub thumbnail: Option<String>,
    pub structure: Json<TemplateStructure>,
    pub style: Json<ResumeStyle>,
    pub is_public: bool,
    pub is_premium: bool,
    pub price: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub const MODERN_TEMPLATE_ID: Uuid = uuid!("11111111-1111-4111-8111-111111111111");
pub const CLASSIC_TEMPLATE_ID: Uuid = uuid!("22222222-2222-4222-8222-222222222222");
pub const CREATIVE_TEMPLATE_ID: Uuid = uuid!("33333333-3333-4333-8333-333333333333");
pub const MINIMALIST_TEMPLATE_ID: Uuid = uuid!("44444444-4444-4444-8444-444444444444");

/// The four stock presets every installation ships with. The database seed
/// migration mirrors these rows; the in-memory store loads them directly.
pub fn builtin_templates() -> Vec<ResumeTemplate> {
    let full_sections = vec![
        SectionKind::Personal,
        SectionKind::Experience,
        SectionKind::Education,
        SectionKind::Skills,
        SectionKind::Projects,
        SectionKind::Languages,
        SectionKind::Certifications,
    ];
    let compact_sections = vec![
        SectionKind::Personal,
        SectionKind::Experience,
        SectionKind::Education,
        SectionKind::Skills,
    ];
    let now = Utc::now();

    let preset = |id: Uuid,
                  name: &str,
                  category: &str,
                  sections: Vec<SectionKind>,
                  layout: ResumeLayout,
                  style: ResumeStyle| ResumeTemplate {
        id,
        name: name.to_string(),
        category: category.to_string(),
        thumbnail: None,
        structure: Json(TemplateStructure { sections, layout }),
        style: Json(style),
        is_public: true,
        is_premium: false,
        price: None,
        created_at: now,
        updated_at: now,
    };

    vec![
        preset(
            MODERN_TEMPLATE_ID,
            "Modern",
            "Modern",
            full_sections.clone(),
            ResumeLayout::Modern,
            ResumeStyle {
                colors: StylePalette {
                    primary: "#2563eb".into(),
                    secondary: "#1e40af".into(),
                    background: "#ffffff".into(),
                    text: "#111827".into(),
                    accent: Some("#60a5fa".into()),
                },
                fonts: StyleFonts {
                    headings: "Inter".into(),
                    body: "Inter".into(),
                },
                spacing: StyleSpacing { section: 24, item: 12 },
            },
        ),
        preset(
            CLASSIC_TEMPLATE_ID,
            "Classic",
            "Classic",
            full_sections.clone(),
            ResumeLayout::Classic,
            ResumeStyle {
                colors: StylePalette {
                    primary: "#1f2937".into(),
                    secondary: "#4b5563".into(),
                    background: "#ffffff".into(),
                    text: "#111827".into(),
                    accent: None,
                },
                fonts: StyleFonts {
                    headings: "Georgia".into(),
                    body: "Times New Roman".into(),
                },
                spacing: StyleSpacing { section: 20, item: 10 },
            },
        ),
        preset(
            CREATIVE_TEMPLATE_ID,
            "Creative",
            "Creative",
            full_sections,
            ResumeLayout::Creative,
            ResumeStyle {
                colors: StylePalette {
                    primary: "#7c3aed".into(),
                    secondary: "#db2777".into(),
                    background: "#faf5ff".into(),
                    text: "#1f2937".into(),
                    accent: Some("#f59e0b".into()),
                },
                fonts: StyleFonts {
                    headings: "Poppins".into(),
                    body: "Open Sans".into(),
                },
                spacing: StyleSpacing { section: 28, item: 14 },
            },
        ),
        preset(
            MINIMALIST_TEMPLATE_ID,
            "Minimalist",
            "Minimalist",
            compact_sections,
            ResumeLayout::Minimalist,
            ResumeStyle {
                colors: StylePalette {
                    primary: "#000000".into(),
                    secondary: "#525252".into(),
                    background: "#ffffff".into(),
                    text: "#171717".into(),
                    accent: None,
                },
                fonts: StyleFonts {
                    headings: "Helvetica".into(),
                    body: "Helvetica".into(),
                },
                spacing: StyleSpacing { section: 16, item: 8 },
            },
        ),
    ]
}
