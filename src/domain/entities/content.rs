use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;
use validator::ValidateEmail;

use crate::constants::{
    CONTENT_DATE_FORMAT, PROFILE_SKILL_CATEGORY, PROFILE_SKILL_LEVEL, SKILL_LEVEL_MAX,
    SKILL_LEVEL_MIN,
};
use crate::errors::{AppError, FieldError};

use super::candidate::CandidateProfile;

/// The nested résumé document. Field names are the wire/storage format and
/// round-trip verbatim: absent optionals stay absent, empty lists stay `[]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeContent {
    pub personal: PersonalInfo,
    #[serde(default)]
    pub experiences: Vec<ExperienceItem>,
    #[serde(default)]
    pub education: Vec<EducationItem>,
    #[serde(default)]
    pub skills: Vec<SkillItem>,
    #[serde(default)]
    pub projects: Vec<ProjectItem>,
    #[serde(default)]
    pub languages: Vec<LanguageItem>,
    #[serde(default)]
    pub certifications: Vec<CertificationItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub links: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceItem {
    #[serde(default = "new_item_id")]
    pub id: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub current: bool,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationItem {
    #[serde(default = "new_item_id")]
    pub id: String,
    #[serde(default)]
    pub school: String,
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub field: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillItem {
    #[serde(default = "new_item_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub level: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectItem {
    #[serde(default = "new_item_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageItem {
    #[serde(default = "new_item_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub level: LanguageLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageLevel {
    Beginner,
    Intermediate,
    Advanced,
    Native,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificationItem {
    #[serde(default = "new_item_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub issuer: String,
    #[serde(default)]
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// Locally-unique id for list items, independent of any source row id.
pub fn new_item_id() -> String {
    Uuid::new_v4().to_string()
}

fn wire_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(CONTENT_DATE_FORMAT).to_string())
        .unwrap_or_default()
}

impl ResumeContent {
    /// Structural validation of the whole document. Collects every failure
    /// with its dotted JSON path instead of stopping at the first one.
    pub fn validate(&self) -> Result<(), AppError> {
        let mut errors = Vec::new();

        require_non_empty(&mut errors, "personal.fullName", &self.personal.full_name);
        require_non_empty(&mut errors, "personal.title", &self.personal.title);
        require_non_empty(&mut errors, "personal.email", &self.personal.email);
        if !self.personal.email.trim().is_empty() && !self.personal.email.validate_email() {
            push(&mut errors, "personal.email", "Must be a valid email address");
        }
        for (label, link) in &self.personal.links {
            if Url::parse(link).is_err() {
                push(
                    &mut errors,
                    format!("personal.links.{label}"),
                    "Must be a valid URL",
                );
            }
        }

        for (i, exp) in self.experiences.iter().enumerate() {
            check_date_pair(
                &mut errors,
                &format!("experiences[{i}]"),
                &exp.start_date,
                &exp.end_date,
            );
        }

        for (i, edu) in self.education.iter().enumerate() {
            check_date_pair(
                &mut errors,
                &format!("education[{i}]"),
                &edu.start_date,
                &edu.end_date,
            );
        }

        for (i, skill) in self.skills.iter().enumerate() {
            if !(SKILL_LEVEL_MIN..=SKILL_LEVEL_MAX).contains(&skill.level) {
                push(
                    &mut errors,
                    format!("skills[{i}].level"),
                    format!("Level must be between {SKILL_LEVEL_MIN} and {SKILL_LEVEL_MAX}"),
                );
            }
        }

        for (i, project) in self.projects.iter().enumerate() {
            check_date_pair(
                &mut errors,
                &format!("projects[{i}]"),
                project.start_date.as_deref().unwrap_or(""),
                project.end_date.as_deref().unwrap_or(""),
            );
            if let Some(link) = &project.link {
                if Url::parse(link).is_err() {
                    push(&mut errors, format!("projects[{i}].link"), "Must be a valid URL");
                }
            }
        }

        for (i, cert) in self.certifications.iter().enumerate() {
            if let Some(link) = &cert.link {
                if Url::parse(link).is_err() {
                    push(
                        &mut errors,
                        format!("certifications[{i}].link"),
                        "Must be a valid URL",
                    );
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::ValidationError(errors))
        }
    }

    /// Value-copy of a candidate profile into a fresh document. Experiences
    /// and educations are embedded as independent copies; later edits to the
    /// source rows never propagate into the document. The enrichment lists
    /// (projects, languages, certifications) always start empty.
    pub fn from_profile(profile: &CandidateProfile) -> Self {
        let candidate = &profile.candidate;

        ResumeContent {
            personal: PersonalInfo {
                full_name: profile.user.display_name().to_string(),
                title: candidate.headline.clone().unwrap_or_default(),
                email: profile.user.email.clone(),
                phone: candidate.phone.clone().unwrap_or_default(),
                location: candidate.location_display(),
                photo: None,
                summary: candidate.bio.clone().unwrap_or_default(),
                links: candidate.links.0.clone(),
            },
            experiences: profile
                .experiences
                .iter()
                .map(|exp| ExperienceItem {
                    id: new_item_id(),
                    company: exp.company.clone().unwrap_or_default(),
                    position: exp.title.clone(),
                    location: String::new(),
                    start_date: wire_date(Some(exp.start_date)),
                    end_date: wire_date(exp.end_date),
                    current: exp.currently,
                    description: exp.description.clone().unwrap_or_default(),
                    skills: Vec::new(),
                })
                .collect(),
            education: profile
                .educations
                .iter()
                .map(|edu| EducationItem {
                    id: new_item_id(),
                    school: edu.school.clone(),
                    degree: edu.degree.clone().unwrap_or_default(),
                    field: edu.field.clone().unwrap_or_default(),
                    start_date: wire_date(edu.start_date),
                    end_date: wire_date(edu.end_date),
                    description: String::new(),
                })
                .collect(),
            skills: candidate
                .skills
                .iter()
                .map(|name| SkillItem {
                    id: new_item_id(),
                    name: name.clone(),
                    category: PROFILE_SKILL_CATEGORY.to_string(),
                    level: PROFILE_SKILL_LEVEL,
                })
                .collect(),
            projects: Vec::new(),
            languages: Vec::new(),
            certifications: Vec::new(),
        }
    }
}

fn push(errors: &mut Vec<FieldError>, field: impl Into<String>, message: impl Into<String>) {
    errors.push(FieldError {
        field: field.into(),
        message: message.into(),
    });
}

fn require_non_empty(errors: &mut Vec<FieldError>, field: &str, value: &str) {
    if value.trim().is_empty() {
        push(errors, field, "Cannot be empty");
    }
}

/// Empty string means "absent". Non-empty strings must parse as dates, and a
/// complete pair must be ordered.
fn check_date_pair(errors: &mut Vec<FieldError>, prefix: &str, start: &str, end: &str) {
    let start_parsed = parse_wire_date(errors, &format!("{prefix}.startDate"), start);
    let end_parsed = parse_wire_date(errors, &format!("{prefix}.endDate"), end);

    if let (Some(start), Some(end)) = (start_parsed, end_parsed) {
        if end < start {
            push(
                errors,
                format!("{prefix}.endDate"),
                "End date cannot be before start date",
            );
        }
    }
}

fn parse_wire_date(errors: &mut Vec<FieldError>, field: &str, value: &str) -> Option<NaiveDate> {
    if value.is_empty() {
        return None;
    }
    match NaiveDate::parse_from_str(value, CONTENT_DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(_) => {
            push(errors, field, "Must be a YYYY-MM-DD date");
            None
        }
    }
}
