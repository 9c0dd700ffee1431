//! The document types stored for the site and the rules each must satisfy

pub mod collection;
pub mod essay;
pub mod page;
pub mod photo;
pub mod poem;
pub mod site_settings;

use std::fmt;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::constants::SLUG_MAX_LENGTH;
use crate::error::AppError;

pub use collection::Collection;
pub use essay::{BodyBlock, Essay};
pub use page::Page;
pub use photo::Photo;
pub use poem::{Poem, Stanza};
pub use site_settings::SiteSettings;

/// Every document type the studio knows about
pub const SCHEMA_TYPES: [&str; 6] = [
    Photo::TYPE_NAME,
    Collection::TYPE_NAME,
    Page::TYPE_NAME,
    SiteSettings::TYPE_NAME,
    Essay::TYPE_NAME,
    Poem::TYPE_NAME,
];

pub trait Document: DeserializeOwned {
    const TYPE_NAME: &'static str;

    fn validate(&self) -> Vec<Issue>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub field: String,
    pub severity: Severity,
    pub message: String,
}

impl Issue {
    pub fn error(field: &str, message: &str) -> Self {
        Self {
            field: field.to_owned(),
            severity: Severity::Error,
            message: message.to_owned(),
        }
    }

    pub fn warning(field: &str, message: &str) -> Self {
        Self {
            field: field.to_owned(),
            severity: Severity::Warning,
            message: message.to_owned(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{} {}: {}", level, self.field, self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slug {
    pub current: String,
}

/// A link to another document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    #[serde(rename = "_ref")]
    pub id: String,
    #[serde(rename = "_key", default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

pub(crate) fn require_text(issues: &mut Vec<Issue>, field: &str, value: &Option<String>) {
    if value.as_deref().map_or(true, |v| v.trim().is_empty()) {
        issues.push(Issue::error(field, "Required"));
    }
}

pub(crate) fn require_slug(issues: &mut Vec<Issue>, slug: &Option<Slug>) {
    match slug {
        Some(slug) if !slug.current.trim().is_empty() => {
            if slug.current.chars().count() > SLUG_MAX_LENGTH {
                issues.push(Issue::error(
                    "slug",
                    &format!("Must be at most {} characters", SLUG_MAX_LENGTH),
                ));
            }
        }
        _ => issues.push(Issue::error("slug", "Required")),
    }
}

pub(crate) fn max_items(issues: &mut Vec<Issue>, field: &str, len: usize, max: usize) {
    if len > max {
        issues.push(Issue::error(field, &format!("Must have at most {} items", max)));
    }
}

fn validate_as<T: Document>(document: Value) -> Result<Vec<Issue>, AppError> {
    let typed: T = serde_json::from_value(document)?;
    Ok(typed.validate())
}

/// Validate a raw document, picking the rules from its `_type`
pub fn validate_document(document: Value) -> Result<Vec<Issue>, AppError> {
    let type_name = document
        .get("_type")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned();
    match type_name.as_str() {
        Photo::TYPE_NAME => validate_as::<Photo>(document),
        Collection::TYPE_NAME => validate_as::<Collection>(document),
        Page::TYPE_NAME => validate_as::<Page>(document),
        SiteSettings::TYPE_NAME => validate_as::<SiteSettings>(document),
        Essay::TYPE_NAME => validate_as::<Essay>(document),
        Poem::TYPE_NAME => validate_as::<Poem>(document),
        other => Err(AppError::Validation(format!(
            "unknown document type `{}`, expected one of {}",
            other,
            SCHEMA_TYPES.join(", ")
        ))),
    }
}
