use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::domain::{Kingdom, SpeciesId, UserId};

/// A species record joined with the public fields of its author's profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Species {
    pub id: SpeciesId,
    pub scientific_name: String,
    pub common_name: Option<String>,
    pub kingdom: Kingdom,
    pub total_population: Option<i64>,
    pub image: Option<String>,
    pub description: Option<String>,
    pub author: AuthorSummary,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorSummary {
    pub id: UserId,
    pub display_name: String,
    #[serde(default)]
    pub biography: Option<String>,
}

impl Species {
    /// Only the author of a record may edit or delete it.
    #[must_use]
    pub fn is_authored_by(&self, user: UserId) -> bool {
        self.author.id == user
    }
}

/// Unvalidated species fields as submitted by a create or edit form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpeciesInput {
    #[serde(default)]
    pub scientific_name: String,
    #[serde(default)]
    pub common_name: Option<String>,
    #[serde(default)]
    pub kingdom: String,
    #[serde(default)]
    pub total_population: Option<i64>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Species fields that passed validation and are ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpeciesDraft {
    pub scientific_name: String,
    pub common_name: Option<String>,
    pub kingdom: Kingdom,
    pub total_population: Option<i64>,
    pub image: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

#[derive(Debug, Error)]
#[error("Invalid species data: {}", join_issues(.issues))]
pub struct ValidationError {
    pub issues: Vec<FieldIssue>,
}

fn join_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Blank or whitespace-only text counts as "not provided".
fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn is_web_url(value: &str) -> bool {
    url::Url::parse(value).is_ok_and(|u| matches!(u.scheme(), "http" | "https"))
}

impl SpeciesInput {
    /// Normalizes and checks every field, reporting all problems at once.
    pub fn validate(self) -> Result<SpeciesDraft, ValidationError> {
        let mut issues = Vec::new();

        let scientific_name = self.scientific_name.trim().to_string();
        if scientific_name.is_empty() {
            issues.push(FieldIssue {
                field: "scientific_name",
                message: "Scientific name is required".to_string(),
            });
        }

        let kingdom = match self.kingdom.trim().parse::<Kingdom>() {
            Ok(kingdom) => Some(kingdom),
            Err(_) => {
                issues.push(FieldIssue {
                    field: "kingdom",
                    message: format!(
                        "Kingdom must be one of: {}",
                        Kingdom::ALL.map(|k| k.as_str()).join(", ")
                    ),
                });
                None
            }
        };

        if self.total_population.is_some_and(|p| p < 1) {
            issues.push(FieldIssue {
                field: "total_population",
                message: "Total population must be a positive integer".to_string(),
            });
        }

        let image = normalize_optional(self.image);
        if let Some(image) = image.as_deref() {
            if !is_web_url(image) {
                issues.push(FieldIssue {
                    field: "image",
                    message: format!("Image must be an http(s) URL, got '{image}'"),
                });
            }
        }

        match kingdom {
            Some(kingdom) if issues.is_empty() => Ok(SpeciesDraft {
                scientific_name,
                common_name: normalize_optional(self.common_name),
                kingdom,
                total_population: self.total_population,
                image,
                description: normalize_optional(self.description),
            }),
            _ => Err(ValidationError { issues }),
        }
    }
}
