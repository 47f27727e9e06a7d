use serde::{Deserialize, Serialize};

use crate::domain::UserId;
use crate::models::species::Species;
use crate::services::catalog::{SearchFilters, Segment};

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthDto {
    pub status: &'static str,
    pub version: &'static str,
    pub uptime_seconds: u64,
    pub min_interval_ms: u64,
}

#[derive(Debug, Serialize)]
pub struct ResolvedTitleDto {
    pub query: String,
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct FilterRequest {
    pub species: Vec<Species>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub filters: SearchFilters,
    /// Signed-in user, if any; used to flag records they may edit.
    #[serde(default)]
    pub viewer: Option<UserId>,
}

#[derive(Debug, Serialize)]
pub struct HighlightsDto {
    pub scientific_name: Vec<Segment>,
    pub common_name: Vec<Segment>,
    pub description_preview: Vec<Segment>,
}

#[derive(Debug, Serialize)]
pub struct FilteredSpeciesDto {
    pub species: Species,
    pub highlights: HighlightsDto,
    pub can_edit: bool,
}

#[derive(Debug, Serialize)]
pub struct FilterResponse {
    pub count: usize,
    pub label: String,
    pub results: Vec<FilteredSpeciesDto>,
}
