use super::ApiError;
use crate::constants::limits::MAX_QUERY_CHARS;

pub fn validate_search_query(query: &str) -> Result<&str, ApiError> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation("Search query cannot be empty"));
    }

    if trimmed.chars().count() > MAX_QUERY_CHARS {
        return Err(ApiError::validation(format!(
            "Search query must be {} characters or less",
            MAX_QUERY_CHARS
        )));
    }

    Ok(trimmed)
}

pub fn validate_article_title(title: &str) -> Result<&str, ApiError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation("Article title cannot be empty"));
    }

    if trimmed.contains(['#', '<', '>', '[', ']', '{', '}', '|']) {
        return Err(ApiError::validation(format!(
            "Invalid article title: {}",
            trimmed
        )));
    }

    Ok(trimmed)
}
