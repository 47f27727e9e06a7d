use axum::Json;

use super::{
    ApiError, ApiResponse, FilterRequest, FilterResponse, FilteredSpeciesDto, HighlightsDto,
};
use crate::models::species::{Species, SpeciesDraft, SpeciesInput};
use crate::services::catalog::{
    SearchFilters, description_preview, filter_species, highlight, result_count_label,
};

/// `POST /api/species/validate`
pub async fn validate_species(
    Json(input): Json<SpeciesInput>,
) -> Result<Json<ApiResponse<SpeciesDraft>>, ApiError> {
    let draft = input.validate()?;
    Ok(Json(ApiResponse::success(draft)))
}

/// `POST /api/species/filter`
pub async fn filter(Json(request): Json<FilterRequest>) -> Json<ApiResponse<FilterResponse>> {
    let text = request.text.as_str();
    let matched = filter_species(&request.species, text, request.filters);

    let results: Vec<FilteredSpeciesDto> = matched
        .into_iter()
        .map(|species| FilteredSpeciesDto {
            highlights: highlights_for(species, text, request.filters),
            can_edit: request.viewer.is_some_and(|viewer| species.is_authored_by(viewer)),
            species: species.clone(),
        })
        .collect();

    Json(ApiResponse::success(FilterResponse {
        count: results.len(),
        label: result_count_label(results.len()),
        results,
    }))
}

fn highlights_for(species: &Species, text: &str, filters: SearchFilters) -> HighlightsDto {
    let preview = species
        .description
        .as_deref()
        .map(description_preview)
        .unwrap_or_default();

    HighlightsDto {
        scientific_name: highlight(&species.scientific_name, text, filters.scientific_name),
        common_name: highlight(
            species.common_name.as_deref().unwrap_or_default(),
            text,
            filters.common_name,
        ),
        description_preview: highlight(&preview, text, filters.description),
    }
}
