use anyhow::Context;
use std::path::Path;

use crate::domain::UserId;
use crate::models::species::{Species, SpeciesInput};
use crate::services::catalog::{
    SearchFilters, Segment, description_preview, filter_species, highlight, result_count_label,
};

pub fn cmd_filter(
    path: &Path,
    text: &str,
    filters: SearchFilters,
    viewer: Option<UserId>,
) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog: {}", path.display()))?;
    let catalog: Vec<Species> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse catalog: {}", path.display()))?;

    let matched = filter_species(&catalog, text, filters);

    println!("{}", result_count_label(matched.len()));
    println!("{:-<60}", "");

    for species in matched {
        println!(
            "• {} ({})",
            render(&highlight(&species.scientific_name, text, filters.scientific_name)),
            species.kingdom
        );

        if let Some(common_name) = species.common_name.as_deref() {
            println!("  {}", render(&highlight(common_name, text, filters.common_name)));
        }

        if let Some(description) = species.description.as_deref() {
            let preview = description_preview(description);
            println!("  {}", render(&highlight(&preview, text, filters.description)));
        }

        if viewer.is_some_and(|viewer| species.is_authored_by(viewer)) {
            println!("  Added by you");
        } else {
            println!("  Added by {}", species.author.display_name);
        }
        println!();
    }

    Ok(())
}

pub fn cmd_validate(path: &Path) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read species entry: {}", path.display()))?;
    let input: SpeciesInput = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse species entry: {}", path.display()))?;

    let draft = input.validate().inspect_err(|e| {
        println!("✗ Species entry is invalid:");
        for issue in &e.issues {
            println!("  {}: {}", issue.field, issue.message);
        }
    })?;

    println!("✓ {} is valid", draft.scientific_name);
    println!("{}", serde_json::to_string_pretty(&draft)?);

    Ok(())
}

fn render(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(|segment| match segment {
            Segment::Plain(text) => text.clone(),
            Segment::Match(text) => format!("[{text}]"),
        })
        .collect()
}
