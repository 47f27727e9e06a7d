use crate::config::Config;
use crate::services::{LookupResult, ResolverError};
use crate::state::SharedState;

pub async fn cmd_lookup(config: &Config, query: &str) -> anyhow::Result<()> {
    println!("Looking up: {query}");

    let state = SharedState::new(config.clone())?;

    let result = state
        .lookup_service
        .lookup(query)
        .await
        .inspect_err(print_hint)?;
    print_result(&result);

    Ok(())
}

pub async fn cmd_resolve(config: &Config, query: &str) -> anyhow::Result<()> {
    let state = SharedState::new(config.clone())?;

    let title = state
        .lookup_service
        .resolve_title(query)
        .await
        .inspect_err(print_hint)?;
    println!("{query} -> {title}");

    Ok(())
}

pub async fn cmd_summary(config: &Config, title: &str) -> anyhow::Result<()> {
    let state = SharedState::new(config.clone())?;

    let result = state
        .lookup_service
        .fetch_content(title)
        .await
        .inspect_err(print_hint)?;
    print_result(&result);

    Ok(())
}

fn print_result(result: &LookupResult) {
    println!();
    println!("{}", result.title);
    println!("{:-<60}", "");
    println!("{}", result.description);
    println!();

    match &result.image {
        Some(image) => println!("Image: {image}"),
        None => println!("Image: (none)"),
    }
}

fn print_hint(error: &ResolverError) {
    if matches!(error, ResolverError::NotFound(_)) {
        println!("Try a scientific name, e.g. biodex lookup \"Panthera leo\"");
    }
}
