mod catalog;
mod wiki;

pub use catalog::{cmd_filter, cmd_validate};
pub use wiki::{cmd_lookup, cmd_resolve, cmd_summary};
