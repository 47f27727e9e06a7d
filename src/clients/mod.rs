pub mod wikipedia;

pub use wikipedia::{PageSummary, SearchHit, Thumbnail, WikipediaClient, WikipediaError};
