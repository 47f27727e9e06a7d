pub mod species;

pub use species::{AuthorSummary, FieldIssue, Species, SpeciesDraft, SpeciesInput, ValidationError};
