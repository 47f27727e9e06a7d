pub mod rate_gate;
pub use rate_gate::RateGate;

pub mod resolver_service;
pub use resolver_service::{
    ContentFetcher, ContentSource, ResolvedContent, ResolverError, TitleResolver,
};

pub mod resolver_service_impl;
pub use resolver_service_impl::WikipediaResolver;

pub mod lookup;
pub use lookup::{LookupResult, SpeciesLookupService};

pub mod catalog;
pub use catalog::{SearchFilters, Segment};
