pub mod wikipedia {

    pub const SEARCH_ENDPOINT: &str = "https://en.wikipedia.org/w/api.php";

    pub const SUMMARY_ENDPOINT: &str = "https://en.wikipedia.org/api/rest_v1/page/summary";

    pub const MIN_INTERVAL_MS: u64 = 1000;

    pub const REQUEST_TIMEOUT_SECONDS: u64 = 15;

    pub const USER_AGENT: &str = "Biodex/1.0";

    /// Appended to an ambiguous query, in this order, to bias search toward taxa.
    pub const QUALIFIERS: &[&str] = &["species", "animal", "plant", "organism"];

    pub const DISAMBIGUATION_TYPE: &str = "disambiguation";
}

pub mod catalog {

    pub const PREVIEW_CHARS: usize = 150;

    pub const PREVIEW_SUFFIX: &str = "...";
}

pub mod limits {

    pub const MAX_QUERY_CHARS: usize = 300;
}
