use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use biodex::clients::{PageSummary, SearchHit, Thumbnail, WikipediaError};
use biodex::config::Config;
use biodex::services::ContentSource;
use biodex::state::SharedState;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;
use tower::ServiceExt;

#[derive(Default)]
struct StubSource {
    searches: HashMap<String, Vec<&'static str>>,
    summaries: HashMap<String, PageSummary>,
    content_types: HashMap<String, &'static str>,
}

impl StubSource {
    fn with_search(mut self, query: &str, titles: &[&'static str]) -> Self {
        self.searches.insert(query.to_string(), titles.to_vec());
        self
    }

    fn with_article(mut self, title: &str, page_type: &str, image: Option<(&str, &'static str)>) -> Self {
        self.summaries.insert(
            title.to_string(),
            PageSummary {
                title: title.to_string(),
                extract: format!("{title} is a species."),
                page_type: Some(page_type.to_string()),
                description: None,
                thumbnail: image.map(|(url, _)| Thumbnail {
                    source: url.to_string(),
                    width: 320,
                    height: 240,
                }),
            },
        );
        if let Some((url, content_type)) = image {
            self.content_types.insert(url.to_string(), content_type);
        }
        self
    }
}

#[async_trait]
impl ContentSource for StubSource {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, WikipediaError> {
        let titles = self.searches.get(query).cloned().unwrap_or_default();
        Ok(titles
            .into_iter()
            .enumerate()
            .map(|(i, title)| SearchHit {
                title: title.to_string(),
                snippet: String::new(),
                page_id: i64::try_from(i).unwrap_or_default(),
            })
            .collect())
    }

    async fn summary(&self, title: &str) -> Result<PageSummary, WikipediaError> {
        self.summaries
            .get(title)
            .cloned()
            .ok_or(WikipediaError::Status {
                endpoint: "summary",
                status: 404,
            })
    }

    async fn content_type(&self, url: &str) -> Result<Option<String>, WikipediaError> {
        Ok(self.content_types.get(url).map(|s| (*s).to_string()))
    }
}

fn stub() -> StubSource {
    StubSource::default()
        .with_search("Lion", &["Lion"])
        .with_article(
            "Lion",
            "standard",
            Some(("https://upload.example/lion.jpg", "image/jpeg")),
        )
        .with_search("Mercury", &["Mercury"])
        .with_article("Mercury", "disambiguation", None)
        .with_search("Mercury species", &["Mercury (planet)"])
        .with_article("Mercury (planet)", "standard", None)
        .with_search("Broken", &["Broken"])
        .with_article(
            "Broken",
            "standard",
            Some(("https://upload.example/broken", "text/html")),
        )
}

async fn spawn_app() -> Router {
    let mut config = Config::default();
    config.wikipedia.min_interval_ms = 0;

    let shared = Arc::new(SharedState::with_source(config, Arc::new(stub())));
    let state = biodex::api::create_app_state(shared, None);
    biodex::api::router(state).await
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    read(response).await
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    read(response).await
}

async fn read(response: axum::response::Response) -> (StatusCode, Value) {
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

#[tokio::test]
async fn test_health() {
    let app = spawn_app().await;

    let (status, body) = get(&app, "/api/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "ok");
    assert_eq!(body["data"]["min_interval_ms"], 0);
}

#[tokio::test]
async fn test_metrics_disabled_without_recorder() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/api/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_lookup_returns_description_and_image() {
    let app = spawn_app().await;

    let (status, body) = get(&app, "/api/wiki/lookup?q=Lion").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], "Lion");
    assert_eq!(body["data"]["description"], "Lion is a species.");
    assert_eq!(body["data"]["image"], "https://upload.example/lion.jpg");
}

#[tokio::test]
async fn test_lookup_trims_query() {
    let app = spawn_app().await;

    let (status, body) = get(&app, "/api/wiki/lookup?q=%20%20Lion%20").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], "Lion");
}

#[tokio::test]
async fn test_resolve_falls_back_to_qualified_search() {
    let app = spawn_app().await;

    let (status, body) = get(&app, "/api/wiki/resolve?q=Mercury").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["query"], "Mercury");
    assert_eq!(body["data"]["title"], "Mercury (planet)");
}

#[tokio::test]
async fn test_lookup_not_found() {
    let app = spawn_app().await;

    let (status, body) = get(&app, "/api/wiki/lookup?q=Nothing").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(
        body["error"],
        "No matching Wikipedia article found for 'Nothing'"
    );
}

#[tokio::test]
async fn test_summary_without_thumbnail_has_no_image() {
    let app = spawn_app().await;

    let (status, body) = get(&app, "/api/wiki/summary?title=Mercury%20(planet)").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], "Mercury (planet)");
    assert!(body["data"].get("image").is_none_or(Value::is_null));
}

#[tokio::test]
async fn test_summary_rejects_non_image_thumbnail() {
    let app = spawn_app().await;

    let (status, body) = get(&app, "/api/wiki/summary?title=Broken").await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .contains("https://upload.example/broken")
    );
}

#[tokio::test]
async fn test_summary_fetch_failure_is_bad_gateway() {
    let app = spawn_app().await;

    let (status, body) = get(&app, "/api/wiki/summary?title=Unknown").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "Wikipedia service is unavailable");
}

#[tokio::test]
async fn test_empty_query_is_rejected() {
    let app = spawn_app().await;

    let (status, body) = get(&app, "/api/wiki/lookup?q=%20%20").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Search query cannot be empty");

    let (status, _) = get(&app, "/api/wiki/summary?title=Lion%23Taxonomy").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_validate_species() {
    let app = spawn_app().await;

    let (status, body) = post(
        &app,
        "/api/species/validate",
        json!({
            "scientific_name": "  Panthera leo ",
            "common_name": "",
            "kingdom": "Animalia",
            "total_population": 23000,
            "image": "https://upload.example/lion.jpg"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["scientific_name"], "Panthera leo");
    assert_eq!(body["data"]["kingdom"], "Animalia");
    assert!(body["data"]["common_name"].is_null());

    let (status, body) = post(
        &app,
        "/api/species/validate",
        json!({ "scientific_name": "", "kingdom": "Minerals" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error = body["error"].as_str().unwrap();
    assert!(error.contains("scientific_name"));
    assert!(error.contains("kingdom"));
}

#[tokio::test]
async fn test_filter_species() {
    let app = spawn_app().await;

    const ANA: &str = "7f9c2b1e-4d3a-4b8e-9a61-0c5d2e8f1a23";
    const BEA: &str = "0b8e5c4d-2f1a-4c3b-8d7e-6a5f4e3d2c1b";

    let species = |id: i64, scientific: &str, common: &str, author: &str| {
        json!({
            "id": id,
            "scientific_name": scientific,
            "common_name": common,
            "kingdom": "Animalia",
            "total_population": null,
            "image": null,
            "description": null,
            "author": { "id": author, "display_name": "ana" }
        })
    };

    let (status, body) = post(
        &app,
        "/api/species/filter",
        json!({
            "species": [
                species(1, "Felis catus", "Cat", ANA),
                species(2, "Canis lupus", "Wolf", ANA),
                species(3, "Felis silvestris", "Wildcat", BEA),
            ],
            "text": "cat",
            "viewer": ANA,
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["count"], 2);
    assert_eq!(body["data"]["label"], "2 results");

    let result = &body["data"]["results"][0];
    assert_eq!(result["species"]["id"], 1);
    assert_eq!(result["can_edit"], true);
    assert_eq!(body["data"]["results"][1]["species"]["id"], 3);
    assert_eq!(body["data"]["results"][1]["can_edit"], false);
    assert_eq!(
        result["highlights"]["scientific_name"],
        json!([
            { "kind": "plain", "text": "Felis " },
            { "kind": "match", "text": "cat" },
            { "kind": "plain", "text": "us" },
        ])
    );
    assert_eq!(
        result["highlights"]["common_name"],
        json!([{ "kind": "match", "text": "Cat" }])
    );
}

#[tokio::test]
async fn test_filter_without_viewer_marks_nothing_editable() {
    let app = spawn_app().await;

    let (status, body) = post(
        &app,
        "/api/species/filter",
        json!({
            "species": [{
                "id": 1,
                "scientific_name": "Felis catus",
                "common_name": null,
                "kingdom": "Animalia",
                "total_population": null,
                "image": null,
                "description": null,
                "author": { "id": "7f9c2b1e-4d3a-4b8e-9a61-0c5d2e8f1a23", "display_name": "ana" }
            }],
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["count"], 1);
    assert_eq!(body["data"]["results"][0]["can_edit"], false);
}
