use httpmock::prelude::*;
use serde_json::json;

use super::*;

fn settings(base_url: String) -> SearchSettings {
    SearchSettings {
        api_key: "serp-test".to_string(),
        base_url,
        max_results: 10,
    }
}

#[tokio::test]
async fn search_maps_organic_results() {
    let server = MockServer::start_async().await;

    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/search")
                .query_param("engine", "google")
                .query_param("q", "Paris vegetarian restaurants")
                .query_param("num", "2")
                .query_param("api_key", "serp-test");

            then.status(200).json_body(json!({
                "organic_results": [
                    {"title": "Le Potager", "link": "https://potager.example", "snippet": "Seasonal vegetables"},
                    {"title": "Wild & The Moon", "link": "https://wild.example"},
                    {"title": "Ignored", "link": "https://ignored.example"}
                ]
            }));
        })
        .await;

    let search = SerpApiSearch::new(&settings(server.base_url()), 10).unwrap();
    let hits = search.search("  Paris vegetarian restaurants ", 2).await.unwrap();

    assert_eq!(
        hits,
        vec![
            SearchHit {
                title: "Le Potager".to_string(),
                link: "https://potager.example".to_string(),
                snippet: "Seasonal vegetables".to_string(),
            },
            SearchHit {
                title: "Wild & The Moon".to_string(),
                link: "https://wild.example".to_string(),
                snippet: String::new(),
            },
        ]
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn search_treats_empty_result_error_as_no_hits() {
    let server = MockServer::start_async().await;

    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/search");
            then.status(200).json_body(json!({
                "error": "Google hasn't returned any results for this query."
            }));
        })
        .await;

    let search = SerpApiSearch::new(&settings(server.base_url()), 10).unwrap();
    let hits = search.search("zzqx travel", 5).await.unwrap();

    assert!(hits.is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn search_reports_invalid_key() {
    let server = MockServer::start_async().await;

    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/search");
            then.status(401).json_body(json!({"error": "Invalid API key."}));
        })
        .await;

    let search = SerpApiSearch::new(&settings(server.base_url()), 10).unwrap();
    let err = search.search("Kyoto temples", 5).await.unwrap_err();

    assert!(err.to_string().contains("Invalid SerpAPI key"));
    mock.assert_async().await;
}

#[tokio::test]
async fn search_clamps_result_count() {
    let server = MockServer::start_async().await;

    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/search").query_param("num", "20");
            then.status(200).json_body(json!({"organic_results": []}));
        })
        .await;

    let search = SerpApiSearch::new(&settings(server.base_url()), 10).unwrap();
    search.search("Lisbon trams", 500).await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn search_rejects_blank_query() {
    let search = SerpApiSearch::new(&settings("http://127.0.0.1:9".to_string()), 1).unwrap();
    let err = search.search("   ", 5).await.unwrap_err();
    assert!(err.to_string().contains("cannot be empty"));
}

#[test]
fn format_hits_numbers_and_truncates() {
    let hits = vec![
        SearchHit {
            title: "Louvre".to_string(),
            link: "https://louvre.example".to_string(),
            snippet: "x".repeat(250),
        },
        SearchHit {
            title: "Orsay".to_string(),
            link: "https://orsay.example".to_string(),
            snippet: "Impressionists".to_string(),
        },
    ];

    let rendered = format_hits(&hits);
    assert!(rendered.starts_with("1. Louvre\n   https://louvre.example\n"));
    assert!(rendered.contains(&format!("{}...", "x".repeat(200))));
    assert!(!rendered.contains(&"x".repeat(201)));
    assert!(rendered.contains("2. Orsay\n   https://orsay.example\n   Impressionists"));
}

#[test]
fn format_hits_handles_empty() {
    assert_eq!(format_hits(&[]), "No results found");
}
