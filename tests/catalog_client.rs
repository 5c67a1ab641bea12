use openlibrary_dashboard::catalog::{CatalogClient, CatalogError, SEARCH_LIMIT};
use openlibrary_dashboard::normalize::{normalize_all, normalize_work};
use openlibrary_dashboard::stats::{apply_filter, bucket_by_decade, compute_stats};
use openlibrary_dashboard::AuthorFilter;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fantasy_docs() -> serde_json::Value {
    let years = [
        1985, 1987, 1990, 1993, 1996, 2000, 2004, 2008, 2011, 2015, 2019, 2021,
    ];
    let docs: Vec<serde_json::Value> = (0..50)
        .map(|n| {
            json!({
                "key": format!("/works/OL{}W", 1000 + n),
                "title": format!("Fantasy {n}"),
                "author_name": [format!("Author {}", n % 7)],
                "first_publish_year": years[n % years.len()],
                "subject": ["Fantasy fiction"]
            })
        })
        .collect();
    json!({ "numFound": 50, "docs": docs })
}

#[tokio::test]
async fn search_sends_query_and_limit() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search.json"))
        .and(query_param("q", "space opera"))
        .and(query_param("limit", SEARCH_LIMIT.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "docs": [] })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = CatalogClient::new(mock_server.uri()).unwrap();
    let docs = client.search_books("space opera").await.unwrap();
    assert!(docs.is_empty());
}

#[tokio::test]
async fn fantasy_scenario_produces_expected_stats() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search.json"))
        .and(query_param("q", "fantasy"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fantasy_docs()))
        .mount(&mock_server)
        .await;

    let client = CatalogClient::new(mock_server.uri()).unwrap();
    let books = normalize_all(client.search_books("fantasy").await.unwrap());
    assert_eq!(books.len(), 50);

    let filtered = apply_filter(&books, &AuthorFilter::All);
    let stats = compute_stats(&filtered);
    assert_eq!(stats.total, 50);
    let span = stats.years.unwrap();
    assert_eq!(span.earliest, 1985);
    assert_eq!(span.latest, 2021);

    let decades: Vec<i32> = bucket_by_decade(&filtered)
        .iter()
        .map(|bucket| bucket.decade)
        .collect();
    assert_eq!(decades.first(), Some(&1980));
    assert_eq!(decades.last(), Some(&2020));
}

#[tokio::test]
async fn missing_docs_field_yields_empty_list() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "numFound": 0 })))
        .mount(&mock_server)
        .await;

    let client = CatalogClient::new(mock_server.uri()).unwrap();
    assert!(client.search_books("nothing").await.unwrap().is_empty());
}

#[tokio::test]
async fn server_error_maps_to_http_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search.json"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let client = CatalogClient::new(mock_server.uri()).unwrap();
    let err = client.search_books("fantasy").await.unwrap_err();
    assert!(matches!(err, CatalogError::Http { status: 500 }));
    assert_eq!(err.user_message(), "HTTP 500");
}

#[tokio::test]
async fn malformed_body_maps_to_parse_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/works/OL1W.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&mock_server)
        .await;

    let client = CatalogClient::new(mock_server.uri()).unwrap();
    let err = client.get_work_detail("OL1W").await.unwrap_err();
    assert!(matches!(err, CatalogError::Parse(_)));
}

#[tokio::test]
async fn work_detail_unwraps_object_description() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/works/OL82563W.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "title": "Harry Potter and the Philosopher's Stone",
            "description": { "type": "/type/text", "value": "A boy learns he is a wizard." },
            "subjects": ["Magic", "Schools"],
            "excerpts": [{ "excerpt": "Mr. and Mrs. Dursley, of number four, Privet Drive..." }]
        })))
        .mount(&mock_server)
        .await;

    let client = CatalogClient::new(mock_server.uri()).unwrap();
    let work = normalize_work(client.get_work_detail("OL82563W").await.unwrap());

    assert_eq!(work.display_title(), "Harry Potter and the Philosopher's Stone");
    assert_eq!(work.display_description(), "A boy learns he is a wizard.");
    assert_eq!(work.subjects.len(), 2);
    assert_eq!(work.excerpts.len(), 1);
}

#[tokio::test]
async fn missing_work_maps_to_http_404() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/works/OL0W.json"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let client = CatalogClient::new(mock_server.uri()).unwrap();
    let err = client.get_work_detail("OL0W").await.unwrap_err();
    assert_eq!(err.user_message(), "HTTP 404");
}
