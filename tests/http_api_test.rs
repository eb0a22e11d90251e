//! `HttpListApi` against a local actix-web server standing in for the backend.
//!
//! Run with: `cargo test --test http_api_test`
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use std::sync::{Arc, Mutex};

use gradwork_lists::api::{HttpListApi, ListApi, ListKind, PageRequest};
use gradwork_lists::controller::{FetchOutcome, PagedFilteredListController};
use gradwork_lists::error::ApiError;
use gradwork_lists::models::filters::FilterSet;
use gradwork_lists::models::freelancers::Freelancer;
use gradwork_lists::models::teams::Team;
use gradwork_lists::query::build_params;

type Hits = web::Data<Mutex<Vec<String>>>;

const TOTAL_PAGES: u32 = 3;

fn query_page(req: &HttpRequest) -> u32 {
    url::form_urlencoded::parse(req.query_string().as_bytes())
        .find(|(k, _)| k == "page")
        .and_then(|(_, v)| v.parse().ok())
        .unwrap_or(1)
}

/// Serves three pages of two freelancers each.
async fn profiles(req: HttpRequest, hits: Hits) -> HttpResponse {
    hits.lock().unwrap().push(req.query_string().to_string());
    let page = query_page(&req);

    let items: Vec<serde_json::Value> = (0..2)
        .map(|i| {
            serde_json::json!({
                "id": uuid::Uuid::new_v4(),
                "firstName": format!("P{page}"),
                "lastName": format!("N{i}"),
                "skills": ["rust"],
                "statusAviability": "AVAILABLE",
                "createdAt": "2025-02-06T10:00:00Z",
            })
        })
        .collect();

    HttpResponse::Ok().json(serde_json::json!({
        "items": items,
        "meta": {
            "currentPage": page,
            "itemCount": 2,
            "totalItems": 6,
            "itemsPerPage": 12,
            "totalPages": TOTAL_PAGES,
        }
    }))
}

async fn teams(req: HttpRequest, hits: Hits) -> HttpResponse {
    hits.lock().unwrap().push(req.query_string().to_string());
    HttpResponse::Ok().json(serde_json::json!({
        "items": [{ "id": uuid::Uuid::new_v4(), "name": "Core Platform", "membersCount": 4 }],
        "meta": { "currentPage": 1, "totalItems": 1, "itemsPerPage": 12, "totalPages": 1 }
    }))
}

async fn unavailable() -> HttpResponse {
    HttpResponse::ServiceUnavailable().json(serde_json::json!({
        "error": "Failed to fetch profiles: maintenance",
    }))
}

async fn garbage() -> HttpResponse {
    HttpResponse::Ok().body("<html>not json</html>")
}

/// Start the fake backend on a random port and return its `/api` base URL.
async fn spawn_backend(hits: Hits) -> String {
    let server = HttpServer::new(move || {
        App::new()
            .app_data(hits.clone())
            .service(
                web::scope("/api")
                    .route("/profiles", web::get().to(profiles))
                    .route("/teams", web::get().to(teams))
                    .route("/down/profiles", web::get().to(unavailable))
                    .route("/broken/profiles", web::get().to(garbage)),
            )
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .expect("Failed to bind test server");

    let addr = server.addrs()[0];
    actix_web::rt::spawn(server.run());
    format!("http://{addr}/api")
}

fn api(base_url: &str) -> HttpListApi {
    HttpListApi::with_client(reqwest::Client::new(), base_url, "/profiles", "teams/")
        .expect("valid base url")
}

#[actix_web::test]
async fn test_profiles_request_carries_kind_page_limit_and_country_names() {
    let hits: Hits = web::Data::new(Mutex::new(Vec::new()));
    let base = spawn_backend(hits.clone()).await;

    let filters = FilterSet {
        countries: vec!["US".to_string(), "FR".to_string()],
        skills: vec!["rust".to_string()],
        ..FilterSet::default()
    };
    let request = PageRequest::new(
        ListKind::Freelancer,
        1,
        build_params(ListKind::Freelancer, &filters, "en"),
    );

    let page: gradwork_lists::models::Page<Freelancer> =
        api(&base).fetch_page(&request).await.unwrap();

    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[0].first_name, "P1");
    assert_eq!(page.meta.total_pages, TOTAL_PAGES);

    let query = hits.lock().unwrap()[0].clone();
    assert_eq!(
        query,
        "kind=FREELANCER&page=1&limit=12&skills=rust&country=United+States&country=France"
    );
}

#[actix_web::test]
async fn test_team_endpoint_has_no_kind() {
    let hits: Hits = web::Data::new(Mutex::new(Vec::new()));
    let base = spawn_backend(hits.clone()).await;

    let request = PageRequest::new(ListKind::Team, 1, Vec::new());
    let page: gradwork_lists::models::Page<Team> = api(&base).fetch_page(&request).await.unwrap();

    assert_eq!(page.items[0].name, "Core Platform");
    assert_eq!(hits.lock().unwrap()[0], "page=1&limit=12");
}

#[actix_web::test]
async fn test_error_body_becomes_server_error() {
    let hits: Hits = web::Data::new(Mutex::new(Vec::new()));
    let base = spawn_backend(hits).await;

    let request = PageRequest::new(ListKind::Agency, 1, Vec::new());
    let result: Result<gradwork_lists::models::Page<Freelancer>, _> =
        api(&format!("{base}/down")).fetch_page(&request).await;

    match result {
        Err(ApiError::Server { status, message }) => {
            assert_eq!(status, 503);
            assert_eq!(message, "Failed to fetch profiles: maintenance");
        }
        other => panic!("expected server error, got {other:?}"),
    }
}

#[actix_web::test]
async fn test_non_json_body_is_decode_error() {
    let hits: Hits = web::Data::new(Mutex::new(Vec::new()));
    let base = spawn_backend(hits).await;

    let request = PageRequest::new(ListKind::Freelancer, 1, Vec::new());
    let result: Result<gradwork_lists::models::Page<Freelancer>, _> =
        api(&format!("{base}/broken")).fetch_page(&request).await;

    assert!(matches!(result, Err(ApiError::Decode(_))));
}

#[actix_web::test]
async fn test_unreachable_backend_is_network_error() {
    // Port 9 (discard) is not expected to accept HTTP connections locally.
    let request = PageRequest::new(ListKind::Freelancer, 1, Vec::new());
    let result: Result<gradwork_lists::models::Page<Freelancer>, _> =
        api("http://127.0.0.1:9/api").fetch_page(&request).await;

    assert!(matches!(result, Err(ApiError::Network(_))));
}

#[actix_web::test]
async fn test_controller_scrolls_to_the_end_over_http() {
    let hits: Hits = web::Data::new(Mutex::new(Vec::new()));
    let base = spawn_backend(hits.clone()).await;

    let list = PagedFilteredListController::<Freelancer>::new(
        ListKind::Freelancer,
        Arc::new(api(&base)),
        "en",
    );

    list.on_filter_set_changed(FilterSet::default()).await;
    while list.on_sentinel_intersecting().await != FetchOutcome::Skipped {}

    let state = list.state();
    let names: Vec<String> = state.items.iter().map(|f| f.first_name.clone()).collect();
    assert_eq!(names, ["P1", "P1", "P2", "P2", "P3", "P3"]);
    assert!(!state.has_next_page);
    assert_eq!(state.total_items, Some(6));
    assert_eq!(hits.lock().unwrap().len(), 3);
}
