use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use serde_json::{Value, json};

use blog_be::AppState;
use blog_be::dtos::post_dtos::{PostDTO, PostResponse};
use blog_be::repositories::InMemoryPostRepository;

fn state() -> web::Data<AppState> {
    web::Data::new(AppState::new(Arc::new(InMemoryPostRepository::new())))
}

fn post_body(title: &str) -> Value {
    json!({
        "title": title,
        "description": "A description that is long enough",
        "content": "Body text",
    })
}

macro_rules! app {
    ($state:expr) => {
        test::init_service(App::new().app_data($state.clone()).configure(blog_be::configure)).await
    };
}

#[actix_web::test]
async fn full_post_lifecycle() {
    let state = state();
    let app = app!(state);

    // create
    let req = test::TestRequest::post()
        .uri("/api/posts")
        .set_json(json!({"title": "A", "description": "B", "content": "C"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: PostDTO = test::read_body_json(resp).await;
    let id = created.id.expect("generated id");
    assert_eq!(created.title, "A");

    // list
    let req = test::TestRequest::get()
        .uri("/api/posts?pageNo=0&pageSize=10&sortBy=id")
        .to_request();
    let page: PostResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(page.total_elements, 1);
    assert_eq!(page.total_pages, 1);
    assert!(page.last);
    assert_eq!(page.content, vec![created.clone()]);

    // update
    let req = test::TestRequest::put()
        .uri(&format!("/api/posts/{id}"))
        .set_json(json!({"title": "A2", "description": "B", "content": "C"}))
        .to_request();
    let updated: PostDTO = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated.id, Some(id));
    assert_eq!(updated.title, "A2");
    assert_eq!(updated.description, created.description);

    // delete
    let req = test::TestRequest::delete()
        .uri(&format!("/api/posts/{id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(test::read_body(resp).await, "Post entity deleted successfully.");

    // gone
    let req = test::TestRequest::get()
        .uri(&format!("/api/posts/{id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = test::read_body(resp).await;
    assert_eq!(body, format!("Post not found with id : '{id}'").as_bytes());
}

#[actix_web::test]
async fn create_ignores_client_supplied_id() {
    let state = state();
    let app = app!(state);

    let mut body = post_body("With id");
    body["id"] = json!(99);
    let req = test::TestRequest::post().uri("/api/posts").set_json(body).to_request();
    let created: PostDTO = test::call_and_read_body_json(&app, req).await;
    assert_eq!(created.id, Some(1));
}

#[actix_web::test]
async fn ids_are_distinct() {
    let state = state();
    let app = app!(state);

    let mut ids = Vec::new();
    for title in ["one", "two", "three"] {
        let req = test::TestRequest::post()
            .uri("/api/posts")
            .set_json(post_body(title))
            .to_request();
        let created: PostDTO = test::call_and_read_body_json(&app, req).await;
        ids.push(created.id.unwrap());
    }
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 3);
}

#[actix_web::test]
async fn duplicate_title_is_rejected_with_value() {
    let state = state();
    let app = app!(state);

    for expected in [StatusCode::CREATED, StatusCode::BAD_REQUEST] {
        let req = test::TestRequest::post()
            .uri("/api/posts")
            .set_json(post_body("Same title"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), expected);
        if expected == StatusCode::BAD_REQUEST {
            let body = test::read_body(resp).await;
            assert_eq!(
                body,
                "The value 'Same title' already exists. Please try another value."
            );
        }
    }
}

#[actix_web::test]
async fn validation_errors_are_grouped_by_field() {
    let state = state();
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .set_json(json!({"title": "", "description": "", "content": ""}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    let keys: Vec<_> = body.as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys, ["content", "description", "title"]);
    assert_eq!(body["title"], json!(["Post title should not be empty"]));
    assert_eq!(body["description"], json!(["Post description should not be empty"]));
    assert_eq!(body["content"], json!(["Post content should not be empty"]));
}

#[actix_web::test]
async fn non_numeric_id_is_a_type_mismatch() {
    let state = state();
    let app = app!(state);

    let req = test::TestRequest::get().uri("/api/posts/abc").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(test::read_body(resp).await, "Failed to find input for: 'abc'");

    let req = test::TestRequest::get().uri("/api/posts?pageSize=lots").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(test::read_body(resp).await, "Failed to find input for: 'lots'");
}

#[actix_web::test]
async fn update_and_delete_of_missing_post_are_not_found() {
    let state = state();
    let app = app!(state);

    let req = test::TestRequest::put()
        .uri("/api/posts/41")
        .set_json(post_body("Nobody"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::delete().uri("/api/posts/41").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn unknown_sort_field_is_a_server_error() {
    let state = state();
    let app = app!(state);

    let req = test::TestRequest::get().uri("/api/posts?sortBy=author").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[actix_web::test]
async fn paging_metadata_across_pages() {
    let state = state();
    let app = app!(state);

    for i in 0..5 {
        let req = test::TestRequest::post()
            .uri("/api/posts")
            .set_json(post_body(&format!("post {i}")))
            .to_request();
        test::call_service(&app, req).await;
    }

    let req = test::TestRequest::get().uri("/api/posts?pageNo=0&pageSize=2").to_request();
    let first: PostResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(first.content.len(), 2);
    assert_eq!(first.total_pages, 3);
    assert!(!first.last);

    let req = test::TestRequest::get().uri("/api/posts?pageNo=2&pageSize=2").to_request();
    let last: PostResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(last.content.len(), 1);
    assert_eq!(last.page_no, 2);
    assert!(last.last);
}

#[actix_web::test]
async fn malformed_json_is_a_bad_request() {
    let state = state();
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[derive(Default)]
struct CaptureLog(std::sync::Mutex<Vec<String>>);

impl log::Log for CaptureLog {
    fn enabled(&self, _: &log::Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &log::Record<'_>) {
        self.0.lock().unwrap().push(record.args().to_string());
    }

    fn flush(&self) {}
}

#[actix_web::test]
async fn type_mismatch_is_logged_at_the_boundary() {
    use blog_be::logging::Logger;

    let http_log = Arc::new(CaptureLog::default());
    let state = web::Data::new(AppState::with_loggers(
        Arc::new(InMemoryPostRepository::new()),
        Logger::process("blog_be::services::post"),
        Logger::new("blog_be::http", http_log.clone()),
    ));
    let app = app!(state);

    let req = test::TestRequest::delete().uri("/api/posts/x1").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        *http_log.0.lock().unwrap(),
        ["Failed to convert x1 to ID".to_string()]
    );
}

#[actix_web::test]
async fn missing_fields_are_reported_in_the_validation_map() {
    let state = state();
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .set_json(json!({"title": "A"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    let keys: Vec<_> = body.as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys, ["content", "description"]);
    assert_eq!(body["content"], json!(["Post content should not be empty"]));
    assert_eq!(body["description"], json!(["Post description should not be empty"]));
}

#[actix_web::test]
async fn page_number_beyond_int_range_is_a_type_mismatch() {
    let state = state();
    let app = app!(state);

    let req = test::TestRequest::get()
        .uri("/api/posts?pageNo=5000000000")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(test::read_body(resp).await, "Failed to find input for: '5000000000'");
}
