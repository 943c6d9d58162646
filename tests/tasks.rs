use actix_cors::Cors;
use actix_web::http::StatusCode;
use actix_web::middleware::Logger;
use actix_web::{rt, test, web, App, HttpServer};
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::json;
use sqlx::SqlitePool;
use std::net::TcpListener;
use taskvault::auth::TokenPair;
use taskvault::config::{AuthConfig, Config};
use taskvault::db;
use taskvault::routes::{self, health};

fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        server_port: 0,
        server_host: "127.0.0.1".to_string(),
        auth: AuthConfig {
            secret_key: "test-secret".to_string(),
            access_token_expire_minutes: 30,
            refresh_token_expire_days: 7,
        },
    }
}

async fn setup() -> (SqlitePool, Config) {
    let config = test_config();
    let pool = db::connect(&config.database_url)
        .await
        .expect("Failed to connect to test DB");
    (pool, config)
}

macro_rules! test_app {
    ($pool:expr, $config:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($pool.clone()))
                .app_data(web::Data::new($config.clone()))
                .wrap(
                    Cors::default()
                        .allow_any_origin()
                        .allow_any_method()
                        .allow_any_header()
                        .max_age(3600),
                )
                .wrap(Logger::default())
                .service(health::health)
                .service(web::scope("/api").configure(routes::config)),
        )
        .await
    };
}

async fn register_and_login<S, B>(app: &S, username: &str, email: &str) -> String
where
    S: actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse<B>,
        Error = actix_web::Error,
    >,
    B: actix_web::body::MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({ "username": username, "email": email, "password": "pass123" }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED, "failed to register {}", username);

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "username": username, "password": "pass123" }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), StatusCode::OK, "failed to log in {}", username);

    let pair: TokenPair = test::read_body_json(resp).await;
    pair.access_token
}

fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}

#[actix_rt::test]
async fn test_task_crud_flow() {
    let (_pool, config) = setup().await;
    let app = test_app!(_pool, config);
    let token = register_and_login(&app, "alice", "alice@example.com").await;

    // A whole-second instant survives the storage round trip exactly.
    let due_date: DateTime<Utc> = Utc
        .timestamp_opt(Utc::now().timestamp() + 3600, 0)
        .unwrap();

    let req = test::TestRequest::post()
        .uri("/api/tasks")
        .insert_header(bearer(&token))
        .set_json(json!({ "title": "Buy milk", "priority": "high", "due_date": due_date }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let task: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(task["status"], "ongoing");
    assert_eq!(task["priority"], "high");
    let task_id = task["id"].as_str().unwrap().to_string();

    // Priority defaults to low when omitted
    let req = test::TestRequest::post()
        .uri("/api/tasks")
        .insert_header(bearer(&token))
        .set_json(json!({ "title": "Water plants" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let defaulted: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(defaulted["priority"], "low");
    assert_eq!(defaulted["status"], "ongoing");

    // Read back: the due date comes out as the same instant
    let req = test::TestRequest::get()
        .uri(&format!("/api/tasks/{}", task_id))
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: serde_json::Value = test::read_body_json(resp).await;
    let fetched_due: DateTime<Utc> = fetched["due_date"].as_str().unwrap().parse().unwrap();
    assert_eq!(fetched_due, due_date);

    // Partial update only touches the provided fields
    let req = test::TestRequest::patch()
        .uri(&format!("/api/tasks/{}", task_id))
        .insert_header(bearer(&token))
        .set_json(json!({ "status": "completed" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(updated["status"], "completed");
    assert_eq!(updated["title"], "Buy milk");
    assert_eq!(updated["priority"], "high");
    assert_eq!(updated["created_at"], fetched["created_at"]);
    assert_ne!(updated["updated_at"], fetched["updated_at"]);

    // Delete, then the task is gone
    let req = test::TestRequest::delete()
        .uri(&format!("/api/tasks/{}", task_id))
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["detail"], "Task deleted");

    let req = test::TestRequest::get()
        .uri(&format!("/api/tasks/{}", task_id))
        .insert_header(bearer(&token))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[actix_rt::test]
async fn test_task_validation() {
    let (_pool, config) = setup().await;
    let app = test_app!(_pool, config);
    let token = register_and_login(&app, "alice", "alice@example.com").await;

    let invalid_payloads = [
        // Title too short after trimming
        json!({ "title": "  ab  " }),
        // Title too long
        json!({ "title": "a".repeat(31) }),
        // Description too long
        json!({ "title": "Valid title", "description": "d".repeat(201) }),
        // Due date in the past
        json!({ "title": "Valid title", "due_date": Utc::now() - Duration::hours(1) }),
    ];

    for payload in invalid_payloads {
        let req = test::TestRequest::post()
            .uri("/api/tasks")
            .insert_header(bearer(&token))
            .set_json(&payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(
            resp.status(),
            StatusCode::BAD_REQUEST,
            "payload should have been rejected: {}",
            payload
        );
    }

    // An unknown priority value is rejected at deserialization
    let req = test::TestRequest::post()
        .uri("/api/tasks")
        .insert_header(bearer(&token))
        .set_json(json!({ "title": "Valid title", "priority": "urgent" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_client_error());
}

#[actix_rt::test]
async fn test_ownership_isolation() {
    let (_pool, config) = setup().await;
    let app = test_app!(_pool, config);
    let alice = register_and_login(&app, "alice", "alice@example.com").await;
    let bob = register_and_login(&app, "bob", "bob@example.com").await;

    let req = test::TestRequest::post()
        .uri("/api/tasks")
        .insert_header(bearer(&alice))
        .set_json(json!({ "title": "Buy milk", "priority": "high" }))
        .to_request();
    let task: serde_json::Value = test::read_body_json(test::call_service(&app, req).await).await;
    let task_id = task["id"].as_str().unwrap().to_string();

    // Alice sees her task in her list; bob's list is empty
    let req = test::TestRequest::get()
        .uri("/api/tasks")
        .insert_header(bearer(&alice))
        .to_request();
    let alice_tasks: Vec<serde_json::Value> =
        test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(alice_tasks.len(), 1);
    assert_eq!(alice_tasks[0]["title"], "Buy milk");

    let req = test::TestRequest::get()
        .uri("/api/tasks")
        .insert_header(bearer(&bob))
        .to_request();
    let bob_tasks: Vec<serde_json::Value> =
        test::read_body_json(test::call_service(&app, req).await).await;
    assert!(bob_tasks.is_empty());

    // Another owner's task always reads as 404, for every verb
    let req = test::TestRequest::get()
        .uri(&format!("/api/tasks/{}", task_id))
        .insert_header(bearer(&bob))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );

    let req = test::TestRequest::patch()
        .uri(&format!("/api/tasks/{}", task_id))
        .insert_header(bearer(&bob))
        .set_json(json!({ "status": "completed" }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );

    let req = test::TestRequest::delete()
        .uri(&format!("/api/tasks/{}", task_id))
        .insert_header(bearer(&bob))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );

    // The task is untouched for its owner
    let req = test::TestRequest::get()
        .uri(&format!("/api/tasks/{}", task_id))
        .insert_header(bearer(&alice))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn test_pagination_windows() {
    let (_pool, config) = setup().await;
    let app = test_app!(_pool, config);
    let token = register_and_login(&app, "alice", "alice@example.com").await;

    for i in 1..=15 {
        let req = test::TestRequest::post()
            .uri("/api/tasks")
            .insert_header(bearer(&token))
            .set_json(json!({ "title": format!("Task number {:02}", i) }))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::CREATED
        );
    }

    // Default page/limit: the first ten, newest first
    let req = test::TestRequest::get()
        .uri("/api/tasks")
        .insert_header(bearer(&token))
        .to_request();
    let page_one: Vec<serde_json::Value> =
        test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(page_one.len(), 10);
    assert_eq!(page_one[0]["title"], "Task number 15");

    // Page 2 holds the remaining five
    let req = test::TestRequest::get()
        .uri("/api/tasks?page=2&limit=10")
        .insert_header(bearer(&token))
        .to_request();
    let page_two: Vec<serde_json::Value> =
        test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(page_two.len(), 5);
    assert_eq!(page_two[4]["title"], "Task number 01");

    // Ascending creation order flips the windows
    let req = test::TestRequest::get()
        .uri("/api/tasks?page=1&limit=10&sort_by=created_at&order=asc")
        .insert_header(bearer(&token))
        .to_request();
    let ascending: Vec<serde_json::Value> =
        test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(ascending[0]["title"], "Task number 01");

    // A short page: limit larger than what is left
    let req = test::TestRequest::get()
        .uri("/api/tasks?page=1&limit=20")
        .insert_header(bearer(&token))
        .to_request();
    let all: Vec<serde_json::Value> =
        test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(all.len(), 15);
}

#[actix_rt::test]
async fn test_priority_sorts_by_ordinal() {
    let (_pool, config) = setup().await;
    let app = test_app!(_pool, config);
    let token = register_and_login(&app, "alice", "alice@example.com").await;

    // Lexicographically "high" < "low" < "medium"; the ordinal order differs.
    for (title, priority) in [
        ("Medium task", "medium"),
        ("High task", "high"),
        ("Low task", "low"),
    ] {
        let req = test::TestRequest::post()
            .uri("/api/tasks")
            .insert_header(bearer(&token))
            .set_json(json!({ "title": title, "priority": priority }))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::CREATED
        );
    }

    let req = test::TestRequest::get()
        .uri("/api/tasks?sort_by=priority&order=asc")
        .insert_header(bearer(&token))
        .to_request();
    let ascending: Vec<serde_json::Value> =
        test::read_body_json(test::call_service(&app, req).await).await;
    let priorities: Vec<&str> = ascending
        .iter()
        .map(|task| task["priority"].as_str().unwrap())
        .collect();
    assert_eq!(priorities, ["low", "medium", "high"]);

    let req = test::TestRequest::get()
        .uri("/api/tasks?sort_by=priority&order=desc")
        .insert_header(bearer(&token))
        .to_request();
    let descending: Vec<serde_json::Value> =
        test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(descending[0]["priority"], "high");
}

#[actix_rt::test]
async fn test_create_task_unauthorized() {
    let (pool, config) = setup().await;

    // Find an available port
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener); // Drop the listener so the server can bind to it

    let server_pool = pool.clone();
    let server_config = config.clone();
    let _server_handle = rt::spawn(async move {
        HttpServer::new(move || {
            App::new()
                .app_data(web::Data::new(server_pool.clone()))
                .app_data(web::Data::new(server_config.clone()))
                .wrap(
                    Cors::default()
                        .allow_any_origin()
                        .allow_any_method()
                        .allow_any_header()
                        .max_age(3600),
                )
                .wrap(Logger::default())
                .service(health::health)
                .service(web::scope("/api").configure(routes::config))
        })
        .bind(("127.0.0.1", port))
        .unwrap_or_else(|_| panic!("Failed to bind to port {}", port))
        .run()
        .await
    });

    // Give the server a moment to start
    tokio::time::sleep(tokio::time::Duration::from_millis(200)).await;

    let client = reqwest::Client::new();
    let request_url = format!("http://127.0.0.1:{}/api/tasks", port);

    let resp = client
        .post(&request_url)
        .json(&json!({ "title": "Unauthorized Task" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(resp.status(), reqwest::StatusCode::UNAUTHORIZED);

    // A garbled bearer token is rejected the same way
    let resp = client
        .post(&request_url)
        .bearer_auth("not-a-real-token")
        .json(&json!({ "title": "Unauthorized Task" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(resp.status(), reqwest::StatusCode::UNAUTHORIZED);

    // The health endpoint stays open
    let resp = client
        .get(format!("http://127.0.0.1:{}/health", port))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
}
