//! HTTP endpoint tests
//!
//! Every test drives the real router on the in-memory backend, authenticating
//! with tokens signed by the same secret the router verifies with.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};
use tower::ServiceExt;

use studyshare::{
    api::{create_router, middleware::auth::Claims},
    application::ports::ResourceRepository,
    domain::entities::{Counters, Engagement, Resource, ResourceDetails, UserProfile},
    domain::value_objects::{ResourceId, ResourceKind, ResourceStatus, UserId},
    infrastructure::persistence::{InMemoryResourceRepository, InMemoryUserRepository},
    ApplicationBuilder, Config,
};

const SECRET: &str = "endpoint-test-secret-0123456789";

struct TestApp {
    router: Router,
    resources: Arc<InMemoryResourceRepository>,
    users: Arc<InMemoryUserRepository>,
}

fn setup() -> TestApp {
    let resources = Arc::new(InMemoryResourceRepository::new());
    let users = Arc::new(InMemoryUserRepository::new());

    let state = ApplicationBuilder::new(Config::in_memory(SECRET))
        .with_repositories(resources.clone(), users.clone())
        .build()
        .unwrap();

    TestApp {
        router: create_router(state),
        resources,
        users,
    }
}

fn uid(id: &str) -> UserId {
    UserId::new(id).unwrap()
}

fn token_for(user_id: &str, role: Option<&str>) -> String {
    let claims = Claims {
        user_id: user_id.to_string(),
        name: Some(format!("Student {user_id}")),
        role: role.map(str::to_string),
        exp: (Utc::now().timestamp() + 3600) as usize,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap()
}

fn details(title: &str) -> ResourceDetails {
    ResourceDetails {
        title: title.to_string(),
        description: "Scanned notes".to_string(),
        course: "B.Tech".to_string(),
        branch: "CSE".to_string(),
        year: "2".to_string(),
        semester: "3".to_string(),
        subject: "Data Structures".to_string(),
        unit: Some("Unit 1".to_string()),
        exam_year: None,
        drive_link: "https://drive.example.com/file/ds".to_string(),
    }
}

/// Resource with `likes=5, dislikes=2` and `u2` disliking it
async fn seed_resource(app: &TestApp, status: ResourceStatus, age_minutes: i64) -> ResourceId {
    let engagement = Engagement::from_membership(
        Counters {
            likes: 5,
            dislikes: 2,
            downloads: 0,
            flags: 0,
        },
        vec![],
        vec![uid("u2")],
        vec![],
        vec![],
    );
    let created_at = Utc::now() - Duration::minutes(age_minutes);
    let resource = Resource::reconstruct(
        ResourceId::new(),
        ResourceKind::Notes,
        details(&format!("Notes {age_minutes}")),
        status,
        "Uploader".to_string(),
        uid("owner"),
        engagement,
        created_at,
        created_at,
    );
    let id = *resource.id();
    app.resources.insert(&resource).await.unwrap();
    id
}

fn request(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }

    match body {
        Some(data) => builder
            .header("content-type", "application/json")
            .body(Body::from(data.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(app: &TestApp, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.router.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

async fn interact(app: &TestApp, user: &str, body: Value) -> (StatusCode, Value) {
    let token = token_for(user, None);
    send(
        app,
        request(Method::POST, "/api/resource-interactions", Some(&token), Some(body)),
    )
    .await
}

#[tokio::test]
async fn test_health_endpoints() {
    let app = setup();

    let (status, json) = send(&app, request(Method::GET, "/health", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");

    let (status, json) = send(&app, request(Method::GET, "/health/ready", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["database"], "in-memory");
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = setup();

    let (status, json) = send(&app, request(Method::GET, "/api-docs/openapi.json", None, None)).await;

    assert_eq!(status, StatusCode::OK);
    assert!(json["paths"]
        .as_object()
        .unwrap()
        .contains_key("/api/resource-interactions"));
}

#[tokio::test]
async fn test_interaction_requires_authentication() {
    let app = setup();
    let id = seed_resource(&app, ResourceStatus::Approved, 0).await;
    let body = json!({ "resourceId": id.to_string(), "action": "like" });

    let (status, json) = send(
        &app,
        request(Method::POST, "/api/resource-interactions", None, Some(body.clone())),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Unauthorized");

    let (status, _) = send(
        &app,
        request(
            Method::POST,
            "/api/resource-interactions",
            Some("not-a-jwt"),
            Some(body),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_like_switches_counters() {
    let app = setup();
    let id = seed_resource(&app, ResourceStatus::Approved, 0).await;

    let (status, json) = interact(
        &app,
        "u1",
        json!({ "resourceId": id.to_string(), "action": "like", "value": true }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["resource"]["likes"], 6);
    assert_eq!(json["resource"]["dislikes"], 2);
    assert_eq!(json["resource"]["userLiked"], true);
    assert_eq!(json["resource"]["userDisliked"], false);

    // u2 switches from dislike to like
    let (_, json) = interact(&app, "u2", json!({ "resourceId": id.to_string(), "action": "like" })).await;
    assert_eq!(json["resource"]["likes"], 7);
    assert_eq!(json["resource"]["dislikes"], 1);
    assert_eq!(json["resource"]["userLiked"], true);
    assert_eq!(json["resource"]["userDisliked"], false);
}

#[tokio::test]
async fn test_retracting_dislike() {
    let app = setup();
    let id = seed_resource(&app, ResourceStatus::Approved, 0).await;

    let (status, json) = interact(
        &app,
        "u2",
        json!({ "resourceId": id.to_string(), "action": "dislike", "value": false }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["resource"]["dislikes"], 1);
    assert_eq!(json["resource"]["userDisliked"], false);
}

#[tokio::test]
async fn test_repeated_like_is_idempotent() {
    let app = setup();
    let id = seed_resource(&app, ResourceStatus::Approved, 0).await;
    let body = json!({ "resourceId": id.to_string(), "action": "like", "value": true });

    interact(&app, "u1", body.clone()).await;
    let (_, json) = interact(&app, "u1", body).await;

    assert_eq!(json["resource"]["likes"], 6);
}

#[tokio::test]
async fn test_flag_cannot_be_retracted() {
    let app = setup();
    let id = seed_resource(&app, ResourceStatus::Approved, 0).await;

    let (_, json) = interact(&app, "u1", json!({ "resourceId": id.to_string(), "action": "flag" })).await;
    assert_eq!(json["resource"]["flags"], 1);
    assert_eq!(json["resource"]["userFlagged"], true);

    let (_, json) = interact(&app, "u1", json!({ "resourceId": id.to_string(), "action": "flag" })).await;
    assert_eq!(json["resource"]["flags"], 1);

    let (status, json) = interact(
        &app,
        "u1",
        json!({ "resourceId": id.to_string(), "action": "flag", "value": false }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["resource"]["flags"], 1);
    assert_eq!(json["resource"]["userFlagged"], true);
}

#[tokio::test]
async fn test_downloads_always_increment() {
    let app = setup();
    let id = seed_resource(&app, ResourceStatus::Approved, 0).await;

    interact(&app, "u1", json!({ "resourceId": id.to_string(), "action": "download" })).await;
    let (_, json) = interact(
        &app,
        "u1",
        json!({ "resourceId": id.to_string(), "action": "download", "value": false }),
    )
    .await;

    assert_eq!(json["resource"]["downloads"], 2);
}

#[tokio::test]
async fn test_invalid_requests_leave_state_untouched() {
    let app = setup();
    let id = seed_resource(&app, ResourceStatus::Approved, 0).await;

    let (status, json) = interact(&app, "u3", json!({ "resourceId": id.to_string(), "action": "bogus" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);

    let (status, json) = interact(&app, "u3", json!({ "resourceId": id.to_string() })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Action required");

    let (status, json) = interact(&app, "u3", json!({ "action": "like" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Resource ID required");

    let (status, _) = interact(&app, "u3", json!({ "resourceId": "nope", "action": "like" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let stored = app.resources.find_by_id(&id).await.unwrap().unwrap();
    assert_eq!(stored.engagement().counters().likes, 5);
    assert_eq!(stored.engagement().counters().dislikes, 2);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = setup();
    let token = token_for("u1", None);

    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/resource-interactions")
        .header("authorization", format!("Bearer {}", token))
        .header("content-type", "application/json")
        .body(Body::from("{ not json"))
        .unwrap();
    let (status, json) = send(&app, req).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn test_unknown_resource_is_not_found() {
    let app = setup();

    let (status, json) = interact(
        &app,
        "u1",
        json!({ "resourceId": ResourceId::new().to_string(), "action": "like" }),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn test_saved_view_round_trip() {
    let app = setup();
    let older = seed_resource(&app, ResourceStatus::Approved, 30).await;
    let newer = seed_resource(&app, ResourceStatus::Approved, 5).await;
    let pending = seed_resource(&app, ResourceStatus::Pending, 1).await;
    let token = token_for("u1", None);

    for id in [older, newer, pending] {
        let (status, json) =
            interact(&app, "u1", json!({ "resourceId": id.to_string(), "action": "save" })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["resource"]["userSaved"], true);
    }

    let (status, json) = send(
        &app,
        request(Method::GET, "/api/resources/saved", Some(&token), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let saved = json["resources"].as_array().unwrap();
    let ids: Vec<&str> = saved.iter().map(|r| r["id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec![newer.to_string(), older.to_string()]);
    assert!(saved.iter().all(|r| r["userSaved"] == true));

    interact(
        &app,
        "u1",
        json!({ "resourceId": newer.to_string(), "action": "save", "value": false }),
    )
    .await;
    let (_, json) = send(
        &app,
        request(Method::GET, "/api/resources/saved", Some(&token), None),
    )
    .await;
    assert_eq!(json["resources"].as_array().unwrap().len(), 1);

    // Another user's saved view is independent
    let (_, json) = send(
        &app,
        request(Method::GET, "/api/resources/saved", Some(&token_for("u9", None)), None),
    )
    .await;
    assert!(json["resources"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_saved_view_requires_authentication() {
    let app = setup();

    let (status, _) = send(&app, request(Method::GET, "/api/resources/saved", None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_catalogue_flags_depend_on_viewer() {
    let app = setup();
    let id = seed_resource(&app, ResourceStatus::Approved, 0).await;
    seed_resource(&app, ResourceStatus::Pending, 0).await;

    let (_, anonymous) = send(&app, request(Method::GET, "/api/resources", None, None)).await;
    let listed = anonymous["resources"].as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["userDisliked"], false);

    let (_, as_u2) = send(
        &app,
        request(Method::GET, "/api/resources", Some(&token_for("u2", None)), None),
    )
    .await;
    assert_eq!(as_u2["resources"][0]["userDisliked"], true);

    let (status, detail) = send(
        &app,
        request(Method::GET, &format!("/api/resources/{}", id), None, None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["likes"], 5);
}

#[tokio::test]
async fn test_catalogue_filters() {
    let app = setup();
    seed_resource(&app, ResourceStatus::Approved, 0).await;

    let (_, json) = send(
        &app,
        request(Method::GET, "/api/resources?branch=CSE&year=2nd%20Year&unit=unit%201", None, None),
    )
    .await;
    assert_eq!(json["resources"].as_array().unwrap().len(), 1);

    let (_, json) = send(
        &app,
        request(Method::GET, "/api/resources?type=pyq", None, None),
    )
    .await;
    assert!(json["resources"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_upload_flow_and_leaderboard() {
    let app = setup();
    app.users.upsert(UserProfile {
        is_trusted: true,
        ..UserProfile::new(uid("trusted"), Some("Trusted Tara".to_string()))
    });
    app.users.upsert(UserProfile::new(uid("newbie"), Some("New Nia".to_string())));

    let body = json!({
        "title": "Compiler design notes",
        "branch": "CSE",
        "subject": "Compilers",
        "resourceType": "notes",
        "driveLink": "https://drive.example.com/file/cd"
    });

    let (status, json) = send(
        &app,
        request(Method::POST, "/api/resources", Some(&token_for("trusted", None)), Some(body.clone())),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["message"], "Resource uploaded successfully");
    assert_eq!(json["resource"]["status"], "approved");
    assert_eq!(json["resource"]["course"], "B.Tech");

    let (status, json) = send(
        &app,
        request(Method::POST, "/api/resources", Some(&token_for("newbie", None)), Some(body)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["resource"]["status"], "pending");

    // Pending uploads are only visible to their uploader
    let (_, catalogue) = send(&app, request(Method::GET, "/api/resources", None, None)).await;
    assert_eq!(catalogue["resources"].as_array().unwrap().len(), 1);

    let (_, uploads) = send(
        &app,
        request(Method::GET, "/api/profile/uploads", Some(&token_for("newbie", None)), None),
    )
    .await;
    assert_eq!(uploads["uploads"].as_array().unwrap().len(), 1);

    let (status, board) = send(&app, request(Method::GET, "/api/leaderboard", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    let entries = board["leaderboard"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["rank"], 1);
    assert!(entries.iter().all(|e| e["points"] == 10));
    let trusted = entries.iter().find(|e| e["name"] == "Trusted Tara").unwrap();
    assert_eq!(trusted["uploads"], 1);
    let newbie = entries.iter().find(|e| e["name"] == "New Nia").unwrap();
    assert_eq!(newbie["uploads"], 0);
    assert_eq!(newbie["avatar"], "boy1");
}

#[tokio::test]
async fn test_upload_validation_and_standing() {
    let app = setup();
    app.users.upsert(UserProfile {
        is_banned: true,
        ..UserProfile::new(uid("banned"), None)
    });
    app.users.upsert(UserProfile {
        is_trusted: true,
        ..UserProfile::new(uid("trusted"), None)
    });

    let pyq = json!({
        "title": "2023 end-sem",
        "branch": "CSE",
        "subject": "DBMS",
        "resourceType": "pyq",
        "driveLink": "https://drive.example.com/file/pyq"
    });

    let (status, _) = send(
        &app,
        request(Method::POST, "/api/resources", Some(&token_for("trusted", None)), Some(pyq.clone())),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, json) = send(
        &app,
        request(Method::POST, "/api/resources", Some(&token_for("banned", None)), Some(pyq)),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["message"], "Banned");

    let (status, _) = send(
        &app,
        request(
            Method::POST,
            "/api/resources",
            Some(&token_for("trusted", None)),
            Some(json!({ "title": "", "branch": "CSE" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_authorization() {
    let app = setup();
    let id = seed_resource(&app, ResourceStatus::Approved, 0).await;
    let uri = format!("/api/resources/{}", id);

    let (status, _) = send(&app, request(Method::DELETE, &uri, Some(&token_for("u1", None)), None)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, json) = send(&app, request(Method::DELETE, &uri, Some(&token_for("owner", None)), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Deleted");

    let (status, _) = send(
        &app,
        request(Method::DELETE, &uri, Some(&token_for("admin", Some("admin"))), None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
