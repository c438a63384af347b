//! Router-level tests: the public quote/checkout flow and the session-guarded
//! pricing admin flow, driven through `tower::ServiceExt::oneshot` against a
//! real router with an in-memory database and a temp-dir pricing store.

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use storefront::core::{Config, ServerState};
use storefront::db::DbService;
use storefront::db::repository::admin_user;
use storefront::services::{InstagramClient, Mailer};
use storefront::{MemorySessionStore, PricingStore, SessionStore};

const ADMIN_PASSWORD: &str = "sugar-sugar-2026";

struct TestApp {
    router: Router,
    state: ServerState,
    _work_dir: tempfile::TempDir,
}

async fn spawn_app() -> TestApp {
    let work_dir = tempfile::tempdir().unwrap();

    let mut config = Config::with_overrides(work_dir.path().to_string_lossy(), 0);
    config.admin_username = "admin".into();
    config.admin_password = Some(ADMIN_PASSWORD.into());
    config.smtp = Default::default();

    let db = DbService::new_in_memory().await.unwrap();
    admin_user::upsert(&db.pool, "admin", ADMIN_PASSWORD)
        .await
        .unwrap();

    let pricing = PricingStore::new(work_dir.path().join("pricing"));
    pricing.ensure_seeded().await.unwrap();

    let sessions: Arc<dyn SessionStore> = Arc::new(MemorySessionStore::with_default_ttl());
    let mailer = Arc::new(Mailer::from_config(&config.smtp));
    let instagram = Arc::new(InstagramClient::new());

    let state = ServerState::new(
        config,
        db.pool,
        sessions,
        pricing,
        mailer,
        instagram,
    );
    let router = storefront::api::router(state.clone());

    TestApp {
        router,
        state,
        _work_dir: work_dir,
    }
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn with_token(mut request: Request<Body>, token: &str) -> Request<Body> {
    request.headers_mut().insert(
        header::AUTHORIZATION,
        format!("Bearer {token}").parse().unwrap(),
    );
    request
}

async fn login(app: &TestApp) -> String {
    let (status, body) = send(
        &app.router,
        post_json(
            "/api/auth/login",
            json!({ "username": "admin", "password": ADMIN_PASSWORD }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    body["token"].as_str().unwrap().to_string()
}

// ── Public pricing flow ─────────────────────────────────────────────

#[tokio::test]
async fn quote_single_six_inch_cake() {
    let app = spawn_app().await;
    let (status, body) = send(
        &app.router,
        post_json(
            "/api/cakes/price",
            json!({
                "sixInchCakes": 1, "eightInchCakes": 0, "layers": 1,
                "shape": "round", "flavors": ["butter"], "icingType": "butter",
                "decorations": [], "dietaryRestrictions": []
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalPrice"], 9000);
    assert_eq!(body["basePrice"], 9000);
    assert_eq!(body["cakeQuantity"], 1);
    assert_eq!(body["breakdown"]["basePrice"], 9000);
}

#[tokio::test]
async fn quote_three_layers_adds_two_layer_charges() {
    let app = spawn_app().await;
    let (status, body) = send(
        &app.router,
        post_json(
            "/api/cakes/price",
            json!({
                "sixInchCakes": 1, "eightInchCakes": 0, "layers": 3,
                "shape": "round", "flavors": ["butter"], "icingType": "butter",
                "decorations": [], "dietaryRestrictions": []
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalPrice"], 12000); // 9000 + 2 * 1500
}

#[tokio::test]
async fn quote_zero_cakes_is_rejected() {
    let app = spawn_app().await;
    let (status, body) = send(
        &app.router,
        post_json(
            "/api/cakes/price",
            json!({ "sixInchCakes": 0, "eightInchCakes": 0, "layers": 1 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "must select at least one cake");
}

#[tokio::test]
async fn quote_promo_template_bypasses_feature_pricing() {
    let app = spawn_app().await;
    let (status, body) = send(
        &app.router,
        post_json(
            "/api/cakes/price",
            json!({
                "sixInchCakes": 2, "eightInchCakes": 1, "layers": 3,
                "template": "fathers-day",
                "decorations": ["sprinkles"], "flavors": ["ube"]
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["basePrice"], 33500);
    assert_eq!(body["templatePrice"], 3000);
    assert_eq!(body["totalPrice"], 36500);
    assert_eq!(body["layerPrice"], 0);
    assert_eq!(body["decorationTotal"], 0);
    assert_eq!(body["flavorPrice"], 0);
}

#[tokio::test]
async fn pricing_structure_is_public() {
    let app = spawn_app().await;
    let (status, body) = send(&app.router, get("/api/pricing-structure")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["basePrices"]["6inch"], 9000);
}

// ── Admin guard ─────────────────────────────────────────────────────

#[tokio::test]
async fn admin_routes_require_a_session() {
    let app = spawn_app().await;

    let (status, _) = send(&app.router, get("/api/admin/pricing")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app.router,
        with_token(get("/api/admin/pricing"), "not-a-real-token"),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_rejects_bad_credentials() {
    let app = spawn_app().await;
    let (status, _) = send(
        &app.router,
        post_json(
            "/api/auth/login",
            json!({ "username": "admin", "password": "wrong" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app.router,
        post_json(
            "/api/auth/login",
            json!({ "username": "ghost", "password": "wrong" }),
        ),
    )
    .await;
    // Same error for unknown user and wrong password.
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn logout_invalidates_the_token() {
    let app = spawn_app().await;
    let token = login(&app).await;

    let (status, _) = send(&app.router, with_token(get("/api/auth/me"), &token)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app.router,
        with_token(
            post_json("/api/auth/logout", json!({})),
            &token,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app.router, with_token(get("/api/auth/me"), &token)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// ── Pricing admin flow ──────────────────────────────────────────────

#[tokio::test]
async fn replace_pricing_document_backs_up_and_takes_effect() {
    let app = spawn_app().await;
    let token = login(&app).await;

    let (_, mut doc) = send(&app.router, with_token(get("/api/admin/pricing"), &token)).await;
    doc["basePrices"]["6inch"] = json!(9900);

    let request = Request::builder()
        .method("PUT")
        .uri("/api/admin/pricing")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(doc.to_string()))
        .unwrap();
    let (status, body) = send(&app.router, with_token(request, &token)).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    let backup = body["backup"].as_str().unwrap().to_string();
    assert!(backup.starts_with("pricing-"));

    // Exactly one backup, listed newest-first.
    let (status, backups) = send(
        &app.router,
        with_token(get("/api/admin/pricing/backups"), &token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(backups.as_array().unwrap().len(), 1);
    assert_eq!(backups[0]["filename"], backup);

    // The very next public quote sees the new price.
    let (_, quote) = send(
        &app.router,
        post_json(
            "/api/cakes/price",
            json!({ "sixInchCakes": 1, "layers": 1, "flavors": ["butter"] }),
        ),
    )
    .await;
    assert_eq!(quote["totalPrice"], 9900);
}

#[tokio::test]
async fn invalid_pricing_document_is_rejected_and_live_doc_untouched() {
    let app = spawn_app().await;
    let token = login(&app).await;

    let (_, mut doc) = send(&app.router, with_token(get("/api/admin/pricing"), &token)).await;
    doc.as_object_mut().unwrap().remove("templatePrices");

    let request = Request::builder()
        .method("PUT")
        .uri("/api/admin/pricing")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(doc.to_string()))
        .unwrap();
    let (status, body) = send(&app.router, with_token(request, &token)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["message"]
            .as_str()
            .unwrap()
            .contains("templatePrices"),
        "{body}"
    );

    // Live document unchanged, no backup written.
    let (_, live) = send(&app.router, get("/api/pricing-structure")).await;
    assert_eq!(live["basePrices"]["6inch"], 9000);
    let (_, backups) = send(
        &app.router,
        with_token(get("/api/admin/pricing/backups"), &token),
    )
    .await;
    assert!(backups.as_array().unwrap().is_empty());
}

// ── Checkout flow ───────────────────────────────────────────────────

#[tokio::test]
async fn checkout_stamps_the_total_and_admin_can_confirm() {
    let app = spawn_app().await;

    let (status, body) = send(
        &app.router,
        post_json(
            "/api/orders",
            json!({
                "customer": { "name": "June Bug", "email": "june@example.com" },
                "pickupDate": "2026-09-01",
                "items": [
                    { "kind": "custom", "config": {
                        "sixInchCakes": 1, "layers": 3, "shape": "round",
                        "flavors": ["butter"], "icingType": "butter"
                    }},
                    { "kind": "specialty", "category": "cheesecakes",
                      "itemKey": "basque", "quantity": 2 }
                ]
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    // 9000 + 2*1500 for the custom cake, 2 * 4500 for the cheesecakes.
    assert_eq!(body["totalPrice"], 12000 + 9000);
    let order_id = body["orderId"].as_i64().unwrap();

    let token = login(&app).await;
    let (status, orders) = send(
        &app.router,
        with_token(get("/api/admin/orders?status=pending"), &token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(orders.as_array().unwrap().len(), 1);
    assert_eq!(orders[0]["totalPrice"], 21000);

    // pending -> confirmed is allowed…
    let request = Request::builder()
        .method("PATCH")
        .uri(format!("/api/admin/orders/{order_id}/status"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "status": "confirmed" }).to_string()))
        .unwrap();
    let (status, body) = send(&app.router, with_token(request, &token)).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["status"], "confirmed");

    // …but confirmed -> pending is not.
    let request = Request::builder()
        .method("PATCH")
        .uri(format!("/api/admin/orders/{order_id}/status"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "status": "pending" }).to_string()))
        .unwrap();
    let (status, _) = send(&app.router, with_token(request, &token)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn checkout_with_unknown_specialty_item_fails() {
    let app = spawn_app().await;
    let (status, body) = send(
        &app.router,
        post_json(
            "/api/orders",
            json!({
                "customer": { "name": "June", "email": "june@example.com" },
                "items": [
                    { "kind": "specialty", "category": "cheesecakes", "itemKey": "nope" }
                ]
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("nope"));
    // Nothing persisted.
    let orders = storefront::db::repository::order::find_all(&app.state.pool, None, 10)
        .await
        .unwrap();
    assert!(orders.is_empty());
}

#[tokio::test]
async fn checkout_with_zero_cake_custom_item_fails() {
    let app = spawn_app().await;
    let (status, body) = send(
        &app.router,
        post_json(
            "/api/orders",
            json!({
                "customer": { "name": "June", "email": "june@example.com" },
                "items": [ { "kind": "custom", "config": { "layers": 1 } } ]
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "must select at least one cake");
}

// ── Collaborator CRUD ───────────────────────────────────────────────

#[tokio::test]
async fn pages_and_contact_round_trip() {
    let app = spawn_app().await;
    let token = login(&app).await;

    let (status, _) = send(&app.router, get("/api/pages/home")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let request = Request::builder()
        .method("PUT")
        .uri("/api/admin/pages/home")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({ "content": { "headline": "Fresh cakes!" } }).to_string(),
        ))
        .unwrap();
    let (status, _) = send(&app.router, with_token(request, &token)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, page) = send(&app.router, get("/api/pages/home")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["content"]["headline"], "Fresh cakes!");

    // Contact form stores and is visible to the admin.
    let (status, _) = send(
        &app.router,
        post_json(
            "/api/contact",
            json!({
                "name": "Pat", "email": "pat@example.com",
                "message": "Do you do wedding cakes?"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, messages) = send(
        &app.router,
        with_token(get("/api/admin/contact"), &token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(messages.as_array().unwrap().len(), 1);
    assert_eq!(messages[0]["name"], "Pat");
}
