use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use carelink::server::router::routes;
use carelink_test_utils::prelude::*;
use tower::ServiceExt;
use tower_sessions::{MemoryStore, SessionManagerLayer};

use crate::util::TestContextExt;

fn app(test: &TestContext) -> Router {
    routes()
        .with_state(test.app_state())
        .layer(SessionManagerLayer::new(MemoryStore::default()))
}

async fn get(app: Router, uri: &str) -> StatusCode {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();

    app.oneshot(request).await.unwrap().status()
}

#[tokio::test]
async fn serves_openapi_document() -> Result<(), TestError> {
    let test = test_setup_with_tables!()?;

    assert_eq!(
        get(app(&test), "/api/docs/openapi.json").await,
        StatusCode::OK
    );

    Ok(())
}

#[tokio::test]
async fn current_user_requires_session_cookie() -> Result<(), TestError> {
    let test = test_setup_with_user_tables!()?;

    assert_eq!(
        get(app(&test), "/api/auth/user").await,
        StatusCode::UNAUTHORIZED
    );

    Ok(())
}

#[tokio::test]
async fn educator_search_is_public() -> Result<(), TestError> {
    let test = test_setup_with_marketplace_tables!()?;
    test.user().insert_educator("edu@carelink.test").await?;

    assert_eq!(
        get(app(&test), "/api/educators?city=Lyon&page=1").await,
        StatusCode::OK
    );

    Ok(())
}

#[tokio::test]
async fn unknown_route_is_not_found() -> Result<(), TestError> {
    let test = test_setup_with_tables!()?;

    assert_eq!(get(app(&test), "/api/nope").await, StatusCode::NOT_FOUND);

    Ok(())
}
