use super::*;

use axum::extract::Query;
use carelink::server::controller::search::{
    get_available_slots, search_educators, SearchParams, SlotsParams,
};

#[tokio::test]
async fn searches_approved_educators() -> Result<(), TestError> {
    let test = test_setup_with_marketplace_tables!()?;
    test.user().insert_educator("edu@carelink.test").await?;

    let resp = search_educators(
        State(test.app_state()),
        Query(SearchParams {
            city: Some("lyon".to_string()),
            profession: None,
            max_rate_cents: None,
            page: None,
            per_page: None,
        }),
    )
    .await
    .into_response();

    assert_eq!(resp.status(), StatusCode::OK);

    Ok(())
}

#[tokio::test]
async fn returns_slots_of_educator() -> Result<(), TestError> {
    let test = test_setup_with_marketplace_tables!()?;
    let (_, educator) = test.user().insert_educator("edu@carelink.test").await?;
    let date = Utc::now().date_naive() + Duration::days(7);

    let resp = get_available_slots(
        State(test.app_state()),
        Path(educator.id),
        Query(SlotsParams { date }),
    )
    .await
    .into_response();

    assert_eq!(resp.status(), StatusCode::OK);

    Ok(())
}

#[tokio::test]
async fn slots_of_unknown_educator_are_not_found() -> Result<(), TestError> {
    let test = test_setup_with_marketplace_tables!()?;
    let date = Utc::now().date_naive() + Duration::days(7);

    let resp = get_available_slots(
        State(test.app_state()),
        Path(4242),
        Query(SlotsParams { date }),
    )
    .await
    .into_response();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}
