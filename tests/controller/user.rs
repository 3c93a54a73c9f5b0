use super::*;

use carelink::server::{
    controller::user::{export_data, upload_avatar},
    service::media::Upload,
};

#[tokio::test]
async fn exports_personal_data() -> Result<(), TestError> {
    let test = test_setup_with_marketplace_tables!()?;
    let (user, family) = test.user().insert_family("family@carelink.test").await?;
    test.marketplace().insert_child(family.id).await?;
    test.sign_in(user.id).await?;

    let resp = export_data(State(test.app_state()), test.session.clone())
        .await
        .into_response();

    assert_eq!(resp.status(), StatusCode::OK);

    Ok(())
}

/// Expect 400 without any storage call for a non-image avatar
#[tokio::test]
async fn rejects_unsupported_avatar_type() -> Result<(), TestError> {
    let mut test = test_setup_with_marketplace_tables!()?;
    let (user, _) = test.user().insert_family("family@carelink.test").await?;
    let storage = test.provider().storage_upload("avatars", 0);
    test.sign_in(user.id).await?;

    let resp = upload_avatar(
        State(test.app_state()),
        test.session.clone(),
        Upload {
            content_type: "application/pdf".to_string(),
            bytes: b"%PDF-1.7".to_vec(),
        },
    )
    .await
    .into_response();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    storage.assert();

    Ok(())
}

/// Expect the avatar to be stored in the avatars bucket
#[tokio::test]
async fn uploads_png_avatar() -> Result<(), TestError> {
    let mut test = test_setup_with_marketplace_tables!()?;
    let (user, _) = test.user().insert_family("family@carelink.test").await?;
    let storage = test.provider().storage_upload("avatars", 1);
    test.sign_in(user.id).await?;

    let resp = upload_avatar(
        State(test.app_state()),
        test.session.clone(),
        Upload {
            content_type: "image/png".to_string(),
            bytes: vec![0x89, b'P', b'N', b'G'],
        },
    )
    .await
    .into_response();

    assert_eq!(resp.status(), StatusCode::OK);
    storage.assert();

    Ok(())
}
