use super::*;

use carelink::{
    model::messaging::{MessageInput, StartConversationDto},
    server::controller::messaging::{list_messages, send_message, start_conversation},
};

#[tokio::test]
async fn family_resumes_conversation_and_sends_message() -> Result<(), TestError> {
    let test = test_setup_with_marketplace_tables!()?;
    let (_, educator) = test.user().insert_educator("edu@carelink.test").await?;
    let (family_user, family) = test.user().insert_family("family@carelink.test").await?;
    let conversation = test
        .marketplace()
        .insert_conversation(educator.id, family.id)
        .await?;
    test.sign_in(family_user.id).await?;

    let resp = start_conversation(
        State(test.app_state()),
        test.session.clone(),
        Json(StartConversationDto {
            counterpart_profile_id: educator.id,
        }),
    )
    .await
    .into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = send_message(
        State(test.app_state()),
        test.session.clone(),
        Path(conversation.id),
        Json(MessageInput {
            body: "Bonjour, are you available on Wednesdays?".to_string(),
        }),
    )
    .await
    .into_response();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = list_messages(
        State(test.app_state()),
        test.session.clone(),
        Path(conversation.id),
    )
    .await
    .into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    Ok(())
}

/// Expect 404 when an educator contacts a family that never booked them
#[tokio::test]
async fn educator_cannot_contact_unknown_family() -> Result<(), TestError> {
    let test = test_setup_with_marketplace_tables!()?;
    let (educator_user, _) = test.user().insert_educator("edu@carelink.test").await?;
    let (_, family) = test.user().insert_family("family@carelink.test").await?;
    test.sign_in(educator_user.id).await?;

    let resp = start_conversation(
        State(test.app_state()),
        test.session.clone(),
        Json(StartConversationDto {
            counterpart_profile_id: family.id,
        }),
    )
    .await
    .into_response();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}
