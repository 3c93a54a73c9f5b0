//! HTTP routing and OpenAPI documentation configuration.
//!
//! This module defines the application's HTTP routes and generates OpenAPI documentation
//! using utoipa. All API endpoints are registered here with their OpenAPI specifications,
//! and Swagger UI is configured to provide interactive API documentation at `/api/docs`.

use axum::{extract::DefaultBodyLimit, Router};
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{
    controller::{self, util::upload::MAX_UPLOAD_BYTES},
    model::app::AppState,
};

/// Builds the application's HTTP router with all API endpoints and Swagger UI documentation.
///
/// Handlers sharing a path are registered together so utoipa documents each method under
/// one path item. Upload endpoints read the raw request body and are grouped under a larger
/// body limit than axum's 2 MB default; each service then enforces the limit of its file kind.
///
/// The OpenAPI specification is available at `/api/docs/openapi.json`.
///
/// # Returns
/// An Axum `Router<AppState>` ready to receive the application state and session layer.
pub fn routes() -> Router<AppState> {
    #[derive(OpenApi)]
    #[openapi(
        info(
            title = "Carelink",
            description = "Marketplace connecting families with special-needs-care educators"
        ),
        tags(
            (name = controller::auth::AUTH_TAG, description = "Sessions and passwords"),
            (name = controller::user::USER_TAG, description = "Account data and avatar"),
            (name = controller::profile::PROFILE_TAG, description = "Educator and family profiles"),
            (name = controller::search::SEARCH_TAG, description = "Educator search and slots"),
            (name = controller::booking::BOOKING_TAG, description = "Booking, payment and PIN validation"),
            (name = controller::invoice::INVOICE_TAG, description = "Invoices"),
            (name = controller::certification::CERTIFICATION_TAG, description = "Educator certifications"),
            (name = controller::post::BLOG_TAG, description = "Blog posts"),
            (name = controller::post::COMMUNITY_TAG, description = "Community posts"),
            (name = controller::billing::BILLING_TAG, description = "Educator subscription"),
            (name = controller::messaging::MESSAGING_TAG, description = "Family and educator messaging"),
            (name = controller::admin::ADMIN_TAG, description = "Moderation queues"),
        )
    )]
    struct ApiDoc;

    let uploads = OpenApiRouter::new()
        .routes(routes!(controller::user::upload_avatar))
        .routes(routes!(controller::profile::upload_video))
        .routes(routes!(
            controller::certification::upload_certification_document
        ))
        .routes(routes!(controller::post::upload_blog_image))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES));

    let (routes, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        // Auth & account
        .routes(routes!(controller::auth::create_session))
        .routes(routes!(controller::auth::get_user))
        .routes(routes!(controller::auth::logout))
        .routes(routes!(controller::auth::reset_password))
        .routes(routes!(controller::user::export_data))
        // Profiles
        .routes(routes!(
            controller::profile::get_educator_profile,
            controller::profile::create_educator_profile,
            controller::profile::update_educator_profile
        ))
        .routes(routes!(
            controller::profile::list_availability,
            controller::profile::add_availability
        ))
        .routes(routes!(controller::profile::delete_availability))
        .routes(routes!(
            controller::profile::get_family_profile,
            controller::profile::create_family_profile,
            controller::profile::update_family_profile
        ))
        .routes(routes!(
            controller::profile::list_children,
            controller::profile::add_child
        ))
        .routes(routes!(
            controller::profile::update_child,
            controller::profile::delete_child
        ))
        // Search
        .routes(routes!(controller::search::search_educators))
        .routes(routes!(controller::profile::get_public_educator))
        .routes(routes!(controller::search::get_available_slots))
        // Booking
        .routes(routes!(controller::booking::checkout))
        .routes(routes!(controller::booking::confirm_payment))
        .routes(routes!(controller::booking::list_appointments))
        .routes(routes!(controller::booking::accept))
        .routes(routes!(controller::booking::decline))
        .routes(routes!(controller::booking::cancel))
        .routes(routes!(controller::booking::validate_pin))
        .routes(routes!(controller::invoice::list_invoices))
        .routes(routes!(controller::invoice::get_invoice_pdf))
        // Certifications
        .routes(routes!(
            controller::certification::list_certifications,
            controller::certification::create_certification
        ))
        .routes(routes!(controller::certification::update_certification))
        .routes(routes!(
            controller::certification::get_certification_document
        ))
        // Blog & community
        .routes(routes!(controller::post::list_blog_posts))
        .routes(routes!(controller::post::get_blog_post))
        .routes(routes!(
            controller::post::list_own_blog_posts,
            controller::post::create_blog_post
        ))
        .routes(routes!(controller::post::update_blog_post))
        .routes(routes!(controller::post::submit_blog_post))
        .routes(routes!(controller::post::list_community_posts))
        .routes(routes!(
            controller::post::list_own_community_posts,
            controller::post::create_community_post
        ))
        .routes(routes!(controller::post::update_community_post))
        .routes(routes!(controller::post::submit_community_post))
        // Billing & messaging
        .routes(routes!(controller::billing::subscription_checkout))
        .routes(routes!(controller::billing::sync_subscription))
        .routes(routes!(
            controller::messaging::list_conversations,
            controller::messaging::start_conversation
        ))
        .routes(routes!(
            controller::messaging::list_messages,
            controller::messaging::send_message
        ))
        // Moderation
        .routes(routes!(controller::admin::list_pending_certifications))
        .routes(routes!(controller::admin::review_certification))
        .routes(routes!(controller::admin::list_duplicate_diplomas))
        .routes(routes!(controller::admin::list_pending_educators))
        .routes(routes!(controller::admin::review_educator))
        .routes(routes!(controller::admin::list_pending_avatars))
        .routes(routes!(controller::admin::review_avatar))
        .routes(routes!(controller::admin::list_submitted_blog_posts))
        .routes(routes!(controller::admin::review_blog_post))
        .routes(routes!(controller::admin::list_submitted_community_posts))
        .routes(routes!(controller::admin::review_community_post))
        .merge(uploads)
        .split_for_parts();

    routes.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
}
