use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::{ErrorDto, UploadDto},
        content::{BlogPostDto, CommunityPostDto, PostInput},
    },
    server::{
        controller::util::get_user::get_user_from_session,
        error::Error,
        model::app::AppState,
        service::{
            media::Upload,
            moderation::post::{BlogService, CommunityService},
        },
    },
};

pub static BLOG_TAG: &str = "blog";
pub static COMMUNITY_TAG: &str = "community";

#[utoipa::path(
    get,
    path = "/api/blog",
    tag = BLOG_TAG,
    responses(
        (status = 200, description = "Published blog posts, newest first", body = Vec<BlogPostDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_blog_posts(State(state): State<AppState>) -> Result<impl IntoResponse, Error> {
    let posts = BlogService::new(&state).list_published().await?;

    Ok((StatusCode::OK, Json(posts)))
}

#[utoipa::path(
    get,
    path = "/api/blog/{slug}",
    tag = BLOG_TAG,
    params(("slug" = String, Path, description = "Blog post slug")),
    responses(
        (status = 200, description = "Published blog post", body = BlogPostDto),
        (status = 404, description = "No published post with this slug", body = ErrorDto)
    ),
)]
pub async fn get_blog_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, Error> {
    let post = BlogService::new(&state).get_published(&slug).await?;

    Ok((StatusCode::OK, Json(post)))
}

/// Blog posts written by the signed in user, in every status
#[utoipa::path(
    get,
    path = "/api/blog-posts",
    tag = BLOG_TAG,
    responses(
        (status = 200, description = "Own blog posts", body = Vec<BlogPostDto>),
        (status = 401, description = "No user in session", body = ErrorDto)
    ),
)]
pub async fn list_own_blog_posts(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    let posts = BlogService::new(&state).list_own(&user).await?;

    Ok((StatusCode::OK, Json(posts)))
}

/// Start a blog post draft; educators and admins only
#[utoipa::path(
    post,
    path = "/api/blog-posts",
    tag = BLOG_TAG,
    request_body = PostInput,
    responses(
        (status = 201, description = "Draft created", body = BlogPostDto),
        (status = 400, description = "Invalid post", body = ErrorDto),
        (status = 403, description = "Families cannot write blog posts", body = ErrorDto)
    ),
)]
pub async fn create_blog_post(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<PostInput>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    let post = BlogService::new(&state).create(&user, payload).await?;

    Ok((StatusCode::CREATED, Json(post)))
}

/// Edit a draft or rejected blog post
#[utoipa::path(
    put,
    path = "/api/blog-posts/{post_id}",
    tag = BLOG_TAG,
    params(("post_id" = i32, Path, description = "Blog post ID")),
    request_body = PostInput,
    responses(
        (status = 200, description = "Post updated", body = BlogPostDto),
        (status = 400, description = "Invalid post or post not editable", body = ErrorDto),
        (status = 404, description = "Post not found", body = ErrorDto)
    ),
)]
pub async fn update_blog_post(
    State(state): State<AppState>,
    session: Session,
    Path(post_id): Path<i32>,
    Json(payload): Json<PostInput>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    let post = BlogService::new(&state)
        .update(&user, post_id, payload)
        .await?;

    Ok((StatusCode::OK, Json(post)))
}

#[utoipa::path(
    post,
    path = "/api/blog-posts/{post_id}/submit",
    tag = BLOG_TAG,
    params(("post_id" = i32, Path, description = "Blog post ID")),
    responses(
        (status = 200, description = "Post submitted for review", body = BlogPostDto),
        (status = 400, description = "Post not editable", body = ErrorDto),
        (status = 404, description = "Post not found", body = ErrorDto)
    ),
)]
pub async fn submit_blog_post(
    State(state): State<AppState>,
    session: Session,
    Path(post_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    let post = BlogService::new(&state).submit(&user, post_id).await?;

    Ok((StatusCode::OK, Json(post)))
}

/// Upload an image for use in blog posts as the raw request body
#[utoipa::path(
    post,
    path = "/api/blog-images",
    tag = BLOG_TAG,
    request_body(content = Vec<u8>, description = "image/jpeg, image/png or image/webp, at most 5 MiB", content_type = "image/png"),
    responses(
        (status = 200, description = "Public URL of the image", body = UploadDto),
        (status = 400, description = "Unsupported type or file too large", body = ErrorDto),
        (status = 403, description = "Families cannot write blog posts", body = ErrorDto),
        (status = 502, description = "Storage upload failed", body = ErrorDto)
    ),
)]
pub async fn upload_blog_image(
    State(state): State<AppState>,
    session: Session,
    upload: Upload,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    let image = BlogService::new(&state).upload_image(&user, upload).await?;

    Ok((StatusCode::OK, Json(image)))
}

#[utoipa::path(
    get,
    path = "/api/community",
    tag = COMMUNITY_TAG,
    responses(
        (status = 200, description = "Published community posts, newest first", body = Vec<CommunityPostDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_community_posts(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, Error> {
    let posts = CommunityService::new(&state.db).list_published().await?;

    Ok((StatusCode::OK, Json(posts)))
}

#[utoipa::path(
    get,
    path = "/api/community-posts",
    tag = COMMUNITY_TAG,
    responses(
        (status = 200, description = "Own community posts", body = Vec<CommunityPostDto>),
        (status = 401, description = "No user in session", body = ErrorDto)
    ),
)]
pub async fn list_own_community_posts(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    let posts = CommunityService::new(&state.db).list_own(&user).await?;

    Ok((StatusCode::OK, Json(posts)))
}

#[utoipa::path(
    post,
    path = "/api/community-posts",
    tag = COMMUNITY_TAG,
    request_body = PostInput,
    responses(
        (status = 201, description = "Draft created", body = CommunityPostDto),
        (status = 400, description = "Invalid post", body = ErrorDto),
        (status = 401, description = "No user in session", body = ErrorDto)
    ),
)]
pub async fn create_community_post(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<PostInput>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    let post = CommunityService::new(&state.db)
        .create(&user, payload)
        .await?;

    Ok((StatusCode::CREATED, Json(post)))
}

#[utoipa::path(
    put,
    path = "/api/community-posts/{post_id}",
    tag = COMMUNITY_TAG,
    params(("post_id" = i32, Path, description = "Community post ID")),
    request_body = PostInput,
    responses(
        (status = 200, description = "Post updated", body = CommunityPostDto),
        (status = 400, description = "Invalid post or post not editable", body = ErrorDto),
        (status = 404, description = "Post not found", body = ErrorDto)
    ),
)]
pub async fn update_community_post(
    State(state): State<AppState>,
    session: Session,
    Path(post_id): Path<i32>,
    Json(payload): Json<PostInput>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    let post = CommunityService::new(&state.db)
        .update(&user, post_id, payload)
        .await?;

    Ok((StatusCode::OK, Json(post)))
}

#[utoipa::path(
    post,
    path = "/api/community-posts/{post_id}/submit",
    tag = COMMUNITY_TAG,
    params(("post_id" = i32, Path, description = "Community post ID")),
    responses(
        (status = 200, description = "Post submitted for review", body = CommunityPostDto),
        (status = 400, description = "Post not editable", body = ErrorDto),
        (status = 404, description = "Post not found", body = ErrorDto)
    ),
)]
pub async fn submit_community_post(
    State(state): State<AppState>,
    session: Session,
    Path(post_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    let post = CommunityService::new(&state.db)
        .submit(&user, post_id)
        .await?;

    Ok((StatusCode::OK, Json(post)))
}
