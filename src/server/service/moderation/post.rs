//! Blog articles and community posts.
//!
//! Both follow the same workflow: authors edit while the post is a draft or was rejected,
//! submit it for review, and an admin publishes or rejects it. Only published posts are
//! public.

use chrono::Utc;
use entity::sea_orm_active_enums::{PostStatus, UserRole};
use sea_orm::DatabaseConnection;

use crate::{
    model::{
        api::{ModerationDecisionDto, UploadDto},
        content::{BlogPostDto, CommunityPostDto, PostInput},
    },
    server::{
        data::{blog_post::BlogPostRepository, community_post::CommunityPostRepository},
        error::{moderation::ModerationError, Error},
        model::app::AppState,
        provider::storage::Bucket,
        service::{
            media::{Upload, IMAGE_UPLOAD},
            moderation::{require_admin, Decision},
            validate::{max_chars, optional_text, required_text},
        },
        util::slug::slugify,
    },
};

const MAX_TITLE_CHARS: usize = 200;
const MAX_CONTENT_CHARS: usize = 50_000;

fn clean_input(input: PostInput) -> Result<PostInput, Error> {
    let title = required_text("Title", &input.title)?;
    max_chars("Title", &title, MAX_TITLE_CHARS)?;
    let content = required_text("Content", &input.content)?;
    max_chars("Content", &content, MAX_CONTENT_CHARS)?;

    Ok(PostInput {
        title,
        content,
        cover_image_url: optional_text(input.cover_image_url),
    })
}

fn ensure_editable(status: PostStatus, item: &'static str, action: &'static str) -> Result<(), Error> {
    match status {
        PostStatus::Draft | PostStatus::Rejected => Ok(()),
        _ => Err(ModerationError::InvalidTransition { item, action }.into()),
    }
}

/// Post status and rejection reason resulting from an admin decision.
fn reviewed_status(decision: &Decision) -> (PostStatus, Option<String>) {
    match decision {
        Decision::Approve => (PostStatus::Published, None),
        Decision::Reject(reason) => (PostStatus::Rejected, Some(reason.clone())),
    }
}

pub fn blog_post_dto(post: entity::blog_post::Model) -> BlogPostDto {
    BlogPostDto {
        id: post.id,
        author_id: post.author_id,
        title: post.title,
        slug: post.slug,
        content: post.content,
        cover_image_url: post.cover_image_url,
        status: post.status,
        rejection_reason: post.rejection_reason,
        published_at: post.published_at,
        updated_at: post.updated_at,
    }
}

pub fn community_post_dto(post: entity::community_post::Model) -> CommunityPostDto {
    CommunityPostDto {
        id: post.id,
        author_id: post.author_id,
        title: post.title,
        content: post.content,
        status: post.status,
        rejection_reason: post.rejection_reason,
        published_at: post.published_at,
        updated_at: post.updated_at,
    }
}

pub struct BlogService<'a> {
    state: &'a AppState,
}

impl<'a> BlogService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    fn require_author(user: &entity::app_user::Model) -> Result<(), Error> {
        match user.role {
            UserRole::Educator | UserRole::Admin => Ok(()),
            UserRole::Family => Err(Error::Forbidden(
                "Only educators can write blog posts".to_string(),
            )),
        }
    }

    /// First free slug derived from `title`: `title`, `title-2`, `title-3`...
    async fn unique_slug(&self, title: &str) -> Result<String, Error> {
        let repo = BlogPostRepository::new(&self.state.db);

        let mut base = slugify(title);
        if base.is_empty() {
            base = "post".to_string();
        }

        let mut slug = base.clone();
        let mut suffix = 2;
        while repo.slug_exists(&slug).await? {
            slug = format!("{}-{}", base, suffix);
            suffix += 1;
        }

        Ok(slug)
    }

    pub async fn create(
        &self,
        user: &entity::app_user::Model,
        input: PostInput,
    ) -> Result<BlogPostDto, Error> {
        Self::require_author(user)?;
        let input = clean_input(input)?;
        let slug = self.unique_slug(&input.title).await?;

        let post = BlogPostRepository::new(&self.state.db)
            .create(user.id, slug, input)
            .await?;

        Ok(blog_post_dto(post))
    }

    /// Edits a draft or rejected post. The slug chosen at creation is kept.
    pub async fn update(
        &self,
        user: &entity::app_user::Model,
        post_id: i32,
        input: PostInput,
    ) -> Result<BlogPostDto, Error> {
        let post = self.get_own(user, post_id).await?;
        ensure_editable(post.status, "Blog post", "edited")?;
        let input = clean_input(input)?;

        let post = BlogPostRepository::new(&self.state.db)
            .update(post, input)
            .await?;

        Ok(blog_post_dto(post))
    }

    pub async fn submit(
        &self,
        user: &entity::app_user::Model,
        post_id: i32,
    ) -> Result<BlogPostDto, Error> {
        let post = self.get_own(user, post_id).await?;
        ensure_editable(post.status, "Blog post", "submitted")?;

        let post = BlogPostRepository::new(&self.state.db)
            .set_status(post, PostStatus::Submitted, None)
            .await?;

        tracing::info!(post_id = %post.id, "Blog post submitted for review");

        Ok(blog_post_dto(post))
    }

    /// Publishes or rejects a submitted post.
    pub async fn review(
        &self,
        user: &entity::app_user::Model,
        post_id: i32,
        decision: ModerationDecisionDto,
    ) -> Result<BlogPostDto, Error> {
        require_admin(user)?;
        let decision = Decision::try_from(decision)?;

        let repo = BlogPostRepository::new(&self.state.db);
        let post = repo
            .get(post_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Blog post {}", post_id)))?;
        if post.status != PostStatus::Submitted {
            return Err(ModerationError::NotPending { item: "Blog post" }.into());
        }

        let (status, reason) = reviewed_status(&decision);
        let post = repo.set_status(post, status, reason).await?;

        tracing::info!(post_id = %post.id, status = ?post.status, "Blog post reviewed");

        Ok(blog_post_dto(post))
    }

    pub async fn list_published(&self) -> Result<Vec<BlogPostDto>, Error> {
        let posts = BlogPostRepository::new(&self.state.db)
            .list_published()
            .await?;

        Ok(posts.into_iter().map(blog_post_dto).collect())
    }

    pub async fn get_published(&self, slug: &str) -> Result<BlogPostDto, Error> {
        let post = BlogPostRepository::new(&self.state.db)
            .find_published_by_slug(slug)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Blog post {}", slug)))?;

        Ok(blog_post_dto(post))
    }

    pub async fn list_submitted(
        &self,
        user: &entity::app_user::Model,
    ) -> Result<Vec<BlogPostDto>, Error> {
        require_admin(user)?;

        let posts = BlogPostRepository::new(&self.state.db)
            .list_submitted()
            .await?;

        Ok(posts.into_iter().map(blog_post_dto).collect())
    }

    pub async fn list_own(&self, user: &entity::app_user::Model) -> Result<Vec<BlogPostDto>, Error> {
        let posts = BlogPostRepository::new(&self.state.db)
            .list_for_author(user.id)
            .await?;

        Ok(posts.into_iter().map(blog_post_dto).collect())
    }

    /// Uploads an illustration and returns its public URL, for use as a cover or inline image.
    pub async fn upload_image(
        &self,
        user: &entity::app_user::Model,
        upload: Upload,
    ) -> Result<UploadDto, Error> {
        Self::require_author(user)?;
        let extension = IMAGE_UPLOAD.check(&upload)?;

        let path = format!(
            "{}/{}.{}",
            user.id,
            Utc::now().timestamp_millis(),
            extension
        );
        self.state
            .storage
            .upload(Bucket::BlogImages, &path, &upload.content_type, upload.bytes)
            .await?;

        Ok(UploadDto {
            url: self.state.storage.public_url(Bucket::BlogImages, &path),
        })
    }

    async fn get_own(
        &self,
        user: &entity::app_user::Model,
        post_id: i32,
    ) -> Result<entity::blog_post::Model, Error> {
        BlogPostRepository::new(&self.state.db)
            .get(post_id)
            .await?
            .filter(|post| post.author_id == user.id)
            .ok_or_else(|| Error::NotFound(format!("Blog post {}", post_id)))
    }
}

/// Community posts can be written by any signed in user.
pub struct CommunityService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CommunityService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        user: &entity::app_user::Model,
        input: PostInput,
    ) -> Result<CommunityPostDto, Error> {
        let input = clean_input(input)?;

        let post = CommunityPostRepository::new(self.db)
            .create(user.id, input)
            .await?;

        Ok(community_post_dto(post))
    }

    pub async fn update(
        &self,
        user: &entity::app_user::Model,
        post_id: i32,
        input: PostInput,
    ) -> Result<CommunityPostDto, Error> {
        let post = self.get_own(user, post_id).await?;
        ensure_editable(post.status, "Community post", "edited")?;
        let input = clean_input(input)?;

        let post = CommunityPostRepository::new(self.db)
            .update(post, input)
            .await?;

        Ok(community_post_dto(post))
    }

    pub async fn submit(
        &self,
        user: &entity::app_user::Model,
        post_id: i32,
    ) -> Result<CommunityPostDto, Error> {
        let post = self.get_own(user, post_id).await?;
        ensure_editable(post.status, "Community post", "submitted")?;

        let post = CommunityPostRepository::new(self.db)
            .set_status(post, PostStatus::Submitted, None)
            .await?;

        Ok(community_post_dto(post))
    }

    pub async fn review(
        &self,
        user: &entity::app_user::Model,
        post_id: i32,
        decision: ModerationDecisionDto,
    ) -> Result<CommunityPostDto, Error> {
        require_admin(user)?;
        let decision = Decision::try_from(decision)?;

        let repo = CommunityPostRepository::new(self.db);
        let post = repo
            .get(post_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Community post {}", post_id)))?;
        if post.status != PostStatus::Submitted {
            return Err(ModerationError::NotPending {
                item: "Community post",
            }
            .into());
        }

        let (status, reason) = reviewed_status(&decision);
        let post = repo.set_status(post, status, reason).await?;

        tracing::info!(post_id = %post.id, status = ?post.status, "Community post reviewed");

        Ok(community_post_dto(post))
    }

    pub async fn list_published(&self) -> Result<Vec<CommunityPostDto>, Error> {
        let posts = CommunityPostRepository::new(self.db)
            .list_published()
            .await?;

        Ok(posts.into_iter().map(community_post_dto).collect())
    }

    pub async fn list_submitted(
        &self,
        user: &entity::app_user::Model,
    ) -> Result<Vec<CommunityPostDto>, Error> {
        require_admin(user)?;

        let posts = CommunityPostRepository::new(self.db)
            .list_submitted()
            .await?;

        Ok(posts.into_iter().map(community_post_dto).collect())
    }

    pub async fn list_own(
        &self,
        user: &entity::app_user::Model,
    ) -> Result<Vec<CommunityPostDto>, Error> {
        let posts = CommunityPostRepository::new(self.db)
            .list_for_author(user.id)
            .await?;

        Ok(posts.into_iter().map(community_post_dto).collect())
    }

    async fn get_own(
        &self,
        user: &entity::app_user::Model,
        post_id: i32,
    ) -> Result<entity::community_post::Model, Error> {
        CommunityPostRepository::new(self.db)
            .get(post_id)
            .await?
            .filter(|post| post.author_id == user.id)
            .ok_or_else(|| Error::NotFound(format!("Community post {}", post_id)))
    }
}
