use chrono::Utc;
use entity::sea_orm_active_enums::PostStatus;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::model::content::PostInput;

pub struct BlogPostRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> BlogPostRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a draft post
    pub async fn create(
        &self,
        author_id: i32,
        slug: String,
        input: PostInput,
    ) -> Result<entity::blog_post::Model, DbErr> {
        let now = Utc::now().naive_utc();

        let post = entity::blog_post::ActiveModel {
            author_id: ActiveValue::Set(author_id),
            title: ActiveValue::Set(input.title),
            slug: ActiveValue::Set(slug),
            content: ActiveValue::Set(input.content),
            cover_image_url: ActiveValue::Set(input.cover_image_url),
            status: ActiveValue::Set(PostStatus::Draft),
            rejection_reason: ActiveValue::Set(None),
            published_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        post.insert(self.db).await
    }

    /// Applies an author edit, returning the post to draft
    pub async fn update(
        &self,
        post: entity::blog_post::Model,
        input: PostInput,
    ) -> Result<entity::blog_post::Model, DbErr> {
        let mut post_am = post.into_active_model();
        post_am.title = ActiveValue::Set(input.title);
        post_am.content = ActiveValue::Set(input.content);
        post_am.cover_image_url = ActiveValue::Set(input.cover_image_url);
        post_am.status = ActiveValue::Set(PostStatus::Draft);
        post_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        post_am.update(self.db).await
    }

    /// Moves the post to `status`
    ///
    /// `published_at` is set when publishing. The rejection reason is replaced by
    /// `rejection_reason` on every transition except submission, so authors keep seeing
    /// why their previous attempt was refused.
    pub async fn set_status(
        &self,
        post: entity::blog_post::Model,
        status: PostStatus,
        rejection_reason: Option<String>,
    ) -> Result<entity::blog_post::Model, DbErr> {
        let now = Utc::now().naive_utc();

        let mut post_am = post.into_active_model();
        post_am.status = ActiveValue::Set(status);
        if status != PostStatus::Submitted {
            post_am.rejection_reason = ActiveValue::Set(rejection_reason);
        }
        if status == PostStatus::Published {
            post_am.published_at = ActiveValue::Set(Some(now));
        }
        post_am.updated_at = ActiveValue::Set(now);

        post_am.update(self.db).await
    }

    pub async fn get(&self, post_id: i32) -> Result<Option<entity::blog_post::Model>, DbErr> {
        entity::prelude::BlogPost::find_by_id(post_id)
            .one(self.db)
            .await
    }

    pub async fn find_published_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<entity::blog_post::Model>, DbErr> {
        entity::prelude::BlogPost::find()
            .filter(entity::blog_post::Column::Slug.eq(slug))
            .filter(entity::blog_post::Column::Status.eq(PostStatus::Published))
            .one(self.db)
            .await
    }

    pub async fn slug_exists(&self, slug: &str) -> Result<bool, DbErr> {
        let count = entity::prelude::BlogPost::find()
            .filter(entity::blog_post::Column::Slug.eq(slug))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Lists published posts, most recently published first
    pub async fn list_published(&self) -> Result<Vec<entity::blog_post::Model>, DbErr> {
        entity::prelude::BlogPost::find()
            .filter(entity::blog_post::Column::Status.eq(PostStatus::Published))
            .order_by_desc(entity::blog_post::Column::PublishedAt)
            .order_by_desc(entity::blog_post::Column::Id)
            .all(self.db)
            .await
    }

    /// Lists posts awaiting review, oldest first
    pub async fn list_submitted(&self) -> Result<Vec<entity::blog_post::Model>, DbErr> {
        entity::prelude::BlogPost::find()
            .filter(entity::blog_post::Column::Status.eq(PostStatus::Submitted))
            .order_by_asc(entity::blog_post::Column::UpdatedAt)
            .order_by_asc(entity::blog_post::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn list_for_author(
        &self,
        author_id: i32,
    ) -> Result<Vec<entity::blog_post::Model>, DbErr> {
        entity::prelude::BlogPost::find()
            .filter(entity::blog_post::Column::AuthorId.eq(author_id))
            .order_by_desc(entity::blog_post::Column::UpdatedAt)
            .order_by_desc(entity::blog_post::Column::Id)
            .all(self.db)
            .await
    }
}

#[cfg(test)]
mod tests {
    mod set_status {
        use carelink_test_utils::prelude::*;
        use entity::sea_orm_active_enums::{PostStatus, UserRole};

        use crate::server::data::blog_post::BlogPostRepository;

        #[tokio::test]
        async fn publishing_sets_published_at() -> Result<(), TestError> {
            let test = test_setup_with_marketplace_tables!()?;
            let author = test
                .user()
                .insert_user("admin@carelink.test", UserRole::Admin)
                .await?;
            let post = test
                .marketplace()
                .insert_blog_post(author.id, "bedtime-routines", PostStatus::Submitted)
                .await?;

            let repo = BlogPostRepository::new(&test.db);
            let published = repo.set_status(post, PostStatus::Published, None).await?;

            assert_eq!(published.status, PostStatus::Published);
            assert!(published.published_at.is_some());

            Ok(())
        }

        /// Expect resubmission to keep the reason of the previous rejection
        #[tokio::test]
        async fn submission_keeps_rejection_reason() -> Result<(), TestError> {
            let test = test_setup_with_marketplace_tables!()?;
            let author = test
                .user()
                .insert_user("admin@carelink.test", UserRole::Admin)
                .await?;
            let post = test
                .marketplace()
                .insert_blog_post(author.id, "bedtime-routines", PostStatus::Submitted)
                .await?;

            let repo = BlogPostRepository::new(&test.db);
            let rejected = repo
                .set_status(post, PostStatus::Rejected, Some("Too short".to_string()))
                .await?;
            let resubmitted = repo.set_status(rejected, PostStatus::Submitted, None).await?;

            assert_eq!(resubmitted.rejection_reason.as_deref(), Some("Too short"));

            Ok(())
        }
    }

    mod list_published {
        use carelink_test_utils::prelude::*;
        use entity::sea_orm_active_enums::{PostStatus, UserRole};

        use crate::server::data::blog_post::BlogPostRepository;

        #[tokio::test]
        async fn excludes_unpublished_posts() -> Result<(), TestError> {
            let test = test_setup_with_marketplace_tables!()?;
            let author = test
                .user()
                .insert_user("admin@carelink.test", UserRole::Admin)
                .await?;
            let marketplace = test.marketplace();
            let published = marketplace
                .insert_blog_post(author.id, "published", PostStatus::Published)
                .await?;
            marketplace
                .insert_blog_post(author.id, "draft", PostStatus::Draft)
                .await?;
            marketplace
                .insert_blog_post(author.id, "submitted", PostStatus::Submitted)
                .await?;

            let repo = BlogPostRepository::new(&test.db);
            let posts = repo.list_published().await?;

            assert_eq!(posts.len(), 1);
            assert_eq!(posts[0].id, published.id);

            Ok(())
        }
    }
}
