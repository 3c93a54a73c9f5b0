use chrono::Utc;
use entity::sea_orm_active_enums::PostStatus;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder,
};

use crate::model::content::PostInput;

pub struct CommunityPostRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CommunityPostRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        author_id: i32,
        input: PostInput,
    ) -> Result<entity::community_post::Model, DbErr> {
        let now = Utc::now().naive_utc();

        let post = entity::community_post::ActiveModel {
            author_id: ActiveValue::Set(author_id),
            title: ActiveValue::Set(input.title),
            content: ActiveValue::Set(input.content),
            status: ActiveValue::Set(PostStatus::Draft),
            rejection_reason: ActiveValue::Set(None),
            published_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        post.insert(self.db).await
    }

    pub async fn update(
        &self,
        post: entity::community_post::Model,
        input: PostInput,
    ) -> Result<entity::community_post::Model, DbErr> {
        let mut post_am = post.into_active_model();
        post_am.title = ActiveValue::Set(input.title);
        post_am.content = ActiveValue::Set(input.content);
        post_am.status = ActiveValue::Set(PostStatus::Draft);
        post_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        post_am.update(self.db).await
    }

    /// Moves the post to `status`, see [`super::blog_post::BlogPostRepository::set_status`]
    pub async fn set_status(
        &self,
        post: entity::community_post::Model,
        status: PostStatus,
        rejection_reason: Option<String>,
    ) -> Result<entity::community_post::Model, DbErr> {
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

    pub async fn get(
        &self,
        post_id: i32,
    ) -> Result<Option<entity::community_post::Model>, DbErr> {
        entity::prelude::CommunityPost::find_by_id(post_id)
            .one(self.db)
            .await
    }

    pub async fn list_published(&self) -> Result<Vec<entity::community_post::Model>, DbErr> {
        entity::prelude::CommunityPost::find()
            .filter(entity::community_post::Column::Status.eq(PostStatus::Published))
            .order_by_desc(entity::community_post::Column::PublishedAt)
            .order_by_desc(entity::community_post::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn list_submitted(&self) -> Result<Vec<entity::community_post::Model>, DbErr> {
        entity::prelude::CommunityPost::find()
            .filter(entity::community_post::Column::Status.eq(PostStatus::Submitted))
            .order_by_asc(entity::community_post::Column::UpdatedAt)
            .order_by_asc(entity::community_post::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn list_for_author(
        &self,
        author_id: i32,
    ) -> Result<Vec<entity::community_post::Model>, DbErr> {
        entity::prelude::CommunityPost::find()
            .filter(entity::community_post::Column::AuthorId.eq(author_id))
            .order_by_desc(entity::community_post::Column::UpdatedAt)
            .order_by_desc(entity::community_post::Column::Id)
            .all(self.db)
            .await
    }
}
