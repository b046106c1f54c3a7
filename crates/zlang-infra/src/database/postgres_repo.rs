//! PostgreSQL repository implementations.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, FromQueryResult, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use zlang_core::domain::{AuthorCount, Slang, SlangDraft, User, VoteDirection};
use zlang_core::error::RepoError;
use zlang_core::ports::{SlangRepository, UserRepository};

use super::entity::slang::{self, Entity as SlangEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::mask_username;
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL slang repository.
pub type PostgresSlangRepository = PostgresBaseRepository<SlangEntity>;

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(username = %mask_username(username), "Finding user by username");

        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_all_by_id(&self, ids: &[Uuid]) -> Result<Vec<User>, RepoError> {
        let result = UserEntity::find()
            .filter(user::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[derive(Debug, FromQueryResult)]
struct AuthorCountRow {
    author_id: Uuid,
    slang_count: i64,
}

/// Escape LIKE wildcards so the query is matched literally.
fn like_pattern(query: &str) -> String {
    let escaped = query
        .to_lowercase()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

#[async_trait]
impl SlangRepository for PostgresSlangRepository {
    async fn search_by_term(&self, query: &str) -> Result<Vec<Slang>, RepoError> {
        let term_matches = Expr::expr(Func::lower(Expr::col(slang::Column::Term)))
            .like(LikeExpr::new(like_pattern(query)).escape('\\'));

        let result = SlangEntity::find()
            .filter(term_matches)
            .order_by_asc(slang::Column::CreatedAt)
            .order_by_asc(slang::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_by_author_id(&self, author_id: Uuid) -> Result<Vec<Slang>, RepoError> {
        let result = SlangEntity::find()
            .filter(slang::Column::AuthorId.eq(author_id))
            .order_by_asc(slang::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_all_by_id(&self, ids: &[Uuid]) -> Result<Vec<Slang>, RepoError> {
        let result = SlangEntity::find()
            .filter(slang::Column::Id.is_in(ids.iter().copied()))
            .order_by_asc(slang::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn count_by_author(&self) -> Result<Vec<AuthorCount>, RepoError> {
        let rows = SlangEntity::find()
            .select_only()
            .column(slang::Column::AuthorId)
            .column_as(slang::Column::Id.count(), "slang_count")
            .group_by(slang::Column::AuthorId)
            .into_model::<AuthorCountRow>()
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(rows
            .into_iter()
            .map(|row| AuthorCount {
                author_id: row.author_id,
                slang_count: u64::try_from(row.slang_count).unwrap_or_default(),
            })
            .collect())
    }

    async fn update_content(
        &self,
        slang_id: Uuid,
        draft: SlangDraft,
    ) -> Result<Option<Slang>, RepoError> {
        // Vote columns stay NotSet so concurrent votes are not overwritten.
        let active = slang::ActiveModel {
            id: Set(slang_id),
            term: Set(draft.term),
            meaning: Set(draft.meaning),
            example: Set(draft.example),
            updated_at: Set(Utc::now().into()),
            ..Default::default()
        };

        match active.update(&self.db).await {
            Ok(model) => Ok(Some(model.into())),
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(map_db_err(e)),
        }
    }

    async fn apply_vote(
        &self,
        slang_id: Uuid,
        user_id: Uuid,
        direction: VoteDirection,
    ) -> Result<Option<Slang>, RepoError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        // Row lock serializes concurrent voters on the same slang.
        let Some(model) = SlangEntity::find_by_id(slang_id)
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(map_db_err)?
        else {
            txn.rollback().await.map_err(map_db_err)?;
            return Ok(None);
        };

        let mut slang: Slang = model.into();
        slang.cast_vote(user_id, direction);

        let active: slang::ActiveModel = slang.into();
        let updated = active.update(&txn).await.map_err(map_db_err)?;
        txn.commit().await.map_err(map_db_err)?;

        Ok(Some(updated.into()))
    }
}
