//! User entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub username: String,
    pub password_hash: String,
    pub saved_slang_ids: Vec<Uuid>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::slang::Entity")]
    Slang,
}

impl Related<super::slang::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Slang.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for zlang_core::domain::User {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            username: model.username,
            password_hash: model.password_hash,
            saved_slang_ids: model.saved_slang_ids.into_iter().collect(),
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<zlang_core::domain::User> for ActiveModel {
    fn from(user: zlang_core::domain::User) -> Self {
        Self {
            id: Set(user.id),
            name: Set(user.name),
            username: Set(user.username),
            password_hash: Set(user.password_hash),
            saved_slang_ids: Set(user.saved_slang_ids.into_iter().collect()),
            created_at: Set(user.created_at.into()),
            updated_at: Set(user.updated_at.into()),
        }
    }
}
