//! Slang entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use zlang_core::domain::Votes;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "slangs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub term: String,
    #[sea_orm(column_type = "Text")]
    pub meaning: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub example: Option<String>,
    pub author_id: Uuid,
    pub upvoted_by: Vec<Uuid>,
    pub downvoted_by: Vec<Uuid>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

// No cascade: slangs outlive their author and show up as "Unknown".
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AuthorId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for zlang_core::domain::Slang {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            term: model.term,
            meaning: model.meaning,
            example: model.example,
            author_id: model.author_id,
            votes: Votes::from_parts(
                model.upvoted_by.into_iter().collect(),
                model.downvoted_by.into_iter().collect(),
            ),
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<zlang_core::domain::Slang> for ActiveModel {
    fn from(slang: zlang_core::domain::Slang) -> Self {
        let (upvoted_by, downvoted_by) = slang.votes.into_parts();
        Self {
            id: Set(slang.id),
            term: Set(slang.term),
            meaning: Set(slang.meaning),
            example: Set(slang.example),
            author_id: Set(slang.author_id),
            upvoted_by: Set(upvoted_by.into_iter().collect()),
            downvoted_by: Set(downvoted_by.into_iter().collect()),
            created_at: Set(slang.created_at.into()),
            updated_at: Set(slang.updated_at.into()),
        }
    }
}
