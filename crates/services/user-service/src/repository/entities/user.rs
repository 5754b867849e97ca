//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::{Action, DomainError, RoleSet, Status, User};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub email: String,
    /// Role bit-mask
    pub roles: i32,
    pub status: i32,
    pub action: i32,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl TryFrom<Model> for User {
    type Error = DomainError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(User {
            id: model.id,
            name: model.name,
            email: model.email,
            roles: RoleSet::from_bits(i64::from(model.roles))?,
            status: Status::try_from(i64::from(model.status))?,
            action: Action::try_from(i64::from(model.action))?,
            created_at: model.created_at,
        })
    }
}
