use crate::models::RecordStatus;
use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};

/// Sea-ORM Entity for the sellers table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sellers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub username: String,
    pub password_hash: String,
    pub status: RecordStatus,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::Seller {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            username: model.username,
            password_hash: model.password_hash,
            status: model.status,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<crate::models::Seller> for ActiveModel {
    fn from(seller: crate::models::Seller) -> Self {
        ActiveModel {
            id: Set(seller.id),
            name: Set(seller.name),
            username: Set(seller.username),
            password_hash: Set(seller.password_hash),
            status: Set(seller.status),
            created_at: Set(seller.created_at.into()),
            updated_at: Set(seller.updated_at.into()),
        }
    }
}
