//! Sea-ORM entities for the orders and order_items tables.

/// Sea-ORM Entity for the orders table
pub mod order {
    use crate::models::OrderType;
    use sea_orm::entity::prelude::*;
    use sea_orm::ActiveValue::Set;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "orders")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub seller_id: Uuid,
        pub order_type: OrderType,
        #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
        pub total_price: Decimal,
        pub created_at: DateTimeWithTimeZone,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_many = "super::order_item::Entity")]
        OrderItems,
    }

    impl Related<super::order_item::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::OrderItems.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}

    impl From<Model> for crate::models::Order {
        fn from(model: Model) -> Self {
            Self {
                id: model.id,
                seller_id: model.seller_id,
                order_type: model.order_type,
                total_price: model.total_price,
                created_at: model.created_at.into(),
            }
        }
    }

    impl From<crate::models::Order> for ActiveModel {
        fn from(order: crate::models::Order) -> Self {
            ActiveModel {
                id: Set(order.id),
                seller_id: Set(order.seller_id),
                order_type: Set(order.order_type),
                total_price: Set(order.total_price),
                created_at: Set(order.created_at.into()),
            }
        }
    }
}

/// Sea-ORM Entity for the order_items table
pub mod order_item {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "order_items")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub order_id: Uuid,
        pub product_id: Uuid,
        pub quantity: i32,
        #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
        pub price_at_time: Decimal,
        #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
        pub line_total: Decimal,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::order::Entity",
            from = "Column::OrderId",
            to = "super::order::Column::Id"
        )]
        Order,
    }

    impl Related<super::order::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Order.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}
