use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "product")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(unique)]
    pub slug: String,
    pub description: String,
    pub category: String,
    /// Listed price in minor currency units.
    pub price: i64,
    pub discount_percent: i32,
    pub hsn_code: String,
    pub is_active: bool,
    /// Materialized sum of stock across active variants; owned by the stock
    /// aggregator, never written directly by catalog or cart code.
    pub available_stock: i64,
    pub has_stock: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::variant::Entity")]
    Variant,
    #[sea_orm(has_many = "super::product_image::Entity")]
    ProductImage,
}

impl Related<super::variant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Variant.def()
    }
}

impl Related<super::product_image::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductImage.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Discount-adjusted price, derived at read time and never stored.
    pub fn final_price(&self) -> i64 {
        if self.discount_percent == 0 {
            return self.price;
        }
        self.price - (self.price * self.discount_percent as i64 + 50) / 100
    }
}
