use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "variant")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub product_id: i32,
    pub color: String,
    pub is_active: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Product,
    #[sea_orm(has_many = "super::variant_size::Entity")]
    VariantSize,
    #[sea_orm(has_many = "super::variant_image::Entity")]
    VariantImage,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl Related<super::variant_size::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VariantSize.def()
    }
}

impl Related<super::variant_image::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VariantImage.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
