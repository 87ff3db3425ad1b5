use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "properties")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub title: String,

    pub description: String,

    pub location: String,

    pub marla_size: i32,

    pub property_type: String,

    pub society: String,

    pub price: i64,

    pub price_type: String,

    /// JSON array of `{filename, originalName, path, uploadedAt}`
    #[sea_orm(column_type = "Text")]
    pub images: String,

    /// JSON array of feature names
    #[sea_orm(column_type = "Text")]
    pub features: String,

    pub status: String,

    pub contact_name: Option<String>,

    pub contact_phone: Option<String>,

    pub contact_email: Option<String>,

    pub created_at: String,

    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
