use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One catalogued chemical.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "chemicals")]
pub struct Model {
    /// Assigned by the service as `max(id) + 1`, never by the database.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,

    /// CAS registry number. Also names the stored image.
    #[sea_orm(indexed)]
    pub cas_number: Option<String>,

    /// Local (Chinese) name.
    #[sea_orm(indexed)]
    pub name: Option<String>,

    #[sea_orm(indexed)]
    pub english_name: Option<String>,

    pub concentration: Option<String>,
    pub specification: Option<String>,

    /// Molecular weight, kept as free text.
    pub weight: Option<String>,

    pub formula: Option<String>,
    pub manufacturer: Option<String>,

    /// Public image path, conventionally `/img/<cas_number>.png`.
    #[sea_orm(column_name = "molecular_structure_image")]
    pub structure_image: String,

    pub product_number: Option<String>,
    pub category: Option<String>,
    pub batch_number: Option<String>,
    pub storage_time: Option<DateTime>,

    #[sea_orm(column_type = "Text")]
    pub remark: Option<String>,
}

impl ActiveModelBehavior for ActiveModel {}
