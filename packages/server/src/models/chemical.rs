use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::entity::chemical;

pub use super::shared::{DEFAULT_PAGE_SIZE, Pagination, validate_page_size};

/// Display format for storage timestamps in views.
const STORAGE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Zero-padded, seven-digit rendering of a chemical id (`42` -> `"0000042"`).
pub fn format_id(id: i32) -> String {
    format!("{id:07}")
}

/// Fields accepted in the `chemicalData` part of a create request.
///
/// Any `id` sent by the client is ignored; the service assigns one.
#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateChemicalRequest {
    #[schema(example = "71-43-2")]
    pub cas_number: Option<String>,
    #[schema(example = "苯")]
    pub name: Option<String>,
    #[schema(example = "Benzene")]
    pub english_name: Option<String>,
    pub concentration: Option<String>,
    pub specification: Option<String>,
    pub weight: Option<String>,
    #[schema(example = "C6H6")]
    pub formula: Option<String>,
    pub manufacturer: Option<String>,
    /// Explicit image path. Defaults to `/img/<casNumber>.png` when blank.
    #[serde(alias = "molecularStructureImage")]
    pub structure_image: Option<String>,
    pub product_number: Option<String>,
    pub category: Option<String>,
    pub batch_number: Option<String>,
    pub storage_time: Option<NaiveDateTime>,
    pub remark: Option<String>,
}

/// A persisted chemical as stored, with its numeric id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChemicalRecord {
    #[schema(example = 42)]
    pub id: i32,
    pub cas_number: Option<String>,
    pub name: Option<String>,
    pub english_name: Option<String>,
    pub concentration: Option<String>,
    pub specification: Option<String>,
    pub weight: Option<String>,
    pub formula: Option<String>,
    pub manufacturer: Option<String>,
    #[serde(rename = "molecularStructureImage")]
    #[schema(example = "/img/71-43-2.png")]
    pub structure_image: String,
    pub product_number: Option<String>,
    pub category: Option<String>,
    pub batch_number: Option<String>,
    pub storage_time: Option<NaiveDateTime>,
    pub remark: Option<String>,
}

impl From<chemical::Model> for ChemicalRecord {
    fn from(model: chemical::Model) -> Self {
        Self {
            id: model.id,
            cas_number: model.cas_number,
            name: model.name,
            english_name: model.english_name,
            concentration: model.concentration,
            specification: model.specification,
            weight: model.weight,
            formula: model.formula,
            manufacturer: model.manufacturer,
            structure_image: model.structure_image,
            product_number: model.product_number,
            category: model.category,
            batch_number: model.batch_number,
            storage_time: model.storage_time,
            remark: model.remark,
        }
    }
}

/// Outward projection of a chemical: formatted id and storage time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChemicalView {
    /// Seven-digit, zero-padded id.
    #[schema(example = "0000042")]
    pub id: String,
    pub cas_number: Option<String>,
    pub name: Option<String>,
    pub english_name: Option<String>,
    pub concentration: Option<String>,
    pub specification: Option<String>,
    pub weight: Option<String>,
    pub formula: Option<String>,
    pub manufacturer: Option<String>,
    #[serde(rename = "molecularStructureImage")]
    pub structure_image: String,
    pub product_number: Option<String>,
    pub category: Option<String>,
    pub batch_number: Option<String>,
    /// `YYYY-MM-DD HH:MM:SS`, or null when unknown.
    #[schema(example = "2024-03-01 09:30:00")]
    pub storage_time: Option<String>,
    pub remark: Option<String>,
}

impl From<chemical::Model> for ChemicalView {
    fn from(model: chemical::Model) -> Self {
        Self {
            id: format_id(model.id),
            cas_number: model.cas_number,
            name: model.name,
            english_name: model.english_name,
            concentration: model.concentration,
            specification: model.specification,
            weight: model.weight,
            formula: model.formula,
            manufacturer: model.manufacturer,
            structure_image: model.structure_image,
            product_number: model.product_number,
            category: model.category,
            batch_number: model.batch_number,
            storage_time: model
                .storage_time
                .map(|t| t.format(STORAGE_TIME_FORMAT).to_string()),
            remark: model.remark,
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ChemicalListResponse {
    pub chemicals: Vec<ChemicalView>,
    #[serde(flatten)]
    pub pagination: Pagination,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ChemicalListQuery {
    /// Zero-based page index. Default: 0.
    pub page: Option<u64>,
    /// Page size. Default: 10.
    pub size: Option<u64>,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct IdentifierQuery {
    /// CAS number, local name or foreign name (exact match).
    pub identifier: String,
}

/// QR label response.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LabelResponse {
    /// Base64-encoded PNG.
    pub qr_code: String,
    /// The text encoded in the QR code.
    pub data: String,
}
