use axum::Json;
use axum::extract::{DefaultBodyLimit, Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::catalog::ImageCleanup;
use crate::error::{AppError, ErrorBody};
use crate::models::chemical::*;
use crate::state::AppState;

/// Headroom for the `chemicalData` part and multipart framing on top of the image.
const FORM_OVERHEAD: usize = 64 * 1024;

pub fn upload_body_limit(max_image_size: usize) -> DefaultBodyLimit {
    DefaultBodyLimit::max(max_image_size + FORM_OVERHEAD)
}

#[utoipa::path(
    get,
    path = "/chemicals",
    tag = "Chemicals",
    operation_id = "listChemicals",
    summary = "List chemicals page by page",
    description = "Returns one zero-based page of chemicals ordered by id, with formatted ids.",
    params(ChemicalListQuery),
    responses(
        (status = 200, description = "Page of chemicals", body = ChemicalListResponse),
        (status = 400, description = "Invalid page size (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query), fields(page = ?query.page, size = ?query.size))]
pub async fn list_chemicals(
    State(state): State<AppState>,
    Query(query): Query<ChemicalListQuery>,
) -> Result<Json<ChemicalListResponse>, AppError> {
    let page = query.page.unwrap_or(0);
    let size = validate_page_size(query.size.unwrap_or(DEFAULT_PAGE_SIZE))?;

    let result = state.catalog().list(page, size).await?;

    Ok(Json(ChemicalListResponse {
        chemicals: result.items.into_iter().map(ChemicalView::from).collect(),
        pagination: Pagination {
            current_page: page,
            total_pages: result.total_pages,
            total_elements: result.total_elements,
            size,
        },
    }))
}

#[utoipa::path(
    get,
    path = "/chemical/{id}",
    tag = "Chemicals",
    operation_id = "getChemical",
    summary = "Get a chemical by id",
    params(("id" = i32, Path, description = "Chemical ID")),
    responses(
        (status = 200, description = "Chemical view", body = ChemicalView),
        (status = 404, description = "Chemical not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_chemical(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ChemicalView>, AppError> {
    let model = state.catalog().get(id).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    get,
    path = "/chemical",
    tag = "Chemicals",
    operation_id = "findChemical",
    summary = "Look up a chemical by CAS number or name",
    description = "Exact match against CAS number, local name or English name. \
        When several chemicals match, the one with the lowest id is returned.",
    params(IdentifierQuery),
    responses(
        (status = 200, description = "Stored chemical", body = ChemicalRecord),
        (status = 404, description = "No chemical matches (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query), fields(identifier = %query.identifier))]
pub async fn find_chemical(
    State(state): State<AppState>,
    Query(query): Query<IdentifierQuery>,
) -> Result<Json<ChemicalRecord>, AppError> {
    let model = state
        .catalog()
        .find_by_identifier(&query.identifier)
        .await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    get,
    path = "/chemical/qr/{id}",
    tag = "Chemicals",
    operation_id = "getChemicalLabel",
    summary = "Render a chemical's QR label",
    description = "Returns a base64 PNG QR code and the text it encodes.",
    params(("id" = i32, Path, description = "Chemical ID")),
    responses(
        (status = 200, description = "QR label", body = LabelResponse),
        (status = 404, description = "Chemical not found (NOT_FOUND)", body = ErrorBody),
        (status = 500, description = "Label could not be rendered (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_chemical_label(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<LabelResponse>, AppError> {
    let label = state.catalog().label(id).await?;
    Ok(Json(LabelResponse {
        qr_code: label.png_base64(),
        data: label.text,
    }))
}

#[utoipa::path(
    post,
    path = "/chemical",
    tag = "Chemicals",
    operation_id = "createChemical",
    summary = "Add a chemical with an optional structure image",
    description = "The `chemicalData` part carries the chemical as JSON and is required. \
        The optional `imageFile` part is stored as `<casNumber>.png` under the image root. \
        Any id in `chemicalData` is ignored; the new id is one above the current maximum.",
    request_body(content_type = "multipart/form-data", description = "chemicalData (JSON) plus optional imageFile"),
    responses(
        (status = 201, description = "Chemical created", body = ChemicalRecord),
        (status = 400, description = "Malformed form or chemical data (VALIDATION_ERROR)", body = ErrorBody),
        (status = 500, description = "Storing the chemical or its image failed (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, multipart))]
pub async fn create_chemical(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut request: Option<CreateChemicalRequest> = None;
    let mut image: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
    {
        match field.name() {
            Some("chemicalData") => {
                let bytes = field.bytes().await.map_err(|e| {
                    AppError::Validation(format!("Failed to read chemicalData: {e}"))
                })?;
                let parsed = serde_json::from_slice(&bytes)
                    .map_err(|e| AppError::Validation(format!("Invalid chemicalData: {e}")))?;
                request = Some(parsed);
            }
            Some("imageFile") => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read imageFile: {e}")))?;
                image = Some(bytes.to_vec());
            }
            _ => {} // Ignore unknown fields.
        }
    }

    let request =
        request.ok_or_else(|| AppError::Validation("Missing 'chemicalData' field".into()))?;

    let model = state.catalog().create(request, image).await?;

    Ok((StatusCode::CREATED, Json(ChemicalRecord::from(model))))
}

#[utoipa::path(
    delete,
    path = "/chemical/{id}",
    tag = "Chemicals",
    operation_id = "deleteChemical",
    summary = "Delete a chemical and its image",
    description = "Deletes the chemical. Its image file is removed when present; \
        failure to remove the file is logged and does not prevent the delete.",
    params(("id" = i32, Path, description = "Chemical ID")),
    responses(
        (status = 200, description = "Confirmation message", body = String, content_type = "text/plain"),
        (status = 404, description = "Chemical not found (NOT_FOUND)", body = ErrorBody),
        (status = 500, description = "Database delete failed (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn delete_chemical(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<String, AppError> {
    let outcome = state.catalog().delete(id).await?;

    let formatted = format_id(outcome.id);
    Ok(match outcome.image {
        ImageCleanup::Removed => format!("Chemical {formatted} and its image were deleted"),
        _ => format!("Chemical {formatted} was deleted"),
    })
}
