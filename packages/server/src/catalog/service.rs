use common::storage::{
    ImageStore, file_name_from_reference, image_file_name, image_reference, validate_file_name,
};
use sea_orm::{ConnectionTrait, Set};
use tracing::{info, warn};

use super::error::{CatalogError, Result};
use super::store::{ChemicalPage, ChemicalStore};
use crate::entity::chemical;
use crate::label::{Label, LabelEncoder};
use crate::models::chemical::CreateChemicalRequest;

/// What happened to a chemical's image file during delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageCleanup {
    /// The referenced file was removed.
    Removed,
    /// The referenced file did not exist.
    Missing,
    /// The record had no usable image reference.
    Skipped,
    /// Removing the file failed; the record was deleted anyway.
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteOutcome {
    pub id: i32,
    pub image: ImageCleanup,
}

/// Orchestrates the record store, the image store and the label encoder.
///
/// New ids are computed as `max(id) + 1` before the insert. Two concurrent
/// creates can compute the same id; the primary key rejects the second one,
/// which then surfaces as a database error.
pub struct CatalogService<'a, C: ConnectionTrait> {
    store: ChemicalStore<'a, C>,
    images: &'a dyn ImageStore,
    url_prefix: &'a str,
    labels: LabelEncoder,
}

impl<'a, C: ConnectionTrait> CatalogService<'a, C> {
    pub fn new(
        conn: &'a C,
        images: &'a dyn ImageStore,
        url_prefix: &'a str,
        labels: LabelEncoder,
    ) -> Self {
        Self {
            store: ChemicalStore::new(conn),
            images,
            url_prefix,
            labels,
        }
    }

    pub async fn list(&self, page: u64, size: u64) -> Result<ChemicalPage> {
        Ok(self.store.list_page(page, size).await?)
    }

    pub async fn get(&self, id: i32) -> Result<chemical::Model> {
        self.store
            .get_by_id(id)
            .await?
            .ok_or_else(|| CatalogError::NotFound(format!("Chemical with id '{id}' not found")))
    }

    pub async fn find_by_identifier(&self, token: &str) -> Result<chemical::Model> {
        self.store
            .find_by_any_identifier(token)
            .await?
            .ok_or_else(|| {
                CatalogError::NotFound(format!(
                    "No chemical with CAS number, name or English name '{token}'"
                ))
            })
    }

    pub async fn label(&self, id: i32) -> Result<Label> {
        let record = self.get(id).await?;
        Ok(self.labels.encode(&record)?)
    }

    /// Persist a new chemical and, when `image` is non-empty, store it as
    /// `<cas_number>.png`. The registry number must then be a safe file name.
    ///
    /// A failed image write leaves the already inserted row in place.
    pub async fn create(
        &self,
        request: CreateChemicalRequest,
        image: Option<Vec<u8>>,
    ) -> Result<chemical::Model> {
        let cas_number = request
            .cas_number
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| CatalogError::Validation("casNumber is required".into()))?
            .to_string();
        let file_name = image_file_name(&cas_number);
        let image = image.filter(|b| !b.is_empty());
        if image.is_some() {
            validate_file_name(&file_name).map_err(|e| {
                CatalogError::Validation(format!("casNumber is not usable as a file name: {e}"))
            })?;
        }

        let id = self.store.highest_id().await?.map_or(1, |max| max + 1);

        let structure_image = match request.structure_image {
            Some(path) if !path.trim().is_empty() => path,
            _ => image_reference(self.url_prefix, &file_name),
        };

        let saved = self
            .store
            .insert(chemical::ActiveModel {
                id: Set(id),
                cas_number: Set(Some(cas_number)),
                name: Set(request.name),
                english_name: Set(request.english_name),
                concentration: Set(request.concentration),
                specification: Set(request.specification),
                weight: Set(request.weight),
                formula: Set(request.formula),
                manufacturer: Set(request.manufacturer),
                structure_image: Set(structure_image),
                product_number: Set(request.product_number),
                category: Set(request.category),
                batch_number: Set(request.batch_number),
                storage_time: Set(request.storage_time),
                remark: Set(request.remark),
            })
            .await?;

        let Some(bytes) = image else {
            return Ok(saved);
        };

        let path = self.images.write(&file_name, &bytes).await?;
        info!(id, path = %path.display(), "stored chemical image");

        let reference = image_reference(self.url_prefix, &file_name);
        Ok(self.store.set_structure_image(saved, reference).await?)
    }

    /// Delete a chemical. The image file is removed best-effort first; its
    /// failure is reported in the outcome, never as an error.
    pub async fn delete(&self, id: i32) -> Result<DeleteOutcome> {
        let record = self.get(id).await?;
        let image = self.remove_image(&record).await;

        if !self.store.delete_by_id(id).await? {
            return Err(CatalogError::NotFound(format!(
                "Chemical with id '{id}' not found"
            )));
        }

        Ok(DeleteOutcome { id, image })
    }

    async fn remove_image(&self, record: &chemical::Model) -> ImageCleanup {
        let file_name = file_name_from_reference(&record.structure_image);
        if file_name.is_empty() {
            return ImageCleanup::Skipped;
        }

        match self.images.delete(file_name).await {
            Ok(true) => ImageCleanup::Removed,
            Ok(false) => ImageCleanup::Missing,
            Err(e) => {
                warn!(id = record.id, file_name, error = %e, "failed to remove chemical image");
                ImageCleanup::Failed(e.to_string())
            }
        }
    }
}
