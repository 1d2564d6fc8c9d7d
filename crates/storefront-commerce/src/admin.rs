//! 3D model library for the admin panel.
//!
//! Tracks uploaded model assets and which product each one previews.

use std::fmt;

use crate::catalog::{Catalog, Product};
use crate::error::CommerceError;
use crate::ids::{ModelId, ProductId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Supported model file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelFormat {
    /// Binary glTF.
    Glb,
    /// JSON glTF.
    Gltf,
}

impl ModelFormat {
    /// Detect the format from a file name's extension, case-insensitively.
    pub fn from_file_name(name: &str) -> Result<Self, CommerceError> {
        let ext = name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase());
        match ext.as_deref() {
            Some("glb") => Ok(ModelFormat::Glb),
            Some("gltf") => Ok(ModelFormat::Gltf),
            _ => Err(CommerceError::UnsupportedModelFormat(name.to_string())),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ModelFormat::Glb => "glb",
            ModelFormat::Gltf => "gltf",
        }
    }
}

/// An uploaded 3D model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelAsset {
    pub id: ModelId,
    /// File name, e.g. `lamp.glb`.
    pub name: String,
    pub file_url: String,
    /// Product this model previews, if linked.
    pub product_id: Option<ProductId>,
    pub file_size_bytes: u64,
    pub date_added: NaiveDate,
}

impl ModelAsset {
    pub fn format(&self) -> Result<ModelFormat, CommerceError> {
        ModelFormat::from_file_name(&self.name)
    }

    /// Size in megabytes with one decimal, e.g. "2.4 MB".
    pub fn display_size(&self) -> String {
        format!("{:.1} MB", self.file_size_bytes as f64 / 1_000_000.0)
    }
}

/// The set of uploaded models, in upload order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelLibrary {
    models: Vec<ModelAsset>,
}

impl ModelLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// The library the admin panel starts with.
    pub fn seeded() -> Self {
        let seed = [
            ("model-1", "lamp.glb", "1", 2_400_000, (2023, 6, 12)),
            ("model-2", "chair.glb", "2", 3_800_000, (2023, 5, 22)),
            ("model-3", "coffee.glb", "3", 1_600_000, (2023, 7, 5)),
        ];
        let models = seed
            .into_iter()
            .filter_map(|(id, name, product, size, (y, m, d))| {
                Some(ModelAsset {
                    id: ModelId::new(id),
                    name: name.to_string(),
                    file_url: format!("/models/{}", name),
                    product_id: Some(ProductId::new(product)),
                    file_size_bytes: size,
                    date_added: NaiveDate::from_ymd_opt(y, m, d)?,
                })
            })
            .collect();
        Self { models }
    }

    pub fn models(&self) -> &[ModelAsset] {
        &self.models
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn get(&self, id: &ModelId) -> Option<&ModelAsset> {
        self.models.iter().find(|m| &m.id == id)
    }

    /// Add an unlinked model. Only GLB and GLTF files are accepted.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        file_url: impl Into<String>,
        file_size_bytes: u64,
        date_added: NaiveDate,
    ) -> Result<ModelId, CommerceError> {
        let name = name.into();
        ModelFormat::from_file_name(&name)?;

        let id = ModelId::generate();
        tracing::info!(model_id = %id, name = %name, "model registered");
        self.models.push(ModelAsset {
            id: id.clone(),
            name,
            file_url: file_url.into(),
            product_id: None,
            file_size_bytes,
            date_added,
        });
        Ok(id)
    }

    /// Remove a model and return it.
    pub fn delete(&mut self, id: &ModelId) -> Result<ModelAsset, CommerceError> {
        let index = self
            .models
            .iter()
            .position(|m| &m.id == id)
            .ok_or_else(|| CommerceError::ModelNotFound(id.to_string()))?;
        tracing::info!(model_id = %id, "model deleted");
        Ok(self.models.remove(index))
    }

    /// Link a model to a catalog product, replacing any previous link.
    pub fn link(
        &mut self,
        id: &ModelId,
        product_id: &ProductId,
        catalog: &Catalog,
    ) -> Result<(), CommerceError> {
        if catalog.find(product_id).is_none() {
            return Err(CommerceError::ProductNotFound(product_id.to_string()));
        }
        let model = self.get_mut(id)?;
        model.product_id = Some(product_id.clone());
        tracing::info!(model_id = %id, product_id = %product_id, "model linked");
        Ok(())
    }

    /// Clear a model's product link. Returns the product it was linked to.
    pub fn unlink(&mut self, id: &ModelId) -> Result<Option<ProductId>, CommerceError> {
        Ok(self.get_mut(id)?.product_id.take())
    }

    pub fn linked_product(&self, id: &ModelId) -> Option<&ProductId> {
        self.get(id).and_then(|m| m.product_id.as_ref())
    }

    /// Models linked to `product_id`.
    pub fn models_for<'a>(&'a self, product_id: &'a ProductId) -> impl Iterator<Item = &'a ModelAsset> {
        self.models
            .iter()
            .filter(move |m| m.product_id.as_ref() == Some(product_id))
    }

    fn get_mut(&mut self, id: &ModelId) -> Result<&mut ModelAsset, CommerceError> {
        self.models
            .iter_mut()
            .find(|m| &m.id == id)
            .ok_or_else(|| CommerceError::ModelNotFound(id.to_string()))
    }
}

/// How many catalog products can be previewed in AR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ArCoverage {
    pub with_model: usize,
    pub total: usize,
}

impl ArCoverage {
    /// Whole percentage, rounded down. An empty catalog has 0% coverage.
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        (self.with_model * 100 / self.total) as u32
    }
}

impl fmt::Display for ArCoverage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}% of products have 3D models", self.percent())
    }
}

/// Share of catalog products carrying an AR model reference.
pub fn ar_coverage(catalog: &Catalog) -> ArCoverage {
    let products = catalog.products();
    ArCoverage {
        with_model: products.iter().filter(|p| p.has_ar_model()).count(),
        total: products.len(),
    }
}

/// Products with no AR model reference, in catalog order.
pub fn products_without_models(catalog: &Catalog) -> Vec<&Product> {
    catalog
        .products()
        .iter()
        .filter(|p| !p.has_ar_model())
        .collect()
}
