use std::path::Path;

use serde::Deserialize;
use serde_json::{json, Value};

use crate::products::Product;
use crate::DatasetError;

/// The parsed contents of the product data file.
#[derive(Debug, Clone, Deserialize)]
pub struct Dataset {
    pub products: Vec<Product>,
    /// Payment-method catalog, kept as raw JSON because it is served verbatim.
    #[serde(default)]
    pub payment_methods: Option<Value>,
}

impl Dataset {
    /// The `payment_methods` document, or an empty catalog when the dataset
    /// does not define one.
    #[must_use]
    pub fn payment_methods_or_empty(&self) -> Value {
        self.payment_methods.clone().unwrap_or_else(|| {
            json!({
                "credit_cards": [],
                "debit_cards": [],
                "cash": [],
            })
        })
    }

    /// Check every product's value invariants, stopping at the first
    /// violation.
    ///
    /// # Errors
    ///
    /// Returns the [`check_product`] error of the first invalid product.
    pub fn validate(&self) -> Result<(), DatasetError> {
        self.products.iter().try_for_each(check_product)
    }
}

/// Decode a dataset from raw JSON bytes.
///
/// Value invariants are not checked here; see [`check_product`] and
/// [`Dataset::validate`].
///
/// # Errors
///
/// Returns [`DatasetError::Malformed`] if the bytes are not a valid dataset
/// document.
pub fn parse_dataset(bytes: &[u8]) -> Result<Dataset, DatasetError> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Read and decode the dataset file at `path`.
///
/// # Errors
///
/// Returns [`DatasetError::MissingFile`] if the file does not exist,
/// [`DatasetError::Io`] for any other read failure, and the errors of
/// [`parse_dataset`] otherwise.
pub fn load_dataset(path: &Path) -> Result<Dataset, DatasetError> {
    let bytes = std::fs::read(path).map_err(|e| io_error(path, e))?;
    parse_dataset(&bytes)
}

/// Map a read failure on `path` to the matching [`DatasetError`].
#[must_use]
pub fn io_error(path: &Path, source: std::io::Error) -> DatasetError {
    let path = path.display().to_string();
    if source.kind() == std::io::ErrorKind::NotFound {
        DatasetError::MissingFile { path }
    } else {
        DatasetError::Io { path, source }
    }
}

/// Check the value invariants of a single product.
///
/// # Errors
///
/// Returns [`DatasetError::InvalidProduct`] naming the product and the first
/// violated invariant.
pub fn check_product(product: &Product) -> Result<(), DatasetError> {
    product
        .validate()
        .map_err(|reason| DatasetError::InvalidProduct {
            product_id: product.id,
            reason,
        })
}
