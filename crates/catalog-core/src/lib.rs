pub mod app_config;
pub mod catalog;
pub mod config;
pub mod dataset;
pub mod products;
pub mod sellers;

pub use app_config::{AppConfig, Environment};
pub use catalog::{
    list_products, related_products, resolve_product, ListParams, ProductKey,
    DEFAULT_LIST_LIMIT, DEFAULT_RELATED_LIMIT, MAX_LIST_LIMIT, MAX_RELATED_LIMIT,
};
pub use config::{load_app_config, load_app_config_from_env};
pub use dataset::{check_product, load_dataset, parse_dataset, Dataset};
pub use products::{
    PaymentMethod, Product, ProductCategory, ProductFeature, ProductImage, ProductSummary, Seller,
    Timestamp,
};
pub use sellers::{seller_report, SellerGroup, SellerReport};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Failures while reading the product dataset from disk.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("product data file not found: {path}")]
    MissingFile { path: String },

    #[error("failed to read product data file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode product data: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("product {product_id} is invalid: {reason}")]
    InvalidProduct { product_id: i64, reason: String },
}

impl DatasetError {
    /// `true` when the file itself could not be found, as opposed to a file
    /// that exists but cannot be read or decoded.
    #[must_use]
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::MissingFile { .. })
    }
}
