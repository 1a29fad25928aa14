//! Dataset loading and plain-text rendering for the CLI commands.

use std::path::PathBuf;

use anyhow::Context;
use catalog_core::{Dataset, SellerReport};

const RULE_WIDTH: usize = 50;

/// Load the dataset from `data`, or from the configured data path when no
/// explicit file was given.
///
/// # Errors
///
/// Returns an error if configuration is invalid or the dataset cannot be
/// loaded.
pub(crate) fn load(data: Option<PathBuf>) -> anyhow::Result<Dataset> {
    let path = match data {
        Some(path) => path,
        None => catalog_core::load_app_config()?.data_path,
    };
    tracing::debug!(path = %path.display(), "loading dataset");

    catalog_core::load_dataset(&path)
        .with_context(|| format!("failed to load dataset from {}", path.display()))
}

pub(crate) fn render_sellers(report: &SellerReport) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut lines = vec![
        "PRODUCTS BY SELLER".to_string(),
        rule.clone(),
        format!("Total products: {}", report.total_products),
        format!("Total sellers: {}", report.sellers.len()),
        String::new(),
    ];

    for group in &report.sellers {
        lines.push(format!("{}: {} products", group.seller_name, group.len()));
        lines.extend(
            group
                .products
                .iter()
                .map(|(id, title)| format!("  - ID {id}: {title}")),
        );
        lines.push(String::new());
    }

    lines.push(format!(
        "SELLERS WITH FEWER THAN {} PRODUCTS",
        report.min_products
    ));
    lines.push(rule);
    if report.underfilled.is_empty() {
        lines.push("none".to_string());
    }
    lines.extend(report.underfilled.iter().map(|(seller, missing)| {
        let have = report.min_products - missing;
        format!("{seller}: {have} products (needs {missing} more)")
    }));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Check every product's value invariants.
///
/// # Errors
///
/// Returns an error naming the first product that breaks an invariant.
pub(crate) fn validate(dataset: &Dataset) -> anyhow::Result<()> {
    dataset
        .validate()
        .context("dataset loaded but contains an invalid product")
}

pub(crate) fn render_check(dataset: &Dataset) -> String {
    let sellers = catalog_core::seller_report(&dataset.products, 0).sellers.len();
    let payment_methods = if dataset.payment_methods.is_some() {
        "present"
    } else {
        "absent (empty catalog will be served)"
    };

    format!(
        "ok: {} products from {} sellers\npayment methods: {}\n",
        dataset.products.len(),
        sellers,
        payment_methods
    )
}
