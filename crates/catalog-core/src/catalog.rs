//! Listing, lookup and related-product selection over an in-memory product
//! list. Everything here is a pure function of its inputs.

use crate::products::{Product, ProductSummary};

pub const DEFAULT_LIST_LIMIT: usize = 20;
pub const MAX_LIST_LIMIT: usize = 100;
pub const DEFAULT_RELATED_LIMIT: usize = 15;
pub const MAX_RELATED_LIMIT: usize = 25;

/// How a path identifier is matched against product ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductKey<'a> {
    /// The identifier, ignoring surrounding whitespace, parsed as an integer;
    /// compared against `Product::id`.
    Numeric(i64),
    /// Anything else; compared against the stringified id.
    Text(&'a str),
}

impl<'a> ProductKey<'a> {
    #[must_use]
    pub fn parse(raw: &'a str) -> Self {
        match raw.trim().parse::<i64>() {
            Ok(id) => Self::Numeric(id),
            Err(_) => Self::Text(raw),
        }
    }

    fn matches(self, product: &Product) -> bool {
        match self {
            Self::Numeric(id) => product.id == id,
            Self::Text(raw) => product.id.to_string() == raw,
        }
    }
}

/// Find the first product whose id matches `raw`.
///
/// A numeric identifier is only compared numerically; the textual
/// comparison is used only when `raw` does not parse as an integer.
#[must_use]
pub fn resolve_product<'p>(products: &'p [Product], raw: &str) -> Option<&'p Product> {
    let key = ProductKey::parse(raw);
    products.iter().find(|p| key.matches(p))
}

/// Validated listing parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListParams {
    pub limit: usize,
    pub offset: usize,
    pub search: Option<String>,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIST_LIMIT,
            offset: 0,
            search: None,
        }
    }
}

/// Filter by `search` (title or description, case-insensitive), then take
/// the `[offset, offset + limit)` window in dataset order.
#[must_use]
pub fn list_products(products: &[Product], params: &ListParams) -> Vec<ProductSummary> {
    let needle = params
        .search
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    products
        .iter()
        .filter(|p| needle.as_deref().is_none_or(|n| p.matches_search(n)))
        .skip(params.offset)
        .take(params.limit)
        .map(ProductSummary::from)
        .collect()
}

/// Every other product, those sold under the same seller name as `base`
/// first, each group in dataset order, truncated to `limit`.
#[must_use]
pub fn related_products(products: &[Product], base: &Product, limit: usize) -> Vec<ProductSummary> {
    let (same_seller, others): (Vec<&Product>, Vec<&Product>) = products
        .iter()
        .filter(|p| p.id != base.id)
        .partition(|p| p.seller.name == base.seller.name);

    same_seller
        .into_iter()
        .chain(others)
        .take(limit)
        .map(ProductSummary::from)
        .collect()
}
