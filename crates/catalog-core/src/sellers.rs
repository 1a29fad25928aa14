use std::collections::BTreeMap;

use serde::Serialize;

use crate::products::Product;

/// Products listed under one seller name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SellerGroup {
    pub seller_name: String,
    /// `(id, title)` pairs in dataset order.
    pub products: Vec<(i64, String)>,
}

impl SellerGroup {
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SellerReport {
    pub total_products: usize,
    /// One entry per distinct seller name, sorted by name.
    pub sellers: Vec<SellerGroup>,
    /// Sellers with fewer than `min_products` listings, paired with how many
    /// more they need, in the same order as `sellers`.
    pub underfilled: Vec<(String, usize)>,
    pub min_products: usize,
}

/// Group products by seller name and flag sellers below `min_products`.
///
/// Related-product recommendations fill from the same seller first, so a
/// seller with few listings yields mostly cross-seller suggestions.
#[must_use]
pub fn seller_report(products: &[Product], min_products: usize) -> SellerReport {
    let mut grouped: BTreeMap<&str, Vec<(i64, String)>> = BTreeMap::new();
    for product in products {
        grouped
            .entry(product.seller.name.as_str())
            .or_default()
            .push((product.id, product.title.clone()));
    }

    let sellers: Vec<SellerGroup> = grouped
        .into_iter()
        .map(|(name, products)| SellerGroup {
            seller_name: name.to_string(),
            products,
        })
        .collect();

    let underfilled = sellers
        .iter()
        .filter(|group| group.len() < min_products)
        .map(|group| (group.seller_name.clone(), min_products - group.len()))
        .collect();

    SellerReport {
        total_products: products.len(),
        sellers,
        underfilled,
        min_products,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::products::tests::make_product;

    #[test]
    fn groups_are_sorted_by_seller_and_keep_dataset_order() {
        let products = vec![
            make_product(3, "Tab", "Samsung Store"),
            make_product(1, "iPhone", "Apple Store"),
            make_product(2, "Galaxy", "Samsung Store"),
        ];
        let report = seller_report(&products, 3);
        assert_eq!(report.total_products, 3);
        let names: Vec<&str> = report
            .sellers
            .iter()
            .map(|g| g.seller_name.as_str())
            .collect();
        assert_eq!(names, vec!["Apple Store", "Samsung Store"]);
        assert_eq!(
            report.sellers[1].products,
            vec![(3, "Tab".to_string()), (2, "Galaxy".to_string())]
        );
    }

    #[test]
    fn underfilled_sellers_report_shortfall() {
        let products = vec![
            make_product(1, "A", "Big Store"),
            make_product(2, "B", "Big Store"),
            make_product(3, "C", "Big Store"),
            make_product(4, "D", "Small Store"),
        ];
        let report = seller_report(&products, 3);
        assert_eq!(report.underfilled, vec![("Small Store".to_string(), 2)]);
    }

    #[test]
    fn zero_threshold_flags_nobody() {
        let products = vec![make_product(1, "A", "Store")];
        assert!(seller_report(&products, 0).underfilled.is_empty());
    }

    #[test]
    fn empty_catalog_has_no_sellers() {
        let report = seller_report(&[], 3);
        assert!(report.sellers.is_empty());
        assert!(report.underfilled.is_empty());
    }
}
