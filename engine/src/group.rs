//! ProductGrouper - partition a product list by category id.
//!
//! Used by tree-with-products renderers (the "choose related product"
//! pickers): every requested category id gets a bucket, even an empty one, so
//! empty categories still render.

use crate::{CategoryId, Product};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Partition `products` into the requested category buckets.
///
/// Every id in `category_ids` appears as a key, possibly with an empty
/// bucket. Products whose `category_id` is `None` or outside `category_ids`
/// are omitted, never merged into a catch-all; callers wanting an
/// "uncategorized" bucket add that id explicitly and assign products to it
/// themselves. Buckets are sorted by case-insensitive product name, id as
/// the final tie-break.
pub fn group(products: &[Product], category_ids: &[CategoryId]) -> BTreeMap<CategoryId, Vec<Product>> {
    let mut buckets: BTreeMap<CategoryId, Vec<Product>> = category_ids
        .iter()
        .map(|id| (id.clone(), Vec::new()))
        .collect();

    for product in products {
        let Some(category_id) = &product.category_id else {
            continue;
        };
        if let Some(bucket) = buckets.get_mut(category_id) {
            bucket.push(product.clone());
        }
    }

    for bucket in buckets.values_mut() {
        bucket.sort_by(product_name_order);
    }

    buckets
}

fn product_name_order(a: &Product, b: &Product) -> Ordering {
    a.name
        .to_lowercase()
        .cmp(&b.name.to_lowercase())
        .then_with(|| a.id.cmp(&b.id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_products() -> Vec<Product> {
        vec![
            Product::new("p1", "Wool Socks", "SOCK-01", Some("a")),
            Product::new("p2", "ankle socks", "SOCK-02", Some("a")),
            Product::new("p3", "Belt", "BELT-01", Some("b")),
            Product::new("p4", "Mystery Box", "BOX-01", None),
            Product::new("p5", "Off-catalog", "OFF-01", Some("zz")),
        ]
    }

    fn names(bucket: &[Product]) -> Vec<&str> {
        bucket.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn partitions_by_category() {
        let ids = vec!["a".to_string(), "b".to_string()];
        let grouped = group(&sample_products(), &ids);

        assert_eq!(grouped.len(), 2);
        assert_eq!(names(&grouped["a"]), vec!["ankle socks", "Wool Socks"]);
        assert_eq!(names(&grouped["b"]), vec!["Belt"]);
    }

    #[test]
    fn requested_ids_always_present() {
        let ids = vec!["a".to_string(), "empty".to_string()];
        let grouped = group(&sample_products(), &ids);

        assert!(grouped.contains_key("empty"));
        assert!(grouped["empty"].is_empty());
    }

    #[test]
    fn null_and_foreign_categories_omitted() {
        let ids = vec!["a".to_string(), "b".to_string()];
        let grouped = group(&sample_products(), &ids);

        let total: usize = grouped.values().map(Vec::len).sum();
        assert_eq!(total, 3); // p4 (null) and p5 (zz) dropped
    }

    #[test]
    fn explicit_uncategorized_bucket_is_caller_owned() {
        // Adding "zz" to the requested set pulls p5 in; null stays out.
        let ids = vec!["zz".to_string()];
        let grouped = group(&sample_products(), &ids);
        assert_eq!(names(&grouped["zz"]), vec!["Off-catalog"]);
    }

    #[test]
    fn bucket_sort_is_case_insensitive() {
        let products = vec![
            Product::new("p1", "zeta", "Z-1", Some("a")),
            Product::new("p2", "ALPHA", "A-1", Some("a")),
            Product::new("p3", "beta", "B-1", Some("a")),
        ];
        let grouped = group(&products, &["a".to_string()]);
        assert_eq!(names(&grouped["a"]), vec!["ALPHA", "beta", "zeta"]);
    }

    #[test]
    fn equal_names_tie_break_on_id() {
        let products = vec![
            Product::new("p2", "Same", "S-2", Some("a")),
            Product::new("p1", "same", "S-1", Some("a")),
        ];
        let grouped = group(&products, &["a".to_string()]);
        let ids: Vec<&str> = grouped["a"].iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p2"]);
    }

    #[test]
    fn grouping_is_total_over_in_scope_products() {
        let products = sample_products();
        let ids = vec!["a".to_string(), "b".to_string()];
        let grouped = group(&products, &ids);

        let bucketed: usize = grouped.values().map(Vec::len).sum();
        let out_of_scope = products
            .iter()
            .filter(|p| {
                p.category_id
                    .as_ref()
                    .map_or(true, |id| !ids.contains(id))
            })
            .count();
        assert_eq!(bucketed + out_of_scope, products.len());
    }

    #[test]
    fn empty_inputs() {
        assert!(group(&[], &[]).is_empty());

        let grouped = group(&[], &["a".to_string()]);
        assert_eq!(grouped.len(), 1);
        assert!(grouped["a"].is_empty());
    }
}
