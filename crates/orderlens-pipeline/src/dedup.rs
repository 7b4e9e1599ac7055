use std::collections::HashSet;

use orderlens_reader::ProductRecord;

/// Drops repeated catalog entries, keeping exactly one record per distinct
/// `objectID`. The first occurrence wins and input order is preserved;
/// conflicting fields on later duplicates are discarded, never merged.
pub fn dedup_products(products: Vec<ProductRecord>) -> Vec<ProductRecord> {
    let mut seen: HashSet<String> = HashSet::with_capacity(products.len());
    products
        .into_iter()
        .filter(|product| seen.insert(product.object_id.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, name: &str) -> ProductRecord {
        ProductRecord {
            object_id: id.to_string(),
            name: Some(name.to_string()),
            categories: None,
            rating: None,
            product_weight_g: None,
            extra: Default::default(),
        }
    }

    #[test]
    fn keeps_first_occurrence_per_object_id() {
        let deduped = dedup_products(vec![
            product("P1", "original"),
            product("P2", "second"),
            product("P1", "late duplicate"),
        ]);

        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].object_id, "P1");
        assert_eq!(deduped[0].name.as_deref(), Some("original"));
        assert_eq!(deduped[1].object_id, "P2");
    }

    #[test]
    fn empty_input_is_fine() {
        assert!(dedup_products(Vec::new()).is_empty());
    }
}
