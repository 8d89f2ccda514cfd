//! Starter catalog served before the first successful refresh.
//!
//! A fresh install has no snapshots, so reads fall back to this data.
//! It is returned to callers but never written into the cache; the
//! first refresh or local write replaces it for good. Transactional
//! collections (orders, quotes, contact messages) start empty and have
//! no seed here.

use crate::models::{Brand, Category, Page, Product};

pub fn products() -> Vec<Product> {
    vec![
        Product {
            id: "p-1001".to_string(),
            name: "Aurora Desk Lamp".to_string(),
            slug: "aurora-desk-lamp".to_string(),
            description: "Adjustable warm-light desk lamp with a woven brass shade.".to_string(),
            price: 89.0,
            sale_price: Some(69.0),
            sku: Some("LUM-AUR-01".to_string()),
            stock: 24,
            category_id: Some("c-lighting".to_string()),
            brand_id: Some("b-lumina".to_string()),
            images: vec!["/img/products/aurora-desk-lamp.jpg".to_string()],
            featured: true,
            published: true,
        },
        Product {
            id: "p-1002".to_string(),
            name: "Walnut Standing Desk".to_string(),
            slug: "walnut-standing-desk".to_string(),
            description: "Solid walnut top on a quiet dual-motor frame.".to_string(),
            price: 649.0,
            sale_price: None,
            sku: Some("OAK-WSD-120".to_string()),
            stock: 6,
            category_id: Some("c-furniture".to_string()),
            brand_id: Some("b-oakline".to_string()),
            images: vec!["/img/products/walnut-standing-desk.jpg".to_string()],
            featured: true,
            published: true,
        },
        Product {
            id: "p-1003".to_string(),
            name: "Stoneware Mug Set".to_string(),
            slug: "stoneware-mug-set".to_string(),
            description: "Four hand-glazed stoneware mugs in muted tones.".to_string(),
            price: 42.0,
            sale_price: None,
            sku: Some("OAK-MUG-4".to_string()),
            stock: 40,
            category_id: Some("c-kitchen".to_string()),
            brand_id: Some("b-oakline".to_string()),
            images: vec!["/img/products/stoneware-mug-set.jpg".to_string()],
            featured: false,
            published: true,
        },
    ]
}

pub fn categories() -> Vec<Category> {
    vec![
        Category {
            id: "c-lighting".to_string(),
            name: "Lighting".to_string(),
            slug: "lighting".to_string(),
            description: Some("Lamps and fixtures for every room.".to_string()),
            parent_id: None,
            image: None,
        },
        Category {
            id: "c-furniture".to_string(),
            name: "Furniture".to_string(),
            slug: "furniture".to_string(),
            description: None,
            parent_id: None,
            image: None,
        },
        Category {
            id: "c-kitchen".to_string(),
            name: "Kitchen".to_string(),
            slug: "kitchen".to_string(),
            description: None,
            parent_id: None,
            image: None,
        },
    ]
}

pub fn brands() -> Vec<Brand> {
    vec![
        Brand {
            id: "b-lumina".to_string(),
            name: "Lumina".to_string(),
            slug: "lumina".to_string(),
            logo: None,
        },
        Brand {
            id: "b-oakline".to_string(),
            name: "Oakline".to_string(),
            slug: "oakline".to_string(),
            logo: None,
        },
    ]
}

pub fn pages() -> Vec<Page> {
    vec![
        Page {
            id: "pg-about".to_string(),
            title: "About Us".to_string(),
            slug: "about".to_string(),
            body: "We make honest household goods and ship them worldwide.".to_string(),
            published: true,
        },
        Page {
            id: "pg-shipping".to_string(),
            title: "Shipping & Returns".to_string(),
            slug: "shipping".to_string(),
            body: "Orders ship within two business days. Returns are free for 30 days."
                .to_string(),
            published: true,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_seed_ids_are_unique() {
        let ids: HashSet<_> = products().iter().map(|p| p.id.clone()).collect();
        assert_eq!(ids.len(), products().len());
    }

    #[test]
    fn test_seed_references_resolve() {
        let category_ids: HashSet<_> = categories().into_iter().map(|c| c.id).collect();
        let brand_ids: HashSet<_> = brands().into_iter().map(|b| b.id).collect();
        for product in products() {
            if let Some(ref category) = product.category_id {
                assert!(category_ids.contains(category), "unknown category {}", category);
            }
            if let Some(ref brand) = product.brand_id {
                assert!(brand_ids.contains(brand), "unknown brand {}", brand);
            }
        }
    }
}
