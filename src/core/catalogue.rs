//! Ornament catalogue records. Opaque lookup data as far as pricing is
//! concerned: only `karat` and `weight_g` seed quote defaults.

use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CatalogueItem {
    pub sku: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub karat: i32,
    pub weight_g: f64,
    pub stone: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Catalogue {
    items: Vec<CatalogueItem>,
}

impl Catalogue {
    /// Builtin demo stock merged with any extra records from the config.
    pub fn with_extras(extras: &[CatalogueItem]) -> Self {
        let mut items = builtin_items();
        items.extend(extras.iter().cloned());
        Self { items }
    }

    pub fn items(&self) -> &[CatalogueItem] {
        &self.items
    }

    pub fn find(&self, sku: &str) -> Option<&CatalogueItem> {
        self.items
            .iter()
            .find(|item| item.sku.eq_ignore_ascii_case(sku))
    }
}

fn builtin_items() -> Vec<CatalogueItem> {
    vec![
        CatalogueItem {
            sku: "RNG001".to_string(),
            kind: "Ring".to_string(),
            karat: 22,
            weight_g: 6.5,
            stone: Some("CZ".to_string()),
            image: Some(
                "https://images.unsplash.com/photo-1522312346375-d1a52e2b99b3".to_string(),
            ),
        },
        CatalogueItem {
            sku: "NCK010".to_string(),
            kind: "Necklace".to_string(),
            karat: 22,
            weight_g: 24.8,
            stone: Some("Ruby".to_string()),
            image: Some(
                "https://images.unsplash.com/photo-1520975954732-35dd22f7076b".to_string(),
            ),
        },
        CatalogueItem {
            sku: "BRC020".to_string(),
            kind: "Bracelet".to_string(),
            karat: 18,
            weight_g: 14.2,
            stone: Some("Emerald".to_string()),
            image: Some(
                "https://images.unsplash.com/photo-1603570419963-cb9b8f2d9963".to_string(),
            ),
        },
    ]
}
