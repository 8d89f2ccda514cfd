use serde::{Deserialize, Serialize};

use super::Entity;

fn default_published() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub sale_price: Option<f64>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub brand_id: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default = "default_published")]
    pub published: bool,
}

impl Product {
    /// Price shown to the shopper: the sale price when one is set.
    pub fn display_price(&self) -> f64 {
        self.sale_price.unwrap_or(self.price)
    }

    /// Whether a sale price is set and actually lower than the list price.
    pub fn on_sale(&self) -> bool {
        self.sale_price.map(|s| s < self.price).unwrap_or(false)
    }

    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }

    /// First image, for list/grid views.
    pub fn cover_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

impl Entity for Product {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    // Nested categories point at their parent; no cycle check happens here.
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

impl Category {
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

impl Entity for Category {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Brand {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub logo: Option<String>,
}

impl Entity for Brand {
    fn id(&self) -> &str {
        &self.id
    }
}
