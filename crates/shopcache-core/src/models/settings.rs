use serde::{Deserialize, Serialize};

/// Singleton store configuration, kept under its own cache key rather
/// than inside a collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSettings {
    pub store_name: String,
    #[serde(default)]
    pub tagline: Option<String>,
    pub currency: String,
    #[serde(default)]
    pub tax_rate: f64,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub announcement: Option<String>,
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            store_name: "My Store".to_string(),
            tagline: None,
            currency: "USD".to_string(),
            tax_rate: 0.0,
            contact_email: None,
            announcement: None,
        }
    }
}
