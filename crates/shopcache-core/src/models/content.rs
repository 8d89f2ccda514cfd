use serde::{Deserialize, Serialize};

use super::Entity;

fn default_published() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: String,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub body: String,
    #[serde(default = "default_published")]
    pub published: bool,
}

impl Entity for Page {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: String,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default = "default_published")]
    pub published: bool,
    #[serde(default)]
    pub published_at: Option<String>,
}

impl BlogPost {
    /// Short preview for list views, cut at a word boundary.
    pub fn excerpt(&self, max_len: usize) -> String {
        if self.body.chars().count() <= max_len {
            return self.body.clone();
        }
        let cut: String = self.body.chars().take(max_len).collect();
        match cut.rfind(' ') {
            Some(idx) => format!("{}...", &cut[..idx]),
            None => format!("{}...", cut),
        }
    }
}

impl Entity for BlogPost {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub subject: Option<String>,
    pub message: String,
    pub submitted_at: String,
}

impl Entity for ContactMessage {
    fn id(&self) -> &str {
        &self.id
    }
}
