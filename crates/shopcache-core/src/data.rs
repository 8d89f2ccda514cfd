//! Data access facade for storefront and back-office code.
//!
//! `ShopData` wires the cache service to the real transport and store
//! and exposes one small API per resource: a read that answers
//! instantly from the local snapshot, and save/delete calls that apply
//! locally before syncing in the background. Checkout is the one
//! foreground path; everything else never waits on the network.

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use futures::future::join_all;
use serde_json::Value;
use tracing::error;

use crate::api::{HttpTransport, Method, Transport};
use crate::cache::{CacheService, Collection, RefreshOutcome, RefreshTask, SyncTask, WriteStyle};
use crate::config::Config;
use crate::models::{
    BlogPost, Brand, Category, ContactMessage, Coupon, Order, OrderDraft, OrderStatus, Page,
    Product, Quote, StoreSettings,
};
use crate::seed;
use crate::store::{FileStore, SnapshotStore, StoreError};
use crate::utils::{slugify, timestamp_id};

const PRODUCTS: Collection = Collection {
    key: "products",
    path: "/products",
    write: WriteStyle::PutById,
};
const CATEGORIES: Collection = Collection {
    key: "categories",
    path: "/categories",
    write: WriteStyle::PostCollection,
};
const BRANDS: Collection = Collection {
    key: "brands",
    path: "/brands",
    write: WriteStyle::PostCollection,
};
const PAGES: Collection = Collection {
    key: "pages",
    path: "/pages",
    write: WriteStyle::PostCollection,
};
const BLOG: Collection = Collection {
    key: "blog",
    path: "/blog",
    write: WriteStyle::PostCollection,
};
const COUPONS: Collection = Collection {
    key: "coupons",
    path: "/coupons",
    write: WriteStyle::PostCollection,
};
const ORDERS: Collection = Collection {
    key: "orders",
    path: "/orders",
    write: WriteStyle::PutById,
};
const QUOTES: Collection = Collection {
    key: "quotes",
    path: "/quotes",
    write: WriteStyle::PostCollection,
};
const CONTACT: Collection = Collection {
    key: "contact",
    path: "/contact",
    write: WriteStyle::PostCollection,
};

const SETTINGS_KEY: &str = "settings";
const SETTINGS_PATH: &str = "/settings";

/// Every cached list collection, in refresh order.
const COLLECTIONS: [Collection; 9] = [
    PRODUCTS, CATEGORIES, BRANDS, PAGES, BLOG, COUPONS, ORDERS, QUOTES, CONTACT,
];

/// Facade over the cache for all storefront resources.
/// Clone is cheap and shares all state.
#[derive(Clone)]
pub struct ShopData {
    cache: CacheService,
    transport: Arc<dyn Transport>,
}

impl ShopData {
    /// Open with the file-backed store and HTTP transport from `config`.
    pub fn open(config: &Config) -> Result<Self> {
        let store = Arc::new(
            FileStore::new(config.cache_dir()?).context("Failed to open the snapshot store")?,
        );
        let transport = Arc::new(
            HttpTransport::new(&config.api_base_url)
                .context("Failed to build the API transport")?,
        );
        Ok(Self::with_parts(store, transport))
    }

    /// Assemble from explicit parts. Tests inject fakes here.
    pub fn with_parts(store: Arc<dyn SnapshotStore>, transport: Arc<dyn Transport>) -> Self {
        Self {
            cache: CacheService::new(store, Arc::clone(&transport)),
            transport,
        }
    }

    // ===== Catalog =====

    pub async fn products(&self) -> (Vec<Product>, RefreshTask) {
        self.cache.read_list(PRODUCTS, seed::products()).await
    }

    pub async fn save_product(&self, product: &Product) -> SyncTask {
        self.cache.upsert(PRODUCTS, product).await
    }

    pub async fn delete_product(&self, id: &str) -> SyncTask {
        self.cache.remove(PRODUCTS, id).await
    }

    pub async fn categories(&self) -> (Vec<Category>, RefreshTask) {
        self.cache.read_list(CATEGORIES, seed::categories()).await
    }

    pub async fn save_category(&self, category: &Category) -> SyncTask {
        self.cache.upsert(CATEGORIES, category).await
    }

    pub async fn delete_category(&self, id: &str) -> SyncTask {
        self.cache.remove(CATEGORIES, id).await
    }

    pub async fn brands(&self) -> (Vec<Brand>, RefreshTask) {
        self.cache.read_list(BRANDS, seed::brands()).await
    }

    pub async fn save_brand(&self, brand: &Brand) -> SyncTask {
        self.cache.upsert(BRANDS, brand).await
    }

    pub async fn delete_brand(&self, id: &str) -> SyncTask {
        self.cache.remove(BRANDS, id).await
    }

    // ===== Content =====

    pub async fn pages(&self) -> (Vec<Page>, RefreshTask) {
        self.cache.read_list(PAGES, seed::pages()).await
    }

    pub async fn save_page(&self, page: &Page) -> SyncTask {
        self.cache.upsert(PAGES, page).await
    }

    pub async fn delete_page(&self, id: &str) -> SyncTask {
        self.cache.remove(PAGES, id).await
    }

    pub async fn blog_posts(&self) -> (Vec<BlogPost>, RefreshTask) {
        self.cache.read_list(BLOG, Vec::new()).await
    }

    pub async fn save_blog_post(&self, post: &BlogPost) -> SyncTask {
        self.cache.upsert(BLOG, post).await
    }

    pub async fn delete_blog_post(&self, id: &str) -> SyncTask {
        self.cache.remove(BLOG, id).await
    }

    // ===== Commerce =====

    pub async fn coupons(&self) -> (Vec<Coupon>, RefreshTask) {
        self.cache.read_list(COUPONS, Vec::new()).await
    }

    pub async fn save_coupon(&self, coupon: &Coupon) -> SyncTask {
        self.cache.upsert(COUPONS, coupon).await
    }

    pub async fn delete_coupon(&self, id: &str) -> SyncTask {
        self.cache.remove(COUPONS, id).await
    }

    pub async fn orders(&self) -> (Vec<Order>, RefreshTask) {
        self.cache.read_list(ORDERS, Vec::new()).await
    }

    pub async fn delete_order(&self, id: &str) -> SyncTask {
        self.cache.remove(ORDERS, id).await
    }

    /// Checkout. Prices the draft against the cached coupon list and
    /// settings, POSTs the order in the foreground, and caches the
    /// result. When the server answers with a parseable order of its
    /// own, that copy wins; on any failure the locally built order
    /// stands, so the caller always gets an order back.
    pub async fn place_order(&self, draft: OrderDraft) -> Order {
        let (settings, _refresh) = self.settings().await;
        let coupon = match draft.coupon_code {
            Some(ref code) => {
                let (coupons, _refresh) = self.coupons().await;
                coupons
                    .into_iter()
                    .find(|c| c.code.eq_ignore_ascii_case(code))
            }
            None => None,
        };
        let order = Order::from_draft(draft, coupon.as_ref(), settings.tax_rate);

        let response = match serde_json::to_value(&order) {
            Ok(body) => {
                self.transport
                    .call(Method::Post, ORDERS.path, Some(body))
                    .await
            }
            Err(err) => {
                error!(error = %err, "order failed to serialize, keeping it local only");
                None
            }
        };

        let order = response
            .and_then(|value| serde_json::from_value::<Order>(value).ok())
            .unwrap_or(order);

        self.cache.upsert_local(ORDERS, &order).await;
        order
    }

    /// Flip an order's status from the back office. Returns the sync
    /// handle when the order exists locally, `None` otherwise.
    pub async fn update_order_status(&self, id: &str, status: OrderStatus) -> Option<SyncTask> {
        let (orders, _refresh) = self.orders().await;
        let mut order = orders.into_iter().find(|o| o.id == id)?;
        order.status = status;
        Some(self.cache.upsert(ORDERS, &order).await)
    }

    // ===== Quotes and contact =====

    pub async fn quotes(&self) -> (Vec<Quote>, RefreshTask) {
        self.cache.read_list(QUOTES, Vec::new()).await
    }

    /// Quotes have no remote update endpoint; submission is a create.
    pub async fn submit_quote(&self, quote: &Quote) -> SyncTask {
        self.cache.upsert(QUOTES, quote).await
    }

    pub async fn delete_quote(&self, id: &str) -> SyncTask {
        self.cache.remove(QUOTES, id).await
    }

    pub async fn contact_messages(&self) -> (Vec<ContactMessage>, RefreshTask) {
        self.cache.read_list(CONTACT, Vec::new()).await
    }

    pub async fn submit_contact_message(&self, message: &ContactMessage) -> SyncTask {
        self.cache.upsert(CONTACT, message).await
    }

    pub async fn delete_contact_message(&self, id: &str) -> SyncTask {
        self.cache.remove(CONTACT, id).await
    }

    // ===== Settings =====

    pub async fn settings(&self) -> (StoreSettings, RefreshTask) {
        self.cache
            .read_one(SETTINGS_KEY, SETTINGS_PATH, StoreSettings::default())
            .await
    }

    pub async fn save_settings(&self, settings: &StoreSettings) -> SyncTask {
        self.cache
            .write_one(SETTINGS_KEY, SETTINGS_PATH, settings)
            .await
    }

    // ===== Maintenance =====

    /// Kick a refresh for every collection plus settings and wait for
    /// all of them. Outcomes come back in a stable order, one per key.
    pub async fn refresh_all(&self) -> Vec<(&'static str, RefreshOutcome)> {
        let mut tasks = Vec::new();
        for collection in COLLECTIONS {
            let (_items, refresh) = self.cache.read_list::<Value>(collection, Vec::new()).await;
            tasks.push((collection.key, refresh));
        }
        let (_settings, refresh) = self.settings().await;
        tasks.push((SETTINGS_KEY, refresh));

        let (keys, waits): (Vec<_>, Vec<_>) = tasks
            .into_iter()
            .map(|(key, task)| (key, task.wait()))
            .unzip();
        keys.into_iter().zip(join_all(waits).await).collect()
    }

    /// Wipe every local snapshot, memory and store alike.
    pub async fn clear(&self) -> Result<(), StoreError> {
        self.cache.clear().await
    }
}

// ===== Form constructors =====
//
// Records are minted where the form is submitted, ids and all. The
// cache never assigns identifiers.

/// Blank product for the admin "new product" form.
pub fn new_product(name: &str, price: f64) -> Product {
    Product {
        id: timestamp_id("p"),
        name: name.to_string(),
        slug: slugify(name),
        description: String::new(),
        price,
        sale_price: None,
        sku: None,
        stock: 0,
        category_id: None,
        brand_id: None,
        images: Vec::new(),
        featured: false,
        published: true,
    }
}

/// Page for the admin "new page" form, slug derived from the title.
pub fn new_page(title: &str, body: &str) -> Page {
    Page {
        id: timestamp_id("pg"),
        title: title.to_string(),
        slug: slugify(title),
        body: body.to_string(),
        published: true,
    }
}

/// Quote record from the storefront quote form.
pub fn new_quote(
    name: &str,
    email: &str,
    phone: Option<&str>,
    product_id: Option<&str>,
    message: &str,
) -> Quote {
    Quote {
        id: timestamp_id("q"),
        name: name.to_string(),
        email: email.to_string(),
        phone: phone.map(str::to_string),
        product_id: product_id.map(str::to_string),
        message: message.to_string(),
        submitted_at: Utc::now().to_rfc3339(),
    }
}

/// Contact message from the storefront contact form.
pub fn new_contact_message(
    name: &str,
    email: &str,
    subject: Option<&str>,
    message: &str,
) -> ContactMessage {
    ContactMessage {
        id: timestamp_id("cm"),
        name: name.to_string(),
        email: email.to_string(),
        subject: subject.map(str::to_string),
        message: message.to_string(),
        submitted_at: Utc::now().to_rfc3339(),
    }
}
