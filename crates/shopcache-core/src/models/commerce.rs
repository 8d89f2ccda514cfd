use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::{round_cents, timestamp_id};

use super::Entity;

/// Order lifecycle, toggled from the admin screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    #[default]
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Processing => write!(f, "Processing"),
            OrderStatus::Shipped => write!(f, "Shipped"),
            OrderStatus::Delivered => write!(f, "Delivered"),
            OrderStatus::Cancelled => write!(f, "Cancelled"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct OrderCustomer {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: String,
    pub name: String,
    pub quantity: u32,
    pub unit_price: f64,
}

impl OrderItem {
    pub fn line_total(&self) -> f64 {
        round_cents(self.unit_price * self.quantity as f64)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    #[serde(default)]
    pub status: OrderStatus,
    pub customer: OrderCustomer,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub coupon_code: Option<String>,
    pub subtotal: f64,
    #[serde(default)]
    pub discount: f64,
    #[serde(default)]
    pub tax: f64,
    pub total: f64,
    pub placed_at: String,
}

/// What checkout collects before an order exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    pub customer: OrderCustomer,
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub coupon_code: Option<String>,
}

impl Order {
    /// Price a draft into a full order record.
    ///
    /// Discount applies before tax; tax is charged on the discounted base.
    /// A coupon that is inactive, expired, or under its minimum subtotal
    /// contributes nothing. The order id is minted here (`ord-<millis>`).
    pub fn from_draft(draft: OrderDraft, coupon: Option<&Coupon>, tax_rate: f64) -> Self {
        let subtotal = round_cents(draft.items.iter().map(OrderItem::line_total).sum());
        let discount = coupon
            .filter(|c| c.applies_to(subtotal, Utc::now()))
            .map(|c| c.discount_for(subtotal))
            .unwrap_or(0.0);
        let taxable = round_cents(subtotal - discount);
        let tax = round_cents(taxable * tax_rate);

        Order {
            id: timestamp_id("ord"),
            status: OrderStatus::Processing,
            customer: draft.customer,
            items: draft.items,
            coupon_code: draft.coupon_code,
            subtotal,
            discount,
            tax,
            total: round_cents(taxable + tax),
            placed_at: Utc::now().to_rfc3339(),
        }
    }

    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}

impl Entity for Order {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountKind {
    /// `amount` is a percentage of the subtotal.
    Percent,
    /// `amount` is a currency value.
    Fixed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    pub id: String,
    pub code: String,
    pub kind: DiscountKind,
    pub amount: f64,
    #[serde(default)]
    pub min_subtotal: Option<f64>,
    #[serde(default)]
    pub expires_at: Option<String>,
    #[serde(default)]
    pub active: bool,
}

impl Coupon {
    /// Expired when `expires_at` parses as RFC 3339 and lies in the past.
    /// An unparseable date never expires a coupon.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at
            .as_deref()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|exp| exp < now)
            .unwrap_or(false)
    }

    pub fn applies_to(&self, subtotal: f64, now: DateTime<Utc>) -> bool {
        self.active && !self.is_expired(now) && subtotal >= self.min_subtotal.unwrap_or(0.0)
    }

    pub fn discount_for(&self, subtotal: f64) -> f64 {
        match self.kind {
            DiscountKind::Percent => round_cents(subtotal * self.amount / 100.0),
            DiscountKind::Fixed => round_cents(self.amount.min(subtotal)),
        }
    }
}

impl Entity for Coupon {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub product_id: Option<String>,
    pub message: String,
    pub submitted_at: String,
}

impl Entity for Quote {
    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn draft() -> OrderDraft {
        OrderDraft {
            customer: OrderCustomer {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                address: None,
            },
            items: vec![
                OrderItem {
                    product_id: "p-1".to_string(),
                    name: "Desk Lamp".to_string(),
                    quantity: 2,
                    unit_price: 20.0,
                },
                OrderItem {
                    product_id: "p-2".to_string(),
                    name: "Mug".to_string(),
                    quantity: 1,
                    unit_price: 10.0,
                },
            ],
            coupon_code: Some("SAVE10".to_string()),
        }
    }

    fn percent_coupon() -> Coupon {
        Coupon {
            id: "cp-1".to_string(),
            code: "SAVE10".to_string(),
            kind: DiscountKind::Percent,
            amount: 10.0,
            min_subtotal: None,
            expires_at: None,
            active: true,
        }
    }

    #[test]
    fn test_from_draft_totals() {
        let order = Order::from_draft(draft(), Some(&percent_coupon()), 0.1);
        assert_eq!(order.subtotal, 50.0);
        assert_eq!(order.discount, 5.0);
        assert_eq!(order.tax, 4.5); // 10% of the discounted 45.00
        assert_eq!(order.total, 49.5);
        assert_eq!(order.status, OrderStatus::Processing);
        assert!(order.id.starts_with("ord-"));
    }

    #[test]
    fn test_from_draft_without_coupon() {
        let order = Order::from_draft(draft(), None, 0.0);
        assert_eq!(order.discount, 0.0);
        assert_eq!(order.total, 50.0);
    }

    #[test]
    fn test_expired_coupon_is_skipped() {
        let mut coupon = percent_coupon();
        coupon.expires_at = Some((Utc::now() - Duration::days(1)).to_rfc3339());
        let order = Order::from_draft(draft(), Some(&coupon), 0.0);
        assert_eq!(order.discount, 0.0);
    }

    #[test]
    fn test_min_subtotal_gate() {
        let mut coupon = percent_coupon();
        coupon.min_subtotal = Some(100.0);
        assert!(!coupon.applies_to(50.0, Utc::now()));
        coupon.min_subtotal = Some(50.0);
        assert!(coupon.applies_to(50.0, Utc::now()));
    }

    #[test]
    fn test_fixed_discount_caps_at_subtotal() {
        let coupon = Coupon {
            kind: DiscountKind::Fixed,
            amount: 80.0,
            ..percent_coupon()
        };
        assert_eq!(coupon.discount_for(50.0), 50.0);
    }

    #[test]
    fn test_order_status_wire_format() {
        let json = serde_json::to_string(&OrderStatus::Shipped).expect("serialize status");
        assert_eq!(json, "\"Shipped\"");
        let back: OrderStatus = serde_json::from_str("\"Cancelled\"").expect("parse status");
        assert_eq!(back, OrderStatus::Cancelled);
    }

    #[test]
    fn test_item_count() {
        let order = Order::from_draft(draft(), None, 0.0);
        assert_eq!(order.item_count(), 3);
    }
}
