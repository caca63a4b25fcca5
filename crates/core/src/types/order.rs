//! Placed orders.
//!
//! An order is an audit record. Its items snapshot the product name and the
//! price at the moment of purchase, so later catalog edits never change a
//! past order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{OrderId, PaymentInfo, PaymentMethod, Price, ProductId, UserId};

/// One line of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: ProductId,
    pub name: String,
    pub quantity: u32,
    /// Unit price at purchase time multiplied by `quantity`.
    pub subtotal: Price,
}

/// A completed purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    /// The customer account, if the order was placed while logged in.
    pub user_id: Option<UserId>,
    pub name: String,
    pub address: String,
    pub payment_method: PaymentMethod,
    pub payment_info: Option<PaymentInfo>,
    pub items: Vec<OrderItem>,
    /// Sum of all item subtotals.
    pub total: Price,
    pub created_at: DateTime<Utc>,
}
