//! Turning a checkout submission into an order that can be persisted.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use super::{CheckoutForm, CheckoutViolation, ValidationErrors, sanitize_text};
use crate::cart::Cart;
use crate::types::{
    Order, OrderId, OrderItem, PaymentInfo, PaymentMethod, Price, Product, ProductId, UserId,
};

/// A validated order that has not been written yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingOrder {
    pub name: String,
    pub address: String,
    pub payment_method: PaymentMethod,
    pub payment_info: Option<PaymentInfo>,
    /// One item per resolved cart entry, in cart order.
    pub items: Vec<OrderItem>,
    pub total: Price,
}

/// A guarded stock decrement to apply when the order is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockDecrement {
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: u32,
}

impl PendingOrder {
    /// Stock decrements for every item, sorted by product ID.
    ///
    /// Applying them in this order makes concurrent checkouts lock product
    /// rows in the same sequence.
    #[must_use]
    pub fn stock_decrements(&self) -> Vec<StockDecrement> {
        let mut decrements: Vec<StockDecrement> = self
            .items
            .iter()
            .map(|item| StockDecrement {
                product_id: item.product_id,
                product_name: item.name.clone(),
                quantity: item.quantity,
            })
            .collect();
        decrements.sort_by_key(|d| d.product_id);
        decrements
    }

    /// Attach the identity assigned by storage.
    #[must_use]
    pub fn into_order(
        self,
        id: OrderId,
        user_id: Option<UserId>,
        created_at: DateTime<Utc>,
    ) -> Order {
        Order {
            id,
            user_id,
            name: self.name,
            address: self.address,
            payment_method: self.payment_method,
            payment_info: self.payment_info,
            items: self.items,
            total: self.total,
            created_at,
        }
    }
}

/// Validate a checkout submission against the cart and a catalog snapshot.
///
/// `catalog` must contain the current rows for the cart's products; cart
/// entries whose product is missing from it are skipped. Every broken rule
/// is collected, so a single response can list all of them.
///
/// # Errors
///
/// Returns `ValidationErrors` when any field is invalid, any line asks for
/// more than the product's current stock, or nothing in the cart resolves.
pub fn plan_checkout(
    form: &CheckoutForm,
    cart: &Cart,
    catalog: &[Product],
) -> Result<PendingOrder, ValidationErrors> {
    let mut violations = Vec::new();

    let name = sanitize_text(&form.name);
    let address = sanitize_text(&form.address);
    if name.is_empty() {
        violations.push(CheckoutViolation::NameRequired);
    }
    if address.is_empty() {
        violations.push(CheckoutViolation::AddressRequired);
    }

    let payment_method = PaymentMethod::parse(&sanitize_text(&form.payment_method));
    let payment_info = match payment_method {
        None => {
            violations.push(CheckoutViolation::InvalidPaymentMethod);
            None
        }
        Some(PaymentMethod::CreditCard) => {
            let number = sanitize_text(&form.cc_number);
            let expiry = sanitize_text(&form.cc_expiry);
            let cvc = sanitize_text(&form.cc_cvc);
            if number.is_empty() || expiry.is_empty() || cvc.is_empty() {
                violations.push(CheckoutViolation::IncompleteCreditCard);
            }
            Some(PaymentInfo::credit_card(&number, &expiry))
        }
        Some(PaymentMethod::PayPal) => {
            let email = sanitize_text(&form.paypal_email);
            if email.is_empty() {
                violations.push(CheckoutViolation::PayPalEmailRequired);
            }
            Some(PaymentInfo::paypal(&email))
        }
        Some(PaymentMethod::CashOnDelivery) => None,
    };

    let products: HashMap<ProductId, &Product> = catalog.iter().map(|p| (p.id, p)).collect();
    let mut items = Vec::with_capacity(cart.len());
    for entry in cart.entries() {
        let Some(product) = products.get(&entry.product_id) else {
            continue;
        };
        if product.stock < entry.quantity {
            violations.push(CheckoutViolation::InsufficientStock {
                product_name: product.name.clone(),
            });
        }
        items.push(OrderItem {
            product_id: product.id,
            name: product.name.clone(),
            quantity: entry.quantity,
            subtotal: product.price.times(entry.quantity),
        });
    }
    if items.is_empty() {
        violations.push(CheckoutViolation::EmptyCart);
    }

    let (Some(payment_method), true) = (payment_method, violations.is_empty()) else {
        return Err(ValidationErrors::new(violations));
    };

    let total = items.iter().map(|item| item.subtotal).sum();
    Ok(PendingOrder {
        name,
        address,
        payment_method,
        payment_info,
        items,
        total,
    })
}
