//! Raw checkout form input.

use serde::Deserialize;

/// Checkout form fields as submitted.
///
/// Every field is optional at the transport level; missing fields are
/// treated as empty strings and reported by validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CheckoutForm {
    pub name: String,
    pub address: String,
    pub payment_method: String,
    pub cc_number: String,
    pub cc_expiry: String,
    pub cc_cvc: String,
    pub paypal_email: String,
}
