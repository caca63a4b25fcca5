//! Checkout validation failures.

use core::fmt;

use serde::Serialize;
use thiserror::Error;

/// A single rule a checkout submission broke.
///
/// The `Display` text is shown to the customer as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutViolation {
    #[error("Name is required.")]
    NameRequired,

    #[error("Address is required.")]
    AddressRequired,

    #[error("Invalid payment method.")]
    InvalidPaymentMethod,

    /// Credit card chosen but number, expiry or CVC left blank.
    #[error("All credit card fields are required.")]
    IncompleteCreditCard,

    #[error("PayPal email is required.")]
    PayPalEmailRequired,

    /// A cart line asks for more units than the product has left.
    #[error("Not enough stock for {product_name}.")]
    InsufficientStock { product_name: String },

    /// No cart line resolved to a known product.
    #[error("Cart is empty.")]
    EmptyCart,
}

/// Every violation found in one checkout submission, in detection order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<CheckoutViolation>);

impl ValidationErrors {
    /// Wrap a list of violations.
    #[must_use]
    pub const fn new(violations: Vec<CheckoutViolation>) -> Self {
        Self(violations)
    }

    /// A single violation.
    #[must_use]
    pub fn single(violation: CheckoutViolation) -> Self {
        Self(vec![violation])
    }

    #[must_use]
    pub fn violations(&self) -> &[CheckoutViolation] {
        &self.0
    }

    /// Customer-facing messages, one per violation.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }

    #[must_use]
    pub fn contains(&self, violation: &CheckoutViolation) -> bool {
        self.0.contains(violation)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.messages().join(" "))
    }
}

impl std::error::Error for ValidationErrors {}

impl Serialize for ValidationErrors {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter().map(ToString::to_string))
    }
}
