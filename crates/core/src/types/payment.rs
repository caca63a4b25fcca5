//! Payment method and the method-specific details kept on an order.

use core::fmt;

use serde::{Deserialize, Serialize};

/// How the customer intends to pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "credit_card")]
    CreditCard,
    #[serde(rename = "paypal")]
    PayPal,
    #[serde(rename = "cash_on_delivery")]
    CashOnDelivery,
}

impl PaymentMethod {
    /// Parse the form value of a payment method.
    ///
    /// `cod` is accepted as a legacy spelling of `cash_on_delivery`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "credit_card" => Some(Self::CreditCard),
            "paypal" => Some(Self::PayPal),
            "cash_on_delivery" | "cod" => Some(Self::CashOnDelivery),
            _ => None,
        }
    }

    /// Canonical name, as stored in the `payment_method` column.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CreditCard => "credit_card",
            Self::PayPal => "paypal",
            Self::CashOnDelivery => "cash_on_delivery",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Method-specific payment details persisted with an order.
///
/// Card numbers are reduced to their last four digits and the CVC is never
/// stored. Cash on delivery carries no details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method")]
pub enum PaymentInfo {
    #[serde(rename = "credit_card")]
    CreditCard { card_last4: String, expiry: String },
    #[serde(rename = "paypal")]
    PayPal { email: String },
}

impl PaymentInfo {
    /// Card details with the number masked down to its last four characters.
    #[must_use]
    pub fn credit_card(number: &str, expiry: &str) -> Self {
        let digits: Vec<char> = number.chars().filter(|c| !c.is_whitespace()).collect();
        let card_last4 = digits
            .iter()
            .skip(digits.len().saturating_sub(4))
            .collect();
        Self::CreditCard {
            card_last4,
            expiry: expiry.to_owned(),
        }
    }

    /// `PayPal` account details.
    #[must_use]
    pub fn paypal(email: &str) -> Self {
        Self::PayPal {
            email: email.to_owned(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_methods() {
        assert_eq!(
            PaymentMethod::parse("credit_card"),
            Some(PaymentMethod::CreditCard)
        );
        assert_eq!(PaymentMethod::parse("paypal"), Some(PaymentMethod::PayPal));
        assert_eq!(
            PaymentMethod::parse("cash_on_delivery"),
            Some(PaymentMethod::CashOnDelivery)
        );
        assert_eq!(
            PaymentMethod::parse("cod"),
            Some(PaymentMethod::CashOnDelivery)
        );
    }

    #[test]
    fn test_parse_unknown_method() {
        assert_eq!(PaymentMethod::parse("bitcoin"), None);
        assert_eq!(PaymentMethod::parse(""), None);
        assert_eq!(PaymentMethod::parse("PayPal"), None);
    }

    #[test]
    fn test_card_number_is_masked() {
        let info = PaymentInfo::credit_card("4111 1111 1111 1234", "12/29");
        assert_eq!(
            info,
            PaymentInfo::CreditCard {
                card_last4: "1234".to_owned(),
                expiry: "12/29".to_owned(),
            }
        );
    }

    #[test]
    fn test_short_card_number_kept_whole() {
        let PaymentInfo::CreditCard { card_last4, .. } = PaymentInfo::credit_card("12", "01/30")
        else {
            panic!("expected card details");
        };
        assert_eq!(card_last4, "12");
    }

    #[test]
    fn test_payment_info_json_shape() {
        let json = serde_json::to_value(PaymentInfo::paypal("ann@example.com")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"method": "paypal", "email": "ann@example.com"})
        );
    }
}
