//! Core types for ElectroShop.

pub mod id;
pub mod order;
pub mod payment;
pub mod price;
pub mod product;
pub mod username;

pub use id::*;
pub use order::{Order, OrderItem};
pub use payment::{PaymentInfo, PaymentMethod};
pub use price::{Price, PriceError};
pub use product::Product;
pub use username::{Username, UsernameError};
