//! Hotelier Core — the hotel tenant record, its validation and
//! subscription rules, and the data-access traits implemented by the
//! storage crate.

pub mod error;
pub mod models;
pub mod repository;
pub mod service;
pub mod validation;

pub use error::{HotelierError, HotelierResult};
pub use service::{HotelService, SubscriptionSummary};
pub use validation::{FieldError, ValidationErrorKind, ValidationErrors, validate};
