//! Domain types for the affiliate commission service.
//!
//! This module provides:
//! - Lossless monetary handling via the Money and Rate wrappers
//! - Millisecond timestamps for range queries
//! - Merchant, Affiliate and Order records
//! - The normalized webhook payload and its validation

pub mod merchant;
pub mod money;
pub mod order;
pub mod primitives;

pub use merchant::{Affiliate, AffiliateRegistration, Merchant};
pub use money::{Money, Rate, RateError};
pub use order::{NewOrder, Order, OrderEvent, PayoutStatus, ValidationError};
pub use primitives::TimeMs;
