pub mod api;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod ingest;
pub mod stats;

pub use config::Config;
pub use db::{init_db, RegisterOutcome, Repository, Store, StoreError};
pub use domain::{
    Affiliate, AffiliateRegistration, Merchant, Money, NewOrder, Order, OrderEvent, PayoutStatus,
    Rate, TimeMs, ValidationError,
};
pub use error::AppError;
pub use ingest::{AffiliateRegistrar, IngestError, OrderProcessor, Outcome};
pub use stats::{OrderStats, StatsService};
