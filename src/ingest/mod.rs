//! Order ingestion and affiliate self-registration.

pub mod processor;
pub mod registration;

pub use processor::{IngestError, OrderProcessor, Outcome};
pub use registration::AffiliateRegistrar;
