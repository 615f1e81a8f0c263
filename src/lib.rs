//! Extraction of normalized real-estate offer records from raw listing
//! pages. The caller supplies an already-retrieved document body plus its
//! URI; fetching, persistence and scheduling live elsewhere.

pub mod diff;
pub mod error;
pub mod models;
pub mod parsers;

pub use error::{ParseError, ValidationError};
pub use models::builder::RecordBuilder;
pub use models::{EstateType, MarketType, Record, SellerType};
pub use parsers::{NieruchomosciOnlinePlParser, SiteParser};
