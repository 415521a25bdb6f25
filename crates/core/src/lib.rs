//! Core types and pure policies for first-party analytics tracking.

pub mod attribution;
pub mod consent;
pub mod error;
pub mod integration;
pub mod limits;
pub mod payload;
pub mod policy;
pub mod record;
pub mod taxonomy;

pub use attribution::*;
pub use consent::*;
pub use error::{AccessErrorCode, Error, Result, StoreErrorCode};
pub use integration::*;
pub use payload::*;
pub use policy::*;
pub use record::*;
pub use taxonomy::*;
