//! # Domain Value Objects
//!
//! Immutable value types that represent domain concepts without identity.
//!
//! ## Value Objects
//!
//! - **Page**: clamped limit/offset window for list queries

mod pagination;

pub use pagination::*;
