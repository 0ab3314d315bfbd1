//! # Domain Services
//!
//! Pure business rules that don't naturally belong to a single entity.
//!
//! ## Services
//!
//! - **maintenance_schedule**: Days since a vehicle was last serviced
//! - **relative_time**: "3 hours ago" style labels for the activity feed

mod maintenance_schedule;
mod relative_time;

pub use maintenance_schedule::*;
pub use relative_time::*;
