#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

//! Training volume analysis of workout logs.
//!
//! A workout log is parsed into sets, each set is enriched with its volume
//! and the metadata of its exercise, and the enriched sets are aggregated
//! into daily series per exercise and per muscle group.

mod aggregation;
mod error;
mod metadata;
mod name;
mod series;
mod service;
mod volume;
mod workout;

pub use aggregation::*;
pub use error::*;
pub use metadata::*;
pub use name::*;
pub use series::*;
pub use service::*;
pub use volume::*;
pub use workout::*;
