//! Core transforms of the IVS build: wave filtering and the sorted merge.
//!
//! Both operations take their column mapping from [`ivs_model`] types rather
//! than hard-coded names, so the same code serves either extract.

pub mod error;
pub mod filter;
pub mod merge;

pub use error::{BuildError, Result};
pub use filter::filter_waves;
pub use merge::merge_sorted;
