//! URL modeling: dedup keys and batch splitting.
//!
//! A session identifies artifacts by the trimmed source URL. Batch input is a
//! single free-form string that may be delimited by `", "`, bare commas, or
//! whitespace, and may carry commas inside query strings.

mod batch;
mod normalize;

pub use batch::{parse_batch, split_candidates};
pub use normalize::normalize;
