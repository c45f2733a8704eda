//! Module containing the recency universal error type
use thiserror::Error;

/// Universal error type for recency
///
/// Cache misses are not errors; they are reported as `None` by the lookup
/// methods. The only failure in the whole contract is construction with an
/// unusable capacity.
#[derive(Error, Debug)]
pub enum Error {
    /// Capacity must be at least one entry
    #[error("capacity must be at least one entry")]
    ZeroCapacity,
}
