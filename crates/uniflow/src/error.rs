//! Store error type

use thiserror::Error;

/// Errors raised synchronously by `dispatch`.
///
/// Both variants are raised before any state mutation for the failing
/// dispatch, so a rejected dispatch never leaves a partial update behind.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    /// The raw store only understands data actions; an effect action reached
    /// it without the thunk middleware installed to interpret it.
    #[error("invalid action: effect actions require the thunk middleware")]
    InvalidAction,

    /// Dispatch was re-entered from a reducer or listener while another
    /// dispatch was still applying. Nested dispatch is rejected rather than
    /// serialized; the outer dispatch completes untouched.
    #[error("dispatch called while another dispatch is in progress")]
    DispatchInProgress,
}
