//! Error types of the protected call.
//!
//! There are two disjoint families:
//! - `BlockError`: the call was rejected before the protected operation ran.
//! - the protected operation's own error, carried untouched in `CallError::Inner`.

pub mod block_error;
pub mod result;

pub use block_error::*;
pub use result::*;
