//! Result
//!
use super::BlockError;
use std::error;
use std::fmt;

/// `CallError` is the error returned by `CircuitBreaker::execute` and friends.
/// `Inner` carries the protected operation's own error exactly as it was returned.
#[derive(Debug, Clone, PartialEq)]
pub enum CallError<E> {
    Blocked(BlockError),
    Inner(E),
}

impl<E> CallError<E> {
    pub fn is_blocked(&self) -> bool {
        matches!(self, Self::Blocked(_))
    }

    pub fn block_err(&self) -> Option<&BlockError> {
        match self {
            Self::Blocked(err) => Some(err),
            Self::Inner(_) => None,
        }
    }

    pub fn inner(&self) -> Option<&E> {
        match self {
            Self::Inner(err) => Some(err),
            Self::Blocked(_) => None,
        }
    }

    /// `into_inner` returns the operation's error, or `None` if the call was blocked.
    pub fn into_inner(self) -> Option<E> {
        match self {
            Self::Inner(err) => Some(err),
            Self::Blocked(_) => None,
        }
    }
}

impl<E> From<BlockError> for CallError<E> {
    fn from(err: BlockError) -> Self {
        Self::Blocked(err)
    }
}

impl<E: fmt::Display> fmt::Display for CallError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallError::Blocked(block_err) => write!(f, "{}", block_err),
            CallError::Inner(err) => write!(f, "{}", err),
        }
    }
}

impl<E: error::Error + 'static> error::Error for CallError<E> {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            CallError::Blocked(block_err) => Some(block_err),
            CallError::Inner(err) => Some(err),
        }
    }
}
