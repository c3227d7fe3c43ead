use std::error;
use std::fmt;

/// `BlockType` tells why an admission was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockType {
    /// The breaker is Open and its timeout has not elapsed yet.
    BreakerOpen,
    /// The breaker is Half-Open and all probe slots are taken.
    TooManyRequests,
}

impl BlockType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockType::BreakerOpen => "BreakerOpen",
            BlockType::TooManyRequests => "TooManyRequests",
        }
    }

    fn default_msg(&self) -> &'static str {
        match self {
            BlockType::BreakerOpen => "circuit breaker is open",
            BlockType::TooManyRequests => "too many requests",
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// BlockError indicates the request was rejected by the circuit breaker,
// the protected operation has not been invoked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockError {
    block_type: BlockType,
    // name of the breaker that rejected the call
    breaker: String,
    // block_msg provides additional message for the block error.
    block_msg: String,
}

impl BlockError {
    pub fn new(block_type: BlockType, breaker: &str) -> Self {
        Self {
            block_type,
            breaker: breaker.into(),
            block_msg: block_type.default_msg().into(),
        }
    }

    pub fn new_with_msg(block_type: BlockType, breaker: &str, block_msg: String) -> Self {
        Self {
            block_type,
            breaker: breaker.into(),
            block_msg,
        }
    }

    pub fn block_type(&self) -> BlockType {
        self.block_type
    }

    pub fn breaker(&self) -> &str {
        &self.breaker
    }

    pub fn block_msg(&self) -> String {
        self.block_msg.clone()
    }

    pub fn is_open(&self) -> bool {
        self.block_type == BlockType::BreakerOpen
    }

    pub fn is_too_many_requests(&self) -> bool {
        self.block_type == BlockType::TooManyRequests
    }
}

impl fmt::Display for BlockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.breaker.is_empty() {
            write!(f, "{}", self.block_msg)
        } else {
            write!(f, "[{}] {}", self.breaker, self.block_msg)
        }
    }
}

impl error::Error for BlockError {}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn error_create() {
        let err = BlockError::new(BlockType::BreakerOpen, "external-api");
        assert_eq!(err.block_type(), BlockType::BreakerOpen);
        assert_eq!(err.breaker(), "external-api");
        assert_eq!(err.block_msg(), "circuit breaker is open");
        assert!(err.is_open());
        assert!(!err.is_too_many_requests());
        assert_eq!(err.to_string(), "[external-api] circuit breaker is open");

        let err = BlockError::new(BlockType::TooManyRequests, "");
        assert!(err.is_too_many_requests());
        assert_eq!(err.to_string(), "too many requests");

        let err = BlockError::new_with_msg(BlockType::TooManyRequests, "db", "mock msg".into());
        assert_eq!(err.block_msg(), "mock msg");
        assert_eq!(err.to_string(), "[db] mock msg");
    }

    #[test]
    fn block_type_display() {
        assert_eq!(BlockType::BreakerOpen.to_string(), "BreakerOpen");
        assert_eq!(BlockType::TooManyRequests.to_string(), "TooManyRequests");
    }
}
