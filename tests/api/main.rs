mod circuit_breaker;
mod init;
