// error types shared by the breaker and its callers
pub mod base;
// state machine, executor and registry
pub mod circuitbreaker;
pub mod config;
