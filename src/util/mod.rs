//! Utility modules: timeout and cancellation.

pub mod timeout;
