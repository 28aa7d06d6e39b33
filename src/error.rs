//! Stable, machine-readable error codes.
//!
//! Every error type that can reach an HTTP client implements [`ErrorCode`]
//! so responses carry a code that does not change when messages do.

pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    fn retryable(&self) -> bool {
        false
    }
}
