pub mod config;
pub mod error;
pub mod schedule;
pub mod session;

// Re-export common error type
pub use error::LensbookError;
