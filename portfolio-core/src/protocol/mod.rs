pub mod http;

// Re-export comodi
pub use http::{ContactRequest, Envelope};
