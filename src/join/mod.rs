pub mod buffer;

// Re-export commonly used types
pub use buffer::{ExpiredSlot, JoinBuffer, JoinStats};
