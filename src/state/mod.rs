//! State module for tracking sweep progress
//!
//! # Components
//!
//! - `SweepState`: Tracks where a single discovery request is in its page loop
//! - `RateLimitState`: Tracks the last granted fetch slot for rate limiting

mod rate_state;
mod sweep_state;

// Re-export main types
pub use rate_state::RateLimitState;
pub use sweep_state::SweepState;
