//! Debounced state writes.
//!
//! Provides:
//! - `DebounceGate` - coalesces bursts of updates into one settled value
//! - `DebounceConfig` - quiet period and optional max delay

mod config;
mod gate;

pub use config::DebounceConfig;
pub use gate::DebounceGate;
