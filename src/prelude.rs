//! Prelude module for infinite_calendar crate.
//!
//! Re-exports the derive_more macros and tracing macros used across modules.

#[allow(unused_imports)]
pub use derive_more::{Display, From, Into};
#[allow(unused_imports)]
pub use tracing::{debug, trace, warn};
