//! quad_sfx
//!
//! Loading and playing short sound effects. Picks the best audio backend the
//! platform offers once, and hides the differences (and mobile autoplay rules)
//! behind [audio::SoundLoader].

pub mod audio;
pub mod backend;
pub mod conf;
pub mod fs;
pub mod input;
pub mod prelude;

mod error;

pub use error::Error;

#[cfg(not(feature = "log-rs"))]
/// Logging macros, available with miniquad "log-impl" feature.
pub mod logging {
    pub use miniquad::{debug, error, info, trace, warn};
}
#[cfg(feature = "log-rs")]
// Use logging facade
pub use ::log as logging;
