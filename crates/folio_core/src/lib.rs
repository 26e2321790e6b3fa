//! Folio Core
//!
//! Foundational types shared by every Folio crate:
//!
//! - [`errors`]: the error taxonomy ([`LoadError`], [`PlaybackError`], ...)
//! - [`time`]: frame clocks feeding animation deltas
//! - [`math`]: rays and axis-aligned boxes used for picking

pub mod errors;
pub mod math;
pub mod time;

pub use errors::{BindError, ConfigError, FolioError, LoadError, PlaybackError, Result};
pub use math::{Aabb, Ray};
pub use time::{Clock, FrameClock, ManualClock};
