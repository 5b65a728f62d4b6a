//! # vanta_host
//!
//! A reference host for Vanta scripts. It keeps every entity in memory,
//! answers the internal calls scripts make, and drives script hooks from a
//! fixed-rate frame loop.
//!
//! ## Startup Sequence
//!
//! 1. Load a [`SceneDescription`] from JSON and [`build`](SceneDescription::build)
//!    it into a [`Scene`].
//! 2. Register script classes in a [`vanta_script::ScriptRegistry`].
//! 3. Hand both to a [`ScriptRuntime`] and call [`run`](ScriptRuntime::run),
//!    or drive [`begin`](ScriptRuntime::begin) / [`tick`](ScriptRuntime::tick)
//!    / [`end`](ScriptRuntime::end) by hand.

pub mod config;
pub mod description;
pub mod error;
pub mod runtime;
pub mod scene;

pub use config::{MAX_TICKS_ENV, TICK_RATE_ENV, TickConfig};
pub use description::{EntityDescription, SceneDescription, ScriptDescription};
pub use error::HostError;
pub use runtime::ScriptRuntime;
pub use scene::{Body2D, LOG_HISTORY_LIMIT, LogRecord, Scene};
