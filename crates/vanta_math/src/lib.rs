//! # vanta_math
//!
//! Plain value-type vectors shared between scripts and the host. The types
//! are `#[repr(C)]` aggregates of `f32` so they can cross the internal-call
//! boundary unchanged, and they convert losslessly to and from [`glam`] for
//! anything heavier than componentwise arithmetic.

pub mod vector;

pub use vector::{Vector2, Vector3, Vector4};
