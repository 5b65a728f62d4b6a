//! # vanta_script
//!
//! The scripting API of the Vanta engine. Scripts see the engine only
//! through the [`InternalCalls`] boundary, which a host implements; this
//! crate wraps that boundary in typed handles.
//!
//! - [`Engine`]: cloneable handle to the host, hands out [`Entity`] views,
//!   [`Log`] and [`Input`].
//! - [`Entity`] / [`EntityId`]: entity views over opaque `u64` handles.
//! - [`Component`] and the built-in component views
//!   ([`TransformComponent`], [`Rigidbody2DComponent`], ...).
//! - [`Script`] / [`ScriptType`]: per-entity behavior with create, update
//!   and destroy hooks, plus reflected fields.
//! - [`ScriptRegistry`] / [`ScriptInstance`]: what a host uses to construct
//!   scripts by class name and drive their hooks in order.
//!
//! ## Writing a script
//!
//! ```rust
//! use vanta_math::Vector2;
//! use vanta_script::{Entity, KeyCode, Rigidbody2DComponent, Script, ScriptType};
//!
//! struct Mover {
//!     entity: Entity,
//!     body: Option<Rigidbody2DComponent>,
//! }
//!
//! impl Script for Mover {
//!     fn on_create(&mut self) {
//!         self.body = self.entity.get_component();
//!     }
//!
//!     fn on_update(&mut self, delta: f64) {
//!         if self.entity.engine().input().is_key_down(KeyCode::Space) {
//!             if let Some(body) = &self.body {
//!                 body.apply_linear_impulse_awake(Vector2::new(0.0, 2.0) * delta as f32);
//!             }
//!         }
//!     }
//! }
//!
//! impl ScriptType for Mover {
//!     const CLASS_NAME: &'static str = "Mover";
//!
//!     fn construct(entity: Entity) -> Self {
//!         Self { entity, body: None }
//!     }
//! }
//! ```

pub mod component;
pub mod entity;
pub mod error;
pub mod field;
pub mod input;
pub mod instance;
pub mod internal;
pub mod log;
pub mod registry;
pub mod script;

#[cfg(test)]
mod testing;

pub use component::{
    BoxCollider2DComponent, COMPONENT_NAMES, CameraComponent, CircleCollider2DComponent,
    CircleRendererComponent, Component, ComponentKind, NativeScriptComponent,
    Rigidbody2DComponent, ScriptComponent, SpriteComponent, TransformComponent,
};
pub use entity::{Entity, EntityId};
pub use error::ScriptError;
pub use field::{FieldError, FieldValue, ScriptField, ScriptFieldType};
pub use input::{Input, KeyCode, MouseButton, UnknownKey};
pub use instance::{LifecycleState, ScriptInstance};
pub use internal::{Engine, InternalCalls};
pub use log::{Log, LogLevel};
pub use registry::{ScriptClass, ScriptRegistry};
pub use script::{AsAny, Script, ScriptRef, ScriptType, SharedScript, share};
