//! The internal-call boundary between scripts and the host engine.
//!
//! [`InternalCalls`] lists every function a host must provide. Scripts never
//! see the trait object directly; they hold an [`Engine`], a cheap cloneable
//! handle that hands out [`Entity`] views plus the [`Log`] and [`Input`]
//! wrappers.

use std::fmt;
use std::sync::Arc;

use vanta_math::{Vector2, Vector3, Vector4};

use crate::component::ComponentKind;
use crate::entity::{Entity, EntityId};
use crate::input::{Input, KeyCode, MouseButton};
use crate::log::{Log, LogLevel};
use crate::script::SharedScript;

/// Functions implemented by the host and called from script code.
///
/// Lookups that fail are reported as absence ([`EntityId::NONE`], `None`,
/// `false`), never as errors. Writes to entities the host does not know are
/// the host's business; scripts get no feedback.
pub trait InternalCalls: Send + Sync {
    /// Emit a script diagnostic.
    fn log(&self, level: LogLevel, text: &str);

    /// Returns `true` while `key` is held.
    fn is_key_down(&self, key: KeyCode) -> bool;

    /// Returns `true` while `button` is held.
    fn is_mouse_down(&self, button: MouseButton) -> bool;

    /// Returns `true` if `entity` exists and has a component of `kind`.
    fn has_component(&self, entity: EntityId, kind: ComponentKind) -> bool;

    /// The entity with this name, or [`EntityId::NONE`].
    fn entity_by_name(&self, name: &str) -> EntityId;

    /// The script object running on `entity`, if any.
    fn script_instance(&self, entity: EntityId) -> Option<SharedScript>;

    /// World-space position of `entity`'s transform.
    fn transform_position(&self, entity: EntityId) -> Vector3;

    /// Move `entity`'s transform.
    fn set_transform_position(&self, entity: EntityId, position: Vector3);

    /// Apply a linear impulse at the center of a 2D body.
    fn apply_linear_impulse(&self, entity: EntityId, impulse: Vector2, wake: bool);

    /// Tint `entity`'s sprite with an RGBA color.
    fn set_sprite_color(&self, entity: EntityId, color: Vector4);
}

/// A handle to the host, shared by every entity view a script creates.
#[derive(Clone)]
pub struct Engine {
    calls: Arc<dyn InternalCalls>,
}

impl Engine {
    /// Wrap a host's internal-call table.
    #[must_use]
    pub fn new(calls: Arc<dyn InternalCalls>) -> Self {
        Self { calls }
    }

    /// The raw internal-call table.
    #[must_use]
    pub fn calls(&self) -> &dyn InternalCalls {
        self.calls.as_ref()
    }

    /// Script logging through the host.
    #[must_use]
    pub fn log(&self) -> Log<'_> {
        Log::new(self.calls())
    }

    /// Input state polled from the host.
    #[must_use]
    pub fn input(&self) -> Input<'_> {
        Input::new(self.calls())
    }

    /// Wrap a raw handle. The handle is not checked against the host.
    #[must_use]
    pub fn entity(&self, id: EntityId) -> Entity {
        Entity::new(id, self.clone())
    }

    /// Look up an entity by name, `None` if the host has no match.
    #[must_use]
    pub fn entity_by_name(&self, name: &str) -> Option<Entity> {
        let id = self.calls.entity_by_name(name);
        if !id.is_valid() {
            return None;
        }
        Some(self.entity(id))
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine").finish_non_exhaustive()
    }
}
