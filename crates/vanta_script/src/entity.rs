//! Entity handles.
//!
//! An [`EntityId`] is an opaque `u64` handle issued by the host. An
//! [`Entity`] pairs that handle with the [`Engine`] it came from, so scripts
//! can query and mutate the host-side entity without holding any of its data.
//! Entities are cheap views: they are built fresh whenever a script asks for
//! one and compare equal whenever their handles do.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use vanta_math::Vector3;

use crate::component::Component;
use crate::internal::Engine;
use crate::script::{Script, ScriptRef};

/// An opaque entity handle issued by the host.
///
/// Zero is reserved for "no entity" and is never handed out by a host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct EntityId(pub u64);

impl EntityId {
    /// The null handle.
    pub const NONE: EntityId = EntityId(0);

    /// Wrap a raw host handle.
    #[must_use]
    pub const fn from_raw(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw handle.
    #[must_use]
    pub const fn id(self) -> u64 {
        self.0
    }

    /// Returns `true` if this is a non-zero handle.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({:#018x})", self.0)
    }
}

/// A script-side view of a host entity.
///
/// Every accessor is a direct call across the internal-call boundary; nothing
/// is cached on the view.
#[derive(Clone)]
pub struct Entity {
    id: EntityId,
    engine: Engine,
}

impl Entity {
    /// A view of `id` in `engine`. The handle is not checked.
    #[must_use]
    pub fn new(id: EntityId, engine: Engine) -> Self {
        Self { id, engine }
    }

    /// Returns the entity's handle.
    #[must_use]
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// The engine this entity belongs to.
    #[must_use]
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Returns `true` unless this view wraps the null handle.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.id.is_valid()
    }

    /// World-space position from the entity's transform.
    #[must_use]
    pub fn position(&self) -> Vector3 {
        self.engine.calls().transform_position(self.id)
    }

    /// Move the entity's transform.
    pub fn set_position(&self, position: Vector3) {
        self.engine.calls().set_transform_position(self.id, position);
    }

    /// Returns `true` if the host reports a `T` on this entity.
    #[must_use]
    pub fn has_component<T: Component>(&self) -> bool {
        self.engine.calls().has_component(self.id, T::component_kind())
    }

    /// A fresh `T` bound to this entity, or `None` if the entity has no `T`.
    #[must_use]
    pub fn get_component<T: Component>(&self) -> Option<T> {
        if !self.has_component::<T>() {
            return None;
        }
        Some(T::bind(self.clone()))
    }

    /// Look up another entity by name in the same engine.
    #[must_use]
    pub fn entity_by_name(&self, name: &str) -> Option<Entity> {
        self.engine.entity_by_name(name)
    }

    /// The script instance running on this entity, if it is a `T`.
    ///
    /// Returns `None` when the entity has no script, when its script is of a
    /// different type, or when the instance is busy (a script asking for
    /// itself from inside one of its own hooks).
    #[must_use]
    pub fn as_script<T: Script>(&self) -> Option<ScriptRef<T>> {
        let object = self.engine.calls().script_instance(self.id)?;
        ScriptRef::new(object)
    }
}

impl PartialEq for Entity {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Entity {}

impl Hash for Entity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Entity").field(&self.id.0).finish()
    }
}
