//! Script instances and hook ordering.
//!
//! A [`ScriptInstance`] is one constructed script bound to one entity. It
//! walks a fixed lifecycle:
//!
//! ```text
//! Constructed --create--> Created --update*--> Created --destroy--> Destroyed
//! ```
//!
//! Any call outside that order is rejected with a [`ScriptError`] and the
//! script's hook is not invoked.

use std::fmt;
use std::sync::{Arc, MutexGuard};

use tracing::trace;

use crate::entity::EntityId;
use crate::error::ScriptError;
use crate::field::{FieldError, FieldValue};
use crate::registry::ScriptClass;
use crate::script::{Script, SharedScript};

/// Where an instance is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// Built but `on_create` has not run.
    Constructed,
    /// `on_create` has run; updates are allowed.
    Created,
    /// `on_destroy` has run; no further hooks.
    Destroyed,
}

/// A constructed script bound to an entity.
pub struct ScriptInstance {
    class: Arc<ScriptClass>,
    entity: EntityId,
    object: SharedScript,
    state: LifecycleState,
    updates: u64,
}

impl ScriptInstance {
    pub(crate) fn new(class: Arc<ScriptClass>, entity: EntityId, object: SharedScript) -> Self {
        Self {
            class,
            entity,
            object,
            state: LifecycleState::Constructed,
            updates: 0,
        }
    }

    /// Returns the class this instance was built from.
    #[must_use]
    pub fn class(&self) -> &ScriptClass {
        &self.class
    }

    /// Returns the entity the script runs on.
    #[must_use]
    pub fn entity(&self) -> EntityId {
        self.entity
    }

    /// Returns the current lifecycle state.
    #[must_use]
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Number of `on_update` calls so far.
    #[must_use]
    pub fn updates(&self) -> u64 {
        self.updates
    }

    /// The shared script object, for hosts answering `script_instance`.
    #[must_use]
    pub fn object(&self) -> SharedScript {
        Arc::clone(&self.object)
    }

    /// Run `on_create`.
    pub fn create(&mut self) -> Result<(), ScriptError> {
        match self.state {
            LifecycleState::Constructed => {}
            LifecycleState::Created => {
                return Err(ScriptError::AlreadyCreated {
                    class: self.class.name(),
                    entity: self.entity,
                });
            }
            LifecycleState::Destroyed => return Err(self.destroyed("on_create")),
        }
        trace!(class = self.class.name(), entity = %self.entity, "on_create");
        self.lock()?.on_create();
        self.state = LifecycleState::Created;
        Ok(())
    }

    /// Run `on_update` with the frame time in seconds.
    pub fn update(&mut self, delta: f64) -> Result<(), ScriptError> {
        self.require_created("on_update")?;
        self.lock()?.on_update(delta);
        self.updates += 1;
        Ok(())
    }

    /// Run `on_destroy`. The instance accepts no hooks afterwards.
    pub fn destroy(&mut self) -> Result<(), ScriptError> {
        self.require_created("on_destroy")?;
        trace!(class = self.class.name(), entity = %self.entity, "on_destroy");
        self.lock()?.on_destroy();
        self.state = LifecycleState::Destroyed;
        Ok(())
    }

    /// Read a reflected field.
    pub fn field(&self, name: &str) -> Result<Option<FieldValue>, ScriptError> {
        Ok(self.lock()?.field(name))
    }

    /// Write a reflected field, checking it against the class declaration.
    pub fn set_field(&self, name: &str, value: FieldValue) -> Result<(), ScriptError> {
        let declared = self
            .class
            .field(name)
            .ok_or_else(|| FieldError::Unknown(name.to_owned()))?;
        if declared.field_type != value.field_type() {
            return Err(FieldError::TypeMismatch {
                expected: declared.field_type,
                found: value.field_type(),
            }
            .into());
        }
        self.lock()?.set_field(name, value)?;
        Ok(())
    }

    fn require_created(&self, hook: &'static str) -> Result<(), ScriptError> {
        match self.state {
            LifecycleState::Created => Ok(()),
            LifecycleState::Constructed => Err(ScriptError::NotCreated {
                class: self.class.name(),
                entity: self.entity,
                hook,
            }),
            LifecycleState::Destroyed => Err(self.destroyed(hook)),
        }
    }

    fn destroyed(&self, hook: &'static str) -> ScriptError {
        ScriptError::Destroyed {
            class: self.class.name(),
            entity: self.entity,
            hook,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Box<dyn Script>>, ScriptError> {
        self.object.lock().map_err(|_| ScriptError::Poisoned {
            class: self.class.name(),
            entity: self.entity,
        })
    }
}

impl fmt::Debug for ScriptInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptInstance")
            .field("class", &self.class.name())
            .field("entity", &self.entity)
            .field("state", &self.state)
            .field("updates", &self.updates)
            .finish()
    }
}
