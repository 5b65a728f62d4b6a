//! Script runtime errors.

use crate::entity::EntityId;
use crate::field::FieldError;

/// Errors raised while instantiating or driving scripts.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    /// No class with this name has been registered.
    #[error("script class `{0}` is not registered")]
    UnknownClass(String),

    /// A hook other than `on_create` ran before the instance was created.
    #[error("{class} on {entity}: {hook} called before on_create")]
    NotCreated {
        class: &'static str,
        entity: EntityId,
        hook: &'static str,
    },

    /// `on_create` ran twice.
    #[error("{class} on {entity}: on_create called twice")]
    AlreadyCreated { class: &'static str, entity: EntityId },

    /// A hook ran after `on_destroy`.
    #[error("{class} on {entity}: {hook} called after on_destroy")]
    Destroyed {
        class: &'static str,
        entity: EntityId,
        hook: &'static str,
    },

    /// A previous hook panicked while holding the script.
    #[error("{class} on {entity}: script lock poisoned")]
    Poisoned { class: &'static str, entity: EntityId },

    #[error(transparent)]
    Field(#[from] FieldError),
}
