//! The script trait and shared script objects.
//!
//! A script is a value attached to one entity that the host drives through
//! three hooks: [`Script::on_create`] once, [`Script::on_update`] every frame,
//! and [`Script::on_destroy`] once at the end. Ordering is enforced by
//! [`ScriptInstance`](crate::ScriptInstance), not by the trait.

use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use std::sync::{Arc, Mutex};

use crate::entity::Entity;
use crate::field::{FieldError, FieldValue, ScriptField};

/// Object-safe access to [`Any`], implemented for every `'static` type.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Per-entity behavior driven by the host.
pub trait Script: AsAny + Send {
    fn on_create(&mut self) {}

    /// Called once per frame with the frame time in seconds.
    fn on_update(&mut self, _delta: f64) {}

    fn on_destroy(&mut self) {}

    /// Current value of a reflected field.
    fn field(&self, _name: &str) -> Option<FieldValue> {
        None
    }

    /// Overwrite a reflected field.
    fn set_field(&mut self, name: &str, _value: FieldValue) -> Result<(), FieldError> {
        Err(FieldError::Unknown(name.to_owned()))
    }
}

/// A script class that a [`ScriptRegistry`](crate::ScriptRegistry) can
/// construct by name.
pub trait ScriptType: Script + Sized {
    const CLASS_NAME: &'static str;

    /// Build the script for `entity`. Runs before any hook; do not touch
    /// other entities here, do it in [`Script::on_create`].
    fn construct(entity: Entity) -> Self;

    /// Reflected fields, readable through [`Script::field`].
    fn fields() -> Vec<ScriptField> {
        Vec::new()
    }
}

/// A script object shared between its instance and the host.
pub type SharedScript = Arc<Mutex<Box<dyn Script>>>;

/// A typed reference to another entity's running script.
pub struct ScriptRef<T> {
    object: SharedScript,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Script> ScriptRef<T> {
    /// Wrap `object` if it holds a `T`.
    ///
    /// Returns `None` if the object is a different type or cannot be locked
    /// right now.
    #[must_use]
    pub fn new(object: SharedScript) -> Option<Self> {
        let is_t = {
            let guard = object.try_lock().ok()?;
            let script: &dyn Script = &**guard;
            script.as_any().is::<T>()
        };
        is_t.then(|| Self {
            object,
            _marker: PhantomData,
        })
    }

    /// Run `f` against the script.
    ///
    /// Returns `None` without calling `f` if the script is currently running
    /// one of its own hooks or a previous hook panicked.
    pub fn with<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        let mut guard = self.object.try_lock().ok()?;
        let script: &mut dyn Script = &mut **guard;
        script.as_any_mut().downcast_mut::<T>().map(f)
    }
}

impl<T> Clone for ScriptRef<T> {
    fn clone(&self) -> Self {
        Self {
            object: Arc::clone(&self.object),
            _marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for ScriptRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptRef")
            .field("type", &std::any::type_name::<T>())
            .finish_non_exhaustive()
    }
}

/// Box a fresh `T` as a shared script object.
#[must_use]
pub fn share<T: Script>(script: T) -> SharedScript {
    let boxed: Box<dyn Script> = Box::new(script);
    Arc::new(Mutex::new(boxed))
}
