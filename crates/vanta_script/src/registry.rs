//! Script class registry.
//!
//! The host discovers script classes by name. Each [`ScriptClass`] records a
//! constructor and the class's reflected fields; [`ScriptRegistry`] keeps
//! them in registration order so hosts can list classes deterministically.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::entity::Entity;
use crate::error::ScriptError;
use crate::field::ScriptField;
use crate::instance::ScriptInstance;
use crate::script::{Script, ScriptType, SharedScript};

/// A named, constructible script class.
#[derive(Debug)]
pub struct ScriptClass {
    name: &'static str,
    constructor: fn(Entity) -> Box<dyn Script>,
    fields: Vec<ScriptField>,
}

fn construct_boxed<T: ScriptType>(entity: Entity) -> Box<dyn Script> {
    Box::new(T::construct(entity))
}

impl ScriptClass {
    /// Describe the script type `T`.
    #[must_use]
    pub fn of<T: ScriptType>() -> Self {
        Self {
            name: T::CLASS_NAME,
            constructor: construct_boxed::<T>,
            fields: T::fields(),
        }
    }

    /// Returns the class name scripts are registered under.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the reflected fields the class declares.
    #[must_use]
    pub fn fields(&self) -> &[ScriptField] {
        &self.fields
    }

    /// Look up a declared field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&ScriptField> {
        self.fields.iter().find(|f| f.name == name)
    }

    fn construct(&self, entity: Entity) -> SharedScript {
        Arc::new(Mutex::new((self.constructor)(entity)))
    }
}

/// Every script class a host can instantiate.
#[derive(Debug, Default)]
pub struct ScriptRegistry {
    classes: HashMap<&'static str, Arc<ScriptClass>>,
    order: Vec<&'static str>,
}

impl ScriptRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `T` under [`ScriptType::CLASS_NAME`].
    ///
    /// Registering the same name again replaces the earlier class but keeps
    /// its position in [`class_names`](Self::class_names).
    pub fn register<T: ScriptType>(&mut self) -> &mut Self {
        let class = ScriptClass::of::<T>();
        debug!(
            class = class.name,
            fields = class.fields.len(),
            "registered script class"
        );
        if self.classes.insert(class.name, Arc::new(class)).is_none() {
            self.order.push(T::CLASS_NAME);
        }
        self
    }

    /// Look up a registered class by name.
    #[must_use]
    pub fn class(&self, name: &str) -> Option<&ScriptClass> {
        self.classes.get(name).map(Arc::as_ref)
    }

    /// Returns `true` if a class is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    /// Class names in registration order.
    pub fn class_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.order.iter().copied()
    }

    /// Returns the number of registered classes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if no class is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Construct the class `name` for `entity`. No hook runs yet.
    pub fn instantiate(&self, name: &str, entity: Entity) -> Result<ScriptInstance, ScriptError> {
        let class = self
            .classes
            .get(name)
            .ok_or_else(|| ScriptError::UnknownClass(name.to_owned()))?;
        let id = entity.id();
        let object = class.construct(entity);
        Ok(ScriptInstance::new(Arc::clone(class), id, object))
    }
}
