//! In-memory scene that answers every internal call.
//!
//! The [`Scene`] is the single source of truth for entity state while
//! scripts run. Entity handles are random 64-bit values taken from v4 UUIDs,
//! so they are opaque to scripts and never zero. Unknown handles read as
//! absent (no components, position at the origin) and writes to them are
//! dropped with a warning.
//!
//! Physics is intentionally tiny: a 2D body accumulates impulses into its
//! velocity and [`Scene::step`] moves awake bodies by `velocity * dt`.

use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::{DashMap, DashSet};
use tracing::{debug, error, info, trace, warn};
use uuid::Uuid;

use vanta_math::{Vector2, Vector3, Vector4};
use vanta_script::{
    Component, ComponentKind, EntityId, FieldValue, InternalCalls, KeyCode, LogLevel, MouseButton,
    Rigidbody2DComponent, ScriptComponent, SharedScript, SpriteComponent, TransformComponent,
};

/// Number of script log lines kept for inspection.
pub const LOG_HISTORY_LIMIT: usize = 256;

/// A 2D physics body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body2D {
    pub velocity: Vector2,
    pub mass: f32,
    pub awake: bool,
}

impl Default for Body2D {
    fn default() -> Self {
        Self {
            velocity: Vector2::ZERO,
            mass: 1.0,
            awake: true,
        }
    }
}

/// A script log line captured by the scene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub level: LogLevel,
    pub text: String,
}

#[derive(Debug)]
struct EntityRecord {
    name: String,
    spawn_index: u64,
    components: BTreeSet<ComponentKind>,
    position: Vector3,
    body: Option<Body2D>,
    sprite_color: Option<Vector4>,
    script_class: Option<String>,
    field_overrides: BTreeMap<String, FieldValue>,
}

/// Host-side entity storage and input state.
#[derive(Debug, Default)]
pub struct Scene {
    entities: DashMap<EntityId, EntityRecord>,
    names: DashMap<String, EntityId>,
    scripts: DashMap<EntityId, SharedScriptSlot>,
    keys: DashSet<KeyCode>,
    buttons: DashSet<MouseButton>,
    log_history: Mutex<VecDeque<LogRecord>>,
    next_spawn: AtomicU64,
}

/// Wrapper so the scene can derive `Debug` over script objects.
struct SharedScriptSlot(SharedScript);

impl std::fmt::Debug for SharedScriptSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SharedScript")
    }
}

impl Scene {
    /// Create an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an entity with a transform at the origin.
    ///
    /// Names need not be unique; name lookups return the first entity
    /// spawned with a given name.
    pub fn spawn(&self, name: impl Into<String>) -> EntityId {
        let name = name.into();
        let id = self.fresh_id();
        let spawn_index = self.next_spawn.fetch_add(1, Ordering::Relaxed);

        let mut components = BTreeSet::new();
        components.insert(TransformComponent::component_kind());

        self.names.entry(name.clone()).or_insert(id);
        self.entities.insert(
            id,
            EntityRecord {
                name: name.clone(),
                spawn_index,
                components,
                position: Vector3::ZERO,
                body: None,
                sprite_color: None,
                script_class: None,
                field_overrides: BTreeMap::new(),
            },
        );
        debug!(entity = %id, name = %name, "spawned entity");
        id
    }

    fn fresh_id(&self) -> EntityId {
        loop {
            let (raw, _) = Uuid::new_v4().as_u64_pair();
            let id = EntityId(raw);
            if id.is_valid() && !self.entities.contains_key(&id) {
                return id;
            }
        }
    }

    /// Remove an entity and its script attachment.
    ///
    /// Returns `true` if the entity existed.
    pub fn despawn(&self, id: EntityId) -> bool {
        let Some((_, record)) = self.entities.remove(&id) else {
            return false;
        };
        self.scripts.remove(&id);
        self.names.remove_if(&record.name, |_, owner| *owner == id);
        // Hand the name to the next oldest entity that carries it.
        let heir = self
            .entities
            .iter()
            .filter(|e| e.name == record.name)
            .min_by_key(|e| e.spawn_index)
            .map(|e| *e.key());
        if let Some(heir) = heir {
            self.names.entry(record.name).or_insert(heir);
        }
        true
    }

    /// Add a component kind to an entity.
    ///
    /// Rigid bodies start awake with unit mass; sprites start white.
    /// Returns `false` if the entity does not exist.
    pub fn add_component(&self, id: EntityId, kind: ComponentKind) -> bool {
        let Some(mut record) = self.entities.get_mut(&id) else {
            return false;
        };
        record.components.insert(kind);
        if kind == Rigidbody2DComponent::component_kind() && record.body.is_none() {
            record.body = Some(Body2D::default());
        }
        if kind == SpriteComponent::component_kind() && record.sprite_color.is_none() {
            record.sprite_color = Some(Vector4::ONE);
        }
        true
    }

    /// Attach a script class to an entity, with field values to apply after
    /// construction. Also adds the script component.
    pub fn set_script(
        &self,
        id: EntityId,
        class: impl Into<String>,
        field_overrides: BTreeMap<String, FieldValue>,
    ) -> bool {
        if !self.add_component(id, ScriptComponent::component_kind()) {
            return false;
        }
        if let Some(mut record) = self.entities.get_mut(&id) {
            record.script_class = Some(class.into());
            record.field_overrides = field_overrides;
        }
        true
    }

    /// Move an entity. Returns `false` if the entity does not exist.
    pub fn set_position(&self, id: EntityId, position: Vector3) -> bool {
        match self.entities.get_mut(&id) {
            Some(mut record) => {
                record.position = position;
                true
            }
            None => false,
        }
    }

    /// The entity's position, `None` if it does not exist.
    #[must_use]
    pub fn position(&self, id: EntityId) -> Option<Vector3> {
        self.entities.get(&id).map(|r| r.position)
    }

    /// The name the entity was spawned with.
    #[must_use]
    pub fn name(&self, id: EntityId) -> Option<String> {
        self.entities.get(&id).map(|r| r.name.clone())
    }

    /// The entity's 2D body, if it has a rigid body.
    #[must_use]
    pub fn body(&self, id: EntityId) -> Option<Body2D> {
        self.entities.get(&id).and_then(|r| r.body)
    }

    /// Put a body to sleep or wake it.
    pub fn set_body_awake(&self, id: EntityId, awake: bool) -> bool {
        match self.entities.get_mut(&id) {
            Some(mut record) => match record.body.as_mut() {
                Some(body) => {
                    body.awake = awake;
                    true
                }
                None => false,
            },
            None => false,
        }
    }

    /// The entity's sprite tint, if it has a sprite.
    #[must_use]
    pub fn sprite_color(&self, id: EntityId) -> Option<Vector4> {
        self.entities.get(&id).and_then(|r| r.sprite_color)
    }

    /// Returns the number of live entities.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// All entity handles in spawn order.
    #[must_use]
    pub fn entities(&self) -> Vec<EntityId> {
        let mut ordered: Vec<(u64, EntityId)> = self
            .entities
            .iter()
            .map(|e| (e.spawn_index, *e.key()))
            .collect();
        ordered.sort_unstable();
        ordered.into_iter().map(|(_, id)| id).collect()
    }

    /// Entities with a script class, in spawn order.
    #[must_use]
    pub fn scripted_entities(&self) -> Vec<(EntityId, String)> {
        self.entities()
            .into_iter()
            .filter_map(|id| {
                let class = self.entities.get(&id)?.script_class.clone()?;
                Some((id, class))
            })
            .collect()
    }

    /// Field values to apply to the entity's script after construction.
    #[must_use]
    pub fn field_overrides(&self, id: EntityId) -> Vec<(String, FieldValue)> {
        self.entities
            .get(&id)
            .map(|r| {
                r.field_overrides
                    .iter()
                    .map(|(name, value)| (name.clone(), *value))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Make a script object visible through `script_instance`.
    pub fn attach_script(&self, id: EntityId, script: SharedScript) {
        self.scripts.insert(id, SharedScriptSlot(script));
    }

    /// Forget every attached script object.
    pub fn detach_all_scripts(&self) {
        self.scripts.clear();
    }

    /// Hold a key down until [`release_key`](Self::release_key).
    pub fn press_key(&self, key: KeyCode) {
        self.keys.insert(key);
    }

    /// Release a held key.
    pub fn release_key(&self, key: KeyCode) {
        self.keys.remove(&key);
    }

    /// Hold a mouse button down until [`release_mouse`](Self::release_mouse).
    pub fn press_mouse(&self, button: MouseButton) {
        self.buttons.insert(button);
    }

    /// Release a held mouse button.
    pub fn release_mouse(&self, button: MouseButton) {
        self.buttons.remove(&button);
    }

    /// The most recent script log lines, oldest first.
    #[must_use]
    pub fn log_history(&self) -> Vec<LogRecord> {
        match self.log_history.lock() {
            Ok(history) => history.iter().cloned().collect(),
            Err(poisoned) => poisoned.into_inner().iter().cloned().collect(),
        }
    }

    /// Advance awake bodies by `velocity * dt`.
    pub fn step(&self, dt: f64) {
        let dt = dt as f32;
        for mut record in self.entities.iter_mut() {
            if let Some(body) = record.body {
                if body.awake {
                    let offset = body.velocity * dt;
                    record.position.x += offset.x;
                    record.position.y += offset.y;
                }
            }
        }
    }

    fn record_log(&self, level: LogLevel, text: &str) {
        let mut history = match self.log_history.lock() {
            Ok(history) => history,
            Err(poisoned) => poisoned.into_inner(),
        };
        if history.len() == LOG_HISTORY_LIMIT {
            history.pop_front();
        }
        history.push_back(LogRecord {
            level,
            text: text.to_owned(),
        });
    }
}

impl InternalCalls for Scene {
    fn log(&self, level: LogLevel, text: &str) {
        match level {
            LogLevel::Trace => trace!(target: "script", "{text}"),
            LogLevel::Info => info!(target: "script", "{text}"),
            LogLevel::Warn => warn!(target: "script", "{text}"),
            LogLevel::Error => error!(target: "script", "{text}"),
            LogLevel::Critical => error!(target: "script", critical = true, "{text}"),
        }
        self.record_log(level, text);
    }

    fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys.contains(&key)
    }

    fn is_mouse_down(&self, button: MouseButton) -> bool {
        self.buttons.contains(&button)
    }

    fn has_component(&self, entity: EntityId, kind: ComponentKind) -> bool {
        self.entities
            .get(&entity)
            .is_some_and(|r| r.components.contains(&kind))
    }

    fn entity_by_name(&self, name: &str) -> EntityId {
        self.names.get(name).map_or(EntityId::NONE, |id| *id)
    }

    fn script_instance(&self, entity: EntityId) -> Option<SharedScript> {
        self.scripts.get(&entity).map(|slot| slot.0.clone())
    }

    fn transform_position(&self, entity: EntityId) -> Vector3 {
        self.position(entity).unwrap_or(Vector3::ZERO)
    }

    fn set_transform_position(&self, entity: EntityId, position: Vector3) {
        if !self.set_position(entity, position) {
            warn!(entity = %entity, "set_transform_position on unknown entity");
        }
    }

    fn apply_linear_impulse(&self, entity: EntityId, impulse: Vector2, wake: bool) {
        let Some(mut record) = self.entities.get_mut(&entity) else {
            warn!(entity = %entity, "apply_linear_impulse on unknown entity");
            return;
        };
        let Some(body) = record.body.as_mut() else {
            warn!(entity = %entity, "apply_linear_impulse on entity without a body");
            return;
        };
        if !body.awake {
            if !wake {
                return;
            }
            body.awake = true;
        }
        body.velocity += impulse / body.mass;
    }

    fn set_sprite_color(&self, entity: EntityId, color: Vector4) {
        match self.entities.get_mut(&entity) {
            Some(mut record) if record.sprite_color.is_some() => record.sprite_color = Some(color),
            _ => warn!(entity = %entity, "set_sprite_color on entity without a sprite"),
        }
    }
}
