//! In-test host that records every internal call.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use vanta_math::{Vector2, Vector3, Vector4};

use crate::component::{Component, ComponentKind, TransformComponent};
use crate::entity::EntityId;
use crate::input::{KeyCode, MouseButton};
use crate::internal::{Engine, InternalCalls};
use crate::log::LogLevel;
use crate::script::SharedScript;

#[derive(Debug, Clone, PartialEq)]
pub enum FakeCall {
    Log(LogLevel, String),
    Impulse(EntityId, Vector2, bool),
    SpriteColor(EntityId, Vector4),
}

#[derive(Default)]
struct FakeEntity {
    name: String,
    components: HashSet<ComponentKind>,
    position: Vector3,
}

#[derive(Default)]
struct State {
    next_id: u64,
    entities: HashMap<EntityId, FakeEntity>,
    scripts: HashMap<EntityId, SharedScript>,
    keys: HashSet<KeyCode>,
    buttons: HashSet<MouseButton>,
    calls: Vec<FakeCall>,
}

#[derive(Default)]
pub struct FakeHost {
    state: Mutex<State>,
}

impl FakeHost {
    pub fn engine() -> (Arc<FakeHost>, Engine) {
        let host = Arc::new(FakeHost::default());
        let engine = Engine::new(host.clone());
        (host, engine)
    }

    /// Add an entity; every entity gets a transform.
    pub fn spawn(&self, name: &str, components: &[ComponentKind]) -> EntityId {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let id = EntityId(state.next_id);
        let mut kinds: HashSet<ComponentKind> = components.iter().copied().collect();
        kinds.insert(TransformComponent::component_kind());
        state.entities.insert(
            id,
            FakeEntity {
                name: name.to_owned(),
                components: kinds,
                position: Vector3::ZERO,
            },
        );
        id
    }

    pub fn attach_script(&self, id: EntityId, script: SharedScript) {
        self.state.lock().unwrap().scripts.insert(id, script);
    }

    pub fn press(&self, key: KeyCode) {
        self.state.lock().unwrap().keys.insert(key);
    }

    pub fn press_mouse(&self, button: MouseButton) {
        self.state.lock().unwrap().buttons.insert(button);
    }

    pub fn position(&self, id: EntityId) -> Vector3 {
        self.state.lock().unwrap().entities[&id].position
    }

    pub fn set_position(&self, id: EntityId, position: Vector3) {
        if let Some(e) = self.state.lock().unwrap().entities.get_mut(&id) {
            e.position = position;
        }
    }

    pub fn calls(&self) -> Vec<FakeCall> {
        self.state.lock().unwrap().calls.clone()
    }
}

impl InternalCalls for FakeHost {
    fn log(&self, level: LogLevel, text: &str) {
        self.state
            .lock()
            .unwrap()
            .calls
            .push(FakeCall::Log(level, text.to_owned()));
    }

    fn is_key_down(&self, key: KeyCode) -> bool {
        self.state.lock().unwrap().keys.contains(&key)
    }

    fn is_mouse_down(&self, button: MouseButton) -> bool {
        self.state.lock().unwrap().buttons.contains(&button)
    }

    fn has_component(&self, entity: EntityId, kind: ComponentKind) -> bool {
        self.state
            .lock()
            .unwrap()
            .entities
            .get(&entity)
            .is_some_and(|e| e.components.contains(&kind))
    }

    fn entity_by_name(&self, name: &str) -> EntityId {
        self.state
            .lock()
            .unwrap()
            .entities
            .iter()
            .find(|(_, e)| e.name == name)
            .map_or(EntityId::NONE, |(id, _)| *id)
    }

    fn script_instance(&self, entity: EntityId) -> Option<SharedScript> {
        self.state.lock().unwrap().scripts.get(&entity).cloned()
    }

    fn transform_position(&self, entity: EntityId) -> Vector3 {
        self.state
            .lock()
            .unwrap()
            .entities
            .get(&entity)
            .map_or(Vector3::ZERO, |e| e.position)
    }

    fn set_transform_position(&self, entity: EntityId, position: Vector3) {
        self.set_position(entity, position);
    }

    fn apply_linear_impulse(&self, entity: EntityId, impulse: Vector2, wake: bool) {
        self.state
            .lock()
            .unwrap()
            .calls
            .push(FakeCall::Impulse(entity, impulse, wake));
    }

    fn set_sprite_color(&self, entity: EntityId, color: Vector4) {
        self.state
            .lock()
            .unwrap()
            .calls
            .push(FakeCall::SpriteColor(entity, color));
    }
}
