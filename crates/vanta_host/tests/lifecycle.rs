use std::sync::Arc;

use vanta_host::{Scene, SceneDescription, ScriptRuntime, TickConfig};
use vanta_math::{Vector2, Vector3};
use vanta_script::{
    CameraComponent, Entity, InternalCalls, LogLevel, Rigidbody2DComponent, Script, ScriptRegistry,
    ScriptType, TransformComponent,
};

struct Alpha {
    entity: Entity,
    ticks: u32,
}

impl Script for Alpha {
    fn on_create(&mut self) {
        self.entity.engine().log().info("alpha create");
    }

    fn on_update(&mut self, _delta: f64) {
        self.ticks += 1;
        self.entity
            .engine()
            .log()
            .info(format!("alpha update {}", self.ticks));
    }

    fn on_destroy(&mut self) {
        self.entity.engine().log().info("alpha destroy");
    }
}

impl ScriptType for Alpha {
    const CLASS_NAME: &'static str = "Alpha";

    fn construct(entity: Entity) -> Self {
        Self { entity, ticks: 0 }
    }
}

/// Looks up Alpha's script while being created.
struct Watcher {
    entity: Entity,
}

impl Script for Watcher {
    fn on_create(&mut self) {
        let log = self.entity.engine().log();
        match self
            .entity
            .entity_by_name("Alpha")
            .and_then(|alpha| alpha.as_script::<Alpha>())
        {
            Some(alpha) => log.info(format!(
                "watcher sees alpha at {}",
                alpha.with(|a| a.ticks).unwrap_or(u32::MAX)
            )),
            None => log.error("watcher lost alpha"),
        }
        if self.entity.entity_by_name("Nobody").is_none() {
            log.warn("no one there");
        }
    }

    fn on_destroy(&mut self) {
        self.entity.engine().log().info("watcher destroy");
    }
}

impl ScriptType for Watcher {
    const CLASS_NAME: &'static str = "Watcher";

    fn construct(entity: Entity) -> Self {
        Self { entity }
    }
}

const SCENE: &str = r#"{
    "entities": [
        { "name": "Alpha", "components": ["Rigidbody2D"], "script": { "class": "Alpha" } },
        { "name": "Watcher", "script": { "class": "Watcher" } },
        { "name": "Rock", "position": { "x": 3.0, "y": 0.0, "z": 0.0 } }
    ]
}"#;

fn registry() -> ScriptRegistry {
    let mut registry = ScriptRegistry::new();
    registry.register::<Alpha>().register::<Watcher>();
    registry
}

fn texts(scene: &Scene) -> Vec<String> {
    scene.log_history().into_iter().map(|r| r.text).collect()
}

#[test]
fn hooks_run_in_lifecycle_order() {
    let scene = Arc::new(SceneDescription::from_json(SCENE).unwrap().build().unwrap());
    let mut runtime = ScriptRuntime::new(scene.clone(), registry(), TickConfig::default());

    runtime.begin().unwrap();
    runtime.tick(1.0 / 60.0).unwrap();
    runtime.tick(1.0 / 60.0).unwrap();
    runtime.end().unwrap();

    assert_eq!(
        texts(&scene),
        [
            "alpha create",
            "watcher sees alpha at 0",
            "no one there",
            "alpha update 1",
            "alpha update 2",
            "alpha destroy",
            "watcher destroy",
        ]
    );
    let levels: Vec<LogLevel> = scene.log_history().iter().map(|r| r.level).collect();
    assert_eq!(levels[2], LogLevel::Warn);
}

#[test]
fn components_follow_the_scene() {
    let scene = Arc::new(SceneDescription::from_json(SCENE).unwrap().build().unwrap());
    let runtime = ScriptRuntime::new(scene.clone(), registry(), TickConfig::default());
    let engine = runtime.engine();

    let alpha = engine.entity_by_name("Alpha").unwrap();
    let rock = engine.entity_by_name("Rock").unwrap();

    for entity in [&alpha, &rock] {
        assert_eq!(
            entity.has_component::<Rigidbody2DComponent>(),
            entity.get_component::<Rigidbody2DComponent>().is_some()
        );
        assert!(entity.get_component::<TransformComponent>().is_some());
        assert!(entity.get_component::<CameraComponent>().is_none());
    }
    assert!(alpha.has_component::<Rigidbody2DComponent>());
    assert!(!rock.has_component::<Rigidbody2DComponent>());

    let transform = rock.get_component::<TransformComponent>().unwrap();
    assert_eq!(transform.position(), Vector3::new(3.0, 0.0, 0.0));
    transform.set_position(Vector3::new(3.0, 4.0, 0.0));
    assert_eq!(scene.position(rock.id()), Some(Vector3::new(3.0, 4.0, 0.0)));
}

#[test]
fn sleeping_body_ignores_impulse_without_wake() {
    let scene = Arc::new(SceneDescription::from_json(SCENE).unwrap().build().unwrap());
    let mut runtime = ScriptRuntime::new(scene.clone(), registry(), TickConfig::default());
    let alpha = runtime.engine().entity_by_name("Alpha").unwrap();
    let body = alpha.get_component::<Rigidbody2DComponent>().unwrap();

    scene.set_body_awake(alpha.id(), false);
    body.apply_linear_impulse(Vector2::new(0.0, 2.0), false);
    runtime.begin().unwrap();
    runtime.tick(1.0).unwrap();
    assert_eq!(alpha.position(), Vector3::ZERO);

    body.apply_linear_impulse_awake(Vector2::new(0.0, 2.0));
    runtime.tick(0.5).unwrap();
    assert_eq!(alpha.position(), Vector3::new(0.0, 1.0, 0.0));
    runtime.end().unwrap();
}

#[test]
fn unknown_names_resolve_to_none() {
    let scene = Arc::new(Scene::new());
    let runtime = ScriptRuntime::new(scene.clone(), registry(), TickConfig::default());
    assert!(runtime.engine().entity_by_name("Alpha").is_none());
    assert!(!scene.entity_by_name("Alpha").is_valid());
}
