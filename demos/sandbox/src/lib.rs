//! Sandbox scripts.
//!
//! - [`Player`] moves with W/A/S/D by pushing its rigid body, and moves the
//!   camera in and out with Q/E.
//! - [`Camera`] follows the entity named `Player` at a fixed depth.
//! - [`JumpingEntity`] hops at random and changes color when it does.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use vanta_math::{Vector2, Vector3, Vector4};
use vanta_script::{
    Entity, FieldError, FieldValue, KeyCode, Rigidbody2DComponent, Script, ScriptField,
    ScriptFieldType, ScriptRef, ScriptRegistry, ScriptType, SpriteComponent,
};

/// Register every sandbox script class.
pub fn register(registry: &mut ScriptRegistry) {
    registry
        .register::<Player>()
        .register::<Camera>()
        .register::<JumpingEntity>();
}

pub struct Player {
    entity: Entity,
    pub speed: f32,
    camera: Option<ScriptRef<Camera>>,
    body: Option<Rigidbody2DComponent>,
}

impl Script for Player {
    fn on_create(&mut self) {
        self.entity.engine().log().info("Player created");

        self.camera = self
            .entity
            .entity_by_name("Camera")
            .and_then(|camera| camera.as_script::<Camera>());
        self.body = self.entity.get_component();
        if self.body.is_none() {
            self.entity
                .engine()
                .log()
                .warn("Player has no rigid body and cannot move");
        }
    }

    fn on_update(&mut self, delta: f64) {
        let input = self.entity.engine().input();
        let mut velocity = Vector2::ZERO;

        if input.is_key_down(KeyCode::W) {
            velocity.y += self.speed;
        }
        if input.is_key_down(KeyCode::S) {
            velocity.y -= self.speed;
        }
        if input.is_key_down(KeyCode::A) {
            velocity.x -= self.speed;
        }
        if input.is_key_down(KeyCode::D) {
            velocity.x += self.speed;
        }

        let step = self.speed * delta as f32;
        if let Some(camera) = &self.camera {
            if input.is_key_down(KeyCode::Q) {
                camera.with(|c| c.distance_z += step);
            }
            if input.is_key_down(KeyCode::E) {
                camera.with(|c| c.distance_z -= step);
            }
        }

        if let Some(body) = &self.body {
            body.apply_linear_impulse_awake(velocity * delta as f32);
        }
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "speed" => Some(self.speed.into()),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: FieldValue) -> Result<(), FieldError> {
        match name {
            "speed" => self.speed = value.try_into()?,
            _ => return Err(FieldError::Unknown(name.to_owned())),
        }
        Ok(())
    }
}

impl ScriptType for Player {
    const CLASS_NAME: &'static str = "Player";

    fn construct(entity: Entity) -> Self {
        Self {
            entity,
            speed: 5.0,
            camera: None,
            body: None,
        }
    }

    fn fields() -> Vec<ScriptField> {
        vec![ScriptField::new("speed", ScriptFieldType::Float)]
    }
}

pub struct Camera {
    entity: Entity,
    pub distance_z: f32,
    player: Option<Entity>,
}

impl Script for Camera {
    fn on_create(&mut self) {
        let position = self.entity.position();
        self.entity
            .set_position(follow_position(position, self.distance_z));

        self.player = self.entity.entity_by_name("Player");
        if self.player.is_none() {
            self.entity
                .engine()
                .log()
                .error("Failed to find player entity!");
        }
    }

    fn on_update(&mut self, _delta: f64) {
        if let Some(player) = &self.player {
            self.entity
                .set_position(follow_position(player.position(), self.distance_z));
        }
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "distance_z" => Some(self.distance_z.into()),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: FieldValue) -> Result<(), FieldError> {
        match name {
            "distance_z" => self.distance_z = value.try_into()?,
            _ => return Err(FieldError::Unknown(name.to_owned())),
        }
        Ok(())
    }
}

impl ScriptType for Camera {
    const CLASS_NAME: &'static str = "Camera";

    fn construct(entity: Entity) -> Self {
        Self {
            entity,
            distance_z: 5.0,
            player: None,
        }
    }

    fn fields() -> Vec<ScriptField> {
        vec![ScriptField::new("distance_z", ScriptFieldType::Float)]
    }
}

/// Chance per second that a [`JumpingEntity`] hops.
pub const JUMP_CHANCE_PER_SECOND: f64 = 0.1;

/// Upward impulse of a hop.
pub const JUMP_IMPULSE: Vector2 = Vector2::new(0.0, 2.0);

pub struct JumpingEntity {
    entity: Entity,
    rng: StdRng,
    jumps: u32,
}

impl JumpingEntity {
    fn recolor(&mut self) {
        if let Some(sprite) = self.entity.get_component::<SpriteComponent>() {
            let color = Vector4::new(
                self.rng.gen_range(0.0..1.0),
                self.rng.gen_range(0.0..1.0),
                self.rng.gen_range(0.0..1.0),
                self.rng.gen_range(0.0..1.0),
            );
            sprite.set_color(color);
        }
    }

    /// Number of hops so far.
    #[must_use]
    pub fn jumps(&self) -> u32 {
        self.jumps
    }
}

impl Script for JumpingEntity {
    fn on_create(&mut self) {
        self.recolor();
    }

    fn on_update(&mut self, delta: f64) {
        if delta <= 0.0 {
            return;
        }
        let chance = (delta * JUMP_CHANCE_PER_SECOND).min(1.0);
        if !self.rng.gen_bool(chance) {
            return;
        }

        if let Some(body) = self.entity.get_component::<Rigidbody2DComponent>() {
            body.apply_linear_impulse_awake(JUMP_IMPULSE);
        }
        self.recolor();
        self.jumps += 1;
        debug!(entity = %self.entity.id(), jumps = self.jumps, "jump");
    }
}

impl ScriptType for JumpingEntity {
    const CLASS_NAME: &'static str = "JumpingEntity";

    fn construct(entity: Entity) -> Self {
        Self {
            entity,
            rng: StdRng::from_entropy(),
            jumps: 0,
        }
    }
}

/// Where a camera with `distance_z` sits when following `target`.
#[must_use]
pub fn follow_position(target: Vector3, distance_z: f32) -> Vector3 {
    target.xy().extend(distance_z)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Arc;

    use vanta_host::{Scene, ScriptRuntime, TickConfig};
    use vanta_script::{CameraComponent, Component, EntityId, InternalCalls, LogLevel};

    use super::*;

    fn runtime(scene: Scene) -> ScriptRuntime {
        let mut registry = ScriptRegistry::new();
        register(&mut registry);
        ScriptRuntime::new(Arc::new(scene), registry, TickConfig::default())
    }

    fn player_and_camera() -> (Scene, EntityId, EntityId) {
        let scene = Scene::new();
        let player = scene.spawn("Player");
        scene.add_component(player, Rigidbody2DComponent::component_kind());
        scene.set_script(player, "Player", BTreeMap::new());

        let camera = scene.spawn("Camera");
        scene.add_component(camera, CameraComponent::component_kind());
        scene.set_position(camera, Vector3::new(7.0, 7.0, 0.0));
        scene.set_script(camera, "Camera", BTreeMap::new());
        (scene, player, camera)
    }

    #[test]
    fn test_register_all_classes() {
        let mut registry = ScriptRegistry::new();
        register(&mut registry);
        assert_eq!(
            registry.class_names().collect::<Vec<_>>(),
            ["Player", "Camera", "JumpingEntity"]
        );
    }

    #[test]
    fn test_camera_starts_at_its_depth() {
        let (scene, _, camera) = player_and_camera();
        let mut runtime = runtime(scene);
        runtime.begin().unwrap();
        assert_eq!(
            runtime.scene().position(camera),
            Some(Vector3::new(7.0, 7.0, 5.0))
        );
    }

    #[test]
    fn test_player_moves_and_camera_follows() {
        let (scene, player, camera) = player_and_camera();
        scene.press_key(KeyCode::D);
        scene.press_key(KeyCode::W);
        let mut runtime = runtime(scene);
        runtime.begin().unwrap();

        runtime.tick(0.1).unwrap();
        let after_first = runtime.scene().position(player).unwrap();
        assert!((after_first.x - 0.05).abs() < 1e-6);
        assert!((after_first.y - 0.05).abs() < 1e-6);

        runtime.tick(0.1).unwrap();
        assert_eq!(
            runtime.scene().position(camera),
            Some(follow_position(after_first, 5.0))
        );
        assert!(runtime.scene().position(player).unwrap().x > after_first.x);
    }

    #[test]
    fn test_q_and_e_move_the_camera() {
        let (scene, _, camera) = player_and_camera();
        scene.press_key(KeyCode::Q);
        let mut runtime = runtime(scene);
        runtime.begin().unwrap();

        runtime.tick(0.2).unwrap();
        let distance = runtime
            .instance(camera)
            .unwrap()
            .field("distance_z")
            .unwrap();
        assert_eq!(distance, Some(FieldValue::Float(6.0)));

        runtime.scene().release_key(KeyCode::Q);
        runtime.scene().press_key(KeyCode::E);
        runtime.tick(0.2).unwrap();
        runtime.tick(0.2).unwrap();
        let distance = runtime
            .instance(camera)
            .unwrap()
            .field("distance_z")
            .unwrap();
        assert_eq!(distance, Some(FieldValue::Float(4.0)));
    }

    #[test]
    fn test_speed_override() {
        let (scene, player, _) = player_and_camera();
        let mut fields = BTreeMap::new();
        fields.insert("speed".to_owned(), FieldValue::Float(10.0));
        scene.set_script(player, "Player", fields);
        scene.press_key(KeyCode::D);
        let mut runtime = runtime(scene);
        runtime.begin().unwrap();

        runtime.tick(0.1).unwrap();
        let body = runtime.scene().body(player).unwrap();
        assert!((body.velocity.x - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_camera_without_player_logs_error() {
        let scene = Scene::new();
        let camera = scene.spawn("Camera");
        scene.set_script(camera, "Camera", BTreeMap::new());
        let mut runtime = runtime(scene);
        runtime.begin().unwrap();
        runtime.tick(0.1).unwrap();

        let history = runtime.scene().log_history();
        assert!(history.iter().any(|r| r.level == LogLevel::Error
            && r.text == "Failed to find player entity!"));
        assert_eq!(
            runtime.scene().position(camera),
            Some(Vector3::new(0.0, 0.0, 5.0))
        );
    }

    #[test]
    fn test_jumping_entity_recolors_on_create() {
        let scene = Scene::new();
        let jumper = scene.spawn("Jumper");
        scene.add_component(jumper, SpriteComponent::component_kind());
        scene.add_component(jumper, Rigidbody2DComponent::component_kind());
        scene.set_script(jumper, "JumpingEntity", BTreeMap::new());
        let mut runtime = runtime(scene);
        runtime.begin().unwrap();

        let color = runtime.scene().sprite_color(jumper).unwrap();
        for channel in [color.x, color.y, color.z, color.w] {
            assert!((0.0..1.0).contains(&channel));
        }
    }

    #[test]
    fn test_jumping_entity_always_jumps_on_long_frames() {
        let scene = Scene::new();
        let jumper = scene.spawn("Jumper");
        scene.add_component(jumper, Rigidbody2DComponent::component_kind());
        scene.set_script(jumper, "JumpingEntity", BTreeMap::new());
        let mut runtime = runtime(scene);
        runtime.begin().unwrap();

        runtime.tick(1.0 / JUMP_CHANCE_PER_SECOND).unwrap();
        let body = runtime.scene().body(jumper).unwrap();
        assert_eq!(body.velocity, JUMP_IMPULSE);

        let object = runtime.scene().script_instance(jumper).unwrap();
        let jumps = ScriptRef::<JumpingEntity>::new(object)
            .and_then(|j| j.with(|j| j.jumps()));
        assert_eq!(jumps, Some(1));
    }

    #[test]
    fn test_zero_delta_never_jumps() {
        let scene = Scene::new();
        let jumper = scene.spawn("Jumper");
        scene.add_component(jumper, Rigidbody2DComponent::component_kind());
        scene.set_script(jumper, "JumpingEntity", BTreeMap::new());
        let mut runtime = runtime(scene);
        runtime.begin().unwrap();

        for _ in 0..100 {
            runtime.tick(0.0).unwrap();
        }
        assert_eq!(runtime.scene().body(jumper).unwrap().velocity, Vector2::ZERO);
    }
}
