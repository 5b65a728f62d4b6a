//! Frame-driven script runtime.
//!
//! [`ScriptRuntime`] owns one [`ScriptInstance`] per scripted entity and
//! drives their hooks against a [`Scene`]:
//!
//! 1. `begin` constructs every instance, applies authored field values,
//!    attaches the instances to the scene and then runs every `on_create`
//!    in spawn order. All instances exist before the first `on_create`, so a
//!    script may look up another entity's script while being created.
//! 2. `tick` runs every `on_update` with the frame time, then steps the
//!    scene's bodies.
//! 3. `end` runs every `on_destroy` and detaches the instances.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use vanta_script::{Engine, EntityId, LifecycleState, ScriptInstance, ScriptRegistry};

use crate::config::TickConfig;
use crate::error::HostError;
use crate::scene::Scene;

/// Drives every script in a scene through its lifecycle.
#[derive(Debug)]
pub struct ScriptRuntime {
    scene: Arc<Scene>,
    engine: Engine,
    registry: ScriptRegistry,
    config: TickConfig,
    instances: Vec<ScriptInstance>,
    tick_id: u64,
    running: bool,
}

impl ScriptRuntime {
    /// Create a stopped runtime over `scene`.
    #[must_use]
    pub fn new(scene: Arc<Scene>, registry: ScriptRegistry, config: TickConfig) -> Self {
        let engine = Engine::new(scene.clone());
        Self {
            scene,
            engine,
            registry,
            config,
            instances: Vec::new(),
            tick_id: 0,
            running: false,
        }
    }

    /// Returns the scene the scripts run against.
    #[must_use]
    pub fn scene(&self) -> &Arc<Scene> {
        &self.scene
    }

    /// The engine handle scripts are constructed with.
    #[must_use]
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Returns the script classes this runtime can instantiate.
    #[must_use]
    pub fn registry(&self) -> &ScriptRegistry {
        &self.registry
    }

    /// Returns the tick configuration.
    #[must_use]
    pub fn config(&self) -> &TickConfig {
        &self.config
    }

    /// Number of ticks run since the runtime was built.
    #[must_use]
    pub fn tick_id(&self) -> u64 {
        self.tick_id
    }

    /// Returns `true` between a successful `begin` and `end`.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// The live instances, in spawn order.
    #[must_use]
    pub fn instances(&self) -> &[ScriptInstance] {
        &self.instances
    }

    /// The instance running on `entity`, if any.
    #[must_use]
    pub fn instance(&self, entity: EntityId) -> Option<&ScriptInstance> {
        self.instances.iter().find(|i| i.entity() == entity)
    }

    /// Construct and create every scripted entity's script.
    ///
    /// An unknown script class aborts before any hook runs. Field values that
    /// do not match the class declaration are skipped with a warning. If any
    /// `on_create` fails, the scripts that were created are destroyed again
    /// and the runtime stays stopped.
    pub fn begin(&mut self) -> Result<(), HostError> {
        if self.running {
            return Err(HostError::AlreadyRunning);
        }

        let mut instances = Vec::new();
        for (id, class) in self.scene.scripted_entities() {
            instances.push(self.registry.instantiate(&class, self.engine.entity(id))?);
        }

        for instance in &instances {
            for (name, value) in self.scene.field_overrides(instance.entity()) {
                if let Err(err) = instance.set_field(&name, value) {
                    warn!(
                        class = instance.class().name(),
                        entity = %instance.entity(),
                        field = %name,
                        %err,
                        "skipping field override"
                    );
                }
            }
        }

        for instance in &instances {
            self.scene.attach_script(instance.entity(), instance.object());
        }

        self.instances = instances;
        self.running = true;

        let mut failure = None;
        for instance in &mut self.instances {
            if let Err(err) = instance.create() {
                warn!(entity = %instance.entity(), %err, "on_create failed");
                failure.get_or_insert(err);
            }
        }
        if let Some(err) = failure {
            if let Err(end_err) = self.end() {
                warn!(%end_err, "cleanup after failed create");
            }
            return Err(err.into());
        }

        info!(scripts = self.instances.len(), "scripts created");
        Ok(())
    }

    /// Run one frame: every `on_update`, then the physics step.
    ///
    /// A failing script does not stop the others from updating or the scene
    /// from stepping; the first failure is returned once the frame is done.
    pub fn tick(&mut self, dt: f64) -> Result<(), HostError> {
        if !self.running {
            return Err(HostError::NotRunning);
        }
        self.tick_id += 1;
        debug!(tick_id = self.tick_id, dt, scripts = self.instances.len(), "tick start");

        let mut failure = None;
        for instance in &mut self.instances {
            if let Err(err) = instance.update(dt) {
                warn!(
                    tick_id = self.tick_id,
                    entity = %instance.entity(),
                    %err,
                    "on_update failed"
                );
                failure.get_or_insert(err);
            }
        }
        self.scene.step(dt);

        match failure {
            Some(err) => Err(err.into()),
            None => Ok(()),
        }
    }

    /// Destroy every created script and detach all instances.
    pub fn end(&mut self) -> Result<(), HostError> {
        if !self.running {
            return Err(HostError::NotRunning);
        }
        self.running = false;

        let mut result = Ok(());
        for instance in &mut self.instances {
            if instance.state() == LifecycleState::Created {
                if let Err(err) = instance.destroy() {
                    warn!(entity = %instance.entity(), %err, "on_destroy failed");
                    result = Err(err.into());
                }
            }
        }
        self.scene.detach_all_scripts();
        self.instances.clear();

        info!(ticks = self.tick_id, "scripts destroyed");
        result
    }

    /// Run `begin`, the fixed-rate tick loop and `end`.
    ///
    /// Blocks until `max_ticks` ticks have run; with `max_ticks == 0` it never
    /// returns. Returns the number of ticks run. A failed tick stops the loop,
    /// but `end` still runs before the error is returned.
    pub fn run(&mut self) -> Result<u64, HostError> {
        self.config.validate()?;
        let tick_duration = Duration::from_secs_f64(self.config.tick_seconds());
        let dt = tick_duration.as_secs_f64();

        info!(
            tick_rate = self.config.tick_rate,
            max_ticks = self.config.max_ticks,
            "starting script runtime"
        );

        if !self.running {
            self.begin()?;
        }

        let mut tick_count = 0u64;
        loop {
            let start = Instant::now();
            if let Err(err) = self.tick(dt) {
                if let Err(end_err) = self.end() {
                    warn!(%end_err, "cleanup after failed tick");
                }
                return Err(err);
            }

            tick_count += 1;
            if self.config.max_ticks > 0 && tick_count >= self.config.max_ticks {
                break;
            }

            let elapsed = start.elapsed();
            if elapsed < tick_duration {
                std::thread::sleep(tick_duration - elapsed);
            } else {
                warn!(
                    tick_id = self.tick_id,
                    elapsed_ms = elapsed.as_millis() as u64,
                    budget_ms = tick_duration.as_millis() as u64,
                    "tick exceeded time budget"
                );
            }
        }

        self.end()?;
        Ok(tick_count)
    }
}
