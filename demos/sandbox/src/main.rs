use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use vanta_host::{SceneDescription, ScriptRuntime, TickConfig};
use vanta_script::{KeyCode, ScriptRegistry};

const DEFAULT_SCENE: &str = include_str!("../scenes/sandbox.json");

#[derive(Parser)]
#[command(name = "sandbox", about = "Run the sandbox scripts against an in-memory scene")]
struct Args {
    /// Scene file to load (defaults to the bundled sandbox scene)
    #[arg(short, long)]
    scene: Option<PathBuf>,

    /// Number of ticks to run (0 = until interrupted)
    #[arg(short, long)]
    ticks: Option<u64>,

    /// Ticks per second
    #[arg(long)]
    tick_rate: Option<f64>,

    /// Keys held down for the whole run, e.g. `--hold D W`
    #[arg(long, num_args = 1..)]
    hold: Vec<KeyCode>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("sandbox=info".parse()?)
                .add_directive("script=info".parse()?),
        )
        .init();

    let args = Args::parse();

    let description = match &args.scene {
        Some(path) => {
            info!(path = %path.display(), "loading scene");
            SceneDescription::load(path)?
        }
        None => SceneDescription::from_json(DEFAULT_SCENE).context("bundled scene is invalid")?,
    };
    let scene = Arc::new(description.build()?);

    let mut config = TickConfig::from_env()?;
    if let Some(ticks) = args.ticks {
        config.max_ticks = ticks;
    }
    if let Some(rate) = args.tick_rate {
        config.tick_rate = rate;
    }

    for key in &args.hold {
        scene.press_key(*key);
    }
    info!(
        entities = scene.entity_count(),
        held = ?args.hold.iter().map(|k| k.name()).collect::<Vec<_>>(),
        "scene ready"
    );

    let mut registry = ScriptRegistry::new();
    sandbox::register(&mut registry);

    let mut runtime = ScriptRuntime::new(scene.clone(), registry, config);
    let ticks = runtime.run()?;

    for id in scene.entities() {
        let name = scene.name(id).unwrap_or_default();
        if let Some(position) = scene.position(id) {
            info!(
                entity = %name,
                x = position.x,
                y = position.y,
                z = position.z,
                "final position"
            );
        }
    }
    info!(ticks, "sandbox finished");
    Ok(())
}
