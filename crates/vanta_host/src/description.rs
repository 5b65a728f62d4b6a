//! JSON scene files.
//!
//! ```json
//! {
//!   "entities": [
//!     {
//!       "name": "Player",
//!       "position": { "x": 0.0, "y": 1.0, "z": 0.0 },
//!       "components": ["Rigidbody2D", "Sprite"],
//!       "script": { "class": "Player", "fields": { "speed": { "float": 8.0 } } }
//!     }
//!   ]
//! }
//! ```
//!
//! Component names are the built-in names (`"Rigidbody2D"`, `"Sprite"`); the
//! Rust type name with its `Component` suffix is accepted too. Every entity
//! gets a transform whether it is listed or not.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use vanta_math::Vector3;
use vanta_script::{ComponentKind, FieldValue};

use crate::error::HostError;
use crate::scene::Scene;

/// A whole scene file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    #[serde(default)]
    pub entities: Vec<EntityDescription>,
}

/// One entity in a scene file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EntityDescription {
    pub name: String,
    #[serde(default)]
    pub position: Vector3,
    #[serde(default)]
    pub components: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script: Option<ScriptDescription>,
}

/// The script attached to an entity, with authored field values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScriptDescription {
    pub class: String,
    #[serde(default)]
    pub fields: BTreeMap<String, FieldValue>,
}

impl SceneDescription {
    /// Parse a scene from JSON text. Unknown keys are rejected.
    pub fn from_json(text: &str) -> Result<Self, HostError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read and parse a scene file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, HostError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| HostError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Spawn every described entity into a fresh scene, in file order.
    pub fn build(&self) -> Result<Scene, HostError> {
        let scene = Scene::new();
        for desc in &self.entities {
            let kinds = desc
                .components
                .iter()
                .map(|component| {
                    resolve_component(component).ok_or_else(|| HostError::UnknownComponent {
                        entity: desc.name.clone(),
                        component: component.clone(),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;

            let id = scene.spawn(desc.name.as_str());
            scene.set_position(id, desc.position);
            for kind in kinds {
                scene.add_component(id, kind);
            }
            if let Some(script) = &desc.script {
                scene.set_script(id, script.class.as_str(), script.fields.clone());
            }
        }
        debug!(entities = scene.entity_count(), "built scene");
        Ok(scene)
    }
}

fn resolve_component(name: &str) -> Option<ComponentKind> {
    ComponentKind::builtin(name)
        .or_else(|| ComponentKind::builtin(name.strip_suffix("Component")?))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use vanta_script::{
        Component, InternalCalls, Rigidbody2DComponent, ScriptComponent, SpriteComponent,
    };

    use super::*;

    const SCENE: &str = r#"{
        "entities": [
            {
                "name": "Player",
                "position": { "x": 1.0, "y": 2.0, "z": 0.0 },
                "components": ["Rigidbody2DComponent", "Sprite"],
                "script": { "class": "Player", "fields": { "speed": { "float": 8.0 } } }
            },
            { "name": "Ground" }
        ]
    }"#;

    #[test]
    fn test_build_scene() {
        let scene = SceneDescription::from_json(SCENE).unwrap().build().unwrap();
        assert_eq!(scene.entity_count(), 2);

        let player = scene.entity_by_name("Player");
        assert!(player.is_valid());
        assert_eq!(scene.position(player), Some(Vector3::new(1.0, 2.0, 0.0)));
        assert!(scene.has_component(player, Rigidbody2DComponent::component_kind()));
        assert!(scene.has_component(player, SpriteComponent::component_kind()));
        assert!(scene.has_component(player, ScriptComponent::component_kind()));
        assert_eq!(
            scene.field_overrides(player),
            vec![("speed".to_owned(), FieldValue::Float(8.0))]
        );

        let ground = scene.entity_by_name("Ground");
        assert_eq!(scene.position(ground), Some(Vector3::ZERO));
        assert!(!scene.has_component(ground, ScriptComponent::component_kind()));
        assert_eq!(scene.entities(), vec![player, ground]);
    }

    #[test]
    fn test_unknown_component() {
        let desc = SceneDescription::from_json(
            r#"{ "entities": [ { "name": "Box", "components": ["Teleporter"] } ] }"#,
        )
        .unwrap();
        let err = desc.build().unwrap_err();
        assert!(matches!(
            err,
            HostError::UnknownComponent { entity, component }
                if entity == "Box" && component == "Teleporter"
        ));
    }

    #[test]
    fn test_component_names_resolve_both_ways() {
        assert_eq!(
            resolve_component("Camera"),
            Some(ComponentKind::from_name("Camera"))
        );
        assert_eq!(
            resolve_component("CameraComponent"),
            Some(ComponentKind::from_name("Camera"))
        );
        assert_eq!(resolve_component("Component"), None);
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let typo = r#"{ "entities": [ { "name": "Box", "componets": ["Sprite"] } ] }"#;
        assert!(matches!(
            SceneDescription::from_json(typo),
            Err(HostError::Json(_))
        ));

        let typo = r#"{ "entities": [ { "name": "Box", "script": { "class": "Door", "feilds": {} } } ] }"#;
        assert!(matches!(
            SceneDescription::from_json(typo),
            Err(HostError::Json(_))
        ));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            SceneDescription::from_json("{ not json"),
            Err(HostError::Json(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SCENE.as_bytes()).unwrap();

        let desc = SceneDescription::load(file.path()).unwrap();
        assert_eq!(desc.entities.len(), 2);
        assert_eq!(
            desc.entities[0].script.as_ref().map(|s| s.class.as_str()),
            Some("Player")
        );
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");
        let err = SceneDescription::load(&path).unwrap_err();
        assert!(matches!(err, HostError::Io { path: p, .. } if p == path));
    }
}
