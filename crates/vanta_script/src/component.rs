//! Component views.
//!
//! A component here is a typed accessor bound to an owning [`Entity`]; the
//! component data itself lives in the host. Most built-in components are
//! plain tags that only exist to be tested for with
//! [`Entity::has_component`]. [`TransformComponent`], [`Rigidbody2DComponent`]
//! and [`SpriteComponent`] also forward calls to the host.
//!
//! ## Component kinds
//!
//! The host identifies a component type by a [`ComponentKind`], the FNV-1a
//! 64-bit hash of the component name without its `Component` suffix
//! (`"Transform"`, `"Rigidbody2D"`, ...). Any host, in any language, can
//! compute the same kind from the same name.

use serde::{Deserialize, Serialize};
use vanta_math::{Vector2, Vector3, Vector4};

use crate::entity::Entity;

/// A component type tag, derived from the component name with FNV-1a 64-bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ComponentKind(pub u64);

impl ComponentKind {
    const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const FNV_PRIME: u64 = 0x0100_0000_01b3;

    /// Hash a component name into its kind.
    ///
    /// ```text
    /// hash = 0xcbf29ce484222325
    /// for each byte in name:
    ///     hash = (hash XOR byte) * 0x00000100000001b3
    /// ```
    #[must_use]
    pub const fn from_name(name: &str) -> Self {
        let bytes = name.as_bytes();
        let mut hash = Self::FNV_OFFSET_BASIS;
        let mut i = 0;
        while i < bytes.len() {
            hash ^= bytes[i] as u64;
            hash = hash.wrapping_mul(Self::FNV_PRIME);
            i += 1;
        }
        Self(hash)
    }

    /// The kind of a built-in component, looked up by name.
    #[must_use]
    pub fn builtin(name: &str) -> Option<Self> {
        COMPONENT_NAMES
            .iter()
            .any(|&known| known == name)
            .then(|| Self::from_name(name))
    }
}

/// Names of every built-in component, in registration order.
pub const COMPONENT_NAMES: &[&str] = &[
    TransformComponent::NAME,
    SpriteComponent::NAME,
    CircleRendererComponent::NAME,
    Rigidbody2DComponent::NAME,
    BoxCollider2DComponent::NAME,
    CircleCollider2DComponent::NAME,
    CameraComponent::NAME,
    ScriptComponent::NAME,
    NativeScriptComponent::NAME,
];

/// A typed view of one aspect of an entity.
pub trait Component: Sized {
    /// The component's type name, hashed into its [`ComponentKind`].
    fn type_name() -> &'static str;

    fn component_kind() -> ComponentKind {
        ComponentKind::from_name(Self::type_name())
    }

    /// Bind a view of this component to `entity`.
    ///
    /// Callers normally go through [`Entity::get_component`], which checks
    /// the host first.
    fn bind(entity: Entity) -> Self;

    /// The entity this view is bound to.
    fn entity(&self) -> &Entity;
}

macro_rules! component {
    ($(#[$meta:meta])* $name:ident => $kind_name:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name {
            entity: Entity,
        }

        impl $name {
            /// The name hashed into this component's kind.
            pub const NAME: &'static str = $kind_name;
        }

        impl Component for $name {
            fn type_name() -> &'static str {
                Self::NAME
            }

            fn bind(entity: Entity) -> Self {
                Self { entity }
            }

            fn entity(&self) -> &Entity {
                &self.entity
            }
        }
    };
}

component!(
    /// Position in the world. Every host entity has one.
    TransformComponent => "Transform"
);
component!(
    /// A dynamic 2D physics body.
    Rigidbody2DComponent => "Rigidbody2D"
);
component!(BoxCollider2DComponent => "BoxCollider2D");
component!(CircleCollider2DComponent => "CircleCollider2D");
component!(
    /// A colored quad.
    SpriteComponent => "Sprite"
);
component!(CircleRendererComponent => "CircleRenderer");
component!(CameraComponent => "Camera");
component!(
    /// Marks an entity as running a script.
    ScriptComponent => "Script"
);
component!(NativeScriptComponent => "NativeScript");

impl TransformComponent {
    /// Returns the entity's position.
    #[must_use]
    pub fn position(&self) -> Vector3 {
        self.entity.position()
    }

    /// Move the entity.
    pub fn set_position(&self, position: Vector3) {
        self.entity.set_position(position);
    }
}

impl Rigidbody2DComponent {
    /// Apply an impulse at the body's center of mass.
    ///
    /// With `wake == false` a sleeping body ignores the impulse.
    pub fn apply_linear_impulse(&self, impulse: Vector2, wake: bool) {
        self.entity
            .engine()
            .calls()
            .apply_linear_impulse(self.entity.id(), impulse, wake);
    }

    /// [`apply_linear_impulse`](Self::apply_linear_impulse) with `wake` set.
    pub fn apply_linear_impulse_awake(&self, impulse: Vector2) {
        self.apply_linear_impulse(impulse, true);
    }
}

impl SpriteComponent {
    /// Set the RGBA tint, each channel in `0.0..=1.0`.
    pub fn set_color(&self, color: Vector4) {
        self.entity
            .engine()
            .calls()
            .set_sprite_color(self.entity.id(), color);
    }
}
