//! Reflected script fields.
//!
//! A script class can expose named fields so a host can read them for
//! display and overwrite them before `on_create` (values authored in a scene
//! file, for instance). Values travel as [`FieldValue`], a small tagged union
//! over the types a field may have.

use serde::{Deserialize, Serialize};
use vanta_math::{Vector2, Vector3, Vector4};

use crate::entity::EntityId;

/// The declared type of a script field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptFieldType {
    Bool,
    Int32,
    Int64,
    Float,
    Double,
    Vector2,
    Vector3,
    Vector4,
    Entity,
}

/// A field value.
///
/// Serialises externally tagged, e.g. `{ "float": 5.0 }` or
/// `{ "vector3": { "x": 0.0, "y": 1.0, "z": 0.0 } }`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldValue {
    Bool(bool),
    Int32(i32),
    Int64(i64),
    Float(f32),
    Double(f64),
    Vector2(Vector2),
    Vector3(Vector3),
    Vector4(Vector4),
    Entity(EntityId),
}

impl FieldValue {
    #[must_use]
    pub const fn field_type(&self) -> ScriptFieldType {
        match self {
            FieldValue::Bool(_) => ScriptFieldType::Bool,
            FieldValue::Int32(_) => ScriptFieldType::Int32,
            FieldValue::Int64(_) => ScriptFieldType::Int64,
            FieldValue::Float(_) => ScriptFieldType::Float,
            FieldValue::Double(_) => ScriptFieldType::Double,
            FieldValue::Vector2(_) => ScriptFieldType::Vector2,
            FieldValue::Vector3(_) => ScriptFieldType::Vector3,
            FieldValue::Vector4(_) => ScriptFieldType::Vector4,
            FieldValue::Entity(_) => ScriptFieldType::Entity,
        }
    }
}

/// Declaration of one reflected field on a script class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptField {
    pub name: &'static str,
    pub field_type: ScriptFieldType,
}

impl ScriptField {
    #[must_use]
    pub const fn new(name: &'static str, field_type: ScriptFieldType) -> Self {
        Self { name, field_type }
    }
}

/// Errors reading or writing a reflected field.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FieldError {
    #[error("no field named `{0}`")]
    Unknown(String),

    #[error("field type mismatch: expected {expected:?}, found {found:?}")]
    TypeMismatch {
        expected: ScriptFieldType,
        found: ScriptFieldType,
    },
}

macro_rules! field_conversions {
    ($($ty:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$ty> for FieldValue {
                fn from(value: $ty) -> Self {
                    FieldValue::$variant(value)
                }
            }

            impl TryFrom<FieldValue> for $ty {
                type Error = FieldError;

                fn try_from(value: FieldValue) -> Result<Self, FieldError> {
                    match value {
                        FieldValue::$variant(inner) => Ok(inner),
                        other => Err(FieldError::TypeMismatch {
                            expected: ScriptFieldType::$variant,
                            found: other.field_type(),
                        }),
                    }
                }
            }
        )+
    };
}

field_conversions! {
    bool => Bool,
    i32 => Int32,
    i64 => Int64,
    f32 => Float,
    f64 => Double,
    Vector2 => Vector2,
    Vector3 => Vector3,
    Vector4 => Vector4,
    EntityId => Entity,
}
