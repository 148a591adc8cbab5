//! Source type descriptors produced by reflection layers.
//!
//! A [`TypeDescriptor`] is the normalized, host-language-agnostic view of one
//! reflected type. Descriptors form finite trees: a nested occurrence of an
//! already-described record or enum may be abbreviated to a descriptor that
//! carries only `name` and `identity` (the conversion engine resolves it
//! against its registry before ever looking at the fields), which is how
//! recursive types such as linked lists stay representable by value.

use serde::{Deserialize, Serialize};

/// A reflected source type, as handed to the conversion engine.
///
/// The set of kinds is closed. Reflection layers map whatever their host
/// runtime exposes onto these kinds before calling into the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeDescriptor {
    /// A primitive source type (string-like, integer, boolean, ...).
    Primitive(PrimitiveKind),
    /// A literal value used as a type (e.g. `Literal["foo"]`).
    Literal(LiteralValue),
    /// A homogeneous sequence. `None` means the element type is unspecified.
    Sequence(Option<Box<TypeDescriptor>>),
    /// A fixed-arity tuple.
    Tuple(Vec<TypeDescriptor>),
    /// A key/value mapping.
    Mapping {
        key: Box<TypeDescriptor>,
        value: Box<TypeDescriptor>,
    },
    /// A union of alternatives.
    Union(Vec<TypeDescriptor>),
    /// An optional wrapper around an inner type.
    Optional(Box<TypeDescriptor>),
    /// A named enumeration.
    Enum(EnumDescriptor),
    /// A named record (dataclass, typed dict, plain class with annotations).
    Record(RecordDescriptor),
}

impl TypeDescriptor {
    pub fn string() -> Self {
        Self::Primitive(PrimitiveKind::Str)
    }

    pub fn int() -> Self {
        Self::Primitive(PrimitiveKind::Int)
    }

    pub fn float() -> Self {
        Self::Primitive(PrimitiveKind::Float)
    }

    pub fn boolean() -> Self {
        Self::Primitive(PrimitiveKind::Bool)
    }

    pub fn bytes() -> Self {
        Self::Primitive(PrimitiveKind::Bytes)
    }

    pub fn timestamp() -> Self {
        Self::Primitive(PrimitiveKind::Timestamp)
    }

    pub fn none() -> Self {
        Self::Primitive(PrimitiveKind::NoneType)
    }

    pub fn unconstrained() -> Self {
        Self::Primitive(PrimitiveKind::Unconstrained)
    }

    pub fn literal(value: impl Into<LiteralValue>) -> Self {
        Self::Literal(value.into())
    }

    pub fn sequence(element: TypeDescriptor) -> Self {
        Self::Sequence(Some(Box::new(element)))
    }

    pub fn tuple(items: impl IntoIterator<Item = TypeDescriptor>) -> Self {
        Self::Tuple(items.into_iter().collect())
    }

    pub fn mapping(key: TypeDescriptor, value: TypeDescriptor) -> Self {
        Self::Mapping {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    pub fn union(members: impl IntoIterator<Item = TypeDescriptor>) -> Self {
        Self::Union(members.into_iter().collect())
    }

    pub fn optional(inner: TypeDescriptor) -> Self {
        Self::Optional(Box::new(inner))
    }
}

/// Primitive kind of a reflected source type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveKind {
    Str,
    Int,
    Float,
    Bool,
    Bytes,
    Timestamp,
    /// The absent-value type (`None`, `nil`, ...).
    NoneType,
    /// An unconstrained type (`Any`, missing annotation).
    Unconstrained,
}

/// A literal value, resolved by the reflection layer to a primitive form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LiteralValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl LiteralValue {
    /// Render as a TypeScript literal type (`"foo"`, `1`, `true`).
    pub fn ts_literal(&self) -> String {
        match self {
            Self::Str(s) => format!("\"{s}\""),
            Self::Int(i) => i.to_string(),
            Self::Float(f) => f.to_string(),
            Self::Bool(b) => b.to_string(),
        }
    }

    /// Render as a TypeScript enum member value (`'foo'`, `1`).
    ///
    /// Enum member strings are single-quoted, matching the emitted style of
    /// `export enum Color { Red = 'red' }`.
    pub fn ts_enum_value(&self) -> String {
        match self {
            Self::Str(s) => format!("'{s}'"),
            other => other.ts_literal(),
        }
    }
}

impl From<&str> for LiteralValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for LiteralValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for LiteralValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for LiteralValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for LiteralValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// A named enumeration descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumDescriptor {
    /// Declaration name (last path segment of `identity`).
    pub name: String,
    /// Stable deduplication key, e.g. the fully-qualified name.
    pub identity: String,
    /// Ordered members with resolved literal values.
    pub members: Vec<EnumMember>,
}

impl EnumDescriptor {
    pub fn new(name: impl Into<String>, identity: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            identity: identity.into(),
            members: Vec::new(),
        }
    }

    pub fn member(mut self, name: impl Into<String>, value: impl Into<LiteralValue>) -> Self {
        self.members.push(EnumMember {
            name: name.into(),
            value: value.into(),
        });
        self
    }
}

/// One member of an enumeration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumMember {
    pub name: String,
    pub value: LiteralValue,
}

/// A named record descriptor.
///
/// Field order is semantically significant and is preserved through to the
/// emitted declaration. Single inheritance is modeled as an explicit optional
/// parent; the type system cannot express multiple bases, which is the
/// reflection layer's cue to reject them before building a descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordDescriptor {
    /// Declaration name (last path segment of `identity`).
    pub name: String,
    /// Stable deduplication key, e.g. the fully-qualified name.
    pub identity: String,
    /// Ordered fields.
    pub fields: Vec<FieldDescriptor>,
    /// Single-inheritance parent, if any.
    pub parent: Option<Box<RecordDescriptor>>,
}

impl RecordDescriptor {
    pub fn new(name: impl Into<String>, identity: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            identity: identity.into(),
            fields: Vec::new(),
            parent: None,
        }
    }

    /// Add a required field.
    pub fn field(mut self, name: impl Into<String>, ty: TypeDescriptor) -> Self {
        self.fields.push(FieldDescriptor {
            name: name.into(),
            ty,
            required: true,
        });
        self
    }

    /// Add a not-required field (emitted with a `?` marker).
    pub fn optional_field(mut self, name: impl Into<String>, ty: TypeDescriptor) -> Self {
        self.fields.push(FieldDescriptor {
            name: name.into(),
            ty,
            required: false,
        });
        self
    }

    pub fn parent(mut self, parent: RecordDescriptor) -> Self {
        self.parent = Some(Box::new(parent));
        self
    }
}

/// One field of a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    pub ty: TypeDescriptor,
    /// `false` when the source carried a not-required marker.
    pub required: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_builder_preserves_field_order() {
        let record = RecordDescriptor::new("Person", "models.Person")
            .field("name", TypeDescriptor::string())
            .optional_field("age", TypeDescriptor::int());

        let names: Vec<_> = record.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["name", "age"]);
        assert!(record.fields[0].required);
        assert!(!record.fields[1].required);
    }

    #[test]
    fn test_literal_rendering() {
        assert_eq!(LiteralValue::from("foo").ts_literal(), "\"foo\"");
        assert_eq!(LiteralValue::from("foo").ts_enum_value(), "'foo'");
        assert_eq!(LiteralValue::from(3i64).ts_literal(), "3");
        assert_eq!(LiteralValue::from(true).ts_literal(), "true");
    }

    #[test]
    fn test_descriptor_json_round_trip() {
        let descriptor = TypeDescriptor::Record(
            RecordDescriptor::new("Point", "geo.Point")
                .field("x", TypeDescriptor::float())
                .field("y", TypeDescriptor::float())
                .optional_field("label", TypeDescriptor::optional(TypeDescriptor::string())),
        );

        let json = serde_json::to_string(&descriptor).unwrap();
        let back: TypeDescriptor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, descriptor);
    }

    #[test]
    fn test_descriptor_from_external_json() {
        let json = r#"{"record": {
            "name": "User",
            "identity": "auth.User",
            "fields": [
                {"name": "id", "ty": {"primitive": "int"}, "required": true},
                {"name": "email", "ty": {"primitive": "str"}, "required": false}
            ],
            "parent": null
        }}"#;

        let descriptor: TypeDescriptor = serde_json::from_str(json).unwrap();
        let TypeDescriptor::Record(record) = descriptor else {
            panic!("expected a record descriptor");
        };
        assert_eq!(record.identity, "auth.User");
        assert_eq!(record.fields.len(), 2);
        assert!(!record.fields[1].required);
    }
}
