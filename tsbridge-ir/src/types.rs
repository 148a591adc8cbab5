//! TypeScript target-type IR.
//!
//! The IR splits into inline value nodes ([`TsType`]) that are rendered in
//! place wherever they are referenced, and shared declarations
//! ([`Declaration`]) that are owned by the conversion registry and referenced
//! elsewhere by name. Cycles in the IR graph can only pass through named
//! references; inline nodes always bottom out at primitives or names.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::LiteralValue;

/// A TypeScript primitive type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Primitive {
    String,
    Number,
    Boolean,
    Null,
    Undefined,
    Unknown,
    Any,
    Never,
    Void,
    Uint8Array,
    Date,
}

impl Primitive {
    /// Get the rendered TypeScript spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Primitive::String => "string",
            Primitive::Number => "number",
            Primitive::Boolean => "boolean",
            Primitive::Null => "null",
            Primitive::Undefined => "undefined",
            Primitive::Unknown => "unknown",
            Primitive::Any => "any",
            Primitive::Never => "never",
            Primitive::Void => "void",
            Primitive::Uint8Array => "Uint8Array",
            Primitive::Date => "Date",
        }
    }
}

/// An inline TypeScript type expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TsType {
    Primitive(Primitive),
    Literal(LiteralValue),
    Array(Box<TsType>),
    Tuple(Vec<TsType>),
    /// Structural key/value container (`Record<K, V>`), distinct from a
    /// named interface.
    Record {
        key: Box<TsType>,
        value: Box<TsType>,
    },
    /// Flattened union: members never contain another union directly.
    Union(Vec<TsType>),
    /// Non-owning reference to a registry-owned declaration.
    Ref(String),
}

impl TsType {
    /// Returns true for nodes that reference a shared declaration by name.
    pub fn is_ref(&self) -> bool {
        matches!(self, TsType::Ref(_))
    }
}

/// A registry-owned declaration, emitted at most once per session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Declaration {
    Interface(Interface),
    Enum(EnumDecl),
}

impl Declaration {
    /// Get the declaration name other nodes reference.
    pub fn name(&self) -> &str {
        match self {
            Declaration::Interface(i) => &i.name,
            Declaration::Enum(e) => &e.name,
        }
    }
}

/// A named interface declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interface {
    pub name: String,
    /// Own fields in insertion order. Inherited fields live on the parent
    /// and are reachable through `extends`, never duplicated here.
    pub fields: IndexMap<String, InterfaceField>,
    pub extends: Option<String>,
}

/// One field of an interface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterfaceField {
    pub ty: TsType,
    pub optional: bool,
}

/// A named enum declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumDecl {
    pub name: String,
    pub members: IndexMap<String, LiteralValue>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_spelling() {
        assert_eq!(Primitive::String.as_str(), "string");
        assert_eq!(Primitive::Number.as_str(), "number");
        assert_eq!(Primitive::Uint8Array.as_str(), "Uint8Array");
        assert_eq!(Primitive::Date.as_str(), "Date");
    }

    #[test]
    fn test_declaration_name() {
        let decl = Declaration::Interface(Interface {
            name: "Person".into(),
            fields: IndexMap::new(),
            extends: None,
        });
        assert_eq!(decl.name(), "Person");
    }

    #[test]
    fn test_ref_detection() {
        assert!(TsType::Ref("Person".into()).is_ref());
        assert!(!TsType::Primitive(Primitive::String).is_ref());
    }
}
