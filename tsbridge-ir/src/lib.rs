//! Type descriptor model and TypeScript IR for the tsbridge generator.
//!
//! This crate provides the type definitions shared across the tsbridge
//! conversion pipeline. A reflection layer produces [`TypeDescriptor`] values
//! from runtime type metadata; the conversion engine lowers them into the
//! TypeScript IR defined here.
//!
//! # Architecture
//!
//! ```text
//! host runtime → reflection layer → TypeDescriptor → tsbridge-codegen → .d.ts text
//! ```
//!
//! The types are designed to be:
//! - Host-language agnostic (no Python/Ruby-specific concerns)
//! - Serializable (descriptors can cross a process boundary as JSON)
//! - Closed (adding a type kind is an exhaustiveness-checked change)

mod descriptor;
mod types;

pub use descriptor::{
    EnumDescriptor, EnumMember, FieldDescriptor, LiteralValue, PrimitiveKind, RecordDescriptor,
    TypeDescriptor,
};
pub use types::{Declaration, EnumDecl, Interface, InterfaceField, Primitive, TsType};
