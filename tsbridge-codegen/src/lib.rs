//! Recursive type-conversion engine emitting TypeScript declarations.
//!
//! This crate walks [`tsbridge_ir::TypeDescriptor`] graphs produced by a
//! reflection layer and lowers them into TypeScript declaration text:
//! interfaces, enums, unions, and inline types. Named types are deduplicated
//! through a per-session registry, which also breaks reference cycles
//! (a record containing a list of itself converts in one pass).
//!
//! # Usage
//!
//! ```
//! use tsbridge_codegen::Session;
//! use tsbridge_ir::{RecordDescriptor, TypeDescriptor};
//!
//! let mut session = Session::default();
//! let root = session.convert(&TypeDescriptor::Record(
//!     RecordDescriptor::new("Person", "models.Person")
//!         .field("name", TypeDescriptor::string())
//!         .optional_field("nickname", TypeDescriptor::string()),
//! ))?;
//!
//! let text = session.declaration_text(&root);
//! assert_eq!(
//!     text,
//!     "export interface Person {\n\tname: string;\n\tnickname?: string;\n}\n"
//! );
//! # Ok::<(), Box<tsbridge_codegen::Error>>(())
//! ```
//!
//! Multiple roots combine through [`Builder`], which emits every reachable
//! declaration exactly once and can append an aggregate alias such as a
//! route table.

mod code_builder;
mod config;
mod convert;
mod error;
mod indent;
mod session;

pub mod render;

pub use code_builder::CodeBuilder;
pub use config::{Config, ConfigOverrides};
pub use error::{Error, Result};
pub use indent::Indent;
pub use render::Builder;
pub use session::Session;
