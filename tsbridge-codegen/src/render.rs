//! Serialization of IR nodes to declaration text.
//!
//! Inline nodes render in place via [`inline`]; registry-owned declarations
//! render as `export interface` / `export enum` blocks. [`Builder`] combines
//! the declarations reachable from any number of roots into one output with
//! each declaration emitted exactly once.

use std::collections::HashSet;

use tsbridge_ir::{Declaration, EnumDecl, Interface, TsType};

use crate::{code_builder::CodeBuilder, indent::Indent, session::Session};

/// Render an inline type expression.
pub fn inline(ty: &TsType) -> String {
    match ty {
        TsType::Primitive(p) => p.as_str().to_string(),
        TsType::Literal(value) => value.ts_literal(),
        TsType::Array(element) => format!("Array<{}>", inline(element)),
        TsType::Tuple(items) => {
            let items: Vec<_> = items.iter().map(inline).collect();
            format!("[{}]", items.join(", "))
        }
        TsType::Record { key, value } => format!("Record<{}, {}>", inline(key), inline(value)),
        TsType::Union(members) => {
            let members: Vec<_> = members.iter().map(inline).collect();
            members.join(" | ")
        }
        TsType::Ref(name) => name.clone(),
    }
}

/// Render a single declaration block (trailing newline, no separator).
pub fn declaration(decl: &Declaration, indent: Indent) -> String {
    match decl {
        Declaration::Interface(interface) => render_interface(interface, indent),
        Declaration::Enum(decl) => render_enum(decl, indent),
    }
}

fn render_interface(interface: &Interface, indent: Indent) -> String {
    let heading = match &interface.extends {
        Some(parent) => format!("export interface {} extends {} {{", interface.name, parent),
        None => format!("export interface {} {{", interface.name),
    };

    // A declaration emptied by exclusion still has to stand, including its
    // extends clause.
    if interface.fields.is_empty() {
        return CodeBuilder::new(indent).line(&format!("{heading}}}")).build();
    }

    CodeBuilder::new(indent)
        .line(&heading)
        .indent()
        .each(interface.fields.iter(), |b, (name, field)| {
            let optional = if field.optional { "?" } else { "" };
            b.line(&format!("{}{}: {};", name, optional, inline(&field.ty)))
        })
        .dedent()
        .line("}")
        .build()
}

fn render_enum(decl: &EnumDecl, indent: Indent) -> String {
    if decl.members.is_empty() {
        return CodeBuilder::new(indent)
            .line(&format!("export enum {} {{}}", decl.name))
            .build();
    }

    CodeBuilder::new(indent)
        .line(&format!("export enum {} {{", decl.name))
        .indent()
        .each(decl.members.iter(), |b, (name, value)| {
            b.line(&format!("{} = {},", name, value.ts_enum_value()))
        })
        .dedent()
        .line("}")
        .build()
}

impl Session {
    /// Render the full declaration text for one root: every named declaration
    /// the root transitively references, deduplicated, blank-line separated.
    ///
    /// Seals the session; inline roots render through [`inline`] separately.
    pub fn declaration_text(&mut self, root: &TsType) -> String {
        self.seal();
        let mut order = Vec::new();
        let mut visited = HashSet::new();
        collect(self, root, &mut order, &mut visited);

        let indent = self.config.indent();
        let blocks: Vec<_> = order
            .iter()
            .filter_map(|name| self.get(name))
            .map(|decl| declaration(decl, indent))
            .collect();
        blocks.join("\n")
    }
}

/// Accumulates root IR nodes across one session and renders the combined
/// output, optionally with an aggregate alias mapping literal keys to types.
///
/// # Example
///
/// ```
/// use tsbridge_codegen::{Builder, Session};
/// use tsbridge_ir::{RecordDescriptor, TypeDescriptor};
///
/// let mut session = Session::default();
/// let root = session.convert(&TypeDescriptor::Record(
///     RecordDescriptor::new("Health", "api.Health")
///         .field("ok", TypeDescriptor::boolean()),
/// ))?;
///
/// let output = Builder::new()
///     .add(root.clone())
///     .entry("/health", root)
///     .render(&mut session);
/// assert!(output.contains("export interface Health {"));
/// assert!(output.contains("\"/health\": Health;"));
/// # Ok::<(), Box<tsbridge_codegen::Error>>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Builder {
    roots: Vec<TsType>,
    entries: Vec<(String, TsType)>,
    aggregate: Option<String>,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a root whose reachable declarations are included in the output.
    pub fn add(mut self, root: TsType) -> Self {
        self.roots.push(root);
        self
    }

    /// Add a key/type pair to the aggregate alias (e.g. a route table).
    /// The type's reachable declarations are included like a root's.
    pub fn entry(mut self, key: impl Into<String>, ty: TsType) -> Self {
        self.entries.push((key.into(), ty));
        self
    }

    /// Name for the aggregate alias emitted when entries exist.
    /// Defaults to `Routes`.
    pub fn aggregate_name(mut self, name: impl Into<String>) -> Self {
        self.aggregate = Some(name.into());
        self
    }

    /// Render every named declaration reachable from the added roots and
    /// entries, each exactly once, then the aggregate alias if any entries
    /// were added. Seals the session.
    pub fn render(&self, session: &mut Session) -> String {
        session.seal();
        let mut order = Vec::new();
        let mut visited = HashSet::new();
        for root in &self.roots {
            collect(session, root, &mut order, &mut visited);
        }
        for (_, ty) in &self.entries {
            collect(session, ty, &mut order, &mut visited);
        }

        let indent = session.config().indent();
        let mut blocks: Vec<_> = order
            .iter()
            .filter_map(|name| session.get(name))
            .map(|decl| declaration(decl, indent))
            .collect();

        if !self.entries.is_empty() {
            let name = self.aggregate.as_deref().unwrap_or("Routes");
            blocks.push(self.render_aggregate(name, indent));
        }
        blocks.join("\n")
    }

    fn render_aggregate(&self, name: &str, indent: Indent) -> String {
        CodeBuilder::new(indent)
            .line(&format!("export type {name} = {{"))
            .indent()
            .each(self.entries.iter(), |b, (key, ty)| {
                b.line(&format!("\"{}\": {};", key, inline(ty)))
            })
            .dedent()
            .line("};")
            .build()
    }
}

/// Walk an inline node, recording reachable declaration names.
fn collect(session: &Session, ty: &TsType, order: &mut Vec<String>, visited: &mut HashSet<String>) {
    match ty {
        TsType::Primitive(_) | TsType::Literal(_) => {}
        TsType::Array(element) => collect(session, element, order, visited),
        TsType::Tuple(items) | TsType::Union(items) => {
            for item in items {
                collect(session, item, order, visited);
            }
        }
        TsType::Record { key, value } => {
            collect(session, key, order, visited);
            collect(session, value, order, visited);
        }
        TsType::Ref(name) => collect_named(session, name, order, visited),
    }
}

/// Emit a declaration's field dependencies before it and its parent chain
/// after it. The visited set breaks reference cycles and deduplicates
/// declarations shared between roots.
fn collect_named(
    session: &Session,
    name: &str,
    order: &mut Vec<String>,
    visited: &mut HashSet<String>,
) {
    if !visited.insert(name.to_string()) {
        return;
    }
    let Some(decl) = session.get(name) else {
        // Dangling references render by name; there is nothing to declare.
        return;
    };
    match decl {
        Declaration::Interface(interface) => {
            for field in interface.fields.values() {
                collect(session, &field.ty, order, visited);
            }
            order.push(name.to_string());
            if let Some(parent) = &interface.extends {
                collect_named(session, parent, order, visited);
            }
        }
        Declaration::Enum(_) => order.push(name.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;
    use tsbridge_ir::{InterfaceField, LiteralValue, Primitive};

    use super::*;

    #[test]
    fn test_inline_primitives() {
        assert_eq!(inline(&TsType::Primitive(Primitive::String)), "string");
        assert_eq!(inline(&TsType::Primitive(Primitive::Null)), "null");
    }

    #[test]
    fn test_inline_array_and_tuple() {
        let array = TsType::Array(Box::new(TsType::Primitive(Primitive::Number)));
        assert_eq!(inline(&array), "Array<number>");

        let tuple = TsType::Tuple(vec![
            TsType::Primitive(Primitive::String),
            TsType::Primitive(Primitive::Number),
        ]);
        assert_eq!(inline(&tuple), "[string, number]");
    }

    #[test]
    fn test_inline_record_and_union() {
        let record = TsType::Record {
            key: Box::new(TsType::Primitive(Primitive::String)),
            value: Box::new(TsType::Ref("Inner".into())),
        };
        assert_eq!(inline(&record), "Record<string, Inner>");

        let union = TsType::Union(vec![
            TsType::Ref("Inner".into()),
            TsType::Primitive(Primitive::Null),
        ]);
        assert_eq!(inline(&union), "Inner | null");
    }

    #[test]
    fn test_inline_literal() {
        assert_eq!(inline(&TsType::Literal(LiteralValue::from("foo"))), "\"foo\"");
        assert_eq!(inline(&TsType::Literal(LiteralValue::from(1i64))), "1");
    }

    #[test]
    fn test_interface_rendering() {
        let mut fields = IndexMap::new();
        fields.insert(
            "name".to_string(),
            InterfaceField {
                ty: TsType::Primitive(Primitive::String),
                optional: false,
            },
        );
        fields.insert(
            "age".to_string(),
            InterfaceField {
                ty: TsType::Primitive(Primitive::Number),
                optional: true,
            },
        );
        let decl = Declaration::Interface(Interface {
            name: "Person".into(),
            fields,
            extends: None,
        });

        assert_eq!(
            declaration(&decl, Indent::Tab),
            "export interface Person {\n\tname: string;\n\tage?: number;\n}\n"
        );
    }

    #[test]
    fn test_empty_interface_with_parent_keeps_extends() {
        let decl = Declaration::Interface(Interface {
            name: "Child".into(),
            fields: IndexMap::new(),
            extends: Some("Parent".into()),
        });

        assert_eq!(
            declaration(&decl, Indent::Tab),
            "export interface Child extends Parent {}\n"
        );
    }

    #[test]
    fn test_enum_rendering() {
        let mut members = IndexMap::new();
        members.insert("Green".to_string(), LiteralValue::from(1i64));
        members.insert("Red".to_string(), LiteralValue::from("red"));
        let decl = Declaration::Enum(EnumDecl {
            name: "Color".into(),
            members,
        });

        assert_eq!(
            declaration(&decl, Indent::Tab),
            "export enum Color {\n\tGreen = 1,\n\tRed = 'red',\n}\n"
        );
    }
}
