//! Recursive descent conversion from type descriptors to the TypeScript IR.

use indexmap::IndexMap;
use tsbridge_ir::{
    Declaration, EnumDecl, EnumDescriptor, Interface, InterfaceField, Primitive, PrimitiveKind,
    RecordDescriptor, TsType, TypeDescriptor,
};

use crate::{
    config::{Config, ConfigOverrides},
    error::{Error, Result},
    render,
    session::Session,
};

/// Hard cap on descriptor nesting. Legitimate type graphs stay far below
/// this; only a runaway descriptor generator can reach it, since repeated
/// named types resolve against the registry instead of nesting.
const MAX_DEPTH: usize = 128;

impl Session {
    /// Convert a descriptor into an IR node, registering any named types it
    /// reaches. Converting the same identity again returns a reference to
    /// the already-registered declaration.
    pub fn convert(&mut self, descriptor: &TypeDescriptor) -> Result<TsType> {
        self.ensure_open()?;
        let config = self.config.clone();
        Converter {
            session: self,
            config,
            depth: 0,
        }
        .convert(descriptor)
    }

    /// Convert with per-call configuration overrides taking precedence over
    /// the session configuration.
    pub fn convert_with(
        &mut self,
        descriptor: &TypeDescriptor,
        overrides: &ConfigOverrides,
    ) -> Result<TsType> {
        self.ensure_open()?;
        let config = self.config.merge(overrides);
        config.validate()?;
        Converter {
            session: self,
            config,
            depth: 0,
        }
        .convert(descriptor)
    }
}

struct Converter<'a> {
    session: &'a mut Session,
    config: Config,
    depth: usize,
}

impl Converter<'_> {
    fn convert(&mut self, descriptor: &TypeDescriptor) -> Result<TsType> {
        self.descend(|conv| conv.convert_kind(descriptor))
    }

    /// Run one recursion step under the depth guard.
    fn descend<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.depth == MAX_DEPTH {
            return Err(Box::new(Error::TooDeeplyNested { limit: MAX_DEPTH }));
        }
        self.depth += 1;
        let out = f(self);
        self.depth -= 1;
        out
    }

    fn convert_kind(&mut self, descriptor: &TypeDescriptor) -> Result<TsType> {
        match descriptor {
            TypeDescriptor::Primitive(kind) => Ok(TsType::Primitive(self.primitive(*kind))),
            TypeDescriptor::Literal(value) => Ok(TsType::Literal(value.clone())),
            TypeDescriptor::Sequence(element) => {
                let element = match element {
                    Some(inner) => self.convert(inner)?,
                    None => TsType::Primitive(self.primitive(PrimitiveKind::Unconstrained)),
                };
                Ok(TsType::Array(Box::new(element)))
            }
            TypeDescriptor::Tuple(items) => {
                let items = items
                    .iter()
                    .map(|item| self.convert(item))
                    .collect::<Result<Vec<_>>>()?;
                Ok(TsType::Tuple(items))
            }
            TypeDescriptor::Mapping { key, value } => Ok(TsType::Record {
                key: Box::new(self.convert(key)?),
                value: Box::new(self.convert(value)?),
            }),
            TypeDescriptor::Union(members) => self.union(members),
            TypeDescriptor::Optional(inner) => {
                let mut members = Vec::new();
                let mut seen = Vec::new();
                let inner = self.convert(inner)?;
                push_member(&mut members, &mut seen, inner);
                push_member(
                    &mut members,
                    &mut seen,
                    TsType::Primitive(self.primitive(PrimitiveKind::NoneType)),
                );
                Ok(collapse(members))
            }
            TypeDescriptor::Enum(descriptor) => self.enumeration(descriptor),
            TypeDescriptor::Record(descriptor) => self.record(descriptor),
        }
    }

    fn primitive(&self, kind: PrimitiveKind) -> Primitive {
        match kind {
            PrimitiveKind::Str => Primitive::String,
            PrimitiveKind::Int | PrimitiveKind::Float => Primitive::Number,
            PrimitiveKind::Bool => Primitive::Boolean,
            PrimitiveKind::Bytes => Primitive::Uint8Array,
            PrimitiveKind::Timestamp => Primitive::Date,
            PrimitiveKind::NoneType => {
                if self.config.none_as_null {
                    Primitive::Null
                } else {
                    Primitive::Undefined
                }
            }
            PrimitiveKind::Unconstrained => {
                if self.config.any_as_unknown {
                    Primitive::Unknown
                } else {
                    Primitive::Any
                }
            }
        }
    }

    fn union(&mut self, members: &[TypeDescriptor]) -> Result<TsType> {
        if members.is_empty() {
            return Err(Error::descriptor("union descriptor has no members"));
        }
        let mut out = Vec::new();
        let mut seen = Vec::new();
        for member in members {
            let converted = self.convert(member)?;
            push_member(&mut out, &mut seen, converted);
        }
        Ok(collapse(out))
    }

    fn enumeration(&mut self, descriptor: &EnumDescriptor) -> Result<TsType> {
        if let Some(entry) = self.session.registry.get(&descriptor.identity) {
            return Ok(TsType::Ref(entry.name().to_string()));
        }
        validate_name(&descriptor.name, "enum")?;
        self.session.reserve(&descriptor.name, &descriptor.identity)?;

        match self.enum_body(descriptor) {
            Ok(decl) => {
                self.session
                    .finalize(&descriptor.identity, Declaration::Enum(decl));
                Ok(TsType::Ref(descriptor.name.clone()))
            }
            Err(e) => {
                self.session.rollback(&descriptor.identity, &descriptor.name);
                Err(e)
            }
        }
    }

    fn enum_body(&mut self, descriptor: &EnumDescriptor) -> Result<EnumDecl> {
        let excluded = self
            .session
            .excluded(&descriptor.name)
            .cloned()
            .unwrap_or_default();

        let mut members = IndexMap::new();
        for member in &descriptor.members {
            if excluded.contains(&member.name) {
                continue;
            }
            if members
                .insert(member.name.clone(), member.value.clone())
                .is_some()
            {
                return Err(Error::descriptor(format!(
                    "enum '{}' declares member '{}' twice",
                    descriptor.name, member.name
                )));
            }
        }
        Ok(EnumDecl {
            name: descriptor.name.clone(),
            members,
        })
    }

    fn record(&mut self, descriptor: &RecordDescriptor) -> Result<TsType> {
        if let Some(entry) = self.session.registry.get(&descriptor.identity) {
            return Ok(TsType::Ref(entry.name().to_string()));
        }
        validate_name(&descriptor.name, "record")?;
        // Placeholder goes in before the fields are walked so a
        // self-referential field resolves by name instead of recursing.
        self.session.reserve(&descriptor.name, &descriptor.identity)?;

        match self.record_body(descriptor) {
            Ok(decl) => {
                self.session
                    .finalize(&descriptor.identity, Declaration::Interface(decl));
                Ok(TsType::Ref(descriptor.name.clone()))
            }
            Err(e) => {
                self.session.rollback(&descriptor.identity, &descriptor.name);
                Err(e)
            }
        }
    }

    fn record_body(&mut self, descriptor: &RecordDescriptor) -> Result<Interface> {
        let extends = match &descriptor.parent {
            Some(parent) => {
                self.descend(|conv| conv.record(parent))?;
                Some(parent.name.clone())
            }
            None => None,
        };

        let inherited = inherited_field_names(descriptor);
        let excluded = self
            .session
            .excluded(&descriptor.name)
            .cloned()
            .unwrap_or_default();

        let mut fields = IndexMap::new();
        for field in &descriptor.fields {
            if inherited.iter().any(|name| name == &field.name) {
                continue;
            }
            if excluded.contains(&field.name) {
                continue;
            }
            let ty = self.convert(&field.ty)?;
            let previous = fields.insert(
                field.name.clone(),
                InterfaceField {
                    ty,
                    optional: !field.required,
                },
            );
            if previous.is_some() {
                return Err(Error::descriptor(format!(
                    "record '{}' declares field '{}' twice",
                    descriptor.name, field.name
                )));
            }
        }

        Ok(Interface {
            name: descriptor.name.clone(),
            fields,
            extends,
        })
    }
}

/// Field names visible through the parent chain. A child field shadowed by
/// an ancestor is dropped from the child's own list; it stays reachable
/// through `extends`.
fn inherited_field_names(descriptor: &RecordDescriptor) -> Vec<String> {
    let mut names = Vec::new();
    let mut current = descriptor.parent.as_deref();
    while let Some(parent) = current {
        for field in &parent.fields {
            names.push(field.name.clone());
        }
        current = parent.parent.as_deref();
    }
    names
}

/// Append a union member, flattening nested unions and dropping members
/// whose rendered form was already seen. First-seen order wins.
fn push_member(out: &mut Vec<TsType>, seen: &mut Vec<String>, member: TsType) {
    match member {
        TsType::Union(inner) => {
            for m in inner {
                push_member(out, seen, m);
            }
        }
        other => {
            let key = render::inline(&other);
            if !seen.iter().any(|s| s == &key) {
                seen.push(key);
                out.push(other);
            }
        }
    }
}

/// A union that deduplicated down to one member is that member.
fn collapse(mut members: Vec<TsType>) -> TsType {
    if members.len() == 1 {
        members.remove(0)
    } else {
        TsType::Union(members)
    }
}

fn validate_name(name: &str, kind: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::descriptor(format!(
            "{kind} descriptor is missing a name"
        )));
    }
    let mut chars = name.chars();
    let head_ok = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$');
    let tail_ok = chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
    if !(head_ok && tail_ok) {
        return Err(Error::descriptor(format!(
            "{kind} descriptor has an invalid declaration name '{name}'"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Person", "record").is_ok());
        assert!(validate_name("_private", "record").is_ok());
        assert!(validate_name("$ref", "record").is_ok());
        assert!(validate_name("", "record").is_err());
        assert!(validate_name("1Person", "record").is_err());
        assert!(validate_name("My-Type", "record").is_err());
    }

    #[test]
    fn test_collapse_singleton() {
        let ty = collapse(vec![TsType::Primitive(Primitive::Number)]);
        assert_eq!(ty, TsType::Primitive(Primitive::Number));
    }

    #[test]
    fn test_push_member_flattens_and_dedups() {
        let mut out = Vec::new();
        let mut seen = Vec::new();
        push_member(
            &mut out,
            &mut seen,
            TsType::Union(vec![
                TsType::Primitive(Primitive::String),
                TsType::Primitive(Primitive::Number),
            ]),
        );
        push_member(&mut out, &mut seen, TsType::Primitive(Primitive::String));

        assert_eq!(
            out,
            vec![
                TsType::Primitive(Primitive::String),
                TsType::Primitive(Primitive::Number),
            ]
        );
    }

    #[test]
    fn test_inherited_field_names_walk_the_chain() {
        let grandparent =
            RecordDescriptor::new("A", "m.A").field("a", TypeDescriptor::string());
        let parent = RecordDescriptor::new("B", "m.B")
            .field("b", TypeDescriptor::string())
            .parent(grandparent);
        let child = RecordDescriptor::new("C", "m.C")
            .field("c", TypeDescriptor::string())
            .parent(parent);

        assert_eq!(inherited_field_names(&child), vec!["b", "a"]);
    }
}
