//! Conversion session and declaration registry.
//!
//! A [`Session`] owns the registry mapping source identities to finalized
//! declarations. It is the unit of deduplication: within one session each
//! identity materializes exactly one declaration, however many roots
//! reference it. Sessions are independent; concurrent callers each own one.

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use tsbridge_ir::Declaration;

use crate::{
    config::Config,
    error::{Error, Result},
};

/// Registry slot for one source identity.
///
/// A placeholder is inserted before recursing into a record's fields or an
/// enum's members; a nested occurrence of the same identity resolves to the
/// placeholder's name instead of recursing, which is what breaks cycles.
#[derive(Debug, Clone)]
pub(crate) enum Entry {
    Placeholder { name: String },
    Declared(Declaration),
}

impl Entry {
    pub(crate) fn name(&self) -> &str {
        match self {
            Entry::Placeholder { name } => name,
            Entry::Declared(decl) => decl.name(),
        }
    }
}

/// One generation session: configuration, registry, exclusions, state.
///
/// The session moves through a single linear transition: it starts open
/// (accepting `convert` and `exclude` calls) and seals on the first render,
/// after which mutation fails with [`Error::SessionSealed`].
#[derive(Debug, Default)]
pub struct Session {
    pub(crate) config: Config,
    /// identity → entry, in discovery order.
    pub(crate) registry: IndexMap<String, Entry>,
    /// declaration name → identity that claimed it.
    pub(crate) names: HashMap<String, String>,
    /// declaration name → member names to omit at finalization.
    pub(crate) exclusions: HashMap<String, HashSet<String>>,
    pub(crate) sealed: bool,
}

impl Session {
    /// Create a session with the given configuration.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    /// Get the session configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Omit a named member from a record or enum declaration.
    ///
    /// Must be registered before the type is converted; exclusion is applied
    /// when the declaration is finalized and never changes the optionality of
    /// the members that remain.
    pub fn exclude(
        &mut self,
        type_name: impl Into<String>,
        member: impl Into<String>,
    ) -> Result<()> {
        self.ensure_open()?;
        self.exclusions
            .entry(type_name.into())
            .or_default()
            .insert(member.into());
        Ok(())
    }

    /// Finalized declarations in discovery order.
    pub fn declarations(&self) -> impl Iterator<Item = &Declaration> {
        self.registry.values().filter_map(|entry| match entry {
            Entry::Declared(decl) => Some(decl),
            Entry::Placeholder { .. } => None,
        })
    }

    /// Look up a finalized declaration by its TypeScript name.
    pub fn get(&self, name: &str) -> Option<&Declaration> {
        let identity = self.names.get(name)?;
        match self.registry.get(identity)? {
            Entry::Declared(decl) => Some(decl),
            Entry::Placeholder { .. } => None,
        }
    }

    /// True once the first render has happened.
    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    pub(crate) fn seal(&mut self) {
        self.sealed = true;
    }

    pub(crate) fn ensure_open(&self) -> Result<()> {
        if self.sealed {
            return Err(Box::new(Error::SessionSealed));
        }
        Ok(())
    }

    /// Claim a declaration name and park a placeholder under the identity.
    pub(crate) fn reserve(&mut self, name: &str, identity: &str) -> Result<()> {
        if let Some(first) = self.names.get(name)
            && first != identity
        {
            return Err(Box::new(Error::IdentityConflict {
                name: name.to_string(),
                first_identity: first.clone(),
                second_identity: identity.to_string(),
            }));
        }
        self.names.insert(name.to_string(), identity.to_string());
        self.registry.insert(
            identity.to_string(),
            Entry::Placeholder {
                name: name.to_string(),
            },
        );
        Ok(())
    }

    pub(crate) fn finalize(&mut self, identity: &str, declaration: Declaration) {
        self.registry
            .insert(identity.to_string(), Entry::Declared(declaration));
    }

    /// Undo a reservation after a failed conversion so a corrected retry is
    /// not poisoned by a stale placeholder.
    pub(crate) fn rollback(&mut self, identity: &str, name: &str) {
        self.registry.shift_remove(identity);
        self.names.remove(name);
    }

    /// Excluded member names for a declaration, if any were registered.
    pub(crate) fn excluded(&self, type_name: &str) -> Option<&HashSet<String>> {
        self.exclusions.get(type_name)
    }
}

#[cfg(test)]
mod tests {
    use tsbridge_ir::{EnumDecl, Interface};

    use super::*;

    fn interface(name: &str) -> Declaration {
        Declaration::Interface(Interface {
            name: name.into(),
            fields: IndexMap::new(),
            extends: None,
        })
    }

    #[test]
    fn test_reserve_then_finalize() {
        let mut session = Session::default();
        session.reserve("Person", "models.Person").unwrap();
        assert!(session.get("Person").is_none());

        session.finalize("models.Person", interface("Person"));
        assert_eq!(session.get("Person").unwrap().name(), "Person");
        assert_eq!(session.declarations().count(), 1);
    }

    #[test]
    fn test_name_conflict_across_identities() {
        let mut session = Session::default();
        session.reserve("User", "auth.User").unwrap();
        let err = session.reserve("User", "billing.User").unwrap_err();
        assert!(matches!(*err, Error::IdentityConflict { .. }));
    }

    #[test]
    fn test_rollback_clears_reservation() {
        let mut session = Session::default();
        session.reserve("Broken", "models.Broken").unwrap();
        session.rollback("models.Broken", "Broken");

        assert!(session.registry.is_empty());
        // The name is reusable by a different identity afterwards.
        session.reserve("Broken", "fixed.Broken").unwrap();
    }

    #[test]
    fn test_sealed_session_rejects_mutation() {
        let mut session = Session::default();
        session.seal();
        let err = session.exclude("Person", "age").unwrap_err();
        assert!(matches!(*err, Error::SessionSealed));
    }

    #[test]
    fn test_declarations_skip_placeholders() {
        let mut session = Session::default();
        session.reserve("A", "m.A").unwrap();
        session.reserve("B", "m.B").unwrap();
        session.finalize(
            "m.B",
            Declaration::Enum(EnumDecl {
                name: "B".into(),
                members: IndexMap::new(),
            }),
        );

        let names: Vec<_> = session.declarations().map(Declaration::name).collect();
        assert_eq!(names, vec!["B"]);
    }
}
