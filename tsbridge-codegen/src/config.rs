//! Generation configuration.
//!
//! A [`Config`] is assembled once (typically at process start) and handed to
//! [`Session::new`](crate::Session::new); there is no ambient global. Per-call
//! adjustments go through [`ConfigOverrides`], which take precedence over the
//! session's values for that call only.

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    indent::Indent,
};

/// Options controlling conversion semantics and output formatting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Emit `null` for the absent-value type; `undefined` when false.
    pub none_as_null: bool,
    /// Emit `unknown` for the unconstrained type; `any` when false.
    pub any_as_unknown: bool,
    /// Indent with tab characters; spaces when false.
    pub indent_with_tabs: bool,
    /// Space count per level, used only when tabs are disabled.
    pub indent_size: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            none_as_null: true,
            any_as_unknown: true,
            indent_with_tabs: true,
            indent_size: 2,
        }
    }
}

impl Config {
    pub fn none_as_null(mut self, value: bool) -> Self {
        self.none_as_null = value;
        self
    }

    pub fn any_as_unknown(mut self, value: bool) -> Self {
        self.any_as_unknown = value;
        self
    }

    pub fn indent_with_tabs(mut self, value: bool) -> Self {
        self.indent_with_tabs = value;
        self
    }

    pub fn indent_size(mut self, value: u8) -> Self {
        self.indent_size = value;
        self
    }

    /// Resolve the effective indentation style.
    pub fn indent(&self) -> Indent {
        if self.indent_with_tabs {
            Indent::Tab
        } else {
            Indent::Spaces(self.indent_size)
        }
    }

    /// Check option values, failing with a configuration error.
    pub fn validate(&self) -> Result<()> {
        if !(1..=8).contains(&self.indent_size) {
            return Err(Error::configuration(format!(
                "indent_size must be between 1 and 8, got {}",
                self.indent_size
            )));
        }
        Ok(())
    }

    /// Apply per-call overrides, producing the effective configuration.
    pub fn merge(&self, overrides: &ConfigOverrides) -> Config {
        Config {
            none_as_null: overrides.none_as_null.unwrap_or(self.none_as_null),
            any_as_unknown: overrides.any_as_unknown.unwrap_or(self.any_as_unknown),
            indent_with_tabs: overrides.indent_with_tabs.unwrap_or(self.indent_with_tabs),
            indent_size: overrides.indent_size.unwrap_or(self.indent_size),
        }
    }

    /// Parse a configuration from JSON. Unrecognized keys and malformed
    /// values surface as configuration errors.
    pub fn from_json(json: &str) -> Result<Config> {
        let config: Config = serde_json::from_str(json)
            .map_err(|e| Error::configuration(format!("invalid configuration: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}

/// Partial configuration for per-call precedence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigOverrides {
    pub none_as_null: Option<bool>,
    pub any_as_unknown: Option<bool>,
    pub indent_with_tabs: Option<bool>,
    pub indent_size: Option<u8>,
}

impl ConfigOverrides {
    pub fn none_as_null(mut self, value: bool) -> Self {
        self.none_as_null = Some(value);
        self
    }

    pub fn any_as_unknown(mut self, value: bool) -> Self {
        self.any_as_unknown = Some(value);
        self
    }

    pub fn indent_with_tabs(mut self, value: bool) -> Self {
        self.indent_with_tabs = Some(value);
        self
    }

    pub fn indent_size(mut self, value: u8) -> Self {
        self.indent_size = Some(value);
        self
    }
}
