//! Indentation configuration for emitted declarations.

/// Indentation style for one level of nesting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indent {
    /// Tab character.
    Tab,
    /// Spaces with the specified width (1 to 8).
    Spaces(u8),
}

impl Indent {
    /// Get the string representation for one indent level.
    pub fn as_str(&self) -> &'static str {
        const SPACES: &str = "        ";
        match self {
            Self::Tab => "\t",
            Self::Spaces(n) => &SPACES[..(*n as usize).min(SPACES.len())],
        }
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::Tab
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indent_as_str() {
        assert_eq!(Indent::Tab.as_str(), "\t");
        assert_eq!(Indent::Spaces(2).as_str(), "  ");
        assert_eq!(Indent::Spaces(4).as_str(), "    ");
    }

    #[test]
    fn test_oversized_width_is_clamped() {
        assert_eq!(Indent::Spaces(200).as_str().len(), 8);
    }

    #[test]
    fn test_default_is_tab() {
        assert_eq!(Indent::default(), Indent::Tab);
    }
}
