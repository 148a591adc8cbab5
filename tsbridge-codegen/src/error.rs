use miette::Diagnostic;
use thiserror::Error;

/// Result type for tsbridge-codegen operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("{message}")]
    #[diagnostic(
        code(tsbridge::descriptor_error),
        help("record and enum descriptors must carry a valid identifier name")
    )]
    Descriptor { message: String },

    #[error("declaration name '{name}' is claimed by two different source types")]
    #[diagnostic(
        code(tsbridge::identity_conflict),
        help("'{first_identity}' and '{second_identity}' both materialize as '{name}'; rename one of the source types")
    )]
    IdentityConflict {
        name: String,
        first_identity: String,
        second_identity: String,
    },

    #[error("descriptor graph exceeds the maximum nesting depth of {limit}")]
    #[diagnostic(
        code(tsbridge::too_deeply_nested),
        help("abbreviate repeated record/enum occurrences to name+identity stubs; named types break cycles without nesting")
    )]
    TooDeeplyNested { limit: usize },

    #[error("{message}")]
    #[diagnostic(code(tsbridge::configuration_error))]
    Configuration { message: String },

    #[error("session is sealed after its first render")]
    #[diagnostic(
        code(tsbridge::session_sealed),
        help("create a new session to convert more types; rendered output must stay stable")
    )]
    SessionSealed,
}

impl Error {
    /// Create a descriptor error.
    pub fn descriptor(message: impl Into<String>) -> Box<Self> {
        Box::new(Error::Descriptor {
            message: message.into(),
        })
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Box<Self> {
        Box::new(Error::Configuration {
            message: message.into(),
        })
    }
}
