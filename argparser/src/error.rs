use std::fmt;

/// How an option was spelled when it failed, used in diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionRef {
    Short(char),
    Long(String),
}

impl fmt::Display for OptionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionRef::Short(c) => write!(f, "-{}", c),
            OptionRef::Long(name) => write!(f, "--{}", name),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberKind {
    Integer,
    Float,
}

impl fmt::Display for NumberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumberKind::Integer => write!(f, "an integer"),
            NumberKind::Float => write!(f, "a numerical"),
        }
    }
}

/// Everything that can stop a parse.
///
/// The `Display` text is the diagnostic printed after `error: ` by
/// [`Parser::report`](crate::Parser::report).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unknown option `{0}`")]
    UnknownOption(String),

    #[error("option `{0}` requires a value")]
    MissingValue(OptionRef),

    #[error("option `{option}` expects {kind} value")]
    MalformedNumber { option: OptionRef, kind: NumberKind },

    #[error("option `{0}` Numerical result out of range")]
    OutOfRange(OptionRef),

    #[error("option `{0}` expects no value, 0, or 1")]
    InvalidFlagValue(OptionRef),

    #[error("option `{0}` does not take a value")]
    UnexpectedValue(OptionRef),

    #[error("bad option table: {0}")]
    BadDescriptorTable(String),

    /// Raised by the help option; the boundary prints usage to stdout.
    #[error("help requested")]
    HelpRequested,

    /// A callback asked for the process to end with this status.
    #[error("exit requested with status {0}")]
    Exit(i32),

    #[error("{0}")]
    Callback(String),
}

impl Error {
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::HelpRequested => 0,
            Error::Exit(code) => *code,
            _ => 1,
        }
    }

    /// Whether the boundary should follow the diagnostic with the usage text.
    pub(crate) fn shows_usage(&self) -> bool {
        !matches!(self, Error::Exit(_) | Error::BadDescriptorTable(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
