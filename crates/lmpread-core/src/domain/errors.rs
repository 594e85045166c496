use std::error::Error;
use std::fmt::{Display, Formatter};

pub type LmpResult<T> = Result<T, LmpError>;

/// Failure classes for the parsing engine. Every error carries exactly one
/// category; the CLI maps categories to stable process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LmpErrorCategory {
    /// The origin path of a line source does not exist.
    NotFound,
    /// Any other failure while reading the origin.
    Io,
    /// A line does not match the token/field shape its decoder expects.
    Format,
    /// A required start or end timestep marker was never located.
    Boundary,
    /// A requested occurrence or token position exceeds what was found.
    Lookup,
    /// A broken internal contract, never caused by input data.
    Internal,
}

impl LmpErrorCategory {
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::NotFound => 2,
            Self::Io => 3,
            Self::Format => 4,
            Self::Boundary => 5,
            Self::Lookup => 6,
            Self::Internal => 7,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::NotFound => "NotFound",
            Self::Io => "Io",
            Self::Format => "Format",
            Self::Boundary => "Boundary",
            Self::Lookup => "Lookup",
            Self::Internal => "Internal",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LmpError {
    category: LmpErrorCategory,
    placeholder: &'static str,
    message: String,
}

impl LmpError {
    pub fn new(
        category: LmpErrorCategory,
        placeholder: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            placeholder,
            message: message.into(),
        }
    }

    pub fn not_found(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(LmpErrorCategory::NotFound, placeholder, message)
    }

    pub fn io_system(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(LmpErrorCategory::Io, placeholder, message)
    }

    pub fn format(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(LmpErrorCategory::Format, placeholder, message)
    }

    pub fn boundary(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(LmpErrorCategory::Boundary, placeholder, message)
    }

    pub fn lookup(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(LmpErrorCategory::Lookup, placeholder, message)
    }

    pub fn internal(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(LmpErrorCategory::Internal, placeholder, message)
    }

    pub const fn category(&self) -> LmpErrorCategory {
        self.category
    }

    pub const fn placeholder(&self) -> &'static str {
        self.placeholder
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn exit_code(&self) -> i32 {
        self.category.exit_code()
    }

    pub fn diagnostic_line(&self) -> String {
        format!("ERROR: [{}] {}", self.placeholder, self.message)
    }
}

impl Display for LmpError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] {}",
            self.category.label(),
            self.placeholder,
            self.message
        )
    }
}

impl Error for LmpError {}
