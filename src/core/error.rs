//! Error handling for wikirender
//!
//! Library operations return small, specific error enums ([`SectionError`],
//! [`VariableError`], [`PluginError`]). Anything that reaches the command line
//! is collected into [`WikiError`] and, on the way out, wrapped in an
//! [`ErrorContext`] that adds a suggestion and details for the user.
//!
//! Plugin and variable failures that happen *while rendering* never surface
//! here: a deferred plugin node turns them into inline marker text. They only
//! appear as [`WikiError`] when a caller invokes a collaborator directly.
//!
//! # Examples
//!
//! ```rust,no_run
//! use wikirender::core::{WikiError, user_friendly_error};
//!
//! let err = anyhow::Error::from(WikiError::DetachedDocument);
//! let ctx = user_friendly_error(err);
//! ctx.display();
//! ```
//!
//! [`SectionError`]: crate::text::SectionError
//! [`VariableError`]: crate::variables::VariableError
//! [`PluginError`]: crate::plugin::PluginError

use colored::Colorize;
use std::fmt;
use thiserror::Error;

use crate::plugin::PluginError;
use crate::text::SectionError;
use crate::variables::VariableError;

/// The main error type for wikirender operations
#[derive(Error, Debug)]
pub enum WikiError {
    /// A document outlived the rendering context it was built for.
    ///
    /// Documents only hold a weak reference to their context. Rendering after
    /// the context is dropped is a caller bug and is reported, not retried.
    #[error("Document is not attached to a live rendering context")]
    DetachedDocument,

    /// Section addressing failed
    #[error(transparent)]
    Section(#[from] SectionError),

    /// A plugin was invoked directly and failed
    #[error(transparent)]
    Plugin(#[from] PluginError),

    /// Variable expansion was invoked directly and failed
    #[error(transparent)]
    Variable(#[from] VariableError),

    /// A `--var` argument was not of the form `NAME=VALUE`
    #[error("Invalid variable assignment '{assignment}': expected NAME=VALUE")]
    InvalidVariableAssignment {
        /// The argument as given
        assignment: String,
    },

    /// No page files were found for rendering
    #[error("No wiki pages found under {path}")]
    NoPagesFound {
        /// The path that was searched
        path: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration error
        message: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// Any other failure, already formatted
    #[error("{message}")]
    Other {
        /// The formatted error chain
        message: String,
    },
}

/// Error wrapper that carries user-facing guidance
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: WikiError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details
    #[must_use]
    pub fn new(error: WikiError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add details explaining the error
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error to stderr with colors
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into an [`ErrorContext`] with suggestions where known.
///
/// [`WikiError`]s are recognised directly, as are the library error types and
/// I/O errors anywhere in the chain. Everything else keeps its full message
/// chain in [`WikiError::Other`].
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let error = match error.downcast::<WikiError>() {
        Ok(wiki_error) => return create_error_context(wiki_error),
        Err(error) => error,
    };

    for cause in error.chain() {
        if let Some(section) = cause.downcast_ref::<SectionError>() {
            return create_error_context(WikiError::Section(section.clone()));
        }
        if let Some(plugin) = cause.downcast_ref::<PluginError>() {
            return create_error_context(WikiError::Plugin(plugin.clone()));
        }
        if let Some(variable) = cause.downcast_ref::<VariableError>() {
            return create_error_context(WikiError::Variable(variable.clone()));
        }
    }

    let io_kind =
        error.chain().find_map(|cause| cause.downcast_ref::<std::io::Error>()).map(|e| e.kind());
    let context = ErrorContext::new(WikiError::Other {
        message: format!("{error:#}"),
    });

    match io_kind {
        Some(std::io::ErrorKind::NotFound) => context
            .with_suggestion("Check that the file or directory exists and the path is correct"),
        Some(std::io::ErrorKind::PermissionDenied) => {
            context.with_suggestion("Check the file permissions and ownership")
        }
        _ => context,
    }
}

fn create_error_context(error: WikiError) -> ErrorContext {
    match &error {
        WikiError::DetachedDocument => ErrorContext::new(error)
            .with_details("The rendering context was dropped before the document was serialized")
            .with_suggestion("Keep the Arc<RenderContext> alive for as long as the document is rendered"),
        WikiError::Section(_) => ErrorContext::new(error)
            .with_suggestion("Run 'wikirender sections <FILE>' to see how many sections the page has")
            .with_details("Sections are numbered from 1 and separated by lines starting with ----"),
        WikiError::Plugin(PluginError::NotFound { .. }) => ErrorContext::new(error)
            .with_suggestion("Check the plugin name for typos; plugin names are case-insensitive"),
        WikiError::Plugin(PluginError::Disabled { .. }) => ErrorContext::new(error)
            .with_suggestion("Remove the plugin from [plugins] disabled in the configuration file"),
        WikiError::Variable(VariableError::UnknownVariable { .. }) => ErrorContext::new(error)
            .with_suggestion("Define the variable in [variables] or pass --var NAME=VALUE"),
        WikiError::InvalidVariableAssignment { .. } => ErrorContext::new(error)
            .with_suggestion("Use the form --var NAME=VALUE, for example --var author=Alice"),
        WikiError::NoPagesFound { .. } => ErrorContext::new(error)
            .with_details("Directories are searched recursively for .txt and .wiki files"),
        WikiError::ConfigError { .. } | WikiError::TomlError(_) => ErrorContext::new(error)
            .with_suggestion("Check the configuration file syntax; see 'wikirender --help' for its location"),
        _ => ErrorContext::new(error),
    }
}
