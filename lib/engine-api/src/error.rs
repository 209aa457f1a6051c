use std::error::Error;
use std::fmt;

use serde::Serialize;

use crate::response::ResponsePath;

/// One GraphQL execution error as reported to the client.
///
/// The wire shape serializes `message` and `path`; the cause chain is a
/// server-side detail exposed through [`std::error::Error::source`] so
/// observers can walk it down to the originating failure.
#[derive(Debug, Serialize)]
pub struct GraphQLError {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<ResponsePath>,
    #[serde(skip)]
    source: Option<ErrorSource>,
}

#[derive(Debug)]
struct ErrorSource {
    type_name: &'static str,
    inner: Box<dyn Error + Send + Sync + 'static>,
}

impl GraphQLError {
    pub fn new(message: impl Into<String>) -> Self {
        GraphQLError {
            message: message.into(),
            path: None,
            source: None,
        }
    }

    pub fn with_path(mut self, path: ResponsePath) -> Self {
        self.path = Some(path);
        self
    }

    /// Attach the underlying failure, recording its type name so observers
    /// can label the cause without runtime reflection.
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        self.source = Some(ErrorSource {
            type_name: std::any::type_name::<E>(),
            inner: Box::new(source),
        });
        self
    }

    /// Type name recorded when the cause was attached, if any.
    pub fn source_type_name(&self) -> Option<&'static str> {
        self.source.as_ref().map(|s| s.type_name)
    }

    /// The response path rendered to its textual form, empty when unset.
    pub fn path_string(&self) -> String {
        self.path
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default()
    }
}

impl fmt::Display for GraphQLError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(path) if !path.is_empty() => write!(f, "{path}: {}", self.message),
            _ => f.write_str(&self.message),
        }
    }
}

impl Error for GraphQLError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.inner.as_ref() as &(dyn Error + 'static))
    }
}

/// Raised by an extension rejecting the schema it was registered against.
#[derive(Debug, thiserror::Error)]
pub enum SchemaValidationError {
    #[error("schema rejected by extension {extension}: {reason}")]
    Rejected {
        extension: &'static str,
        reason: String,
    },
}
