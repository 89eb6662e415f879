use thiserror::Error;

/// Errors that can occur while transforming an entity tree into JSX.
#[derive(Debug, Error)]
pub enum TransformError {
    /// The input could not be read as an entity description.
    #[error("Invalid entity description: {0}")]
    InvalidDescription(#[from] serde_json::Error),
    /// A value reached the serializer that has no literal form.
    #[error("Unsupported value at {path}: {reason}")]
    UnsupportedValue {
        /// Location of the offending value inside the tree.
        path: String,
        /// Why the value cannot be serialized.
        reason: String,
    },
    /// A plugin rejected the node it was given.
    #[error("Plugin `{plugin}` failed: {message}")]
    Plugin {
        /// Name the plugin was registered under.
        plugin: String,
        /// Error message
        message: String,
    },
}

impl TransformError {
    /// Create an unsupported value error for the given location.
    pub fn unsupported_value(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UnsupportedValue {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a plugin failure.
    pub fn plugin(plugin: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Plugin {
            plugin: plugin.into(),
            message: message.into(),
        }
    }
}
