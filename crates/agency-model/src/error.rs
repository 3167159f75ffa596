//! Error types for the content model

use crate::item::ResourceKind;

/// Content model errors
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// A backend row did not match the record shape
    #[error("cannot decode {kind} row: {source}")]
    Decode {
        /// Collection the row came from
        kind: ResourceKind,
        /// Underlying serde failure
        #[source]
        source: serde_json::Error,
    },

    /// Resource name not known to the model
    #[error("unknown resource: {0}")]
    UnknownResource(String),
}

impl ModelError {
    /// Create decode error
    #[inline]
    #[must_use]
    pub fn decode(kind: ResourceKind, source: serde_json::Error) -> Self {
        Self::Decode { kind, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_resource_display() {
        let err = ModelError::UnknownResource("widgets".to_string());
        assert_eq!(err.to_string(), "unknown resource: widgets");
    }

    #[test]
    fn decode_error_names_collection() {
        let source = serde_json::from_str::<u32>("\"x\"").unwrap_err();
        let err = ModelError::decode(ResourceKind::Job, source);
        assert!(err.to_string().starts_with("cannot decode jobs row"));
    }
}
