//! Scene errors and live-edit warnings

/// Errors that abort building or loading a scene
///
/// Any of these leaves the previously loaded scene (or the empty scene)
/// attached and untouched.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    /// Geometry tag with no registered geometry kind
    #[error("unsupported geometry type '{tag}'{}", object_suffix(.object))]
    UnsupportedGeometryType {
        /// The rejected tag
        tag: String,
        /// Object entry the tag came from, when known
        object: Option<String>,
    },

    /// Material tag with no registered material family
    #[error("unsupported material type '{tag}'{}", object_suffix(.object))]
    UnsupportedMaterialType {
        /// The rejected tag
        tag: String,
        /// Object entry the tag came from, when known
        object: Option<String>,
    },

    /// Missing or malformed field
    #[error("invalid scene document{}: {reason}", object_suffix(.object))]
    InvalidDocument {
        /// Object entry at fault, `None` for document-level problems
        object: Option<String>,
        /// Human readable description
        reason: String,
    },

    /// Configuration source could not be read
    #[error("failed to fetch scene configuration from '{location}': {reason}")]
    FetchFailure {
        /// Where the document was expected
        location: String,
        /// Underlying failure
        reason: String,
    },

    /// A load completion arrived for a load that is not in flight
    #[error("load ticket {ticket} does not match the load in flight")]
    StaleLoad {
        /// Ticket that was presented
        ticket: u64,
    },
}

fn object_suffix(object: &Option<String>) -> String {
    object
        .as_ref()
        .map(|id| format!(" in object '{id}'"))
        .unwrap_or_default()
}

impl SceneError {
    /// Document-level invalid document error
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidDocument {
            object: None,
            reason: reason.into(),
        }
    }

    /// Attribute this error to an object entry, unless it already names one
    pub fn in_object(self, id: &str) -> Self {
        let attribute = |object: Option<String>| object.or_else(|| Some(id.to_string()));
        match self {
            Self::UnsupportedGeometryType { tag, object } => Self::UnsupportedGeometryType {
                tag,
                object: attribute(object),
            },
            Self::UnsupportedMaterialType { tag, object } => Self::UnsupportedMaterialType {
                tag,
                object: attribute(object),
            },
            Self::InvalidDocument { object, reason } => Self::InvalidDocument {
                object: attribute(object),
                reason,
            },
            other => other,
        }
    }
}

/// Non-fatal problems with a live edit
///
/// Edits are best effort against a possibly stale panel, so these are logged
/// and reported back but never abort anything.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum EditWarning {
    /// The edit names an object id that is not in the active scene
    #[error("unknown edit target '{0}'")]
    UnknownEditTarget(String),

    /// The target exists but has no such editable field
    #[error("field '{field}' is not editable on '{target}'")]
    UnsupportedEditField {
        /// Edit target as written
        target: String,
        /// Rejected field
        field: String,
    },

    /// The value has the wrong kind or is out of range
    #[error("invalid value for '{target}.{field}': {reason}")]
    InvalidEditValue {
        /// Edit target as written
        target: String,
        /// Field being edited
        field: String,
        /// Why the value was rejected
        reason: String,
    },

    /// Nothing is loaded yet
    #[error("no scene is loaded")]
    NoActiveScene,

    /// The deferred edit queue overflowed while a load was in flight
    #[error("deferred edit for '{target}.{field}' dropped, queue full")]
    DroppedDeferredEdit {
        /// Edit target as written
        target: String,
        /// Field being edited
        field: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_object_attributes_once() {
        let error = SceneError::invalid("missing field `geometry`").in_object("obj-1");
        assert_eq!(
            error.to_string(),
            "invalid scene document in object 'obj-1': missing field `geometry`"
        );

        // Already attributed errors keep their original object
        let error = error.in_object("obj-2");
        assert!(matches!(error, SceneError::InvalidDocument { object: Some(ref id), .. } if id == "obj-1"));
    }

    #[test]
    fn test_fetch_failure_is_not_attributed() {
        let error = SceneError::FetchFailure {
            location: "scene.json".to_string(),
            reason: "not found".to_string(),
        };
        assert_eq!(error.clone().in_object("obj-1"), error);
    }
}
