//! Errors reported by the model lifecycle

use shared::ModelId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ViewerError {
    /// Extension is not `.glb` or `.gltf`; nothing was loaded
    #[error("unsupported file type '{file_name}': only .glb and .gltf models can be loaded")]
    InvalidFileType { file_name: String },

    /// The loader could not parse the file
    #[error("failed to load '{file_name}': {reason}")]
    LoadFailure { file_name: String, reason: String },

    /// The model was already removed
    #[error("model {0} no longer exists")]
    StaleReference(ModelId),
}

impl ViewerError {
    /// Stale references are expected across async boundaries and not shown
    pub fn is_silent(&self) -> bool {
        matches!(self, ViewerError::StaleReference(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let e = ViewerError::InvalidFileType {
            file_name: "model.fbx".into(),
        };
        assert!(e.to_string().contains("model.fbx"));
        assert!(!e.is_silent());

        let e = ViewerError::LoadFailure {
            file_name: "a.glb".into(),
            reason: "bad header".into(),
        };
        assert_eq!(e.to_string(), "failed to load 'a.glb': bad header");
    }

    #[test]
    fn test_stale_reference_is_silent() {
        assert!(ViewerError::StaleReference("x".into()).is_silent());
    }
}
