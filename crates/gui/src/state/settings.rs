//! Application settings

use serde::{Deserialize, Serialize};
use shared::GizmoMode;

/// Interface language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    Ru,
    En,
}

/// Transform gizmo settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GizmoSettings {
    /// Show the gizmo on the selected model
    pub show_gizmo: bool,
    /// Mode used at startup
    pub default_mode: GizmoMode,
    /// Handle length in world units
    pub size: f32,
}

impl Default for GizmoSettings {
    fn default() -> Self {
        Self {
            show_gizmo: true,
            default_mode: GizmoMode::Translate,
            size: 1.5,
        }
    }
}

/// Placement of freshly loaded models
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportSettings {
    /// Largest allowed model dimension; bigger models are scaled down to it
    pub max_dimension: f32,
    /// Z position of a loaded model's center, away from the fixed primitives
    pub forward_offset: f32,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            max_dimension: 10.0,
            forward_offset: 3.0,
        }
    }
}

/// Grid display settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    /// Show grid
    pub visible: bool,
    /// Grid cell size
    pub size: f32,
    /// Number of grid lines in each direction from origin
    pub range: i32,
    /// Grid line opacity (0.0 - 1.0)
    pub opacity: f32,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            visible: true,
            size: 1.0,
            range: 6,
            opacity: 0.6,
        }
    }
}

/// Axis display settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisSettings {
    pub visible: bool,
    pub length: f32,
    pub thickness: f32,
    /// Show axis labels (X, Y, Z)
    pub show_labels: bool,
}

impl Default for AxisSettings {
    fn default() -> Self {
        Self {
            visible: true,
            length: 1.5,
            thickness: 2.0,
            show_labels: true,
        }
    }
}

/// Viewport settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportSettings {
    /// Background color RGB
    pub background_color: [u8; 3],
    /// Selection color RGB
    pub selection_color: [u8; 3],
    /// Wireframe color of unselected models
    pub model_color: [u8; 3],
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self {
            background_color: [17, 17, 17],
            selection_color: [0, 220, 255],
            model_color: [200, 200, 200],
            fov_degrees: 60.0,
        }
    }
}

/// UI settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Font size in points
    pub font_size: f32,
    pub language: Language,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            font_size: 14.0,
            language: Language::Ru,
        }
    }
}

/// All application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub gizmo: GizmoSettings,
    pub import: ImportSettings,
    pub grid: GridSettings,
    pub axes: AxisSettings,
    pub viewport: ViewportSettings,
    pub ui: UiSettings,
}

impl AppSettings {
    fn config_path() -> Option<std::path::PathBuf> {
        directories::ProjectDirs::from("com", "glview", "glview")
            .map(|dirs| dirs.config_dir().join("settings.json"))
    }

    /// Load settings from file, or return default if not found
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };
        match std::fs::read_to_string(&path) {
            Ok(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
                tracing::warn!("Ignoring malformed settings file {}: {e}", path.display());
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Save settings to file
    pub fn save(&self) {
        let Some(path) = Self::config_path() else {
            return;
        };
        if let Some(dir) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(dir) {
                tracing::warn!("Failed to create config dir {}: {e}", dir.display());
                return;
            }
        }
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&path, json) {
                    tracing::warn!("Failed to save settings: {e}");
                }
            }
            Err(e) => tracing::warn!("Failed to serialize settings: {e}"),
        }
    }
}
