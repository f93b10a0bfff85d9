// Library crate: model lifecycle, scene graph and state, testable without a window.
// The eframe application (panels, camera, painter) lives in the binary crate.

pub mod codec;
pub mod dispose;
pub mod error;
pub mod fixtures;
pub mod harness;
pub mod helpers;
pub mod loader;
pub mod resources;
pub mod scene;
pub mod state;

/// Geometry and picking types shared by the scene graph and the viewport.
/// Camera, painter and gizmo drawing stay in the binary crate.
pub mod viewport {
    pub mod mesh;
    pub mod picking;
}
