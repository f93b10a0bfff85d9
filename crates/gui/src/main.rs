mod app;
pub mod i18n;
mod ui;
mod viewport;

// Re-export library modules so that `crate::state`, `crate::scene`, etc.
// resolve to the lib crate types everywhere in the binary.
pub use glview_gui_lib::helpers;
pub use glview_gui_lib::resources;
pub use glview_gui_lib::scene;
pub use glview_gui_lib::state;

use app::ViewerApp;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "glview_gui=info".into()),
        )
        .init();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("glview: 3D model viewer")
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([800.0, 500.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    if let Err(e) = eframe::run_native(
        "glview-gui",
        native_options,
        Box::new(|cc| Ok(Box::new(ViewerApp::new(cc)))),
    ) {
        tracing::error!("Failed to start application: {e}");
    }
}
