//! Main application module

mod keyboard;
mod menus;
mod styles;

pub use menus::open_model_dialog;

use eframe::egui;

use crate::i18n::set_lang;
use crate::state::AppState;
use crate::ui::{model_list, properties, status_bar};
use crate::viewport::ViewportPanel;

/// Main application
pub struct ViewerApp {
    state: AppState,
    viewport: ViewportPanel,
    /// Last applied font size (to detect changes)
    last_font_size: f32,
}

impl ViewerApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let state = AppState::default();

        set_lang(state.settings.ui.language);
        styles::configure_styles(&cc.egui_ctx, state.settings.ui.font_size);

        let viewport = ViewportPanel::new(state.settings.viewport.fov_degrees);
        let last_font_size = state.settings.ui.font_size;

        Self {
            state,
            viewport,
            last_font_size,
        }
    }

    /// Files dropped onto the window go through the same path as the picker
    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        for file in dropped {
            if let Some(bytes) = file.bytes {
                let name = if file.name.is_empty() {
                    file.path
                        .as_ref()
                        .and_then(|p| p.file_name())
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default()
                } else {
                    file.name.clone()
                };
                let _ = self.state.load_file(&name, bytes.to_vec());
            } else if let Some(path) = file.path {
                let _ = self.state.load_path(&path);
            }
        }
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Apply font size if changed
        if self.state.settings.ui.font_size != self.last_font_size {
            styles::apply_font_size(ctx, self.state.settings.ui.font_size);
            self.last_font_size = self.state.settings.ui.font_size;
        }

        self.handle_dropped_files(ctx);

        // Completions are applied one at a time on this thread
        self.state.poll_loads();
        if self.state.loads.pending() > 0 {
            ctx.request_repaint_after(std::time::Duration::from_millis(30));
        }

        keyboard::handle_keyboard(ctx, &mut self.state, &mut self.viewport);

        // ── Menu bar ──────────────────────────────────────────
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                menus::file_menu(ui, &mut self.state);
                menus::edit_menu(ui, &mut self.state);
                menus::view_menu(ui, &mut self.state, &mut self.viewport);
                menus::settings_menu(ui, &mut self.state);
            });
        });

        // ── Settings window ──────────────────────────────────
        menus::settings_window(ctx, &mut self.state, &mut self.viewport);

        // ── Status bar ───────────────────────────────────────
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(22.0)
            .frame(
                egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::symmetric(8, 2)),
            )
            .show(ctx, |ui| {
                status_bar::show(ui, &self.state);
            });

        // ── Left panel: model list ───────────────────────────
        if self.state.panels.models {
            egui::SidePanel::left("model_list")
                .default_width(220.0)
                .width_range(160.0..=400.0)
                .resizable(true)
                .frame(
                    egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::same(6)),
                )
                .show(ctx, |ui| {
                    model_list::show(ui, &mut self.state);
                });
        }

        // ── Right panel: properties ──────────────────────────
        if self.state.panels.properties {
            egui::SidePanel::right("right_panel")
                .default_width(290.0)
                .width_range(220.0..=500.0)
                .resizable(true)
                .frame(
                    egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::same(6)),
                )
                .show(ctx, |ui| {
                    egui::ScrollArea::vertical()
                        .id_salt("props_scroll")
                        .show(ui, |ui| {
                            properties::show(ui, &mut self.state);
                        });
                });
        }

        // ── Central panel: 3D viewport ───────────────────────
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                self.viewport.show(ui, &mut self.state);
            });

        // Gizmo notifications from this frame's drag
        self.state.process_gizmo_events();
        if self.state.scene.take_redraw_request() {
            ctx.request_repaint();
        }
    }
}
