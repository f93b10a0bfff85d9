use egui::Ui;

use crate::i18n::t;
use crate::state::{AppState, StatusKind};

pub fn show(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui| {
        ui.weak(format!("{}: {}", t("status.models"), state.registry.len()));

        let pending = state.loads.pending();
        if pending > 0 {
            ui.separator();
            ui.colored_label(
                egui::Color32::from_rgb(255, 200, 100),
                format!("{}: {pending}", t("status.loading")),
            );
        }

        ui.separator();
        match &state.status {
            Some(message) if message.kind == StatusKind::Error => {
                ui.colored_label(egui::Color32::from_rgb(230, 90, 80), &message.text);
            }
            Some(message) => {
                ui.label(&message.text);
            }
            None => {
                ui.weak(t("status.ready"));
            }
        }

        // Right-aligned version
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.weak(concat!("glview v", env!("CARGO_PKG_VERSION")));
        });
    });
}
