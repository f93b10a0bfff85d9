//! Properties panel: nine transform fields, gizmo controls, reset and delete

use egui::Ui;
use shared::{Axis, GizmoMode};

use crate::helpers::short_id;
use crate::i18n::t;
use crate::state::{AppState, ManipulationWidget, TransformField};
use crate::ui::gizmo_mode_label;

pub fn show(ui: &mut Ui, state: &mut AppState) {
    ui.heading(t("prop.title"));
    ui.separator();

    show_gizmo_controls(ui, state);
    ui.add_space(6.0);

    let Some(id) = state.selection.selected().cloned() else {
        ui.add_space(10.0);
        ui.vertical_centered(|ui| {
            ui.weak(t("prop.select_object"));
            ui.weak(t("prop.to_view"));
        });
        return;
    };
    let Some(name) = state.registry.get(&id).map(|r| r.display_name().to_string()) else {
        return;
    };

    egui::Grid::new("model_info")
        .num_columns(2)
        .spacing([8.0, 4.0])
        .show(ui, |ui| {
            ui.label(format!("{}:", t("prop.name")));
            ui.strong(&name);
            ui.end_row();

            ui.label("ID:");
            ui.monospace(short_id(&id)).on_hover_text(id.as_str());
            ui.end_row();
        });
    ui.add_space(6.0);

    egui::CollapsingHeader::new(t("prop.transform"))
        .id_salt("transform_fields")
        .default_open(true)
        .show(ui, |ui| {
            show_transform_fields(ui, state);
        });

    ui.add_space(8.0);
    ui.horizontal(|ui| {
        if ui.button(t("prop.reset")).clicked() {
            let _ = state.reset_model(&id);
        }
        if ui.button(t("prop.delete")).clicked() {
            let _ = state.delete_model(&id);
        }
    });
}

fn show_gizmo_controls(ui: &mut Ui, state: &mut AppState) {
    let mut show = state.selection.show_gizmo();
    if ui.checkbox(&mut show, t("gizmo.show")).changed() {
        state.set_show_gizmo(show);
    }

    let enabled = state.selection.widget().enabled();
    let current = state.selection.mode();
    ui.add_enabled_ui(enabled, |ui| {
        ui.horizontal_wrapped(|ui| {
            for &mode in GizmoMode::all() {
                if ui.selectable_label(current == mode, gizmo_mode_label(mode)).clicked() {
                    state.set_gizmo_mode(mode);
                }
            }
        });
    });
}

fn show_transform_fields(ui: &mut Ui, state: &mut AppState) {
    let rows = [
        (t("prop.position"), TransformField::Position as fn(Axis) -> TransformField),
        (t("prop.rotation"), TransformField::Rotation),
        (t("prop.scale"), TransformField::Scale),
    ];

    egui::Grid::new("transform_grid")
        .num_columns(4)
        .spacing([6.0, 4.0])
        .show(ui, |ui| {
            ui.label("");
            for axis in Axis::all() {
                ui.label(axis.label());
            }
            ui.end_row();

            for (label, make) in rows {
                ui.label(label);
                for axis in Axis::all() {
                    show_field(ui, state, make(axis));
                }
                ui.end_row();
            }
        });
}

fn show_field(ui: &mut Ui, state: &mut AppState, field: TransformField) {
    let mut text = state.fields.field(field).to_string();
    let response = ui.add(
        egui::TextEdit::singleline(&mut text)
            .desired_width(56.0)
            .font(egui::TextStyle::Monospace),
    );
    if response.changed() {
        state.edit_field(field, text);
    }
    if response.lost_focus() {
        state.commit_fields();
    }
}
