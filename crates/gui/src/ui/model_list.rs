//! Model list panel: selection list, loading and scene primitive colors

use egui::Ui;

use crate::app::open_model_dialog;
use crate::helpers::short_id;
use crate::i18n::t;
use crate::scene::PrimitiveKind;
use crate::state::{AppState, SelectionOption};
use crate::ui::primitive_label;

pub fn show(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        ui.heading(t("models.title"));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.weak(format!("({})", state.registry.len()));
        });
    });
    ui.separator();

    show_selection_combo(ui, state);
    ui.add_space(4.0);

    if ui.button(t("models.load")).clicked() {
        open_model_dialog(state);
    }
    ui.weak(t("models.drop_hint"));
    if state.loads.pending() > 0 {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label(t("models.loading"));
        });
    }

    ui.add_space(6.0);
    show_model_rows(ui, state);

    ui.add_space(10.0);
    egui::CollapsingHeader::new(t("scene.title"))
        .id_salt("scene_primitives")
        .default_open(true)
        .show(ui, |ui| {
            show_primitive_colors(ui, state);
        });
}

/// Combo with a leading "none" entry followed by every loaded model
fn show_selection_combo(ui: &mut Ui, state: &mut AppState) {
    let options = state.registry.selection_options();
    let current = state.selection.selected().cloned();

    let selected_text = current
        .as_deref()
        .and_then(|id| state.registry.get(id))
        .map(|r| r.display_name().to_string())
        .unwrap_or_else(|| t("models.none").to_string());

    let mut choice: Option<SelectionOption> = None;
    egui::ComboBox::from_id_salt("model_select")
        .selected_text(selected_text)
        .width(ui.available_width())
        .show_ui(ui, |ui| {
            for option in options {
                let (label, checked) = match &option {
                    SelectionOption::None => (t("models.none").to_string(), current.is_none()),
                    SelectionOption::Model(summary) => (
                        format!("{}  [{}]", summary.name, short_id(&summary.id)),
                        current.as_deref() == Some(summary.id.as_str()),
                    ),
                };
                if ui.selectable_label(checked, label).clicked() {
                    choice = Some(option);
                }
            }
        });

    match choice {
        Some(SelectionOption::None) => state.deselect(),
        Some(SelectionOption::Model(summary)) => {
            let _ = state.select_model(&summary.id);
        }
        None => {}
    }
}

fn show_model_rows(ui: &mut Ui, state: &mut AppState) {
    if state.registry.is_empty() {
        ui.vertical_centered(|ui| {
            ui.weak(t("models.empty"));
        });
        return;
    }

    // Collect first: rows mutate the registry
    let rows: Vec<(String, String)> = state
        .registry
        .list()
        .map(|r| (r.id().clone(), r.display_name().to_string()))
        .collect();

    let mut to_select = None;
    let mut to_delete = None;
    egui::ScrollArea::vertical()
        .id_salt("model_rows")
        .max_height(240.0)
        .show(ui, |ui| {
            for (id, name) in &rows {
                ui.horizontal(|ui| {
                    let selected = state.selection.is_selected(id);
                    if ui.selectable_label(selected, name).on_hover_text(id.as_str()).clicked() {
                        to_select = Some(id.clone());
                    }
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button("🗑").on_hover_text(t("prop.delete")).clicked() {
                            to_delete = Some(id.clone());
                        }
                    });
                });
            }
        });

    if let Some(id) = to_select {
        let _ = state.select_model(&id);
    }
    if let Some(id) = to_delete {
        let _ = state.delete_model(&id);
    }
}

fn show_primitive_colors(ui: &mut Ui, state: &mut AppState) {
    egui::Grid::new("primitive_colors")
        .num_columns(2)
        .spacing([8.0, 4.0])
        .show(ui, |ui| {
            for kind in PrimitiveKind::all() {
                if !kind.color_editable() {
                    continue;
                }
                let Some(mut rgb) = state.primitive_color(kind) else {
                    continue;
                };
                ui.label(primitive_label(kind));
                if ui.color_edit_button_rgb(&mut rgb).changed() {
                    state.set_primitive_color(kind, rgb);
                }
                ui.end_row();
            }
        });
}
