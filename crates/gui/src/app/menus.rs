//! Application menu bar and settings window

use eframe::egui;
use shared::GizmoMode;

use crate::i18n::{lang, set_lang, t};
use crate::state::{AppSettings, AppState, Language};
use crate::ui::gizmo_mode_label;
use crate::viewport::ViewportPanel;

/// Ask for a model file and queue it for loading
pub fn open_model_dialog(state: &mut AppState) {
    if let Some(path) = rfd::FileDialog::new()
        .set_title(t("menu.open_title"))
        .add_filter("glTF", &["glb", "gltf"])
        .pick_file()
    {
        // Errors are already reported to the status bar
        let _ = state.load_path(&path);
    }
}

/// Show the file menu
pub fn file_menu(ui: &mut egui::Ui, state: &mut AppState) {
    ui.menu_button(t("menu.file"), |ui| {
        if ui.button(t("menu.open_model")).clicked() {
            ui.close_menu();
            open_model_dialog(state);
        }
        ui.separator();
        if ui.button(t("menu.quit")).clicked() {
            ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
        }
    });
}

/// Show the edit menu
pub fn edit_menu(ui: &mut egui::Ui, state: &mut AppState) {
    ui.menu_button(t("menu.edit"), |ui| {
        let has_selection = state.selection.selected().is_some();
        if ui
            .add_enabled(has_selection, egui::Button::new(t("menu.reset")))
            .clicked()
        {
            let _ = state.reset_selected();
            ui.close_menu();
        }
        if ui
            .add_enabled(has_selection, egui::Button::new(t("menu.delete")))
            .clicked()
        {
            let _ = state.delete_selected();
            ui.close_menu();
        }
        ui.separator();
        if ui
            .add_enabled(has_selection, egui::Button::new(t("menu.deselect")))
            .clicked()
        {
            state.deselect();
            ui.close_menu();
        }
    });
}

/// Show the view menu
pub fn view_menu(ui: &mut egui::Ui, state: &mut AppState, viewport: &mut ViewportPanel) {
    ui.menu_button(t("menu.view"), |ui| {
        ui.checkbox(&mut state.panels.models, t("menu.models"));
        ui.checkbox(&mut state.panels.properties, t("menu.properties"));
        ui.separator();
        if ui.button(t("menu.reset_camera")).clicked() {
            viewport.reset_camera();
            ui.close_menu();
        }
        if ui
            .add_enabled(state.selection.selected().is_some(), egui::Button::new(t("menu.focus")))
            .clicked()
        {
            viewport.focus_selection(state);
            ui.close_menu();
        }
        ui.separator();
        ui.menu_button(t("menu.language"), |ui| {
            for (language, label) in [(Language::Ru, "Русский"), (Language::En, "English")] {
                if ui.selectable_label(lang() == language, label).clicked() {
                    set_lang(language);
                    state.settings.ui.language = language;
                    state.settings.save();
                    ui.close_menu();
                }
            }
        });
    });
}

/// Show the settings menu
pub fn settings_menu(ui: &mut egui::Ui, state: &mut AppState) {
    ui.menu_button(t("menu.settings"), |ui| {
        if ui.button(t("menu.preferences")).clicked() {
            state.show_settings_window = true;
            ui.close_menu();
        }
    });
}

/// Show the settings window
pub fn settings_window(ctx: &egui::Context, state: &mut AppState, viewport: &mut ViewportPanel) {
    let mut open = state.show_settings_window;
    egui::Window::new(t("settings.title"))
        .open(&mut open)
        .resizable(true)
        .default_width(400.0)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                show_gizmo_settings(ui, state);
                show_import_settings(ui, state);
                show_grid_settings(ui, state);
                show_axes_settings(ui, state);
                show_viewport_settings(ui, state);
                show_ui_settings(ui, state);
                show_settings_buttons(ui, state);
            });
        });
    state.show_settings_window = open;
    viewport.set_fov(state.settings.viewport.fov_degrees);
}

fn show_gizmo_settings(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading(t("settings.gizmo"));
    let mut show = state.settings.gizmo.show_gizmo;
    if ui.checkbox(&mut show, t("gizmo.show")).changed() {
        state.set_show_gizmo(show);
    }

    ui.horizontal(|ui| {
        ui.label(t("settings.gizmo_mode"));
        egui::ComboBox::from_id_salt("gizmo_mode_combo")
            .selected_text(gizmo_mode_label(state.settings.gizmo.default_mode))
            .show_ui(ui, |ui| {
                for &mode in GizmoMode::all() {
                    ui.selectable_value(
                        &mut state.settings.gizmo.default_mode,
                        mode,
                        gizmo_mode_label(mode),
                    );
                }
            });
    });

    ui.horizontal(|ui| {
        ui.label(t("settings.gizmo_size"));
        ui.add(
            egui::DragValue::new(&mut state.settings.gizmo.size)
                .speed(0.05)
                .range(0.25..=10.0),
        );
    });
    ui.add_space(10.0);
}

fn show_import_settings(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading(t("settings.import"));
    ui.horizontal(|ui| {
        ui.label(t("settings.max_dimension"));
        ui.add(
            egui::DragValue::new(&mut state.settings.import.max_dimension)
                .speed(0.1)
                .range(0.1..=1000.0),
        );
    });
    ui.horizontal(|ui| {
        ui.label(t("settings.forward_offset"));
        ui.add(
            egui::DragValue::new(&mut state.settings.import.forward_offset)
                .speed(0.1)
                .range(-100.0..=100.0),
        );
    });
    ui.add_space(10.0);
}

fn show_grid_settings(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading(t("settings.grid"));
    ui.checkbox(&mut state.settings.grid.visible, t("settings.grid_visible"));

    ui.horizontal(|ui| {
        ui.label(t("settings.grid_size"));
        ui.add(
            egui::DragValue::new(&mut state.settings.grid.size)
                .speed(0.1)
                .range(0.1..=100.0),
        );
    });

    ui.horizontal(|ui| {
        ui.label(t("settings.grid_range"));
        ui.add(
            egui::DragValue::new(&mut state.settings.grid.range)
                .speed(1)
                .range(1..=50),
        );
    });

    ui.horizontal(|ui| {
        ui.label(t("settings.grid_opacity"));
        ui.add(egui::Slider::new(&mut state.settings.grid.opacity, 0.0..=1.0));
    });
    ui.add_space(10.0);
}

fn show_axes_settings(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading(t("settings.axes"));
    ui.checkbox(&mut state.settings.axes.visible, t("settings.axes_visible"));
    ui.checkbox(&mut state.settings.axes.show_labels, t("settings.axes_labels"));

    ui.horizontal(|ui| {
        ui.label(t("settings.axes_length"));
        ui.add(
            egui::DragValue::new(&mut state.settings.axes.length)
                .speed(0.1)
                .range(0.1..=10.0),
        );
    });

    ui.horizontal(|ui| {
        ui.label(t("settings.axes_thickness"));
        ui.add(
            egui::DragValue::new(&mut state.settings.axes.thickness)
                .speed(0.1)
                .range(0.5..=5.0),
        );
    });
    ui.add_space(10.0);
}

fn rgb_edit(ui: &mut egui::Ui, label: &str, rgb: &mut [u8; 3]) {
    ui.horizontal(|ui| {
        ui.label(label);
        let mut color = egui::Color32::from_rgb(rgb[0], rgb[1], rgb[2]);
        if ui.color_edit_button_srgba(&mut color).changed() {
            *rgb = [color.r(), color.g(), color.b()];
        }
    });
}

fn show_viewport_settings(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading(t("settings.viewport"));
    let viewport = &mut state.settings.viewport;
    rgb_edit(ui, t("settings.bg_color"), &mut viewport.background_color);
    rgb_edit(ui, t("settings.sel_color"), &mut viewport.selection_color);
    rgb_edit(ui, t("settings.model_color"), &mut viewport.model_color);

    ui.horizontal(|ui| {
        ui.label(t("settings.fov"));
        ui.add(
            egui::DragValue::new(&mut viewport.fov_degrees)
                .speed(0.5)
                .range(20.0..=120.0)
                .suffix("°"),
        );
    });
    ui.add_space(10.0);
}

fn show_ui_settings(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading(t("settings.ui"));
    ui.horizontal(|ui| {
        ui.label(t("settings.font_size"));
        ui.add(
            egui::DragValue::new(&mut state.settings.ui.font_size)
                .speed(0.5)
                .range(8.0..=24.0)
                .suffix(" pt"),
        );
    });
    ui.add_space(10.0);
}

fn show_settings_buttons(ui: &mut egui::Ui, state: &mut AppState) {
    ui.separator();
    ui.horizontal(|ui| {
        if ui.button(t("settings.apply")).clicked() {
            state.settings.save();
        }
        if ui.button(t("settings.reset")).clicked() {
            state.settings = AppSettings::default();
            set_lang(state.settings.ui.language);
            let show = state.settings.gizmo.show_gizmo;
            state.set_show_gizmo(show);
        }
        if ui.button(t("settings.close")).clicked() {
            state.show_settings_window = false;
        }
    });
}
