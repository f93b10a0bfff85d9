//! Keyboard shortcut handling

use eframe::egui;
use shared::GizmoMode;

use crate::state::AppState;
use crate::viewport::ViewportPanel;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Shortcut {
    Mode(GizmoMode),
    ToggleGizmo,
    Delete,
    Deselect,
    Focus,
}

fn pressed_shortcuts(i: &egui::InputState) -> Vec<Shortcut> {
    if i.modifiers.command || i.modifiers.alt {
        return Vec::new();
    }
    let bindings = [
        (egui::Key::W, Shortcut::Mode(GizmoMode::Translate)),
        (egui::Key::E, Shortcut::Mode(GizmoMode::Rotate)),
        (egui::Key::R, Shortcut::Mode(GizmoMode::Scale)),
        (egui::Key::G, Shortcut::ToggleGizmo),
        (egui::Key::Delete, Shortcut::Delete),
        (egui::Key::Escape, Shortcut::Deselect),
        (egui::Key::F, Shortcut::Focus),
    ];
    bindings
        .into_iter()
        .filter(|(key, _)| i.key_pressed(*key))
        .map(|(_, shortcut)| shortcut)
        .collect()
}

/// Handle keyboard shortcuts for the application
pub fn handle_keyboard(ctx: &egui::Context, state: &mut AppState, viewport: &mut ViewportPanel) {
    // Typing into a transform field must not trigger shortcuts
    if ctx.memory(|m| m.focused().is_some()) {
        return;
    }

    for shortcut in ctx.input(pressed_shortcuts) {
        match shortcut {
            Shortcut::Mode(mode) => {
                state.set_gizmo_mode(mode);
            }
            Shortcut::ToggleGizmo => {
                let show = !state.selection.show_gizmo();
                state.set_show_gizmo(show);
            }
            Shortcut::Delete => {
                let _ = state.delete_selected();
            }
            Shortcut::Deselect => state.deselect(),
            Shortcut::Focus => viewport.focus_selection(state),
        }
    }
}
