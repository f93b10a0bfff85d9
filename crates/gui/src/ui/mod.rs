pub mod model_list;
pub mod properties;
pub mod status_bar;

use shared::GizmoMode;

use crate::i18n::t;
use crate::scene::PrimitiveKind;

pub fn gizmo_mode_label(mode: GizmoMode) -> &'static str {
    match mode {
        GizmoMode::Translate => t("gizmo.translate"),
        GizmoMode::Rotate => t("gizmo.rotate"),
        GizmoMode::Scale => t("gizmo.scale"),
    }
}

pub fn primitive_label(kind: PrimitiveKind) -> &'static str {
    match kind {
        PrimitiveKind::Box => t("prim.box"),
        PrimitiveKind::Sphere => t("prim.sphere"),
        PrimitiveKind::Plane => t("prim.plane"),
        PrimitiveKind::Pyramid => t("prim.pyramid"),
    }
}
