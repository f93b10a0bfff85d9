use std::sync::atomic::{AtomicU8, Ordering};

use crate::state::Language;

static CURRENT_LANG: AtomicU8 = AtomicU8::new(0); // 0=Ru (default)

pub fn lang() -> Language {
    match CURRENT_LANG.load(Ordering::Relaxed) {
        1 => Language::En,
        _ => Language::Ru,
    }
}

pub fn set_lang(l: Language) {
    CURRENT_LANG.store(
        match l {
            Language::Ru => 0,
            Language::En => 1,
        },
        Ordering::Relaxed,
    );
}

/// Translate a key to the current language.
pub fn t(key: &str) -> &'static str {
    let ru = lang() == Language::Ru;
    match key {
        // ── Main menus ──────────────────────────────────────
        "menu.file" => if ru { "Файл" } else { "File" },
        "menu.open_model" => if ru { "Открыть модель..." } else { "Open Model..." },
        "menu.open_title" => if ru { "Открыть модель glTF" } else { "Open glTF Model" },
        "menu.quit" => if ru { "Выход" } else { "Quit" },

        "menu.edit" => if ru { "Правка" } else { "Edit" },
        "menu.delete" => if ru { "Удалить модель  Del" } else { "Delete model  Del" },
        "menu.reset" => if ru { "Сбросить трансформацию" } else { "Reset transform" },
        "menu.deselect" => if ru { "Снять выделение  Esc" } else { "Deselect  Esc" },

        "menu.view" => if ru { "Вид" } else { "View" },
        "menu.models" => if ru { "Модели" } else { "Models" },
        "menu.properties" => if ru { "Свойства" } else { "Properties" },
        "menu.reset_camera" => if ru { "Сбросить камеру" } else { "Reset camera" },
        "menu.focus" => if ru { "Показать выделенное  F" } else { "Focus selection  F" },
        "menu.language" => if ru { "Язык" } else { "Language" },

        "menu.settings" => if ru { "Настройки" } else { "Settings" },
        "menu.preferences" => if ru { "Параметры..." } else { "Preferences..." },

        // ── Model list ──────────────────────────────────────
        "models.title" => if ru { "Модели" } else { "Models" },
        "models.none" => if ru { "(нет)" } else { "(none)" },
        "models.empty" => if ru { "Модели не загружены" } else { "No models loaded" },
        "models.load" => if ru { "Загрузить..." } else { "Load..." },
        "models.drop_hint" => if ru { "или перетащите .glb / .gltf" } else { "or drop a .glb / .gltf file" },
        "models.loading" => if ru { "Загрузка..." } else { "Loading..." },

        // ── Properties ──────────────────────────────────────
        "prop.title" => if ru { "Свойства" } else { "Properties" },
        "prop.select_object" => if ru { "Выберите модель" } else { "Select a model" },
        "prop.to_view" => if ru { "для редактирования" } else { "to edit it" },
        "prop.name" => if ru { "Имя" } else { "Name" },
        "prop.transform" => if ru { "Трансформация" } else { "Transform" },
        "prop.position" => if ru { "Позиция" } else { "Position" },
        "prop.rotation" => if ru { "Поворот (°)" } else { "Rotation (°)" },
        "prop.scale" => if ru { "Масштаб" } else { "Scale" },
        "prop.reset" => if ru { "Сбросить" } else { "Reset" },
        "prop.delete" => if ru { "Удалить" } else { "Delete" },

        // ── Gizmo ───────────────────────────────────────────
        "gizmo.title" => if ru { "Гизмо" } else { "Gizmo" },
        "gizmo.show" => if ru { "Показывать гизмо  G" } else { "Show gizmo  G" },
        "gizmo.translate" => if ru { "Перемещение  W" } else { "Translate  W" },
        "gizmo.rotate" => if ru { "Поворот  E" } else { "Rotate  E" },
        "gizmo.scale" => if ru { "Масштаб  R" } else { "Scale  R" },

        // ── Scene primitives ────────────────────────────────
        "scene.title" => if ru { "Сцена" } else { "Scene" },
        "prim.box" => if ru { "Куб" } else { "Box" },
        "prim.sphere" => if ru { "Сфера" } else { "Sphere" },
        "prim.plane" => if ru { "Плоскость" } else { "Ground plane" },
        "prim.pyramid" => if ru { "Пирамида" } else { "Pyramid" },

        // ── Status bar ──────────────────────────────────────
        "status.models" => if ru { "Модели" } else { "Models" },
        "status.loading" => if ru { "Загружается" } else { "Loading" },
        "status.ready" => if ru { "Готово" } else { "Ready" },
        "status.nav_hint" => if ru {
            "ЛКМ: выбор  |  СКМ / Alt+ЛКМ: вращение  |  ПКМ: сдвиг  |  Колесо: зум"
        } else {
            "LMB: select  |  MMB / Alt+LMB: orbit  |  RMB: pan  |  Wheel: zoom"
        },

        // ── Settings window ─────────────────────────────────
        "settings.title" => if ru { "Настройки" } else { "Settings" },
        "settings.gizmo" => if ru { "Гизмо" } else { "Gizmo" },
        "settings.gizmo_mode" => if ru { "Режим по умолчанию" } else { "Default mode" },
        "settings.gizmo_size" => if ru { "Длина осей" } else { "Handle length" },

        "settings.import" => if ru { "Импорт" } else { "Import" },
        "settings.max_dimension" => if ru { "Макс. размер модели" } else { "Max model size" },
        "settings.forward_offset" => if ru { "Смещение по Z" } else { "Z offset" },

        "settings.grid" => if ru { "Сетка" } else { "Grid" },
        "settings.grid_visible" => if ru { "Показывать сетку" } else { "Show grid" },
        "settings.grid_size" => if ru { "Размер ячейки" } else { "Cell size" },
        "settings.grid_range" => if ru { "Количество линий" } else { "Line count" },
        "settings.grid_opacity" => if ru { "Прозрачность" } else { "Opacity" },

        "settings.axes" => if ru { "Оси координат" } else { "Axes" },
        "settings.axes_visible" => if ru { "Показывать оси" } else { "Show axes" },
        "settings.axes_length" => if ru { "Длина стрелок" } else { "Arrow length" },
        "settings.axes_thickness" => if ru { "Толщина линий" } else { "Line thickness" },
        "settings.axes_labels" => if ru { "Показывать метки" } else { "Show labels" },

        "settings.viewport" => if ru { "Вьюпорт" } else { "Viewport" },
        "settings.bg_color" => if ru { "Цвет фона" } else { "Background color" },
        "settings.sel_color" => if ru { "Цвет выделения" } else { "Selection color" },
        "settings.model_color" => if ru { "Цвет моделей" } else { "Model color" },
        "settings.fov" => if ru { "Угол обзора" } else { "Field of view" },

        "settings.ui" => if ru { "Интерфейс" } else { "Interface" },
        "settings.font_size" => if ru { "Размер шрифта" } else { "Font size" },

        "settings.apply" => if ru { "Применить" } else { "Apply" },
        "settings.reset" => if ru { "Сбросить" } else { "Reset" },
        "settings.close" => if ru { "Закрыть" } else { "Close" },

        // ── Fallback ────────────────────────────────────────
        _ => "???",
    }
}
