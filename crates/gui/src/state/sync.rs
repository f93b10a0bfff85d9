//! Two-way sync between the nine transform fields and the selected object.
//!
//! Only user edits mark a field as edited, and only edited fields are pushed
//! to the object; the other components keep their exact values. Filling the fields from the object never pushes back.

use shared::{Axis, Transform};

use crate::codec::{clamp_scale, degrees_to_radians, format_degrees, format_linear, parse_field};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransformField {
    Position(Axis),
    /// Degrees in the field, radians on the object
    Rotation(Axis),
    Scale(Axis),
}

impl TransformField {
    pub fn all() -> [TransformField; 9] {
        let [x, y, z] = Axis::all();
        [
            TransformField::Position(x),
            TransformField::Position(y),
            TransformField::Position(z),
            TransformField::Rotation(x),
            TransformField::Rotation(y),
            TransformField::Rotation(z),
            TransformField::Scale(x),
            TransformField::Scale(y),
            TransformField::Scale(z),
        ]
    }

    fn slot(self) -> usize {
        match self {
            TransformField::Position(a) => a.index(),
            TransformField::Rotation(a) => 3 + a.index(),
            TransformField::Scale(a) => 6 + a.index(),
        }
    }

    pub fn axis(self) -> Axis {
        match self {
            TransformField::Position(a) | TransformField::Rotation(a) | TransformField::Scale(a) => a,
        }
    }
}

#[derive(Debug, Default)]
pub struct TransformBridge {
    fields: [String; 9],
    /// Fields the user changed since the last object push or refresh
    edited: [bool; 9],
}

impl TransformBridge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(&self, field: TransformField) -> &str {
        &self.fields[field.slot()]
    }

    /// Record a user edit of one field
    pub fn edit(&mut self, field: TransformField, text: impl Into<String>) {
        let slot = field.slot();
        self.fields[slot] = text.into();
        self.edited[slot] = true;
    }

    /// There are user edits not yet pushed to the object
    pub fn is_dirty(&self) -> bool {
        self.edited.iter().any(|&e| e)
    }

    pub fn is_edited(&self, field: TransformField) -> bool {
        self.edited[field.slot()]
    }

    /// Empty all fields (no selection)
    pub fn clear(&mut self) {
        for f in &mut self.fields {
            f.clear();
        }
        self.edited = [false; 9];
    }

    /// Object → Fields
    pub fn object_to_fields(&mut self, object: &Transform) {
        for axis in Axis::all() {
            let i = axis.index();
            self.fields[TransformField::Position(axis).slot()] = format_linear(object.position[i]);
            self.fields[TransformField::Rotation(axis).slot()] = format_degrees(object.rotation[i]);
            self.fields[TransformField::Scale(axis).slot()] = format_linear(object.scale[i]);
        }
        self.edited = [false; 9];
    }

    /// Build the transform the edited fields describe.
    ///
    /// Components whose field was not edited keep the exact value of
    /// `previous`, as does an edited field that does not hold a number.
    pub fn parse(&self, previous: &Transform) -> Transform {
        let mut out = *previous;
        for field in TransformField::all() {
            if !self.is_edited(field) {
                continue;
            }
            let Some(v) = parse_field(self.field(field)) else {
                continue;
            };
            let i = field.axis().index();
            match field {
                TransformField::Position(_) => out.position[i] = v,
                TransformField::Rotation(_) => out.rotation[i] = degrees_to_radians(v),
                TransformField::Scale(_) => out.scale[i] = clamp_scale(v),
            }
        }
        out
    }

    /// Fields → Object. Writes the whole transform in one assignment; does
    /// nothing unless the fields hold user edits. Returns whether it wrote.
    pub fn fields_to_object(&mut self, object: &mut Transform) -> bool {
        if !self.is_dirty() {
            return false;
        }
        *object = self.parse(object);
        self.edited = [false; 9];
        true
    }

    /// Restore `default` into the object and refresh the fields
    pub fn reset(&mut self, default: &Transform, object: &mut Transform) {
        *object = *default;
        self.object_to_fields(object);
    }
}
