//! Conversions between the text shown in transform fields and transform units.
//!
//! Rotation is stored in radians and displayed in whole degrees. Position and
//! scale are displayed with two decimals.

/// Smallest allowed scale component
pub const SCALE_EPSILON: f32 = 1e-4;

/// Decimal places used for position and scale fields
pub const LINEAR_DECIMALS: usize = 2;

pub fn degrees_to_radians(degrees: f32) -> f32 {
    degrees.to_radians()
}

pub fn radians_to_degrees(radians: f32) -> f32 {
    radians.to_degrees()
}

/// Parse a field as a decimal number.
///
/// Returns `None` for empty, non-numeric and non-finite input.
pub fn parse_field(text: &str) -> Option<f32> {
    let value: f32 = text.trim().parse().ok()?;
    value.is_finite().then_some(value)
}

/// Parse a field, keeping `previous` when the text is not a number.
pub fn parse_field_or(text: &str, previous: f32) -> f32 {
    parse_field(text).unwrap_or(previous)
}

/// Floor a scale component at [`SCALE_EPSILON`]
pub fn clamp_scale(value: f32) -> f32 {
    if value.is_nan() {
        return SCALE_EPSILON;
    }
    value.max(SCALE_EPSILON)
}

/// Format a position or scale component
pub fn format_linear(value: f32) -> String {
    let factor = 10_f32.powi(LINEAR_DECIMALS as i32);
    let rounded = without_negative_zero((value * factor).round() / factor);
    format!("{:.*}", LINEAR_DECIMALS, rounded)
}

/// Format a rotation component (radians) as whole degrees
pub fn format_degrees(radians: f32) -> String {
    let degrees = without_negative_zero(radians_to_degrees(radians).round());
    format!("{degrees:.0}")
}

fn without_negative_zero(value: f32) -> f32 {
    if value == 0.0 {
        0.0
    } else {
        value
    }
}
