use crate::entities::HeightUnit;

/// Convert a user-entered height into whole meters.
///
/// The value is rounded half-up to the nearest meter. Rejecting
/// negative values is up to the caller, they end up as 0 here as
/// do values that are not finite.
pub fn normalize_height(raw_value: f64, unit: HeightUnit) -> u32 {
    let meters = raw_value * unit.meters_per_unit();
    // f64::round() rounds half away from zero which equals
    // half-up for all non-negative values. The cast saturates.
    meters.round() as u32
}

/// Parse the unit of a height value as submitted by a form.
///
/// Anything other than `m` or `ft` is treated as meters.
pub fn parse_height_unit(unit: &str) -> HeightUnit {
    let unit = unit.trim();
    if unit.is_empty() {
        return HeightUnit::default();
    }
    unit.parse().unwrap_or_else(|_| {
        log::warn!("Unrecognized height unit '{unit}', treating the value as meters");
        HeightUnit::Meters
    })
}
