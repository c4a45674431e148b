//! Terrain damage.
//!
//! The formula is steep in terrain level (36 / 288 / 2916 base damage) and
//! carries a correction factor `1 - 2^-max(0, 8 - r) * r` that
//! goes negative between resistance 5 and 6. The raw value is
//! kept as is and the rounded result is clamped at zero.

use crate::model::{Element, TerrainCell};
use crate::util::format_resistance;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Success,
    /// Only used for the game-over notice.
    Error,
}

/// Outcome of stepping onto one cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellDamage {
    pub damage: u32,
    /// Resistance met the cell level; informational only.
    pub absorbed: bool,
    pub element: Option<Element>,
    pub level: u8,
    pub resistance: f64,
}

impl CellDamage {
    const NONE: CellDamage = CellDamage {
        damage: 0,
        absorbed: false,
        element: None,
        level: 0,
        resistance: 0.0,
    };

    /// Player-facing notice: a warning when damage landed, a success when the
    /// resistance absorbed it, nothing otherwise.
    pub fn notice(&self) -> Option<(String, Severity)> {
        let element = self.element?;
        if self.damage > 0 {
            Some((
                format!(
                    "Took {} damage from level-{} {} terrain! (resistance {})",
                    self.damage,
                    self.level,
                    element,
                    format_resistance(self.resistance)
                ),
                Severity::Warning,
            ))
        } else if self.absorbed {
            Some((
                format!(
                    "Your {} {} resistance fully absorbed the damage!",
                    format_resistance(self.resistance),
                    element
                ),
                Severity::Success,
            ))
        } else {
            None
        }
    }
}

pub fn base_damage(level: u8) -> f64 {
    let exponent = i32::from(level);
    let level = f64::from(level);
    level * 12.0 * 3f64.powi(exponent)
}

/// Unrounded damage for a terrain level against `resistance`.
pub fn raw_damage(level: u8, resistance: f64) -> f64 {
    let reduced = (base_damage(level) - resistance * 12.0).max(0.0);
    let correction = 1.0 - 2f64.powf(-(8.0 - resistance).max(0.0)) * resistance;
    reduced * correction
}

pub fn apply_cell(cell: &TerrainCell, resistance: f64) -> CellDamage {
    match *cell {
        TerrainCell::Start | TerrainCell::End => CellDamage::NONE,
        TerrainCell::Normal { element, level } => {
            let raw = raw_damage(level, resistance);
            // Negative raw values come from the correction factor; clamp them.
            let damage = if raw > 0.0 { raw.round() as u32 } else { 0 };
            CellDamage {
                damage,
                absorbed: resistance >= f64::from(level),
                element: Some(element),
                level,
                resistance,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn cell(level: u8) -> TerrainCell {
        TerrainCell::Normal { element: Element::Fire, level }
    }

    #[test]
    fn base_damage_per_level() {
        assert_eq!(base_damage(1), 36.0);
        assert_eq!(base_damage(2), 288.0);
        assert_eq!(base_damage(3), 2916.0);
    }

    #[test]
    fn endpoints_never_hurt() {
        for r in [0.0, 1.5, 6.0, 40.0] {
            assert_eq!(apply_cell(&TerrainCell::Start, r).damage, 0);
            assert_eq!(apply_cell(&TerrainCell::End, r).damage, 0);
            assert!(apply_cell(&TerrainCell::End, r).notice().is_none());
        }
    }

    #[test]
    fn golden_values() {
        assert_eq!(apply_cell(&cell(1), 0.0).damage, 36);
        assert_eq!(apply_cell(&cell(2), 0.0).damage, 288);
        assert_eq!(apply_cell(&cell(3), 0.0).damage, 2916);
        // (36 - 24) * (1 - 2^-6 * 2) = 11.625
        assert_eq!(apply_cell(&cell(1), 2.0).damage, 12);
        // (288 - 36) * (1 - 2^-5 * 3) = 228.375
        assert_eq!(apply_cell(&cell(2), 3.0).damage, 228);
        // (2916 - 36) * 0.90625 = 2610
        assert_eq!(apply_cell(&cell(3), 3.0).damage, 2610);
    }

    #[test]
    fn negative_correction_clamps_to_zero() {
        // (2916 - 72) * (1 - 2^-2 * 6) = -1422
        assert!(raw_damage(3, 6.0) < 0.0);
        let hit = apply_cell(&cell(3), 6.0);
        assert_eq!(hit.damage, 0);
        assert!(hit.absorbed);
    }

    #[test]
    fn notice_classification() {
        let hurt = apply_cell(&cell(2), 1.0);
        let (msg, severity) = hurt.notice().unwrap();
        assert_eq!(severity, Severity::Warning);
        assert!(msg.contains("level-2 fire"));
        assert!(msg.contains("resistance 1.0"));

        let blocked = apply_cell(&cell(1), 3.0);
        assert_eq!(blocked.damage, 0);
        let (msg, severity) = blocked.notice().unwrap();
        assert_eq!(severity, Severity::Success);
        assert_eq!(msg, "Your 3.0 fire resistance fully absorbed the damage!");
    }

    proptest! {
        #[test]
        fn damage_is_never_negative(level in 1u8..=3, r in 0.0f64..100.0) {
            let hit = apply_cell(&cell(level), r);
            prop_assert!(f64::from(hit.damage) <= base_damage(level));
            prop_assert_eq!(hit.absorbed, r >= f64::from(level));
        }
    }
}
