// Effective resistance of equipment
use crate::model::{Element, EquipmentDatabase, EquipmentItem, SelectedEquipment};

/// Each level past the first adds 10% of the base value.
pub fn item_resistance(item: &EquipmentItem) -> f64 {
    item.base_value * (1.0 + 0.1 * (f64::from(item.level) - 1.0))
}

/// Sum of `item_resistance` over equipped items of `element`.
pub fn aggregate_resistance(
    selection: &SelectedEquipment,
    db: &EquipmentDatabase,
    element: Element,
) -> f64 {
    selection
        .equipped(db)
        .filter(|item| item.resistance_type == element)
        .map(item_resistance)
        .sum()
}

/// Per-element resistance snapshot taken when a run starts.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Resistances {
    pub fire: f64,
    pub storm: f64,
    pub ice: f64,
}

impl Resistances {
    pub fn from_selection(selection: &SelectedEquipment, db: &EquipmentDatabase) -> Self {
        Self {
            fire: aggregate_resistance(selection, db, Element::Fire),
            storm: aggregate_resistance(selection, db, Element::Storm),
            ice: aggregate_resistance(selection, db, Element::Ice),
        }
    }

    pub fn get(&self, element: Element) -> f64 {
        match element {
            Element::Fire => self.fire,
            Element::Storm => self.storm,
            Element::Ice => self.ice,
        }
    }
}
