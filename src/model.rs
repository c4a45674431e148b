//! Core data models for Elemental Trek.
//! Equipment, terrain and map types shared by the rules engine and the view.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub const MAP_ROWS: usize = 5;
pub const MAP_COLS: usize = 6;
pub const START_POS: Position = Position { row: MAP_ROWS - 1, col: 0 };
pub const END_POS: Position = Position { row: 0, col: MAP_COLS - 1 };

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Fire,
    Storm,
    Ice,
}

impl Element {
    pub const ALL: [Element; 3] = [Element::Fire, Element::Storm, Element::Ice];

    pub fn label(self) -> &'static str {
        match self {
            Element::Fire => "fire",
            Element::Storm => "storm",
            Element::Ice => "ice",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Element::Fire => "🔥",
            Element::Storm => "🌪️",
            Element::Ice => "❄️",
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    Head,
    Body,
    Feet,
}

impl Slot {
    pub const ALL: [Slot; 3] = [Slot::Head, Slot::Body, Slot::Feet];

    pub fn label(self) -> &'static str {
        match self {
            Slot::Head => "Head",
            Slot::Body => "Body",
            Slot::Feet => "Feet",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
    Expert,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Normal,
        Difficulty::Hard,
        Difficulty::Expert,
    ];

    /// Hard and Expert keep one map until it is beaten or the profile is reset.
    pub fn has_fixed_map(self) -> bool {
        matches!(self, Difficulty::Hard | Difficulty::Expert)
    }

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
            Difficulty::Expert => "Expert",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    /// One step in `dir`, clamped to the grid.
    pub fn step(self, dir: Direction) -> Position {
        match dir {
            Direction::Up => Position { row: self.row.saturating_sub(1), ..self },
            Direction::Down => Position { row: (self.row + 1).min(MAP_ROWS - 1), ..self },
            Direction::Left => Position { col: self.col.saturating_sub(1), ..self },
            Direction::Right => Position { col: (self.col + 1).min(MAP_COLS - 1), ..self },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentItem {
    pub id: String,
    pub name: String,
    pub resistance_type: Element,
    pub base_value: f64,
    pub level: u32,
    pub exp: u32,
    pub exp_to_next_level: u32,
    pub slot: Slot,
}

impl EquipmentItem {
    fn factory(id: &str, name: &str, slot: Slot, element: Element, base_value: f64) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            resistance_type: element,
            base_value,
            level: 1,
            exp: 0,
            exp_to_next_level: 100,
            slot,
        }
    }

    fn is_consistent(&self, slot: Slot) -> bool {
        self.slot == slot
            && self.level >= 1
            && self.exp_to_next_level > 0
            && self.exp < self.exp_to_next_level
            && self.base_value.is_finite()
            && self.base_value >= 0.0
    }
}

/// Every slot holds exactly three items, one per element.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EquipmentDatabase {
    pub head: [EquipmentItem; 3],
    pub body: [EquipmentItem; 3],
    pub feet: [EquipmentItem; 3],
}

impl Default for EquipmentDatabase {
    fn default() -> Self {
        use Element::*;
        use Slot::*;
        Self {
            head: [
                EquipmentItem::factory("head1", "Flame Helm", Head, Fire, 3.0),
                EquipmentItem::factory("head2", "Storm Helm", Head, Storm, 3.0),
                EquipmentItem::factory("head3", "Frost Helm", Head, Ice, 3.0),
            ],
            body: [
                EquipmentItem::factory("body1", "Flame Armor", Body, Fire, 2.0),
                EquipmentItem::factory("body2", "Storm Armor", Body, Storm, 2.0),
                EquipmentItem::factory("body3", "Frost Armor", Body, Ice, 2.0),
            ],
            feet: [
                EquipmentItem::factory("feet1", "Flame Boots", Feet, Fire, 1.0),
                EquipmentItem::factory("feet2", "Storm Boots", Feet, Storm, 1.0),
                EquipmentItem::factory("feet3", "Frost Boots", Feet, Ice, 1.0),
            ],
        }
    }
}

impl EquipmentDatabase {
    pub fn slot(&self, slot: Slot) -> &[EquipmentItem; 3] {
        match slot {
            Slot::Head => &self.head,
            Slot::Body => &self.body,
            Slot::Feet => &self.feet,
        }
    }

    pub fn slot_mut(&mut self, slot: Slot) -> &mut [EquipmentItem; 3] {
        match slot {
            Slot::Head => &mut self.head,
            Slot::Body => &mut self.body,
            Slot::Feet => &mut self.feet,
        }
    }

    pub fn find(&self, slot: Slot, id: &str) -> Option<&EquipmentItem> {
        self.slot(slot).iter().find(|item| item.id == id)
    }

    pub fn find_mut(&mut self, slot: Slot, id: &str) -> Option<&mut EquipmentItem> {
        self.slot_mut(slot).iter_mut().find(|item| item.id == id)
    }

    /// Structural check applied to snapshots read back from storage.
    pub fn is_consistent(&self) -> bool {
        Slot::ALL.iter().all(|&slot| {
            let items = self.slot(slot);
            items.iter().all(|item| item.is_consistent(slot))
                && Element::ALL
                    .iter()
                    .all(|&e| items.iter().filter(|i| i.resistance_type == e).count() == 1)
        })
    }
}

/// Transient choice of one item id per slot. Items are looked up in the
/// database on every read, so progression never leaves a stale copy behind.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectedEquipment {
    pub head: Option<String>,
    pub body: Option<String>,
    pub feet: Option<String>,
}

impl SelectedEquipment {
    pub fn get(&self, slot: Slot) -> Option<&str> {
        match slot {
            Slot::Head => self.head.as_deref(),
            Slot::Body => self.body.as_deref(),
            Slot::Feet => self.feet.as_deref(),
        }
    }

    pub fn set(&mut self, slot: Slot, id: Option<String>) {
        match slot {
            Slot::Head => self.head = id,
            Slot::Body => self.body = id,
            Slot::Feet => self.feet = id,
        }
    }

    pub fn resolve<'a>(&self, db: &'a EquipmentDatabase, slot: Slot) -> Option<&'a EquipmentItem> {
        self.get(slot).and_then(|id| db.find(slot, id))
    }

    /// Every equipped item that still exists in `db`.
    pub fn equipped<'a>(&'a self, db: &'a EquipmentDatabase) -> impl Iterator<Item = &'a EquipmentItem> + 'a {
        Slot::ALL.into_iter().filter_map(move |slot| self.resolve(db, slot))
    }

    pub fn is_complete(&self, db: &EquipmentDatabase) -> bool {
        Slot::ALL.iter().all(|&slot| self.resolve(db, slot).is_some())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TerrainCell {
    Start,
    End,
    Normal { element: Element, level: u8 },
}

impl TerrainCell {
    #[cfg(test)]
    pub fn is_endpoint(&self) -> bool {
        matches!(self, TerrainCell::Start | TerrainCell::End)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Map {
    /// Row-major; row 0 is the top edge.
    pub cells: [[TerrainCell; MAP_COLS]; MAP_ROWS],
}

impl Map {
    pub fn cell(&self, pos: Position) -> &TerrainCell {
        &self.cells[pos.row][pos.col]
    }

    /// Start and end sit at their fixed corners, nowhere else, and every
    /// terrain level is 1..=3.
    pub fn is_consistent(&self) -> bool {
        self.cells.iter().enumerate().all(|(row, cells)| {
            cells.iter().enumerate().all(|(col, cell)| {
                let pos = Position { row, col };
                match cell {
                    TerrainCell::Start => pos == START_POS,
                    TerrainCell::End => pos == END_POS,
                    TerrainCell::Normal { level, .. } => {
                        pos != START_POS && pos != END_POS && (1..=3).contains(level)
                    }
                }
            })
        })
    }
}

/// Win count per difficulty.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievements(pub BTreeMap<Difficulty, u32>);

impl Default for Achievements {
    fn default() -> Self {
        Self(Difficulty::ALL.iter().map(|&d| (d, 0)).collect())
    }
}

impl Achievements {
    pub fn wins(&self, difficulty: Difficulty) -> u32 {
        self.0.get(&difficulty).copied().unwrap_or(0)
    }

    pub fn record_win(&mut self, difficulty: Difficulty) {
        let count = self.0.entry(difficulty).or_insert(0);
        *count = count.saturating_add(1);
    }
}
