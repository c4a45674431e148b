// Equipment experience and level-ups
use tracing::debug;

use crate::model::{EquipmentDatabase, EquipmentItem, SelectedEquipment};

/// Adds `amount` experience, levelling up as many times as the total allows.
/// Each level-up costs the current requirement and raises the next one by
/// half, rounded down. Returns the number of levels gained.
pub fn grant_exp(item: &mut EquipmentItem, amount: u32) -> u32 {
    item.exp = item.exp.saturating_add(amount);
    let mut gained = 0;
    while item.exp >= item.exp_to_next_level {
        item.exp -= item.exp_to_next_level;
        item.level += 1;
        item.exp_to_next_level = next_requirement(item.exp_to_next_level);
        gained += 1;
    }
    gained
}

fn next_requirement(current: u32) -> u32 {
    // floor(x * 1.5) in integers; never below 1 so the loop always ends.
    current.saturating_add(current / 2).max(1)
}

/// Rewards every equipped item in place. Selection holds ids only, so it
/// resolves to the updated entries without a separate refresh.
pub fn reward_equipped(db: &mut EquipmentDatabase, selection: &SelectedEquipment, amount: u32) {
    for slot in crate::model::Slot::ALL {
        let Some(id) = selection.get(slot) else { continue };
        let Some(item) = db.find_mut(slot, id) else { continue };
        let levels = grant_exp(item, amount);
        debug!(item = %item.id, amount, levels, level = item.level, exp = item.exp, "granted exp");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Slot;
    use proptest::prelude::*;

    fn fresh() -> EquipmentItem {
        EquipmentDatabase::default().body[1].clone()
    }

    #[test]
    fn below_threshold_only_accumulates() {
        let mut item = fresh();
        assert_eq!(grant_exp(&mut item, 80), 0);
        assert_eq!((item.level, item.exp, item.exp_to_next_level), (1, 80, 100));
    }

    #[test]
    fn exact_threshold_levels_once() {
        let mut item = fresh();
        assert_eq!(grant_exp(&mut item, 100), 1);
        assert_eq!((item.level, item.exp, item.exp_to_next_level), (2, 0, 150));
    }

    #[test]
    fn overflow_carries_into_next_level() {
        let mut item = fresh();
        grant_exp(&mut item, 120);
        assert_eq!((item.level, item.exp, item.exp_to_next_level), (2, 20, 150));
    }

    #[test]
    fn large_grant_spans_levels() {
        let mut item = fresh();
        // 100 + 150 + 225 = 475
        assert_eq!(grant_exp(&mut item, 500), 3);
        assert_eq!((item.level, item.exp, item.exp_to_next_level), (4, 25, 337));
    }

    #[test]
    fn requirement_floors() {
        assert_eq!(next_requirement(150), 225);
        assert_eq!(next_requirement(225), 337);
        assert_eq!(next_requirement(1), 1);
    }

    #[test]
    fn reward_skips_empty_slots() {
        let mut db = EquipmentDatabase::default();
        let sel = SelectedEquipment { head: Some("head2".into()), ..Default::default() };
        reward_equipped(&mut db, &sel, 120);
        assert_eq!(db.find(Slot::Head, "head2").map(|i| (i.level, i.exp)), Some((2, 20)));
        assert_eq!(db.find(Slot::Head, "head1").map(|i| i.exp), Some(0));
        assert!(db.body.iter().chain(db.feet.iter()).all(|i| i.exp == 0 && i.level == 1));
    }

    proptest! {
        #[test]
        fn exp_stays_below_requirement(grants in prop::collection::vec(0u32..2_000, 1..20)) {
            let mut item = fresh();
            for g in grants {
                grant_exp(&mut item, g);
                prop_assert!(item.exp < item.exp_to_next_level);
                prop_assert!(item.level >= 1);
            }
        }
    }
}
