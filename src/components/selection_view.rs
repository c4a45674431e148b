use yew::prelude::*;

use super::{equipment_panel::EquipmentPanel, map_grid::MapGrid, stats_panel::StatsPanel};
use crate::model::{Achievements, Difficulty, EquipmentDatabase, Map, SelectedEquipment, Slot};
use crate::state::EngineAction;
use crate::state::resistance::Resistances;

#[derive(Properties, PartialEq, Clone)]
pub struct SelectionViewProps {
    pub equipment: EquipmentDatabase,
    pub selection: SelectedEquipment,
    pub difficulty: Difficulty,
    pub achievements: Achievements,
    pub map: Map,
    pub health: u32,
    pub max_health: u32,
    pub resistances: Resistances,
    pub can_start: bool,
    pub can_refresh: bool,
    pub on_action: Callback<EngineAction>,
}

#[function_component]
pub fn SelectionView(props: &SelectionViewProps) -> Html {
    let emit = |action: EngineAction| {
        let cb = props.on_action.clone();
        Callback::from(move |_: MouseEvent| cb.emit(action.clone()))
    };
    let on_select = {
        let cb = props.on_action.clone();
        Callback::from(move |(slot, id): (Slot, String)| cb.emit(EngineAction::SelectEquipment { slot, id }))
    };
    let reset_cb = {
        let cb = props.on_action.clone();
        Callback::from(move |_: MouseEvent| {
            let confirmed = web_sys::window()
                .and_then(|win| {
                    win.confirm_with_message("This will WIPE all equipment progress and achievements. Are you sure?")
                        .ok()
                })
                .unwrap_or(true);
            if confirmed {
                cb.emit(EngineAction::ResetAllData);
            }
        })
    };
    let difficulty_buttons = Difficulty::ALL.iter().map(|&d| {
        let active = d == props.difficulty;
        let wins = props.achievements.wins(d);
        let style = if active { "font-weight:700; border:2px solid #58a6ff;" } else { "" };
        html! {
            <button style={style} onclick={emit(EngineAction::SetDifficulty(d))}>
                { if wins > 0 { format!("{d} 🏆{wins}") } else { d.to_string() } }
            </button>
        }
    });
    let panels = Slot::ALL.iter().map(|&slot| {
        html! {
            <EquipmentPanel
                slot={slot}
                items={props.equipment.slot(slot).to_vec()}
                selected={props.selection.get(slot).map(str::to_string)}
                on_select={on_select.clone()}
            />
        }
    });
    html! {
        <div style="display:flex; gap:24px; padding:16px; flex-wrap:wrap;">
            <div style="display:flex; flex-direction:column; gap:12px;">
                <StatsPanel health={props.health} max_health={props.max_health} resistances={props.resistances} />
                { for panels }
            </div>
            <div style="display:flex; flex-direction:column; gap:12px;">
                <div style="display:flex; gap:6px;">{ for difficulty_buttons }</div>
                <MapGrid map={props.map.clone()} cell_px={44} />
                <div style="display:flex; gap:8px;">
                    <button disabled={!props.can_start} onclick={emit(EngineAction::StartRun)}>{"Start"}</button>
                    <button disabled={!props.can_refresh} onclick={emit(EngineAction::RefreshMap)}>{"New Map"}</button>
                    <button onclick={reset_cb}>{"Reset Data"}</button>
                </div>
            </div>
        </div>
    }
}
