use yew::prelude::*;

use crate::model::{EquipmentItem, Slot};
use crate::state::resistance::item_resistance;
use crate::util::format_resistance;

#[derive(Properties, PartialEq, Clone)]
pub struct EquipmentPanelProps {
    pub slot: Slot,
    pub items: Vec<EquipmentItem>,
    pub selected: Option<String>,
    pub on_select: Callback<(Slot, String)>,
}

/// The three choices for one slot, with level and exp progress.
#[function_component]
pub fn EquipmentPanel(props: &EquipmentPanelProps) -> Html {
    let cards = props.items.iter().map(|item| {
        let chosen = props.selected.as_deref() == Some(item.id.as_str());
        let onclick = {
            let cb = props.on_select.clone();
            let slot = props.slot;
            let id = item.id.clone();
            Callback::from(move |_| cb.emit((slot, id.clone())))
        };
        let border = if chosen { "2px solid #58a6ff" } else { "1px solid #30363d" };
        let pct = f64::from(item.exp) * 100.0 / f64::from(item.exp_to_next_level.max(1));
        html! {
            <div {onclick} style={format!("cursor:pointer; background:#161b22; border:{border}; border-radius:8px; padding:8px 10px; min-width:150px; display:flex; flex-direction:column; gap:4px;")}>
                <div style="font-weight:600;">{ format!("{} {}", item.resistance_type.icon(), item.name) }</div>
                <div style="font-size:12px; opacity:0.8;">{ format!("Lv {} · {} resistance {}", item.level, item.resistance_type, format_resistance(item_resistance(item))) }</div>
                <div style="height:6px; background:#30363d; border-radius:3px; overflow:hidden;">
                    <div style={format!("height:100%; width:{pct:.1}%; background:#58a6ff;")}></div>
                </div>
                <div style="font-size:11px; opacity:0.6;">{ format!("{}/{} exp", item.exp, item.exp_to_next_level) }</div>
            </div>
        }
    });
    html! {
        <div style="display:flex; flex-direction:column; gap:6px;">
            <h3 style="margin:0;">{ props.slot.label() }</h3>
            <div style="display:flex; gap:8px; flex-wrap:wrap;">{ for cards }</div>
        </div>
    }
}
