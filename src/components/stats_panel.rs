use yew::prelude::*;

use crate::state::resistance::Resistances;
use crate::util::{format_resistance, health_color};

#[derive(Properties, PartialEq, Clone)]
pub struct StatsPanelProps {
    pub health: u32,
    pub max_health: u32,
    pub resistances: Resistances,
}

#[function_component]
pub fn StatsPanel(props: &StatsPanelProps) -> Html {
    let row_style = "display:flex; align-items:center; gap:8px;"; // icon | label | value
    let label_style = "flex:1; font-weight:500;";
    let value_style =
        "min-width:70px; text-align:right; font-variant-numeric:tabular-nums; font-weight:600;";
    let color = health_color(props.health, props.max_health);
    let pct = f64::from(props.health) * 100.0 / f64::from(props.max_health.max(1));
    let r = props.resistances;
    html! {
        <div style="background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:10px 14px; min-width:230px; display:flex; flex-direction:column; gap:10px; font-size:14px;">
            <div style={row_style}>
                <span style={format!("{} color:{};", label_style, color)}>{"❤ Health"}</span>
                <span style={format!("{} color:{};", value_style, color)}>{ format!("{}/{}", props.health, props.max_health) }</span>
            </div>
            <div style="height:8px; background:#30363d; border-radius:4px; overflow:hidden;">
                <div style={format!("height:100%; width:{pct:.1}%; background:{color};")}></div>
            </div>
            <div style={row_style}>
                <span style={label_style}>{"🔥 🌪️ ❄️"}</span>
                <span style={value_style}>{ format!("{} / {} / {}", format_resistance(r.fire), format_resistance(r.storm), format_resistance(r.ice)) }</span>
            </div>
        </div>
    }
}
