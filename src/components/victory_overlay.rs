use yew::prelude::*;

use crate::model::Difficulty;

#[derive(Properties, PartialEq, Clone)]
pub struct VictoryOverlayProps {
    pub show: bool,
    pub difficulty: Difficulty,
    pub heal: u32,
    pub exp_reward: u32,
    pub acknowledge: Callback<()>,
}

#[function_component]
pub fn VictoryOverlay(props: &VictoryOverlayProps) -> Html {
    if !props.show {
        return html! {};
    }
    let ack_cb = props.acknowledge.clone();
    let ack_btn = Callback::from(move |_| ack_cb.emit(()));
    html! {
        <div style="position:fixed; top:50%; left:50%; transform:translate(-50%, -50%); background:rgba(0,0,0,0.85); border:2px solid #3fb950; padding:24px 32px; border-radius:12px; text-align:center; min-width:320px;">
            <h2 style="margin:0 0 12px 0; color:#3fb950;">{ format!("Victory ({})", props.difficulty) }</h2>
            <p style="margin:4px 0;">{ format!("You reached the end. Health restores by {}.", props.heal) }</p>
            <p style="margin:4px 0;">{ format!("Each equipped item gains {} exp.", props.exp_reward) }</p>
            <div style="margin-top:16px; display:flex; gap:12px; justify-content:center;">
                <button onclick={ack_btn}>{"Continue"}</button>
            </div>
        </div>
    }
}
