use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct GameOverOverlayProps {
    pub show: bool,
    pub acknowledge: Callback<()>,
}

#[function_component]
pub fn GameOverOverlay(props: &GameOverOverlayProps) -> Html {
    if !props.show {
        return html! {};
    }
    let ack_cb = props.acknowledge.clone();
    let ack_btn = Callback::from(move |_| ack_cb.emit(()));
    html! {
        <div style="position:fixed; top:50%; left:50%; transform:translate(-50%, -50%); background:rgba(0,0,0,0.85); border:2px solid #f85149; padding:24px 32px; border-radius:12px; text-align:center; min-width:320px;">
            <h2 style="margin:0 0 12px 0; color:#f85149;">{"Game Over"}</h2>
            <p style="margin:4px 0;">{"Your health is exhausted! All game data will be reset."}</p>
            <div style="margin-top:16px; display:flex; gap:12px; justify-content:center;">
                <button onclick={ack_btn}>{"Start Over"}</button>
            </div>
        </div>
    }
}
