use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use yew::prelude::*;

use crate::state::damage::Severity;
use crate::util::timeout_ms;

#[derive(Properties, PartialEq, Clone)]
pub struct ToastProps {
    pub message: Option<(String, Severity)>,
    /// Dismisses itself after this long; each new message restarts the timer.
    pub auto_hide_ms: u32,
    pub on_close: Callback<()>,
}

#[function_component]
pub fn Toast(props: &ToastProps) -> Html {
    {
        let on_close = props.on_close.clone();
        let delay = props.auto_hide_ms;
        use_effect_with(props.message.clone(), move |message| {
            let mut pending = None;
            if message.is_some() {
                if let Some(win) = web_sys::window() {
                    let cb = Closure::once(move || on_close.emit(()));
                    match win.set_timeout_with_callback_and_timeout_and_arguments_0(
                        cb.as_ref().unchecked_ref(),
                        timeout_ms(delay),
                    ) {
                        Ok(handle) => pending = Some((win, handle, cb)),
                        Err(_) => tracing::warn!("failed to schedule toast dismissal"),
                    }
                }
            }
            move || {
                if let Some((win, handle, cb)) = pending {
                    win.clear_timeout_with_handle(handle);
                    drop(cb);
                }
            }
        });
    }

    let Some((text, severity)) = &props.message else {
        return html! {};
    };
    let color = match severity {
        Severity::Warning => "#d29922",
        Severity::Success => "#3fb950",
        Severity::Error => "#f85149",
    };
    let close_cb = {
        let cb = props.on_close.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {
        <div style={format!("position:fixed; top:16px; left:50%; transform:translateX(-50%); background:#161b22; border:1px solid {color}; color:{color}; padding:8px 14px; border-radius:8px; display:flex; gap:12px; align-items:center; font-size:14px;")}>
            <span>{ text.clone() }</span>
            <button onclick={close_cb}>{"×"}</button>
        </div>
    }
}
