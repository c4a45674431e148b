use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::KeyboardEvent;
use yew::prelude::*;

use super::{
    game_over_overlay::GameOverOverlay, game_view::GameView, selection_view::SelectionView,
    toast::Toast,
};
use crate::config::GameConfig;
use crate::model::Direction;
use crate::state::damage::Severity;
use crate::state::{BrowserStore, EngineAction, EngineHandle, GameEngine};
use crate::util::timeout_ms;

pub type BrowserEngine = EngineHandle<BrowserStore, ChaCha8Rng>;

/// WASD and arrow keys.
pub fn key_direction(key: &str) -> Option<Direction> {
    match key {
        "w" | "W" | "ArrowUp" => Some(Direction::Up),
        "s" | "S" | "ArrowDown" => Some(Direction::Down),
        "a" | "A" | "ArrowLeft" => Some(Direction::Left),
        "d" | "D" | "ArrowRight" => Some(Direction::Right),
        _ => None,
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let engine = use_reducer(|| {
        let config = GameConfig::load_embedded();
        let rng = ChaCha8Rng::seed_from_u64(js_sys::Date::now() as u64);
        BrowserEngine::new(GameEngine::load(BrowserStore::open(), rng, config))
    });
    let toast = use_state(|| None::<(String, Severity)>);

    // Surface the latest notification after each dispatch
    {
        let engine = engine.clone();
        let toast = toast.clone();
        use_effect_with(engine.version, move |_| {
            if let Some(last) = engine.drain_notifications().pop() {
                toast.set(Some((last.message(), last.severity())));
            }
            || ()
        });
    }
    // Deferred game over after lethal damage; never cancelled
    {
        let dispatcher = engine.dispatcher();
        let (scheduled, delay_ms) = {
            let eng = engine.engine();
            (eng.game_over_scheduled(), eng.config().game_over_delay_ms)
        };
        use_effect_with(scheduled, move |scheduled| {
            if *scheduled {
                if let Some(win) = web_sys::window() {
                    let cb = Closure::once_into_js(move || {
                        dispatcher.dispatch(EngineAction::GameOverDelayElapsed);
                    });
                    if win
                        .set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), timeout_ms(delay_ms))
                        .is_err()
                    {
                        tracing::warn!("failed to schedule game over");
                    }
                }
            }
            || ()
        });
    }
    // Keyboard move intents
    {
        let dispatcher = engine.dispatcher();
        use_effect_with((), move |_| {
            let window = web_sys::window();
            let keydown_cb = Closure::wrap(Box::new(move |e: KeyboardEvent| {
                if let Some(dir) = key_direction(&e.key()) {
                    e.prevent_default();
                    dispatcher.dispatch(EngineAction::Move(dir));
                }
            }) as Box<dyn FnMut(_)>);
            if let Some(win) = &window {
                win.add_event_listener_with_callback("keydown", keydown_cb.as_ref().unchecked_ref())
                    .ok();
            }
            move || {
                if let Some(win) = &window {
                    let _ = win.remove_event_listener_with_callback(
                        "keydown",
                        keydown_cb.as_ref().unchecked_ref(),
                    );
                }
                drop(keydown_cb);
            }
        });
    }

    let on_action = {
        let engine = engine.clone();
        Callback::from(move |action: EngineAction| engine.dispatch(action))
    };
    let close_toast = {
        let toast = toast.clone();
        Callback::from(move |_| toast.set(None))
    };
    let ack_game_over = {
        let engine = engine.clone();
        Callback::from(move |_| engine.dispatch(EngineAction::AcknowledgeGameOver))
    };

    let eng = engine.engine();
    let config = eng.config();
    let resistances = eng.resistances();
    let content = match eng.session() {
        Some(session) => html! { <GameView
            map={session.map().clone()}
            position={session.position}
            health={session.health}
            max_health={config.max_health}
            outcome={session.outcome}
            controls_locked={session.controls_locked}
            resistances={*session.resistances()}
            difficulty={eng.difficulty()}
            victory_heal={config.victory_heal}
            exp_reward={config.settings(eng.difficulty()).exp_reward}
            on_action={on_action.clone()}
        /> },
        None => html! { <SelectionView
            equipment={eng.equipment().clone()}
            selection={eng.selection().clone()}
            difficulty={eng.difficulty()}
            achievements={eng.achievements().clone()}
            map={eng.map().clone()}
            health={eng.health()}
            max_health={config.max_health}
            resistances={resistances}
            can_start={eng.can_start()}
            can_refresh={eng.can_refresh_map()}
            on_action={on_action.clone()}
        /> },
    };

    html! {
        <div id="root" style="min-height:100vh; background:#0d1117; color:#c9d1d9; font-family:sans-serif;">
            { content }
            <Toast message={(*toast).clone()} auto_hide_ms={config.toast_auto_hide_ms} on_close={close_toast} />
            <GameOverOverlay show={eng.game_over_prompt()} acknowledge={ack_game_over} />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_map_to_directions() {
        assert_eq!(key_direction("w"), Some(Direction::Up));
        assert_eq!(key_direction("ArrowLeft"), Some(Direction::Left));
        assert_eq!(key_direction("D"), Some(Direction::Right));
        assert_eq!(key_direction("s"), Some(Direction::Down));
        assert_eq!(key_direction("q"), None);
    }
}
