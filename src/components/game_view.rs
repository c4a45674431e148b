use yew::prelude::*;

use super::{map_grid::MapGrid, stats_panel::StatsPanel, victory_overlay::VictoryOverlay};
use crate::model::{Difficulty, Direction, Map, Position};
use crate::state::resistance::Resistances;
use crate::state::{EngineAction, Outcome};

#[derive(Properties, PartialEq, Clone)]
pub struct GameViewProps {
    pub map: Map,
    pub position: Position,
    pub health: u32,
    pub max_health: u32,
    pub outcome: Outcome,
    pub controls_locked: bool,
    pub resistances: Resistances,
    pub difficulty: Difficulty,
    pub victory_heal: u32,
    pub exp_reward: u32,
    pub on_action: Callback<EngineAction>,
}

#[function_component]
pub fn GameView(props: &GameViewProps) -> Html {
    let emit = |action: EngineAction| {
        let cb = props.on_action.clone();
        Callback::from(move |_: MouseEvent| cb.emit(action.clone()))
    };
    let ack_victory = {
        let cb = props.on_action.clone();
        Callback::from(move |_| cb.emit(EngineAction::AcknowledgeVictory))
    };
    let disabled = props.controls_locked || props.outcome != Outcome::None;
    html! {
        <div style="display:flex; gap:24px; padding:16px; flex-wrap:wrap;">
            <div style="display:flex; flex-direction:column; gap:12px;">
                <h2 style="margin:0;">{ format!("Difficulty: {}", props.difficulty) }</h2>
                <StatsPanel health={props.health} max_health={props.max_health} resistances={props.resistances} />
                <div style="display:grid; grid-template-columns:repeat(3, 48px); gap:4px;">
                    <span></span>
                    <button {disabled} onclick={emit(EngineAction::Move(Direction::Up))}>{"W"}</button>
                    <span></span>
                    <button {disabled} onclick={emit(EngineAction::Move(Direction::Left))}>{"A"}</button>
                    <button {disabled} onclick={emit(EngineAction::Move(Direction::Down))}>{"S"}</button>
                    <button {disabled} onclick={emit(EngineAction::Move(Direction::Right))}>{"D"}</button>
                </div>
                <button {disabled} onclick={emit(EngineAction::AbandonRun)}>{"Back"}</button>
                <div style="font-size:11px; opacity:0.7;">{"Move with WASD or the arrow keys"}</div>
            </div>
            <MapGrid map={props.map.clone()} player={Some(props.position)} />
            <VictoryOverlay
                show={props.outcome == Outcome::Won}
                difficulty={props.difficulty}
                heal={props.victory_heal}
                exp_reward={props.exp_reward}
                acknowledge={ack_victory}
            />
        </div>
    }
}
