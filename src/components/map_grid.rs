use yew::prelude::*;

use crate::model::{Map, Position, TerrainCell};

#[derive(Properties, PartialEq, Clone)]
pub struct MapGridProps {
    pub map: Map,
    /// Player marker; `None` for the selection-screen preview.
    #[prop_or_default]
    pub player: Option<Position>,
    #[prop_or(56)]
    pub cell_px: u32,
}

fn cell_colors(cell: &TerrainCell) -> (&'static str, &'static str) {
    use crate::model::Element::*;
    match cell {
        TerrainCell::Start => ("#238636", "Start"),
        TerrainCell::End => ("#d4af37", "End"),
        TerrainCell::Normal { element: Fire, level } => (["#5c2b1b", "#8e3b1f", "#c2410c"][level_idx(*level)], ""),
        TerrainCell::Normal { element: Storm, level } => (["#2d2a4a", "#46407a", "#6d5dd3"][level_idx(*level)], ""),
        TerrainCell::Normal { element: Ice, level } => (["#1b3a4b", "#1f5f7a", "#2f8fbf"][level_idx(*level)], ""),
    }
}

fn level_idx(level: u8) -> usize {
    usize::from(level.clamp(1, 3) - 1)
}

#[function_component]
pub fn MapGrid(props: &MapGridProps) -> Html {
    let size = props.cell_px;
    let rows = props.map.cells.iter().enumerate().map(|(row, cells)| {
        let tiles = cells.iter().enumerate().map(|(col, cell)| {
            let (bg, label) = cell_colors(cell);
            let here = props.player == Some(Position { row, col });
            let border = if here { "2px solid #f0f6fc" } else { "1px solid #30363d" };
            let text = match cell {
                TerrainCell::Normal { element, level } => format!("{}{}", element.icon(), level),
                _ => label.to_string(),
            };
            html! {
                <div style={format!("width:{size}px; height:{size}px; background:{bg}; border:{border}; border-radius:6px; display:flex; align-items:center; justify-content:center; font-size:13px; position:relative;")}>
                    { text }
                    { if here { html!{ <span style="position:absolute; bottom:2px; right:4px;">{"🧍"}</span> } } else { html!{} } }
                </div>
            }
        });
        html! { <div style="display:flex; gap:4px;">{ for tiles }</div> }
    });
    html! { <div style="display:flex; flex-direction:column; gap:4px;">{ for rows }</div> }
}
