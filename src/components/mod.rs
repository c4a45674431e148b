pub mod app;
pub mod equipment_panel;
pub mod game_over_overlay;
pub mod game_view;
pub mod map_grid;
pub mod selection_view;
pub mod stats_panel;
pub mod toast;
pub mod victory_overlay;
