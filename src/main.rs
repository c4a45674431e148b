mod components;
mod config;
mod error;
mod logging;
mod model;
mod state;
mod util;

use components::app::App;

fn main() {
    logging::init_logging();
    tracing::info!("elemental trek starting");
    yew::Renderer::<App>::new().render();
}
