pub mod damage;
pub mod engine;
pub mod mapgen;
pub mod profile;
pub mod progression;
pub mod resistance;
pub mod session;
pub mod store;

pub use engine::{EngineAction, EngineHandle, GameEngine};
pub use session::Outcome;
pub use store::BrowserStore;
