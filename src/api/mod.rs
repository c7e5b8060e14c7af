//! API layer - HTTP endpoints

pub mod ai;
pub mod characters;
pub mod health;
pub mod locations;
pub mod notes;
pub mod router;
pub mod search;
pub mod state;
pub mod types;

pub use router::create_router;
pub use state::AppState;
