//! Gateway infrastructure - upstream API clients

mod rick_morty;

pub use rick_morty::{GatewayConfig, RickMortyGateway};
