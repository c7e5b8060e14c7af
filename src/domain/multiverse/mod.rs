//! Multiverse domain - upstream characters, locations and their gateway

mod entity;
mod gateway;

pub use entity::{Character, Location, OneOrMany, Page, PageInfo, PlaceRef};
pub use gateway::MultiverseGateway;

#[cfg(test)]
pub use entity::fixtures;
#[cfg(test)]
pub use gateway::mock::MockGateway;
