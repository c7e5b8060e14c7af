//! Text generation domain

mod generator;

pub use generator::TextGenerator;

#[cfg(test)]
pub use generator::mock::MockTextGenerator;
