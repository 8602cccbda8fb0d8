mod agent;
mod provider;

pub mod model;
pub mod selector;
pub mod storage;
pub mod trainer;

#[cfg(test)]
mod fixtures;

pub use agent::*;
pub use provider::*;
