pub mod agent;
pub mod agent_provider;
pub mod agents;
pub mod arena;
pub mod replay;
pub mod scan;
