use crate::agent::Agent;
use figment::Figment;
use tequila_core::board::Board;

pub trait AgentProvider<B: Board> {
    fn name(&self) -> String;
    fn create_agent(&self, options: &Figment) -> Box<dyn Agent<B>>;
}
