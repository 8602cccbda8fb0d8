use super::agent::TequilaBot;
use crate::{agent::Agent, agent_provider::AgentProvider};
use figment::Figment;
use tequila_core::board::Board;

pub struct TequilaBotProvider;

impl<B: Board + 'static> AgentProvider<B> for TequilaBotProvider {
    fn name(&self) -> String {
        "tequila-bot".to_owned()
    }

    fn create_agent(&self, options: &Figment) -> Box<dyn Agent<B>> {
        Box::new(TequilaBot::from_figment(options))
    }
}
