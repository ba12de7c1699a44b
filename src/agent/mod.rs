pub mod interface;
pub mod manus_client;
pub mod echo;
pub mod agent_factory;
pub mod handle;

pub use interface::*;
pub use manus_client::ManusClient;
pub use echo::EchoAgent;
pub use agent_factory::*;
pub use handle::AgentHandle;
