use std::sync::Arc;
use tokio::sync::OnceCell;

use crate::agent::agent_factory::AgentFactory;
use crate::agent::interface::{Agent, AgentError};

/// Process-wide, lazily built agent.
///
/// The first caller of [`AgentHandle::get`] runs the factory; concurrent
/// callers wait on the same initialization. A failed initialization leaves
/// the cell empty so a later request can try again.
#[derive(Clone)]
pub struct AgentHandle {
    factory: Arc<dyn AgentFactory>,
    cell: Arc<OnceCell<Arc<dyn Agent>>>,
}

impl AgentHandle {
    pub fn new(factory: Arc<dyn AgentFactory>) -> Self {
        Self {
            factory,
            cell: Arc::new(OnceCell::new()),
        }
    }

    /// A handle that is already initialized with `agent`.
    pub fn ready(agent: Arc<dyn Agent>) -> Self {
        struct Prebuilt(Arc<dyn Agent>);

        #[async_trait::async_trait]
        impl AgentFactory for Prebuilt {
            async fn create(&self) -> Result<Arc<dyn Agent>, AgentError> {
                Ok(self.0.clone())
            }
        }

        let cell = OnceCell::new_with(Some(agent.clone()));
        Self {
            factory: Arc::new(Prebuilt(agent)),
            cell: Arc::new(cell),
        }
    }

    pub async fn get(&self) -> Result<Arc<dyn Agent>, AgentError> {
        self.cell
            .get_or_try_init(|| self.factory.create())
            .await
            .cloned()
    }

    pub fn is_initialized(&self) -> bool {
        self.cell.initialized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::EchoAgent;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct CountingFactory {
        calls: AtomicUsize,
        fail_first: bool,
    }

    #[async_trait]
    impl AgentFactory for CountingFactory {
        async fn create(&self) -> Result<Arc<dyn Agent>, AgentError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            if self.fail_first && n == 0 {
                return Err(AgentError::Network("connection refused".to_string()));
            }
            Ok(Arc::new(EchoAgent::new()))
        }
    }

    #[tokio::test]
    async fn concurrent_first_use_initializes_once() {
        let factory = Arc::new(CountingFactory {
            calls: AtomicUsize::new(0),
            fail_first: false,
        });
        let handle = AgentHandle::new(factory.clone());

        let results = futures::future::join_all((0..16).map(|_| {
            let handle = handle.clone();
            tokio::spawn(async move { handle.get().await })
        }))
        .await;

        for result in results {
            assert!(result.unwrap().is_ok());
        }
        assert_eq!(factory.calls.load(Ordering::SeqCst), 1);
        assert!(handle.is_initialized());
    }

    #[tokio::test]
    async fn failed_init_is_retried() {
        let factory = Arc::new(CountingFactory {
            calls: AtomicUsize::new(0),
            fail_first: true,
        });
        let handle = AgentHandle::new(factory.clone());

        assert!(handle.get().await.is_err());
        assert!(!handle.is_initialized());

        let agent = handle.get().await.unwrap();
        assert_eq!(agent.name(), "Echo");
        assert_eq!(factory.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn ready_handle_skips_factory() {
        let handle = AgentHandle::ready(Arc::new(EchoAgent::new()));
        assert!(handle.is_initialized());
        assert_eq!(handle.get().await.unwrap().max_steps(), 1);
    }
}
