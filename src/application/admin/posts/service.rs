use std::sync::Arc;
use std::time::Duration;

use crate::application::repos::PostsRepo;
use crate::application::session::SessionGuard;

#[derive(Clone)]
pub struct AdminPostService {
    pub(crate) repo: Arc<dyn PostsRepo>,
    pub(crate) session: Arc<dyn SessionGuard>,
    pub(crate) simulated_latency: Duration,
}

impl AdminPostService {
    pub fn new(repo: Arc<dyn PostsRepo>, session: Arc<dyn SessionGuard>) -> Self {
        Self {
            repo,
            session,
            simulated_latency: Duration::ZERO,
        }
    }

    /// Delay every editor submission by `latency` before it is processed.
    ///
    /// Development aid for watching pending-state rendering; zero disables it.
    pub fn with_simulated_latency(mut self, latency: Duration) -> Self {
        self.simulated_latency = latency;
        self
    }

    pub(crate) async fn simulate_latency(&self) {
        if !self.simulated_latency.is_zero() {
            tokio::time::sleep(self.simulated_latency).await;
        }
    }
}
