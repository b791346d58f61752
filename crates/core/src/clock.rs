//! Wall-clock abstraction so timer-driven flows stay testable.

use std::time::Duration;

#[async_trait::async_trait]
pub trait Clock: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

#[derive(Debug, Default)]
pub struct TokioClock;

#[async_trait::async_trait]
impl Clock for TokioClock {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Clock that never waits; drives simulations to completion immediately.
#[derive(Debug, Default)]
pub struct InstantClock;

#[async_trait::async_trait]
impl Clock for InstantClock {
    async fn sleep(&self, _duration: Duration) {}
}
