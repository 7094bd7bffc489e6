//! Mock dataset source for testing.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use worddrill_core::error::FetchError;
use worddrill_core::traits::DatasetSource;

/// One scripted reply: how long to wait and what to return.
#[derive(Debug, Clone)]
struct Reply {
    delay: Duration,
    body: Result<String, FetchError>,
}

/// A scripted source for exercising loaders without a network.
///
/// Replies are served in order; once the script runs out the last reply
/// repeats.
pub struct MockSource {
    script: Mutex<VecDeque<Reply>>,
    last: Mutex<Option<Reply>>,
    call_count: AtomicU32,
}

impl MockSource {
    /// A source that always returns `body`.
    pub fn with_body(body: &str) -> Self {
        Self::empty().then_body(body)
    }

    /// A source that always fails with `error`.
    pub fn with_error(error: FetchError) -> Self {
        Self::empty().then_error(error)
    }

    /// A source that always returns `body` after `delay`.
    pub fn with_delayed_body(delay: Duration, body: &str) -> Self {
        Self::empty().then_delayed_body(delay, body)
    }

    fn empty() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            last: Mutex::new(None),
            call_count: AtomicU32::new(0),
        }
    }

    pub fn then_body(self, body: &str) -> Self {
        self.push(Duration::ZERO, Ok(body.to_string()))
    }

    pub fn then_error(self, error: FetchError) -> Self {
        self.push(Duration::ZERO, Err(error))
    }

    /// Queue a reply that resolves only after `delay`.
    pub fn then_delayed_body(self, delay: Duration, body: &str) -> Self {
        self.push(delay, Ok(body.to_string()))
    }

    fn push(self, delay: Duration, body: Result<String, FetchError>) -> Self {
        self.script
            .lock()
            .unwrap()
            .push_back(Reply { delay, body });
        self
    }

    /// Number of fetches made against this source.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    fn next_reply(&self) -> Option<Reply> {
        let mut last = self.last.lock().unwrap();
        if let Some(reply) = self.script.lock().unwrap().pop_front() {
            *last = Some(reply);
        }
        last.clone()
    }
}

#[async_trait]
impl DatasetSource for MockSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch(&self) -> Result<String, FetchError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);

        let reply = self
            .next_reply()
            .ok_or_else(|| FetchError::Network("mock source has no replies".into()))?;
        if !reply.delay.is_zero() {
            tokio::time::sleep(reply.delay).await;
        }
        reply.body
    }
}
