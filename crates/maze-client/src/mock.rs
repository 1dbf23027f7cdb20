use std::collections::VecDeque;
use std::time::Duration;

use async_trait::async_trait;
use maze_core::{MazeTransport, TransportError};
use parking_lot::Mutex;

/// Pre-programmed responses for deterministic tests without network calls.
#[derive(Clone, Debug)]
pub enum MockResponse {
    /// Return this raw body.
    Body(String),
    /// Fail the request.
    Error(TransportError),
    /// Wait a duration, then resolve the inner response.
    Delay(Duration, Box<MockResponse>),
}

impl MockResponse {
    pub fn body(text: &str) -> Self {
        Self::Body(text.to_string())
    }

    pub fn delayed(delay: Duration, inner: MockResponse) -> Self {
        Self::Delay(delay, Box::new(inner))
    }
}

/// Transport that replays responses in order and records every query.
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<MockResponse>>,
    queries: Mutex<Vec<String>>,
}

impl MockTransport {
    pub fn new(responses: Vec<MockResponse>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Append a response after construction.
    pub fn push(&self, response: MockResponse) {
        self.responses.lock().push_back(response);
    }

    pub fn call_count(&self) -> usize {
        self.queries.lock().len()
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().clone()
    }

    pub fn last_query(&self) -> Option<String> {
        self.queries.lock().last().cloned()
    }
}

#[async_trait]
impl MazeTransport for MockTransport {
    fn name(&self) -> &str {
        "mock"
    }

    async fn send(&self, query: &str) -> Result<String, TransportError> {
        self.queries.lock().push(query.to_string());
        let next = self.responses.lock().pop_front();

        let Some(mut current) = next else {
            return Err(TransportError::Network(format!(
                "MockTransport: no response configured for {query}"
            )));
        };

        // Unrolls nested delays iteratively to avoid recursive async.
        loop {
            match current {
                MockResponse::Body(body) => return Ok(body),
                MockResponse::Error(e) => return Err(e),
                MockResponse::Delay(duration, inner) => {
                    tokio::time::sleep(duration).await;
                    current = *inner;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn replays_in_order() {
        let mock = MockTransport::new(vec![MockResponse::body("a,O"), MockResponse::body("b,OL")]);
        assert_eq!(mock.send("q1").await.unwrap(), "a,O");
        assert_eq!(mock.send("q2").await.unwrap(), "b,OL");
        assert_eq!(mock.queries(), vec!["q1", "q2"]);
        assert_eq!(mock.last_query().as_deref(), Some("q2"));
    }

    #[tokio::test]
    async fn exhausted_script_is_network_error() {
        let mock = MockTransport::new(vec![]);
        let err = mock.send("q").await.unwrap_err();
        assert!(matches!(err, TransportError::Network(_)));
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn nested_delays_resolve() {
        let mock = MockTransport::new(vec![MockResponse::delayed(
            Duration::from_millis(30),
            MockResponse::delayed(Duration::from_millis(30), MockResponse::body("late,X")),
        )]);
        let start = tokio::time::Instant::now();
        assert_eq!(mock.send("q").await.unwrap(), "late,X");
        assert!(start.elapsed() >= Duration::from_millis(60));
    }

    #[tokio::test]
    async fn push_extends_script() {
        let mock = MockTransport::default();
        mock.push(MockResponse::Error(TransportError::from_status(500, "x")));
        assert!(mock.send("q").await.is_err());
    }
}
