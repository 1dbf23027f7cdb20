use async_trait::async_trait;

use crate::errors::TransportError;

/// Request/response channel to the maze service.
///
/// `send` receives a query string built by [`RequestParams::to_query`]
/// and returns the raw response body.
///
/// [`RequestParams::to_query`]: crate::codec::RequestParams::to_query
#[async_trait]
pub trait MazeTransport: Send + Sync {
    fn name(&self) -> &str;

    async fn send(&self, query: &str) -> Result<String, TransportError>;
}
