//! Transports for the maze service: the real HTTP client, a retrying
//! wrapper, and a scripted mock for tests.

pub mod http;
pub mod mock;
pub mod reliable;

pub use http::{HttpConfig, HttpTransport};
pub use mock::{MockResponse, MockTransport};
pub use reliable::{RetryConfig, RetryingTransport};
