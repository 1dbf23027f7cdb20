//! Domain model for the maze client: wire codec, orientation arithmetic,
//! move outcome detection and the explored map.
//!
//! Nothing in this crate performs I/O. The transport is abstracted behind
//! [`transport::MazeTransport`] and driven by the engine crate.

pub mod codec;
pub mod corridor;
pub mod errors;
pub mod ids;
pub mod map;
pub mod orientation;
pub mod outcome;
pub mod transport;

pub use codec::{decode_response, encode_command, encode_initial, Command, RequestParams, START_TOKEN};
pub use corridor::{CorridorToken, Step};
pub use errors::{NavError, TransportError};
pub use ids::LocationToken;
pub use map::{ExploredMap, MapCell, RenderedCell, RenderedMap};
pub use orientation::{advance, rotate, Orientation, Position, Rotation};
pub use outcome::{did_move, MoveOutcome};
pub use transport::MazeTransport;
