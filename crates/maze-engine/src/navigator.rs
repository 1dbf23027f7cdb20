//! The navigation engine.
//!
//! Each operation follows the same template: encode the request, await the
//! transport once, decode the response, then apply the state transition. All
//! fallible work happens before the state is touched, so a transport or
//! decode failure leaves the state exactly as it was. Dropping an in-flight
//! operation's future has the same effect: its response is never applied.
//!
//! Operations take `&mut self`, so two commands can never interleave on one
//! navigator. Callers sharing a navigator across tasks wrap it in a
//! `tokio::sync::Mutex` and pick their own policy: `lock()` queues the
//! command, `try_lock()` rejects it while another is in flight.

use std::sync::Arc;

use maze_core::{
    decode_response, encode_command, encode_initial, Command, ExploredMap, LocationToken, MazeTransport,
    MoveOutcome, NavError, Orientation, Position, RequestParams, Rotation, Step, START_TOKEN,
};

use crate::state::NavigationState;

#[derive(Clone, Debug)]
pub struct NavigatorConfig {
    /// Token sent with the opening request.
    pub start_token: LocationToken,
    /// Facing assumed at the entrance.
    pub initial_orientation: Orientation,
    /// Coordinate assigned to the entrance.
    pub initial_position: Position,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            start_token: LocationToken::from_raw(START_TOKEN),
            initial_orientation: Orientation::North,
            initial_position: Position::ORIGIN,
        }
    }
}

pub struct Navigator {
    transport: Arc<dyn MazeTransport>,
    config: NavigatorConfig,
    state: Option<NavigationState>,
}

impl Navigator {
    pub fn new(transport: Arc<dyn MazeTransport>, config: NavigatorConfig) -> Self {
        Self {
            transport,
            config,
            state: None,
        }
    }

    pub fn with_defaults(transport: Arc<dyn MazeTransport>) -> Self {
        Self::new(transport, NavigatorConfig::default())
    }

    pub fn transport_name(&self) -> &str {
        self.transport.name()
    }

    pub fn is_initialized(&self) -> bool {
        self.state.is_some()
    }

    pub fn state(&self) -> Option<&NavigationState> {
        self.state.as_ref()
    }

    pub fn orientation(&self) -> Option<Orientation> {
        self.state.as_ref().map(NavigationState::orientation)
    }

    pub fn position(&self) -> Option<Position> {
        self.state.as_ref().map(NavigationState::position)
    }

    pub fn map(&self) -> Option<&ExploredMap> {
        self.state.as_ref().map(NavigationState::map)
    }

    /// Steps received so far, oldest first. Empty before [`initialize`](Self::initialize).
    pub fn history(&self) -> &[Step] {
        self.state.as_ref().map(NavigationState::history).unwrap_or_default()
    }

    pub fn last_outcome(&self) -> Option<MoveOutcome> {
        self.state.as_ref().map(NavigationState::last_outcome)
    }

    pub fn goal_reached(&self) -> bool {
        self.state.as_ref().is_some_and(NavigationState::goal_reached)
    }

    /// Place the agent at the maze entrance. Must be called exactly once,
    /// before any other command.
    pub async fn initialize(&mut self) -> Result<&NavigationState, NavError> {
        if self.state.is_some() {
            return Err(NavError::InvalidState("navigator already initialized".into()));
        }

        let step = self.request(&encode_initial(&self.config.start_token)).await?;
        Ok(self.state.insert(NavigationState::placed(
            step,
            self.config.initial_orientation,
            self.config.initial_position,
        )))
    }

    pub async fn rotate_left(&mut self) -> Result<&NavigationState, NavError> {
        self.perform(Command::RotateLeft).await
    }

    pub async fn rotate_right(&mut self) -> Result<&NavigationState, NavError> {
        self.perform(Command::RotateRight).await
    }

    pub async fn move_forward(&mut self) -> Result<&NavigationState, NavError> {
        self.perform(Command::Move).await
    }

    /// Issue one command against the current location token and apply the
    /// resulting step.
    pub async fn perform(&mut self, command: Command) -> Result<&NavigationState, NavError> {
        let current = self
            .state
            .as_ref()
            .ok_or_else(|| NavError::InvalidState(format!("{command} issued before initialize")))?;
        let params = encode_command(command, current.location_token(), 1);
        let facing = current.orientation();

        let step = self.request(&params).await?;

        let state = self
            .state
            .as_mut()
            .ok_or_else(|| NavError::InvalidState("state lost during request".into()))?;
        match command {
            Command::Move => state.apply_move(step),
            Command::RotateLeft => state.apply_rotation(facing, Rotation::Left, step),
            Command::RotateRight => state.apply_rotation(facing, Rotation::Right, step),
        }
        Ok(state)
    }

    async fn request(&self, params: &RequestParams) -> Result<Step, NavError> {
        let raw = self.transport.send(&params.to_query()).await?;
        decode_response(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_client::{MockResponse, MockTransport};
    use maze_core::TransportError;

    fn navigator(responses: Vec<MockResponse>) -> (Navigator, Arc<MockTransport>) {
        let mock = Arc::new(MockTransport::new(responses));
        let nav = Navigator::with_defaults(mock.clone());
        (nav, mock)
    }

    #[tokio::test]
    async fn initialize_uses_start_token() {
        let (mut nav, mock) = navigator(vec![MockResponse::body("MSwxLEU=,O")]);
        let state = nav.initialize().await.unwrap();
        assert_eq!(state.position(), Position::ORIGIN);
        assert_eq!(state.orientation(), Orientation::North);
        assert_eq!(
            mock.last_query().as_deref(),
            Some("command=M&referenceid=MSwxLEU=&repeat=1")
        );
        assert_eq!(nav.history().len(), 1);
    }

    #[tokio::test]
    async fn initialize_twice_is_invalid() {
        let (mut nav, mock) = navigator(vec![MockResponse::body("MSwxLEU=,O")]);
        nav.initialize().await.unwrap();
        let err = nav.initialize().await.unwrap_err();
        assert!(matches!(err, NavError::InvalidState(_)));
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn commands_before_initialize_are_invalid() {
        let (mut nav, mock) = navigator(vec![]);
        assert!(matches!(nav.rotate_left().await, Err(NavError::InvalidState(_))));
        assert!(matches!(nav.move_forward().await, Err(NavError::InvalidState(_))));
        assert_eq!(mock.call_count(), 0);
        assert!(nav.history().is_empty());
        assert!(!nav.goal_reached());
        assert_eq!(nav.position(), None);
    }

    #[tokio::test]
    async fn failed_initialize_leaves_navigator_uninitialized() {
        let (mut nav, _mock) = navigator(vec![
            MockResponse::Error(TransportError::Network("offline".into())),
            MockResponse::body("MSwxLEU=,O"),
        ]);
        assert!(matches!(nav.initialize().await, Err(NavError::Transport(_))));
        assert!(!nav.is_initialized());
        nav.initialize().await.unwrap();
        assert!(nav.is_initialized());
    }

    #[tokio::test]
    async fn rotation_sends_letter_and_current_token() {
        let (mut nav, mock) = navigator(vec![
            MockResponse::body("MSwxLEU=,O"),
            MockResponse::body("MSwxLEU=,OL,O"),
        ]);
        nav.initialize().await.unwrap();
        let state = nav.rotate_right().await.unwrap();
        assert_eq!(state.orientation(), Orientation::East);
        assert_eq!(state.last_outcome(), MoveOutcome::Turned);
        assert_eq!(
            mock.last_query().as_deref(),
            Some("command=R&referenceid=MSwxLEU=&repeat=1")
        );
    }
}
