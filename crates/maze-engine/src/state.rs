use maze_core::{
    advance, did_move, rotate, ExploredMap, LocationToken, MoveOutcome, Orientation, Position, RenderedMap,
    Rotation, Step,
};

/// Everything the client knows about the session.
///
/// Only built from a decoded initial step, so `history` is never empty.
/// Transitions take an already-decoded [`Step`] and cannot fail, which keeps
/// each command's update all-or-nothing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavigationState {
    history: Vec<Step>,
    orientation: Orientation,
    position: Position,
    map: ExploredMap,
    last_outcome: MoveOutcome,
}

impl NavigationState {
    /// State right after the opening request: the entrance cell is floor.
    pub fn placed(step: Step, orientation: Orientation, position: Position) -> Self {
        let mut map = ExploredMap::new();
        map.mark_visited(position);
        Self {
            history: vec![step],
            orientation,
            position,
            map,
            last_outcome: MoveOutcome::Placed,
        }
    }

    pub fn history(&self) -> &[Step] {
        &self.history
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn map(&self) -> &ExploredMap {
        &self.map
    }

    pub fn last_outcome(&self) -> MoveOutcome {
        self.last_outcome
    }

    pub fn current_step(&self) -> &Step {
        // `history` always holds the placement step.
        &self.history[self.history.len() - 1]
    }

    pub fn location_token(&self) -> &LocationToken {
        self.current_step().location_token()
    }

    /// The nearest visible cell of the latest step is the exit.
    pub fn goal_reached(&self) -> bool {
        self.current_step().is_goal()
    }

    pub fn render(&self) -> RenderedMap {
        self.map.render_with_agent(self.position, self.orientation)
    }

    /// `from` is the facing captured when the command was issued.
    pub(crate) fn apply_rotation(&mut self, from: Orientation, rotation: Rotation, step: Step) {
        self.orientation = rotate(from, rotation);
        self.last_outcome = MoveOutcome::Turned;
        self.history.push(step);
    }

    pub(crate) fn apply_move(&mut self, step: Step) {
        if did_move(self.location_token(), step.location_token()) {
            self.position = advance(self.position, self.orientation);
            self.last_outcome = MoveOutcome::Advanced;
        } else {
            self.last_outcome = MoveOutcome::Blocked;
        }
        self.map.mark_visited(self.position);
        self.history.push(step);
    }
}
