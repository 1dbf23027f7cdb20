//! Wire codec for the maze service.
//!
//! Requests are query strings of the form
//! `command=<M|L|R>&referenceid=<token>&repeat=<n>`. Responses are a single
//! comma-separated line: the new location token followed by corridor codes.

use std::fmt;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::{Deserialize, Serialize};

use crate::corridor::{CorridorToken, Step};
use crate::errors::NavError;
use crate::ids::LocationToken;

/// Token the service recognises as the maze entrance.
pub const START_TOKEN: &str = "MSwxLEU=";

/// Characters that would change the meaning of a query value. Base64 padding
/// (`=`) and `/` are left alone.
const QUERY_VALUE: &AsciiSet = &CONTROLS.add(b' ').add(b'"').add(b'#').add(b'%').add(b'&').add(b'+');

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    Move,
    RotateLeft,
    RotateRight,
}

impl Command {
    /// Single-letter transport vocabulary.
    pub fn letter(self) -> char {
        match self {
            Self::Move => 'M',
            Self::RotateLeft => 'L',
            Self::RotateRight => 'R',
        }
    }

    /// Map a keyboard key (`m`, `l`, `r`, case-insensitive) to a command.
    pub fn from_key(key: char) -> Option<Self> {
        match key.to_ascii_lowercase() {
            'm' => Some(Self::Move),
            'l' => Some(Self::RotateLeft),
            'r' => Some(Self::RotateRight),
            _ => None,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Move => "move",
            Self::RotateLeft => "rotate_left",
            Self::RotateRight => "rotate_right",
        };
        f.write_str(label)
    }
}

/// Parameters of one request to the maze service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestParams {
    pub command: Command,
    pub reference_id: LocationToken,
    pub repeat: u32,
}

impl RequestParams {
    pub fn to_query(&self) -> String {
        format!(
            "command={}&referenceid={}&repeat={}",
            self.command.letter(),
            utf8_percent_encode(self.reference_id.as_str(), QUERY_VALUE),
            self.repeat
        )
    }
}

impl fmt::Display for RequestParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query())
    }
}

pub fn encode_command(command: Command, location_token: &LocationToken, repeat: u32) -> RequestParams {
    RequestParams {
        command,
        reference_id: location_token.clone(),
        repeat,
    }
}

/// The session's opening request: a `Move` against the start token.
pub fn encode_initial(start_token: &LocationToken) -> RequestParams {
    encode_command(Command::Move, start_token, 1)
}

/// Decode one response line into a [`Step`].
///
/// Unknown corridor codes decode to [`CorridorToken::Open`]. An empty token
/// or a line without any corridor field is rejected.
pub fn decode_response(raw: &str) -> Result<Step, NavError> {
    let line = raw.lines().next().unwrap_or_default().trim();
    let mut fields = line.split(',');

    let token = fields.next().unwrap_or_default().trim();
    if token.is_empty() {
        return Err(NavError::MalformedResponse(format!(
            "missing location token in {raw:?}"
        )));
    }

    let corridor: Vec<CorridorToken> = fields.map(CorridorToken::from_code).collect();
    if corridor.is_empty() {
        return Err(NavError::MalformedResponse(format!(
            "no corridor fields in {raw:?}"
        )));
    }

    Ok(Step::new(LocationToken::from_raw(token), corridor))
}
