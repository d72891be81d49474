// Session commands — the serializable input side of the session boundary.
//
// Input handling (raycasts, clicks, key presses) resolves to one of these
// commands, and `GameSession::apply` is the single entry point that maps a
// command to its transition. Keeping the surface to one enum means a
// replay file, a network layer, or a test can drive the session with the
// exact same vocabulary the local input path uses.
//
// See also: `session.rs` for the transitions, `event.rs` for the outputs.

use crate::event::SessionEvent;
use crate::session::GameSession;
use crate::types::{GiftId, SnowmanId};
use serde::{Deserialize, Serialize};

/// A player intent, resolved from input and applied to the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionCommand {
    /// Begin the session.
    Start,
    /// Collect the gift with this id.
    Collect { gift_id: GiftId },
    /// Land a hit on the snowman with this id.
    Hit { snowman_id: SnowmanId },
    /// Strike the pond ice, advancing its fracture stage.
    CrackIce,
}

impl GameSession {
    /// Apply one command, returning the events it produced. Invalid
    /// commands (unknown ids, terminal targets) produce no events, same
    /// as the underlying transitions.
    pub fn apply(&mut self, command: SessionCommand) -> Vec<SessionEvent> {
        match command {
            SessionCommand::Start => self.start(),
            SessionCommand::Collect { gift_id } => self.collect(gift_id),
            SessionCommand::Hit { snowman_id } => self.hit(snowman_id),
            SessionCommand::CrackIce => self.crack_ice(),
        }
    }
}
