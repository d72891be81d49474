// Player-visible session events.
//
// Every session transition returns the events it produced so the
// presentation layer can react (score popups, sounds, win overlay)
// without polling for diffs. Events are output only — replaying them does
// not drive the session, and dropping them loses nothing but feedback.
//
// See also: `session.rs` for the transitions that emit these,
// `command.rs` for the input side of the same boundary.

use crate::types::{GiftId, SnowmanId};
use serde::{Deserialize, Serialize};

/// A narrative event emitted by a session transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// The session left the not-started state. Emitted once.
    SessionStarted,
    /// A gift was collected for the first time.
    GiftCollected { gift_id: GiftId, found_count: u32 },
    /// The collection goal was reached. Emitted once, with the collect
    /// that crossed the goal.
    GameWon,
    /// A snowman took a hit and survived.
    SnowmanHit { snowman_id: SnowmanId, hit_points_left: i32 },
    /// A snowman was destroyed and dropped a reward gift.
    SnowmanDefeated { snowman_id: SnowmanId, reward: GiftId },
    /// The pond ice took a hit and advanced a fracture stage (1 or 2).
    IceCracked { stage: u8 },
    /// The pond ice reached the final fracture stage and was removed.
    IceShattered,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_serialization_roundtrip() {
        let events = [
            SessionEvent::SessionStarted,
            SessionEvent::GiftCollected { gift_id: GiftId(3), found_count: 1 },
            SessionEvent::GameWon,
            SessionEvent::SnowmanHit { snowman_id: SnowmanId(2), hit_points_left: 1 },
            SessionEvent::SnowmanDefeated { snowman_id: SnowmanId(2), reward: GiftId(1002) },
            SessionEvent::IceCracked { stage: 2 },
            SessionEvent::IceShattered,
        ];
        for event in events {
            let json = serde_json::to_string(&event).unwrap();
            let restored: SessionEvent = serde_json::from_str(&json).unwrap();
            assert_eq!(event, restored);
        }
    }
}
