// Game session state machine — the authoritative mutable state.
//
// `GameSession` owns the gifts and snowmen produced by `placement.rs` and
// is their sole mutator. The world's voxel data never lives here; it is
// immutable after generation and the session only tracks the entities the
// player can change.
//
// Per-entity state machines:
// - Gift:    available → collected            (terminal)
// - Snowman: alive(hp) → alive(hp-1) → dead   (terminal at hp <= 0)
// - Pond ice: fracture stage 0 → 1 → 2 → 3    (pane removed at 3)
//
// Transitions against an unknown or already-terminal id are silent no-ops
// by design — repeated clicks on a fading gift must be safe. Internally
// each transition reports a `TransitionOutcome` so the guards stay
// testable even though the public surface swallows them.
//
// A snowman's death atomically spawns its reward gift inside the same
// transition: the registry is updated and the events emitted before the
// call returns, so no observer can see a dead snowman without its reward.
// Reward ids are `reward_gift_id_offset + snowman id`; the constructor
// asserts placement never allocated that high.
//
// Execution is single-threaded and every transition takes `&mut self`, so
// each one is a whole, non-preemptible step. A caller that introduces
// worker parallelism must serialize calls per session (a mutation queue or
// a mutex around the session); the transition functions themselves carry
// no locking.
//
// See also: `event.rs` for the emitted events, `command.rs` for the
// command wrapper, `placement.rs` for the entity sources, `fracture.rs`
// for the crack geometry paired with the ice stage.
//
// **Critical constraint: determinism.** Registries are `BTreeMap`s keyed
// by integer ids; snapshot serialization and iteration order are identical
// on every run.

use crate::config::SessionParams;
use crate::event::SessionEvent;
use crate::types::{Gift, GiftId, GiftKind, Snowman, SnowmanId, WorldPos};
use crate::palette;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Outcome of a transition attempt. The public API maps `NotFound` and
/// `AlreadyTerminal` to silent no-ops; tests assert on them directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionOutcome {
    Applied,
    NotFound,
    AlreadyTerminal,
}

/// Shared fracture state of the whole pond pane. One counter for the
/// entire pond instance, not per ice voxel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IceState {
    stage: u8,
}

impl IceState {
    /// Current fracture stage: 0 intact, 1–2 cracking, 3 removed.
    pub fn stage(&self) -> u8 {
        self.stage
    }

    /// Whether the pane has been removed from the scene.
    pub fn is_shattered(&self) -> bool {
        self.stage >= 3
    }
}

/// The authoritative session state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameSession {
    /// One-way flag; flips on the first `start()`.
    started: bool,
    /// All gifts ever created, including reward gifts. Never removed;
    /// renderers filter on `collected`.
    gifts: BTreeMap<GiftId, Gift>,
    snowmen: BTreeMap<SnowmanId, Snowman>,
    found_count: u32,
    game_over: bool,
    ice: IceState,
    params: SessionParams,
}

impl GameSession {
    /// Build a session from freshly placed entities.
    ///
    /// Panics if placement allocated a gift id at or above the reward-id
    /// offset — that would let a reward gift collide with a placed one.
    pub fn new(gifts: Vec<Gift>, snowmen: Vec<Snowman>, params: SessionParams) -> Self {
        assert!(
            gifts.iter().all(|g| g.id.0 < params.reward_gift_id_offset),
            "placement gift ids must stay below the reward id offset"
        );
        Self {
            started: false,
            gifts: gifts.into_iter().map(|g| (g.id, g)).collect(),
            snowmen: snowmen.into_iter().map(|s| (s.id, s)).collect(),
            found_count: 0,
            game_over: false,
            ice: IceState::default(),
            params,
        }
    }

    // -----------------------------------------------------------------------
    // Read surface (consumed every frame by the presentation layer)
    // -----------------------------------------------------------------------

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn found_count(&self) -> u32 {
        self.found_count
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn ice(&self) -> IceState {
        self.ice
    }

    /// All gifts in id order, collected ones included.
    pub fn gifts(&self) -> impl Iterator<Item = &Gift> {
        self.gifts.values()
    }

    /// All snowmen in id order, dead ones included.
    pub fn snowmen(&self) -> impl Iterator<Item = &Snowman> {
        self.snowmen.values()
    }

    pub fn gift(&self, id: GiftId) -> Option<&Gift> {
        self.gifts.get(&id)
    }

    pub fn snowman(&self, id: SnowmanId) -> Option<&Snowman> {
        self.snowmen.get(&id)
    }

    // -----------------------------------------------------------------------
    // Transitions
    // -----------------------------------------------------------------------

    /// One-way start; calling again is a no-op.
    pub fn start(&mut self) -> Vec<SessionEvent> {
        if self.started {
            return Vec::new();
        }
        self.started = true;
        vec![SessionEvent::SessionStarted]
    }

    /// Collect a gift. Unknown or already-collected ids are no-ops.
    pub fn collect(&mut self, id: GiftId) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        let _ = self.try_collect(id, &mut events);
        events
    }

    pub(crate) fn try_collect(
        &mut self,
        id: GiftId,
        events: &mut Vec<SessionEvent>,
    ) -> TransitionOutcome {
        let Some(gift) = self.gifts.get_mut(&id) else {
            return TransitionOutcome::NotFound;
        };
        if gift.collected {
            return TransitionOutcome::AlreadyTerminal;
        }
        gift.collected = true;
        self.found_count += 1;
        events.push(SessionEvent::GiftCollected { gift_id: id, found_count: self.found_count });
        if !self.game_over && self.found_count >= self.params.total_goal {
            self.game_over = true;
            events.push(SessionEvent::GameWon);
        }
        TransitionOutcome::Applied
    }

    /// Hit a snowman. Unknown or dead ids are no-ops. The decrement that
    /// reaches zero marks the snowman dead and spawns its reward gift in
    /// the same step.
    pub fn hit(&mut self, id: SnowmanId) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        let _ = self.try_hit(id, &mut events);
        events
    }

    pub(crate) fn try_hit(
        &mut self,
        id: SnowmanId,
        events: &mut Vec<SessionEvent>,
    ) -> TransitionOutcome {
        let Some(snowman) = self.snowmen.get_mut(&id) else {
            return TransitionOutcome::NotFound;
        };
        if snowman.is_dead {
            return TransitionOutcome::AlreadyTerminal;
        }
        snowman.hit_points -= 1;
        if snowman.hit_points > 0 {
            events.push(SessionEvent::SnowmanHit {
                snowman_id: id,
                hit_points_left: snowman.hit_points,
            });
            return TransitionOutcome::Applied;
        }
        snowman.is_dead = true;
        let position = snowman.position;
        let reward = self.spawn_reward(id, position);
        events.push(SessionEvent::SnowmanDefeated { snowman_id: id, reward });
        TransitionOutcome::Applied
    }

    /// Exactly one reward gift per defeated snowman, lifted above its
    /// last position. Ids come from the reserved offset range.
    fn spawn_reward(&mut self, snowman_id: SnowmanId, position: WorldPos) -> GiftId {
        let id = GiftId(self.params.reward_gift_id_offset + snowman_id.0);
        let gift = Gift {
            id,
            position: WorldPos::new(
                position.x,
                position.y + self.params.reward_lift,
                position.z,
            ),
            color: palette::GIFT_COLORS[0],
            kind: GiftKind::PlainBox,
            collected: false,
            rotation: None,
        };
        let previous = self.gifts.insert(id, gift);
        debug_assert!(previous.is_none(), "reward id collided with an existing gift");
        id
    }

    /// Advance the pond's fracture stage. No-op once shattered.
    pub fn crack_ice(&mut self) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        let _ = self.try_crack_ice(&mut events);
        events
    }

    pub(crate) fn try_crack_ice(&mut self, events: &mut Vec<SessionEvent>) -> TransitionOutcome {
        if self.ice.is_shattered() {
            return TransitionOutcome::AlreadyTerminal;
        }
        self.ice.stage += 1;
        if self.ice.is_shattered() {
            events.push(SessionEvent::IceShattered);
        } else {
            events.push(SessionEvent::IceCracked { stage: self.ice.stage });
        }
        TransitionOutcome::Applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::placement::{generate_gifts, generate_snowmen};
    use crate::prng::GameRng;

    fn session() -> GameSession {
        let config = GameConfig::default();
        let mut rng = GameRng::new(42);
        let gifts = generate_gifts(&config, &mut rng);
        let snowmen = generate_snowmen(&config, &mut rng);
        GameSession::new(gifts, snowmen, config.session)
    }

    fn tiny_session(gift_count: u32, goal: u32) -> GameSession {
        let gifts = (1..=gift_count)
            .map(|i| Gift {
                id: GiftId(i),
                position: WorldPos::new(0.0, 0.0, 0.0),
                color: 0xFFFFFF,
                kind: GiftKind::PlainBox,
                collected: false,
                rotation: None,
            })
            .collect();
        let snowmen = vec![Snowman {
            id: SnowmanId(1),
            position: WorldPos::new(5.0, 1.0, 5.0),
            yaw: 0.0,
            hit_points: 3,
            is_dead: false,
        }];
        GameSession::new(
            gifts,
            snowmen,
            SessionParams { total_goal: goal, reward_gift_id_offset: 1000, reward_lift: 1.5 },
        )
    }

    #[test]
    fn start_is_one_way_and_idempotent() {
        let mut session = session();
        assert!(!session.started());
        assert_eq!(session.start(), vec![SessionEvent::SessionStarted]);
        assert!(session.started());
        assert!(session.start().is_empty());
        assert!(session.started());
    }

    #[test]
    fn collect_marks_and_counts_once() {
        let mut session = session();
        let id = session.gifts().next().unwrap().id;

        let events = session.collect(id);
        assert_eq!(events, vec![SessionEvent::GiftCollected { gift_id: id, found_count: 1 }]);
        assert!(session.gift(id).unwrap().collected);
        assert_eq!(session.found_count(), 1);

        // Second collect is a no-op and changes nothing.
        let mut events = Vec::new();
        assert_eq!(session.try_collect(id, &mut events), TransitionOutcome::AlreadyTerminal);
        assert!(events.is_empty());
        assert_eq!(session.found_count(), 1);
        assert!(session.gift(id).unwrap().collected);
    }

    #[test]
    fn collect_unknown_id_is_not_found() {
        let mut session = session();
        let mut events = Vec::new();
        assert_eq!(
            session.try_collect(GiftId(9999), &mut events),
            TransitionOutcome::NotFound
        );
        assert!(events.is_empty());
        assert_eq!(session.found_count(), 0);
        assert!(!session.game_over());
    }

    #[test]
    fn win_condition_fires_exactly_at_the_goal() {
        let mut session = tiny_session(5, 3);
        let ids: Vec<GiftId> = session.gifts().map(|g| g.id).collect();

        assert!(session.collect(ids[0]).iter().all(|e| *e != SessionEvent::GameWon));
        assert!(session.collect(ids[1]).iter().all(|e| *e != SessionEvent::GameWon));
        assert!(!session.game_over());

        let events = session.collect(ids[2]);
        assert!(events.contains(&SessionEvent::GameWon));
        assert!(session.game_over());

        // Monotonic: further collects never retract or re-emit the win.
        let events = session.collect(ids[3]);
        assert!(!events.contains(&SessionEvent::GameWon));
        assert!(session.game_over());
    }

    #[test]
    fn hit_sequence_kills_on_the_third_blow() {
        let mut session = tiny_session(1, 30);
        let id = SnowmanId(1);

        let events = session.hit(id);
        assert_eq!(events, vec![SessionEvent::SnowmanHit { snowman_id: id, hit_points_left: 2 }]);
        let events = session.hit(id);
        assert_eq!(events, vec![SessionEvent::SnowmanHit { snowman_id: id, hit_points_left: 1 }]);

        let gifts_before = session.gifts().count();
        let events = session.hit(id);
        let reward = GiftId(1001);
        assert_eq!(
            events,
            vec![SessionEvent::SnowmanDefeated { snowman_id: id, reward }]
        );
        let snowman = session.snowman(id).unwrap();
        assert!(snowman.is_dead);
        assert_eq!(snowman.hit_points, 0);

        // Exactly one reward gift, at the snowman's position plus the lift.
        assert_eq!(session.gifts().count(), gifts_before + 1);
        let gift = session.gift(reward).unwrap();
        assert_eq!(gift.position.x, 5.0);
        assert_eq!(gift.position.y, 1.0 + 1.5);
        assert_eq!(gift.position.z, 5.0);
        assert_eq!(gift.kind, GiftKind::PlainBox);
        assert!(gift.rotation.is_none());
    }

    #[test]
    fn hitting_a_dead_snowman_changes_nothing() {
        let mut session = tiny_session(1, 30);
        let id = SnowmanId(1);
        for _ in 0..3 {
            session.hit(id);
        }
        let gifts_after_death = session.gifts().count();

        let mut events = Vec::new();
        assert_eq!(session.try_hit(id, &mut events), TransitionOutcome::AlreadyTerminal);
        assert!(events.is_empty());
        assert_eq!(session.snowman(id).unwrap().hit_points, 0);
        assert_eq!(session.gifts().count(), gifts_after_death);
    }

    #[test]
    fn hit_unknown_id_is_not_found() {
        let mut session = tiny_session(1, 30);
        let mut events = Vec::new();
        assert_eq!(session.try_hit(SnowmanId(77), &mut events), TransitionOutcome::NotFound);
        assert!(events.is_empty());
    }

    #[test]
    fn reward_gift_is_collectable() {
        let mut session = tiny_session(1, 30);
        let id = SnowmanId(1);
        for _ in 0..3 {
            session.hit(id);
        }
        let events = session.collect(GiftId(1001));
        assert_eq!(
            events,
            vec![SessionEvent::GiftCollected { gift_id: GiftId(1001), found_count: 1 }]
        );
    }

    #[test]
    fn ice_fracture_stages() {
        let mut session = session();
        assert_eq!(session.ice().stage(), 0);
        assert!(!session.ice().is_shattered());

        assert_eq!(session.crack_ice(), vec![SessionEvent::IceCracked { stage: 1 }]);
        assert_eq!(session.crack_ice(), vec![SessionEvent::IceCracked { stage: 2 }]);
        assert_eq!(session.crack_ice(), vec![SessionEvent::IceShattered]);
        assert!(session.ice().is_shattered());

        // Terminal: further cracks are no-ops.
        let mut events = Vec::new();
        assert_eq!(session.try_crack_ice(&mut events), TransitionOutcome::AlreadyTerminal);
        assert!(events.is_empty());
        assert_eq!(session.ice().stage(), 3);
    }

    #[test]
    #[should_panic(expected = "reward id offset")]
    fn constructor_rejects_colliding_placement_ids() {
        let gifts = vec![Gift {
            id: GiftId(1000),
            position: WorldPos::new(0.0, 0.0, 0.0),
            color: 0,
            kind: GiftKind::PlainBox,
            collected: false,
            rotation: None,
        }];
        let _ = GameSession::new(
            gifts,
            Vec::new(),
            SessionParams { total_goal: 30, reward_gift_id_offset: 1000, reward_lift: 1.5 },
        );
    }

    #[test]
    fn found_count_always_matches_collected_gifts() {
        let mut session = session();
        let ids: Vec<GiftId> = session.gifts().map(|g| g.id).take(10).collect();
        for id in ids {
            session.collect(id);
            let collected = session.gifts().filter(|g| g.collected).count() as u32;
            assert_eq!(session.found_count(), collected);
        }
    }

    #[test]
    fn session_serialization_roundtrip() {
        let mut session = session();
        session.start();
        let first = session.gifts().next().unwrap().id;
        session.collect(first);
        session.hit(SnowmanId(1));

        let json = serde_json::to_string(&session).unwrap();
        let restored: GameSession = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.started(), session.started());
        assert_eq!(restored.found_count(), session.found_count());
        assert_eq!(restored.gifts().count(), session.gifts().count());
        assert_eq!(
            restored.snowman(SnowmanId(1)).unwrap().hit_points,
            session.snowman(SnowmanId(1)).unwrap().hit_points
        );
    }
}
