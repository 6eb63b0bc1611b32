//! Per-tick input snapshots
//!
//! Action flags are edge-triggered: true only on the tick the button went
//! down. Axes are continuous.

use glam::Vec2;

use super::state::PlayerId;

/// One player's input for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerInput {
    /// Movement stick; only `x` drives lateral movement
    pub movement: Vec2,
    /// Aim stick for dash and throw direction
    pub aim: Vec2,
    pub dash: bool,
    pub throw: bool,
    pub pickup: bool,
}

/// Input service: produces a snapshot per player per tick
pub trait InputSource {
    fn poll(&mut self, player: PlayerId, tick: u64) -> PlayerInput;
}

/// Input commands for a single tick, indexed by player id
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub players: Vec<PlayerInput>,
}

impl TickInput {
    /// Poll `source` once for each of `count` players
    pub fn gather(source: &mut dyn InputSource, count: usize, tick: u64) -> Self {
        Self {
            players: (0..count).map(|i| source.poll(PlayerId(i), tick)).collect(),
        }
    }

    /// Input for a player, neutral when none was supplied
    pub fn for_player(&self, id: PlayerId) -> PlayerInput {
        self.players.get(id.index()).copied().unwrap_or_default()
    }

    pub fn set(&mut self, id: PlayerId, input: PlayerInput) {
        if self.players.len() <= id.index() {
            self.players.resize(id.index() + 1, PlayerInput::default());
        }
        self.players[id.index()] = input;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct DashEveryOtherTick;

    impl InputSource for DashEveryOtherTick {
        fn poll(&mut self, player: PlayerId, tick: u64) -> PlayerInput {
            PlayerInput {
                movement: Vec2::new(player.index() as f32, 0.0),
                dash: tick % 2 == 0,
                ..Default::default()
            }
        }
    }

    #[test]
    fn test_gather_polls_every_player() {
        let input = TickInput::gather(&mut DashEveryOtherTick, 3, 4);
        assert_eq!(input.players.len(), 3);
        assert!(input.players.iter().all(|p| p.dash));
        assert_eq!(input.for_player(PlayerId(2)).movement.x, 2.0);
    }

    #[test]
    fn test_missing_player_is_neutral() {
        let mut input = TickInput::default();
        assert_eq!(input.for_player(PlayerId(5)), PlayerInput::default());

        input.set(
            PlayerId(2),
            PlayerInput {
                throw: true,
                ..Default::default()
            },
        );
        assert_eq!(input.players.len(), 3);
        assert!(input.for_player(PlayerId(2)).throw);
        assert!(!input.for_player(PlayerId(0)).throw);
    }
}
