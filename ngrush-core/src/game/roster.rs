//! Player roster
//!
//! Players keep the identity they were given at the start of the match
//! (their starting seat index). Eliminated players are removed after the
//! round in which they lost their last life, so the remaining players keep
//! their relative order.

use core::fmt;

use heapless::Vec;

use crate::config::MAX_PLAYERS;

/// Stable player identity (starting seat index, 0-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// 0-based seat index
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// 1-based player number shown to humans
    pub fn number(self) -> u16 {
        self.0 as u16 + 1
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.number())
    }
}

/// A player still in the match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Player {
    pub id: PlayerId,
    pub lives: u8,
}

impl Player {
    pub fn is_active(&self) -> bool {
        self.lives > 0
    }
}

/// Ordered set of surviving players
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    players: Vec<Player, MAX_PLAYERS>,
}

impl Roster {
    /// Seat `count` players with `lives` each
    ///
    /// Counts above `MAX_PLAYERS` are truncated; `MatchConfig` rejects them
    /// before a roster is ever built.
    pub fn new(count: u8, lives: u8) -> Self {
        let mut players = Vec::new();
        for seat in 0..count.min(MAX_PLAYERS as u8) {
            let _ = players.push(Player {
                id: PlayerId(seat),
                lives,
            });
        }
        Self { players }
    }

    /// Number of entries (including players at zero lives not yet pruned)
    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Number of players with at least one life
    pub fn active_count(&self) -> usize {
        self.players.iter().filter(|p| p.is_active()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Player> {
        self.players.get(index)
    }

    /// Take one life from the player at `index`, never going below zero
    ///
    /// Returns the remaining lives.
    pub fn penalize(&mut self, index: usize) -> u8 {
        match self.players.get_mut(index) {
            Some(player) => {
                player.lives = player.lives.saturating_sub(1);
                player.lives
            }
            None => 0,
        }
    }

    /// Remove players with no lives left
    ///
    /// Returns the ids removed, in roster order.
    pub fn prune_eliminated(&mut self) -> Vec<PlayerId, MAX_PLAYERS> {
        let mut eliminated = Vec::new();
        for player in self.players.iter().filter(|p| !p.is_active()) {
            let _ = eliminated.push(player.id);
        }
        self.players.retain(|p| p.is_active());
        eliminated
    }

    /// The only active player, if exactly one remains
    pub fn survivor(&self) -> Option<&Player> {
        let mut active = self.players.iter().filter(|p| p.is_active());
        match (active.next(), active.next()) {
            (Some(player), None) => Some(player),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_new_roster() {
        let roster = Roster::new(4, 2);
        assert_eq!(roster.len(), 4);
        assert_eq!(roster.active_count(), 4);
        let ids: std::vec::Vec<u8> = roster.iter().map(|p| p.id.0).collect();
        assert_eq!(ids, [0, 1, 2, 3]);
        assert!(roster.iter().all(|p| p.lives == 2));
    }

    #[test]
    fn test_penalize_saturates() {
        let mut roster = Roster::new(1, 1);
        assert_eq!(roster.penalize(0), 0);
        assert_eq!(roster.penalize(0), 0);
        assert_eq!(roster.get(0).unwrap().lives, 0);
        // Out of range is a no-op
        assert_eq!(roster.penalize(5), 0);
    }

    #[test]
    fn test_prune_keeps_order_and_ids() {
        let mut roster = Roster::new(5, 1);
        roster.penalize(1);
        roster.penalize(3);

        let eliminated = roster.prune_eliminated();
        assert_eq!(eliminated.as_slice(), &[PlayerId(1), PlayerId(3)]);

        let ids: std::vec::Vec<u8> = roster.iter().map(|p| p.id.0).collect();
        assert_eq!(ids, [0, 2, 4]);
    }

    #[test]
    fn test_survivor() {
        let mut roster = Roster::new(2, 1);
        assert!(roster.survivor().is_none());

        roster.penalize(0);
        assert_eq!(roster.survivor().map(|p| p.id), Some(PlayerId(1)));

        roster.penalize(1);
        assert!(roster.survivor().is_none());
    }

    #[test]
    fn test_player_display() {
        assert_eq!(std::format!("{}", PlayerId(0)), "Player 1");
        assert_eq!(PlayerId(4).number(), 5);
    }

    proptest! {
        #[test]
        fn test_lives_never_increase(
            players in 1u8..=16,
            lives in 1u8..=9,
            hits in proptest::collection::vec(0usize..16, 0..64),
        ) {
            let mut roster = Roster::new(players, lives);
            let mut previous: std::vec::Vec<Player> = roster.iter().copied().collect();

            for index in hits {
                let before = roster.get(index).map(|p| p.lives);
                let after = roster.penalize(index);
                if let Some(before) = before {
                    prop_assert_eq!(after, before.saturating_sub(1));
                }

                for (old, new) in previous.iter().zip(roster.iter()) {
                    prop_assert_eq!(old.id, new.id);
                    prop_assert!(new.lives <= old.lives);
                }
                previous = roster.iter().copied().collect();
            }

            let survivors_before: std::vec::Vec<PlayerId> =
                roster.iter().filter(|p| p.is_active()).map(|p| p.id).collect();
            roster.prune_eliminated();
            let survivors_after: std::vec::Vec<PlayerId> = roster.iter().map(|p| p.id).collect();
            prop_assert_eq!(survivors_before, survivors_after);
        }
    }
}
