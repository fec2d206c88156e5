//! Wire protocol: inbound move requests, outbound state and error frames.

pub mod error_codes;
pub mod messages;

pub use error_codes::ErrorCode;
pub use messages::{ClientMessage, FrameError, ServerMessage};

use crate::game::Player;

/// Derive the connection identity from the upgrade path: the last non-empty
/// segment, which must be `A` or `B`.
pub fn identity_from_path(path: &str) -> Option<Player> {
    path.rsplit('/')
        .find(|segment| !segment.is_empty())
        .and_then(|segment| segment.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_is_last_path_segment() {
        assert_eq!(identity_from_path("A"), Some(Player::A));
        assert_eq!(identity_from_path("/ws/B"), Some(Player::B));
        assert_eq!(identity_from_path("game-7/B/"), Some(Player::B));
        assert_eq!(identity_from_path("B/A"), Some(Player::A));
        assert_eq!(identity_from_path("A/C"), None);
        assert_eq!(identity_from_path(""), None);
        assert_eq!(identity_from_path("a"), None);
    }
}
