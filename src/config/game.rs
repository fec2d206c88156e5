//! Rule configuration.

use super::defaults::default_restrict_directions;
use crate::game::DirectionPolicy;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GameConfig {
    /// Limit H1 to orthogonal and H2 to diagonal directions
    #[serde(default = "default_restrict_directions")]
    pub restrict_directions: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            restrict_directions: default_restrict_directions(),
        }
    }
}

impl GameConfig {
    pub fn direction_policy(&self) -> DirectionPolicy {
        if self.restrict_directions {
            DirectionPolicy::ByKind
        } else {
            DirectionPolicy::Unrestricted
        }
    }
}
