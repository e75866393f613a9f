pub mod player;

pub use player::{AnimationPlayer, PlaybackStats, PlayerError};
