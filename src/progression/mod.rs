pub mod evolution;
pub mod experience;
pub mod rewards;

pub use evolution::evolution_target;
pub use experience::{apply_experience, xp_threshold, LevelUpOutcome, StatIncreases};
pub use rewards::RewardCalculator;
