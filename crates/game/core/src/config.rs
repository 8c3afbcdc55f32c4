/// Fixed dimensions of the counting device.
///
/// None of these are tunable at runtime: the physical Bummerlzähler has seven
/// beads per wire and room for at most four players.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameConfig;

impl GameConfig {
    /// Counters on every row (points and Bummerl alike).
    pub const COUNTERS_PER_ROW: usize = 7;
    /// Highest score a row can show; equal to the counter count.
    pub const MAX_SCORE: u8 = Self::COUNTERS_PER_ROW as u8;
    pub const MIN_LANES: usize = 2;
    pub const MAX_LANES: usize = 4;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_score_matches_counter_count() {
        assert_eq!(GameConfig::MAX_SCORE as usize, GameConfig::COUNTERS_PER_ROW);
        assert!(GameConfig::MIN_LANES <= GameConfig::MAX_LANES);
    }
}
