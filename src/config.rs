use crate::sim::seats::DEFAULT_THRESHOLD_PCT;

/// Fixed scenario parameters for elections, government formation and the
/// legislature. Passed into the engine explicitly; never read from the
/// environment.
#[derive(Debug, Clone, PartialEq)]
pub struct ElectoralConfig {
    /// Minimum constituency vote share (percent) needed to win any seat there.
    pub threshold_pct: f64,
    /// Seats in the chamber.
    pub total_seats: u32,
    /// Seats needed for a governing majority. `None` means `total_seats / 2 + 1`.
    pub majority_seats: Option<u32>,
    /// Stability a freshly installed government starts with (0-100).
    pub baseline_stability: f64,
    /// Stability lost when a bill is voted down.
    pub rejection_stability_penalty: f64,
    /// Friction points removed per ministry offered to a party.
    pub sweetener_per_ministry: f64,
}

impl ElectoralConfig {
    pub fn with_total_seats(total_seats: u32) -> Self {
        Self {
            total_seats,
            ..Self::default()
        }
    }

    /// Seats a coalition must reach to govern.
    pub fn majority(&self) -> u32 {
        self.majority_seats.unwrap_or(self.total_seats / 2 + 1)
    }
}

impl Default for ElectoralConfig {
    fn default() -> Self {
        Self {
            threshold_pct: DEFAULT_THRESHOLD_PCT,
            total_seats: 150,
            majority_seats: None,
            baseline_stability: 50.0,
            rejection_stability_penalty: 5.0,
            sweetener_per_ministry: 10.0,
        }
    }
}
