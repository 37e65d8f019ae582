//! Construction options.

/// Seeds for the two priority generators of a map.
///
/// A `None` seed is replaced by one drawn from the operating system when the
/// map is built. Fixing both seeds makes tree shapes reproducible.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Config {
    pub left_seed: Option<u64>,
    pub right_seed: Option<u64>,
}

/// Mixed into the right seed so one user seed yields two distinct streams.
const RIGHT_STREAM: u64 = 0x9E37_79B9_7F4A_7C15;

impl Config {
    /// Both generators derived from a single seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            left_seed: Some(seed),
            right_seed: Some(seed ^ RIGHT_STREAM),
        }
    }

    pub fn with_left_seed(mut self, seed: u64) -> Self {
        self.left_seed = Some(seed);
        self
    }

    pub fn with_right_seed(mut self, seed: u64) -> Self {
        self.right_seed = Some(seed);
        self
    }
}
