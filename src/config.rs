use crate::seat::SEAT_COUNT;

/// Room default stakes.
pub const DEFAULT_SMALL_BLIND: u64 = 10;
pub const DEFAULT_BIG_BLIND: u64 = 20;
/// Chips a newly seated player receives when none are specified.
pub const DEFAULT_CHIPS: u64 = 2000;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("big blind must be positive")]
    ZeroBigBlind,
    #[error("small blind {small} exceeds big blind {big}")]
    SmallAboveBig { small: u64, big: u64 },
    #[error("player count must be between 2 and {max}, got {got}")]
    PlayerCount { max: usize, got: usize },
    #[error("starting stack must be positive")]
    ZeroStack,
}

/// Forced bet sizes for a hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlindConfig {
    pub small_blind: u64,
    pub big_blind: u64,
}

impl Default for BlindConfig {
    fn default() -> Self {
        Self { small_blind: DEFAULT_SMALL_BLIND, big_blind: DEFAULT_BIG_BLIND }
    }
}

impl BlindConfig {
    pub fn new(small_blind: u64, big_blind: u64) -> Result<Self, ConfigError> {
        let cfg = Self { small_blind, big_blind };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.big_blind == 0 {
            return Err(ConfigError::ZeroBigBlind);
        }
        if self.small_blind > self.big_blind {
            return Err(ConfigError::SmallAboveBig { small: self.small_blind, big: self.big_blind });
        }
        Ok(())
    }
}

/// How the pot is divided at showdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[non_exhaustive]
pub enum PotRule {
    /// One pot; every non-folded player contests all of it, whatever they put in.
    #[default]
    Single,
    /// Layered main and side pots: a player only contests the layers they paid into.
    Layered,
}

/// What happens to chips left over when a pot does not divide evenly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[non_exhaustive]
pub enum OddChipRule {
    /// One chip at a time to the tied winners, clockwise from the seat left of the dealer.
    #[default]
    LeftOfDealer,
    /// Leave the remainder unpaid and report it on the settlement.
    Retain,
}

/// Showdown rules for a hand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HandRules {
    pub pot: PotRule,
    pub odd_chips: OddChipRule,
}

/// Everything needed to open a local table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    pub players: usize,
    pub starting_stack: u64,
    pub blinds: BlindConfig,
    pub rules: HandRules,
    /// Deck shuffle seed; `None` draws one from the thread RNG.
    pub seed: Option<u64>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            players: 4,
            starting_stack: DEFAULT_CHIPS,
            blinds: BlindConfig::default(),
            rules: HandRules::default(),
            seed: None,
        }
    }
}

impl TableConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.blinds.validate()?;
        if !(2..=SEAT_COUNT).contains(&self.players) {
            return Err(ConfigError::PlayerCount { max: SEAT_COUNT, got: self.players });
        }
        if self.starting_stack == 0 {
            return Err(ConfigError::ZeroStack);
        }
        Ok(())
    }
}
