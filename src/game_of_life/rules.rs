//! Rule parsing and the per-cell transition function
//!
//! Rules are written `B<digits>/S<digits>` for the classical two-state game or
//! `B<digits>/S<digits>/A<number>` for the ageing variant, where cells carry a
//! vitality that decays by one each tick they fail to survive.

use super::error::RuleError;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Largest neighbour count a Moore neighbourhood can produce
pub const MAX_NEIGHBOUR_COUNT: u8 = 8;

/// Lowest vitality that can ever count as fertile
const MIN_FERTILE_VITALITY: u32 = 2;

/// Normalized form of a rule string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleModel {
    /// Two-state game. Births and survivals share one sorted trigger set.
    Classical { triggers: Vec<u8> },
    /// Ageing game with vitality values
    Extended {
        birth: Vec<u8>,
        survival: Vec<u8>,
        fertility: FertilitySet,
    },
}

/// Contiguous range of vitality values that count as fertile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FertilitySet {
    low: u32,
    high: u32,
}

impl FertilitySet {
    pub fn new(low: u32, high: u32) -> Self {
        Self { low, high }
    }

    pub fn low(&self) -> u32 {
        self.low
    }

    pub fn high(&self) -> u32 {
        self.high
    }

    pub fn contains(&self, vitality: u32) -> bool {
        (self.low..=self.high).contains(&vitality)
    }

    /// Vitality given to a cell reborn next to enough fertile neighbours
    pub fn rebirth_vitality(&self) -> u32 {
        self.high.saturating_add(2)
    }
}

impl fmt::Display for FertilitySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.low == self.high {
            write!(f, "{}", self.low)
        } else {
            write!(f, "{}-{}", self.low, self.high)
        }
    }
}

/// True when the rule has no `A` segment, i.e. exactly two `/`-separated parts
pub fn is_normal_game(rule: &str) -> bool {
    rule.split('/').count() == 2
}

/// Vitality values that count as fertile for a given maximum age.
///
/// This is the range `2..=age - 2`, except that ages below 4 always yield `2..=3`.
pub fn fertility_set(max_age: u32) -> FertilitySet {
    match max_age.checked_sub(2) {
        Some(upper) if upper >= MIN_FERTILE_VITALITY => FertilitySet::new(MIN_FERTILE_VITALITY, upper),
        _ => FertilitySet::new(MIN_FERTILE_VITALITY, 3),
    }
}

/// Number of neighbours whose vitality is in the fertility set
pub fn fertile_cells_amount(neighbours: &[u32], fertility: &FertilitySet) -> usize {
    neighbours
        .iter()
        .filter(|&&value| fertility.contains(value))
        .count()
}

fn living_neighbours(neighbours: &[u32]) -> u8 {
    neighbours.iter().filter(|&&value| value > 0).count() as u8
}

fn parse_counts(rule: &str, segment: &str, prefix: char) -> Result<Vec<u8>, RuleError> {
    let digits = segment.strip_prefix(prefix).ok_or_else(|| {
        RuleError::malformed(rule, format!("segment '{}' must start with '{}'", segment, prefix))
    })?;

    if digits.is_empty() {
        return Err(RuleError::malformed(
            rule,
            format!("'{}' segment lists no neighbour counts", prefix),
        ));
    }

    digits
        .chars()
        .map(|ch| match ch.to_digit(10) {
            Some(count) if count <= u32::from(MAX_NEIGHBOUR_COUNT) => Ok(count as u8),
            _ => Err(RuleError::malformed(
                rule,
                format!("'{}' is not a neighbour count (0-8) in '{}' segment", ch, prefix),
            )),
        })
        .collect()
}

fn parse_age(rule: &str, segment: &str) -> Result<u32, RuleError> {
    let digits = segment.strip_prefix('A').ok_or_else(|| {
        RuleError::malformed(rule, format!("segment '{}' must start with 'A'", segment))
    })?;

    if digits.is_empty() || !digits.chars().all(|ch| ch.is_ascii_digit()) {
        return Err(RuleError::malformed(
            rule,
            format!("'A' segment needs a whole number, got '{}'", digits),
        ));
    }

    digits
        .parse()
        .map_err(|e| RuleError::malformed(rule, format!("invalid maximum age '{}': {}", digits, e)))
}

impl RuleModel {
    /// Parse a rule string into its normalized model
    pub fn parse(rule: &str) -> Result<Self, RuleError> {
        let segments: Vec<&str> = rule.split('/').collect();

        match segments.as_slice() {
            [b, s] => {
                let birth = parse_counts(rule, b, 'B')?;
                let survival = parse_counts(rule, s, 'S')?;

                let triggers = birth
                    .into_iter()
                    .chain(survival)
                    .sorted()
                    .dedup()
                    .collect();

                Ok(RuleModel::Classical { triggers })
            }
            [b, s, a] => Ok(RuleModel::Extended {
                birth: parse_counts(rule, b, 'B')?,
                survival: parse_counts(rule, s, 'S')?,
                fertility: fertility_set(parse_age(rule, a)?),
            }),
            _ => Err(RuleError::malformed(
                rule,
                format!("expected 2 or 3 '/'-separated segments, found {}", segments.len()),
            )),
        }
    }

    pub fn is_classical(&self) -> bool {
        matches!(self, RuleModel::Classical { .. })
    }

    /// Compute a cell's next value from its current value and neighbour values
    pub fn next_value(&self, current: u32, neighbours: &[u32]) -> u32 {
        match self {
            // The classical game ignores the current state entirely
            RuleModel::Classical { triggers } => {
                u32::from(triggers.contains(&living_neighbours(neighbours)))
            }
            RuleModel::Extended { birth, survival, fertility } => {
                if current == 0 {
                    let fertile = fertile_cells_amount(neighbours, fertility) as u8;
                    if birth.contains(&fertile) {
                        fertility.rebirth_vitality()
                    } else {
                        0
                    }
                } else if survival.contains(&living_neighbours(neighbours)) {
                    current
                } else {
                    current - 1
                }
            }
        }
    }
}

impl FromStr for RuleModel {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RuleModel::parse(s)
    }
}

impl fmt::Display for RuleModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleModel::Classical { triggers } => {
                write!(f, "classical, triggers [{}]", triggers.iter().join(", "))
            }
            RuleModel::Extended { birth, survival, fertility } => write!(
                f,
                "ageing, birth [{}], survival [{}], fertile vitality {}, rebirth at {}",
                birth.iter().join(", "),
                survival.iter().join(", "),
                fertility,
                fertility.rebirth_vitality(),
            ),
        }
    }
}
