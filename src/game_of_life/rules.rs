//! Survival/birth rules for life-like automata

use super::error::{LifeError, LifeResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Maximum neighbor count in the Moore neighborhood
pub const MAX_NEIGHBOURS: u8 = 8;

/// A life-like rule: the neighbor counts that keep a live cell alive and
/// the ones that bring a dead cell to life.
///
/// Counts above [`MAX_NEIGHBOURS`] are kept as given; they simply never match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rule {
    survival: BTreeSet<u8>,
    birth: BTreeSet<u8>,
}

impl Rule {
    pub fn new(
        survival: impl IntoIterator<Item = u8>,
        birth: impl IntoIterator<Item = u8>,
    ) -> Self {
        Self {
            survival: survival.into_iter().collect(),
            birth: birth.into_iter().collect(),
        }
    }

    /// Conway's Game of Life, B3/S23
    pub fn conway() -> Self {
        Self::new([2, 3], [3])
    }

    /// Build a rule from two digit strings such as `"23"` and `"3"`
    pub fn from_digits(survival: &str, birth: &str) -> LifeResult<Self> {
        let source = format!("{}/{}", survival, birth);
        Ok(Self {
            survival: parse_digits(survival, &source)?,
            birth: parse_digits(birth, &source)?,
        })
    }

    pub fn survival(&self) -> &BTreeSet<u8> {
        &self.survival
    }

    pub fn birth(&self) -> &BTreeSet<u8> {
        &self.birth
    }

    /// Whether a live cell with `neighbours` live neighbors stays alive
    pub fn survives(&self, neighbours: u8) -> bool {
        self.survival.contains(&neighbours)
    }

    /// Whether a dead cell with `neighbours` live neighbors is born
    pub fn is_born(&self, neighbours: u8) -> bool {
        self.birth.contains(&neighbours)
    }

    /// State of a cell in the next generation
    pub fn next_state(&self, alive: bool, neighbours: u8) -> bool {
        if alive {
            self.survives(neighbours)
        } else {
            self.is_born(neighbours)
        }
    }

    pub fn is_conway(&self) -> bool {
        *self == Self::conway()
    }
}

impl Default for Rule {
    fn default() -> Self {
        Self::conway()
    }
}

fn parse_digits(digits: &str, source: &str) -> LifeResult<BTreeSet<u8>> {
    digits
        .chars()
        .map(|ch| match ch.to_digit(10) {
            Some(d) if d <= MAX_NEIGHBOURS as u32 => Ok(d as u8),
            _ => Err(LifeError::InvalidRule {
                rule: source.to_string(),
                reason: format!("'{}' is not a neighbor count between 0 and 8", ch),
            }),
        })
        .collect()
}

impl FromStr for Rule {
    type Err = LifeError;

    /// Accepts `B3/S23` (either order, any case) or the bare `23/3` survival/birth form.
    fn from_str(s: &str) -> LifeResult<Self> {
        let s = s.trim();
        let invalid = |reason: &str| LifeError::InvalidRule {
            rule: s.to_string(),
            reason: reason.to_string(),
        };

        let (left, right) = s
            .split_once('/')
            .ok_or_else(|| invalid("expected two parts separated by '/'"))?;

        let tagged = |part: &str| -> Option<(char, String)> {
            let mut chars = part.chars();
            let tag = chars.next()?.to_ascii_uppercase();
            matches!(tag, 'B' | 'S').then(|| (tag, chars.collect()))
        };

        match (tagged(left), tagged(right)) {
            (Some(('B', b)), Some(('S', s_digits))) | (Some(('S', s_digits)), Some(('B', b))) => {
                Ok(Self {
                    survival: parse_digits(&s_digits, s)?,
                    birth: parse_digits(&b, s)?,
                })
            }
            (None, None) => Self::from_digits(left, right),
            _ => Err(invalid("expected one 'B' part and one 'S' part")),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "B")?;
        for n in &self.birth {
            write!(f, "{}", n)?;
        }
        write!(f, "/S")?;
        for n in &self.survival {
            write!(f, "{}", n)?;
        }
        Ok(())
    }
}

impl TryFrom<String> for Rule {
    type Error = LifeError;

    fn try_from(value: String) -> LifeResult<Self> {
        value.parse()
    }
}

impl From<Rule> for String {
    fn from(rule: Rule) -> Self {
        rule.to_string()
    }
}
