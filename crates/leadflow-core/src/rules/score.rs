use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MIN_SCORE: i64 = 0;
pub const MAX_SCORE: i64 = 100;

pub const HOT_THRESHOLD: u8 = 80;
pub const WARM_THRESHOLD: u8 = 60;
pub const COOL_THRESHOLD: u8 = 40;

/// A lead score in `0..=100`. Buckets and tiers are always derived from
/// it and never stored.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(try_from = "i64", into = "i64")]
pub struct Score(u8);

impl Score {
    pub fn new(value: i64) -> Result<Self, CoreError> {
        if !(MIN_SCORE..=MAX_SCORE).contains(&value) {
            return Err(CoreError::InvalidScore(value));
        }
        Ok(Self(value as u8))
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    pub fn bucket(&self) -> ScoreBucket {
        match self.0 {
            v if v >= HOT_THRESHOLD => ScoreBucket::Hot,
            v if v >= WARM_THRESHOLD => ScoreBucket::Warm,
            _ => ScoreBucket::Cold,
        }
    }

    pub fn tier(&self) -> ScoreTier {
        match self.0 {
            v if v >= HOT_THRESHOLD => ScoreTier::Hot,
            v if v >= WARM_THRESHOLD => ScoreTier::Warm,
            v if v >= COOL_THRESHOLD => ScoreTier::Cool,
            _ => ScoreTier::Cold,
        }
    }
}

impl TryFrom<i64> for Score {
    type Error = CoreError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Score::new(value)
    }
}

impl From<Score> for i64 {
    fn from(score: Score) -> Self {
        i64::from(score.0)
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Three-way classifier used for filtering. Output only: a bucket is
/// always computed from a [`Score`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBucket {
    Hot,
    Warm,
    Cold,
}

impl ScoreBucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreBucket::Hot => "hot",
            ScoreBucket::Warm => "warm",
            ScoreBucket::Cold => "cold",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "hot" => Some(ScoreBucket::Hot),
            "warm" => Some(ScoreBucket::Warm),
            "cold" => Some(ScoreBucket::Cold),
            _ => None,
        }
    }

    /// Inclusive score range covered by the bucket.
    pub fn range(&self) -> (u8, u8) {
        match self {
            ScoreBucket::Hot => (HOT_THRESHOLD, MAX_SCORE as u8),
            ScoreBucket::Warm => (WARM_THRESHOLD, HOT_THRESHOLD - 1),
            ScoreBucket::Cold => (MIN_SCORE as u8, WARM_THRESHOLD - 1),
        }
    }
}

impl fmt::Display for ScoreBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Four-tier display classifier. Distinct from [`ScoreBucket`]: it splits
/// the cold bucket into cool and cold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreTier {
    Hot,
    Warm,
    Cool,
    Cold,
}

impl ScoreTier {
    pub fn label(&self) -> &'static str {
        match self {
            ScoreTier::Hot => "Hot",
            ScoreTier::Warm => "Warm",
            ScoreTier::Cool => "Cool",
            ScoreTier::Cold => "Cold",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            ScoreTier::Hot => "green",
            ScoreTier::Warm => "yellow",
            ScoreTier::Cool => "orange",
            ScoreTier::Cold => "red",
        }
    }
}

pub fn bucket(score: i64) -> Result<ScoreBucket, CoreError> {
    Ok(Score::new(score)?.bucket())
}

pub fn color_class(score: i64) -> Result<ScoreTier, CoreError> {
    Ok(Score::new(score)?.tier())
}

#[cfg(test)]
mod tests {
    use super::{bucket, color_class, Score, ScoreBucket, ScoreTier};
    use crate::error::CoreError;

    #[test]
    fn bucket_partitions_the_whole_range() {
        let mut counts = [0usize; 3];
        for value in 0..=100 {
            let found = bucket(value).expect("in range");
            let (low, high) = found.range();
            assert!((i64::from(low)..=i64::from(high)).contains(&value));
            counts[found as usize] += 1;
        }
        assert_eq!(counts, [21, 20, 60]);
    }

    #[test]
    fn bucket_boundaries() {
        assert_eq!(bucket(80).unwrap(), ScoreBucket::Hot);
        assert_eq!(bucket(79).unwrap(), ScoreBucket::Warm);
        assert_eq!(bucket(60).unwrap(), ScoreBucket::Warm);
        assert_eq!(bucket(59).unwrap(), ScoreBucket::Cold);
        assert_eq!(bucket(0).unwrap(), ScoreBucket::Cold);
    }

    #[test]
    fn tiers_split_cold_into_cool_and_cold() {
        assert_eq!(color_class(95).unwrap(), ScoreTier::Hot);
        assert_eq!(color_class(70).unwrap(), ScoreTier::Warm);
        assert_eq!(color_class(50).unwrap(), ScoreTier::Cool);
        assert_eq!(color_class(10).unwrap(), ScoreTier::Cold);
        assert_eq!(color_class(40).unwrap().color(), "orange");
        assert_eq!(color_class(39).unwrap().label(), "Cold");
    }

    #[test]
    fn out_of_range_scores_fail() {
        assert_eq!(bucket(-1).unwrap_err(), CoreError::InvalidScore(-1));
        assert_eq!(color_class(101).unwrap_err(), CoreError::InvalidScore(101));
        assert!(Score::new(100).is_ok());
    }
}
