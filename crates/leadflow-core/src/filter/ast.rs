use crate::domain::TeamMemberId;
use crate::rules::{LeadStatus, ScoreBucket};
use serde::Serialize;

/// Conjunction of optional predicates. An absent field imposes no
/// constraint; `Default` is the empty filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LeadFilter {
    pub text: Option<String>,
    pub status: Option<LeadStatus>,
    pub assigned_to: Option<TeamMemberId>,
    pub source: Option<String>,
    pub score_bucket: Option<ScoreBucket>,
    pub min_score: Option<u8>,
    pub max_score: Option<u8>,
}

impl LeadFilter {
    pub fn is_empty(&self) -> bool {
        self.text().is_none()
            && self.status.is_none()
            && self.assigned_to.is_none()
            && self.source().is_none()
            && self.score_bucket.is_none()
            && self.min_score.is_none()
            && self.max_score.is_none()
    }

    /// Free text with surrounding whitespace removed; blank counts as absent.
    pub fn text(&self) -> Option<&str> {
        self.text
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }

    pub fn source(&self) -> Option<&str> {
        self.source
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }

    /// Effective inclusive score range after intersecting the bucket with
    /// the explicit bounds. `None` when no score predicate is set.
    pub fn score_range(&self) -> Option<(u8, u8)> {
        if self.score_bucket.is_none() && self.min_score.is_none() && self.max_score.is_none() {
            return None;
        }
        let (mut low, mut high) = self
            .score_bucket
            .map(|bucket| bucket.range())
            .unwrap_or((0, 100));
        if let Some(min) = self.min_score {
            low = low.max(min);
        }
        if let Some(max) = self.max_score {
            high = high.min(max);
        }
        Some((low, high))
    }
}
