use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

pub const STANDARD_STATUSES: [&str; 5] = ["NEW", "CONTACTED", "QUALIFIED", "CONVERTED", "LOST"];
pub const PIPELINE_STATUSES: [&str; 7] = [
    "NEW",
    "CONTACTED",
    "QUALIFIED",
    "PROPOSAL",
    "NEGOTIATION",
    "CLOSED_WON",
    "CLOSED_LOST",
];

/// A status value in canonical upper-snake form. Values produced by
/// [`StatusSet::parse`] are members of that set; [`LeadStatus::from_stored`]
/// is for values read back from a collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeadStatus(String);

impl LeadStatus {
    pub fn from_stored(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusChange {
    pub from: LeadStatus,
    pub to: LeadStatus,
    pub at: i64,
}

/// The enumeration of allowed lead statuses, fixed at construction time.
///
/// Any member may transition to any other member; the set only decides
/// which values exist and which of them count as initial, converted and
/// lost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSet {
    values: Vec<LeadStatus>,
    initial: usize,
    converted: usize,
    lost: Option<usize>,
}

impl StatusSet {
    pub fn standard() -> Self {
        Self::from_static(&STANDARD_STATUSES, 0, 3, Some(4))
    }

    pub fn pipeline() -> Self {
        Self::from_static(&PIPELINE_STATUSES, 0, 5, Some(6))
    }

    pub fn new<S: AsRef<str>>(
        values: &[S],
        initial: &str,
        converted: &str,
        lost: Option<&str>,
    ) -> Result<Self, CoreError> {
        if values.is_empty() {
            return Err(CoreError::InvalidStatusSet(
                "at least one status is required".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        let mut canonical = Vec::with_capacity(values.len());
        for raw in values {
            let value = canonicalize(raw.as_ref());
            if value.is_empty() || !value.chars().all(|ch| ch.is_ascii_alphanumeric() || ch == '_') {
                return Err(CoreError::InvalidStatusSet(format!(
                    "invalid status name: {:?}",
                    raw.as_ref()
                )));
            }
            if !seen.insert(value.clone()) {
                return Err(CoreError::InvalidStatusSet(format!(
                    "duplicate status: {value}"
                )));
            }
            canonical.push(LeadStatus(value));
        }

        let position = |name: &str, role: &str| -> Result<usize, CoreError> {
            let wanted = canonicalize(name);
            canonical
                .iter()
                .position(|status| status.0 == wanted)
                .ok_or_else(|| {
                    CoreError::InvalidStatusSet(format!("{role} status {name:?} is not listed"))
                })
        };

        let initial = position(initial, "initial")?;
        let converted = position(converted, "converted")?;
        let lost = lost.map(|name| position(name, "lost")).transpose()?;
        if lost == Some(converted) {
            return Err(CoreError::InvalidStatusSet(
                "converted and lost statuses must differ".to_string(),
            ));
        }

        Ok(Self {
            values: canonical,
            initial,
            converted,
            lost,
        })
    }

    fn from_static(values: &[&str], initial: usize, converted: usize, lost: Option<usize>) -> Self {
        Self {
            values: values
                .iter()
                .map(|value| LeadStatus((*value).to_string()))
                .collect(),
            initial,
            converted,
            lost,
        }
    }

    /// Resolves user input (case-insensitive, spaces or dashes allowed in
    /// place of underscores) to a member of the set.
    pub fn parse(&self, raw: &str) -> Result<LeadStatus, CoreError> {
        let wanted = canonicalize(raw);
        self.values
            .iter()
            .find(|status| status.0 == wanted)
            .cloned()
            .ok_or_else(|| CoreError::InvalidStatus(raw.trim().to_string()))
    }

    pub fn contains(&self, status: &LeadStatus) -> bool {
        self.values.iter().any(|value| value == status)
    }

    pub fn values(&self) -> &[LeadStatus] {
        &self.values
    }

    pub fn initial(&self) -> &LeadStatus {
        &self.values[self.initial]
    }

    pub fn converted(&self) -> &LeadStatus {
        &self.values[self.converted]
    }

    pub fn lost(&self) -> Option<&LeadStatus> {
        self.lost.map(|index| &self.values[index])
    }

    pub fn is_converted(&self, status: &LeadStatus) -> bool {
        status == self.converted()
    }

    /// Neither converted nor lost.
    pub fn is_open(&self, status: &LeadStatus) -> bool {
        !self.is_converted(status) && self.lost() != Some(status)
    }
}

impl Default for StatusSet {
    fn default() -> Self {
        Self::standard()
    }
}

fn canonicalize(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|ch| match ch {
            ' ' | '-' => '_',
            other => other.to_ascii_uppercase(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{StatusSet, PIPELINE_STATUSES, STANDARD_STATUSES};
    use crate::error::CoreError;

    #[test]
    fn presets_expose_their_designated_values() {
        let standard = StatusSet::standard();
        assert_eq!(standard.values().len(), STANDARD_STATUSES.len());
        assert_eq!(standard.initial().as_str(), "NEW");
        assert_eq!(standard.converted().as_str(), "CONVERTED");
        assert_eq!(standard.lost().map(|s| s.as_str()), Some("LOST"));

        let pipeline = StatusSet::pipeline();
        assert_eq!(pipeline.values().len(), PIPELINE_STATUSES.len());
        assert_eq!(pipeline.converted().as_str(), "CLOSED_WON");
        assert_eq!(pipeline.lost().map(|s| s.as_str()), Some("CLOSED_LOST"));
    }

    #[test]
    fn parse_is_case_insensitive_and_canonical() {
        let pipeline = StatusSet::pipeline();
        assert_eq!(pipeline.parse("closed won").unwrap().as_str(), "CLOSED_WON");
        assert_eq!(pipeline.parse(" closed-lost ").unwrap().as_str(), "CLOSED_LOST");
    }

    #[test]
    fn parse_rejects_values_outside_the_set() {
        let standard = StatusSet::standard();
        assert_eq!(
            standard.parse("BOGUS").unwrap_err(),
            CoreError::InvalidStatus("BOGUS".to_string())
        );
        // Pipeline-only value is not part of the standard set.
        assert!(standard.parse("PROPOSAL").is_err());
    }

    #[test]
    fn custom_set_validates_designations() {
        let set = StatusSet::new(&["open", "won", "dropped"], "open", "won", Some("dropped"))
            .expect("custom set");
        assert_eq!(set.initial().as_str(), "OPEN");
        assert!(set.is_open(&set.parse("open").unwrap()));
        assert!(!set.is_open(&set.parse("dropped").unwrap()));

        assert!(matches!(
            StatusSet::new(&["open", "OPEN"], "open", "open", None),
            Err(CoreError::InvalidStatusSet(_))
        ));
        assert!(matches!(
            StatusSet::new(&["open", "won"], "open", "closed", None),
            Err(CoreError::InvalidStatusSet(_))
        ));
        assert!(matches!(
            StatusSet::new::<&str>(&[], "open", "won", None),
            Err(CoreError::InvalidStatusSet(_))
        ));
        assert!(matches!(
            StatusSet::new(&["open", "won"], "open", "won", Some("won")),
            Err(CoreError::InvalidStatusSet(_))
        ));
    }
}
