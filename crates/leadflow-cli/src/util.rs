use anyhow::{anyhow, Result};
use chrono::{DateTime, Local, Utc};
use leadflow_core::{LeadId, TeamMemberId};
use std::fs;
use std::io::{self, Read};
use std::path::Path;
use std::str::FromStr;

pub use leadflow_core::time::{format_timestamp_datetime, now_utc};

pub fn format_timestamp_date(ts: i64) -> String {
    match DateTime::<Utc>::from_timestamp(ts, 0) {
        Some(dt) => dt.with_timezone(&Local).format("%Y-%m-%d").to_string(),
        None => "-".to_string(),
    }
}

pub fn parse_lead_id(raw: &str) -> Result<LeadId> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(anyhow!("lead id cannot be empty"));
    }
    LeadId::from_str(trimmed).map_err(|_| anyhow!("invalid lead id: {}", trimmed))
}

pub fn parse_member_id(raw: &str) -> Result<TeamMemberId> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(anyhow!("team member id cannot be empty"));
    }
    TeamMemberId::from_str(trimmed).map_err(|_| anyhow!("invalid team member id: {}", trimmed))
}

/// Reads a file, or stdin when the path is `-`.
pub fn read_input(path: &Path) -> Result<Vec<u8>> {
    if path.as_os_str() == "-" {
        let mut buffer = Vec::new();
        io::stdin().read_to_end(&mut buffer)?;
        return Ok(buffer);
    }
    fs::read(path).map_err(|err| anyhow!("failed to read {}: {}", path.display(), err))
}

pub fn format_score(score: u8, bucket: &str) -> String {
    format!("{:>3} {}", score, bucket)
}

#[cfg(test)]
mod tests {
    use super::{format_timestamp_date, parse_lead_id, parse_member_id};
    use leadflow_core::{LeadId, TeamMemberId};

    #[test]
    fn ids_parse_with_whitespace() {
        assert_eq!(parse_lead_id(" 7 ").unwrap(), LeadId(7));
        assert_eq!(parse_member_id("3").unwrap(), TeamMemberId(3));
    }

    #[test]
    fn ids_reject_garbage() {
        assert!(parse_lead_id("").is_err());
        assert!(parse_lead_id("abc").is_err());
        assert!(parse_member_id("1.5").is_err());
    }

    #[test]
    fn out_of_range_timestamp_renders_dash() {
        assert_eq!(format_timestamp_date(i64::MAX), "-");
    }
}
