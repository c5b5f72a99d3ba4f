use crate::domain::TeamMemberId;
use crate::filter::ast::LeadFilter;
use crate::filter::FilterParseError;
use crate::rules::{ScoreBucket, StatusSet};

/// Parses the query language used by `list`/`export`:
///
/// - `status:QUALIFIED`, `source:referral`, `assigned:3`
/// - `score:hot|warm|cold`, `score:60..80`, `score:>=60`, `score:<=40`
/// - any other token is free text; text tokens are joined with single spaces.
pub fn parse_filter(input: &str, statuses: &StatusSet) -> Result<LeadFilter, FilterParseError> {
    let mut filter = LeadFilter::default();
    let mut text_terms: Vec<&str> = Vec::new();

    for token in input.split_whitespace() {
        if let Some(raw) = token.strip_prefix("status:") {
            let raw = non_empty(raw, "status")?;
            if filter.status.is_some() {
                return Err(FilterParseError::Duplicate("status"));
            }
            let status = statuses
                .parse(raw)
                .map_err(|_| FilterParseError::InvalidStatus(raw.to_string()))?;
            filter.status = Some(status);
        } else if let Some(raw) = token.strip_prefix("source:") {
            let raw = non_empty(raw, "source")?;
            if filter.source.is_some() {
                return Err(FilterParseError::Duplicate("source"));
            }
            filter.source = Some(raw.to_string());
        } else if let Some(raw) = token.strip_prefix("assigned:") {
            let raw = non_empty(raw, "assigned")?;
            if filter.assigned_to.is_some() {
                return Err(FilterParseError::Duplicate("assigned"));
            }
            let id = raw
                .parse::<TeamMemberId>()
                .map_err(|_| FilterParseError::InvalidAssignee(raw.to_string()))?;
            filter.assigned_to = Some(id);
        } else if let Some(raw) = token.strip_prefix("score:") {
            let raw = non_empty(raw, "score")?;
            parse_score_selector(raw, &mut filter)?;
        } else {
            text_terms.push(token);
        }
    }

    if !text_terms.is_empty() {
        filter.text = Some(text_terms.join(" "));
    }

    Ok(filter)
}

fn non_empty<'a>(raw: &'a str, key: &'static str) -> Result<&'a str, FilterParseError> {
    if raw.is_empty() {
        return Err(FilterParseError::EmptyValue(key));
    }
    Ok(raw)
}

fn parse_score_selector(raw: &str, filter: &mut LeadFilter) -> Result<(), FilterParseError> {
    let invalid = || FilterParseError::InvalidScore(raw.to_string());

    if let Some(bucket) = ScoreBucket::parse(raw) {
        if filter.score_bucket.is_some() {
            return Err(FilterParseError::Duplicate("score bucket"));
        }
        filter.score_bucket = Some(bucket);
        return Ok(());
    }

    let (min, max) = if let Some(rest) = raw.strip_prefix(">=") {
        (Some(score_value(rest).ok_or_else(invalid)?), None)
    } else if let Some(rest) = raw.strip_prefix("<=") {
        (None, Some(score_value(rest).ok_or_else(invalid)?))
    } else if let Some((low, high)) = raw.split_once("..") {
        let low = score_value(low).ok_or_else(invalid)?;
        let high = score_value(high).ok_or_else(invalid)?;
        if low > high {
            return Err(invalid());
        }
        (Some(low), Some(high))
    } else {
        return Err(invalid());
    };

    if (min.is_some() && filter.min_score.is_some()) || (max.is_some() && filter.max_score.is_some()) {
        return Err(FilterParseError::Duplicate("score range"));
    }
    if min.is_some() {
        filter.min_score = min;
    }
    if max.is_some() {
        filter.max_score = max;
    }
    Ok(())
}

fn score_value(raw: &str) -> Option<u8> {
    raw.parse::<u8>().ok().filter(|value| *value <= 100)
}
