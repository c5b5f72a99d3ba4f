use leadflow_core::{LeadNew, Score};

const FREE_EMAIL_PROVIDERS: [&str; 6] = [
    "gmail.com",
    "yahoo.com",
    "hotmail.com",
    "outlook.com",
    "aol.com",
    "icloud.com",
];
const COMPANY_INDICATORS: [&str; 6] = ["inc", "corp", "ltd", "llc", "technologies", "solutions"];
const C_LEVEL: [&str; 7] = ["ceo", "cto", "cfo", "coo", "cmo", "chief", "president"];
const VP_LEVEL: [&str; 5] = ["vp", "vice president", "director", "head of", "founder"];
const MANAGER_LEVEL: [&str; 3] = ["manager", "lead", "senior"];
// Checked in order; the first match wins.
const SOURCE_SCORES: [(&str, u8); 7] = [
    ("referral", 10),
    ("direct", 9),
    ("website", 8),
    ("linkedin", 7),
    ("email campaign", 6),
    ("social media", 5),
    ("cold outreach", 3),
];
const OTHER_SOURCE: u8 = 5;
const PHONE_POINTS: u8 = 8;

/// Rule-based score for a lead created without one. Sums the field
/// signals and caps the total at 100.
pub fn score_lead(lead: &LeadNew) -> Score {
    let total = u32::from(email_points(&lead.email))
        + u32::from(company_points(lead.company.as_deref()))
        + u32::from(title_points(lead.title.as_deref()))
        + u32::from(phone_points(lead.phone.as_deref()))
        + u32::from(source_points(&lead.source));
    Score::new(i64::from(total.min(100))).unwrap_or_default()
}

fn email_points(email: &str) -> u8 {
    let email = email.trim().to_lowercase();
    if email.is_empty() {
        return 0;
    }
    if FREE_EMAIL_PROVIDERS
        .iter()
        .any(|provider| email.contains(&format!("@{provider}")))
    {
        return 10;
    }
    if email.contains('@') && !email.ends_with(".edu") {
        return 25;
    }
    5
}

fn company_points(company: Option<&str>) -> u8 {
    let Some(company) = company.map(str::trim).filter(|value| !value.is_empty()) else {
        return 0;
    };
    let company = company.to_lowercase();
    if COMPANY_INDICATORS
        .iter()
        .any(|indicator| company.contains(indicator))
    {
        20
    } else {
        15
    }
}

fn title_points(title: Option<&str>) -> u8 {
    let Some(title) = title.map(str::trim).filter(|value| !value.is_empty()) else {
        return 0;
    };
    let title = title.to_lowercase();
    let has = |roles: &[&str]| roles.iter().any(|role| title.contains(role));
    if has(&C_LEVEL) {
        30
    } else if has(&VP_LEVEL) {
        25
    } else if has(&MANAGER_LEVEL) {
        20
    } else {
        10
    }
}

fn phone_points(phone: Option<&str>) -> u8 {
    match phone.map(str::trim) {
        Some(value) if !value.is_empty() => PHONE_POINTS,
        _ => 0,
    }
}

fn source_points(source: &str) -> u8 {
    let source = source.to_lowercase().replace(['_', '-'], " ");
    SOURCE_SCORES
        .iter()
        .find(|(name, _)| source.contains(name))
        .map(|(_, points)| *points)
        .unwrap_or(OTHER_SOURCE)
}

#[cfg(test)]
mod tests {
    use super::score_lead;
    use leadflow_core::{LeadNew, LeadStatus};

    fn lead(email: &str) -> LeadNew {
        LeadNew {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: email.to_string(),
            phone: None,
            company: None,
            title: None,
            status: LeadStatus::from_stored("NEW"),
            score: None,
            source: "unknown".to_string(),
            notes: None,
            assigned_to: None,
        }
    }

    #[test]
    fn bare_lead_scores_email_and_source_only() {
        assert_eq!(score_lead(&lead("ada@gmail.com")).value(), 10 + 5);
        assert_eq!(score_lead(&lead("ada@engines.co.uk")).value(), 25 + 5);
        assert_eq!(score_lead(&lead("ada@oxford.edu")).value(), 5 + 5);
    }

    #[test]
    fn strong_lead_is_capped_at_one_hundred() {
        let mut input = lead("ada@engines.com");
        input.company = Some("Analytical Engines Ltd".to_string());
        input.title = Some("Chief Executive".to_string());
        input.phone = Some("+44 20 7946 0000".to_string());
        input.source = "referral".to_string();
        // 25 + 20 + 30 + 8 + 10
        assert_eq!(score_lead(&input).value(), 93);

        input.title = Some("VP Sales".to_string());
        assert_eq!(score_lead(&input).value(), 88);
    }

    #[test]
    fn source_names_match_with_underscores() {
        let mut input = lead("ada@gmail.com");
        input.source = "cold_outreach".to_string();
        assert_eq!(score_lead(&input).value(), 10 + 3);
        input.source = "Social-Media".to_string();
        assert_eq!(score_lead(&input).value(), 10 + 5);
    }

    #[test]
    fn title_levels() {
        let mut input = lead("ada@gmail.com");
        input.title = Some("Engineering Manager".to_string());
        assert_eq!(score_lead(&input).value(), 10 + 20 + 5);
        input.title = Some("Analyst".to_string());
        assert_eq!(score_lead(&input).value(), 10 + 10 + 5);
    }
}
