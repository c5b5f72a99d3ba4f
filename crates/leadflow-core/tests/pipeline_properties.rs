use leadflow_core::{
    bucket, color_class, filter_leads, parse_filter, CoreError, Lead, LeadId, LeadStatus,
    Score, ScoreBucket, StatusSet, TeamMemberId,
};

fn population() -> Vec<Lead> {
    let sources = ["website", "referral", "linkedin"];
    let statuses = ["NEW", "CONTACTED", "QUALIFIED", "CONVERTED", "LOST"];
    let companies = [Some("Acme Corp"), None, Some("Globex"), Some("Initech")];
    (0..40)
        .map(|index: i64| Lead {
            id: LeadId(index + 1),
            first_name: format!("Lead{index}"),
            last_name: if index % 2 == 0 { "Smith" } else { "Jones" }.to_string(),
            email: format!("lead{index}@example.com"),
            phone: None,
            company: companies[index as usize % companies.len()].map(str::to_string),
            title: None,
            status: LeadStatus::from_stored(statuses[index as usize % statuses.len()]),
            score: Score::new((index * 37) % 101).unwrap(),
            source: sources[index as usize % sources.len()].to_string(),
            notes: None,
            assigned_to: (index % 3 == 0).then_some(TeamMemberId(index % 2 + 1)),
            created_at: 1_700_000_000 + index,
            updated_at: 1_700_000_000 + index,
            interactions: Vec::new(),
        })
        .collect()
}

#[test]
fn buckets_cover_every_score_exactly_once() {
    for value in 0..=100 {
        let found = bucket(value).expect("in range");
        let (low, high) = found.range();
        assert!((low as i64..=high as i64).contains(&value));
        let owners = [ScoreBucket::Hot, ScoreBucket::Warm, ScoreBucket::Cold]
            .iter()
            .filter(|candidate| {
                let (low, high) = candidate.range();
                (low as i64..=high as i64).contains(&value)
            })
            .count();
        assert_eq!(owners, 1, "score {value}");
        assert!(color_class(value).is_ok());
    }
    assert_eq!(bucket(-1), Err(CoreError::InvalidScore(-1)));
    assert_eq!(color_class(101), Err(CoreError::InvalidScore(101)));
}

#[test]
fn parsed_filters_are_idempotent_and_order_preserving() {
    let statuses = StatusSet::standard();
    let leads = population();
    let queries = [
        "",
        "smith",
        "ACME",
        "status:qualified",
        "score:hot",
        "score:warm source:referral",
        "score:20..70 jones",
        "assigned:1 score:>=30",
        "lead1 status:new score:<=90",
    ];

    for query in queries {
        let filter = parse_filter(query, &statuses).expect("valid query");
        let once = filter_leads(&leads, &filter);
        let twice = filter_leads(&once, &filter);
        assert_eq!(once, twice, "query {query:?}");

        let ids: Vec<i64> = once.iter().map(|lead| lead.id.get()).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted, "query {query:?} reordered leads");
    }
}

#[test]
fn empty_filter_returns_input_unchanged() {
    let leads = population();
    let filter = parse_filter("   ", &StatusSet::standard()).unwrap();
    assert_eq!(filter_leads(&leads, &filter), leads);
}
