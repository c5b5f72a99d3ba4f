use leadflow_core::workflow;
use leadflow_core::{filter_leads, parse_filter, LeadNew, Score, StatusSet, TeamMemberId, TeamRole};
use leadflow_store::query::LeadQuery;
use leadflow_store::repo::TeamMemberNew;
use leadflow_store::Store;

fn seeded() -> Store {
    let store = Store::open_in_memory().expect("open");
    store.migrate().expect("migrate");
    let statuses = StatusSet::standard();
    for (first, last) in [("Grace", "Hopper"), ("Alan", "Turing")] {
        store
            .team()
            .add(TeamMemberNew {
                first_name: first.to_string(),
                last_name: last.to_string(),
                email: format!("{}@team.example", first.to_lowercase()),
                role: TeamRole::SalesRep,
            })
            .expect("member");
    }

    let rows = [
        ("Ada", "Lovelace", "ada@engines.example", Some("Analytical Engines"), "QUALIFIED", 92, "referral", Some(1)),
        ("Edsger", "Dijkstra", "edsger@tue.example", Some("Eindhoven Labs"), "NEW", 35, "website", None),
        ("Barbara", "Liskov", "barbara@mit.example", None, "CONTACTED", 71, "linkedin", Some(2)),
        ("Donald", "Knuth", "don@stanford.example", Some("TAOCP 100% Press"), "CONVERTED", 64, "referral", Some(1)),
        ("Frances", "Allen", "fran@ibm.example", Some("IBM"), "LOST", 12, "cold_outreach", None),
        ("Ken", "Thompson", "ken@bell.example", Some("Bell Labs"), "QUALIFIED", 80, "website", Some(2)),
        ("Émile", "Zola", "emile@ens.example", Some("ÉCOLE Normale"), "NEW", 40, "event", None),
    ];
    for (index, (first, last, email, company, status, score, source, assigned)) in
        rows.into_iter().enumerate()
    {
        store
            .leads()
            .create(
                1_700_000_000 + index as i64,
                LeadNew {
                    first_name: first.to_string(),
                    last_name: last.to_string(),
                    email: email.to_string(),
                    phone: None,
                    company: company.map(str::to_string),
                    title: None,
                    status: statuses.parse(status).expect("status"),
                    score: Some(Score::new(score).expect("score")),
                    source: source.to_string(),
                    notes: None,
                    assigned_to: assigned.map(TeamMemberId),
                },
            )
            .expect("create lead");
    }
    store
}

#[test]
fn store_listing_and_in_memory_filters_agree() {
    let store = seeded();
    let statuses = StatusSet::standard();
    let all = store.leads().list_all().expect("list all");
    assert_eq!(all.len(), 7);

    let queries = [
        "",
        "labs",
        "ADA LOVE",
        "100%",
        "école",
        "ÉMILE zola",
        "école status:new",
        "status:qualified",
        "source:referral",
        "assigned:2",
        "score:hot",
        "score:warm",
        "score:cold source:website",
        "score:60..80",
        "score:>=70 assigned:1",
        "score:hot score:<=85",
        "example status:lost",
    ];
    for query in queries {
        let filter = parse_filter(query, &statuses).expect("valid query");
        let from_store: Vec<i64> = workflow::list_leads(&store, &filter)
            .expect("store list")
            .iter()
            .map(|lead| lead.id.get())
            .collect();
        let in_memory: Vec<i64> = filter_leads(&all, &filter)
            .iter()
            .map(|lead| lead.id.get())
            .collect();
        assert_eq!(from_store, in_memory, "query {query:?}");
    }
}

#[test]
fn wildcard_characters_in_text_match_literally() {
    let store = seeded();
    let filter = parse_filter("100%", &StatusSet::standard()).unwrap();
    let leads = workflow::list_leads(&store, &filter).unwrap();
    assert_eq!(leads.len(), 1);
    assert_eq!(leads[0].last_name, "Knuth");
}

#[test]
fn non_ascii_text_matches_regardless_of_case() {
    let store = seeded();
    let statuses = StatusSet::standard();
    for query in ["école", "ÉCOLE", "émile"] {
        let filter = parse_filter(query, &statuses).unwrap();
        let leads = workflow::list_leads(&store, &filter).unwrap();
        let names: Vec<&str> = leads.iter().map(|lead| lead.last_name.as_str()).collect();
        assert_eq!(names, vec!["Zola"], "query {query:?}");
    }
}

#[test]
fn sql_listing_keeps_text_matches_for_the_in_memory_pass() {
    let store = seeded();
    let filter = parse_filter("école status:new", &StatusSet::standard()).unwrap();
    let prefiltered = store.leads().list(&LeadQuery::from_filter(&filter)).unwrap();
    let names: Vec<&str> = prefiltered.iter().map(|lead| lead.last_name.as_str()).collect();
    assert_eq!(names, vec!["Dijkstra", "Zola"]);
}
