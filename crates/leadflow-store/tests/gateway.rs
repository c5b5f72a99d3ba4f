use leadflow_core::workflow::{self, OpError};
use leadflow_core::{
    CoreError, DashboardOptions, InteractionKind, InteractionNew, LeadCandidate, LeadFilter,
    LeadGateway, StatusSet, TeamRole,
};
use leadflow_store::repo::TeamMemberNew;
use leadflow_store::Store;

fn store() -> Store {
    let store = Store::open_in_memory().expect("open");
    store.migrate().expect("migrate");
    store
}

#[test]
fn import_ten_rows_with_one_bad_email() {
    let store = store();
    let statuses = StatusSet::standard();
    let mut payload = String::from("First Name,Last Name,Email,Company,Source\n");
    for row in 1..=10 {
        let email = if row == 4 {
            "broken-email".to_string()
        } else {
            format!("person{row}@example.com")
        };
        payload.push_str(&format!("Person{row},Doe,{email},Acme Inc,referral\n"));
    }

    let report = workflow::import_leads(&store, &statuses, payload.as_bytes(), 1_700_000_000)
        .expect("import");
    assert_eq!(report.success, 9);
    assert_eq!(report.failed, 1);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].row, 4);
    assert_eq!(report.failures[0].reason, "invalid email");

    let leads = store.list_leads(&LeadFilter::default()).expect("list");
    assert_eq!(leads.len(), 9);
    assert!(leads.iter().all(|lead| lead.first_name != "Person4"));
    assert!(leads.iter().all(|lead| lead.score.value() > 0));
}

#[test]
fn reimporting_reports_duplicates_per_row() {
    let store = store();
    let statuses = StatusSet::standard();
    let payload = b"first_name,last_name,email\nAda,Lovelace,ada@example.com\n";
    workflow::import_leads(&store, &statuses, payload, 1).expect("first import");
    let report = workflow::import_leads(&store, &statuses, payload, 2).expect("second import");
    assert_eq!(report.success, 0);
    assert_eq!(report.failed, 1);
    assert_eq!(report.failures[0].reason, "email already exists: ada@example.com");
}

#[test]
fn import_checks_assignees_against_the_roster() {
    let store = store();
    let statuses = StatusSet::standard();
    let active = store
        .team()
        .add(TeamMemberNew {
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            email: "grace@team.example".to_string(),
            role: TeamRole::SalesRep,
        })
        .expect("member");
    let retired = store
        .team()
        .add(TeamMemberNew {
            first_name: "Alan".to_string(),
            last_name: "Turing".to_string(),
            email: "alan@team.example".to_string(),
            role: TeamRole::SalesRep,
        })
        .expect("member");
    store.team().set_active(retired.id, false).expect("deactivate");

    let payload = format!(
        "first_name,last_name,email,owner\n\
         Ada,Lovelace,ada@example.com,{}\n\
         Bob,Smith,bob@example.com,{}\n\
         Cy,Young,cy@example.com,77\n",
        active.id, retired.id
    );
    let report = workflow::import_leads(&store, &statuses, payload.as_bytes(), 5).expect("import");
    assert_eq!(report.success, 1);
    assert_eq!(report.failed, 2);
    assert_eq!(report.failures[0].row, 2);
    assert!(report.failures[0].reason.contains("inactive"));
    assert_eq!(report.failures[1].row, 3);
    assert_eq!(report.failures[1].reason, "team member not found: 77");

    let leads = store.list_leads(&LeadFilter::default()).expect("list");
    assert_eq!(leads.len(), 1);
    assert_eq!(leads[0].assigned_to, Some(active.id));
}

#[test]
fn export_then_import_into_a_fresh_store() {
    let source = store();
    let statuses = StatusSet::standard();
    for (first, email) in [("Ada", "ada@example.com"), ("Grace", "grace@example.com")] {
        let candidate = LeadCandidate {
            first_name: Some(first.to_string()),
            last_name: Some("Example".to_string()),
            email: Some(email.to_string()),
            company: Some("Engines, Ltd".to_string()),
            score: Some("77".to_string()),
            ..Default::default()
        };
        workflow::create_lead(&source, &statuses, &candidate, 10).expect("create");
    }
    let bytes = workflow::export_view(&source, &LeadFilter::default()).expect("export");

    let target = store();
    let report = workflow::import_leads(&target, &statuses, &bytes, 20).expect("import");
    assert_eq!(report.success, 2);
    let leads = target.list_leads(&LeadFilter::default()).expect("list");
    assert_eq!(leads[0].company.as_deref(), Some("Engines, Ltd"));
    assert_eq!(leads[1].score.value(), 77);
}

#[test]
fn lifecycle_through_the_store() {
    let store = store();
    let statuses = StatusSet::standard();
    let rep = store
        .team()
        .add(TeamMemberNew {
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            email: "grace@team.example".to_string(),
            role: TeamRole::SalesRep,
        })
        .expect("member");

    let candidate = LeadCandidate {
        first_name: Some("Ada".to_string()),
        last_name: Some("Lovelace".to_string()),
        email: Some("ada@example.com".to_string()),
        ..Default::default()
    };
    let lead = workflow::create_lead(&store, &statuses, &candidate, 100).expect("create");
    workflow::assign_lead(&store, lead.id, rep.id, 110).expect("assign");
    workflow::log_interaction(
        &store,
        lead.id,
        InteractionNew {
            author_id: Some(rep.id),
            kind: InteractionKind::Meeting,
            subject: Some("Kickoff".to_string()),
            content: "Walked through the roadmap".to_string(),
        },
        120,
    )
    .expect("log");
    let (converted, change) =
        workflow::change_status(&store, &statuses, lead.id, "converted", 130).expect("status");
    assert_eq!(change.from.as_str(), "NEW");
    assert_eq!(converted.updated_at, 130);

    let err = workflow::change_status(&store, &statuses, lead.id, "BOGUS", 140).unwrap_err();
    assert!(matches!(err, OpError::Core(CoreError::InvalidStatus(_))));
    assert_eq!(store.get_lead(lead.id).expect("get").updated_at, 130);

    store.team().set_active(rep.id, false).expect("deactivate");
    let err = workflow::assign_lead(&store, lead.id, rep.id, 150).unwrap_err();
    assert!(matches!(err, OpError::Core(CoreError::InactiveAssignee(_))));

    let stats = workflow::dashboard(&store, &statuses, DashboardOptions::default(), None)
        .expect("dashboard");
    assert_eq!(stats.total_leads, 1);
    assert_eq!(stats.conversion_rate, 1.0);
    assert_eq!(stats.recent_activity.len(), 1);
    assert_eq!(stats.recent_activity[0].actor, "Grace Hopper");
    assert_eq!(stats.recent_activity[0].action, "Meeting held: Kickoff");

    store.delete_lead(lead.id).expect("delete");
    assert!(store.get_lead(lead.id).unwrap_err().is_not_found());
}
