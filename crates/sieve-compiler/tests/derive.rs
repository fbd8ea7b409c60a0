//! Tests for `#[derive(Filter)]` and `#[derive(Model)]`.

use chrono::{DateTime, TimeZone, Utc};
use sieve_compiler::{
    Case, DateOp, FieldKind, FieldPredicate, FieldTest, Filter, FilterValue, Logic, Model, Paging,
    Predicate, TextMatch, Timestamp, Value,
};

#[derive(Debug, Clone, PartialEq, sieve_macros::Model)]
struct Ticket {
    title: String,
    #[model(rename = "labels")]
    tags: Vec<String>,
    opened_at: DateTime<Utc>,
    closed_at: Option<DateTime<Utc>>,
    assignee: Option<String>,
    priority: u8,
    done: bool,
    r#type: String,
    #[model(skip)]
    #[allow(dead_code)]
    cache: std::collections::HashMap<String, String>,
}

#[derive(Debug, Clone, Default, sieve_macros::Filter)]
#[filter(model = Ticket)]
struct TicketFilter {
    #[filter(case = "insensitive", method = "contains")]
    title: Option<String>,

    #[filter(target = "labels", logic = "or")]
    tags: Option<Vec<String>>,

    #[filter(target = "opened_at", op = ">=")]
    opened_since: Option<DateTime<Utc>>,

    #[filter(target = "assignee", skip_synthesis)]
    assignees: Option<Vec<String>>,

    #[filter(ignore_if_empty = false)]
    r#type: Option<String>,

    #[filter(paging)]
    paging: Paging,

    #[allow(dead_code)]
    note: Option<String>,
}

fn ticket(title: &str, tags: &[&str], opened: i64, assignee: Option<&str>) -> Ticket {
    Ticket {
        title: title.into(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        opened_at: Utc.timestamp_opt(opened, 0).unwrap(),
        closed_at: None,
        assignee: assignee.map(Into::into),
        priority: 1,
        done: false,
        r#type: "bug".into(),
        cache: Default::default(),
    }
}

#[test]
fn model_constants() {
    assert_eq!(Ticket::TITLE, "title");
    assert_eq!(Ticket::LABELS, "labels");
    assert_eq!(Ticket::OPENED_AT, "opened_at");
    assert_eq!(Ticket::TYPE, "type");
}

#[test]
fn model_kinds() {
    assert_eq!(Ticket::field_kind("title"), Some(FieldKind::Text));
    assert_eq!(Ticket::field_kind("labels"), Some(FieldKind::TextList));
    assert_eq!(Ticket::field_kind("opened_at"), Some(FieldKind::Date));
    assert_eq!(Ticket::field_kind("closed_at"), Some(FieldKind::OptionalDate));
    assert_eq!(Ticket::field_kind("assignee"), Some(FieldKind::Text));
    assert_eq!(Ticket::field_kind("priority"), Some(FieldKind::Number));
    assert_eq!(Ticket::field_kind("done"), Some(FieldKind::Bool));
    assert_eq!(Ticket::field_kind("type"), Some(FieldKind::Text));

    // Renamed and skipped fields
    assert_eq!(Ticket::field_kind("tags"), None);
    assert_eq!(Ticket::field_kind("cache"), None);
}

#[test]
fn model_values() {
    let t = ticket("Crash on start", &["ui"], 60, None);
    assert_eq!(t.field_value("title"), Value::Text("Crash on start"));
    assert_eq!(t.field_value("opened_at"), Value::Date(Timestamp::from_secs(60)));
    assert_eq!(t.field_value("closed_at"), Value::OptionalDate(None));
    assert_eq!(t.field_value("assignee"), Value::None);
    assert_eq!(t.field_value("done"), Value::Bool(false));
    assert_eq!(t.field_value("missing"), Value::None);
}

#[test]
fn filter_table_follows_declaration_order() {
    let names: Vec<_> = TicketFilter::FIELDS.iter().map(|f| f.name).collect();
    assert_eq!(names, ["title", "tags", "opened_since", "assignees", "type"]);

    let kinds: Vec<_> = TicketFilter::FIELDS.iter().map(|f| f.kind).collect();
    assert_eq!(
        kinds,
        [
            FieldKind::Text,
            FieldKind::TextList,
            FieldKind::OptionalDate,
            FieldKind::TextList,
            FieldKind::Text,
        ]
    );
}

#[test]
fn filter_table_carries_rules() {
    let [title, tags, opened, assignees, kind] = TicketFilter::FIELDS else {
        panic!("unexpected table length");
    };

    assert_eq!(title.meta.case, Case::Insensitive);
    assert_eq!(title.meta.text_match, TextMatch::Contains);
    assert_eq!(title.target_name(), "title");

    assert_eq!(tags.target_name(), "labels");
    assert_eq!(tags.meta.logic, Logic::Or);

    assert_eq!(opened.meta.date_op, DateOp::GreaterThanOrEqual);
    assert_eq!(opened.target_name(), "opened_at");

    assert!(assignees.meta.skip_synthesis);
    assert!(assignees.meta.ignore_if_empty);

    assert!(!kind.meta.ignore_if_empty);
    assert_eq!(kind.meta.logic, Logic::And);
}

#[test]
fn filter_values_and_paging() {
    let filter = TicketFilter {
        title: Some("crash".into()),
        paging: Paging::new(20, 10),
        note: Some("not annotated".into()),
        ..Default::default()
    };

    assert_eq!(filter.filter_value("title"), FilterValue::Text(Some("crash")));
    assert_eq!(filter.filter_value("tags"), FilterValue::TextList(None));
    assert_eq!(filter.filter_value("opened_since"), FilterValue::Date(None));
    assert_eq!(filter.filter_value("note"), FilterValue::None);
    assert_eq!(filter.paging(), Paging::new(20, 10));
}

#[test]
fn derived_filter_synthesizes() {
    let filter = TicketFilter {
        title: Some("CRASH".into()),
        tags: Some(vec!["urgent".into()]),
        opened_since: Some(Utc.timestamp_opt(100, 0).unwrap()),
        ..Default::default()
    };
    let tickets = vec![
        ticket("Crash on start", &[], 50, None),
        ticket("Typo", &["urgent"], 200, None),
        ticket("Crash on exit", &[], 200, None),
        ticket("Typo", &["urgent"], 50, None),
    ];

    let predicate = filter.compile().unwrap().synthesize_default().unwrap().unwrap();

    // (title OR labels) AND 100 >= opened_at
    let matched: Vec<_> = predicate.filter(&tickets).into_iter().map(|t| t.opened_at.timestamp()).collect();
    assert_eq!(matched, [50, 50]);
}

#[test]
fn skipped_fields_compose_manually() {
    let filter = TicketFilter {
        title: Some("crash".into()),
        assignees: Some(vec!["ana".into(), "bo".into()]),
        ..Default::default()
    };
    let compiler = filter.compile().unwrap();
    let synthesized = compiler.synthesize_default().unwrap().unwrap();
    assert_eq!(synthesized.expr().fields().len(), 1);

    let assignees = compiler.filter().assignees.as_deref().unwrap_or_default();
    let manual: Predicate<Ticket> = Predicate::from_field(FieldPredicate::new(
        Ticket::ASSIGNEE,
        FieldTest::one_of(assignees, Case::Sensitive),
    ));
    let predicate = synthesized.and(manual);

    let tickets = vec![
        ticket("Crash", &[], 0, Some("ana")),
        ticket("Crash", &[], 0, Some("cy")),
        ticket("Crash", &[], 0, None),
    ];
    assert_eq!(predicate.filter(&tickets), vec![&tickets[0]]);
}

#[test]
fn empty_text_kept_when_not_ignored() {
    let filter = TicketFilter {
        r#type: Some(String::new()),
        ..Default::default()
    };
    let compiler = filter.compile().unwrap();
    assert!(compiler.has_any());

    let predicate = compiler.synthesize_default().unwrap().unwrap();
    assert_eq!(predicate.count(&[ticket("x", &[], 0, None)]), 0);
}

#[test]
fn fingerprint_includes_skipped_fields() {
    let a = TicketFilter {
        assignees: Some(vec!["ana".into()]),
        ..Default::default()
    };
    let b = TicketFilter::default();
    assert_ne!(
        a.compile().unwrap().fingerprint(),
        b.compile().unwrap().fingerprint()
    );
}
