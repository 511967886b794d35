//! Tests for filter evaluation.

use super::*;
use crate::filter::FilterContext;
use chrono::{NaiveDate, NaiveDateTime};
use gsa_model::{Ceiling, CeilingRange, Status};

// ==================== Test Helpers ====================

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn now() -> NaiveDateTime {
    date(2026, 1, 1).and_hms_opt(9, 0, 0).unwrap()
}

fn make_opp(id: &str, agency: &str) -> Opportunity {
    Opportunity::new(
        id,
        format!("Opportunity {id}"),
        agency,
        "541511",
        "GSA MAS",
        date(2026, 3, 1),
        Status::Draft,
    )
}

fn with_set_aside(mut opp: Opportunity, labels: &[&str]) -> Opportunity {
    opp.set_aside = labels.iter().map(|l| l.to_string()).collect();
    opp
}

fn with_ceiling(mut opp: Opportunity, ceiling: Ceiling) -> Opportunity {
    opp.ceiling = Some(ceiling);
    opp
}

fn evaluate(spec: &FilterSpec, items: &[Opportunity]) -> Vec<String> {
    let context = FilterContext::new(now());
    FilterEvaluator::new(spec, &context)
        .filter_items(items)
        .iter()
        .map(|o| o.id.clone())
        .collect()
}

fn sample() -> Vec<Opportunity> {
    vec![
        with_set_aside(make_opp("a", "DHS"), &["8(a)"]),
        with_set_aside(make_opp("b", "DHS"), &["HUBZone"]),
        with_set_aside(make_opp("c", "VA"), &["8(a)", "SDVOSB"]),
        make_opp("d", "GSA"),
    ]
}

// ==================== Identity ====================

#[test]
fn test_identity_spec_matches_everything() {
    let items = sample();
    assert_eq!(evaluate(&FilterSpec::default(), &items), vec!["a", "b", "c", "d"]);
}

#[test]
fn test_empty_input_yields_empty_output() {
    let mut spec = FilterSpec::default();
    spec.toggle_agency("DHS");
    assert!(evaluate(&spec, &[]).is_empty());
}

// ==================== Field Matching ====================

#[test]
fn test_naics_exact_match() {
    let mut items = sample();
    items[1].naics = "541512".to_string();

    let spec = FilterSpec {
        naics: Some("541512".to_string()),
        ..FilterSpec::default()
    };
    assert_eq!(evaluate(&spec, &items), vec!["b"]);

    // Prefixes are not matches.
    let spec = FilterSpec {
        naics: Some("5415".to_string()),
        ..FilterSpec::default()
    };
    assert!(evaluate(&spec, &items).is_empty());
}

#[test]
fn test_vehicle_exact_match() {
    let mut items = sample();
    items[2].vehicle = "SEWP V".to_string();

    let spec = FilterSpec {
        vehicle: Some("SEWP V".to_string()),
        ..FilterSpec::default()
    };
    assert_eq!(evaluate(&spec, &items), vec!["c"]);
}

#[test]
fn test_set_aside_any_of() {
    let items = sample();
    let mut spec = FilterSpec::default();
    spec.toggle_set_aside("SDVOSB");
    spec.toggle_set_aside("HUBZone");
    assert_eq!(evaluate(&spec, &items), vec!["b", "c"]);
}

#[test]
fn test_agency_any_of() {
    let items = sample();
    let mut spec = FilterSpec::default();
    spec.toggle_agency("VA");
    spec.toggle_agency("GSA");
    assert_eq!(evaluate(&spec, &items), vec!["c", "d"]);
}

#[test]
fn test_agency_and_set_aside_combine() {
    let items = sample();
    let mut spec = FilterSpec::default();
    spec.toggle_agency("DHS");
    spec.toggle_set_aside("8(a)");
    assert_eq!(evaluate(&spec, &items), vec!["a"]);
}

#[test]
fn test_adding_constraints_only_narrows() {
    let items = sample();
    let mut spec = FilterSpec::default();
    spec.toggle_set_aside("8(a)");
    let wider = evaluate(&spec, &items);

    spec.toggle_agency("VA");
    let narrower = evaluate(&spec, &items);

    assert!(narrower.iter().all(|id| wider.contains(id)));
    assert_eq!(narrower, vec!["c"]);
}

// ==================== Ceiling ====================

#[test]
fn test_ceiling_single_value_boundaries() {
    let items = vec![
        with_ceiling(make_opp("49", "GSA"), Ceiling::Single(49)),
        with_ceiling(make_opp("50", "GSA"), Ceiling::Single(50)),
        with_ceiling(make_opp("100", "GSA"), Ceiling::Single(100)),
        with_ceiling(make_opp("101", "GSA"), Ceiling::Single(101)),
    ];
    let spec = FilterSpec {
        ceiling: Some(CeilingRange::new(50, 100)),
        ..FilterSpec::default()
    };
    assert_eq!(evaluate(&spec, &items), vec!["50", "100"]);
}

#[test]
fn test_ceiling_range_overlap() {
    let items = vec![
        with_ceiling(make_opp("overlap", "GSA"), Ceiling::Range(CeilingRange::new(0, 60))),
        with_ceiling(make_opp("below", "GSA"), Ceiling::Range(CeilingRange::new(0, 40))),
        with_ceiling(make_opp("covers", "GSA"), Ceiling::Range(CeilingRange::new(0, 1000))),
    ];
    let spec = FilterSpec {
        ceiling: Some(CeilingRange::new(50, 100)),
        ..FilterSpec::default()
    };
    assert_eq!(evaluate(&spec, &items), vec!["overlap", "covers"]);
}

#[test]
fn test_ceiling_absent_on_record_passes() {
    let items = vec![make_opp("none", "GSA")];
    let spec = FilterSpec {
        ceiling: Some(CeilingRange::new(50, 100)),
        ..FilterSpec::default()
    };
    assert_eq!(evaluate(&spec, &items), vec!["none"]);
}

// ==================== Keywords ====================

#[test]
fn test_keywords_case_insensitive_in_title() {
    let mut items = sample();
    items[0].title = "Zero Trust CLOUD Migration".to_string();

    let mut spec = FilterSpec::default();
    spec.add_keyword("cloud");
    assert_eq!(evaluate(&spec, &items), vec!["a"]);
}

#[test]
fn test_keywords_search_description_and_keyword_list() {
    let mut items = sample();
    items[1].description = Some("Cybersecurity operations support".to_string());
    items[3].keywords = Some(vec!["Data Analytics".to_string()]);

    let mut spec = FilterSpec::default();
    spec.add_keyword("CYBER");
    spec.add_keyword("analytics");
    assert_eq!(evaluate(&spec, &items), vec!["b", "d"]);
}

#[test]
fn test_keywords_no_match() {
    let items = sample();
    let mut spec = FilterSpec::default();
    spec.add_keyword("satellite");
    assert!(evaluate(&spec, &items).is_empty());
}

// ==================== Period ====================

#[test]
fn test_range_period_inclusive() {
    let mut items = sample();
    items[0].due_date = date(2026, 2, 1);
    items[1].due_date = date(2026, 2, 28);
    items[2].due_date = date(2026, 3, 1);
    items[3].due_date = date(2026, 1, 31);

    let mut spec = FilterSpec::default();
    spec.set_date_range(Some(date(2026, 2, 1)), Some(date(2026, 2, 28)));
    assert_eq!(evaluate(&spec, &items), vec!["a", "b"]);
}

#[test]
fn test_range_period_open_end() {
    let mut items = sample();
    items[0].due_date = date(2025, 12, 1);

    let mut spec = FilterSpec::default();
    spec.set_date_range(Some(date(2026, 1, 1)), None);
    assert_eq!(evaluate(&spec, &items), vec!["b", "c", "d"]);
}

#[test]
fn test_quick_period_window() {
    let mut items = sample();
    items[0].due_date = date(2026, 1, 15);
    items[1].due_date = date(2026, 1, 1); // due today, before 09:00 now
    items[2].due_date = date(2026, 2, 15);
    items[3].due_date = date(2025, 12, 1);

    let mut spec = FilterSpec::default();
    spec.set_quick_period(30);
    assert_eq!(evaluate(&spec, &items), vec!["a"]);
}

#[test]
fn test_quick_period_zero_days_does_not_constrain() {
    let items = sample();
    let mut spec = FilterSpec::default();
    spec.set_quick_period(0);
    assert_eq!(evaluate(&spec, &items).len(), items.len());
}

#[test]
fn test_quick_period_beyond_calendar_from_query_string() {
    let spec = crate::codec::from_query_string("periodDays=100000000");
    assert_eq!(spec.period, Some(Period::Quick { quick_days: 100_000_000 }));

    let mut past = make_opp("past", "DHS");
    past.due_date = date(2025, 12, 1);
    let context = FilterContext::new(now());
    let evaluator = FilterEvaluator::new(&spec, &context);
    assert!(evaluator.matches(&make_opp("future", "DHS")));
    assert!(!evaluator.matches(&past));
}

// ==================== Evaluator API ====================

#[test]
fn test_matches_single_item() {
    let opp = with_set_aside(make_opp("x", "DHS"), &["8(a)"]);
    let mut spec = FilterSpec::default();
    spec.toggle_agency("VA");

    let context = FilterContext::new(now());
    assert!(!FilterEvaluator::new(&spec, &context).matches(&opp));
    assert!(FilterEvaluator::new(&FilterSpec::default(), &context).matches(&opp));
}
