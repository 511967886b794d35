//! Tests for the search session.

use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime};
use gsa_model::{Ceiling, CeilingRange, Dataset, Opportunity, Status};
use tempfile::tempdir;

use super::*;
use crate::filter::{FixedClock, SortDirection};

// ==================== Test Helpers ====================

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn now() -> NaiveDateTime {
    date(2026, 1, 1).and_hms_opt(8, 0, 0).unwrap()
}

fn make_opp(id: &str, agency: &str, due: NaiveDate, status: Status, fit: i32) -> Opportunity {
    let mut opp = Opportunity::new(id, format!("Title {id}"), agency, "541512", "GSA MAS", due, status);
    opp.fit_score = fit;
    opp
}

fn dataset() -> Dataset {
    let mut dhs = make_opp("dhs-1", "DHS", date(2026, 1, 20), Status::Ready, 90);
    dhs.set_aside = vec!["8(a)".to_string()];
    dhs.percent_complete = 40;
    let mut va = make_opp("va-1", "VA", date(2026, 3, 15), Status::Draft, 60);
    va.percent_complete = 90;
    let mut gsa = make_opp("gsa-1", "GSA", date(2026, 2, 10), Status::Submitted, 82);
    gsa.ceiling = Some(Ceiling::Range(CeilingRange::new(0, 40)));
    gsa.percent_complete = 10;
    Dataset::new(vec![dhs, va, gsa]).unwrap()
}

fn session() -> SearchSession {
    SearchSession::new(dataset()).with_clock(FixedClock(now()))
}

fn ids(items: &[Opportunity]) -> Vec<String> {
    items.iter().map(|o| o.id.clone()).collect()
}

fn agency_spec(agency: &str) -> FilterSpec {
    let mut spec = FilterSpec::default();
    spec.toggle_agency(agency);
    spec
}

// ==================== Apply ====================

#[test]
fn test_new_session_lists_everything() {
    let session = session();
    assert_eq!(ids(&session.results()), vec!["dhs-1", "va-1", "gsa-1"]);
    assert!(session.filters().is_identity());
    assert!(!session.is_applying());
}

#[tokio::test]
async fn test_apply_filters_results_and_updates_location() {
    let session = session();
    session.edit_filters(|f| {
        f.toggle_agency("DHS");
        f.toggle_set_aside("8(a)");
    });

    assert_eq!(session.apply().await.unwrap(), 1);
    assert_eq!(ids(&session.results()), vec!["dhs-1"]);
    assert_eq!(session.location(), "setAside=8%28a%29&agencies=DHS");
}

#[tokio::test]
async fn test_invalid_ceiling_blocks_apply_but_keeps_form() {
    let session = session();
    session.apply_spec(agency_spec("VA")).await.unwrap();

    let mut spec = agency_spec("DHS");
    spec.ceiling = Some(CeilingRange::new(100, 1));
    let err = session.apply_spec(spec.clone()).await.unwrap_err();

    assert!(matches!(
        err,
        SessionError::Filter(FilterError::CeilingInverted { min: 100, max: 1 })
    ));
    assert_eq!(session.filters(), spec);
    assert_eq!(ids(&session.results()), vec!["va-1"]);
    assert_eq!(session.location(), "agencies=VA");
}

#[tokio::test(start_paused = true)]
async fn test_is_applying_during_latency() {
    let session = session().with_latency(FixedLatency::from_millis(300));

    let apply = session.apply();
    tokio::pin!(apply);

    tokio::select! {
        _ = &mut apply => panic!("apply finished before its latency elapsed"),
        _ = tokio::time::sleep(Duration::from_millis(100)) => {}
    }
    assert!(session.is_applying());

    apply.await.unwrap();
    assert!(!session.is_applying());
}

#[tokio::test(start_paused = true)]
async fn test_overlapping_applies_last_completion_wins() {
    // The first apply is slow, the second fast: the first one finishes last
    // and its results overwrite the second's.
    let session = session().with_latency(ScriptedLatency::new([
        Duration::from_millis(500),
        Duration::from_millis(100),
    ]));

    let (first, second) = tokio::join!(
        session.apply_spec(agency_spec("DHS")),
        session.apply_spec(agency_spec("VA")),
    );
    assert_eq!(first.unwrap(), 1);
    assert_eq!(second.unwrap(), 1);

    assert_eq!(ids(&session.results()), vec!["dhs-1"]);
    assert_eq!(session.location(), "agencies=DHS");
    // The form holds the spec issued last.
    assert_eq!(session.filters(), agency_spec("VA"));
}

// ==================== Quick filter ====================

#[tokio::test]
async fn test_toggle_quick_filter_reapplies() {
    let session = session();

    let active = session.toggle_quick_filter(QuickFilter::Due30).await.unwrap();
    assert_eq!(active, Some(QuickFilter::Due30));
    assert_eq!(ids(&session.results()), vec!["dhs-1"]);

    let active = session.toggle_quick_filter(QuickFilter::Fit80).await.unwrap();
    assert_eq!(active, Some(QuickFilter::Fit80));
    assert_eq!(ids(&session.results()), vec!["dhs-1", "gsa-1"]);

    let active = session.toggle_quick_filter(QuickFilter::Fit80).await.unwrap();
    assert_eq!(active, None);
    assert_eq!(session.results().len(), 3);
}

#[tokio::test]
async fn test_quick_filter_narrows_main_filter() {
    let session = session();
    session.set_quick_filter(Some(QuickFilter::Fit80));
    session.apply_spec(agency_spec("VA")).await.unwrap();
    assert!(session.results().is_empty());
}

// ==================== Sorting ====================

#[test]
fn test_sorted_results_follow_sort_config() {
    let session = session();
    assert_eq!(ids(&session.sorted_results()), vec!["dhs-1", "gsa-1", "va-1"]);

    session.toggle_sort(SortField::PercentComplete);
    assert_eq!(ids(&session.sorted_results()), vec!["gsa-1", "dhs-1", "va-1"]);

    let config = session.toggle_sort(SortField::PercentComplete);
    assert_eq!(config.direction, SortDirection::Desc);
    assert_eq!(ids(&session.sorted_results()), vec!["va-1", "dhs-1", "gsa-1"]);

    // Unsorted view keeps dataset order.
    assert_eq!(ids(&session.results()), vec!["dhs-1", "va-1", "gsa-1"]);
}

#[tokio::test]
async fn test_results_over_large_dataset_keep_dataset_order() {
    let agencies = ["DHS", "VA", "GSA", "HHS"];
    let records: Vec<Opportunity> = (0..4_000)
        .map(|i| {
            make_opp(
                &format!("opp-{i}"),
                agencies[i % agencies.len()],
                date(2026, 2, 1),
                Status::Ready,
                70,
            )
        })
        .collect();
    let session = SearchSession::new(Dataset::new(records).unwrap()).with_clock(FixedClock(now()));

    assert_eq!(session.apply_spec(agency_spec("HHS")).await.unwrap(), 1_000);
    let results = session.results();
    assert_eq!(results.len(), 1_000);
    assert_eq!(results[0].id, "opp-3");
    assert_eq!(results[999].id, "opp-3999");
    assert!(results.iter().all(|o| o.agency == "HHS"));

    // Results read the live records, so a status change shows up without re-applying.
    session.mark_submitted("opp-3999").unwrap();
    assert_eq!(session.results()[999].status, Status::Submitted);
    assert_eq!(session.find("opp-3999").unwrap().status, Status::Submitted);
}

// ==================== Status ====================

#[test]
fn test_mark_submitted_updates_results() {
    let session = session();
    let updated = session.mark_submitted("dhs-1").unwrap();
    assert_eq!(updated.status, Status::Submitted);
    assert_eq!(session.results()[0].status, Status::Submitted);
    assert_eq!(session.find("dhs-1").unwrap().status, Status::Submitted);
}

#[test]
fn test_mark_submitted_rejects_non_ready() {
    let session = session();
    let err = session.mark_submitted("va-1").unwrap_err();
    assert!(matches!(
        err,
        SessionError::InvalidTransition {
            from: Status::Draft,
            to: Status::Submitted,
            ..
        }
    ));
    assert_eq!(session.find("va-1").unwrap().status, Status::Draft);
}

#[test]
fn test_find_unknown_suggests_similar_id() {
    let session = session();
    let err = session.find("dhs-2").unwrap_err();
    assert_eq!(
        err.to_string(),
        "opportunity 'dhs-2' not found. Did you mean 'dhs-1'?"
    );
}

// ==================== Persistence ====================

#[tokio::test]
async fn test_apply_persists_filters_for_next_session() {
    let dir = tempdir().unwrap();

    let first = session().with_store(StateStore::with_dir(dir.path()));
    first.apply_spec(agency_spec("GSA")).await.unwrap();

    let second = session().with_store(StateStore::with_dir(dir.path()));
    let source = second.start(None).await.unwrap();
    assert_eq!(source, FilterSource::Storage);
    assert_eq!(ids(&second.results()), vec!["gsa-1"]);
}

#[tokio::test]
async fn test_url_takes_precedence_over_storage() {
    let dir = tempdir().unwrap();
    let store = StateStore::with_dir(dir.path());
    store.save_filters(&agency_spec("GSA"));

    let session = session().with_store(store);
    let source = session.start(Some("agencies=VA")).await.unwrap();
    assert_eq!(source, FilterSource::Url);
    assert_eq!(ids(&session.results()), vec!["va-1"]);
}

#[test]
fn test_restore_drops_inverted_ceiling() {
    let session = session();
    let source = session.restore(Some("agencies=DHS&ceilingMin=9&ceilingMax=1"));
    assert_eq!(source, FilterSource::Url);
    assert_eq!(session.filters().ceiling, None);
    assert_eq!(session.filters().agencies, vec!["DHS"]);
}

#[tokio::test]
async fn test_status_change_survives_restart() {
    let dir = tempdir().unwrap();

    let first = session().with_store(StateStore::with_dir(dir.path()));
    first.mark_submitted("dhs-1").unwrap();

    let second = session().with_store(StateStore::with_dir(dir.path()));
    second.start(None).await.unwrap();
    assert_eq!(second.find("dhs-1").unwrap().status, Status::Submitted);
}
