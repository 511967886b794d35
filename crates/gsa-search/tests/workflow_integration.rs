//! Multi-step workflows across the session, the store and the export encoder.

use std::time::Duration;

use chrono::{NaiveDate, TimeZone, Utc};
use gsa_model::{Dataset, Status};
use gsa_search::export::{export_to_dir, to_csv_string};
use gsa_search::filter::{FilterSpec, FixedClock, SortConfig, SortDirection, SortField};
use gsa_search::{FilterSource, FixedLatency, Preset, SearchSession, StateStore};
use tempfile::tempdir;

const DATASET: &str = r#"[
    {"id": "a", "title": "Data \"Lake\" Build", "agency": "DOE", "naics": "518210",
     "setAside": ["WOSB"], "vehicle": "OASIS+", "dueDate": "2026-04-01",
     "status": "Ready", "percentComplete": 60, "fitScore": 77, "ceiling": 2500000},
    {"id": "b", "title": "Records Digitization", "agency": "NARA", "naics": "518210",
     "setAside": [], "vehicle": "GSA MAS", "dueDate": "2026-03-01",
     "status": "Draft", "percentComplete": 5, "fitScore": 64}
]"#;

fn session(dir: &std::path::Path) -> SearchSession {
    let now = NaiveDate::from_ymd_opt(2026, 1, 1)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap();
    SearchSession::new(Dataset::from_json(DATASET).unwrap())
        .with_store(StateStore::with_dir(dir))
        .with_clock(FixedClock(now))
}

#[tokio::test]
async fn test_export_two_records_in_sorted_order() {
    let dir = tempdir().unwrap();
    let session = session(dir.path());
    session.start(None).await.unwrap();
    session.set_sort(SortConfig::new(SortField::FitScore, SortDirection::Desc));

    let results = session.sorted_results();
    let refs: Vec<_> = results.iter().collect();
    let csv = to_csv_string(&refs).unwrap();
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[0],
        "Title,Agency,NAICS,Set-Aside,Vehicle,Due Date,Status,% Complete,Fit Score,Ceiling Min,Ceiling Max"
    );
    assert_eq!(
        lines[1],
        r#""Data ""Lake"" Build","DOE","518210","WOSB","OASIS+","Apr 1, 2026","Ready","60","77","2500000","2500000""#
    );
    assert_eq!(
        lines[2],
        r#""Records Digitization","NARA","518210","","GSA MAS","Mar 1, 2026","Draft","5","64","","""#
    );
}

#[tokio::test]
async fn test_export_to_dir_uses_dated_filename() {
    let dir = tempdir().unwrap();
    let session = session(dir.path());
    let results = session.results();
    let refs: Vec<_> = results.iter().collect();

    let date = NaiveDate::from_ymd_opt(2026, 2, 3).unwrap();
    let path = export_to_dir(dir.path(), date, &refs).unwrap();

    assert_eq!(path.file_name().unwrap(), "gsa-applications-2026-02-03.csv");
    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, to_csv_string(&refs).unwrap());
}

#[tokio::test]
async fn test_preset_save_and_load_most_recent() {
    let dir = tempdir().unwrap();
    let store = StateStore::with_dir(dir.path());

    let mut older = FilterSpec::default();
    older.toggle_agency("DOE");
    let mut newer = FilterSpec::default();
    newer.toggle_agency("NARA");

    store.save_preset(Preset::new("newer", newer.clone(), Utc.timestamp_opt(2_000, 0).unwrap()));
    store.save_preset(Preset::new("older", older, Utc.timestamp_opt(1_000, 0).unwrap()));

    let session = session(dir.path());
    let preset = store.last_preset().unwrap().unwrap();
    assert_eq!(preset.name, "newer");

    assert_eq!(session.apply_spec(preset.filters).await.unwrap(), 1);
    assert_eq!(session.filters(), newer);
    assert_eq!(session.results()[0].id, "b");
}

#[tokio::test(start_paused = true)]
async fn test_submit_then_restart_with_shared_query() {
    let dir = tempdir().unwrap();

    let first = session(dir.path()).with_latency(FixedLatency::from_millis(400));
    first.start(None).await.unwrap();
    first.mark_submitted("a").unwrap();

    let mut spec = FilterSpec::default();
    spec.toggle_set_aside("WOSB");
    first.apply_spec(spec).await.unwrap();
    let shared = first.location();
    assert_eq!(shared, "setAside=WOSB");

    let second = session(dir.path()).with_latency(FixedLatency(Duration::ZERO));
    let source = second.start(Some(&shared)).await.unwrap();
    assert_eq!(source, FilterSource::Url);

    let results = second.results();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].status, Status::Submitted);
}
