//! Query-string encoding of a filter specification.
//!
//! Each constrained field becomes one parameter; unconstrained fields are
//! omitted. Multi-valued fields are joined with commas.
//!
//! | key | value |
//! |---|---|
//! | `naics` | code |
//! | `setAside` | comma-joined labels |
//! | `vehicle` | name |
//! | `agencies` | comma-joined names |
//! | `periodStart`, `periodEnd` | ISO dates, only when both are set |
//! | `periodDays` | day count, only for quick periods |
//! | `ceilingMin`, `ceilingMax` | integers, always together |
//! | `keywords` | comma-joined keywords |

use std::collections::HashMap;

use chrono::NaiveDate;
use gsa_model::CeilingRange;
use serde::Serialize;
use tracing::debug;

use crate::filter::{FilterSpec, Period};

const SEPARATOR: &str = ",";

/// Borrowed query form, one optional value per key in a fixed order.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryForm<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    naics: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    set_aside: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    vehicle: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    agencies: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    period_start: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    period_end: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    period_days: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ceiling_min: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ceiling_max: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    keywords: Option<String>,
}

fn join(values: &[String]) -> Option<String> {
    if values.is_empty() {
        None
    } else {
        Some(values.join(SEPARATOR))
    }
}

fn split(value: &str) -> Vec<String> {
    value
        .split(SEPARATOR)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

impl<'a> QueryForm<'a> {
    fn from_spec(spec: &'a FilterSpec) -> Self {
        let mut form = QueryForm {
            naics: spec.naics.as_deref().filter(|v| !v.is_empty()),
            set_aside: join(&spec.set_aside),
            vehicle: spec.vehicle.as_deref().filter(|v| !v.is_empty()),
            agencies: join(&spec.agencies),
            keywords: join(&spec.keywords),
            ..QueryForm::default()
        };

        match spec.period {
            Some(Period::Range {
                start_date: Some(start),
                end_date: Some(end),
            }) => {
                form.period_start = Some(start);
                form.period_end = Some(end);
            }
            Some(Period::Quick { quick_days }) if quick_days > 0 => {
                form.period_days = Some(quick_days);
            }
            // Half-open ranges and zero-day windows have no query form.
            _ => {}
        }

        if let Some(ceiling) = spec.ceiling {
            form.ceiling_min = Some(ceiling.min);
            form.ceiling_max = Some(ceiling.max);
        }

        form
    }
}

/// Encodes a filter specification as a query string, without a leading `?`.
///
/// The identity spec encodes to an empty string.
pub fn to_query_string(spec: &FilterSpec) -> String {
    // A flat struct of strings and integers always serializes.
    serde_urlencoded::to_string(QueryForm::from_spec(spec)).unwrap_or_default()
}

/// Decodes a query string into a filter specification.
///
/// A leading `?` is accepted. Unknown keys and values that do not parse are
/// ignored; for repeated keys the first occurrence wins. Input that is not a
/// query string at all decodes to the identity spec.
pub fn from_query_string(query: &str) -> FilterSpec {
    let query = query.strip_prefix('?').unwrap_or(query);

    let pairs: Vec<(String, String)> = match serde_urlencoded::from_str(query) {
        Ok(pairs) => pairs,
        Err(e) => {
            debug!(error = %e, "ignoring undecodable query string");
            return FilterSpec::default();
        }
    };

    let mut params: HashMap<String, String> = HashMap::new();
    for (key, value) in pairs {
        params.entry(key).or_insert(value);
    }
    let get = |key: &str| params.get(key).map(String::as_str).filter(|v| !v.is_empty());

    let mut spec = FilterSpec {
        naics: get("naics").map(str::to_string),
        vehicle: get("vehicle").map(str::to_string),
        ..FilterSpec::default()
    };

    if let Some(value) = get("setAside") {
        spec.set_aside = split(value);
    }
    if let Some(value) = get("agencies") {
        spec.agencies = split(value);
    }
    if let Some(value) = get("keywords") {
        spec.keywords = split(value);
    }

    let start = get("periodStart").and_then(|v| v.parse::<NaiveDate>().ok());
    let end = get("periodEnd").and_then(|v| v.parse::<NaiveDate>().ok());
    let days = get("periodDays").and_then(|v| v.parse::<u32>().ok());
    spec.period = match (start, end, days) {
        (Some(start), Some(end), _) => Some(Period::Range {
            start_date: Some(start),
            end_date: Some(end),
        }),
        (_, _, Some(days)) if days > 0 => Some(Period::Quick { quick_days: days }),
        _ => None,
    };

    let ceiling_min = get("ceilingMin").and_then(|v| v.parse::<i64>().ok());
    let ceiling_max = get("ceilingMax").and_then(|v| v.parse::<i64>().ok());
    if let (Some(min), Some(max)) = (ceiling_min, ceiling_max) {
        spec.ceiling = Some(CeilingRange::new(min, max));
    }

    spec
}

/// Builds a shareable location for a spec: `base?query`, or just `base` when
/// nothing is constrained.
pub fn share_url(base: &str, spec: &FilterSpec) -> String {
    let query = to_query_string(spec);
    if query.is_empty() {
        base.to_string()
    } else {
        format!("{base}?{query}")
    }
}
