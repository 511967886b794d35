//! List command implementation.
//!
//! Restores the saved filters, applies the flag edits on top, and prints the
//! matching opportunities.

use chrono::Local;
use gsa_model::{CeilingRange, Opportunity};
use gsa_search::filter::FilterSpec;
use gsa_search::summary::suggest_similar;
use gsa_search::{FacetOptions, ViewMode};
use tracing::debug;

use super::{CommandContext, Result, SessionEnv};
use crate::cli::{ResultArgs, SearchArgs, ViewArg};
use crate::output::{format_opportunities_json, format_opportunities_table, format_opportunity_cards};

/// Options for the list command.
#[derive(Debug)]
pub struct ListOptions<'a> {
    pub search: &'a SearchArgs,
    pub results: &'a ResultArgs,
    /// Layout override.
    pub view: Option<ViewArg>,
}

/// Applies the flag edits to `spec`.
///
/// Multi-valued flags add to the restored selection; single-valued flags
/// replace it. `--reset` clears everything first.
pub fn edit_spec(spec: &mut FilterSpec, args: &SearchArgs) {
    if args.reset {
        spec.clear();
    }
    if let Some(naics) = &args.naics {
        spec.naics = Some(naics.clone());
    }
    for label in &args.set_aside {
        spec.select_set_aside(label);
    }
    if let Some(vehicle) = &args.vehicle {
        spec.vehicle = Some(vehicle.clone());
    }
    for agency in &args.agency {
        spec.select_agency(agency);
    }
    if args.from.is_some() || args.to.is_some() {
        spec.set_date_range(args.from, args.to);
    }
    if let Some(days) = args.within_days {
        spec.set_quick_period(days);
    }
    if let (Some(min), Some(max)) = (args.ceiling_min, args.ceiling_max) {
        spec.ceiling = Some(CeilingRange::new(min, max));
    }
    for keyword in &args.keyword {
        spec.add_keyword(keyword);
    }
}

/// Hints for filter values that match nothing in the dataset.
pub fn unknown_value_hints(args: &SearchArgs, records: &[Opportunity]) -> Vec<String> {
    let facets = FacetOptions::from_opportunities(records);
    let mut hints = Vec::new();

    let mut check = |kind: &str, value: &str, known: Vec<&str>| {
        if value.is_empty() || known.contains(&value) {
            return;
        }
        let hint = match suggest_similar(value, known) {
            Some(s) => format!("No {kind} '{value}' in the dataset. Did you mean '{s}'?"),
            None => format!("No {kind} '{value}' in the dataset."),
        };
        hints.push(hint);
    };

    for agency in &args.agency {
        check("agency", agency, facets.agencies.iter().map(String::as_str).collect());
    }
    for label in &args.set_aside {
        check("set-aside", label, facets.set_asides.iter().map(String::as_str).collect());
    }
    if let Some(vehicle) = &args.vehicle {
        check("vehicle", vehicle, facets.vehicles.iter().map(String::as_str).collect());
    }
    if let Some(naics) = &args.naics {
        check("NAICS code", naics, facets.naics.iter().map(|n| n.code.as_str()).collect());
    }

    hints
}

/// Executes the list command.
///
/// # Errors
///
/// Returns an error if the dataset cannot be loaded or the edited filters
/// fail validation (e.g. an inverted ceiling range).
pub async fn execute(ctx: &CommandContext, opts: &ListOptions<'_>, env: &SessionEnv) -> Result<()> {
    let (_config, session) = env.restore_session()?;

    session.edit_filters(|spec| edit_spec(spec, opts.search));
    session.set_quick_filter(opts.results.quick_filter());
    let count = session.apply().await?;
    session.set_sort(opts.results.sort_config());
    debug!(count, sort = ?session.sort(), "listing results");

    if !ctx.quiet && !ctx.json_output {
        for hint in unknown_value_hints(opts.search, &session.records()) {
            eprintln!("{hint}");
        }
    }

    let results = session.sorted_results();
    let now = Local::now().naive_local();

    if ctx.json_output {
        println!("{}", format_opportunities_json(&results, &session.location(), now)?);
        return Ok(());
    }
    if ctx.quiet {
        return Ok(());
    }

    let view = match opts.view {
        Some(view) => ViewMode::from(view),
        None => session
            .store()
            .map(|store| store.load_view_mode())
            .unwrap_or_default(),
    };
    let output = match view {
        ViewMode::Card => format_opportunity_cards(&results, now, ctx.use_colors),
        ViewMode::Table => format_opportunities_table(&results, now, ctx.use_colors),
    };
    print!("{output}");

    if let Some(quick) = session.quick_filter() {
        println!("\n{} result(s) with quick filter: {}", count, quick.label());
    } else {
        println!("\n{} result(s)", count);
    }

    Ok(())
}
