//! Facets command implementation.
//!
//! Lists the distinct NAICS codes, agencies, vehicles and set-asides in the
//! dataset, or searches agency names.

use gsa_search::FacetOptions;

use super::{CommandContext, Result, SessionEnv};
use crate::output::{format_agency_matches, format_facets, format_facets_json};

/// Executes the facets command.
pub fn execute(ctx: &CommandContext, agency_search: Option<&str>, env: &SessionEnv) -> Result<()> {
    let (_config, session) = env.restore_session()?;
    let records = session.records();
    let facets = FacetOptions::from_opportunities(&records);

    match agency_search {
        Some(query) => {
            let matches = facets.matching_agencies(query);
            if ctx.json_output {
                println!("{}", serde_json::to_string_pretty(&matches)?);
            } else if !ctx.quiet {
                print!("{}", format_agency_matches(&matches));
            }
        }
        None => {
            if ctx.json_output {
                println!("{}", format_facets_json(&facets)?);
            } else if !ctx.quiet {
                print!("{}", format_facets(&facets, ctx.use_colors));
            }
        }
    }
    Ok(())
}
