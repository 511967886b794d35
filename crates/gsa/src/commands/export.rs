//! Export command implementation.
//!
//! Writes the current result list, in display order, as CSV.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use chrono::Local;
use gsa_model::Opportunity;
use gsa_search::export::{export_to_dir, write_csv};

use super::{CommandContext, Result, SessionEnv};
use crate::cli::ResultArgs;

/// Writes `items` under `target`.
///
/// A directory (or no target) gets a dated file name; anything else is used
/// as the file path.
pub fn write_export(target: Option<&Path>, items: &[&Opportunity]) -> Result<PathBuf> {
    let today = Local::now().date_naive();
    match target {
        None => Ok(export_to_dir(Path::new("."), today, items)?),
        Some(dir) if dir.is_dir() => Ok(export_to_dir(dir, today, items)?),
        Some(path) => {
            let file = File::create(path)?;
            write_csv(BufWriter::new(file), items)?;
            Ok(path.to_path_buf())
        }
    }
}

/// Executes the export command.
pub async fn execute(
    ctx: &CommandContext,
    results: &ResultArgs,
    output: Option<&Path>,
    env: &SessionEnv,
) -> Result<()> {
    let (_config, session) = env.restore_session()?;
    session.set_quick_filter(results.quick_filter());
    session.apply().await?;
    session.set_sort(results.sort_config());

    let items = session.sorted_results();
    let refs: Vec<&Opportunity> = items.iter().collect();
    let path = write_export(output, &refs)?;

    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "rows": refs.len(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        println!("Exported {} opportunities to {}", refs.len(), path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use gsa_model::Status;

    fn opp(title: &str) -> Opportunity {
        Opportunity::new(
            "opp-1",
            title,
            "DHS",
            "541512",
            "GSA MAS",
            NaiveDate::from_ymd_opt(2026, 3, 7).unwrap(),
            Status::Ready,
        )
    }

    #[test]
    fn test_write_export_to_file_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv");
        let item = opp("Cloud Migration");

        let written = write_export(Some(&path), &[&item]).unwrap();

        assert_eq!(written, path);
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("Title,Agency,NAICS"));
        assert!(content.contains("\"Cloud Migration\",\"DHS\""));
    }

    #[test]
    fn test_write_export_to_directory_uses_dated_name() {
        let dir = tempfile::tempdir().unwrap();
        let written = write_export(Some(dir.path()), &[]).unwrap();

        let name = written.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("gsa-applications-"));
        assert!(name.ends_with(".csv"));
        assert_eq!(
            std::fs::read_to_string(&written).unwrap(),
            gsa_search::export::EXPORT_HEADERS.join(",")
        );
    }
}
