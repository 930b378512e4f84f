use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use same_file::is_same_file;

use crate::filesystem::{SourceFile, discover_markdown};
use crate::naming::convert_to_wiki_name;
use crate::runtime::ConvertConfig;
use crate::sidebar::write_sidebar;

const PAGE_EXTENSION: &str = ".md";

/// One source file and where it lands in the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyEntry {
    pub source: PathBuf,
    pub relative_path: String,
    pub wiki_name: String,
    pub destination: PathBuf,
}

#[derive(Debug, Clone)]
pub struct ConvertReport {
    pub copied: Vec<CopyEntry>,
    pub sidebar_path: PathBuf,
    pub sidebar_entries: usize,
    pub warnings: Vec<String>,
}

pub fn plan_copies(config: &ConvertConfig, files: &[SourceFile]) -> Vec<CopyEntry> {
    files
        .iter()
        .map(|file| {
            let wiki_name = convert_to_wiki_name(&file.relative_path);
            CopyEntry {
                source: file.path.clone(),
                relative_path: file.relative_path.clone(),
                destination: config
                    .output_dir
                    .join(format!("{wiki_name}{PAGE_EXTENSION}")),
                wiki_name,
            }
        })
        .collect()
}

/// Copies the source bytes verbatim, replacing whatever is at the destination.
/// A source that already is its own destination is left untouched.
pub fn copy_entry(entry: &CopyEntry) -> Result<()> {
    if entry.destination.exists()
        && is_same_file(&entry.source, &entry.destination).with_context(|| {
            format!(
                "failed to compare {} with {}",
                entry.source.display(),
                entry.destination.display()
            )
        })?
    {
        return Ok(());
    }
    fs::copy(&entry.source, &entry.destination).with_context(|| {
        format!(
            "failed to copy {} to {}",
            entry.source.display(),
            entry.destination.display()
        )
    })?;
    Ok(())
}

/// Wiki names produced by more than one source file. The later copy wins.
pub fn collision_warnings(plan: &[CopyEntry]) -> Vec<String> {
    let mut sources_by_name: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for entry in plan {
        sources_by_name
            .entry(entry.wiki_name.as_str())
            .or_default()
            .push(entry.relative_path.as_str());
    }
    sources_by_name
        .into_iter()
        .filter(|(_, sources)| sources.len() > 1)
        .map(|(name, sources)| {
            format!(
                "wiki name `{name}` is produced by {} files ({}); the last one overwrites the others",
                sources.len(),
                sources.join(", ")
            )
        })
        .collect()
}

/// Runs discovery, copies every page and writes the sidebar.
///
/// `on_copied` is called after each successful copy. The first failure aborts
/// the run and leaves earlier copies in place.
pub fn convert<F>(config: &ConvertConfig, mut on_copied: F) -> Result<ConvertReport>
where
    F: FnMut(&CopyEntry),
{
    let files = discover_markdown(&config.input_dir)?;
    let plan = plan_copies(config, &files);

    for entry in &plan {
        copy_entry(entry)?;
        on_copied(entry);
    }

    let wiki_names = plan.iter().map(|entry| entry.wiki_name.clone()).collect();
    let sidebar = write_sidebar(
        &config.output_dir,
        &config.sidebar_file_name,
        wiki_names,
        &config.pinned_pages,
    )?;

    Ok(ConvertReport {
        warnings: collision_warnings(&plan),
        copied: plan,
        sidebar_path: sidebar.path,
        sidebar_entries: sidebar.entries,
    })
}
