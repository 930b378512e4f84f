use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::naming::{GETTING_STARTED_PAGE, HOME_PAGE, wiki_name_segments};

pub const SIDEBAR_FILE_NAME: &str = "_Sidebar.md";

/// Everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )`, the set left alone by
/// URI component encoding.
const WIKI_LINK_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

const INDENT: &str = "  ";

/// Pages pulled to the top of the sidebar, in their final order.
pub fn default_pinned_pages() -> Vec<String> {
    vec![HOME_PAGE.to_string(), GETTING_STARTED_PAGE.to_string()]
}

/// Moves the first occurrence of each pinned page to the front, so the listed
/// pages that exist end up first and in the listed order.
pub fn pin_pages(wiki_names: &mut Vec<String>, pinned: &[String]) {
    for page in pinned.iter().rev() {
        move_front_if_exists(wiki_names, page);
    }
}

fn move_front_if_exists(wiki_names: &mut Vec<String>, page: &str) {
    if let Some(index) = wiki_names.iter().position(|name| name == page) {
        let name = wiki_names.remove(index);
        wiki_names.insert(0, name);
    }
}

/// Renders one sidebar list item, indented two spaces per parent segment.
pub fn render_entry(wiki_name: &str) -> String {
    let segments = wiki_name_segments(wiki_name);
    let depth = segments.len().saturating_sub(1);
    let label = segments.last().copied().unwrap_or("").replace('-', " ");
    format!(
        "{}* [{label}]({})",
        INDENT.repeat(depth),
        encode_wiki_link(wiki_name)
    )
}

pub fn render_sidebar(wiki_names: &[String]) -> String {
    wiki_names
        .iter()
        .map(|name| render_entry(name))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn encode_wiki_link(wiki_name: &str) -> String {
    utf8_percent_encode(wiki_name, WIKI_LINK_ENCODE_SET).to_string()
}

#[derive(Debug, Clone)]
pub struct SidebarReport {
    pub path: PathBuf,
    pub entries: usize,
}

/// Pins, renders and writes the sidebar, replacing any existing file.
pub fn write_sidebar(
    output_dir: &Path,
    file_name: &str,
    mut wiki_names: Vec<String>,
    pinned: &[String],
) -> Result<SidebarReport> {
    pin_pages(&mut wiki_names, pinned);
    let content = render_sidebar(&wiki_names);
    let path = output_dir.join(file_name);
    fs::write(&path, content.as_bytes())
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(SidebarReport {
        path,
        entries: wiki_names.len(),
    })
}
