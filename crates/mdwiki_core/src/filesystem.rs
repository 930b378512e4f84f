use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result};
use walkdir::WalkDir;

use crate::naming::is_markdown_file_name;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    /// Path below the input root, `/`-separated with a leading `/`.
    pub relative_path: String,
}

/// Recursively collects every regular `*.md` file (case-insensitive) under `root`.
///
/// Entries are visited depth-first, sorted by file name within each directory,
/// so the result is stable for an unchanged tree. Symlinks are never followed
/// and are not treated as files.
pub fn discover_markdown(root: &Path) -> Result<Vec<SourceFile>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
        let entry = entry.with_context(|| format!("failed to walk {}", root.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if !is_markdown_file_name(&name) {
            continue;
        }
        let path = entry.path();
        files.push(SourceFile {
            relative_path: relative_from_root(root, path)?,
            path: path.to_path_buf(),
        });
    }
    Ok(files)
}

fn relative_from_root(root: &Path, path: &Path) -> Result<String> {
    let rel = path.strip_prefix(root).with_context(|| {
        format!(
            "failed to derive relative path from root {} for {}",
            root.display(),
            path.display()
        )
    })?;
    let mut output = String::new();
    for component in rel.components() {
        if let Component::Normal(part) = component {
            output.push('/');
            output.push_str(&part.to_string_lossy());
        }
    }
    Ok(output)
}

pub fn display_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::discover_markdown;
    use tempfile::tempdir;

    fn relative_paths(root: &std::path::Path) -> Vec<String> {
        discover_markdown(root)
            .expect("discover")
            .into_iter()
            .map(|file| file.relative_path)
            .collect()
    }

    #[test]
    fn discovers_markdown_recursively_in_stable_order() {
        let temp = tempdir().expect("tempdir");
        let root = temp.path();
        fs::create_dir_all(root.join("guide").join("deep")).expect("create dirs");
        fs::write(root.join("README.md"), "# root").expect("write readme");
        fs::write(root.join("zeta.MD"), "z").expect("write zeta");
        fs::write(root.join("guide").join("intro.md"), "intro").expect("write intro");
        fs::write(root.join("guide").join("deep").join("notes.Md"), "n").expect("write notes");

        assert_eq!(
            relative_paths(root),
            vec![
                "/README.md",
                "/guide/deep/notes.Md",
                "/guide/intro.md",
                "/zeta.MD",
            ]
        );
        assert_eq!(relative_paths(root), relative_paths(root));
    }

    #[test]
    fn skips_non_markdown_files_and_directories() {
        let temp = tempdir().expect("tempdir");
        let root = temp.path();
        fs::create_dir_all(root.join("assets.md")).expect("create md-named dir");
        fs::write(root.join("logo.png"), [0u8, 1, 2]).expect("write png");
        fs::write(root.join("notes.markdown"), "x").expect("write markdown");
        fs::write(root.join("page.md"), "x").expect("write page");

        assert_eq!(relative_paths(root), vec!["/page.md"]);
    }

    #[test]
    fn records_absolute_source_paths() {
        let temp = tempdir().expect("tempdir");
        let root = temp.path();
        fs::write(root.join("page.md"), "x").expect("write page");

        let files = discover_markdown(root).expect("discover");
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, root.join("page.md"));
    }

    #[cfg(unix)]
    #[test]
    fn symlinks_are_not_followed() {
        let temp = tempdir().expect("tempdir");
        let root = temp.path();
        fs::create_dir_all(root.join("docs")).expect("create docs");
        fs::write(root.join("docs").join("page.md"), "x").expect("write page");
        std::os::unix::fs::symlink(root, root.join("docs").join("loop")).expect("dir symlink");
        std::os::unix::fs::symlink(root.join("docs").join("page.md"), root.join("alias.md"))
            .expect("file symlink");

        assert_eq!(relative_paths(root), vec!["/docs/page.md"]);
    }

    #[test]
    fn missing_root_is_an_error() {
        let temp = tempdir().expect("tempdir");
        let error = discover_markdown(&temp.path().join("missing")).expect_err("must fail");
        assert!(error.to_string().contains("failed to walk"));
    }
}
