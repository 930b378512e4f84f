pub const SEGMENT_SEPARATOR: &str = ":-";
pub const HOME_PAGE: &str = "Home";
pub const GETTING_STARTED_PAGE: &str = "Getting-Started";

const MARKDOWN_SUFFIX: &str = ".md";
const README_MARKER: &str = "README";

/// Characters collapsed into a single word boundary before casing.
const WORD_DELIMITERS: &[char] = &[
    ' ', '-', ':', '!', '@', '#', '$', '%', '^', '&', '*', '(', ')',
];

/// Maps a path relative to the input root (e.g. `/guide/getting started.md`)
/// to its flat wiki page name (e.g. `Guide:-Getting-Started`).
///
/// A file whose name contains `README` stands for its parent directory, or for
/// `Home` when it sits at the root.
pub fn convert_to_wiki_name(relative_path: &str) -> String {
    let trimmed = relative_path.trim_start_matches('/');
    let stem = strip_markdown_suffix(trimmed);
    let segments: Vec<&str> = stem.split('/').collect();
    let (file_segment, parents) = match segments.split_last() {
        Some((last, parents)) => (*last, parents),
        None => ("", &[][..]),
    };

    if is_readme(file_segment) {
        if parents.is_empty() {
            return HOME_PAGE.to_string();
        }
        return join_segments(parents);
    }
    join_segments(&segments)
}

/// Normalizes a single path component into a wiki name segment.
///
/// The whole token is uppercased before each piece is recased, so letters
/// whose uppercase form expands (`ß` -> `SS`) come out expanded.
pub fn token_to_wiki_segment(token: &str) -> String {
    let uppercased = token.to_uppercase();
    let mut collapsed = String::with_capacity(uppercased.len());
    let mut in_delimiter_run = false;
    for ch in uppercased.chars() {
        if WORD_DELIMITERS.contains(&ch) {
            if !in_delimiter_run {
                collapsed.push('_');
                in_delimiter_run = true;
            }
            continue;
        }
        in_delimiter_run = false;
        collapsed.push(ch);
    }

    collapsed
        .split('_')
        .map(capitalize_piece)
        .collect::<Vec<_>>()
        .join("-")
}

/// Splits a wiki name back into its segments.
pub fn wiki_name_segments(wiki_name: &str) -> Vec<&str> {
    wiki_name.split(SEGMENT_SEPARATOR).collect()
}

fn join_segments(segments: &[&str]) -> String {
    segments
        .iter()
        .map(|segment| token_to_wiki_segment(segment))
        .collect::<Vec<_>>()
        .join(SEGMENT_SEPARATOR)
}

fn capitalize_piece(piece: &str) -> String {
    let mut chars = piece.chars();
    match chars.next() {
        Some(first) => {
            let mut output: String = first.to_uppercase().collect();
            output.push_str(&chars.as_str().to_lowercase());
            output
        }
        None => String::new(),
    }
}

fn strip_markdown_suffix(value: &str) -> &str {
    let Some(split_at) = value.len().checked_sub(MARKDOWN_SUFFIX.len()) else {
        return value;
    };
    match value.get(split_at..) {
        Some(suffix) if suffix.eq_ignore_ascii_case(MARKDOWN_SUFFIX) => &value[..split_at],
        _ => value,
    }
}

fn is_readme(file_segment: &str) -> bool {
    file_segment.to_ascii_uppercase().contains(README_MARKER)
}

pub(crate) fn is_markdown_file_name(name: &str) -> bool {
    name.to_lowercase().ends_with(MARKDOWN_SUFFIX)
}
