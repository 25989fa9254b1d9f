//! Command implementations.

use std::borrow::Cow;
use std::io::Read;

use anyhow::Context;
use camino::Utf8Path;
use seo_lint_core::config::{DensityProfile, Thresholds};
use seo_lint_core::{Document, check_input_size};

pub mod analyze;
pub mod density;
pub mod info;
#[cfg(feature = "mcp")]
pub mod serve;
pub mod suggest;

/// Path argument that means "read standard input".
pub const STDIN_PATH: &str = "-";

/// Read a file (or stdin for `-`) and validate its size against the configured limit.
pub fn read_input_file(path: &Utf8Path, max_bytes: Option<usize>) -> anyhow::Result<String> {
    if path.as_str() == STDIN_PATH {
        return read_stdin(max_bytes);
    }

    // Preflight: check file size via metadata before reading into memory.
    let metadata =
        std::fs::metadata(path.as_std_path()).with_context(|| format!("failed to read {path}"))?;
    check_input_size(usize::try_from(metadata.len()).unwrap_or(usize::MAX), max_bytes)
        .with_context(|| format!("refusing to read {path}"))?;

    let content = std::fs::read_to_string(path.as_std_path())
        .with_context(|| format!("failed to read {path}"))?;
    Ok(content)
}

fn read_stdin(max_bytes: Option<usize>) -> anyhow::Result<String> {
    read_limited(std::io::stdin().lock(), max_bytes).context("refusing to read standard input")
}

/// Read all of `reader`, failing once more than `max_bytes` arrive.
fn read_limited(reader: impl Read, max_bytes: Option<usize>) -> anyhow::Result<String> {
    let mut content = String::new();
    match max_bytes {
        // One byte past the limit is enough to know it was exceeded.
        Some(max) => reader
            .take(u64::try_from(max).unwrap_or(u64::MAX).saturating_add(1))
            .read_to_string(&mut content)
            .context("failed to read standard input")?,
        None => {
            let mut reader = reader;
            reader
                .read_to_string(&mut content)
                .context("failed to read standard input")?
        }
    };
    check_input_size(content.len(), max_bytes)?;
    Ok(content)
}

/// Parse input as HTML, or as plain text when the file ends in `.txt`.
pub fn parse_document(path: &Utf8Path, content: &str) -> Document {
    if path.extension() == Some("txt") {
        Document::from_plain_text(content)
    } else {
        Document::parse(content)
    }
}

/// Input as HTML for the markup-level passes. A `.txt` file becomes one
/// escaped `<p>` per blank-line-separated block, so markup-looking text in it
/// stays text.
pub fn html_source<'a>(path: &Utf8Path, content: &'a str) -> Cow<'a, str> {
    if path.extension() != Some("txt") {
        return Cow::Borrowed(content);
    }
    let html = Document::from_plain_text(content)
        .paragraphs
        .iter()
        .map(|paragraph| format!("<p>{}</p>", escape_text(paragraph)))
        .collect::<String>();
    Cow::Owned(html)
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Configured thresholds with an optional `--profile` override applied.
pub fn effective_thresholds(config: &Thresholds, profile: Option<DensityProfile>) -> Thresholds {
    let mut thresholds = config.clone();
    if let Some(profile) = profile {
        thresholds.density_profile = profile;
        thresholds.max_keyword_density = None;
    }
    thresholds
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;

    #[test]
    fn reads_file_within_limit() {
        let tmp = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::try_from(tmp.path().join("post.html")).unwrap();
        std::fs::write(&path, "<p>hello</p>").unwrap();
        assert_eq!(read_input_file(&path, Some(100)).unwrap(), "<p>hello</p>");
    }

    #[test]
    fn rejects_file_over_limit() {
        let tmp = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::try_from(tmp.path().join("post.html")).unwrap();
        std::fs::write(&path, "<p>hello</p>").unwrap();
        let err = read_input_file(&path, Some(4)).unwrap_err();
        assert!(format!("{err:#}").contains("input too large"));
    }

    #[test]
    fn limited_reader_enforces_limit() {
        let input = std::io::Cursor::new("<p>hello</p>");
        assert_eq!(read_limited(input, Some(12)).unwrap(), "<p>hello</p>");

        let input = std::io::Cursor::new("<p>hello</p>");
        let err = read_limited(input, Some(4)).unwrap_err();
        assert!(format!("{err:#}").contains("input too large"));
    }

    #[test]
    fn limited_reader_accepts_the_largest_limit() {
        let input = std::io::Cursor::new("<p>hello</p>");
        assert_eq!(read_limited(input, Some(usize::MAX)).unwrap(), "<p>hello</p>");
        let input = std::io::Cursor::new("<p>hello</p>");
        assert_eq!(read_limited(input, None).unwrap(), "<p>hello</p>");
    }

    #[test]
    fn txt_files_are_plain_text() {
        let doc = parse_document(Utf8Path::new("notes.txt"), "<b>not markup</b>\n\nsecond");
        assert_eq!(doc.paragraphs.len(), 2);
        assert!(doc.plain_text.contains("<b>"));

        let doc = parse_document(Utf8Path::new("post.html"), "<b>markup</b>");
        assert_eq!(doc.plain_text, "markup");
    }

    #[test]
    fn txt_files_become_escaped_paragraphs() {
        let html = html_source(
            Utf8Path::new("notes.txt"),
            "<h2>Garden</h2> & care\n\nSecond block",
        );
        assert_eq!(
            html,
            "<p>&lt;h2&gt;Garden&lt;/h2&gt; &amp; care</p><p>Second block</p>"
        );
        assert_eq!(html_source(Utf8Path::new("post.html"), "<h2>x</h2>"), "<h2>x</h2>");
    }

    #[test]
    fn profile_override_clears_explicit_max() {
        let config = Thresholds {
            max_keyword_density: Some(5.0),
            ..Thresholds::default()
        };
        let t = effective_thresholds(&config, Some(DensityProfile::Strict));
        assert_eq!(t.max_keyword_density(), 2.5);
        let t = effective_thresholds(&config, None);
        assert_eq!(t.max_keyword_density(), 5.0);
    }
}
