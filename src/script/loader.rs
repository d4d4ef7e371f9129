use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use tracing::info;

/// JSON script layout: either one entry per line or a single block of text.
#[derive(Debug, Deserialize)]
struct ScriptDocument {
    texts: Option<Vec<String>>,
    text: Option<String>,
}

/// Read raw script lines from a text file, or from a `.json` file with a
/// `texts` array or a `text` string.
pub fn load_script(path: &Path) -> Result<Vec<String>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read script file {:?}", path))?;
    if raw.trim().is_empty() {
        bail!("script file {:?} is empty", path);
    }

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let lines = if is_json {
        parse_json_script(&raw).with_context(|| format!("invalid JSON script {:?}", path))?
    } else {
        split_lines(&raw)
    };

    info!(path = ?path, lines = lines.len(), "Loaded script");
    Ok(lines)
}

pub fn parse_json_script(raw: &str) -> Result<Vec<String>> {
    let document: ScriptDocument = serde_json::from_str(raw)?;
    match (document.texts, document.text) {
        (Some(texts), _) => Ok(texts),
        (None, Some(text)) => Ok(split_lines(&text)),
        (None, None) => bail!("expected a \"texts\" array or a \"text\" string"),
    }
}

fn split_lines(raw: &str) -> Vec<String> {
    raw.split('\n').map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn prefers_texts_array() {
        let lines = parse_json_script(r#"{"texts": ["one", "two"], "text": "ignored"}"#).unwrap();
        assert_eq!(lines, vec!["one", "two"]);
    }

    #[test]
    fn splits_single_text_block() {
        let lines = parse_json_script(r#"{"text": "first\nsecond"}"#).unwrap();
        assert_eq!(lines, vec!["first", "second"]);
    }

    #[test]
    fn rejects_json_without_script_fields() {
        assert!(parse_json_script(r#"{"settings": {}}"#).is_err());
    }

    #[test]
    fn loads_plain_text_lines() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "Line one\n\nLine three").unwrap();
        let lines = load_script(file.path()).unwrap();
        assert_eq!(lines, vec!["Line one", "", "Line three"]);
    }

    #[test]
    fn empty_file_is_an_error() {
        let file = NamedTempFile::new().unwrap();
        assert!(load_script(file.path()).is_err());
    }
}
