use serde::{Deserialize, Serialize};

/// A cleaned line of assembly together with its 1-based position in the input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLine {
    pub number: usize,
    pub text: String,
}

impl SourceLine {
    pub fn new(number: usize, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
        }
    }

    /// Number already-cleaned lines 1..=n.
    pub fn numbered<S: AsRef<str>>(lines: &[S]) -> Vec<SourceLine> {
        lines
            .iter()
            .enumerate()
            .map(|(i, l)| SourceLine::new(i + 1, l.as_ref()))
            .collect()
    }
}

/// Strip a `//` comment and surrounding whitespace.
pub fn clean_line(line: &str) -> &str {
    let line = match line.find("//") {
        Some(idx) => &line[..idx],
        None => line,
    };
    line.trim()
}

/// Clean raw program text, dropping lines that end up empty but keeping
/// the original line numbers for diagnostics.
pub fn clean_source(text: &str) -> Vec<SourceLine> {
    text.lines()
        .enumerate()
        .filter_map(|(i, raw)| {
            let s = clean_line(raw);
            (!s.is_empty()).then(|| SourceLine::new(i + 1, s))
        })
        .collect()
}
