use std::fmt;

/// Divides (U+2223) that some models emit in place of table pipes.
const DIVIDES: char = '\u{2223}';

/// Itinerary text kept as context for follow-up questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItineraryResult {
    text: String,
}

impl ItineraryResult {
    /// Builds a result from the agent's content field, cleaning it up for
    /// markdown rendering.
    pub fn from_content(content: &str) -> Self {
        Self {
            text: normalize_markdown(content),
        }
    }

    /// Builds a result from a response that exposed no content; the text is
    /// kept as-is.
    pub fn from_raw(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for ItineraryResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Replaces every `∣` with `|` and collapses runs of three or more newlines
/// to a single blank line. Applying it twice changes nothing.
pub fn normalize_markdown(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut newlines = 0usize;

    for ch in content.chars() {
        if ch == '\n' {
            newlines += 1;
            if newlines <= 2 {
                out.push('\n');
            }
            continue;
        }

        newlines = 0;
        out.push(if ch == DIVIDES { '|' } else { ch });
    }

    out
}
