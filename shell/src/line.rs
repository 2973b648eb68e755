//! Turning raw input bytes into a normalized command line.

const LINE_END: [char; 3] = ['\n', '\r', '\0'];
const BLANK: [char; 2] = [' ', '\t'];

/// Strip everything from the first line terminator on, then surrounding blanks.
///
/// A nul byte counts as a terminator, so the result never contains one.
/// Normalizing an already normalized string returns it unchanged.
pub fn normalize(line: &str) -> &str {
    let end = line.find(LINE_END).unwrap_or(line.len());
    line[..end].trim_matches(BLANK)
}

/// One line of user input, owned and normalized.
///
/// Tokens borrow from it, so it has to outlive the token sequence of its iteration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    text: String,
}

impl CommandLine {
    /// Build a line from what the input collaborator delivered.
    ///
    /// At most `capacity` bytes are considered; anything after that is dropped,
    /// like a fixed-size read buffer would. Invalid UTF-8 is replaced, not rejected.
    pub fn from_bytes(raw: &[u8], capacity: usize) -> Self {
        let raw = &raw[..raw.len().min(capacity)];
        let text = String::from_utf8_lossy(raw);
        Self {
            text: normalize(&text).to_owned(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
