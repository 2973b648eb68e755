//! Splitting a normalized line into whitespace-delimited tokens.

/// Ordered views into a [`CommandLine`](crate::line::CommandLine). Token 0 is the program name.
pub type Tokens<'a> = Vec<&'a str>;

/// Split `line` on runs of spaces and tabs.
///
/// Empty tokens are never produced. Only the first `max_tokens` tokens are kept;
/// the rest of the line is dropped silently.
pub fn split_into_tokens(line: &str, max_tokens: usize) -> Tokens<'_> {
    line.split([' ', '\t'])
        .filter(|token| !token.is_empty())
        .take(max_tokens)
        .collect()
}
