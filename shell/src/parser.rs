//! Extraction of `<` / `>` redirections from a token sequence.

use crate::error::ShellError;
use crate::lexer::Tokens;

/// Kind of redirection
///
/// Defines which standard stream of the child a file is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectKind {
    /// Input redirection (`<`): the child reads standard input from an existing file.
    Input,
    /// Output redirection (`>`): the child writes standard output to a file, **truncating** it.
    Output,
}

impl RedirectKind {
    fn from_token(token: &str) -> Option<Self> {
        match token {
            "<" => Some(Self::Input),
            ">" => Some(Self::Output),
            _ => None,
        }
    }

    pub fn operator(self) -> &'static str {
        match self {
            Self::Input => "<",
            Self::Output => ">",
        }
    }
}

/// Where the child's standard streams come from and go to.
///
/// Paths borrow from the same line as the tokens they were taken out of.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RedirectionPlan<'a> {
    pub input: Option<&'a str>,
    pub output: Option<&'a str>,
}

impl RedirectionPlan<'_> {
    pub fn is_empty(&self) -> bool {
        self.input.is_none() && self.output.is_none()
    }
}

/// Remove every operator and its filename from `tokens` and collect them into a plan.
///
/// Scanning is left to right and restarts at the same index after a removal, so the
/// relative order of the remaining tokens is preserved. When a direction appears twice
/// the last occurrence wins. An operator without a following token aborts with
/// [`ShellError::MissingRedirectTarget`].
pub fn extract_redirections<'a>(
    tokens: &mut Tokens<'a>,
) -> Result<RedirectionPlan<'a>, ShellError> {
    let mut plan = RedirectionPlan::default();
    let mut i = 0;
    while i < tokens.len() {
        let Some(kind) = RedirectKind::from_token(tokens[i]) else {
            i += 1;
            continue;
        };
        let Some(&target) = tokens.get(i + 1) else {
            return Err(ShellError::MissingRedirectTarget {
                operator: kind.operator(),
            });
        };
        match kind {
            RedirectKind::Input => plan.input = Some(target),
            RedirectKind::Output => plan.output = Some(target),
        }
        tokens.drain(i..i + 2);
    }
    Ok(plan)
}
