//! Line grammars for the free-text logs.
//!
//! A [`LineGrammar`] is an ordered list of [`Token`]s describing one log
//! line from start to end. It compiles to an anchored regular expression
//! with one named capture per capturing token, so both free-text logs share
//! a single timestamp definition and each format is testable on its own.
//!
//! # Formats
//!
//! ```text
//! pixel:       <timestamp> - <anything, lazy>: <identity, rest of line>
//! credential:  <timestamp> - <anything>Username: <token><anything>Password: <rest of line>
//! ```
//!
//! Callers trim each line before matching; captures are returned untrimmed.

use crate::error::{Error, Result};
use regex::{Captures, Regex};
use std::collections::HashSet;

/// Pattern for the `YYYY-MM-DD HH:MM:SS` timestamp every log line starts with.
pub const TIMESTAMP_PATTERN: &str = r"[0-9]{4}-[0-9]{2}-[0-9]{2} [0-9]{2}:[0-9]{2}:[0-9]{2}";

/// One element of a line grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Exact text.
    Literal(String),
    /// A named `YYYY-MM-DD HH:MM:SS` capture.
    Timestamp(String),
    /// Any text, as little as possible.
    AnyLazy,
    /// Any text, as much as possible.
    AnyGreedy,
    /// A named capture of one contiguous run of non-space characters.
    Word(String),
    /// A named capture of the remainder of the line.
    Rest { name: String, allow_empty: bool },
}

impl Token {
    fn capture_name(&self) -> Option<&str> {
        match self {
            Token::Timestamp(name) | Token::Word(name) | Token::Rest { name, .. } => {
                Some(name.as_str())
            }
            Token::Literal(_) | Token::AnyLazy | Token::AnyGreedy => None,
        }
    }

    fn to_pattern(&self) -> String {
        match self {
            Token::Literal(text) => regex::escape(text),
            Token::Timestamp(name) => format!("(?P<{}>{})", name, TIMESTAMP_PATTERN),
            Token::AnyLazy => ".*?".to_string(),
            Token::AnyGreedy => ".*".to_string(),
            Token::Word(name) => format!("(?P<{}>[^ ]+)", name),
            Token::Rest { name, allow_empty } => {
                let quant = if *allow_empty { '*' } else { '+' };
                format!("(?P<{}>.{})", name, quant)
            }
        }
    }
}

/// An ordered token description of one log line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineGrammar {
    tokens: Vec<Token>,
}

impl LineGrammar {
    /// Capture holding the line's leading timestamp in the built-in grammars.
    pub const TIMESTAMP: &'static str = "ts";
    /// Capture holding the recipient identity in [`LineGrammar::pixel_open`].
    pub const IDENTITY: &'static str = "id";
    /// Capture holding the username in [`LineGrammar::credential_capture`].
    pub const USERNAME: &'static str = "user";
    /// Capture holding the password in [`LineGrammar::credential_capture`].
    pub const PASSWORD: &'static str = "pwd";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn literal(mut self, text: impl Into<String>) -> Self {
        self.tokens.push(Token::Literal(text.into()));
        self
    }

    pub fn timestamp(mut self, name: impl Into<String>) -> Self {
        self.tokens.push(Token::Timestamp(name.into()));
        self
    }

    pub fn any_lazy(mut self) -> Self {
        self.tokens.push(Token::AnyLazy);
        self
    }

    pub fn any_greedy(mut self) -> Self {
        self.tokens.push(Token::AnyGreedy);
        self
    }

    pub fn word(mut self, name: impl Into<String>) -> Self {
        self.tokens.push(Token::Word(name.into()));
        self
    }

    /// Capture the rest of the line; at least one character.
    pub fn rest(mut self, name: impl Into<String>) -> Self {
        self.tokens.push(Token::Rest {
            name: name.into(),
            allow_empty: false,
        });
        self
    }

    /// Capture the rest of the line; may be empty.
    pub fn rest_or_empty(mut self, name: impl Into<String>) -> Self {
        self.tokens.push(Token::Rest {
            name: name.into(),
            allow_empty: true,
        });
        self
    }

    /// Grammar of the tracking-pixel log.
    ///
    /// The prefix is lazy, so the identity starts after the *first* `": "`
    /// following the separator and runs to the end of the line.
    pub fn pixel_open() -> Self {
        Self::new()
            .timestamp(Self::TIMESTAMP)
            .literal(" - ")
            .any_lazy()
            .literal(": ")
            .rest(Self::IDENTITY)
    }

    /// Grammar of the credential-capture log.
    ///
    /// Field labels are case-sensitive. The prefix before `Username: ` is
    /// greedy, so the last `Username: ` on the line wins.
    pub fn credential_capture() -> Self {
        Self::new()
            .timestamp(Self::TIMESTAMP)
            .literal(" - ")
            .any_greedy()
            .literal("Username: ")
            .word(Self::USERNAME)
            .any_greedy()
            .literal("Password: ")
            .rest_or_empty(Self::PASSWORD)
    }

    /// Compile into an anchored matcher.
    ///
    /// # Errors
    ///
    /// Returns an error if the grammar is empty, names a capture twice, or
    /// uses a capture name the regex engine rejects.
    pub fn compile(&self) -> Result<CompiledGrammar> {
        if self.tokens.is_empty() {
            return Err(Error::EmptyGrammar);
        }

        let mut seen = HashSet::new();
        let mut pattern = String::from("^");
        for token in &self.tokens {
            if let Some(name) = token.capture_name() {
                if !seen.insert(name) {
                    return Err(Error::DuplicateCapture(name.to_string()));
                }
            }
            pattern.push_str(&token.to_pattern());
        }
        pattern.push('$');

        Ok(CompiledGrammar {
            regex: Regex::new(&pattern)?,
        })
    }
}

/// A compiled [`LineGrammar`].
#[derive(Debug, Clone)]
pub struct CompiledGrammar {
    regex: Regex,
}

impl CompiledGrammar {
    /// Match a whole line. `None` means the line does not fit the grammar.
    pub fn match_line<'h>(&self, line: &'h str) -> Option<LineMatch<'h>> {
        self.regex.captures(line).map(|caps| LineMatch { caps })
    }

    /// The generated regular expression.
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }
}

/// Captures from one matched line.
#[derive(Debug)]
pub struct LineMatch<'h> {
    caps: Captures<'h>,
}

impl<'h> LineMatch<'h> {
    pub fn get(&self, name: &str) -> Option<&'h str> {
        self.caps.name(name).map(|m| m.as_str())
    }
}
