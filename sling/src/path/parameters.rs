//! Matrix parameter scanning.
//!
//! A parameter block starts at a `;` and consists of `name=value` pairs
//! separated by further `;` characters. Values may be single-quoted, in
//! which case they can contain any character except the closing quote.
//! The block ends at a `/`, at the end of input, or at a `.` unless dots
//! are allowed inside values.

use super::types::Parameters;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Init,
    Name,
    Equals,
    Value,
    QuotedValue,
    QuoteEnd,
}

/// Scanner for a single `;name=value` parameter block.
///
/// The scanner collects parameters into an ordered map and records whether
/// the block was malformed. It never fails: the caller inspects
/// [`is_invalid`](Self::is_invalid) after [`parse`](Self::parse) returns.
///
/// # Examples
///
/// ```
/// use sling::path::ParametersParser;
///
/// let mut parser = ParametersParser::new();
/// let input = "/a/b;foo=bar;x='1.2'.html";
/// let end = parser.parse(input, 4, false);
///
/// assert!(!parser.is_invalid());
/// assert_eq!(&input[end..], ".html");
/// assert_eq!(parser.parameters().get("foo"), Some("bar"));
/// assert_eq!(parser.parameters().get("x"), Some("1.2"));
/// ```
#[derive(Debug, Default)]
pub struct ParametersParser {
    parameters: Parameters,
    invalid: bool,
}

impl ParametersParser {
    /// Creates a scanner with no collected parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scans a parameter block starting at byte offset `from`.
    ///
    /// `from` must point at the opening `;`. When `dot_allowed` is true an
    /// unquoted value may contain dots; this is used once the extension has
    /// already been seen. Returns the byte offset at which scanning stopped,
    /// which is `input.len()` when the block runs to the end of input.
    pub fn parse(&mut self, input: &str, from: usize, dot_allowed: bool) -> usize {
        let bytes = input.as_bytes();
        let mut state = State::Init;
        let mut name_start = from;
        let mut value_start = from;
        let mut name = "";

        let mut i = from;
        loop {
            // `None` marks the end of input.
            let c = bytes.get(i).copied();
            match state {
                State::Init => match c {
                    Some(b';') => {
                        state = State::Name;
                        name_start = i + 1;
                    }
                    _ => {
                        self.invalid = true;
                        return i;
                    }
                },
                State::Name => match c {
                    Some(b'=' | b';' | b'.' | b'/') | None
                        if i == name_start =>
                    {
                        self.invalid = true;
                        return i;
                    }
                    Some(b'=') => {
                        name = &input[name_start..i];
                        state = State::Equals;
                    }
                    Some(b';') => {
                        self.parameters.insert(&input[name_start..i], "");
                        name_start = i + 1;
                    }
                    Some(b'.' | b'/') | None => {
                        self.parameters.insert(&input[name_start..i], "");
                        return i;
                    }
                    Some(_) => {}
                },
                State::Equals => match c {
                    Some(b'\'') => {
                        state = State::QuotedValue;
                        value_start = i + 1;
                    }
                    Some(b';') => {
                        self.parameters.insert(name, "");
                        state = State::Name;
                        name_start = i + 1;
                    }
                    Some(b'.' | b'/') | None => {
                        self.parameters.insert(name, "");
                        return i;
                    }
                    Some(_) => {
                        state = State::Value;
                        value_start = i;
                    }
                },
                State::Value => match c {
                    Some(b';') => {
                        self.parameters.insert(name, &input[value_start..i]);
                        state = State::Name;
                        name_start = i + 1;
                    }
                    Some(b'.') if !dot_allowed => {
                        self.parameters.insert(name, &input[value_start..i]);
                        return i;
                    }
                    Some(b'/') | None => {
                        self.parameters.insert(name, &input[value_start..i]);
                        return i;
                    }
                    Some(_) => {}
                },
                State::QuotedValue => match c {
                    Some(b'\'') => {
                        self.parameters.insert(name, &input[value_start..i]);
                        state = State::QuoteEnd;
                    }
                    None => {
                        self.invalid = true;
                        return i;
                    }
                    Some(_) => {}
                },
                State::QuoteEnd => match c {
                    Some(b';') => {
                        state = State::Name;
                        name_start = i + 1;
                    }
                    _ => return i,
                },
            }
            i += 1;
        }
    }

    /// Returns `true` if the scanned block was malformed.
    #[must_use]
    pub fn is_invalid(&self) -> bool {
        self.invalid
    }

    /// Returns the parameters collected so far.
    #[must_use]
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Consumes the scanner, returning the collected parameters.
    #[must_use]
    pub fn into_parameters(self) -> Parameters {
        self.parameters
    }
}
