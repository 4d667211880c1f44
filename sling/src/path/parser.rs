//! Request path parsing.
//!
//! Splits a raw request path into the path handed to resource providers and
//! the matrix parameters embedded in it. Parameters may appear either before
//! the extension (`/a/b;foo=bar.html`) or after it (`/a/b.html;foo=bar`);
//! in both cases the parameter block is cut out of the returned path.

use super::parameters::ParametersParser;
use super::types::{Parameters, ParsedPath};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum State {
    #[default]
    Init,
    ParsedParamsWaitingForExtension,
    ParsedParamsParsingExtension,
    ParsingExtensionNoParams,
    ParsedExtensionAndParams,
    Suffix,
    Invalid,
}

/// Parser separating matrix parameters from a request path.
///
/// Parsing never fails. A malformed parameter block makes the parser return
/// the input unchanged with no parameters.
///
/// # Examples
///
/// ```
/// use sling::PathParser;
///
/// let parsed = PathParser::parse("/a/b.html;foo=bar/suffix");
/// assert_eq!(parsed.path(), "/a/b.html/suffix");
/// assert_eq!(parsed.parameters().get("foo"), Some("bar"));
///
/// let parsed = PathParser::parse("/a.;x");
/// assert_eq!(parsed.path(), "/a.;x");
/// assert!(parsed.parameters().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct PathParser {
    state: State,
    params_start: Option<usize>,
    params_end: Option<usize>,
    parameters: Parameters,
}

impl PathParser {
    /// Parses a raw request path.
    #[must_use]
    pub fn parse(raw_path: &str) -> ParsedPath {
        let mut parser = Self::default();
        parser.run(raw_path);
        parser.finish(raw_path)
    }

    fn run(&mut self, input: &str) {
        let bytes = input.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            let c = bytes[i];
            let next = match (self.state, c) {
                (State::Init, b'.') => State::ParsingExtensionNoParams,
                (State::Init, b';') => {
                    match self.delegate(input, i, false, State::ParsedParamsWaitingForExtension) {
                        Some(end) => {
                            i = end;
                            continue;
                        }
                        None => State::Invalid,
                    }
                }
                (State::ParsingExtensionNoParams, b'/')
                | (State::ParsedExtensionAndParams, b'/')
                | (State::ParsedParamsParsingExtension, b'/') => State::Suffix,
                (State::ParsingExtensionNoParams, b';') => {
                    // An empty extension cannot carry parameters.
                    if bytes[i - 1] == b'.' {
                        State::Invalid
                    } else {
                        match self.delegate(input, i, true, State::ParsedExtensionAndParams) {
                            Some(end) => {
                                i = end;
                                continue;
                            }
                            None => State::Invalid,
                        }
                    }
                }
                (State::ParsedParamsWaitingForExtension, b'.') => {
                    State::ParsedParamsParsingExtension
                }
                (State::ParsedParamsWaitingForExtension, b'/' | b';')
                | (State::ParsedParamsParsingExtension, b';')
                | (State::ParsedExtensionAndParams, b'.' | b';') => State::Invalid,
                (State::Suffix | State::Invalid, _) => break,
                (state, _) => state,
            };
            self.state = next;
            i += 1;
        }
    }

    /// Runs the parameter scanner at `from`, recording the consumed span.
    ///
    /// Returns the offset to continue from, or `None` if the block was
    /// malformed.
    fn delegate(
        &mut self,
        input: &str,
        from: usize,
        dot_allowed: bool,
        on_success: State,
    ) -> Option<usize> {
        let mut scanner = ParametersParser::new();
        let end = scanner.parse(input, from, dot_allowed);
        if scanner.is_invalid() {
            return None;
        }
        self.params_start = Some(from);
        self.params_end = Some(end);
        self.parameters = scanner.into_parameters();
        self.state = on_success;
        Some(end)
    }

    fn finish(mut self, input: &str) -> ParsedPath {
        if self.state == State::Invalid {
            self.parameters.clear();
            self.params_start = None;
            self.params_end = None;
        }
        let path = match (self.params_start, self.params_end) {
            (Some(start), Some(end)) => format!("{}{}", &input[..start], &input[end..]),
            _ => input.to_string(),
        };
        ParsedPath::new(path, self.parameters)
    }
}
