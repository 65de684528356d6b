//! # Setup-file reader
//!
//! Recovers the `KEY = value` assignments of an `mkspk` setup file, as written by
//! [`write_setup_file`](crate::setup::writer::write_setup_file) or edited by hand.
//!
//! ## Grammar
//! -----------------
//! Each assignment line is parsed with `nom` rather than sliced at fixed columns,
//! so any amount of blank space around the key, the `=` and the value is accepted:
//!
//! ```text
//! line   := space* KEY space* '=' space* value space*
//! KEY    := [A-Za-z0-9_]+
//! value  := quoted | list | bare
//! quoted := "'" ( "''" | [^'] )* "'"
//! list   := '(' space* item ( (space* ',' space* | space+) item )* space* ')'
//! bare   := [^ \t'(] [^ \t]*
//! ```
//!
//! ## Sections
//! -----------------
//! Lines starting with `\begin` switch between the `\begindata` and `\begintext`
//! sections and are not returned.
//!
//! * Before the first marker, any non-blank line is rejected ([`ParseSetupError::OutsideSection`]).
//! * In a data section, a non-blank line that is not an assignment is rejected.
//! * In a text section, assignments are collected (e.g. `EARLIEST_EPOCH`) and any
//!   other line is free commentary.
//!
//! ## Result
//! -----------------
//! [`SetupEntries`] keeps the keys in file order. When a key appears twice the last
//! value wins and the key keeps the position of its first occurrence. Values keep
//! their literal text ([`SetupEntry::raw`]); turning them back into a typed
//! [`KernelSetupConfig`](crate::setup::config::KernelSetupConfig) is left to the caller.
use camino::Utf8Path;
use nom::{
    branch::alt,
    bytes::complete::{is_not, tag, take_till1, take_while1},
    character::complete::{char, space0, space1},
    combinator::{consumed, eof, map, recognize, value, verify},
    multi::{many0, separated_list0},
    sequence::{delimited, preceded},
    IResult, Parser,
};

use crate::{
    constants::{BEGIN_DATA, SECTION_TOKEN},
    mkspk_errors::{MkspkError, ParseSetupError},
};

/// Section of the setup file an entry was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Data,
    Text,
}

/// A parsed value, quotes removed and `''` unescaped.
#[derive(Debug, Clone, PartialEq)]
pub enum SetupValue {
    Quoted(String),
    List(Vec<String>),
    Bare(String),
}

impl SetupValue {
    /// The text of a quoted or bare value; `None` for a list.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            SetupValue::Quoted(s) | SetupValue::Bare(s) => Some(s),
            SetupValue::List(_) => None,
        }
    }

    /// A bare value parsed as an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            SetupValue::Bare(s) => s.parse().ok(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SetupEntry {
    pub key: String,
    /// Literal text of the value as found in the file, quotes included
    pub raw: String,
    pub value: SetupValue,
    pub section: Section,
}

/// Ordered collection of the assignments of a setup file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SetupEntries {
    entries: Vec<SetupEntry>,
}

impl SetupEntries {
    fn insert(&mut self, entry: SetupEntry) {
        match self.entries.iter_mut().find(|e| e.key == entry.key) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    pub fn get(&self, key: &str) -> Option<&SetupEntry> {
        self.entries.iter().find(|e| e.key == key)
    }

    /// Literal value text of `key`.
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.get(key).map(|e| e.raw.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SetupEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a SetupEntries {
    type Item = &'a SetupEntry;
    type IntoIter = std::slice::Iter<'a, SetupEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

fn parse_key(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_ascii_alphanumeric() || c == '_').parse(input)
}

fn parse_quoted(input: &str) -> IResult<&str, String> {
    map(
        delimited(
            char('\''),
            many0(alt((value("'", tag("''")), is_not("'")))),
            char('\''),
        ),
        |parts: Vec<&str>| parts.concat(),
    )
    .parse(input)
}

fn parse_list(input: &str) -> IResult<&str, Vec<String>> {
    let item = alt((parse_quoted, map(is_not(" \t,()'"), String::from)));
    let separator = alt((recognize((space0, char(','), space0)), space1));
    delimited(
        (char('('), space0),
        separated_list0(separator, item),
        (space0, char(')')),
    )
    .parse(input)
}

fn parse_value(input: &str) -> IResult<&str, SetupValue> {
    alt((
        map(parse_quoted, SetupValue::Quoted),
        map(parse_list, SetupValue::List),
        map(
            verify(take_till1(|c: char| c.is_whitespace()), |s: &str| {
                !s.starts_with(['\'', '('])
            }),
            |s: &str| SetupValue::Bare(s.to_string()),
        ),
    ))
    .parse(input)
}

/// `KEY = value`, returning the key, the literal value text and the parsed value.
fn parse_assignment(input: &str) -> IResult<&str, (&str, &str, SetupValue)> {
    map(
        (
            preceded(space0, parse_key),
            (space0, char('='), space0),
            consumed(parse_value),
            space0,
            eof,
        ),
        |(key, _, (raw, value), _, _)| (key, raw, value),
    )
    .parse(input)
}

/// Classify why a line is not an assignment.
fn line_error(line: &str) -> ParseSetupError {
    let value_part = line.split_once('=').map(|(_, v)| v.trim_start());
    match value_part {
        Some(v) if v.starts_with('\'') && parse_quoted(v).is_err() => {
            ParseSetupError::UnterminatedQuote(v.to_string())
        }
        _ => ParseSetupError::MalformedLine(line.trim().to_string()),
    }
}

/// Parse the content of a setup file.
///
/// Arguments
/// -----------------
/// * `content` – The whole text of the file.
///
/// Return
/// ----------
/// * The assignments in file order.
/// * [`MkspkError::SetupParse`] with the 1-based line number of the first line that
///   cannot be read unambiguously.
pub fn parse_setup(content: &str) -> Result<SetupEntries, MkspkError> {
    let mut entries = SetupEntries::default();
    let mut section: Option<Section> = None;

    for (index, line) in content.lines().enumerate() {
        let trimmed = line.trim();

        if trimmed.starts_with(SECTION_TOKEN) {
            section = Some(if trimmed.starts_with(BEGIN_DATA) {
                Section::Data
            } else {
                Section::Text
            });
            continue;
        }

        if trimmed.is_empty() {
            continue;
        }

        let fail = |source: ParseSetupError| MkspkError::SetupParse {
            line_number: index + 1,
            line: line.to_string(),
            source,
        };

        let Some(current) = section else {
            return Err(fail(ParseSetupError::OutsideSection));
        };

        match parse_assignment(line) {
            Ok((_, (key, raw, value))) => entries.insert(SetupEntry {
                key: key.to_string(),
                raw: raw.to_string(),
                value,
                section: current,
            }),
            Err(_) if current == Section::Text => {}
            Err(_) => return Err(fail(line_error(line))),
        }
    }

    Ok(entries)
}

/// Read and parse a setup file.
///
/// Return
/// ----------
/// * [`MkspkError::Io`] if the file cannot be read.
/// * See [`parse_setup`] for the parsing errors.
pub fn read_setup_file(path: &Utf8Path) -> Result<SetupEntries, MkspkError> {
    let content =
        std::fs::read_to_string(path).map_err(|e| MkspkError::io("read setup file", path, e))?;
    parse_setup(&content)
}
