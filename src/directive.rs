//! Line-oriented recognition of `#include` directives.
//!
//! A directive is a single line of the shape
//! `[ws]#include[ws](<ref>|"ref")[anything]`. Nothing else about the
//! language is understood: conditional compilation, macros and comments
//! are not evaluated.

use serde::Serialize;

const INCLUDE_TOKEN: &str = "#include";

/// How the reference of a directive is delimited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Delimiter {
    /// `<...>`, a system include
    Angle,
    /// `"..."`, a local include
    Quote,
}

impl Delimiter {
    fn from_open(c: char) -> Option<Self> {
        match c {
            '<' => Some(Self::Angle),
            '"' => Some(Self::Quote),
            _ => None,
        }
    }

    const fn close(self) -> char {
        match self {
            Self::Angle => '>',
            Self::Quote => '"',
        }
    }
}

/// An inclusion directive recognized on a single line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive<'a> {
    pub delimiter: Delimiter,
    /// Text strictly between the delimiters
    pub reference: &'a str,
}

/// A directive together with its position in the scanned text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveLine<'a> {
    /// 1-based line number
    pub line_number: usize,
    pub directive: Directive<'a>,
    pub line: &'a str,
}

/// Scans one line for an inclusion directive.
///
/// The reference runs up to the first closing delimiter of its own kind, so
/// `"a>b.h"` names `a>b.h` and `<a"b>` names `a"b`. Returns `None` for
/// anything that isn't a well-formed directive, including empty references
/// and references that are never closed.
#[must_use]
pub fn parse_directive(line: &str) -> Option<Directive<'_>> {
    let rest = line.trim_start_matches([' ', '\t']);
    let rest = rest.strip_prefix(INCLUDE_TOKEN)?;
    let rest = rest.trim_start_matches([' ', '\t']);

    let mut chars = rest.chars();
    let delimiter = Delimiter::from_open(chars.next()?)?;
    let body = chars.as_str();

    let end = body.find(delimiter.close())?;
    if end == 0 {
        return None;
    }

    Some(Directive {
        delimiter,
        reference: &body[..end],
    })
}

/// Finds every directive in `text`, splitting lines on `\n`
#[must_use]
pub fn find_directives(text: &str) -> Vec<DirectiveLine<'_>> {
    text.split('\n')
        .enumerate()
        .filter_map(|(idx, line)| {
            parse_directive(line).map(|directive| DirectiveLine {
                line_number: idx + 1,
                directive,
                line,
            })
        })
        .collect()
}
