// Copyright 2020 Xavier Gillard
//
// Permission is hereby granted, free of charge, to any person obtaining a copy of
// this software and associated documentation files (the "Software"), to deal in
// the Software without restriction, including without limitation the rights to
// use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of
// the Software, and to permit persons to whom the Software is furnished to do so,
// subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS
// FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR
// COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER
// IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN
// CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! This module reads DCKP instances from their line-oriented text format:
//!
//! ```plain
//! param n := <item_count>;
//! param c := <capacity>;
//! param : V : p w :=
//!   <id> <profit> <weight>     (item_count times, ids 0..n-1 in order)
//! ;
//!
//! set E :=
//!   <i> <j>                    (one line per conflict)
//! ;
//! ```
//!
//! Trailing blank lines are tolerated; any other structural deviation is a
//! fatal [`ParseError`].

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use regex::Regex;

use crate::{Instance, InstanceError};

/// The ways reading an instance file can fail. A malformed instance is fatal:
/// the caller must abort processing it, there is no degraded result.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: expected {expected}")]
    Malformed { line: usize, expected: &'static str },
    #[error("line {line}: invalid number: {source}")]
    ParseInt {
        line: usize,
        source: std::num::ParseIntError,
    },
    #[error("line {line}: vertex ids are not consecutive")]
    NonConsecutiveIds { line: usize },
    #[error(transparent)]
    Instance(#[from] InstanceError),
}

/// Reads and assembles (sorts, indexes) an instance from a file.
pub fn read_instance<P: AsRef<Path>>(path: P) -> Result<Instance, ParseError> {
    let f = File::open(path)?;
    parse_instance(BufReader::new(f))
}

/// Parses one numeric capture group. The regexes only admit digits, but the
/// literal may still overflow `usize`.
fn number(caps: &regex::Captures, group: usize, line: usize) -> Result<usize, ParseError> {
    caps[group]
        .parse()
        .map_err(|source| ParseError::ParseInt { line, source })
}

/// Reads and assembles an instance from any buffered reader.
pub fn parse_instance<R: BufRead>(input: R) -> Result<Instance, ParseError> {
    let re_n = Regex::new(r"^param n := (\d+);$").unwrap();
    let re_c = Regex::new(r"^param c := (\d+);?$").unwrap();
    let re_items_hdr = Regex::new(r"^param : V : p w :=$").unwrap();
    let re_item = Regex::new(r"^\s+(\d+)\s+(\d+)\s+(\d+)\s*$").unwrap();
    let re_conflicts_hdr = Regex::new(r"^set E :=$").unwrap();
    let re_conflict = Regex::new(r"^\s+(\d+)\s+(\d+)\s*$").unwrap();
    let re_semicolon = Regex::new(r"^;$").unwrap();

    let mut lines = input.lines().enumerate();
    let mut next_line = move || -> Result<(usize, String), ParseError> {
        match lines.next() {
            Some((idx, line)) => Ok((idx + 1, line?)),
            // a missing line fails exactly like a non-matching one
            None => Ok((usize::MAX, String::new())),
        }
    };

    let (lineno, line) = next_line()?;
    let n = match re_n.captures(&line) {
        Some(caps) => number(&caps, 1, lineno)?,
        None => {
            return Err(ParseError::Malformed {
                line: lineno,
                expected: "param n := <count>;",
            })
        }
    };

    let (lineno, line) = next_line()?;
    let capacity = match re_c.captures(&line) {
        Some(caps) => number(&caps, 1, lineno)?,
        None => {
            return Err(ParseError::Malformed {
                line: lineno,
                expected: "param c := <capacity>;",
            })
        }
    };

    let (lineno, line) = next_line()?;
    if !re_items_hdr.is_match(&line) {
        return Err(ParseError::Malformed {
            line: lineno,
            expected: "param : V : p w :=",
        });
    }

    let mut items = Vec::with_capacity(n);
    for expected_id in 0..n {
        let (lineno, line) = next_line()?;
        let caps = re_item.captures(&line).ok_or(ParseError::Malformed {
            line: lineno,
            expected: "<id> <profit> <weight>",
        })?;
        let id = number(&caps, 1, lineno)?;
        if id != expected_id {
            return Err(ParseError::NonConsecutiveIds { line: lineno });
        }
        let profit = number(&caps, 2, lineno)?;
        let weight = number(&caps, 3, lineno)?;
        items.push((profit, weight));
    }

    let (lineno, line) = next_line()?;
    if !re_semicolon.is_match(&line) {
        return Err(ParseError::Malformed {
            line: lineno,
            expected: ";",
        });
    }
    let (lineno, line) = next_line()?;
    if !line.trim().is_empty() {
        return Err(ParseError::Malformed {
            line: lineno,
            expected: "blank line",
        });
    }
    let (lineno, line) = next_line()?;
    if !re_conflicts_hdr.is_match(&line) {
        return Err(ParseError::Malformed {
            line: lineno,
            expected: "set E :=",
        });
    }

    let mut conflicts = vec![];
    loop {
        let (lineno, line) = next_line()?;
        if re_semicolon.is_match(&line) {
            break;
        }
        let caps = re_conflict.captures(&line).ok_or(ParseError::Malformed {
            line: lineno,
            expected: "<i> <j> or ;",
        })?;
        let i = number(&caps, 1, lineno)?;
        let j = number(&caps, 2, lineno)?;
        conflicts.push((i, j));
    }

    // anything left over must be blank
    loop {
        let (lineno, line) = next_line()?;
        if lineno == usize::MAX {
            break;
        }
        if !line.trim().is_empty() {
            return Err(ParseError::Malformed {
                line: lineno,
                expected: "blank line",
            });
        }
    }

    Ok(Instance::new(capacity, items, conflicts)?)
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################

#[cfg(test)]
mod test_parser {
    use std::io::Cursor;

    use crate::{parse_instance, ParseError};

    const GOOD: &str = "\
param n := 4;
param c := 10;
param : V : p w :=
  0 10 5
  1 10 4
  2 12 6
  3 18 9
;

set E :=
  0 1
;
";

    #[test]
    fn a_well_formed_instance_parses() {
        let inst = parse_instance(Cursor::new(GOOD)).unwrap();
        assert_eq!(inst.num_items(), 4);
        assert_eq!(inst.capacity(), 10);
        assert_eq!(inst.num_conflicts(), 1);
    }

    #[test]
    fn trailing_blank_lines_are_tolerated() {
        let text = format!("{}\n\n\n", GOOD);
        assert!(parse_instance(Cursor::new(text.as_str())).is_ok());
    }

    #[test]
    fn an_empty_conflict_section_parses() {
        let text = GOOD.replace("  0 1\n", "");
        let inst = parse_instance(Cursor::new(text.as_str())).unwrap();
        assert_eq!(inst.num_conflicts(), 0);
    }

    #[test]
    fn a_missing_header_is_fatal() {
        let text = GOOD.replace("param c := 10;\n", "");
        let err = parse_instance(Cursor::new(text.as_str())).unwrap_err();
        assert!(matches!(err, ParseError::Malformed { line: 2, .. }));
    }

    #[test]
    fn non_consecutive_vertex_ids_are_fatal() {
        let text = GOOD.replace("  1 10 4", "  7 10 4");
        let err = parse_instance(Cursor::new(text.as_str())).unwrap_err();
        assert!(matches!(err, ParseError::NonConsecutiveIds { line: 5 }));
    }

    #[test]
    fn garbage_in_the_conflict_section_is_fatal() {
        let text = GOOD.replace("  0 1\n", "  0 1 2\n");
        let err = parse_instance(Cursor::new(text.as_str())).unwrap_err();
        assert!(matches!(err, ParseError::Malformed { .. }));
    }

    #[test]
    fn trailing_garbage_is_fatal() {
        let text = format!("{}\nset F :=\n", GOOD);
        let err = parse_instance(Cursor::new(text.as_str())).unwrap_err();
        assert!(matches!(err, ParseError::Malformed { .. }));
    }

    #[test]
    fn a_truncated_file_is_fatal() {
        let text = &GOOD[..GOOD.find("set E").unwrap()];
        assert!(parse_instance(Cursor::new(text)).is_err());
    }

    #[test]
    fn an_overflowing_number_is_fatal_not_a_panic() {
        let text = GOOD.replace(
            "param n := 4;",
            "param n := 99999999999999999999999;",
        );
        let err = parse_instance(Cursor::new(text.as_str())).unwrap_err();
        assert!(matches!(err, ParseError::ParseInt { line: 1, .. }));
    }

    #[test]
    fn an_overflowing_item_profit_is_fatal_too() {
        let text = GOOD.replace("  0 10 5", "  0 99999999999999999999999 5");
        let err = parse_instance(Cursor::new(text.as_str())).unwrap_err();
        assert!(matches!(err, ParseError::ParseInt { line: 4, .. }));
    }

    #[test]
    fn duplicate_conflicts_are_fatal() {
        let text = GOOD.replace("  0 1\n", "  0 1\n  1 0\n");
        let err = parse_instance(Cursor::new(text.as_str())).unwrap_err();
        assert!(matches!(err, ParseError::Instance(_)));
    }
}
