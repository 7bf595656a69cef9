//! Array-like environments: the matrix family, `array` and `cases`.
//!
//! Cells are collected into a mutable [`ArrayBuilder`] while the body is
//! parsed, then frozen into an immutable [`ArrayAtom`] when `\end` closes
//! the environment.

use super::Environments;
use crate::atom::Atom;
use crate::lexer::EOF_TOKEN;
use crate::parser::Parser;
use crate::types::{ParseError, ParseErrorKind};

/// Horizontal alignment of one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnAlign {
    Left,
    Center,
    Right,
}

/// A finished array: rows of cells, each cell an atom list.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayAtom {
    pub rows: Vec<Vec<Vec<Atom>>>,
    /// Per-column alignment; columns beyond the list center.
    pub alignments: Vec<ColumnAlign>,
    pub left_delim: Option<char>,
    pub right_delim: Option<char>,
}

impl ArrayAtom {
    /// Number of columns in the widest row.
    #[must_use]
    pub fn num_columns(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Alignment for a column index.
    #[must_use]
    pub fn alignment(&self, column: usize) -> ColumnAlign {
        self.alignments
            .get(column)
            .copied()
            .unwrap_or(ColumnAlign::Center)
    }
}

/// Mutable accumulator used while an environment body is parsed.
#[derive(Debug, Default)]
pub struct ArrayBuilder {
    rows: Vec<Vec<Vec<Atom>>>,
    current: Vec<Vec<Atom>>,
}

impl ArrayBuilder {
    pub fn push_cell(&mut self, atoms: Vec<Atom>) {
        self.current.push(atoms);
    }

    pub fn end_row(&mut self) {
        self.rows.push(core::mem::take(&mut self.current));
    }

    /// Freeze into an immutable atom. A trailing row of empty cells, as
    /// left by `\\` right before `\end`, is dropped.
    pub fn finish(
        mut self,
        alignments: Vec<ColumnAlign>,
        left_delim: Option<char>,
        right_delim: Option<char>,
    ) -> ArrayAtom {
        if !self.current.is_empty() {
            self.end_row();
        }
        if self
            .rows
            .last()
            .is_some_and(|row| row.iter().all(Vec::is_empty))
        {
            self.rows.pop();
        }
        ArrayAtom {
            rows: self.rows,
            alignments,
            left_delim,
            right_delim,
        }
    }
}

pub fn define(registry: &mut Environments) {
    for name in ["matrix", "pmatrix", "bmatrix", "Bmatrix", "vmatrix", "Vmatrix"] {
        registry.insert(name.to_owned(), matrix_handler);
    }
    registry.insert("array".to_owned(), array_handler);
    registry.insert("cases".to_owned(), cases_handler);
}

fn matrix_handler(parser: &mut Parser<'_>, name: &str) -> Result<Atom, ParseError> {
    let (left, right) = match name {
        "pmatrix" => (Some('('), Some(')')),
        "bmatrix" => (Some('['), Some(']')),
        "Bmatrix" => (Some('{'), Some('}')),
        "vmatrix" => (Some('\u{2223}'), Some('\u{2223}')),
        "Vmatrix" => (Some('\u{2225}'), Some('\u{2225}')),
        _ => (None, None),
    };
    let builder = parse_body(parser, name)?;
    Ok(Atom::Array(builder.finish(Vec::new(), left, right)))
}

/// `\begin{array}{clr}`: an explicit column specification.
fn array_handler(parser: &mut Parser<'_>, name: &str) -> Result<Atom, ParseError> {
    let spec = parser.parse_raw_group()?;
    let mut alignments = Vec::new();
    for ch in spec.chars() {
        match ch {
            'l' => alignments.push(ColumnAlign::Left),
            'c' => alignments.push(ColumnAlign::Center),
            'r' => alignments.push(ColumnAlign::Right),
            // Vertical separators are accepted but not drawn.
            '|' => {}
            c if c.is_whitespace() => {}
            c => {
                return Err(ParseError::new(ParseErrorKind::UnknownColumnAlignment {
                    alignment: c.to_string(),
                }));
            }
        }
    }
    let builder = parse_body(parser, name)?;
    Ok(Atom::Array(builder.finish(alignments, None, None)))
}

fn cases_handler(parser: &mut Parser<'_>, name: &str) -> Result<Atom, ParseError> {
    let builder = parse_body(parser, name)?;
    Ok(Atom::Array(builder.finish(
        vec![ColumnAlign::Left, ColumnAlign::Left],
        Some('{'),
        None,
    )))
}

/// Parse cells and rows up to the matching `\end{name}`.
fn parse_body(parser: &mut Parser<'_>, name: &str) -> Result<ArrayBuilder, ParseError> {
    let mut builder = ArrayBuilder::default();
    loop {
        let cell = parser.parse_expression(None)?;
        builder.push_cell(cell);
        let token = parser.fetch()?.clone();
        match token.text.as_str() {
            "&" => {
                parser.consume();
            }
            "\\\\" | "\\cr" => {
                parser.consume();
                // Swallow an optional row-spacing argument.
                parser.parse_raw_optional_group()?;
                builder.end_row();
            }
            "\\end" => {
                parser.consume();
                let end_name = parser.parse_raw_group()?;
                if end_name != name {
                    return Err(ParseError::with_token(
                        ParseErrorKind::MismatchedEnvironment {
                            begin: name.to_owned(),
                            end: end_name,
                        },
                        &token,
                    ));
                }
                return Ok(builder);
            }
            EOF_TOKEN => {
                return Err(ParseError::with_token(
                    ParseErrorKind::InvalidMatrix {
                        reason: format!("missing \\end{{{name}}}"),
                    },
                    &token,
                ));
            }
            other => {
                return Err(ParseError::with_token(
                    ParseErrorKind::InvalidMatrix {
                        reason: format!("unexpected '{other}' in {name}"),
                    },
                    &token,
                ));
            }
        }
    }
}
