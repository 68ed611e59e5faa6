//! Plain-text graph descriptions.
//!
//! The first non-blank line holds the vertex and edge counts `V E`; each of
//! the following `E` non-blank lines holds one edge `u v weight`. Fields are
//! separated by any run of whitespace.
//!
//! ```text
//! 5 6
//! 1 2 2
//! 1 3 3
//! 2 3 1
//! 2 4 4
//! 3 4 5
//! 4 5 6
//! ```
use std::io::BufRead;
use std::num::ParseIntError;
use std::str::FromStr;

use thiserror::Error;
use tracing::debug;

use crate::graph::{Edge, Graph, GraphBuilder, GraphBuilderError};

/// Error reading a graph description. Line numbers are 1-based.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The underlying reader failed.
    #[error("failed to read graph description: {0}")]
    Io(#[from] std::io::Error),
    /// The input has no non-blank line.
    #[error("missing `vertices edges` header line")]
    MissingHeader,
    /// A line has the wrong number of fields.
    #[error("line {line}: expected {expected} fields, found {found}")]
    FieldCount {
        /// Line number.
        line: usize,
        /// Number of fields such a line must have.
        expected: usize,
        /// Number of fields present.
        found: usize,
    },
    /// A field is not an integer of the expected kind.
    #[error("line {line}: invalid number '{token}'")]
    InvalidNumber {
        /// Line number.
        line: usize,
        /// The offending field.
        token: String,
        /// Why it failed to parse.
        #[source]
        source: ParseIntError,
    },
    /// The number of edge lines differs from the header's edge count.
    #[error("header declares {expected} edges, found {found}")]
    EdgeCountMismatch {
        /// Edge count from the header.
        expected: usize,
        /// Number of edge lines present.
        found: usize,
    },
    /// An edge line describes an invalid edge.
    #[error("line {line}: {source}")]
    InvalidEdge {
        /// Line number.
        line: usize,
        /// The rejection from the graph builder.
        #[source]
        source: GraphBuilderError,
    },
}

fn fields<'l, const N: usize>(line: usize, text: &'l str) -> Result<[&'l str; N], ParseError> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let found = tokens.len();
    tokens.try_into().map_err(|_| ParseError::FieldCount {
        line,
        expected: N,
        found,
    })
}

fn number<T: FromStr<Err = ParseIntError>>(line: usize, token: &str) -> Result<T, ParseError> {
    token.parse().map_err(|source| ParseError::InvalidNumber {
        line,
        token: token.to_string(),
        source,
    })
}

/// Reads a graph description from `reader`.
///
/// # Errors
///
/// Any [ParseError]; the first problem found aborts the read.
pub fn parse_graph(reader: impl BufRead) -> Result<Graph, ParseError> {
    let mut lines = reader
        .lines()
        .enumerate()
        .map(|(index, text)| text.map(|text| (index + 1, text)))
        .filter(|line| !matches!(line, Ok((_, text)) if text.trim().is_empty()));

    let (line, header) = lines.next().ok_or(ParseError::MissingHeader)??;
    let [vertices, edges] = fields(line, &header)?;
    let vertex_count: usize = number(line, vertices)?;
    let edge_count: usize = number(line, edges)?;
    debug!(vertex_count, edge_count, "reading graph description");

    let mut builder = GraphBuilder::new(vertex_count);
    let mut found = 0;
    for entry in lines {
        let (line, text) = entry?;
        found += 1;
        if found > edge_count {
            continue;
        }

        let [u, v, weight] = fields(line, &text)?;
        let edge = Edge::new(
            number::<usize>(line, u)?,
            number::<usize>(line, v)?,
            number(line, weight)?,
        );
        debug!(line, %edge, "edge read");
        builder
            .add_edge(edge)
            .map_err(|source| ParseError::InvalidEdge { line, source })?;
    }

    if found != edge_count {
        return Err(ParseError::EdgeCountMismatch {
            expected: edge_count,
            found,
        });
    }

    Ok(builder.build())
}

impl FromStr for Graph {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_graph(s.as_bytes())
    }
}
