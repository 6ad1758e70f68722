//! Text format of shortest-path problems and their answers
//!
//! Input is whitespace separated: the vertex count `n`, the edge count `m`,
//! then `m` triples `source target weight`. Line breaks carry no meaning but
//! are tracked for error messages. Anything after the last triple is an
//! error.
//!
//! Output is one line with the distances of vertices `1..=n`, separated by
//! single spaces; unreachable vertices print as `i64::MAX`.

use crate::error::Result;
use crate::graph::{GraphConfig, GraphError, MAX_VERTICES, WeightedGraph};
use crate::shortest_path::{ShortestPaths, dijkstra};
use std::io::{Read, Write};
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

/// Upper bound on edges reserved up front, whatever the header claims
const MAX_PREALLOCATED_EDGES: usize = 1 << 20;

/// Malformed problem text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The input stopped before an expected value
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEnd { expected: &'static str },
    /// A token did not parse as the expected integer
    #[error("line {line}: expected {expected}, found `{token}`")]
    InvalidToken {
        line: usize,
        token: String,
        expected: &'static str,
    },
    /// A header claiming more vertices than a graph can hold
    #[error("line {line}: vertex count {count} exceeds the limit of {limit}")]
    VertexCountTooLarge { line: usize, count: usize, limit: usize },
    /// Tokens left over after the last edge
    #[error("line {line}: unexpected trailing input `{token}`")]
    TrailingInput { line: usize, token: String },
}

/// A parsed problem: vertex count and edge triples, not yet range checked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemInput {
    pub vertex_count: usize,
    pub edges: Vec<(usize, usize, i64)>,
}

impl ProblemInput {
    /// Builds the graph, rejecting edges with endpoints outside `1..=n`
    pub fn into_graph(self, config: GraphConfig) -> std::result::Result<WeightedGraph, GraphError> {
        WeightedGraph::from_edges(self.vertex_count, self.edges, config)
    }
}

/// Options of one [`solve`] run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolveOptions {
    pub source: usize,
    pub graph: GraphConfig,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            source: 1,
            graph: GraphConfig::default(),
        }
    }
}

/// Whitespace tokenizer that remembers the line of each token
struct Tokens<'a> {
    lines: std::iter::Enumerate<std::str::Lines<'a>>,
    current: Option<(usize, std::str::SplitWhitespace<'a>)>,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().enumerate(),
            current: None,
        }
    }

    fn next_token(&mut self) -> Option<(usize, &'a str)> {
        loop {
            if let Some((line, words)) = self.current.as_mut() {
                if let Some(word) = words.next() {
                    return Some((*line, word));
                }
            }
            let (index, text) = self.lines.next()?;
            self.current = Some((index + 1, text.split_whitespace()));
        }
    }

    fn parse<T: FromStr>(&mut self, expected: &'static str) -> std::result::Result<T, ParseError> {
        self.parse_located(expected).map(|(_, value)| value)
    }

    /// Like [`Self::parse`], also returning the line of the token
    fn parse_located<T: FromStr>(&mut self, expected: &'static str) -> std::result::Result<(usize, T), ParseError> {
        let (line, token) = self.next_token().ok_or(ParseError::UnexpectedEnd { expected })?;
        let value = token.parse().map_err(|_| ParseError::InvalidToken {
            line,
            token: token.to_string(),
            expected,
        })?;
        Ok((line, value))
    }
}

/// Parses a complete problem from text
///
/// Vertex counts above [`MAX_VERTICES`] are rejected before anything is
/// allocated for them.
pub fn parse_problem(text: &str) -> std::result::Result<ProblemInput, ParseError> {
    let mut tokens = Tokens::new(text);
    let (line, vertex_count): (usize, usize) = tokens.parse_located("vertex count")?;
    if vertex_count > MAX_VERTICES {
        return Err(ParseError::VertexCountTooLarge {
            line,
            count: vertex_count,
            limit: MAX_VERTICES,
        });
    }
    let edge_count: usize = tokens.parse("edge count")?;

    let mut edges = Vec::with_capacity(edge_count.min(MAX_PREALLOCATED_EDGES));
    for _ in 0..edge_count {
        let source = tokens.parse("edge source vertex")?;
        let target = tokens.parse("edge target vertex")?;
        let weight = tokens.parse("edge weight")?;
        edges.push((source, target, weight));
    }

    if let Some((line, token)) = tokens.next_token() {
        return Err(ParseError::TrailingInput {
            line,
            token: token.to_string(),
        });
    }

    Ok(ProblemInput { vertex_count, edges })
}

/// Reads the whole stream and parses it as a problem
pub fn read_problem<R: Read>(mut reader: R) -> Result<ProblemInput> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    Ok(parse_problem(&text)?)
}

/// Formats distances as one space-separated, newline-terminated line
pub fn format_distances(distances: &[i64]) -> String {
    let mut line = distances
        .iter()
        .map(i64::to_string)
        .collect::<Vec<_>>()
        .join(" ");
    line.push('\n');
    line
}

/// Writes the distance line of `paths` and flushes
pub fn write_distances<W: Write>(mut writer: W, paths: &ShortestPaths) -> std::io::Result<()> {
    writer.write_all(format_distances(paths.raw()).as_bytes())?;
    writer.flush()
}

/// Reads a problem and solves it, returning the graph with its distances
///
/// Nothing is written, so a caller can decide where the answer goes only
/// once the input is known to be valid.
pub fn read_and_solve<R: Read>(reader: R, options: SolveOptions) -> Result<(WeightedGraph, ShortestPaths)> {
    let problem = read_problem(reader)?;
    debug!(
        vertices = problem.vertex_count,
        edges = problem.edges.len(),
        directed = options.graph.directed,
        "problem parsed"
    );

    let graph = problem.into_graph(options.graph)?;
    let paths = dijkstra(&graph, options.source)?;
    Ok((graph, paths))
}

/// Reads a problem, solves it and writes the distances
pub fn solve<R: Read, W: Write>(reader: R, writer: W, options: SolveOptions) -> Result<ShortestPaths> {
    let (_, paths) = read_and_solve(reader, options)?;
    write_distances(writer, &paths)?;
    Ok(paths)
}
