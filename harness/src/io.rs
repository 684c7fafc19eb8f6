//! Plain-text edge lists.
//!
//! One edge per line as two whitespace-separated node ids. Blank lines and
//! lines starting with `#` are skipped. An optional header `nodes <n>` fixes
//! the node count; without it the count is one past the largest id seen.

use std::io::{BufRead, Write};

use matchbound_kernel::graph::{GraphError, NodeId, ProblemGraphV1};

/// Failure reading an edge list.
#[derive(Debug)]
pub enum EdgeListError {
    Io(std::io::Error),
    /// A line is not `u v` or `nodes n`.
    Parse { line: usize, content: String },
    /// The edges do not form a simple graph.
    Graph(GraphError),
}

impl std::fmt::Display for EdgeListError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Parse { line, content } => {
                write!(f, "line {line}: expected `u v`, found {content:?}")
            }
            Self::Graph(e) => write!(f, "invalid graph: {e}"),
        }
    }
}

impl std::error::Error for EdgeListError {}

impl From<std::io::Error> for EdgeListError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

/// Parse an edge list, preserving edge order (which is the branching order).
///
/// # Errors
///
/// See [`EdgeListError`].
pub fn read_edge_list<R: BufRead>(reader: R) -> Result<ProblemGraphV1, EdgeListError> {
    let mut declared: Option<NodeId> = None;
    let mut edges: Vec<(NodeId, NodeId)> = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let content = line.trim();
        if content.is_empty() || content.starts_with('#') {
            continue;
        }
        let parse_error = || EdgeListError::Parse {
            line: index + 1,
            content: content.to_string(),
        };

        let mut parts = content.split_whitespace();
        let (Some(first), Some(second), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(parse_error());
        };
        if first == "nodes" {
            declared = Some(second.parse().map_err(|_| parse_error())?);
            continue;
        }
        let u: NodeId = first.parse().map_err(|_| parse_error())?;
        let v: NodeId = second.parse().map_err(|_| parse_error())?;
        edges.push((u, v));
    }

    match declared {
        Some(n) => ProblemGraphV1::new(n, &edges),
        None => ProblemGraphV1::from_edges(&edges),
    }
    .map_err(EdgeListError::Graph)
}

/// Write `graph` in the format [`read_edge_list`] accepts.
///
/// # Errors
///
/// Propagates writer failures.
pub fn write_edge_list<W: Write>(graph: &ProblemGraphV1, mut writer: W) -> std::io::Result<()> {
    writeln!(writer, "nodes {}", graph.node_count())?;
    for edge in graph.edges() {
        writeln!(writer, "{} {}", edge.u, edge.v)?;
    }
    Ok(())
}
