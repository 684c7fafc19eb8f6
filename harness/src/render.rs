//! Graphviz DOT rendering of a decided matching.

use std::io::Write;

use matchbound_kernel::state::{EdgeStatus, MatchingStateV1};

/// Failure rendering a state.
#[derive(Debug)]
pub enum RenderError {
    /// The state still has free edges, so there is no matching to draw.
    NotALeaf { free_edges: usize },
    Io(std::io::Error),
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotALeaf { free_edges } => {
                write!(f, "cannot render a partial state ({free_edges} free edges)")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for RenderError {}

impl From<std::io::Error> for RenderError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

/// Write `state` as an undirected DOT graph.
///
/// Every node is listed, isolated ones included. Matching edges are bold and
/// labelled `included`; the rest are dashed and labelled `excluded`.
///
/// # Errors
///
/// [`RenderError::NotALeaf`] if any edge is still free, otherwise writer
/// failures.
pub fn write_dot<W: Write>(state: &MatchingStateV1, mut writer: W) -> Result<(), RenderError> {
    if !state.is_leaf() {
        return Err(RenderError::NotALeaf {
            free_edges: state.free_count(),
        });
    }
    let graph = state.graph();
    writeln!(
        writer,
        "graph matching {{ /* n={} m={} size={} */",
        graph.node_count(),
        graph.edge_count(),
        state.matching_size()
    )?;
    for node in 0..graph.node_count() {
        writeln!(writer, "  v{node};")?;
    }
    for (id, edge) in graph.edges().iter().enumerate() {
        let attrs = match state.status(id) {
            EdgeStatus::Included => "[label=\"included\", style=bold, color=red]",
            _ => "[label=\"excluded\", style=dashed, color=gray]",
        };
        writeln!(writer, "  v{} -- v{} {attrs};", edge.u, edge.v)?;
    }
    writeln!(writer, "}}")?;
    Ok(())
}

/// [`write_dot`] into a `String`.
///
/// # Errors
///
/// [`RenderError::NotALeaf`] if any edge is still free.
pub fn to_dot_string(state: &MatchingStateV1) -> Result<String, RenderError> {
    let mut buf = Vec::new();
    write_dot(state, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
