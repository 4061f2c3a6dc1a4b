//! Interchange detection.
//!
//! Feeds often model branches and service patterns of one physical line as
//! separate routes ("Blue Line" and "Blue Line Branch"). Moving between
//! those is not a change of train from the passenger's point of view, so an
//! interchange is only counted when the colour token of the line name
//! changes.

use crate::domain::LineId;
use crate::graph::GraphStore;

/// Returns true if moving from line `from` to line `to` is a real change.
///
/// - the same id is never an interchange;
/// - if either line is unknown to the store it always is;
/// - otherwise it is one only if the colour tokens differ.
pub fn is_real_interchange(graph: &GraphStore, from: LineId, to: LineId) -> bool {
    if from == to {
        return false;
    }
    match (graph.line(from), graph.line(to)) {
        (Some(a), Some(b)) => a.color_token() != b.color_token(),
        _ => true,
    }
}

/// Indices into a path's stations at which a real interchange happens.
///
/// For `line_ids[i]` followed by `line_ids[i + 1]` the change happens at
/// station `i + 1`.
pub fn interchange_positions(graph: &GraphStore, line_ids: &[LineId]) -> Vec<usize> {
    line_ids
        .windows(2)
        .enumerate()
        .filter(|(_, pair)| is_real_interchange(graph, pair[0], pair[1]))
        .map(|(i, _)| i + 1)
        .collect()
}

/// Number of real interchanges along a sequence of lines.
pub fn count_interchanges(graph: &GraphStore, line_ids: &[LineId]) -> usize {
    line_ids
        .windows(2)
        .filter(|pair| is_real_interchange(graph, pair[0], pair[1]))
        .count()
}
