use bit_set::BitSet;

use crate::color::VertexId;
use crate::coloring::Coloring;

/** number of conflicting edges (both endpoints share a color).
Each undirected edge is counted once. Recomputed from scratch at each call.
*/
pub fn count_conflicts(coloring:&Coloring) -> usize {
    coloring.graph().edges().iter()
        .filter(|(a,b)| coloring.color_of(*a) == coloring.color_of(*b))
        .count()
}

/// endpoints of the conflicting edges (sorted, without duplicates)
pub fn conflicting_vertices(coloring:&Coloring) -> Vec<VertexId> {
    let graph = coloring.graph();
    let mut vertices_to_change:BitSet = BitSet::with_capacity(graph.nb_vertices());
    for (a,b) in graph.edges() {
        if coloring.color_of(*a) == coloring.color_of(*b) {
            vertices_to_change.insert(*a);
            vertices_to_change.insert(*b);
        }
    }
    vertices_to_change.iter().collect()
}
