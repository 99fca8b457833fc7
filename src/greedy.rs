use std::cmp::{Ordering, max, Ord};

use priority_queue::PriorityQueue;
use bit_set::BitSet;

use crate::color::{Graph, Solution, VertexId};

#[derive(PartialEq, Eq)]
struct DSatInfo {
    dsat: usize,
    degree: usize
}

impl Ord for DSatInfo {
    fn cmp(&self, other: &Self) -> Ordering {
        self.dsat.cmp(&other.dsat)
            .then_with(|| self.degree.cmp(&other.degree))
    }
}

impl PartialOrd for DSatInfo {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/** implements a greedy DSATUR algorithm.
    1. choose an uncolored vertex that sees the most colors (break ties by the largest degree)
    2. add the vertex to the first color available
    3. mark all its neighbors seeing this color
    4. repeat until a proper coloring is found
*/
pub fn greedy_dsatur(graph:&Graph) -> Solution {
    let n:usize = graph.nb_vertices();
    if n == 0 { return Vec::new(); }
    let mut remaining_vertices:PriorityQueue<VertexId, DSatInfo> = PriorityQueue::new();
    for i in graph.vertices() {
        remaining_vertices.push(i, DSatInfo { dsat:0, degree:graph.degree(i)});
    }
    let mut colors:Vec<Option<usize>> = vec![None ; n]; // colors[v] -> color assigned to vertex v
    let mut adj_colors:Vec<BitSet> = vec![BitSet::default() ; n]; // adj_colors[v] -> colors v sees
    let mut last_color:usize = 0;
    while let Some((current_vertex,_)) = remaining_vertices.pop() {
        // assign it a color
        let mut color:usize = 0;
        while adj_colors[current_vertex].contains(color) { color += 1; }
        colors[current_vertex] = Some(color);
        last_color = max(last_color, color);
        // update saturation degree information
        for conflict_vertex in graph.neighbors(current_vertex).iter()
        .filter(|conflict_vertex| colors[**conflict_vertex].is_none()) {
            if !adj_colors[*conflict_vertex].contains(color) {
                adj_colors[*conflict_vertex].insert(color);
                remaining_vertices.change_priority_by(conflict_vertex, |p| {p.dsat += 1;});
            }
        }
    }
    let mut res = vec![vec![] ; last_color+1];
    for (i,c) in colors.iter().enumerate() {
        if let Some(c) = c { res[*c].push(i); }
    }
    res
}

/// converts a partition into a color vector (colors[v] = index of the class containing v)
pub fn solution_to_colors(graph:&Graph, sol:&[Vec<VertexId>]) -> Vec<usize> {
    let mut colors = vec![0 ; graph.nb_vertices()];
    for (c,vertices) in sol.iter().enumerate() {
        for v in vertices {
            colors[*v] = c;
        }
    }
    colors
}


#[cfg(test)]
mod tests {
    use super::*;

    use crate::color::{checker, CheckerResult};

    #[test]
    fn test_dsatur_myciel3() {
        let graph = Graph::from_dimacs_file("insts/myciel3.col").unwrap();
        let sol = greedy_dsatur(&graph);
        assert_eq!(checker(&graph, &sol), CheckerResult::Ok(sol.len()));
        // myciel3 has chromatic number 4
        assert!(sol.len() >= 4);
        assert!(sol.len() <= graph.max_degree()+1);
    }

    #[test]
    fn test_dsatur_bipartite() {
        let graph = Graph::from_dimacs_file("insts/c4.col").unwrap();
        let sol = greedy_dsatur(&graph);
        assert_eq!(checker(&graph, &sol), CheckerResult::Ok(2));
    }

    #[test]
    fn test_dsatur_complete() {
        let graph = Graph::from_dimacs_file("insts/k4.col").unwrap();
        let sol = greedy_dsatur(&graph);
        assert_eq!(checker(&graph, &sol), CheckerResult::Ok(4));
    }

    #[test]
    fn test_solution_to_colors() {
        let graph = Graph::from_dimacs_file("insts/c4.col").unwrap();
        assert_eq!(solution_to_colors(&graph, &[vec![0,2], vec![1,3]]), vec![0,1,0,1]);
    }
}
