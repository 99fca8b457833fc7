use bit_set::BitSet;
use log::info;

use crate::dimacs::read_from_file;
use crate::error::ColorError;

/** Vertex Id */
pub type VertexId = usize;

/** Solution of a graph coloring problem
(represented as a partition).
*/
pub type Solution = Vec<Vec<VertexId>>;

/** models an undirected graph to color. Built once, never modified afterwards. */
#[derive(Debug)]
pub struct Graph {
    /// nb vertices
    n: usize,
    /// edges of the graph (each undirected edge once, input order)
    edges: Vec<(VertexId,VertexId)>,
    /// adj_list[i]: list of vertices adjacent to i
    adj_list: Vec<Vec<VertexId>>,
    /// adj_matrix[i] represents a bitset of its neighbors
    adj_matrix: Vec<BitSet>,
}


impl Graph {

    /** constructor using a number of vertices and an edge list (0-based ids).
    Fails if an edge references a vertex outside 0..n or is a self-loop.
    */
    pub fn new(n:usize, edges:&[(VertexId,VertexId)]) -> Result<Self, ColorError> {
        let mut adj_list = vec![Vec::new() ; n];
        for (i,&(a,b)) in edges.iter().enumerate() {
            if a >= n || b >= n {
                return Err(ColorError::malformed(format!(
                    "edge {} ({},{}) references a vertex outside 0..{}", i, a, b, n
                )));
            }
            if a == b {
                return Err(ColorError::malformed(format!(
                    "edge {} is a self-loop on vertex {}", i, a
                )));
            }
            adj_list[a].push(b);
            adj_list[b].push(a);
        }
        let mut adj_matrix = vec![BitSet::default() ; n];
        for (a,resa) in adj_matrix.iter_mut().enumerate() {
            for b in &adj_list[a] {
                resa.insert(*b);
            }
        }
        Ok(Self { n, edges: edges.to_vec(), adj_list, adj_matrix })
    }

    /// creates a graph from a DIMACS file
    pub fn from_dimacs_file(filename:&str) -> Result<Self, ColorError> {
        let dimacs = read_from_file(filename)?;
        Self::new(dimacs.nb_vertices, &dimacs.edges)
    }

    /// number of vertices
    pub fn nb_vertices(&self) -> usize { self.n }

    /// number of edges
    pub fn nb_edges(&self) -> usize { self.edges.len() }

    /// iterator over the vertices
    pub fn vertices(&self) -> std::ops::Range<VertexId> { 0..self.n }

    /// list of vertices adjacent to vertex u
    pub fn neighbors(&self, u:VertexId) -> &[VertexId] { &self.adj_list[u] }

    /// degree of vertex u
    pub fn degree(&self, u:VertexId) -> usize { self.adj_list[u].len() }

    /// maximum degree of the graph (0 if there is no vertex)
    pub fn max_degree(&self) -> usize {
        self.adj_list.iter().map(|l| l.len()).max().unwrap_or(0)
    }

    /// edge list
    pub fn edges(&self) -> &[(VertexId, VertexId)] { &self.edges }

    /// returns true if u and v are adjacent (O(1))
    pub fn are_adjacent(&self, u:VertexId, v:VertexId) -> bool {
        self.adj_matrix[u].contains(v)
    }

    /// logs statistics of the graph
    pub fn display_statistics(&self) {
        info!("\t{} \t vertices", self.nb_vertices());
        info!("\t{} \t edges", self.nb_edges());
        let min_degree = self.vertices().map(|u| self.degree(u)).min().unwrap_or(0);
        info!("\t{} \t min degree", min_degree);
        info!("\t{} \t max degree", self.max_degree());
    }

    /** writes a string encoding the solution (use this to export the solution).
    each line corresponds to a color. */
    pub fn solution_to_string(&self, solution:&[Vec<VertexId>]) -> String {
        let mut res = String::default();
        for e in solution {
            for v in e {
                res += format!("{} ", v).as_str();
            }
            res += "\n";
        }
        res
    }

    /** writes a solution into a file. each line corresponds to a color. */
    pub fn write_solution(&self, filename:&str, solution:&[Vec<VertexId>]) -> Result<(), ColorError> {
        std::fs::write(filename, self.solution_to_string(solution))?;
        Ok(())
    }
}


/// result of the checker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckerResult {
    /// the solution is valid and uses the given number of colors
    Ok(usize),
    /// the vertex appears in more than one color class
    VertexAddedTwice(VertexId),
    /// the vertex does not appear in any color class
    VertexNotColored(VertexId),
    /// both vertices are adjacent and share a color class
    ConflictingEdge(VertexId, VertexId),
}

/**
checks that the solution is a proper coloring of the graph.
returns the number of colors if it is.
*/
pub fn checker(graph:&Graph, sol:&[Vec<VertexId>]) -> CheckerResult {
    // check that all vertices are added exactly once
    let mut visited = BitSet::with_capacity(graph.nb_vertices());
    for c in sol {
        for v in c {
            if visited.contains(*v) {
                return CheckerResult::VertexAddedTwice(*v);
            }
            visited.insert(*v);
        }
    }
    if let Some(v) = graph.vertices().find(|v| !visited.contains(*v)) {
        return CheckerResult::VertexNotColored(v);
    }
    // check conflicts
    for c in sol {
        for (i,v1) in c.iter().enumerate() {
            for v2 in &c[i+1..] {
                if graph.are_adjacent(*v1, *v2) {
                    return CheckerResult::ConflictingEdge(*v1, *v2);
                }
            }
        }
    }
    CheckerResult::Ok(sol.len())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_instance() {
        let graph = Graph::from_dimacs_file("insts/grid2x2.col").unwrap();
        assert_eq!(graph.nb_vertices(), 4);
        assert_eq!(graph.nb_edges(), 4);
        assert_eq!(graph.neighbors(0), &[1,2]);
        assert_eq!(graph.max_degree(), 2);
    }

    #[test]
    fn test_adjacency_is_symmetric() {
        let graph = Graph::from_dimacs_file("insts/myciel3.col").unwrap();
        for u in graph.vertices() {
            for v in graph.neighbors(u) {
                assert!(graph.neighbors(*v).contains(&u));
                assert!(graph.are_adjacent(*v, u));
            }
        }
    }

    #[test]
    fn test_edge_out_of_range() {
        let res = Graph::new(3, &[(0,1), (1,3)]);
        assert!(matches!(res, Err(ColorError::MalformedInput(_))));
    }

    #[test]
    fn test_self_loop() {
        let res = Graph::new(3, &[(2,2)]);
        assert!(matches!(res, Err(ColorError::MalformedInput(_))));
    }

    #[test]
    fn test_adjacency_matrix_sparse() {
        let graph = Graph::new(1000, &[(0,999), (5,6)]).unwrap();
        assert!(graph.are_adjacent(999, 0));
        assert!(graph.are_adjacent(5, 6));
        assert!(!graph.are_adjacent(0, 5));
        assert!(!graph.are_adjacent(500, 501));
    }

    #[test]
    fn test_parallel_edges_kept() {
        let graph = Graph::new(2, &[(0,1), (1,0)]).unwrap();
        assert_eq!(graph.nb_edges(), 2);
        assert_eq!(graph.neighbors(0), &[1,1]);
        assert_eq!(graph.max_degree(), 2);
    }

    #[test]
    fn test_empty_graph() {
        let graph = Graph::new(0, &[]).unwrap();
        assert_eq!(graph.max_degree(), 0);
        assert_eq!(checker(&graph, &[]), CheckerResult::Ok(0));
    }

    #[test]
    fn test_checker() {
        let graph = Graph::new(4, &[(0,1), (1,2), (2,3), (3,0)]).unwrap();
        assert_eq!(checker(&graph, &[vec![0,2], vec![1,3]]), CheckerResult::Ok(2));
        assert_eq!(checker(&graph, &[vec![0,1], vec![2,3]]), CheckerResult::ConflictingEdge(0,1));
        assert_eq!(checker(&graph, &[vec![0,2], vec![1]]), CheckerResult::VertexNotColored(3));
        assert_eq!(checker(&graph, &[vec![0,2], vec![1,3,0]]), CheckerResult::VertexAddedTwice(0));
    }

    #[test]
    fn test_solution_to_string() {
        let graph = Graph::new(3, &[(0,1)]).unwrap();
        assert_eq!(graph.solution_to_string(&[vec![0,2], vec![1]]), "0 2 \n1 \n");
    }
}
