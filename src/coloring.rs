use rand::Rng;

use crate::color::{Graph, Solution, VertexId};

/**
Color assignment of every vertex of a graph, each color lying in 0..k.
The graph is borrowed: cloning a coloring copies the colors, not the graph.
*/
#[derive(Debug, Clone)]
pub struct Coloring<'a> {
    /// reference graph
    graph: &'a Graph,
    /// colors[v]: color of the vertex v
    colors: Vec<usize>,
    /// number of available colors (k)
    nb_colors: usize,
}

impl<'a> Coloring<'a> {

    /// creates a coloring with k colors where every vertex is colored uniformly at random
    pub fn random<R:Rng>(graph:&'a Graph, k:usize, rng:&mut R) -> Self {
        let mut res = Self { graph, colors: vec![0 ; graph.nb_vertices()], nb_colors: k };
        res.randomize(k, rng);
        res
    }

    /** creates a coloring from a color vector.

    # Panics
    - if the vector size differs from the number of vertices
    - if a color is not in 0..k
    */
    pub fn from_colors(graph:&'a Graph, colors:Vec<usize>, k:usize) -> Self {
        assert_eq!(colors.len(), graph.nb_vertices());
        assert!(colors.iter().all(|c| *c < k), "color out of range (k={})", k);
        Self { graph, colors, nb_colors: k }
    }

    /// reassigns every vertex an independent uniform color in 0..k
    pub fn randomize<R:Rng>(&mut self, k:usize, rng:&mut R) {
        assert!(k >= 1, "at least one color is needed");
        self.nb_colors = k;
        for c in self.colors.iter_mut() {
            *c = rng.gen_range(0..k);
        }
    }

    /// color of the vertex v
    pub fn color_of(&self, v:VertexId) -> usize { self.colors[v] }

    /** sets the color of vertex v.

    # Panics
    - if c is not in 0..k
    */
    pub fn set_color(&mut self, v:VertexId, c:usize) {
        assert!(c < self.nb_colors, "color {} out of range (k={})", c, self.nb_colors);
        self.colors[v] = c;
    }

    /// number of available colors (k)
    pub fn nb_colors(&self) -> usize { self.nb_colors }

    /// color of every vertex
    pub fn colors(&self) -> &[usize] { &self.colors }

    /// reference graph
    pub fn graph(&self) -> &'a Graph { self.graph }

    /// builds the partition representation (empty color classes are removed)
    pub fn to_solution(&self) -> Solution {
        let mut sol:Solution = vec![vec![] ; self.nb_colors];
        for (v,c) in self.colors.iter().enumerate() {
            sol[*c].push(v);
        }
        sol.into_iter().filter(|e| !e.is_empty()).collect()
    }
}
