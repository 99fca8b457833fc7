use std::fs;

use log::warn;
use nom::IResult;
use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::{char, digit1, space0, space1};
use nom::combinator::{all_consuming, map_res};
use nom::sequence::tuple;

use crate::color::VertexId;
use crate::error::ColorError;


/// content of a DIMACS file (vertex ids converted to 0-based)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DimacsGraph {
    /// number of vertices declared in the header
    pub nb_vertices: usize,
    /// number of edges declared in the header
    pub nb_edges_declared: usize,
    /// edges read, in file order
    pub edges: Vec<(VertexId,VertexId)>,
}


/// reads an instance from file
pub fn read_from_file(filename:&str) -> Result<DimacsGraph, ColorError> {
    let content = fs::read_to_string(filename)?;
    read_from_str(&content)
}

/** reads an instance from a string.
Comments and blank lines are ignored. The header must appear before any edge.
*/
pub fn read_from_str(content:&str) -> Result<DimacsGraph, ColorError> {
    let mut header:Option<(usize,usize)> = None;
    let mut edges = Vec::new();
    for (i,raw_line) in content.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('c') {
            continue;
        }
        if line.starts_with('p') {
            if header.is_some() {
                return Err(ColorError::malformed(format!("line {}: duplicated problem line", i+1)));
            }
            match all_consuming(read_header)(line) {
                Ok((_,(n,m))) => header = Some((n,m)),
                Err(_) => return Err(ColorError::malformed(format!(
                    "line {}: expected 'p edge <n> <m>', got '{}'", i+1, line
                ))),
            }
        } else if line.starts_with('e') {
            let n = match header {
                None => return Err(ColorError::malformed(format!(
                    "line {}: edge found before the problem line", i+1
                ))),
                Some((n,_)) => n
            };
            let (a,b) = match all_consuming(read_edge)(line) {
                Ok((_,e)) => e,
                Err(_) => return Err(ColorError::malformed(format!(
                    "line {}: expected 'e <u> <v>', got '{}'", i+1, line
                ))),
            };
            // WARNING: indices start at 1 in the DIMACS format
            if a == 0 || b == 0 || a > n || b > n {
                return Err(ColorError::malformed(format!(
                    "line {}: edge ({},{}) references a vertex outside 1..{}", i+1, a, b, n
                )));
            }
            edges.push((a-1, b-1));
        } else {
            warn!("dimacs: ignoring line {} ('{}')", i+1, line);
        }
    }
    let (nb_vertices, nb_edges_declared) = header.ok_or_else(||
        ColorError::malformed("missing problem line 'p edge <n> <m>'")
    )?;
    if edges.len() != nb_edges_declared && 2*edges.len() != nb_edges_declared {
        warn!(
            "dimacs: header declares {} edges, {} edge lines found",
            nb_edges_declared, edges.len()
        );
    }
    Ok(DimacsGraph { nb_vertices, nb_edges_declared, edges })
}

/// reads a non-negative integer
fn integer(s:&str) -> IResult<&str, usize> {
    map_res(digit1, |d:&str| d.parse::<usize>())(s)
}

/// reads two integers separated by spaces
fn read_two_integers(s:&str) -> IResult<&str, (usize,usize)> {
    let (remaining, (n1,_,n2,_)) = tuple((integer, space1, integer, space0))(s)?;
    Ok((remaining, (n1,n2)))
}

/// reads header containing (n,m)
pub fn read_header(s:&str) -> IResult<&str, (usize,usize)> {
    let (remaining,_) = tuple((
        char('p'), space1, alt((tag("edges"), tag("edge"), tag("col"))), space1
    ))(s)?;
    read_two_integers(remaining)
}

/// reads edge line (indices as written in the file)
pub fn read_edge(s:&str) -> IResult<&str, (usize,usize)> {
    let (remaining,_) = tuple((char('e'), space1))(s)?;
    read_two_integers(remaining)
}
