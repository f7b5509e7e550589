use crate::graph::*;

/// Inspects a graph as an indented adjacency listing of payloads.
pub struct GraphDebug<'a, G> {
    graph: &'a G,
    init_indent: usize,
    indent_step: usize,
}

impl<'a, G> GraphDebug<'a, G> {
    pub fn new(graph: &'a G) -> Self {
        Self {
            graph,
            init_indent: 0,
            indent_step: 2,
        }
    }

    pub fn indent(mut self, init: usize, step: usize) -> Self {
        self.init_indent = init;
        self.indent_step = step;
        self
    }

    fn display_indent(&self, f: &mut std::fmt::Formatter<'_>, level: usize) -> std::fmt::Result {
        let indention = self.init_indent + self.indent_step * level;
        for _ in 0..indention {
            write!(f, " ")?;
        }
        Ok(())
    }
}

impl<'a, G> std::fmt::Debug for GraphDebug<'a, G>
where
    G: QueryableGraph + PayloadGraph,
    G::VertexData: std::fmt::Debug,
    G::EdgeData: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for v in self.graph.vertices() {
            let vert = self.graph.vertex(&v).map_err(|_| std::fmt::Error)?;
            self.display_indent(f, 0)?;
            writeln!(f, "{:?}", vert)?;
            for e in self.graph.out_edges(&v).map_err(|_| std::fmt::Error)? {
                let edge = self.graph.edge_data(&e.id).map_err(|_| std::fmt::Error)?;
                let sink = self.graph.vertex(&e.sink).map_err(|_| std::fmt::Error)?;
                self.display_indent(f, 1)?;
                writeln!(f, "--{:?}-> {:?}", edge, sink)?;
            }
        }
        Ok(())
    }
}
