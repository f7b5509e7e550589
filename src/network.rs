//! A road network keyed by endpoint names.
//!
//! Endpoints are vertices carrying their names.
//! Roads are two-way, so each is a pair of opposite edges,
//! both carrying the road name as payload and the road length as label.
use crate::algorithm::{SearchOptions, ShortestPath};
use crate::graph::*;
use crate::{Error, Result};
use ahash::RandomState;
use bimap::BiHashMap;
use tracing::debug;

pub struct RoadNetwork {
    graph: SparseGraph<String, String>,
    endpoints: BiHashMap<VertexId, String, RandomState, RandomState>,
}

/// One leg of a route, in the direction travelled.
#[derive(Debug, Clone, PartialEq)]
pub struct Road<'a> {
    pub id: EdgeId,
    pub name: &'a str,
    pub length: f64,
    pub from: &'a str,
    pub to: &'a str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Route<'a> {
    pub distance: f64,
    pub roads: Vec<Road<'a>>,
}

impl Default for RoadNetwork {
    fn default() -> Self {
        Self::new()
    }
}

impl RoadNetwork {
    pub fn new() -> Self {
        Self {
            graph: SparseGraph::new(),
            endpoints: BiHashMap::with_hashers(RandomState::new(), RandomState::new()),
        }
    }

    pub fn graph(&self) -> &SparseGraph<String, String> {
        &self.graph
    }

    /// Adds an endpoint unless one of the same name exists.
    pub fn add_endpoint(&mut self, name: &str) -> VertexId {
        if let Some(vid) = self.endpoints.get_by_right(name) {
            return *vid;
        }
        let vid = self.graph.insert_vertex(name.to_owned());
        self.endpoints.insert(vid, name.to_owned());
        vid
    }

    pub fn endpoint(&self, name: &str) -> Option<VertexId> {
        self.endpoints.get_by_right(name).copied()
    }

    pub fn endpoint_count(&self) -> usize {
        self.endpoints.len()
    }

    /// Number of one-way links, two per road.
    pub fn road_count(&self) -> usize {
        self.graph.edge_size()
    }

    /// Links two endpoints, adding them if they are new, by a road in both directions.
    ///
    /// Returns `false` and adds no edge if the endpoints are already linked
    /// in either direction, or if both names are the same.
    pub fn add_road(&mut self, a: &str, b: &str, length: f64, name: &str) -> Result<bool> {
        let va = self.add_endpoint(a);
        let vb = self.add_endpoint(b);
        if va == vb || self.graph.edge_between(&vb, &va)?.is_some() {
            debug!(a, b, road = name, "skip road between linked endpoints");
            return Ok(false);
        }
        let forward = match self.graph.insert_edge(va, vb, name.to_owned()) {
            Ok(e) => e,
            Err(Error::InvalidInsertion { .. }) => {
                debug!(a, b, road = name, "skip road between linked endpoints");
                return Ok(false);
            }
            Err(e) => return Err(e),
        };
        let backward = self.graph.insert_edge(vb, va, name.to_owned())?;
        self.graph.set_label(forward, length)?;
        self.graph.set_label(backward, length)?;
        Ok(true)
    }

    /// Finds a shortest route between two endpoints by name.
    ///
    /// `Ok(None)` if they are not connected.
    pub fn find_route(&self, start: &str, end: &str) -> Result<Option<Route<'_>>> {
        self.find_route_with(start, end, &SearchOptions::default())
    }

    pub fn find_route_with(
        &self,
        start: &str,
        end: &str,
        options: &SearchOptions<'_>,
    ) -> Result<Option<Route<'_>>> {
        let from = self
            .endpoint(start)
            .ok_or_else(|| Error::UnknownEndpoint(start.to_owned()))?;
        let to = self
            .endpoint(end)
            .ok_or_else(|| Error::UnknownEndpoint(end.to_owned()))?;
        let path = match self.graph.shortest_path_with::<f64>(&from, &to, options)? {
            Some(path) => path,
            None => return Ok(None),
        };
        let roads = path
            .edges
            .iter()
            .map(|e| self.road(e))
            .collect::<Result<Vec<_>>>()?;
        Ok(Some(Route {
            distance: path.distance,
            roads,
        }))
    }

    fn road(&self, e: &EdgeId) -> Result<Road<'_>> {
        let edge = self.graph.edge(e)?;
        let length = self
            .graph
            .label::<f64>(*e)?
            .copied()
            .ok_or(Error::MissingWeight(*e))?;
        Ok(Road {
            id: *e,
            name: self.graph.edge_data(e)?,
            length,
            from: self.graph.vertex(&edge.source)?,
            to: self.graph.vertex(&edge.sink)?,
        })
    }
}

impl std::fmt::Debug for RoadNetwork {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "RoadNetwork {{")?;
        write!(f, "{:?}", self.graph.debug().indent(2, 2))?;
        writeln!(f, "}}")?;
        Ok(())
    }
}
