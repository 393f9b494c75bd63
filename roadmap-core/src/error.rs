use thiserror::Error;

use crate::{NodeId, RoadId};

/// Broken cross-reference in the entity records handed to the builder
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReferenceError {
    #[error("Segment #{segment} references unknown node {node}")]
    UnknownNode { segment: usize, node: NodeId },
    #[error("Segment #{segment} references unknown road {road}")]
    UnknownRoad { segment: usize, road: RoadId },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Reference error: {0}")]
    Reference(#[from] ReferenceError),
    #[error("Node {0} not found")]
    NodeNotFound(NodeId),
    #[error("Road {0} not found")]
    RoadNotFound(RoadId),
    #[error("Invalid node index")]
    InvalidNodeIndex,
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("Graph contains no nodes")]
    EmptyGraph,
    #[error("No predecessor recorded for node {0}, search did not reach it")]
    BrokenPath(NodeId),
    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),
}
