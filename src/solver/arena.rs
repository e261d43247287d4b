//! Parent-pointer node storage for queue and heap based engines.
//!
//! Nodes only store the move that produced them, so a frontier entry is a
//! plain index and paths are rebuilt once at the end.

use crate::cube::CubeState;
use crate::moves::Move;

/// Index of a node inside a [`NodeArena`].
pub(crate) type NodeId = usize;

pub(crate) struct Node {
    pub cube: CubeState,
    pub depth: u32,
    pub last_move: Option<Move>,
    parent: Option<NodeId>,
}

#[derive(Default)]
pub(crate) struct NodeArena {
    nodes: Vec<Node>,
}

impl NodeArena {
    /// Stores the starting state.
    pub(crate) fn root(&mut self, cube: CubeState) -> NodeId {
        self.nodes.push(Node {
            cube,
            depth: 0,
            last_move: None,
            parent: None,
        });
        self.nodes.len() - 1
    }

    /// Stores the state reached from `parent` by `mv`.
    pub(crate) fn child(&mut self, parent: NodeId, mv: Move, cube: CubeState) -> NodeId {
        let depth = self.nodes[parent].depth + 1;
        self.nodes.push(Node {
            cube,
            depth,
            last_move: Some(mv),
            parent: Some(parent),
        });
        self.nodes.len() - 1
    }

    #[inline]
    pub(crate) fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    /// Moves from the root to `id`.
    pub(crate) fn path_to(&self, id: NodeId) -> Vec<Move> {
        let mut moves = Vec::with_capacity(self.nodes[id].depth as usize);
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = &self.nodes[node_id];
            if let Some(mv) = node.last_move {
                moves.push(mv);
            }
            current = node.parent;
        }
        moves.reverse();
        moves
    }
}
