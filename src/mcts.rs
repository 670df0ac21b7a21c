//! Monte Carlo move selection.
//!
//! Two agents live here:
//! - [`NaiveMctsAgent`] runs flat random playouts from the current position and
//!   scores each first move by its average result.
//! - [`UctMctsAgent`] grows a search tree with UCB1 selection, one-node
//!   expansion, random playouts and backpropagation, then plays the most
//!   visited root child.
//!
//! All results are scored from the perspective of the player to move at the
//! root (+1 win, -1 loss, 0 draw) and that perspective stays fixed for the
//! whole tree.

use std::collections::BTreeMap;

use fastrand::Rng;
use tracing::trace;

use crate::agent::{Agent, candidate_moves};
use crate::board::{Coord, Player};
use crate::constants::{NAIVE_PLAYOUTS, UCT_EXPLORATION, UCT_ITERATIONS};
use crate::error::{GameError, Result};
use crate::playout::{mcplayout, rollout_value};
use crate::position::Position;

// =============================================================================
// Flat Monte Carlo
// =============================================================================

/// Playout statistics for one first move.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MoveStats {
    pub visits: u32,
    pub value: i32,
}

impl MoveStats {
    pub fn mean(&self) -> f64 {
        if self.visits > 0 {
            self.value as f64 / self.visits as f64
        } else {
            0.0
        }
    }
}

/// Flat Monte Carlo agent: random playouts grouped by their first move.
pub struct NaiveMctsAgent {
    playouts: usize,
    rng: Rng,
}

impl Default for NaiveMctsAgent {
    fn default() -> Self {
        Self::new(NAIVE_PLAYOUTS)
    }
}

impl NaiveMctsAgent {
    pub fn new(playouts: usize) -> Self {
        Self {
            playouts,
            rng: Rng::new(),
        }
    }

    pub fn with_seed(playouts: usize, seed: u64) -> Self {
        Self {
            playouts,
            rng: Rng::with_seed(seed),
        }
    }

    /// Run the playout budget and return per-first-move statistics.
    ///
    /// Every playout counts one visit and adds its result to the move it
    /// started with.
    pub fn evaluate(&mut self, pos: &Position) -> Result<BTreeMap<Coord, MoveStats>> {
        candidate_moves(pos)?;
        let perspective = pos.turn();
        let mut results: BTreeMap<Coord, MoveStats> = BTreeMap::new();
        for i in 0..self.playouts {
            let mut sim = pos.duplicate();
            let (first, status) = mcplayout(&mut sim, &mut self.rng)?;
            let Some(first) = first else { continue };
            let stats = results.entry(first).or_default();
            stats.visits += 1;
            stats.value += status.value_for(perspective);
            trace!(playout = i, ?first, %status, "playout complete");
        }
        Ok(results)
    }
}

impl Agent for NaiveMctsAgent {
    fn name(&self) -> &str {
        "naive-mcts"
    }

    fn select_move(&mut self, pos: &Position) -> Result<Coord> {
        let results = self.evaluate(pos)?;
        let mut best: Option<(Coord, f64)> = None;
        for (&mv, stats) in &results {
            let mean = stats.mean();
            if best.is_none_or(|(_, m)| mean > m) {
                best = Some((mv, mean));
            }
        }
        match best {
            Some((mv, mean)) => {
                trace!(?mv, mean, "naive-mcts choice");
                Ok(mv)
            }
            // No playouts ran: fall back to the first legal move
            None => pos
                .moves()
                .first()
                .copied()
                .ok_or(GameError::NoLegalMoves { player: pos.turn() }),
        }
    }
}

// =============================================================================
// UCT search tree
// =============================================================================

/// Index of a node in the [`SearchTree`] arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

/// A node in the UCT search tree.
#[derive(Debug)]
pub struct SearchNode {
    /// Position reached at this node
    pub pos: Position,
    /// Move that led here (`None` at the root)
    pub mv: Option<Coord>,
    /// Parent node (`None` at the root)
    pub parent: Option<NodeId>,
    /// Expanded children
    pub children: Vec<NodeId>,
    /// Legal moves not yet expanded; popped from the back
    pub unexpanded: Vec<Coord>,
    /// Number of visits
    pub visits: u32,
    /// Sum of playout results from the tree's perspective
    pub value: f64,
}

impl SearchNode {
    fn new(pos: Position, mv: Option<Coord>, parent: Option<NodeId>) -> Self {
        // Reverse so that popping yields moves in row-major order
        let mut unexpanded = if pos.is_active() { pos.moves() } else { Vec::new() };
        unexpanded.reverse();
        Self {
            pos,
            mv,
            parent,
            children: Vec::new(),
            unexpanded,
            visits: 0,
            value: 0.0,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !self.pos.is_active()
    }

    pub fn is_fully_expanded(&self) -> bool {
        !self.children.is_empty() && self.unexpanded.is_empty()
    }

    /// Average result, or 0 for an unvisited node.
    pub fn mean(&self) -> f64 {
        if self.visits > 0 {
            self.value / self.visits as f64
        } else {
            0.0
        }
    }

    /// UCB1 score given the parent's visit count.
    pub fn ucb(&self, parent_visits: u32, c: f64) -> f64 {
        if self.visits == 0 {
            return f64::INFINITY;
        }
        let exploration = c * ((parent_visits as f64).ln() / self.visits as f64).sqrt();
        self.mean() + exploration
    }
}

/// Arena-allocated UCT tree. Node 0 is the root.
#[derive(Debug)]
pub struct SearchTree {
    nodes: Vec<SearchNode>,
    perspective: Player,
}

impl SearchTree {
    /// Create a tree rooted at a copy of `pos`, searching for the player to move.
    pub fn new(pos: &Position) -> Self {
        Self {
            nodes: vec![SearchNode::new(pos.duplicate(), None, None)],
            perspective: pos.turn(),
        }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn perspective(&self) -> Player {
        self.perspective
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id.0 as usize]
    }

    #[inline]
    fn get_mut(&mut self, id: NodeId) -> &mut SearchNode {
        &mut self.nodes[id.0 as usize]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Child with the highest UCB1 score; the first child wins ties.
    pub fn select_child(&self, id: NodeId) -> Option<NodeId> {
        let node = self.get(id);
        let mut best: Option<(NodeId, f64)> = None;
        for &child in &node.children {
            let score = self.get(child).ucb(node.visits, UCT_EXPLORATION);
            if best.is_none_or(|(_, s)| score > s) {
                best = Some((child, score));
            }
        }
        best.map(|(child, _)| child)
    }

    /// Descend through fully expanded nodes to a leaf.
    pub fn select(&self) -> NodeId {
        let mut current = self.root();
        loop {
            let node = self.get(current);
            if node.is_terminal() || !node.is_fully_expanded() {
                return current;
            }
            match self.select_child(current) {
                Some(child) => current = child,
                None => return current,
            }
        }
    }

    /// Expand one untried move of `id`; returns `id` itself if nothing is left.
    pub fn expand(&mut self, id: NodeId) -> Result<NodeId> {
        let Some(mv) = self.get_mut(id).unexpanded.pop() else {
            return Ok(id);
        };
        let mut child_pos = self.get(id).pos.duplicate();
        child_pos.play(mv)?;
        let child_id = NodeId(self.nodes.len() as u32);
        self.nodes.push(SearchNode::new(child_pos, Some(mv), Some(id)));
        self.get_mut(id).children.push(child_id);
        Ok(child_id)
    }

    /// Add `value` to every node from `leaf` up to the root.
    pub fn backpropagate(&mut self, leaf: NodeId, value: f64) {
        let mut current = Some(leaf);
        while let Some(id) = current {
            let node = self.get_mut(id);
            node.visits += 1;
            node.value += value;
            current = node.parent;
        }
    }

    /// Root children as (move, visits, value).
    pub fn root_children(&self) -> Vec<(Coord, u32, f64)> {
        self.get(self.root())
            .children
            .iter()
            .filter_map(|&c| {
                let n = self.get(c);
                n.mv.map(|mv| (mv, n.visits, n.value))
            })
            .collect()
    }

    /// Most visited root child; the first child wins ties.
    pub fn best_move(&self) -> Option<Coord> {
        let mut best: Option<(Coord, u32)> = None;
        for (mv, visits, _) in self.root_children() {
            if best.is_none_or(|(_, v)| visits > v) {
                best = Some((mv, visits));
            }
        }
        best.map(|(mv, _)| mv)
    }

    /// Log statistics of the root's children at trace level.
    pub fn dump_children(&self) {
        for (mv, visits, value) in self.root_children() {
            trace!(?mv, visits, value, mean = value / visits.max(1) as f64, "root child");
        }
    }
}

/// Run `iterations` rounds of select/expand/simulate/backpropagate.
pub fn tree_search(tree: &mut SearchTree, iterations: usize, rng: &mut Rng) -> Result<()> {
    let perspective = tree.perspective();
    for i in 0..iterations {
        let leaf = tree.select();
        let node = if tree.get(leaf).is_terminal() {
            leaf
        } else {
            tree.expand(leaf)?
        };

        let value = rollout_value(&tree.get(node).pos, perspective, rng)?;
        tree.backpropagate(node, value as f64);

        trace!(iteration = i, node = node.0, value, "simulation complete");
    }
    Ok(())
}

/// UCT agent with a fixed iteration budget.
pub struct UctMctsAgent {
    iterations: usize,
    rng: Rng,
}

impl Default for UctMctsAgent {
    fn default() -> Self {
        Self::new(UCT_ITERATIONS)
    }
}

impl UctMctsAgent {
    pub fn new(iterations: usize) -> Self {
        Self {
            iterations,
            rng: Rng::new(),
        }
    }

    pub fn with_seed(iterations: usize, seed: u64) -> Self {
        Self {
            iterations,
            rng: Rng::with_seed(seed),
        }
    }

    /// Build and return the search tree for `pos`.
    pub fn search(&mut self, pos: &Position) -> Result<SearchTree> {
        candidate_moves(pos)?;
        let mut tree = SearchTree::new(pos);
        tree_search(&mut tree, self.iterations, &mut self.rng)?;
        Ok(tree)
    }
}

impl Agent for UctMctsAgent {
    fn name(&self) -> &str {
        "uct-mcts"
    }

    fn select_move(&mut self, pos: &Position) -> Result<Coord> {
        let tree = self.search(pos)?;
        tree.dump_children();
        match tree.best_move() {
            Some(mv) => Ok(mv),
            // Zero iterations leave the root unexpanded
            None => pos
                .moves()
                .first()
                .copied()
                .ok_or(GameError::NoLegalMoves { player: pos.turn() }),
        }
    }
}
