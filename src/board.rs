use crate::history::History;
use crate::persistence::PersistenceService;
use crate::state::{CanvasStore, Edge, Node, NodeData, Position, USER_NODE_PREFIX};
use std::cell::Cell;
use std::collections::HashSet;

/// Offset applied to a duplicated node so the copy is visibly apart.
pub const DUPLICATE_OFFSET: f64 = 24.0;

/// Idle period after the last mutation before a persistence write fires.
pub const SAVE_DEBOUNCE_MS: u32 = 600;

/// Full (nodes, edges) copy captured before a mutating action.
#[derive(Clone, Debug, PartialEq)]
pub struct BoardSnapshot {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

/// Live node/edge state for one mounted canvas. Exclusively owns its
/// arrays; all mutation goes through these operations, each of which
/// captures a history snapshot first and bumps the revision counter the
/// app layer debounces saves on.
pub struct CanvasBoard {
    canvas_id: String,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    history: History<BoardSnapshot>,
    dragging: HashSet<String>,
    revision: u64,
    svc: PersistenceService,
}

impl CanvasBoard {
    /// Mount a canvas: static defaults merged with any persisted edits.
    pub fn open(canvas_id: &str, store: &CanvasStore, svc: PersistenceService) -> Self {
        let (default_nodes, default_edges) = store
            .get(canvas_id)
            .map(|c| (c.nodes.clone(), c.edges.clone()))
            .unwrap_or_default();
        let nodes = svc.load_nodes(canvas_id, &default_nodes);
        let edges = svc.load_edges(canvas_id, &default_edges);
        Self {
            canvas_id: canvas_id.to_string(),
            nodes,
            edges,
            history: History::default(),
            dragging: HashSet::new(),
            revision: 0,
            svc,
        }
    }

    pub fn canvas_id(&self) -> &str {
        &self.canvas_id
    }

    /// Monotonic change counter; every settled mutation bumps it.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            nodes: self.nodes.clone(),
            edges: self.edges.clone(),
        }
    }

    fn push_history(&mut self) {
        let snapshot = self.snapshot();
        self.history.push(snapshot);
    }

    fn touch(&mut self) {
        self.revision += 1;
    }

    pub fn node(&self, node_id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == node_id)
    }

    /// Append a node. Callers generate globally-unique ids; no collision
    /// check happens here.
    pub fn add_node(&mut self, node: Node) {
        self.push_history();
        self.nodes.push(node);
        self.touch();
    }

    pub fn add_user_card(&mut self, position: Position, title: String) -> String {
        let id = format!("{USER_NODE_PREFIX}{}", uuid::Uuid::new_v4());
        self.add_node(Node::user_card(id.clone(), position, title));
        id
    }

    /// Remove the node and prune every edge touching it; no dangling
    /// edges survive a delete.
    pub fn delete_node(&mut self, node_id: &str) {
        if !self.nodes.iter().any(|n| n.id == node_id) {
            return;
        }
        self.push_history();
        self.nodes.retain(|n| n.id != node_id);
        self.edges.retain(|e| !e.touches(node_id));
        self.dragging.remove(node_id);
        self.touch();
    }

    /// Insert a copy with a fresh user id, offset by a fixed delta.
    pub fn duplicate_node(&mut self, node_id: &str) -> Option<String> {
        let original = self.node(node_id)?.clone();
        self.push_history();
        let mut copy = original;
        copy.id = format!("{USER_NODE_PREFIX}{}", uuid::Uuid::new_v4());
        copy.position.x += DUPLICATE_OFFSET;
        copy.position.y += DUPLICATE_OFFSET;
        let id = copy.id.clone();
        self.nodes.push(copy);
        self.touch();
        Some(id)
    }

    /// Connect two existing nodes. Self-loops and parallel duplicate
    /// edges are permitted by contract.
    pub fn connect(&mut self, source: &str, target: &str) -> Option<String> {
        let both_exist = self.nodes.iter().any(|n| n.id == source)
            && self.nodes.iter().any(|n| n.id == target);
        if !both_exist {
            return None;
        }
        self.push_history();
        let mut edge = Edge::new(
            format!("edge-{}", uuid::Uuid::new_v4()),
            source.to_string(),
            target.to_string(),
        );
        // User-drawn edges render with the accent stroke, unlike the
        // default taxonomy edges.
        edge.animated = true;
        let id = edge.id.clone();
        self.edges.push(edge);
        self.touch();
        Some(id)
    }

    pub fn delete_edge(&mut self, edge_id: &str) {
        if !self.edges.iter().any(|e| e.id == edge_id) {
            return;
        }
        self.push_history();
        self.edges.retain(|e| e.id != edge_id);
        self.touch();
    }

    /// Rename a user card. Discrete edit, so it snapshots.
    pub fn set_card_title(&mut self, node_id: &str, title: String) {
        let Some(index) = self.nodes.iter().position(|n| n.id == node_id) else {
            return;
        };
        if !matches!(self.nodes[index].data, NodeData::Card { .. }) {
            return;
        }
        self.push_history();
        if let NodeData::Card { title: t, .. } = &mut self.nodes[index].data {
            *t = Some(title);
        }
        self.touch();
    }

    /// Snapshot exactly once per drag gesture, at drag start. Intermediate
    /// position updates never snapshot, so a burst of drag moves costs one
    /// history entry.
    pub fn begin_drag(&mut self, node_id: &str) {
        if self.dragging.insert(node_id.to_string()) {
            self.push_history();
        }
    }

    pub fn drag_to(&mut self, node_id: &str, position: Position) {
        if let Some(node) = self.nodes.iter_mut().find(|n| n.id == node_id) {
            node.position = position;
            self.touch();
        }
    }

    pub fn end_drag(&mut self, node_id: &str) {
        self.dragging.remove(node_id);
        self.touch();
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo(&mut self) -> bool {
        let current = self.snapshot();
        match self.history.undo(current) {
            Some(previous) => {
                self.nodes = previous.nodes;
                self.edges = previous.edges;
                self.touch();
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        let current = self.snapshot();
        match self.history.redo(current) {
            Some(next) => {
                self.nodes = next.nodes;
                self.edges = next.edges;
                self.touch();
                true
            }
            None => false,
        }
    }

    /// Clear history and the stored snapshot, restore static defaults.
    pub fn reset_to_defaults(&mut self, store: &CanvasStore) {
        self.history.clear();
        self.svc.reset(&self.canvas_id);
        let (nodes, edges) = store
            .get(&self.canvas_id)
            .map(|c| (c.nodes.clone(), c.edges.clone()))
            .unwrap_or_default();
        self.nodes = nodes;
        self.edges = edges;
        self.dragging.clear();
        self.touch();
    }

    pub fn save_now(&self) {
        self.svc.save(&self.canvas_id, &self.nodes, &self.edges);
    }
}

/// Trailing-edge debounce bookkeeping for the auto-save timer. Each call
/// to `schedule` invalidates earlier generations; a timer that wakes up
/// to a stale generation does nothing. `cancel` invalidates everything,
/// used when an explicit commit flushes the save synchronously.
#[derive(Default)]
pub struct SaveDebouncer {
    generation: Cell<u64>,
}

impl SaveDebouncer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&self) -> u64 {
        let next = self.generation.get() + 1;
        self.generation.set(next);
        next
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation.get() == generation
    }

    pub fn cancel(&self) {
        self.generation.set(self.generation.get() + 1);
    }
}
