use crate::state::{Edge, Node, NodeData, NodeStyle, Position};

use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Bumping this invalidates every stored canvas snapshot wholesale;
/// snapshots are never partially migrated.
pub const SNAPSHOT_VERSION: u32 = 2;

const CANVAS_KEY_PREFIX: &str = "chainatlas:canvas:";
const LEARNED_KEY_PREFIX: &str = "chainatlas:learned:";
const ARTICLE_KEY_PREFIX: &str = "chainatlas:article:";

#[derive(Debug)]
pub struct StorageError(pub String);

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "storage write failed: {}", self.0)
    }
}

/// Durable key-value store. Writes may fail (quota, disabled storage);
/// reads and removes never do.
pub trait StorageBackend {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str);
}

/// In-memory backend for tests and native builds.
#[derive(Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
    fail_writes: Cell<bool>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `set` fail, simulating quota exhaustion.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl StorageBackend for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes.get() {
            return Err(StorageError("quota exceeded".to_string()));
        }
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.items.borrow_mut().remove(key);
    }
}

/// Browser localStorage backend.
pub struct LocalStorage;

impl StorageBackend for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .and_then(|s| s.get_item(key).ok().flatten())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or_else(|| StorageError("localStorage unavailable".to_string()))?;
        storage
            .set_item(key, value)
            .map_err(|e| StorageError(format!("{e:?}")))
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
            let _ = storage.remove_item(key);
        }
    }
}

/// Position/style override persisted for a touched node.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct NodeLayout {
    pub position: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<NodeStyle>,
}

/// Per-canvas user-edit snapshot. Layouts hold overrides for any touched
/// node; user nodes are stored whole (minus large static fields); the edge
/// list is stored wholesale so user-deleted default edges stay deleted.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct CanvasSnapshot {
    pub version: u32,
    #[serde(default)]
    pub layouts: HashMap<String, NodeLayout>,
    #[serde(default)]
    pub user_nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

/// Large read-only page fields are re-hydrated from static data on load
/// and never written to storage, so snapshot size tracks edit count, not
/// content length.
fn slim_node(node: &Node) -> Node {
    let mut node = node.clone();
    if let NodeData::Page {
        short_overview,
        deep_insight,
        resources,
        ..
    } = &mut node.data
    {
        *short_overview = None;
        *deep_insight = None;
        resources.clear();
    }
    node
}

/// Single owner of the durable key namespace: canvas snapshots, per-node
/// learned flags, and per-node article overrides.
#[derive(Clone)]
pub struct PersistenceService {
    storage: Rc<dyn StorageBackend>,
}

impl PersistenceService {
    pub fn new(storage: Rc<dyn StorageBackend>) -> Self {
        Self { storage }
    }

    fn canvas_key(canvas_id: &str) -> String {
        format!("{CANVAS_KEY_PREFIX}{canvas_id}")
    }

    fn load_snapshot(&self, canvas_id: &str) -> Option<CanvasSnapshot> {
        let raw = self.storage.get(&Self::canvas_key(canvas_id))?;
        let snapshot: CanvasSnapshot = serde_json::from_str(&raw).ok()?;
        (snapshot.version == SNAPSHOT_VERSION).then_some(snapshot)
    }

    /// Static defaults with saved layout overrides applied, then saved
    /// user nodes appended. Absent, malformed, or version-mismatched
    /// snapshots fall back to the defaults unchanged.
    pub fn load_nodes(&self, canvas_id: &str, defaults: &[Node]) -> Vec<Node> {
        let mut nodes = defaults.to_vec();
        let Some(snapshot) = self.load_snapshot(canvas_id) else {
            return nodes;
        };
        for node in &mut nodes {
            if let Some(layout) = snapshot.layouts.get(&node.id) {
                node.position = layout.position;
                if layout.style.is_some() {
                    node.style = layout.style;
                }
            }
        }
        for user_node in snapshot.user_nodes {
            if !nodes.iter().any(|n| n.id == user_node.id) {
                nodes.push(user_node);
            }
        }
        nodes
    }

    /// Saved edge list if a valid snapshot exists, else the defaults.
    /// Full replace, not a merge.
    pub fn load_edges(&self, canvas_id: &str, defaults: &[Edge]) -> Vec<Edge> {
        match self.load_snapshot(canvas_id) {
            Some(snapshot) => snapshot.edges,
            None => defaults.to_vec(),
        }
    }

    /// Write failures are logged and swallowed; in-memory state stays the
    /// source of truth until the next successful save.
    pub fn save(&self, canvas_id: &str, nodes: &[Node], edges: &[Edge]) {
        let mut layouts = HashMap::new();
        for node in nodes {
            let style = node.style.filter(|s| !s.is_empty());
            layouts.insert(
                node.id.clone(),
                NodeLayout {
                    position: node.position,
                    style,
                },
            );
        }
        let snapshot = CanvasSnapshot {
            version: SNAPSHOT_VERSION,
            layouts,
            user_nodes: nodes
                .iter()
                .filter(|n| n.is_user_created())
                .map(slim_node)
                .collect(),
            edges: edges.to_vec(),
        };
        let json = match serde_json::to_string(&snapshot) {
            Ok(json) => json,
            Err(err) => {
                leptos::logging::warn!("canvas {canvas_id}: snapshot serialization failed: {err}");
                return;
            }
        };
        if let Err(err) = self.storage.set(&Self::canvas_key(canvas_id), &json) {
            leptos::logging::warn!("canvas {canvas_id}: {err}");
        }
    }

    /// Delete the stored snapshot for this canvas only. Idempotent.
    pub fn reset(&self, canvas_id: &str) {
        self.storage.remove(&Self::canvas_key(canvas_id));
    }

    pub fn is_learned(&self, node_id: &str) -> bool {
        self.storage
            .get(&format!("{LEARNED_KEY_PREFIX}{node_id}"))
            .as_deref()
            == Some("1")
    }

    pub fn set_learned(&self, node_id: &str, learned: bool) {
        let key = format!("{LEARNED_KEY_PREFIX}{node_id}");
        if learned {
            if let Err(err) = self.storage.set(&key, "1") {
                leptos::logging::warn!("learned flag {node_id}: {err}");
            }
        } else {
            self.storage.remove(&key);
        }
    }

    pub fn learned_count<'a>(&self, node_ids: impl Iterator<Item = &'a str>) -> usize {
        node_ids.filter(|id| self.is_learned(id)).count()
    }

    pub fn article_override(&self, node_id: &str) -> Option<String> {
        self.storage.get(&format!("{ARTICLE_KEY_PREFIX}{node_id}"))
    }

    pub fn set_article_override(&self, node_id: &str, content: &str) {
        let key = format!("{ARTICLE_KEY_PREFIX}{node_id}");
        if let Err(err) = self.storage.set(&key, content) {
            leptos::logging::warn!("article override {node_id}: {err}");
        }
    }

    pub fn clear_article_override(&self, node_id: &str) {
        self.storage.remove(&format!("{ARTICLE_KEY_PREFIX}{node_id}"));
    }
}
