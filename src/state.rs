use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Id prefix marking nodes created by the user rather than the static taxonomy.
pub const USER_NODE_PREFIX: &str = "card-user-";

pub const DEFAULT_NODE_WIDTH: f64 = 180.0;
pub const DEFAULT_NODE_HEIGHT: f64 = 90.0;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct NodeStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

impl NodeStyle {
    pub fn is_empty(&self) -> bool {
        self.width.is_none() && self.height.is_none()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Resource {
    pub label: String,
    pub url: String,
}

/// Fixed category set for taxonomy pages, used for default color/label lookup.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Layer1,
    Layer2,
    Defi,
    Infrastructure,
    Nft,
    Dao,
    Wallet,
    Concept,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::Layer1 => "Layer 1",
            Category::Layer2 => "Layer 2",
            Category::Defi => "DeFi",
            Category::Infrastructure => "Infrastructure",
            Category::Nft => "NFT",
            Category::Dao => "DAO",
            Category::Wallet => "Wallet",
            Category::Concept => "Concept",
        }
    }

    pub fn default_color(&self) -> &'static str {
        match self {
            Category::Layer1 => "#f7931a",
            Category::Layer2 => "#8a92b2",
            Category::Defi => "#ff007a",
            Category::Infrastructure => "#44dd66",
            Category::Nft => "#aa66ff",
            Category::Dao => "#ffcc33",
            Category::Wallet => "#33aaff",
            Category::Concept => "#ccffdd",
        }
    }
}

/// Node payload. The discriminant decides which fields are meaningful;
/// consumers match on the variant instead of probing optional fields.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NodeData {
    Card {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        subtitle: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        content: Option<String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        items: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        accent_color: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        group_label: Option<String>,
    },
    Page {
        title: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        canvas_id: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        short_overview: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        deep_insight: Option<String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        resources: Vec<Resource>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        category: Option<Category>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        accent_color: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        emoji: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        token_symbol: Option<String>,
    },
}

impl NodeData {
    pub fn title(&self) -> &str {
        match self {
            NodeData::Card { title, .. } => title.as_deref().unwrap_or(""),
            NodeData::Page { title, .. } => title,
        }
    }

    pub fn is_page(&self) -> bool {
        matches!(self, NodeData::Page { .. })
    }

    /// Nested canvas this node drills down into, if any.
    pub fn canvas_link(&self) -> Option<&str> {
        match self {
            NodeData::Page { canvas_id, .. } => canvas_id.as_deref(),
            NodeData::Card { .. } => None,
        }
    }

    pub fn accent_color(&self) -> Option<&str> {
        match self {
            NodeData::Card { accent_color, .. } => accent_color.as_deref(),
            NodeData::Page {
                accent_color,
                category,
                ..
            } => accent_color
                .as_deref()
                .or_else(|| category.map(|c| c.default_color())),
        }
    }

    pub fn empty_card() -> Self {
        NodeData::Card {
            title: None,
            subtitle: None,
            content: None,
            items: Vec::new(),
            accent_color: None,
            group_label: None,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Node {
    pub id: String,
    pub position: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<NodeStyle>,
    pub data: NodeData,
}

impl Node {
    pub fn user_card(id: String, position: Position, title: String) -> Self {
        Self {
            id,
            position,
            style: None,
            data: NodeData::Card {
                title: Some(title),
                subtitle: None,
                content: None,
                items: Vec::new(),
                accent_color: None,
                group_label: None,
            },
        }
    }

    pub fn is_user_created(&self) -> bool {
        self.id.starts_with(USER_NODE_PREFIX)
    }

    pub fn width(&self) -> f64 {
        self.style
            .and_then(|s| s.width)
            .unwrap_or(DEFAULT_NODE_WIDTH)
    }

    pub fn height(&self) -> f64 {
        self.style
            .and_then(|s| s.height)
            .unwrap_or(DEFAULT_NODE_HEIGHT)
    }

    pub fn contains_point(&self, px: f64, py: f64) -> bool {
        px >= self.position.x
            && px <= self.position.x + self.width()
            && py >= self.position.y
            && py <= self.position.y + self.height()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub animated: bool,
}

impl Edge {
    pub fn new(id: String, source: String, target: String) -> Self {
        Self {
            id,
            source,
            target,
            animated: false,
        }
    }

    pub fn touches(&self, node_id: &str) -> bool {
        self.source == node_id || self.target == node_id
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Canvas {
    pub id: String,
    pub title: String,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

/// Immutable mapping from canvas id to its static definition, plus the
/// reverse index from node id to owning canvas. Node ids are globally
/// unique across canvases so the reverse index is well defined.
pub struct CanvasStore {
    root_id: String,
    canvases: HashMap<String, Canvas>,
    node_owner: HashMap<String, String>,
}

impl CanvasStore {
    pub fn new(root_id: &str, canvases: Vec<Canvas>) -> Self {
        let mut map = HashMap::new();
        let mut node_owner = HashMap::new();
        for canvas in canvases {
            for node in &canvas.nodes {
                node_owner.insert(node.id.clone(), canvas.id.clone());
            }
            map.insert(canvas.id.clone(), canvas);
        }
        Self {
            root_id: root_id.to_string(),
            canvases: map,
            node_owner,
        }
    }

    pub fn root_id(&self) -> &str {
        &self.root_id
    }

    pub fn get(&self, canvas_id: &str) -> Option<&Canvas> {
        self.canvases.get(canvas_id)
    }

    pub fn contains(&self, canvas_id: &str) -> bool {
        self.canvases.contains_key(canvas_id)
    }

    /// Canvas owning the given node, if the node exists anywhere.
    pub fn canvas_of(&self, node_id: &str) -> Option<&str> {
        self.node_owner.get(node_id).map(String::as_str)
    }

    pub fn node(&self, node_id: &str) -> Option<&Node> {
        let canvas_id = self.canvas_of(node_id)?;
        self.canvases
            .get(canvas_id)?
            .nodes
            .iter()
            .find(|n| n.id == node_id)
    }

    pub fn canvases(&self) -> impl Iterator<Item = &Canvas> {
        self.canvases.values()
    }
}

#[derive(Clone, Debug)]
pub struct Camera {
    pub x: f64,
    pub y: f64,
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

impl Camera {
    pub fn new() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            zoom: 1.0,
        }
    }

    pub fn screen_to_world(&self, screen_x: f64, screen_y: f64) -> (f64, f64) {
        let world_x = (screen_x / self.zoom) + self.x;
        let world_y = (screen_y / self.zoom) + self.y;
        (world_x, world_y)
    }

    pub fn world_to_screen(&self, world_x: f64, world_y: f64) -> (f64, f64) {
        let screen_x = (world_x - self.x) * self.zoom;
        let screen_y = (world_y - self.y) * self.zoom;
        (screen_x, screen_y)
    }
}

#[cfg(test)]
pub(crate) fn test_page(id: &str, title: &str, canvas_id: Option<&str>) -> Node {
    Node {
        id: id.to_string(),
        position: Position::new(0.0, 0.0),
        style: None,
        data: NodeData::Page {
            title: title.to_string(),
            canvas_id: canvas_id.map(str::to_string),
            description: None,
            short_overview: None,
            deep_insight: None,
            resources: Vec::new(),
            category: None,
            accent_color: None,
            emoji: None,
            token_symbol: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(id: &str, title: &str, canvas_id: Option<&str>) -> Node {
        test_page(id, title, canvas_id)
    }

    mod node_data_tests {
        use super::*;

        #[test]
        fn serde_round_trip_card() {
            let node = Node::user_card(
                "card-user-1".to_string(),
                Position::new(10.0, 20.0),
                "My note".to_string(),
            );
            let json = serde_json::to_string(&node).unwrap();
            let back: Node = serde_json::from_str(&json).unwrap();
            assert_eq!(node, back);
        }

        #[test]
        fn serde_round_trip_page() {
            let mut node = page("eth", "Ethereum", Some("ethereum-ecosystem"));
            if let NodeData::Page {
                category,
                token_symbol,
                resources,
                ..
            } = &mut node.data
            {
                *category = Some(Category::Layer1);
                *token_symbol = Some("ETH".to_string());
                resources.push(Resource {
                    label: "Site".to_string(),
                    url: "https://ethereum.org".to_string(),
                });
            }
            let json = serde_json::to_string(&node).unwrap();
            let back: Node = serde_json::from_str(&json).unwrap();
            assert_eq!(node, back);
        }

        #[test]
        fn tag_discriminates_variants() {
            let json = r#"{"id":"n1","position":{"x":0.0,"y":0.0},
                           "data":{"type":"card","title":"A"}}"#;
            let node: Node = serde_json::from_str(json).unwrap();
            assert!(matches!(node.data, NodeData::Card { .. }));

            let json = r#"{"id":"n2","position":{"x":0.0,"y":0.0},
                           "data":{"type":"page","title":"B"}}"#;
            let node: Node = serde_json::from_str(json).unwrap();
            assert!(node.data.is_page());
        }

        #[test]
        fn empty_optionals_skipped_in_json() {
            let node = Node::user_card(
                "card-user-1".to_string(),
                Position::default(),
                "Plain".to_string(),
            );
            let json = serde_json::to_string(&node).unwrap();
            assert!(!json.contains("subtitle"));
            assert!(!json.contains("items"));
            assert!(!json.contains("accent_color"));
            assert!(!json.contains("style"));
        }

        #[test]
        fn deserialize_old_page_without_optional_fields() {
            let json = r#"{"type":"page","title":"Bitcoin"}"#;
            let data: NodeData = serde_json::from_str(json).unwrap();
            match data {
                NodeData::Page {
                    title,
                    canvas_id,
                    resources,
                    category,
                    ..
                } => {
                    assert_eq!(title, "Bitcoin");
                    assert_eq!(canvas_id, None);
                    assert!(resources.is_empty());
                    assert_eq!(category, None);
                }
                NodeData::Card { .. } => panic!("wrong variant"),
            }
        }

        #[test]
        fn canvas_link_only_on_pages() {
            let p = page("eth", "Ethereum", Some("ethereum-ecosystem"));
            assert_eq!(p.data.canvas_link(), Some("ethereum-ecosystem"));
            let c = Node::user_card("card-user-1".into(), Position::default(), "x".into());
            assert_eq!(c.data.canvas_link(), None);
        }

        #[test]
        fn accent_color_falls_back_to_category() {
            let mut p = page("eth", "Ethereum", None);
            if let NodeData::Page { category, .. } = &mut p.data {
                *category = Some(Category::Defi);
            }
            assert_eq!(p.data.accent_color(), Some("#ff007a"));
        }
    }

    mod node_tests {
        use super::*;

        #[test]
        fn user_prefix_detection() {
            let user = Node::user_card("card-user-abc".into(), Position::default(), "x".into());
            assert!(user.is_user_created());
            let default = page("bitcoin", "Bitcoin", None);
            assert!(!default.is_user_created());
        }

        #[test]
        fn dimensions_fall_back_to_defaults() {
            let mut node = page("n", "N", None);
            assert_eq!(node.width(), DEFAULT_NODE_WIDTH);
            assert_eq!(node.height(), DEFAULT_NODE_HEIGHT);
            node.style = Some(NodeStyle {
                width: Some(320.0),
                height: None,
            });
            assert_eq!(node.width(), 320.0);
            assert_eq!(node.height(), DEFAULT_NODE_HEIGHT);
        }

        #[test]
        fn contains_point_respects_bounds() {
            let mut node = page("n", "N", None);
            node.position = Position::new(100.0, 100.0);
            assert!(node.contains_point(100.0, 100.0));
            assert!(node.contains_point(100.0 + DEFAULT_NODE_WIDTH, 100.0));
            assert!(!node.contains_point(99.0, 150.0));
            assert!(!node.contains_point(150.0, 100.0 + DEFAULT_NODE_HEIGHT + 1.0));
        }
    }

    mod edge_tests {
        use super::*;

        #[test]
        fn serde_skips_animated_false() {
            let edge = Edge::new("e1".into(), "a".into(), "b".into());
            let json = serde_json::to_string(&edge).unwrap();
            assert!(!json.contains("animated"));
            let back: Edge = serde_json::from_str(&json).unwrap();
            assert_eq!(edge, back);
        }

        #[test]
        fn animated_flag_round_trips_when_set() {
            let mut edge = Edge::new("e1".into(), "a".into(), "b".into());
            edge.animated = true;
            let json = serde_json::to_string(&edge).unwrap();
            assert!(json.contains("\"animated\":true"));
            let back: Edge = serde_json::from_str(&json).unwrap();
            assert!(back.animated);
        }

        #[test]
        fn touches_either_endpoint() {
            let edge = Edge::new("e1".into(), "a".into(), "b".into());
            assert!(edge.touches("a"));
            assert!(edge.touches("b"));
            assert!(!edge.touches("c"));
        }
    }

    mod store_tests {
        use super::*;

        fn store() -> CanvasStore {
            let main = Canvas {
                id: "main".to_string(),
                title: "Main".to_string(),
                nodes: vec![
                    page("bitcoin", "Bitcoin", None),
                    page("ethereum", "Ethereum", Some("ethereum-ecosystem")),
                ],
                edges: vec![Edge::new("e1".into(), "bitcoin".into(), "ethereum".into())],
            };
            let eth = Canvas {
                id: "ethereum-ecosystem".to_string(),
                title: "Ethereum Ecosystem".to_string(),
                nodes: vec![page("uniswap", "Uniswap", None)],
                edges: vec![],
            };
            CanvasStore::new("main", vec![main, eth])
        }

        #[test]
        fn reverse_index_maps_node_to_owner() {
            let store = store();
            assert_eq!(store.canvas_of("uniswap"), Some("ethereum-ecosystem"));
            assert_eq!(store.canvas_of("bitcoin"), Some("main"));
            assert_eq!(store.canvas_of("nope"), None);
        }

        #[test]
        fn node_lookup_goes_through_reverse_index() {
            let store = store();
            let node = store.node("uniswap").unwrap();
            assert_eq!(node.data.title(), "Uniswap");
            assert!(store.node("missing").is_none());
        }

        #[test]
        fn contains_and_root() {
            let store = store();
            assert_eq!(store.root_id(), "main");
            assert!(store.contains("ethereum-ecosystem"));
            assert!(!store.contains("solana-ecosystem"));
        }
    }

    mod camera_tests {
        use super::*;

        #[test]
        fn screen_world_round_trip() {
            let cam = Camera {
                x: 123.0,
                y: 456.0,
                zoom: 1.5,
            };
            let (wx, wy) = cam.screen_to_world(300.0, 400.0);
            let (sx, sy) = cam.world_to_screen(wx, wy);
            assert!((sx - 300.0).abs() < 1e-10);
            assert!((sy - 400.0).abs() < 1e-10);
        }

        #[test]
        fn zoom_scales_world_coordinates() {
            let cam = Camera {
                x: 0.0,
                y: 0.0,
                zoom: 2.0,
            };
            assert_eq!(cam.screen_to_world(200.0, 400.0), (100.0, 200.0));
            assert_eq!(cam.world_to_screen(100.0, 200.0), (200.0, 400.0));
        }
    }
}
