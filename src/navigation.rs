use crate::state::CanvasStore;

/// Drill-down path of canvas ids, root first, displayed canvas last.
/// Never empty.
#[derive(Clone, Debug, PartialEq)]
pub struct NavStack {
    ids: Vec<String>,
}

impl NavStack {
    pub fn new(root_id: &str) -> Self {
        Self {
            ids: vec![root_id.to_string()],
        }
    }

    pub fn current(&self) -> &str {
        self.ids.last().expect("nav stack is never empty")
    }

    pub fn depth(&self) -> usize {
        self.ids.len()
    }

    pub fn path(&self) -> &[String] {
        &self.ids
    }

    pub fn push(&mut self, canvas_id: &str) {
        self.ids.push(canvas_id.to_string());
    }

    /// No-op at the root.
    pub fn pop(&mut self) {
        if self.ids.len() > 1 {
            self.ids.pop();
        }
    }

    /// Truncate to `index + 1` elements (breadcrumb click). Out-of-range
    /// indices are ignored.
    pub fn jump_to(&mut self, index: usize) {
        if index < self.ids.len() {
            self.ids.truncate(index + 1);
        }
    }
}

/// Which action an Escape press fired, innermost-first. Exactly one fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EscapeAction {
    CloseHelp,
    CloseSearch,
    CloseArticle,
    ClearSelection,
    GoBack,
    None,
}

/// Cross-component coordinator: one state-transition surface for the
/// navigation stack, node selection, the open article, and the two
/// overlays, so that compound moves (search reveal, wiki-link follow)
/// apply atomically instead of relying on event ordering.
#[derive(Clone, Debug, PartialEq)]
pub struct ExplorerState {
    pub nav: NavStack,
    pub selected: Option<String>,
    pub article: Option<String>,
    pub search_open: bool,
    pub help_open: bool,
}

impl ExplorerState {
    pub fn new(root_id: &str) -> Self {
        Self {
            nav: NavStack::new(root_id),
            selected: None,
            article: None,
            search_open: false,
            help_open: false,
        }
    }

    /// Enter a sub-canvas. Unknown ids are a no-op. Selection and the
    /// article viewer are scoped to a canvas, so both are dropped.
    pub fn navigate_to(&mut self, store: &CanvasStore, canvas_id: &str) {
        if !store.contains(canvas_id) {
            return;
        }
        self.nav.push(canvas_id);
        self.selected = None;
        self.article = None;
    }

    pub fn go_back(&mut self) {
        self.nav.pop();
        self.selected = None;
        self.article = None;
    }

    pub fn jump_to(&mut self, index: usize) {
        self.nav.jump_to(index);
        self.selected = None;
        self.article = None;
    }

    pub fn select_node(&mut self, node_id: &str) {
        self.selected = Some(node_id.to_string());
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn open_article(&mut self, node_id: &str) {
        self.article = Some(node_id.to_string());
    }

    pub fn close_article(&mut self) {
        self.article = None;
    }

    pub fn open_search(&mut self) {
        self.search_open = true;
    }

    pub fn close_search(&mut self) {
        self.search_open = false;
    }

    pub fn open_help(&mut self) {
        self.help_open = true;
    }

    pub fn close_help(&mut self) {
        self.help_open = false;
    }

    /// Search-result selection: navigate to the owning canvas if it is not
    /// the active one, then select the node. Applied as one transition so
    /// the navigation-triggered selection clear can never win over the
    /// selection. Closes the palette.
    pub fn reveal(&mut self, store: &CanvasStore, node_id: &str) {
        self.search_open = false;
        let Some(owner) = store.canvas_of(node_id) else {
            return;
        };
        if owner != self.nav.current() {
            let owner = owner.to_string();
            self.navigate_to(store, &owner);
        }
        self.selected = Some(node_id.to_string());
    }

    /// Wiki-link from an open article. A dead link closes the article;
    /// a live one navigates if needed, then selects the target and keeps
    /// the viewer open on it.
    pub fn follow_wiki_link(&mut self, store: &CanvasStore, node_id: &str) {
        let Some(owner) = store.canvas_of(node_id) else {
            self.article = None;
            return;
        };
        if owner != self.nav.current() {
            let owner = owner.to_string();
            self.navigate_to(store, &owner);
        }
        self.selected = Some(node_id.to_string());
        self.article = Some(node_id.to_string());
    }

    /// Context-menu drill-down on a page node: enter its nested canvas,
    /// if it links one.
    pub fn enter_node(&mut self, store: &CanvasStore, node_id: &str) {
        let Some(target) = store
            .node(node_id)
            .and_then(|n| n.data.canvas_link())
            .map(str::to_string)
        else {
            return;
        };
        self.navigate_to(store, &target);
    }

    /// Strict priority chain, innermost-first: help > search > article >
    /// selection > back. The first applicable action fires, and only it.
    pub fn escape(&mut self) -> EscapeAction {
        if self.help_open {
            self.help_open = false;
            EscapeAction::CloseHelp
        } else if self.search_open {
            self.search_open = false;
            EscapeAction::CloseSearch
        } else if self.article.is_some() {
            self.article = None;
            EscapeAction::CloseArticle
        } else if self.selected.is_some() {
            self.selected = None;
            EscapeAction::ClearSelection
        } else if self.nav.depth() > 1 {
            self.go_back();
            EscapeAction::GoBack
        } else {
            EscapeAction::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{test_page, Canvas, CanvasStore};

    fn store() -> CanvasStore {
        let main = Canvas {
            id: "main".to_string(),
            title: "Main".to_string(),
            nodes: vec![
                test_page("bitcoin", "Bitcoin", None),
                test_page("ethereum", "Ethereum", Some("ethereum-ecosystem")),
            ],
            edges: vec![],
        };
        let eth = Canvas {
            id: "ethereum-ecosystem".to_string(),
            title: "Ethereum Ecosystem".to_string(),
            nodes: vec![test_page("uniswap", "Uniswap", None)],
            edges: vec![],
        };
        CanvasStore::new("main", vec![main, eth])
    }

    mod stack_tests {
        use super::*;

        #[test]
        fn starts_at_root() {
            let nav = NavStack::new("main");
            assert_eq!(nav.current(), "main");
            assert_eq!(nav.depth(), 1);
        }

        #[test]
        fn push_then_pop_scenario() {
            let mut nav = NavStack::new("main");
            nav.push("ethereum-ecosystem");
            assert_eq!(nav.path(), ["main", "ethereum-ecosystem"]);
            nav.pop();
            assert_eq!(nav.path(), ["main"]);
        }

        #[test]
        fn pop_at_root_is_noop() {
            let mut nav = NavStack::new("main");
            nav.pop();
            assert_eq!(nav.depth(), 1);
            assert_eq!(nav.current(), "main");
        }

        #[test]
        fn jump_to_zero_always_returns_to_root() {
            let mut nav = NavStack::new("main");
            nav.push("a");
            nav.push("b");
            nav.push("c");
            nav.jump_to(0);
            assert_eq!(nav.path(), ["main"]);
        }

        #[test]
        fn jump_to_ancestor_truncates_inclusive() {
            let mut nav = NavStack::new("main");
            nav.push("a");
            nav.push("b");
            nav.jump_to(1);
            assert_eq!(nav.path(), ["main", "a"]);
        }

        #[test]
        fn jump_out_of_range_is_noop() {
            let mut nav = NavStack::new("main");
            nav.push("a");
            nav.jump_to(5);
            assert_eq!(nav.path(), ["main", "a"]);
        }
    }

    mod coordinator_tests {
        use super::*;

        #[test]
        fn navigate_clears_selection_and_article() {
            let store = store();
            let mut ex = ExplorerState::new("main");
            ex.select_node("bitcoin");
            ex.open_article("bitcoin");
            ex.navigate_to(&store, "ethereum-ecosystem");
            assert_eq!(ex.nav.current(), "ethereum-ecosystem");
            assert_eq!(ex.selected, None);
            assert_eq!(ex.article, None);
        }

        #[test]
        fn navigate_to_unknown_canvas_is_noop() {
            let store = store();
            let mut ex = ExplorerState::new("main");
            ex.select_node("bitcoin");
            ex.navigate_to(&store, "solana-ecosystem");
            assert_eq!(ex.nav.depth(), 1);
            // Untouched state: the request was rejected before any effect
            assert_eq!(ex.selected.as_deref(), Some("bitcoin"));
        }

        #[test]
        fn reveal_same_canvas_selects_without_navigation() {
            let store = store();
            let mut ex = ExplorerState::new("main");
            ex.open_search();
            ex.reveal(&store, "bitcoin");
            assert_eq!(ex.nav.depth(), 1);
            assert_eq!(ex.selected.as_deref(), Some("bitcoin"));
            assert!(!ex.search_open);
        }

        #[test]
        fn reveal_cross_canvas_navigates_then_selects() {
            let store = store();
            let mut ex = ExplorerState::new("main");
            ex.reveal(&store, "uniswap");
            assert_eq!(ex.nav.path(), ["main", "ethereum-ecosystem"]);
            // Selection survives the navigation-triggered clear
            assert_eq!(ex.selected.as_deref(), Some("uniswap"));
            // Search only selects, never opens the article
            assert_eq!(ex.article, None);
        }

        #[test]
        fn reveal_unknown_node_closes_palette_only() {
            let store = store();
            let mut ex = ExplorerState::new("main");
            ex.open_search();
            ex.reveal(&store, "ghost");
            assert!(!ex.search_open);
            assert_eq!(ex.selected, None);
            assert_eq!(ex.nav.depth(), 1);
        }

        #[test]
        fn wiki_link_cross_canvas_keeps_article_open() {
            let store = store();
            let mut ex = ExplorerState::new("main");
            ex.open_article("bitcoin");
            ex.follow_wiki_link(&store, "uniswap");
            assert_eq!(ex.nav.current(), "ethereum-ecosystem");
            assert_eq!(ex.selected.as_deref(), Some("uniswap"));
            assert_eq!(ex.article.as_deref(), Some("uniswap"));
        }

        #[test]
        fn dead_wiki_link_closes_article() {
            let store = store();
            let mut ex = ExplorerState::new("main");
            ex.open_article("bitcoin");
            ex.follow_wiki_link(&store, "no-such-node");
            assert_eq!(ex.article, None);
            assert_eq!(ex.nav.depth(), 1);
        }

        #[test]
        fn enter_node_drills_into_linked_canvas() {
            let store = store();
            let mut ex = ExplorerState::new("main");
            ex.enter_node(&store, "ethereum");
            assert_eq!(ex.nav.current(), "ethereum-ecosystem");
        }

        #[test]
        fn enter_node_without_link_is_noop() {
            let store = store();
            let mut ex = ExplorerState::new("main");
            ex.enter_node(&store, "bitcoin");
            assert_eq!(ex.nav.depth(), 1);
        }

        #[test]
        fn go_back_and_jump_clear_selection() {
            let store = store();
            let mut ex = ExplorerState::new("main");
            ex.navigate_to(&store, "ethereum-ecosystem");
            ex.select_node("uniswap");
            ex.go_back();
            assert_eq!(ex.selected, None);
            assert_eq!(ex.nav.current(), "main");

            ex.navigate_to(&store, "ethereum-ecosystem");
            ex.select_node("uniswap");
            ex.jump_to(0);
            assert_eq!(ex.selected, None);
            assert_eq!(ex.nav.current(), "main");
        }
    }

    mod escape_tests {
        use super::*;

        #[test]
        fn chain_fires_exactly_one_action_per_press() {
            let store = store();
            let mut ex = ExplorerState::new("main");
            ex.navigate_to(&store, "ethereum-ecosystem");
            ex.select_node("uniswap");
            ex.open_article("uniswap");
            ex.open_search();
            ex.open_help();

            assert_eq!(ex.escape(), EscapeAction::CloseHelp);
            assert!(ex.search_open);
            assert_eq!(ex.escape(), EscapeAction::CloseSearch);
            assert!(ex.article.is_some());
            assert_eq!(ex.escape(), EscapeAction::CloseArticle);
            assert!(ex.selected.is_some());
            assert_eq!(ex.escape(), EscapeAction::ClearSelection);
            assert_eq!(ex.nav.depth(), 2);
            assert_eq!(ex.escape(), EscapeAction::GoBack);
            assert_eq!(ex.nav.current(), "main");
            assert_eq!(ex.escape(), EscapeAction::None);
        }

        #[test]
        fn escape_at_root_with_nothing_open_is_none() {
            let mut ex = ExplorerState::new("main");
            assert_eq!(ex.escape(), EscapeAction::None);
            assert_eq!(ex.nav.depth(), 1);
        }
    }
}
