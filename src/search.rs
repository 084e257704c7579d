use crate::state::{CanvasStore, NodeData};

/// One searchable node, with fields lowercased once at build time.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchEntry {
    pub node_id: String,
    pub canvas_id: String,
    pub canvas_title: String,
    pub title: String,
    title_lc: String,
    subtitle_lc: String,
    body_lc: String,
}

/// Match quality buckets, best first. Ties are broken by title.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Rank {
    TitleExact,
    TitlePrefix,
    TitleContains,
    SubtitleContains,
    BodyContains,
}

/// Flat index over every node of every canvas. Derived from the static
/// store once, never persisted.
pub struct SearchIndex {
    entries: Vec<SearchEntry>,
}

impl SearchIndex {
    pub fn build(store: &CanvasStore) -> Self {
        let mut entries = Vec::new();
        for canvas in store.canvases() {
            for node in &canvas.nodes {
                let title = node.data.title().to_string();
                let (subtitle, body) = match &node.data {
                    NodeData::Card {
                        subtitle, content, ..
                    } => (
                        subtitle.clone().unwrap_or_default(),
                        content.clone().unwrap_or_default(),
                    ),
                    NodeData::Page {
                        category,
                        description,
                        ..
                    } => (
                        category.map(|c| c.label().to_string()).unwrap_or_default(),
                        description.clone().unwrap_or_default(),
                    ),
                };
                entries.push(SearchEntry {
                    node_id: node.id.clone(),
                    canvas_id: canvas.id.clone(),
                    canvas_title: canvas.title.clone(),
                    title_lc: title.to_lowercase(),
                    subtitle_lc: subtitle.to_lowercase(),
                    body_lc: body.to_lowercase(),
                    title,
                });
            }
        }
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Ranked substring search. Empty or whitespace queries match nothing.
    pub fn search(&self, query: &str, limit: usize) -> Vec<&SearchEntry> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }
        let mut hits: Vec<(Rank, &SearchEntry)> = self
            .entries
            .iter()
            .filter_map(|entry| Self::rank(entry, &query).map(|r| (r, entry)))
            .collect();
        hits.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.title.cmp(&b.1.title)));
        hits.into_iter().take(limit).map(|(_, e)| e).collect()
    }

    fn rank(entry: &SearchEntry, query: &str) -> Option<Rank> {
        if entry.title_lc == query {
            Some(Rank::TitleExact)
        } else if entry.title_lc.starts_with(query) {
            Some(Rank::TitlePrefix)
        } else if entry.title_lc.contains(query) {
            Some(Rank::TitleContains)
        } else if entry.subtitle_lc.contains(query) {
            Some(Rank::SubtitleContains)
        } else if entry.body_lc.contains(query) {
            Some(Rank::BodyContains)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{test_page, Canvas, CanvasStore, Node, NodeData, Position};

    fn store() -> CanvasStore {
        let mut uniswap = test_page("uniswap", "Uniswap", None);
        if let NodeData::Page { description, .. } = &mut uniswap.data {
            *description = Some("Decentralized exchange".to_string());
        }
        let mut aave = test_page("aave", "Aave", None);
        if let NodeData::Page { description, .. } = &mut aave.data {
            *description = Some("Lending protocol, often compared to uniswap".to_string());
        }
        let card = Node {
            id: "card-user-1".to_string(),
            position: Position::default(),
            style: None,
            data: NodeData::Card {
                title: Some("Swap notes".to_string()),
                subtitle: Some("uniswap research".to_string()),
                content: Some("fees and pools".to_string()),
                items: Vec::new(),
                accent_color: None,
                group_label: None,
            },
        };
        let main = Canvas {
            id: "main".to_string(),
            title: "Main".to_string(),
            nodes: vec![test_page("bitcoin", "Bitcoin", None)],
            edges: vec![],
        };
        let eth = Canvas {
            id: "ethereum-ecosystem".to_string(),
            title: "Ethereum Ecosystem".to_string(),
            nodes: vec![uniswap, aave, card],
            edges: vec![],
        };
        CanvasStore::new("main", vec![main, eth])
    }

    #[test]
    fn index_covers_all_canvases() {
        let index = SearchIndex::build(&store());
        assert_eq!(index.len(), 4);
    }

    #[test]
    fn empty_query_matches_nothing() {
        let index = SearchIndex::build(&store());
        assert!(index.search("", 10).is_empty());
        assert!(index.search("   ", 10).is_empty());
    }

    #[test]
    fn exact_title_ranks_before_description_match() {
        let index = SearchIndex::build(&store());
        let hits = index.search("uniswap", 10);
        assert_eq!(hits[0].node_id, "uniswap");
        // Subtitle and body matches follow
        let ids: Vec<&str> = hits.iter().map(|h| h.node_id.as_str()).collect();
        assert!(ids.contains(&"card-user-1"));
        assert!(ids.contains(&"aave"));
        assert!(
            ids.iter().position(|&id| id == "card-user-1").unwrap()
                < ids.iter().position(|&id| id == "aave").unwrap()
        );
    }

    #[test]
    fn prefix_beats_contains() {
        let index = SearchIndex::build(&store());
        let hits = index.search("uni", 10);
        assert_eq!(hits[0].node_id, "uniswap");
    }

    #[test]
    fn matching_is_case_insensitive() {
        let index = SearchIndex::build(&store());
        let hits = index.search("BITCOIN", 10);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].node_id, "bitcoin");
    }

    #[test]
    fn entries_carry_owning_canvas() {
        let index = SearchIndex::build(&store());
        let hits = index.search("aave", 10);
        assert_eq!(hits[0].canvas_id, "ethereum-ecosystem");
        assert_eq!(hits[0].canvas_title, "Ethereum Ecosystem");
    }

    #[test]
    fn limit_truncates_results() {
        let index = SearchIndex::build(&store());
        let hits = index.search("uniswap", 1);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].node_id, "uniswap");
    }

    #[test]
    fn no_match_returns_empty() {
        let index = SearchIndex::build(&store());
        assert!(index.search("solana", 10).is_empty());
    }
}
