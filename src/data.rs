use crate::persistence::PersistenceService;
use crate::state::{Canvas, Category, CanvasStore, Edge, Node, NodeData, Position};
use std::collections::HashMap;

pub const ROOT_CANVAS_ID: &str = "main";

const COLUMNS: usize = 4;
const CELL_WIDTH: f64 = 240.0;
const CELL_HEIGHT: f64 = 160.0;

/// One row of the static taxonomy table. The table forms a tree: a single
/// root with `parent_id: None`, everything else pointing at its parent.
/// Dependencies reference sibling ids and become edges on the parent's
/// canvas.
pub struct TaxonomyRecord {
    pub id: &'static str,
    pub parent_id: Option<&'static str>,
    pub label: &'static str,
    pub description: &'static str,
    pub category: Category,
    pub dependencies: &'static [&'static str],
}

pub const TAXONOMY: &[TaxonomyRecord] = &[
    TaxonomyRecord {
        id: "main",
        parent_id: None,
        label: "Blockchain Ecosystem",
        description: "Top-level map of blockchain concepts",
        category: Category::Concept,
        dependencies: &[],
    },
    TaxonomyRecord {
        id: "bitcoin",
        parent_id: Some("main"),
        label: "Bitcoin",
        description: "The original proof-of-work blockchain and its monetary network",
        category: Category::Layer1,
        dependencies: &["consensus"],
    },
    TaxonomyRecord {
        id: "ethereum",
        parent_id: Some("main"),
        label: "Ethereum",
        description: "Smart-contract platform anchoring most of DeFi and NFTs",
        category: Category::Layer1,
        dependencies: &["bitcoin"],
    },
    TaxonomyRecord {
        id: "solana",
        parent_id: Some("main"),
        label: "Solana",
        description: "High-throughput layer 1 with a parallel execution runtime",
        category: Category::Layer1,
        dependencies: &["ethereum"],
    },
    TaxonomyRecord {
        id: "consensus",
        parent_id: Some("main"),
        label: "Consensus Mechanisms",
        description: "Proof of work, proof of stake, and how chains agree on history",
        category: Category::Concept,
        dependencies: &[],
    },
    TaxonomyRecord {
        id: "nft-standards",
        parent_id: Some("main"),
        label: "NFT Standards",
        description: "Non-fungible token formats and marketplaces",
        category: Category::Nft,
        dependencies: &["ethereum"],
    },
    TaxonomyRecord {
        id: "dao-governance",
        parent_id: Some("main"),
        label: "DAO Governance",
        description: "On-chain treasuries, voting, and delegation",
        category: Category::Dao,
        dependencies: &["ethereum"],
    },
    // Ethereum sub-canvas
    TaxonomyRecord {
        id: "uniswap",
        parent_id: Some("ethereum"),
        label: "Uniswap",
        description: "Automated market maker, the canonical decentralized exchange",
        category: Category::Defi,
        dependencies: &[],
    },
    TaxonomyRecord {
        id: "aave",
        parent_id: Some("ethereum"),
        label: "Aave",
        description: "Over-collateralized lending and borrowing markets",
        category: Category::Defi,
        dependencies: &["uniswap"],
    },
    TaxonomyRecord {
        id: "arbitrum",
        parent_id: Some("ethereum"),
        label: "Arbitrum",
        description: "Optimistic rollup scaling Ethereum execution",
        category: Category::Layer2,
        dependencies: &[],
    },
    TaxonomyRecord {
        id: "metamask",
        parent_id: Some("ethereum"),
        label: "MetaMask",
        description: "Browser wallet and the default Ethereum key manager",
        category: Category::Wallet,
        dependencies: &[],
    },
    TaxonomyRecord {
        id: "the-graph",
        parent_id: Some("ethereum"),
        label: "The Graph",
        description: "Indexing protocol serving chain data to applications",
        category: Category::Infrastructure,
        dependencies: &["uniswap", "aave"],
    },
    // Solana sub-canvas
    TaxonomyRecord {
        id: "jupiter",
        parent_id: Some("solana"),
        label: "Jupiter",
        description: "Swap aggregator routing across Solana liquidity",
        category: Category::Defi,
        dependencies: &[],
    },
    TaxonomyRecord {
        id: "phantom",
        parent_id: Some("solana"),
        label: "Phantom",
        description: "The most used Solana wallet",
        category: Category::Wallet,
        dependencies: &[],
    },
];

fn token_symbol(id: &str) -> Option<&'static str> {
    match id {
        "bitcoin" => Some("BTC"),
        "ethereum" => Some("ETH"),
        "solana" => Some("SOL"),
        "uniswap" => Some("UNI"),
        "aave" => Some("AAVE"),
        "arbitrum" => Some("ARB"),
        "the-graph" => Some("GRT"),
        "jupiter" => Some("JUP"),
        _ => None,
    }
}

fn emoji(id: &str) -> Option<&'static str> {
    match id {
        "bitcoin" => Some("\u{20bf}"),
        "consensus" => Some("\u{2696}"),
        "nft-standards" => Some("\u{1f5bc}"),
        "dao-governance" => Some("\u{1f5f3}"),
        "metamask" | "phantom" => Some("\u{1f511}"),
        _ => None,
    }
}

/// Canvas id a record's children live on. The root keeps its own id;
/// every other branch record gets the `-ecosystem` suffix.
fn canvas_id_for(record_id: &str) -> String {
    if record_id == ROOT_CANVAS_ID {
        record_id.to_string()
    } else {
        format!("{record_id}-ecosystem")
    }
}

fn grid_position(index: usize) -> Position {
    let col = index % COLUMNS;
    let row = index / COLUMNS;
    Position::new(col as f64 * CELL_WIDTH, row as f64 * CELL_HEIGHT)
}

/// Build the immutable canvas store from the taxonomy table: every record
/// with children becomes a canvas, every record becomes a page node on its
/// parent's canvas, dependencies become same-canvas edges.
pub fn build_store() -> CanvasStore {
    let mut children: HashMap<&str, Vec<&TaxonomyRecord>> = HashMap::new();
    for record in TAXONOMY {
        if let Some(parent) = record.parent_id {
            children.entry(parent).or_default().push(record);
        }
    }

    let mut canvases = Vec::new();
    for record in TAXONOMY {
        let Some(members) = children.get(record.id) else {
            continue;
        };
        let canvas_id = canvas_id_for(record.id);
        let nodes: Vec<Node> = members
            .iter()
            .enumerate()
            .map(|(i, member)| Node {
                id: member.id.to_string(),
                position: grid_position(i),
                style: None,
                data: NodeData::Page {
                    title: member.label.to_string(),
                    canvas_id: children
                        .contains_key(member.id)
                        .then(|| canvas_id_for(member.id)),
                    description: Some(member.description.to_string()),
                    short_overview: None,
                    deep_insight: None,
                    resources: Vec::new(),
                    category: Some(member.category),
                    accent_color: None,
                    emoji: emoji(member.id).map(str::to_string),
                    token_symbol: token_symbol(member.id).map(str::to_string),
                },
            })
            .collect();
        let mut edges = Vec::new();
        for member in members {
            for dep in member.dependencies {
                if members.iter().any(|m| m.id == *dep) {
                    edges.push(Edge::new(
                        format!("edge-{dep}-{}", member.id),
                        dep.to_string(),
                        member.id.to_string(),
                    ));
                }
            }
        }
        canvases.push(Canvas {
            id: canvas_id,
            title: record.label.to_string(),
            nodes,
            edges,
        });
    }
    CanvasStore::new(ROOT_CANVAS_ID, canvases)
}

#[derive(Clone, Debug, PartialEq)]
pub struct Article {
    pub title: String,
    pub content: String,
}

/// Static article content per node id, with user overrides layered on
/// through the persistence service.
pub struct ArticleStore {
    articles: HashMap<String, Article>,
}

impl ArticleStore {
    pub fn get(&self, node_id: &str) -> Option<&Article> {
        self.articles.get(node_id)
    }

    /// Static article with any persisted user edit applied over its body.
    pub fn effective(&self, svc: &PersistenceService, node_id: &str) -> Option<Article> {
        let article = self.get(node_id)?;
        match svc.article_override(node_id) {
            Some(content) => Some(Article {
                title: article.title.clone(),
                content,
            }),
            None => Some(article.clone()),
        }
    }
}

pub fn build_articles() -> ArticleStore {
    let entries: &[(&str, &str, &str)] = &[
        (
            "bitcoin",
            "Bitcoin",
            "# Bitcoin\n\nThe first blockchain, securing value transfer through \
             proof-of-work mining. Its scripting model is deliberately minimal; \
             programmable money came later with [[ethereum]].\n\n\
             See [[consensus]] for how blocks are agreed on.",
        ),
        (
            "ethereum",
            "Ethereum",
            "# Ethereum\n\nA general-purpose smart-contract platform. Most DeFi \
             activity settles here or on rollups like [[arbitrum]].\n\n\
             Key applications include [[uniswap]] and [[aave]].",
        ),
        (
            "consensus",
            "Consensus Mechanisms",
            "# Consensus\n\nHow a distributed set of validators agrees on one \
             history. [[bitcoin]] uses proof-of-work, [[ethereum]] moved to \
             proof-of-stake.",
        ),
        (
            "uniswap",
            "Uniswap",
            "# Uniswap\n\nThe constant-product automated market maker. Liquidity \
             providers earn fees; traders swap against pools instead of an order \
             book. Indexed by [[the-graph]].",
        ),
        (
            "aave",
            "Aave",
            "# Aave\n\nLending markets where depositors earn yield and borrowers \
             post collateral. Liquidations keep the system solvent.",
        ),
        (
            "solana",
            "Solana",
            "# Solana\n\nA high-throughput chain with parallel transaction \
             execution. Swaps route through [[jupiter]]; keys live in [[phantom]].",
        ),
    ];
    let articles = entries
        .iter()
        .map(|(id, title, content)| {
            (
                id.to_string(),
                Article {
                    title: title.to_string(),
                    content: content.to_string(),
                },
            )
        })
        .collect();
    ArticleStore { articles }
}

/// A markdown article body split around `[[node-id]]` wiki-links.
#[derive(Clone, Debug, PartialEq)]
pub enum ArticleSegment {
    Text(String),
    Link(String),
}

/// Split out wiki-links before markdown rendering. Unterminated `[[` runs
/// to the end are treated as plain text.
pub fn split_wiki_links(content: &str) -> Vec<ArticleSegment> {
    let mut segments = Vec::new();
    let mut rest = content;
    while let Some(start) = rest.find("[[") {
        let Some(end) = rest[start + 2..].find("]]") else {
            break;
        };
        if start > 0 {
            segments.push(ArticleSegment::Text(rest[..start].to_string()));
        }
        let target = &rest[start + 2..start + 2 + end];
        segments.push(ArticleSegment::Link(target.trim().to_string()));
        rest = &rest[start + 2 + end + 2..];
    }
    if !rest.is_empty() {
        segments.push(ArticleSegment::Text(rest.to_string()));
    }
    segments
}
