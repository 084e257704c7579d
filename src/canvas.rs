use crate::state::{Camera, Edge, Node, NodeData};
use std::collections::HashSet;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

const BG_COLOR: &str = "#05070a";
const GRID_COLOR: &str = "#0a1218";
const BORDER_SELECTED: &str = "#aaffbb";
const TEXT_COLOR: &str = "#dce8f0";
const TEXT_DIM: &str = "#7a8a96";
const NODE_BG_CARD: &str = "#0c1014";
const NODE_BG_PAGE: &str = "#080e16";
const EDGE_COLOR: &str = "#2a4a5a";
const EDGE_USER_COLOR: &str = "#44aa88";
const EDGE_PREVIEW: &str = "#aaffbb";
const LEARNED_COLOR: &str = "#44dd66";
const FONT: &str = "JetBrains Mono, Fira Code, Consolas, monospace";

#[allow(clippy::too_many_arguments)]
pub fn render_canvas(
    ctx: &CanvasRenderingContext2d,
    canvas: &HtmlCanvasElement,
    nodes: &[Node],
    edges: &[Edge],
    camera: &Camera,
    selected: Option<&String>,
    learned: &HashSet<String>,
    edge_preview: Option<(&String, f64, f64)>,
) {
    let width = canvas.width() as f64;
    let height = canvas.height() as f64;

    ctx.set_fill_style_str(BG_COLOR);
    ctx.fill_rect(0.0, 0.0, width, height);

    draw_grid(ctx, camera, width, height);

    for edge in edges {
        draw_edge(ctx, nodes, edge, camera);
    }

    if let Some((from_id, to_x, to_y)) = edge_preview {
        draw_edge_preview(ctx, nodes, from_id, to_x, to_y, camera);
    }

    for node in nodes {
        let is_selected = selected.map_or(false, |id| id == &node.id);
        let is_learned = learned.contains(&node.id);
        draw_node(ctx, node, camera, is_selected, is_learned);
    }
}

fn draw_grid(ctx: &CanvasRenderingContext2d, camera: &Camera, width: f64, height: f64) {
    let grid_size = 50.0 * camera.zoom;
    if grid_size < 10.0 {
        return;
    }

    ctx.set_stroke_style_str(GRID_COLOR);
    ctx.set_line_width(1.0);

    let offset_x = (camera.x * camera.zoom) % grid_size;
    let offset_y = (camera.y * camera.zoom) % grid_size;

    let mut x = -offset_x;
    while x < width {
        ctx.begin_path();
        ctx.move_to(x, 0.0);
        ctx.line_to(x, height);
        ctx.stroke();
        x += grid_size;
    }

    let mut y = -offset_y;
    while y < height {
        ctx.begin_path();
        ctx.move_to(0.0, y);
        ctx.line_to(width, y);
        ctx.stroke();
        y += grid_size;
    }
}

fn draw_node(
    ctx: &CanvasRenderingContext2d,
    node: &Node,
    camera: &Camera,
    is_selected: bool,
    is_learned: bool,
) {
    let (screen_x, screen_y) = camera.world_to_screen(node.position.x, node.position.y);
    let screen_width = node.width() * camera.zoom;
    let screen_height = node.height() * camera.zoom;

    let bg_color = if node.data.is_page() {
        NODE_BG_PAGE
    } else {
        NODE_BG_CARD
    };
    ctx.set_fill_style_str(bg_color);
    ctx.fill_rect(screen_x, screen_y, screen_width, screen_height);

    let accent = node.data.accent_color().unwrap_or(TEXT_DIM);
    if is_selected {
        ctx.set_stroke_style_str(BORDER_SELECTED);
        ctx.set_line_width(1.5);
        ctx.set_shadow_color(BORDER_SELECTED);
        ctx.set_shadow_blur(8.0);
    } else {
        ctx.set_stroke_style_str(accent);
        ctx.set_line_width(1.0);
        ctx.set_shadow_blur(0.0);
    }
    ctx.stroke_rect(screen_x, screen_y, screen_width, screen_height);
    ctx.set_shadow_blur(0.0);

    // Title, centered
    ctx.set_fill_style_str(if is_selected { BORDER_SELECTED } else { TEXT_COLOR });
    let font_size = (13.0 * camera.zoom).max(8.0);
    ctx.set_font(&format!("{}px {}", font_size, FONT));
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    let text_x = screen_x + screen_width / 2.0;
    let text_y = screen_y + screen_height / 2.0;
    let max_width = screen_width - 16.0 * camera.zoom;
    let title = match (&node.data, node.data.title()) {
        (NodeData::Page { emoji: Some(e), .. }, t) => format!("{e} {t}"),
        (_, t) if t.is_empty() => "(untitled)".to_string(),
        (_, t) => t.to_string(),
    };
    let _ = ctx.fill_text_with_max_width(&title, text_x, text_y, max_width);

    // Top-left badge: category label or CARD marker
    let badge = match &node.data {
        NodeData::Page { category, .. } => category.map(|c| c.label()).unwrap_or("PAGE"),
        NodeData::Card { .. } => "CARD",
    };
    ctx.set_fill_style_str(accent);
    let small_font = (9.0 * camera.zoom).max(6.0);
    ctx.set_font(&format!("{}px {}", small_font, FONT));
    ctx.set_text_align("left");
    ctx.set_text_baseline("top");
    let _ = ctx.fill_text(
        badge,
        screen_x + 4.0 * camera.zoom,
        screen_y + 4.0 * camera.zoom,
    );

    // Bottom-right: token symbol, drill-down arrow, learned tick
    ctx.set_text_align("right");
    ctx.set_text_baseline("bottom");
    let mut footer = String::new();
    if let NodeData::Page {
        token_symbol: Some(symbol),
        ..
    } = &node.data
    {
        footer.push_str(symbol);
    }
    if node.data.canvas_link().is_some() {
        footer.push_str(" \u{25b8}");
    }
    ctx.set_fill_style_str(TEXT_DIM);
    let _ = ctx.fill_text(
        footer.trim(),
        screen_x + screen_width - 4.0 * camera.zoom,
        screen_y + screen_height - 4.0 * camera.zoom,
    );
    if is_learned {
        ctx.set_fill_style_str(LEARNED_COLOR);
        let _ = ctx.fill_text(
            "\u{2713}",
            screen_x + screen_width - 4.0 * camera.zoom,
            screen_y + 14.0 * camera.zoom,
        );
    }
}

fn node_center(node: &Node) -> (f64, f64) {
    (
        node.position.x + node.width() / 2.0,
        node.position.y + node.height() / 2.0,
    )
}

fn draw_edge(ctx: &CanvasRenderingContext2d, nodes: &[Node], edge: &Edge, camera: &Camera) {
    let from = nodes.iter().find(|n| n.id == edge.source);
    let to = nodes.iter().find(|n| n.id == edge.target);

    if let (Some(from), Some(to)) = (from, to) {
        let (fx, fy) = node_center(from);
        let (tx, ty) = node_center(to);
        let (from_x, from_y) = camera.world_to_screen(fx, fy);
        let (to_x, to_y) = camera.world_to_screen(tx, ty);

        // User-drawn edges carry the animated flag and get the brighter
        // accent stroke; taxonomy defaults stay dim.
        if edge.animated {
            ctx.set_stroke_style_str(EDGE_USER_COLOR);
            ctx.set_line_width(1.5);
        } else {
            ctx.set_stroke_style_str(EDGE_COLOR);
            ctx.set_line_width(1.0);
        }
        ctx.begin_path();
        ctx.move_to(from_x, from_y);
        ctx.line_to(to_x, to_y);
        ctx.stroke();
    }
}

fn draw_edge_preview(
    ctx: &CanvasRenderingContext2d,
    nodes: &[Node],
    from_id: &str,
    to_screen_x: f64,
    to_screen_y: f64,
    camera: &Camera,
) {
    if let Some(from) = nodes.iter().find(|n| n.id == from_id) {
        let (fx, fy) = node_center(from);
        let (from_x, from_y) = camera.world_to_screen(fx, fy);

        ctx.set_stroke_style_str(EDGE_PREVIEW);
        ctx.set_line_width(1.0);
        ctx.begin_path();
        ctx.move_to(from_x, from_y);
        ctx.line_to(to_screen_x, to_screen_y);
        ctx.stroke();
    }
}

pub fn get_canvas_context(
    canvas: &HtmlCanvasElement,
) -> Result<CanvasRenderingContext2d, JsValue> {
    Ok(canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("Failed to get 2d context"))?
        .dyn_into::<CanvasRenderingContext2d>()?)
}
