use crate::board::{CanvasBoard, SaveDebouncer, SAVE_DEBOUNCE_MS};
use crate::canvas::{get_canvas_context, render_canvas};
use crate::components::{ArticleModal, Breadcrumbs, HelpModal, SearchPalette};
use crate::data::{build_articles, build_store, ArticleStore};
use crate::navigation::ExplorerState;
use crate::persistence::PersistenceService;
use crate::search::SearchIndex;
use crate::state::{Camera, CanvasStore, Position, DEFAULT_NODE_HEIGHT, DEFAULT_NODE_WIDTH};
use leptos::prelude::*;
use leptos::task::spawn_local;
use pulldown_cmark::{html, Parser};
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;
use std::sync::Arc;

pub fn parse_markdown(md: &str) -> String {
    let parser = Parser::new(md);
    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);
    html_output
}

fn point_near_line(px: f64, py: f64, x1: f64, y1: f64, x2: f64, y2: f64, threshold: f64) -> bool {
    let dx = x2 - x1;
    let dy = y2 - y1;
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return ((px - x1).powi(2) + (py - y1).powi(2)).sqrt() < threshold;
    }
    let t = (((px - x1) * dx + (py - y1) * dy) / len_sq).clamp(0.0, 1.0);
    let closest_x = x1 + t * dx;
    let closest_y = y1 + t * dy;
    ((px - closest_x).powi(2) + (py - closest_y).powi(2)).sqrt() < threshold
}

#[derive(Clone, Default)]
struct DragState {
    node_id: Option<String>,
    grab_dx: f64,
    grab_dy: f64,
}

#[derive(Clone, Default)]
struct PanState {
    is_panning: bool,
    start_x: f64,
    start_y: f64,
    camera_start_x: f64,
    camera_start_y: f64,
}

#[derive(Clone, Default)]
struct EdgeCreationState {
    from_node_id: Option<String>,
    current_x: f64,
    current_y: f64,
}

/// Shared handles for the component tree. The immutable stores are `Arc`s;
/// the non-Send runtime state (live board, debouncer, storage service)
/// lives in arena-backed `StoredValue<_, LocalStorage>` slots next to the
/// bump-counter signals, so the context itself stays `Send + Sync` the way
/// the view tree requires.
#[derive(Clone)]
pub struct ExplorerCtx {
    pub store: Arc<CanvasStore>,
    pub articles: Arc<ArticleStore>,
    pub index: Arc<SearchIndex>,
    pub svc: StoredValue<PersistenceService, LocalStorage>,
    pub board: StoredValue<RefCell<CanvasBoard>, LocalStorage>,
    pub debouncer: StoredValue<SaveDebouncer, LocalStorage>,
    pub explorer: ReadSignal<ExplorerState>,
    pub set_explorer: WriteSignal<ExplorerState>,
    pub board_rev: ReadSignal<u64>,
    pub set_board_rev: WriteSignal<u64>,
    pub learned_rev: ReadSignal<u64>,
    pub set_learned_rev: WriteSignal<u64>,
    pub article_editing: ReadSignal<bool>,
    pub set_article_editing: WriteSignal<bool>,
    pub article_edit_text: ReadSignal<String>,
    pub set_article_edit_text: WriteSignal<String>,
}

impl ExplorerCtx {
    /// Flush any pending debounced save synchronously.
    pub fn flush_save(&self) {
        self.debouncer.with_value(|d| d.cancel());
        self.board.with_value(|b| b.borrow().save_now());
    }
}

#[component]
pub fn App() -> impl IntoView {
    let store = Arc::new(build_store());
    let articles = Arc::new(build_articles());
    let index = Arc::new(SearchIndex::build(&store));
    let svc = PersistenceService::new(Rc::new(crate::persistence::LocalStorage));
    let board = StoredValue::new_local(RefCell::new(CanvasBoard::open(
        store.root_id(),
        &store,
        svc.clone(),
    )));
    let svc = StoredValue::new_local(svc);
    let debouncer = StoredValue::new_local(SaveDebouncer::new());

    let (explorer, set_explorer) = signal(ExplorerState::new(store.root_id()));
    let (board_rev, set_board_rev) = signal(0u64);
    let (learned_rev, set_learned_rev) = signal(0u64);
    let (article_editing, set_article_editing) = signal(false);
    let (article_edit_text, set_article_edit_text) = signal(String::new());

    let ctx = ExplorerCtx {
        store: store.clone(),
        articles,
        index,
        svc,
        board,
        debouncer,
        explorer,
        set_explorer,
        board_rev,
        set_board_rev,
        learned_rev,
        set_learned_rev,
        article_editing,
        set_article_editing,
        article_edit_text,
        set_article_edit_text,
    };
    provide_context(ctx.clone());

    let (camera, set_camera) = signal(Camera::new());
    let (drag_state, set_drag_state) = signal(DragState::default());
    let (pan_state, set_pan_state) = signal(PanState::default());
    let (edge_creation, set_edge_creation) = signal(EdgeCreationState::default());
    let (editing_node, set_editing_node) = signal::<Option<String>>(None);
    let (selected_edge, set_selected_edge) = signal::<Option<String>>(None);
    let canvas_ref = NodeRef::<leptos::html::Canvas>::new();

    // Remount rule: when the top-of-stack canvas changes, flush the old
    // board's pending save and build a fresh board for the new canvas.
    Effect::new({
        let ctx = ctx.clone();
        move || {
            let active = explorer.with(|e| e.nav.current().to_string());
            let mounted = ctx.board.with_value(|b| b.borrow().canvas_id().to_string());
            if active != mounted {
                ctx.flush_save();
                let svc = ctx.svc.get_value();
                ctx.board
                    .with_value(|b| *b.borrow_mut() = CanvasBoard::open(&active, &ctx.store, svc));
                set_editing_node.set(None);
                set_selected_edge.set(None);
                set_board_rev.update(|n| *n += 1);
            }
        }
    });

    // Trailing-edge debounced save: every revision restarts the window.
    // A remount bumps the signal with a pristine board (revision 0), and a
    // pristine board never schedules a write.
    Effect::new({
        let ctx = ctx.clone();
        move || {
            if board_rev.get() == 0 {
                return;
            }
            if ctx.board.with_value(|b| b.borrow().revision()) == 0 {
                return;
            }
            let generation = ctx.debouncer.with_value(|d| d.schedule());
            let ctx = ctx.clone();
            spawn_local(async move {
                gloo_timers::future::TimeoutFuture::new(SAVE_DEBOUNCE_MS).await;
                let still_pending = ctx
                    .debouncer
                    .try_with_value(|d| d.is_current(generation))
                    .unwrap_or(false);
                if still_pending {
                    let _ = ctx.board.try_with_value(|b| b.borrow().save_now());
                }
            });
        }
    });

    // After a navigation-driven selection, give layout one beat, then
    // center the camera on the selected node.
    Effect::new({
        let ctx = ctx.clone();
        move || {
            let Some(selected) = explorer.with(|e| e.selected.clone()) else {
                return;
            };
            let ctx = ctx.clone();
            spawn_local(async move {
                gloo_timers::future::TimeoutFuture::new(120).await;
                let Some(canvas) = canvas_ref.get_untracked() else {
                    return;
                };
                let position = ctx
                    .board
                    .try_with_value(|b| {
                        b.borrow()
                            .node(&selected)
                            .map(|n| (n.position, n.width(), n.height()))
                    })
                    .flatten();
                if let Some((position, w, h)) = position {
                    let rect = canvas.get_bounding_client_rect();
                    set_camera.update(|c| {
                        c.x = position.x + w / 2.0 - rect.width() / c.zoom / 2.0;
                        c.y = position.y + h / 2.0 - rect.height() / c.zoom / 2.0;
                    });
                }
            });
        }
    });

    // Render pass
    Effect::new({
        let ctx = ctx.clone();
        move || {
            let _ = board_rev.get();
            let _ = learned_rev.get();
            let current_camera = camera.get();
            let selected = explorer.with(|e| e.selected.clone());
            let creation = edge_creation.get();

            let Some(canvas) = canvas_ref.get() else {
                return;
            };
            let rect = canvas.get_bounding_client_rect();
            let display_width = rect.width() as u32;
            let display_height = rect.height() as u32;
            if canvas.width() != display_width {
                canvas.set_width(display_width);
            }
            if canvas.height() != display_height {
                canvas.set_height(display_height);
            }

            ctx.board.with_value(|b| {
                let board = b.borrow();
                let learned: HashSet<String> = ctx.svc.with_value(|svc| {
                    board
                        .nodes
                        .iter()
                        .filter(|n| svc.is_learned(&n.id))
                        .map(|n| n.id.clone())
                        .collect()
                });
                if let Ok(render_ctx) = get_canvas_context(&canvas) {
                    render_canvas(
                        &render_ctx,
                        &canvas,
                        &board.nodes,
                        &board.edges,
                        &current_camera,
                        selected.as_ref(),
                        &learned,
                        creation
                            .from_node_id
                            .as_ref()
                            .map(|id| (id, creation.current_x, creation.current_y)),
                    );
                }
            });
        }
    });

    let on_mouse_down = {
        let ctx = ctx.clone();
        move |ev: web_sys::MouseEvent| {
            if editing_node.get_untracked().is_some() {
                return;
            }
            let Some(canvas) = canvas_ref.get_untracked() else {
                return;
            };
            let _ = canvas.focus();
            let rect = canvas.get_bounding_client_rect();
            let canvas_x = ev.client_x() as f64 - rect.left();
            let canvas_y = ev.client_y() as f64 - rect.top();
            let cam = camera.get_untracked();
            let (world_x, world_y) = cam.screen_to_world(canvas_x, canvas_y);

            let hit = ctx.board.with_value(|b| {
                b.borrow()
                    .nodes
                    .iter()
                    .rev()
                    .find(|n| n.contains_point(world_x, world_y))
                    .map(|n| (n.id.clone(), n.position))
            });

            if let Some((node_id, position)) = hit {
                set_selected_edge.set(None);
                if ev.shift_key() {
                    set_edge_creation.set(EdgeCreationState {
                        from_node_id: Some(node_id),
                        current_x: canvas_x,
                        current_y: canvas_y,
                    });
                } else {
                    set_explorer.update(|e| e.select_node(&node_id));
                    ctx.board.with_value(|b| b.borrow_mut().begin_drag(&node_id));
                    set_drag_state.set(DragState {
                        node_id: Some(node_id),
                        grab_dx: world_x - position.x,
                        grab_dy: world_y - position.y,
                    });
                }
                return;
            }

            // Edge hit test, then empty-space pan
            let edge_hit = ctx.board.with_value(|b| {
                let board = b.borrow();
                board
                    .edges
                    .iter()
                    .find(|edge| {
                        let from = board.node(&edge.source);
                        let to = board.node(&edge.target);
                        if let (Some(from), Some(to)) = (from, to) {
                            point_near_line(
                                world_x,
                                world_y,
                                from.position.x + from.width() / 2.0,
                                from.position.y + from.height() / 2.0,
                                to.position.x + to.width() / 2.0,
                                to.position.y + to.height() / 2.0,
                                10.0 / cam.zoom,
                            )
                        } else {
                            false
                        }
                    })
                    .map(|e| e.id.clone())
            });

            if let Some(edge_id) = edge_hit {
                set_explorer.update(|e| e.clear_selection());
                set_selected_edge.set(Some(edge_id));
            } else {
                set_selected_edge.set(None);
                set_explorer.update(|e| e.clear_selection());
                set_pan_state.set(PanState {
                    is_panning: true,
                    start_x: canvas_x,
                    start_y: canvas_y,
                    camera_start_x: cam.x,
                    camera_start_y: cam.y,
                });
            }
        }
    };

    let on_mouse_move = {
        let ctx = ctx.clone();
        move |ev: web_sys::MouseEvent| {
            let Some(canvas) = canvas_ref.get_untracked() else {
                return;
            };
            let rect = canvas.get_bounding_client_rect();
            let canvas_x = ev.client_x() as f64 - rect.left();
            let canvas_y = ev.client_y() as f64 - rect.top();

            let drag = drag_state.get_untracked();
            let pan = pan_state.get_untracked();
            let creation = edge_creation.get_untracked();

            if let Some(node_id) = &drag.node_id {
                let cam = camera.get_untracked();
                let (world_x, world_y) = cam.screen_to_world(canvas_x, canvas_y);
                ctx.board.with_value(|b| {
                    b.borrow_mut().drag_to(
                        node_id,
                        Position::new(world_x - drag.grab_dx, world_y - drag.grab_dy),
                    )
                });
                set_board_rev.update(|n| *n += 1);
            } else if creation.from_node_id.is_some() {
                set_edge_creation.update(|s| {
                    s.current_x = canvas_x;
                    s.current_y = canvas_y;
                });
            } else if pan.is_panning {
                let cam = camera.get_untracked();
                let dx = (canvas_x - pan.start_x) / cam.zoom;
                let dy = (canvas_y - pan.start_y) / cam.zoom;
                set_camera.update(|c| {
                    c.x = pan.camera_start_x - dx;
                    c.y = pan.camera_start_y - dy;
                });
            }
        }
    };

    let on_mouse_up = {
        let ctx = ctx.clone();
        move |ev: web_sys::MouseEvent| {
            let creation = edge_creation.get_untracked();
            if let Some(from_id) = creation.from_node_id {
                if let Some(canvas) = canvas_ref.get_untracked() {
                    let rect = canvas.get_bounding_client_rect();
                    let canvas_x = ev.client_x() as f64 - rect.left();
                    let canvas_y = ev.client_y() as f64 - rect.top();
                    let cam = camera.get_untracked();
                    let (world_x, world_y) = cam.screen_to_world(canvas_x, canvas_y);
                    let target = ctx.board.with_value(|b| {
                        b.borrow()
                            .nodes
                            .iter()
                            .rev()
                            .find(|n| n.contains_point(world_x, world_y))
                            .map(|n| n.id.clone())
                    });
                    // Self-loops are allowed; connect is permissive.
                    if let Some(target) = target {
                        ctx.board
                            .with_value(|b| b.borrow_mut().connect(&from_id, &target));
                        set_board_rev.update(|n| *n += 1);
                    }
                }
                set_edge_creation.set(EdgeCreationState::default());
                return;
            }

            if let Some(node_id) = drag_state.get_untracked().node_id {
                ctx.board.with_value(|b| b.borrow_mut().end_drag(&node_id));
                set_board_rev.update(|n| *n += 1);
            }
            set_drag_state.set(DragState::default());
            set_pan_state.set(PanState::default());
        }
    };

    let on_wheel = move |ev: web_sys::WheelEvent| {
        ev.prevent_default();
        let Some(canvas) = canvas_ref.get_untracked() else {
            return;
        };
        let rect = canvas.get_bounding_client_rect();
        let canvas_x = ev.client_x() as f64 - rect.left();
        let canvas_y = ev.client_y() as f64 - rect.top();
        let zoom_factor = if ev.delta_y() < 0.0 { 1.1 } else { 0.9 };
        set_camera.update(|c| {
            let (world_x, world_y) = c.screen_to_world(canvas_x, canvas_y);
            c.zoom = (c.zoom * zoom_factor).clamp(0.1, 5.0);
            c.x = world_x - canvas_x / c.zoom;
            c.y = world_y - canvas_y / c.zoom;
        });
    };

    let on_double_click = {
        let ctx = ctx.clone();
        move |ev: web_sys::MouseEvent| {
            let Some(canvas) = canvas_ref.get_untracked() else {
                return;
            };
            let rect = canvas.get_bounding_client_rect();
            let canvas_x = ev.client_x() as f64 - rect.left();
            let canvas_y = ev.client_y() as f64 - rect.top();
            let cam = camera.get_untracked();
            let (world_x, world_y) = cam.screen_to_world(canvas_x, canvas_y);

            let hit = ctx.board.with_value(|b| {
                b.borrow()
                    .nodes
                    .iter()
                    .rev()
                    .find(|n| n.contains_point(world_x, world_y))
                    .map(|n| (n.id.clone(), n.data.clone()))
            });

            match hit {
                Some((node_id, data)) => {
                    if data.canvas_link().is_some() {
                        let store = ctx.store.clone();
                        set_explorer.update(|e| e.enter_node(&store, &node_id));
                    } else if data.is_page() {
                        set_explorer.update(|e| {
                            e.select_node(&node_id);
                            e.open_article(&node_id);
                        });
                    } else {
                        set_editing_node.set(Some(node_id));
                    }
                }
                None => {
                    let position = Position::new(
                        world_x - DEFAULT_NODE_WIDTH / 2.0,
                        world_y - DEFAULT_NODE_HEIGHT / 2.0,
                    );
                    let id = ctx.board.with_value(|b| {
                        b.borrow_mut()
                            .add_user_card(position, "New card".to_string())
                    });
                    set_explorer.update(|e| e.select_node(&id));
                    set_editing_node.set(Some(id));
                    set_board_rev.update(|n| *n += 1);
                }
            }
        }
    };

    let on_keydown = {
        let ctx = ctx.clone();
        move |ev: web_sys::KeyboardEvent| {
            if editing_node.get_untracked().is_some() {
                return;
            }
            let key = ev.key();
            let selected = explorer.with_untracked(|e| e.selected.clone());

            match key.as_str() {
                "Backspace" | "Delete" => {
                    if let Some(edge_id) = selected_edge.get_untracked() {
                        ctx.board.with_value(|b| b.borrow_mut().delete_edge(&edge_id));
                        set_selected_edge.set(None);
                        set_board_rev.update(|n| *n += 1);
                    } else if let Some(node_id) = selected {
                        ctx.board.with_value(|b| b.borrow_mut().delete_node(&node_id));
                        set_explorer.update(|e| e.clear_selection());
                        set_board_rev.update(|n| *n += 1);
                    }
                }
                "d" | "D" => {
                    if let Some(node_id) = selected {
                        let copy = ctx
                            .board
                            .with_value(|b| b.borrow_mut().duplicate_node(&node_id));
                        if let Some(copy_id) = copy {
                            set_explorer.update(|e| e.select_node(&copy_id));
                            set_board_rev.update(|n| *n += 1);
                        }
                    }
                }
                "l" | "L" => {
                    if let Some(node_id) = selected {
                        ctx.svc.with_value(|svc| {
                            let learned = svc.is_learned(&node_id);
                            svc.set_learned(&node_id, !learned);
                        });
                        set_learned_rev.update(|n| *n += 1);
                    }
                }
                "z" | "Z" => {
                    if ev.ctrl_key() || ev.meta_key() {
                        ev.prevent_default();
                        let changed = ctx.board.with_value(|b| {
                            if ev.shift_key() {
                                b.borrow_mut().redo()
                            } else {
                                b.borrow_mut().undo()
                            }
                        });
                        if changed {
                            set_board_rev.update(|n| *n += 1);
                        }
                    }
                }
                "y" | "Y" => {
                    if ev.ctrl_key() || ev.meta_key() {
                        ev.prevent_default();
                        if ctx.board.with_value(|b| b.borrow_mut().redo()) {
                            set_board_rev.update(|n| *n += 1);
                        }
                    }
                }
                "/" => {
                    ev.prevent_default();
                    set_explorer.update(|e| e.open_search());
                }
                "k" | "K" => {
                    if ev.ctrl_key() || ev.meta_key() {
                        ev.prevent_default();
                        set_explorer.update(|e| e.open_search());
                    }
                }
                "?" => {
                    set_explorer.update(|e| e.open_help());
                }
                "Enter" => {
                    if let Some(node_id) = selected {
                        let store = ctx.store.clone();
                        set_explorer.update(|e| e.enter_node(&store, &node_id));
                    }
                }
                "Escape" => {
                    if edge_creation.get_untracked().from_node_id.is_some() {
                        set_edge_creation.set(EdgeCreationState::default());
                    } else if selected_edge.get_untracked().is_some() {
                        set_selected_edge.set(None);
                    } else {
                        set_explorer.update(|e| {
                            e.escape();
                        });
                    }
                }
                _ => {}
            }
        }
    };

    let on_reset = {
        let ctx = ctx.clone();
        move |_| {
            let confirmed = web_sys::window()
                .and_then(|w| {
                    w.confirm_with_message(
                        "Reset this canvas to its defaults? Your edits here will be lost.",
                    )
                    .ok()
                })
                .unwrap_or(false);
            if confirmed {
                ctx.debouncer.with_value(|d| d.cancel());
                ctx.board
                    .with_value(|b| b.borrow_mut().reset_to_defaults(&ctx.store));
                set_explorer.update(|e| e.clear_selection());
                set_selected_edge.set(None);
                set_board_rev.update(|n| *n += 1);
            }
        }
    };

    // Inline editor for user-card titles, positioned over the node.
    let editing_view = {
        let ctx = ctx.clone();
        move || {
            let node_id = editing_node.get()?;
            let cam = camera.get();
            let bounds = ctx.board.with_value(|b| {
                b.borrow()
                    .node(&node_id)
                    .map(|n| (n.position, n.width(), n.height(), n.data.title().to_string()))
            });
            let (position, w, h, title) = bounds?;
            let (screen_x, screen_y) = cam.world_to_screen(position.x, position.y);
            let screen_w = w * cam.zoom;
            let screen_h = h * cam.zoom;
            let font_size = (14.0 * cam.zoom).max(8.0);

            let commit = {
                let ctx = ctx.clone();
                let node_id = node_id.clone();
                move |value: String| {
                    ctx.board
                        .with_value(|b| b.borrow_mut().set_card_title(&node_id, value));
                    ctx.flush_save();
                    set_editing_node.set(None);
                    set_board_rev.update(|n| *n += 1);
                }
            };
            let commit_blur = commit.clone();

            Some(view! {
                <input
                    type="text"
                    value=title
                    autofocus=true
                    style=format!(
                        "position: absolute; left: {}px; top: {}px; width: {}px; height: {}px; \
                         font-size: {}px; text-align: center; background: #05070a; \
                         color: #dce8f0; border: 1px solid #aaffbb; outline: none; \
                         box-sizing: border-box; font-family: 'JetBrains Mono', monospace;",
                        screen_x, screen_y, screen_w, screen_h, font_size
                    )
                    on:blur=move |ev: web_sys::FocusEvent| {
                        commit_blur(event_target_value(&ev));
                    }
                    on:keydown=move |ev: web_sys::KeyboardEvent| {
                        match ev.key().as_str() {
                            "Enter" => commit(event_target_value(&ev)),
                            "Escape" => set_editing_node.set(None),
                            _ => {}
                        }
                    }
                />
            })
        }
    };

    let undo_disabled = {
        let ctx = ctx.clone();
        move || {
            let _ = board_rev.get();
            ctx.board.with_value(|b| !b.borrow().can_undo())
        }
    };
    let redo_disabled = {
        let ctx = ctx.clone();
        move || {
            let _ = board_rev.get();
            ctx.board.with_value(|b| !b.borrow().can_redo())
        }
    };
    let learned_label = {
        let ctx = ctx.clone();
        move || {
            let _ = board_rev.get();
            let _ = learned_rev.get();
            ctx.board.with_value(|b| {
                let board = b.borrow();
                let total = board.nodes.len();
                let learned = ctx
                    .svc
                    .with_value(|svc| svc.learned_count(board.nodes.iter().map(|n| n.id.as_str())));
                format!("learned {learned}/{total}")
            })
        }
    };

    let undo_click = {
        let ctx = ctx.clone();
        move |_| {
            if ctx.board.with_value(|b| b.borrow_mut().undo()) {
                set_board_rev.update(|n| *n += 1);
            }
        }
    };
    let redo_click = {
        let ctx = ctx.clone();
        move |_| {
            if ctx.board.with_value(|b| b.borrow_mut().redo()) {
                set_board_rev.update(|n| *n += 1);
            }
        }
    };

    view! {
        <div style="width: 100vw; height: 100vh; overflow: hidden; background: #05070a; position: relative;">
            <canvas
                node_ref=canvas_ref
                tabindex="0"
                style="width: 100%; height: 100%; display: block; cursor: crosshair; outline: none;"
                on:mousedown=on_mouse_down
                on:mousemove=on_mouse_move
                on:mouseup=on_mouse_up.clone()
                on:mouseleave=on_mouse_up
                on:wheel=on_wheel
                on:dblclick=on_double_click
                on:keydown=on_keydown
            />
            <div style="position: fixed; top: 12px; left: 12px; display: flex; gap: 8px; align-items: center; \
                        font-family: 'JetBrains Mono', monospace; font-size: 12px;">
                <Breadcrumbs/>
            </div>
            <div style="position: fixed; top: 12px; right: 12px; display: flex; gap: 8px; \
                        font-family: 'JetBrains Mono', monospace; font-size: 12px; color: #7a8a96;">
                <span>{learned_label}</span>
                <button disabled=undo_disabled on:click=undo_click>"undo"</button>
                <button disabled=redo_disabled on:click=redo_click>"redo"</button>
                <button on:click=move |_| set_explorer.update(|e| e.open_search())>"search"</button>
                <button on:click=move |_| set_explorer.update(|e| e.open_help())>"help"</button>
                <button on:click=on_reset>"reset"</button>
            </div>
            {editing_view}
            <SearchPalette/>
            <ArticleModal/>
            <HelpModal/>
            <div style="position: fixed; bottom: 12px; left: 12px; color: #7a8a96; \
                        font-family: 'JetBrains Mono', monospace; font-size: 11px; letter-spacing: 0.5px;">
                "[DBLCLK] open/add  [SHIFT+DRAG] connect  [D] duplicate  [L] learned  [/] search  [DEL] delete  [ESC] back"
            </div>
        </div>
    }
}
