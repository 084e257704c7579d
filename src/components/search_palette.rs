use crate::app::ExplorerCtx;
use leptos::prelude::*;

#[derive(Clone)]
struct Hit {
    node_id: String,
    title: String,
    canvas_title: String,
}

const RESULT_LIMIT: usize = 8;

/// Modal search over every canvas. Enter or click reveals the hit on its
/// owning canvas, navigating there first when needed.
#[component]
pub fn SearchPalette() -> impl IntoView {
    let ctx = use_context::<ExplorerCtx>().expect("explorer context");
    let explorer = ctx.explorer;
    let set_explorer = ctx.set_explorer;
    let (query, set_query) = signal(String::new());

    let hits = {
        let index = ctx.index.clone();
        move || {
            index
                .search(&query.get(), RESULT_LIMIT)
                .into_iter()
                .map(|entry| Hit {
                    node_id: entry.node_id.clone(),
                    title: entry.title.clone(),
                    canvas_title: entry.canvas_title.clone(),
                })
                .collect::<Vec<_>>()
        }
    };

    let reveal = {
        let store = ctx.store.clone();
        move |node_id: &str| {
            let store = store.clone();
            let node_id = node_id.to_string();
            set_explorer.update(move |e| e.reveal(&store, &node_id));
            set_query.set(String::new());
        }
    };

    let on_keydown = {
        let hits = hits.clone();
        let reveal = reveal.clone();
        move |ev: web_sys::KeyboardEvent| match ev.key().as_str() {
            "Escape" => {
                set_explorer.update(|e| e.close_search());
                set_query.set(String::new());
            }
            "Enter" => {
                if let Some(first) = hits().first() {
                    reveal(&first.node_id);
                }
            }
            _ => {}
        }
    };

    let result_rows = {
        let hits = hits.clone();
        move || {
            hits()
                .into_iter()
                .map(|hit| {
                    let reveal = reveal.clone();
                    let node_id = hit.node_id.clone();
                    view! {
                        <button
                            style="display: flex; justify-content: space-between; width: 100%; \
                                   background: none; border: none; border-bottom: 1px solid #1a2530; \
                                   color: #dce8f0; cursor: pointer; font: inherit; \
                                   padding: 8px 12px; text-align: left;"
                            on:click=move |_| reveal(&node_id)
                        >
                            <span>{hit.title}</span>
                            <span style="color: #7a8a96;">{hit.canvas_title}</span>
                        </button>
                    }
                })
                .collect_view()
        }
    };

    move || {
        if !explorer.with(|e| e.search_open) {
            return None;
        }
        Some(view! {
            <div style="position: fixed; inset: 0; background: rgba(0, 0, 0, 0.6); \
                        display: flex; justify-content: center; align-items: flex-start; \
                        padding-top: 15vh; z-index: 100;"
                on:mousedown=move |_| set_explorer.update(|e| e.close_search())
            >
                <div
                    style="width: 480px; background: #0a0f15; border: 1px solid #2a3a46; \
                           border-radius: 8px; overflow: hidden; \
                           font-family: 'JetBrains Mono', monospace; font-size: 13px;"
                    on:mousedown=move |ev: web_sys::MouseEvent| ev.stop_propagation()
                >
                    <input
                        type="text"
                        placeholder="Search nodes..."
                        autofocus=true
                        prop:value=query
                        style="width: 100%; box-sizing: border-box; padding: 12px; \
                               background: #05070a; color: #dce8f0; border: none; \
                               border-bottom: 1px solid #2a3a46; outline: none; font: inherit;"
                        on:input=move |ev| set_query.set(event_target_value(&ev))
                        on:keydown=on_keydown.clone()
                    />
                    <div style="max-height: 320px; overflow-y: auto;">{result_rows.clone()}</div>
                </div>
            </div>
        })
    }
}
