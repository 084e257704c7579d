use crate::app::{parse_markdown, ExplorerCtx};
use crate::data::{split_wiki_links, ArticleSegment};
use leptos::prelude::*;

/// Markdown article viewer with inline `[[node-id]]` wiki-links and an
/// edit mode whose saves persist as per-node overrides.
#[component]
pub fn ArticleModal() -> impl IntoView {
    let ctx = use_context::<ExplorerCtx>().expect("explorer context");
    let explorer = ctx.explorer;
    let set_explorer = ctx.set_explorer;
    let editing = ctx.article_editing;
    let set_editing = ctx.set_article_editing;
    let edit_text = ctx.article_edit_text;
    let set_edit_text = ctx.set_article_edit_text;
    // Bumped when an override is written or cleared, to re-derive the body.
    let (article_rev, set_article_rev) = signal(0u64);

    let body_view = {
        let ctx = ctx.clone();
        move |node_id: String| {
            let _ = article_rev.get();
            let article = ctx
                .svc
                .with_value(|svc| ctx.articles.effective(svc, &node_id))?;
            let segments = split_wiki_links(&article.content)
                .into_iter()
                .map(|segment| match segment {
                    ArticleSegment::Text(text) => view! {
                        <div style="display: inline;" inner_html=parse_markdown(&text)></div>
                    }
                    .into_any(),
                    ArticleSegment::Link(target) => {
                        let store = ctx.store.clone();
                        let label = ctx
                            .store
                            .node(&target)
                            .map(|n| n.data.title().to_string())
                            .unwrap_or_else(|| target.clone());
                        view! {
                            <button
                                style="background: none; border: none; padding: 0; \
                                       color: #66bbff; cursor: pointer; font: inherit; \
                                       text-decoration: underline;"
                                on:click=move |_| {
                                    let store = store.clone();
                                    let target = target.clone();
                                    set_explorer.update(move |e| e.follow_wiki_link(&store, &target));
                                }
                            >
                                {label}
                            </button>
                        }
                        .into_any()
                    }
                })
                .collect_view();
            Some((article.title, segments))
        }
    };

    move || {
        let node_id = explorer.with(|e| e.article.clone())?;
        let (title, segments) = body_view(node_id.clone())?;
        let is_editing = editing.get();

        let start_edit = {
            let ctx = ctx.clone();
            let node_id = node_id.clone();
            move |_| {
                let article = ctx
                    .svc
                    .with_value(|svc| ctx.articles.effective(svc, &node_id));
                if let Some(article) = article {
                    set_edit_text.set(article.content);
                    set_editing.set(true);
                }
            }
        };
        let save_edit = {
            let ctx = ctx.clone();
            let node_id = node_id.clone();
            move |_| {
                ctx.svc
                    .with_value(|svc| svc.set_article_override(&node_id, &edit_text.get_untracked()));
                set_editing.set(false);
                // Explicit commit: flush any pending canvas save alongside it
                ctx.flush_save();
                set_article_rev.update(|n| *n += 1);
            }
        };
        let cancel_edit = move |_| set_editing.set(false);
        let restore_default = {
            let ctx = ctx.clone();
            let node_id = node_id.clone();
            move |_| {
                ctx.svc
                    .with_value(|svc| svc.clear_article_override(&node_id));
                set_editing.set(false);
                set_article_rev.update(|n| *n += 1);
            }
        };
        let close = move |_| {
            set_editing.set(false);
            set_explorer.update(|e| e.close_article());
        };

        Some(view! {
            <div style="position: fixed; top: 0; right: 0; bottom: 0; width: 420px; \
                        background: #0a0f15; border-left: 1px solid #2a3a46; \
                        display: flex; flex-direction: column; z-index: 50; \
                        font-family: 'JetBrains Mono', monospace; font-size: 13px; \
                        color: #dce8f0;">
                <div style="display: flex; justify-content: space-between; align-items: center; \
                            padding: 12px; border-bottom: 1px solid #2a3a46;">
                    <strong>{title}</strong>
                    <div style="display: flex; gap: 8px;">
                        {if is_editing {
                            view! {
                                <button on:click=save_edit>"save"</button>
                                <button on:click=cancel_edit>"cancel"</button>
                            }
                            .into_any()
                        } else {
                            view! {
                                <button on:click=start_edit>"edit"</button>
                                <button on:click=restore_default>"restore"</button>
                            }
                            .into_any()
                        }}
                        <button on:click=close>"close"</button>
                    </div>
                </div>
                {if is_editing {
                    view! {
                        <textarea
                            style="flex: 1; margin: 12px; background: #05070a; \
                                   color: #dce8f0; border: 1px solid #2a3a46; \
                                   outline: none; resize: none; font: inherit; padding: 8px;"
                            prop:value=edit_text
                            on:input=move |ev| set_edit_text.set(event_target_value(&ev))
                        ></textarea>
                    }
                    .into_any()
                } else {
                    view! {
                        <div style="flex: 1; overflow-y: auto; padding: 12px; line-height: 1.6;">
                            {segments}
                        </div>
                    }
                    .into_any()
                }}
            </div>
        })
    }
}
