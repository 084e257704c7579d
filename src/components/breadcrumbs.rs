use crate::app::ExplorerCtx;
use leptos::prelude::*;

/// Drill-down trail. Every ancestor is a jump target; the displayed
/// canvas renders as plain text.
#[component]
pub fn Breadcrumbs() -> impl IntoView {
    let ctx = use_context::<ExplorerCtx>().expect("explorer context");
    let explorer = ctx.explorer;
    let set_explorer = ctx.set_explorer;
    let store = ctx.store.clone();

    let crumbs = move || {
        let path = explorer.with(|e| e.nav.path().to_vec());
        let last = path.len() - 1;
        path.into_iter()
            .enumerate()
            .map(|(index, canvas_id)| {
                let title = store
                    .get(&canvas_id)
                    .map(|c| c.title.clone())
                    .unwrap_or(canvas_id);
                if index == last {
                    view! {
                        <span style="color: #dce8f0;">{title}</span>
                    }
                    .into_any()
                } else {
                    view! {
                        <button
                            style="background: none; border: none; color: #7a8a96; \
                                   cursor: pointer; font: inherit; padding: 0; \
                                   text-decoration: underline;"
                            on:click=move |_| set_explorer.update(|e| e.jump_to(index))
                        >
                            {title}
                        </button>
                        <span style="color: #3a4a56;">" / "</span>
                    }
                    .into_any()
                }
            })
            .collect_view()
    };

    view! { <nav style="display: flex; gap: 4px; align-items: center;">{crumbs}</nav> }
}
