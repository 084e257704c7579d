use crate::app::ExplorerCtx;
use leptos::prelude::*;

const BINDINGS: &[(&str, &str)] = &[
    ("double-click node", "open article / drill into ecosystem"),
    ("double-click empty", "add a card"),
    ("drag", "move a node (one undo step per drag)"),
    ("shift+drag", "connect two nodes"),
    ("enter", "drill into the selected node"),
    ("d", "duplicate the selected node"),
    ("l", "toggle learned on the selected node"),
    ("delete / backspace", "delete the selected node or edge"),
    ("ctrl+z / ctrl+y", "undo / redo"),
    ("/ or ctrl+k", "search every canvas"),
    ("?", "this overlay"),
    ("esc", "close topmost, then clear selection, then go back"),
];

#[component]
pub fn HelpModal() -> impl IntoView {
    let ctx = use_context::<ExplorerCtx>().expect("explorer context");
    let explorer = ctx.explorer;
    let set_explorer = ctx.set_explorer;

    let rows = || {
        BINDINGS
            .iter()
            .map(|(key, action)| {
                view! {
                    <tr>
                        <td style="padding: 4px 16px 4px 0; color: #aaffbb; white-space: nowrap;">
                            {*key}
                        </td>
                        <td style="padding: 4px 0; color: #dce8f0;">{*action}</td>
                    </tr>
                }
            })
            .collect_view()
    };

    move || {
        if !explorer.with(|e| e.help_open) {
            return None;
        }
        Some(view! {
            <div style="position: fixed; inset: 0; background: rgba(0, 0, 0, 0.6); \
                        display: flex; justify-content: center; align-items: center; z-index: 100;"
                on:mousedown=move |_| set_explorer.update(|e| e.close_help())
            >
                <div
                    style="background: #0a0f15; border: 1px solid #2a3a46; border-radius: 8px; \
                           padding: 24px; font-family: 'JetBrains Mono', monospace; font-size: 13px;"
                    on:mousedown=move |ev: web_sys::MouseEvent| ev.stop_propagation()
                >
                    <strong style="color: #dce8f0;">"Keyboard & mouse"</strong>
                    <table style="margin-top: 12px; border-collapse: collapse;">{rows.clone()}</table>
                </div>
            </div>
        })
    }
}
