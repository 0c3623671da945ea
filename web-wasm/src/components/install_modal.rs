//! 手動インストール手順のモーダル
//!
//! 閉じるボタン、オーバーレイのクリック、Escape キーで閉じる。

use gloo::events::EventListener;
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::KeyboardEvent;

/// Escape キーで閉じるべきか
pub fn closes_on_key(key: &str, open: bool) -> bool {
    open && key == "Escape"
}

#[component]
pub fn InstallModal(open: ReadSignal<bool>, set_open: WriteSignal<bool>) -> impl IntoView {
    if let Some(document) = web_sys::window().and_then(|w| w.document()) {
        EventListener::new(&document, "keydown", move |event| {
            if let Some(event) = event.dyn_ref::<KeyboardEvent>() {
                if closes_on_key(&event.key(), open.get_untracked()) {
                    set_open.set(false);
                }
            }
        })
        .forget();
    }

    let close = move |_: leptos::ev::MouseEvent| set_open.set(false);

    view! {
        <div
            id="install-modal"
            class="modal"
            class:is-open=move || open.get()
            aria-hidden=move || if open.get() { "false" } else { "true" }
        >
            <div class="modal-overlay" on:click=close></div>
            <div class="modal-content" role="dialog" aria-labelledby="install-modal-title">
                <button class="modal-close" aria-label="Close" on:click=close>"×"</button>
                <h2 id="install-modal-title">"Manual installation"</h2>
                <ol>
                    <li>"Download the preset for your printer and slicer (JSON or ZIP)."</li>
                    <li>"Extract the ZIP if you downloaded one."</li>
                    <li>"Import the JSON file from your slicer's filament preset menu."</li>
                    <li>"Select the imported preset for your printer profile."</li>
                </ol>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_closes_only_when_open() {
        assert!(closes_on_key("Escape", true));
        assert!(!closes_on_key("Escape", false));
        assert!(!closes_on_key("Enter", true));
    }
}
