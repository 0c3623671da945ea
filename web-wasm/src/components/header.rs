//! ヘッダーコンポーネント

use leptos::prelude::*;
use preset_catalog_common::Theme;

#[component]
pub fn Header<FT, FH>(theme: ReadSignal<Theme>, on_toggle_theme: FT, on_help: FH) -> impl IntoView
where
    FT: Fn(()) + 'static + Clone,
    FH: Fn(()) + 'static + Clone,
{
    view! {
        <header class="header">
            <h1>"Polymaker Slicer Presets"</h1>
            <div class="header-actions">
                <button
                    id="help-btn"
                    class="btn btn-secondary btn-small"
                    on:click={
                        let on_help = on_help.clone();
                        move |_| on_help(())
                    }
                >
                    "Manual installation"
                </button>
                <button
                    id="theme-toggle"
                    class="btn btn-tertiary btn-small"
                    data-theme=move || theme.get().as_str()
                    on:click={
                        let on_toggle_theme = on_toggle_theme.clone();
                        move |_| on_toggle_theme(())
                    }
                >
                    {move || match theme.get() {
                        Theme::Dark => "Wiki theme",
                        Theme::Wiki => "Dark theme",
                    }}
                </button>
            </div>
        </header>
    }
}
