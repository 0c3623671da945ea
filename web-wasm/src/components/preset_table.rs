//! プリセット一覧テーブル

use leptos::prelude::*;
use preset_catalog_common::{Action, BrowserState, DropdownId, MaterialRow};

#[component]
pub fn PresetTable<FA>(browser: ReadSignal<Option<BrowserState>>, on_action: FA) -> impl IntoView
where
    FA: Fn(Action) + 'static + Clone + Send + Sync,
{
    let rows = move || {
        browser.with(|b| {
            b.as_ref()
                .map(|b| b.view().rows.clone())
                .unwrap_or_default()
        })
    };

    view! {
        <table class="preset-table">
            <thead>
                <tr>
                    <th>"Material"</th>
                    <th>"Preset"</th>
                    <th>"Download"</th>
                </tr>
            </thead>
            <tbody id="tbody">
                {move || {
                    rows()
                        .into_iter()
                        .enumerate()
                        .map(|(index, row)| {
                            view! {
                                <PresetRow index=index row=row browser=browser on_action=on_action.clone() />
                            }
                        })
                        .collect_view()
                }}
            </tbody>
        </table>
    }
}

#[component]
fn PresetRow<FA>(
    index: usize,
    row: MaterialRow,
    browser: ReadSignal<Option<BrowserState>>,
    on_action: FA,
) -> impl IntoView
where
    FA: Fn(Action) + 'static + Clone + Send + Sync,
{
    let id = DropdownId::Row(index);
    let is_open = move || browser.with(|b| b.as_ref().is_some_and(|b| b.is_open(id)));
    let downloadable = row.download_target().is_some();
    let selected_label = row
        .selected_variant()
        .map(|v| v.label.clone())
        .unwrap_or_default();
    let selected_index = row.selected_index();

    let preset_cell = if row.has_variants() {
        let options = row
            .variants
            .iter()
            .enumerate()
            .map(|(variant, v)| {
                let on_action = on_action.clone();
                view! {
                    <div
                        class="dropdown-option"
                        class:is-active=variant == selected_index
                        on:click=move |_| on_action(Action::SelectRowVariant { row: index, variant })
                    >
                        {v.label.clone()}
                    </div>
                }
            })
            .collect_view();
        view! {
            <div class="preset-row-dropdown" class:is-open=is_open>
                <button
                    class="preset-row-toggle"
                    on:click={
                        let on_action = on_action.clone();
                        move |ev| {
                            ev.stop_propagation();
                            on_action(Action::ToggleDropdown(id));
                        }
                    }
                >
                    {selected_label}
                    <span class="variant-count">{format!(" ({})", row.variants.len())}</span>
                </button>
                <div class="dropdown-menu" on:click=|ev| ev.stop_propagation()>{options}</div>
            </div>
        }
        .into_any()
    } else {
        view! { <span class="preset-label">{selected_label}</span> }.into_any()
    };

    view! {
        <tr>
            <td class="material">{row.material.clone()}</td>
            <td>{preset_cell}</td>
            <td class="downloads">
                <button
                    class="btn btn-small btn-primary btn-download"
                    disabled=!downloadable
                    on:click={
                        let on_action = on_action.clone();
                        move |_| on_action(Action::DownloadJson { row: index })
                    }
                >
                    "JSON"
                </button>
                <button
                    class="btn btn-small btn-secondary btn-download-zip-row"
                    disabled=!downloadable
                    on:click={
                        let on_action = on_action.clone();
                        move |_| on_action(Action::DownloadZip { row: index })
                    }
                >
                    "ZIP"
                </button>
            </td>
        </tr>
    }
}
