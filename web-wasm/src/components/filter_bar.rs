//! カスケードフィルタのドロップダウン群

use leptos::prelude::*;
use preset_catalog_common::{Action, BrowserState, DropdownId, FilterDimension};

#[component]
pub fn FilterBar<FA>(browser: ReadSignal<Option<BrowserState>>, on_action: FA) -> impl IntoView
where
    FA: Fn(Action) + 'static + Clone + Send + Sync,
{
    view! {
        <div class="filters">
            {FilterDimension::ALL
                .into_iter()
                .map(|dimension| {
                    view! { <FilterDropdown dimension=dimension browser=browser on_action=on_action.clone() /> }
                })
                .collect_view()}
        </div>
    }
}

#[component]
fn FilterDropdown<FA>(
    dimension: FilterDimension,
    browser: ReadSignal<Option<BrowserState>>,
    on_action: FA,
) -> impl IntoView
where
    FA: Fn(Action) + 'static + Clone + Send + Sync,
{
    let id = DropdownId::Filter(dimension);
    let is_open = move || browser.with(|b| b.as_ref().is_some_and(|b| b.is_open(id)));
    let selected = move || {
        browser.with(|b| {
            b.as_ref()
                .and_then(|b| b.filters().get(dimension).map(str::to_string))
        })
    };
    let options = move || {
        browser.with(|b| {
            b.as_ref()
                .map(|b| b.options().get(dimension).to_vec())
                .unwrap_or_default()
        })
    };

    let select = {
        let on_action = on_action.clone();
        move |value: String| on_action(Action::SelectFilter { dimension, value })
    };

    view! {
        <div class="dropdown" class:is-open=is_open data-filter=dimension.as_str()>
            <span class="filter-label">{dimension.label()}</span>
            <button
                class="dropdown-toggle"
                on:click={
                    let on_action = on_action.clone();
                    move |ev| {
                        ev.stop_propagation();
                        on_action(Action::ToggleDropdown(id));
                    }
                }
            >
                <span class="dropdown-label">
                    {move || selected().unwrap_or_else(|| "All".to_string())}
                </span>
            </button>
            <div class="dropdown-menu" on:click=|ev| ev.stop_propagation()>
                <div
                    class="dropdown-option"
                    class:is-active=move || selected().is_none()
                    on:click={
                        let select = select.clone();
                        move |_| select(String::new())
                    }
                >
                    "All"
                </div>
                {move || {
                    let current = selected();
                    options()
                        .into_iter()
                        .map(|value| {
                            let active = current.as_deref() == Some(value.as_str());
                            let select = select.clone();
                            let label = value.clone();
                            view! {
                                <div
                                    class="dropdown-option"
                                    class:is-active=active
                                    on:click=move |_| select(value.clone())
                                >
                                    {label}
                                </div>
                            }
                        })
                        .collect_view()
                }}
            </div>
        </div>
    }
}
