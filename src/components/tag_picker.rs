//! Tag picker modal.
//!
//! Each [`PickerHandle`] owns at most one open [`TagPicker`] session. The
//! storefront filter and the dashboard listing form get separate handles, so
//! completing one never reaches the other's handler.

use std::collections::BTreeSet;

use leptos::prelude::*;
use leptos_icons::Icon;

use crate::app::{AppContext, ItemCatalogState};
use crate::components::icons as ic;
use crate::core::{PickerPurpose, TagPicker};
use crate::models::{ItemCategory, category_label};

stylance::import_crate_style!(css, "src/components/tag_picker.module.css");

// ============================================================================
// Picker Handle
// ============================================================================

/// Reactive wrapper around one picker session.
#[derive(Clone, Copy)]
pub struct PickerHandle {
    session: StoredValue<Option<TagPicker>, LocalStorage>,
    /// Mirror of the session's selection for rendering.
    selection: RwSignal<BTreeSet<String>>,
    purpose: RwSignal<Option<PickerPurpose>>,
}

impl PickerHandle {
    pub fn new() -> Self {
        Self {
            session: StoredValue::new_local(None),
            selection: RwSignal::new(BTreeSet::new()),
            purpose: RwSignal::new(None),
        }
    }

    /// Show the modal for a fresh session, replacing any open one.
    pub fn open(&self, picker: TagPicker) {
        self.selection.set(picker.selection().clone());
        self.purpose.set(Some(picker.purpose()));
        self.session.set_value(Some(picker));
    }

    pub fn is_open(&self) -> bool {
        self.purpose.with(Option::is_some)
    }

    pub fn is_selected(&self, tag: &str) -> bool {
        self.selection.with(|s| s.contains(tag))
    }

    pub fn toggle(&self, tag: &str) {
        let toggled = self.session.try_update_value(|session| {
            session.as_mut().map(|picker| {
                picker.toggle(tag);
                picker.selection().clone()
            })
        });
        if let Some(Some(selection)) = toggled {
            self.selection.set(selection);
        }
    }

    pub fn apply(&self) {
        if let Some(picker) = self.take() {
            picker.apply();
        }
    }

    pub fn clear(&self) {
        if let Some(picker) = self.take() {
            picker.clear();
        }
    }

    /// Close without completing; the session's handler never runs.
    pub fn dismiss(&self) {
        drop(self.take());
    }

    // The session leaves the store before its handler runs, so a handler
    // may open another picker on this handle.
    fn take(&self) -> Option<TagPicker> {
        let picker = self.session.try_update_value(Option::take).flatten();
        self.purpose.set(None);
        self.selection.set(BTreeSet::new());
        picker
    }
}

impl Default for PickerHandle {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Modal
// ============================================================================

#[component]
pub fn TagPickerModal(handle: PickerHandle) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let title = move || match handle.purpose.get() {
        Some(PickerPurpose::Selection) => "Select the account items",
        _ => "Filter by items",
    };
    let apply_label = move || match handle.purpose.get() {
        Some(PickerPurpose::Selection) => "Use selected items",
        _ => "Apply filter",
    };
    let count = move || handle.selection.with(BTreeSet::len);

    view! {
        <Show when=move || handle.is_open()>
            <div class=css::backdrop on:click=move |_| handle.dismiss()>
                <div class=css::modal on:click=|ev| ev.stop_propagation()>
                    <header class=css::header>
                        <h2 class=css::title>{title}</h2>
                        <button class=css::iconButton title="Close" on:click=move |_| handle.dismiss()>
                            <Icon icon=ic::CLOSE />
                        </button>
                    </header>

                    <div class=css::body>
                        {move || match ctx.item_catalog.get() {
                            ItemCatalogState::NotLoaded | ItemCatalogState::Loading => {
                                view! { <p class=css::status>"Loading items..."</p> }.into_any()
                            }
                            ItemCatalogState::Failed(message) => {
                                view! {
                                    <p class=css::statusError>
                                        {format!("Could not load the item list: {}", message)}
                                    </p>
                                }
                                .into_any()
                            }
                            ItemCatalogState::Ready(catalog) => {
                                catalog
                                    .into_iter()
                                    .map(|(key, category)| {
                                        view! { <CategorySection category_key=key category=category handle=handle /> }
                                    })
                                    .collect_view()
                                    .into_any()
                            }
                        }}
                    </div>

                    <footer class=css::footer>
                        <span class=css::count>{move || format!("{} selected", count())}</span>
                        <button class=css::secondary on:click=move |_| handle.clear()>"Clear"</button>
                        <button class=css::primary on:click=move |_| handle.apply()>{apply_label}</button>
                    </footer>
                </div>
            </div>
        </Show>
    }
}

#[component]
fn CategorySection(category_key: String, category: ItemCategory, handle: PickerHandle) -> impl IntoView {
    let icon = category.icon_or_default().to_string();
    let label = category_label(&category_key);

    view! {
        <section class=css::category>
            <h3 class=css::categoryTitle>
                <img class=css::categoryIcon src=icon alt="" />
                {label}
            </h3>
            <div class=css::items>
                {category
                    .items
                    .into_iter()
                    .map(|item| {
                        let name = item.name().to_string();
                        let icon = item.icon().map(str::to_string);
                        let selected = {
                            let name = name.clone();
                            move || handle.is_selected(&name)
                        };
                        let toggle = {
                            let name = name.clone();
                            move |_: leptos::ev::MouseEvent| handle.toggle(&name)
                        };
                        view! {
                            <button
                                class=move || {
                                    if selected() {
                                        format!("{} {}", css::item, css::itemSelected)
                                    } else {
                                        css::item.to_string()
                                    }
                                }
                                on:click=toggle
                            >
                                {icon.map(|src| view! { <img class=css::itemIcon src=src alt="" /> })}
                                <span>{name}</span>
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
        </section>
    }
}
