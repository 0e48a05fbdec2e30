//! Seller dashboard overlay.
//!
//! Two tabs: the signed-in seller's own listings (create, edit, delete and
//! availability toggles, tags from the dashboard's own tag picker) and their
//! proof-of-sale reference images.

use leptos::prelude::*;
use leptos_icons::Icon;
use wasm_bindgen_futures::spawn_local;

use crate::app::{AppContext, ToastKind};
use crate::components::icons as ic;
use crate::core::backend::Document;
use crate::core::{ListingDraft, ReferenceUpload, TagPicker};
use crate::models::{Product, SaleReference, Session};
use crate::utils::{description_from_tags, dom, format_brl};

stylance::import_crate_style!(css, "src/components/dashboard.module.css");

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Tab {
    Listings,
    References,
}

/// Rows of one dashboard tab.
#[derive(Clone, Debug, PartialEq)]
enum RowsState<T> {
    Loading,
    Loaded(Vec<Document<T>>),
    Failed(String),
}

/// Editable listing form.
#[derive(Clone, Copy)]
struct ListingForm {
    /// Listing being edited; `None` creates a new one.
    editing: RwSignal<Option<String>>,
    title: RwSignal<String>,
    price: RwSignal<String>,
    video_url: RwSignal<String>,
    tags: RwSignal<Vec<String>>,
    saving: RwSignal<bool>,
}

impl ListingForm {
    fn new() -> Self {
        Self {
            editing: RwSignal::new(None),
            title: RwSignal::new(String::new()),
            price: RwSignal::new(String::new()),
            video_url: RwSignal::new(String::new()),
            tags: RwSignal::new(Vec::new()),
            saving: RwSignal::new(false),
        }
    }

    fn draft(&self) -> ListingDraft {
        ListingDraft {
            title: self.title.get_untracked(),
            price: self.price.get_untracked(),
            video_url: self.video_url.get_untracked(),
            tags: self.tags.get_untracked(),
        }
    }

    fn load(&self, id: Option<String>, draft: ListingDraft) {
        self.editing.set(id);
        self.title.set(draft.title);
        self.price.set(draft.price);
        self.video_url.set(draft.video_url);
        self.tags.set(draft.tags);
    }

    fn reset(&self) {
        self.load(None, ListingDraft::default());
    }
}

#[component]
pub fn Dashboard() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    move || match ctx.session.get() {
        Some(session) if session.is_seller() => {
            view! { <SellerDashboard session=session /> }.into_any()
        }
        _ => view! {
            <div class=css::panel>
                <p class=css::status>"Only sellers can manage listings."</p>
            </div>
        }
        .into_any(),
    }
}

#[component]
fn SellerDashboard(session: Session) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let tab = RwSignal::new(Tab::Listings);
    let session = StoredValue::new(session);

    let tab_button = move |which: Tab, label: &'static str| {
        view! {
            <button
                class=move || {
                    if tab.get() == which {
                        format!("{} {}", css::tabButton, css::tabButtonActive)
                    } else {
                        css::tabButton.to_string()
                    }
                }
                on:click=move |_| tab.set(which)
            >
                {label}
            </button>
        }
    };

    view! {
        <div class=css::panel>
            <header class=css::header>
                <h2 class=css::title>"My dashboard"</h2>
                <button class=css::iconButton title="Close" on:click=move |_| ctx.overlay.set(None)>
                    <Icon icon=ic::CLOSE />
                </button>
            </header>
            <nav class=css::tabBar>
                {tab_button(Tab::Listings, "Listings")}
                {tab_button(Tab::References, "References")}
            </nav>
            {move || match tab.get() {
                Tab::Listings => view! { <ListingsTab session=session.get_value() /> }.into_any(),
                Tab::References => {
                    view! { <ReferencesTab session=session.get_value() /> }.into_any()
                }
            }}
        </div>
    }
}

#[component]
fn ListingsTab(session: Session) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let session = StoredValue::new(session);

    let state = RwSignal::new(RowsState::<Product>::Loading);
    let form = ListingForm::new();

    let reload = move || {
        let listings = ctx.listings();
        let session = session.get_value();
        spawn_local(async move {
            match listings.load_own(&session).await {
                Ok(docs) => state.set(RowsState::Loaded(docs)),
                Err(e) => {
                    leptos::logging::error!("Failed to load listings: {}", e);
                    state.set(RowsState::Failed(e.to_string()));
                }
            }
        });
    };
    reload();

    // --- Form actions ---

    let pick_tags = move |_: leptos::ev::MouseEvent| {
        ctx.ensure_item_catalog();
        let tags = form.tags;
        ctx.listing_picker.open(TagPicker::for_selection(
            tags.get_untracked(),
            move |selected| tags.set(selected),
        ));
    };

    let save = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if form.saving.get_untracked() {
            return;
        }
        let listings = ctx.listings();
        let draft = form.draft();
        let editing = form.editing.get_untracked();
        let session = session.get_value();
        form.saving.set(true);
        spawn_local(async move {
            let result = match &editing {
                Some(id) => listings.update(id, &draft).await,
                None => listings
                    .create(&session, &draft, js_sys::Date::now())
                    .await
                    .map(|_| ()),
            };
            form.saving.set(false);
            match result {
                Ok(()) => {
                    let message = if editing.is_some() {
                        "Listing updated."
                    } else {
                        "Listing published."
                    };
                    ctx.notify(message, ToastKind::Success);
                    form.reset();
                    reload();
                }
                Err(e) => ctx.notify(e.to_string(), ToastKind::Error),
            }
        });
    };

    // --- Row actions ---

    let actions = RowActions {
        edit: Callback::new(move |doc: Document<Product>| {
            form.load(Some(doc.id.clone()), ListingDraft::from_product(&doc.data));
        }),
        toggle: Callback::new(move |(id, available): (String, bool)| {
            let listings = ctx.listings();
            spawn_local(async move {
                match listings.set_available(&id, available).await {
                    Ok(()) => reload(),
                    Err(e) => ctx.notify(e.to_string(), ToastKind::Error),
                }
            });
        }),
        delete: Callback::new(move |id: String| {
            if !dom::confirm("Delete this listing? This cannot be undone.") {
                return;
            }
            let listings = ctx.listings();
            spawn_local(async move {
                match listings.delete(&id).await {
                    Ok(()) => {
                        ctx.notify("Listing deleted.", ToastKind::Success);
                        if form.editing.get_untracked().as_deref() == Some(id.as_str()) {
                            form.reset();
                        }
                        reload();
                    }
                    Err(e) => ctx.notify(e.to_string(), ToastKind::Error),
                }
            });
        }),
    };

    let description_preview = move || form.tags.with(|t| description_from_tags(t));
    let form_title = move || {
        if form.editing.get().is_some() {
            "Edit listing"
        } else {
            "New listing"
        }
    };

    view! {
        <form class=css::form on:submit=save>
            <h3 class=css::formTitle>{form_title}</h3>
            <label class=css::field>
                <span>"Title"</span>
                <input type="text" bind:value=form.title />
            </label>
            <label class=css::field>
                <span>"Price (R$)"</span>
                <input type="text" inputmode="decimal" placeholder="1.234,56" bind:value=form.price />
            </label>
            <label class=css::field>
                <span>"Video URL"</span>
                <input type="url" placeholder="https://youtu.be/..." bind:value=form.video_url />
            </label>

            <div class=css::field>
                <span>"Items"</span>
                <div class=css::tags>
                    <For
                        each=move || form.tags.get()
                        key=|tag| tag.clone()
                        children=|tag| view! { <span class=css::tag>{tag}</span> }
                    />
                    <button type="button" class=css::secondary on:click=pick_tags>
                        <Icon icon=ic::PLUS />
                        "Select items"
                    </button>
                </div>
                <p class=css::hint>{description_preview}</p>
            </div>

            <div class=css::formActions>
                <Show when=move || form.editing.get().is_some()>
                    <button type="button" class=css::secondary on:click=move |_| form.reset()>
                        "Cancel"
                    </button>
                </Show>
                <button type="submit" class=css::primary disabled=move || form.saving.get()>
                    {move || if form.saving.get() { "Saving..." } else { "Save" }}
                </button>
            </div>
        </form>

        {move || match state.get() {
            RowsState::Loading => {
                view! { <p class=css::status>"Loading listings..."</p> }.into_any()
            }
            RowsState::Failed(message) => {
                view! { <p class=css::statusError>{message}</p> }.into_any()
            }
            RowsState::Loaded(docs) if docs.is_empty() => {
                view! { <p class=css::status>"You have no listings yet."</p> }.into_any()
            }
            RowsState::Loaded(docs) => view! {
                <ul class=css::list>
                    {docs
                        .into_iter()
                        .map(|doc| view! { <ListingRow doc=doc actions=actions /> })
                        .collect_view()}
                </ul>
            }
            .into_any(),
        }}
    }
}

#[derive(Clone, Copy)]
struct RowActions {
    edit: Callback<Document<Product>>,
    toggle: Callback<(String, bool)>,
    delete: Callback<String>,
}

#[component]
fn ListingRow(doc: Document<Product>, actions: RowActions) -> impl IntoView {
    let id = doc.id.clone();
    let available = doc.data.available;
    let title = doc.data.display_title().to_string();
    let price = format_brl(doc.data.price);

    let toggle_id = id.clone();
    let row_class = if available {
        css::row.to_string()
    } else {
        format!("{} {}", css::row, css::rowUnavailable)
    };

    view! {
        <li class=row_class>
            <div class=css::rowInfo>
                <span class=css::rowTitle>{title}</span>
                <span class=css::rowPrice>{price}</span>
            </div>
            <label class=css::toggle>
                <input
                    type="checkbox"
                    prop:checked=available
                    on:change=move |_| actions.toggle.run((toggle_id.clone(), !available))
                />
                <span>{if available { "Available" } else { "Sold" }}</span>
            </label>
            <button class=css::iconButton title="Edit" on:click=move |_| actions.edit.run(doc.clone())>
                <Icon icon=ic::EDIT />
            </button>
            <button class=css::iconButton title="Delete" on:click=move |_| actions.delete.run(id.clone())>
                <Icon icon=ic::CLOSE />
            </button>
        </li>
    }
}

#[component]
fn ReferencesTab(session: Session) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let session = StoredValue::new(session);

    let state = RwSignal::new(RowsState::<SaleReference>::Loading);
    let file_input = NodeRef::<leptos::html::Input>::new();
    let file_name = RwSignal::new(None::<String>);
    let uploading = RwSignal::new(false);

    let reload = move || {
        let references = ctx.references();
        let session = session.get_value();
        spawn_local(async move {
            match references.load_own(&session).await {
                Ok(docs) => state.set(RowsState::Loaded(docs)),
                Err(e) => {
                    leptos::logging::error!("Failed to load references: {}", e);
                    state.set(RowsState::Failed(e.to_string()));
                }
            }
        });
    };
    reload();

    let picked = move || {
        file_input
            .get_untracked()
            .and_then(|input| input.files())
            .and_then(|files| files.get(0))
    };

    let upload = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if uploading.get_untracked() {
            return;
        }
        let Some(file) = picked() else {
            ctx.notify("Select an image file to upload.", ToastKind::Error);
            return;
        };

        let references = ctx.references();
        let session = session.get_value();
        uploading.set(true);
        spawn_local(async move {
            let bytes = match dom::read_file(&file).await {
                Ok(bytes) => bytes,
                Err(e) => {
                    leptos::logging::error!("Failed to read {}: {:?}", file.name(), e);
                    uploading.set(false);
                    ctx.notify("Could not read the selected file.", ToastKind::Error);
                    return;
                }
            };
            let image = ReferenceUpload {
                file_name: file.name(),
                content_type: file.type_(),
                bytes,
            };
            let result = references.add(&session, &image, js_sys::Date::now()).await;
            uploading.set(false);
            match result {
                Ok(_) => {
                    ctx.notify("Reference added.", ToastKind::Success);
                    if let Some(input) = file_input.get_untracked() {
                        input.set_value("");
                    }
                    file_name.set(None);
                    reload();
                }
                Err(e) => ctx.notify(e.to_string(), ToastKind::Error),
            }
        });
    };

    let delete = Callback::new(move |doc: Document<SaleReference>| {
        if !dom::confirm("Delete this reference?") {
            return;
        }
        let references = ctx.references();
        spawn_local(async move {
            match references.delete(&doc).await {
                Ok(()) => ctx.notify("Reference deleted.", ToastKind::Success),
                Err(e) => ctx.notify(e.to_string(), ToastKind::Error),
            }
            reload();
        });
    });

    view! {
        <form class=css::form on:submit=upload>
            <h3 class=css::formTitle>"New reference"</h3>
            <label class=css::field>
                <span>"Image"</span>
                <input
                    type="file"
                    accept="image/*"
                    node_ref=file_input
                    on:change=move |_| file_name.set(picked().map(|file| file.name()))
                />
            </label>
            <span class=css::fileName>
                {move || file_name.get().unwrap_or_else(|| "No file selected".to_string())}
            </span>
            <div class=css::formActions>
                <button type="submit" class=css::primary disabled=move || uploading.get()>
                    {move || if uploading.get() { "Uploading..." } else { "Upload" }}
                </button>
            </div>
        </form>

        {move || match state.get() {
            RowsState::Loading => {
                view! { <p class=css::status>"Loading references..."</p> }.into_any()
            }
            RowsState::Failed(message) => {
                view! { <p class=css::statusError>{message}</p> }.into_any()
            }
            RowsState::Loaded(docs) if docs.is_empty() => {
                view! { <p class=css::status>"No references uploaded yet."</p> }.into_any()
            }
            RowsState::Loaded(docs) => view! {
                <ul class=css::thumbs>
                    {docs
                        .into_iter()
                        .map(|doc| {
                            let src = doc.data.image_url.clone();
                            view! {
                                <li class=css::thumb>
                                    <img src=src alt="" loading="lazy" />
                                    <button
                                        class=css::thumbDelete
                                        title="Delete reference"
                                        on:click=move |_| delete.run(doc.clone())
                                    >
                                        <Icon icon=ic::CLOSE />
                                    </button>
                                </li>
                            }
                        })
                        .collect_view()}
                </ul>
            }
            .into_any(),
        }}
    }
}
