//! Static content and account panels.
//!
//! - [`ChannelsPanel`] - Community chat links from `channels.json`
//! - [`ReferencesPanel`] - Latest proof-of-sale images
//! - [`SettingsPanel`] - Read-only account details

use leptos::prelude::*;
use leptos_icons::Icon;

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::core::content::{load_channels, load_references};
use crate::models::{ChannelLink, PageId};

stylance::import_crate_style!(css, "src/components/panels.module.css");

// ============================================================================
// Channels
// ============================================================================

#[component]
pub fn ChannelsPanel() -> impl IntoView {
    let channels = LocalResource::new(load_channels);

    view! {
        <h1 class=css::title>"Community channels"</h1>
        <Suspense fallback=move || view! { <p class=css::status>"Loading channels..."</p> }>
            {move || {
                channels.get().map(|result| match result {
                    Ok(channels) => view! {
                        <div class=css::linkRow>
                            {channels.main.iter().map(channel_button).collect_view()}
                        </div>
                        {channels
                            .franchises
                            .into_iter()
                            .map(|franchise| view! {
                                <section class=css::group>
                                    <h2 class=css::groupTitle>
                                        {franchise.name.unwrap_or_default()}
                                    </h2>
                                    <div class=css::linkRow>
                                        {franchise.links.iter().map(channel_button).collect_view()}
                                    </div>
                                </section>
                            })
                            .collect_view()}
                    }
                    .into_any(),
                    Err(e) => view! {
                        <p class=css::statusError>{format!("Could not load channels: {}", e)}</p>
                    }
                    .into_any(),
                })
            }}
        </Suspense>
    }
}

fn channel_button(link: &ChannelLink) -> impl IntoView + use<> {
    let class = match link.class.as_deref() {
        Some(extra) => format!("{} {}", css::channel, extra),
        None => css::channel.to_string(),
    };
    let icon = link.icon.clone();

    view! {
        <a class=class href=link.href().to_string() target="_blank" rel="noopener noreferrer">
            {icon.map(|src| view! { <img class=css::channelIcon src=src alt="" /> })}
            <span>{link.label().to_string()}</span>
            <Icon icon=ic::EXTERNAL_LINK />
        </a>
    }
}

// ============================================================================
// References
// ============================================================================

#[component]
pub fn ReferencesPanel() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let references = LocalResource::new(move || {
        let backend = ctx.backend();
        async move { load_references(backend.as_ref()).await }
    });

    view! {
        <h1 class=css::title>"Sale references"</h1>
        <Suspense fallback=move || view! { <p class=css::status>"Loading references..."</p> }>
            {move || {
                references.get().map(|result| match result {
                    Ok(refs) if refs.is_empty() => {
                        view! { <p class=css::status>"No references yet."</p> }.into_any()
                    }
                    Ok(refs) => view! {
                        <div class=css::references>
                            {refs
                                .into_iter()
                                .map(|reference| {
                                    let seller = reference.seller_label().to_string();
                                    view! {
                                        <figure class=css::reference>
                                            <img src=reference.image_url alt="" loading="lazy" />
                                            <figcaption>{seller}</figcaption>
                                        </figure>
                                    }
                                })
                                .collect_view()}
                        </div>
                    }
                    .into_any(),
                    Err(e) => {
                        leptos::logging::error!("Failed to load references: {}", e);
                        view! { <p class=css::statusError>"Could not load references."</p> }
                            .into_any()
                    }
                })
            }}
        </Suspense>
    }
}

// ============================================================================
// Settings
// ============================================================================

/// Account details for the signed-in user. Editing happens in the host
/// page's account flow.
#[component]
pub fn SettingsPanel(page: PageId) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let title = match page {
        PageId::SettingsSecurity => "Security",
        _ => "Profile",
    };

    view! {
        <h1 class=css::title>{title}</h1>
        {move || match ctx.session.get() {
            None => view! {
                <p class=css::status>"Sign in to manage your account."</p>
            }
            .into_any(),
            Some(session) if page == PageId::SettingsSecurity => view! {
                <dl class=css::details>
                    <dt>"Account id"</dt>
                    <dd>{session.uid}</dd>
                    <dt>"Password"</dt>
                    <dd>"Managed by your sign-in provider"</dd>
                </dl>
            }
            .into_any(),
            Some(session) => view! {
                <dl class=css::details>
                    <dt>"Name"</dt>
                    <dd>{session.name.clone()}</dd>
                    <dt>"WhatsApp"</dt>
                    <dd>{session.whatsapp.clone().unwrap_or_else(|| "-".to_string())}</dd>
                    <dt>"Role"</dt>
                    <dd>{session.role.clone().unwrap_or_else(|| "customer".to_string())}</dd>
                </dl>
            }
            .into_any(),
        }}
    }
}
