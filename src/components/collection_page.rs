//! Collection Page Component
//!
//! One screen per collection: status, form and table.

use leptos::prelude::*;

use collection_sync::{ItemId, Resource};

use crate::components::{EntityForm, EntityTable, StatusBanner};
use crate::context::CollectionHandle;

/// Loads the collection on mount.
#[component]
pub fn CollectionPage<T: Resource>(
    handle: CollectionHandle<T>,
    title: &'static str,
    #[prop(optional)] on_select: Option<Callback<ItemId>>,
) -> impl IntoView {
    handle.reload();

    let count = move || handle.read(|c| c.snapshot().len());
    let loading = move || handle.read(|c| c.is_loading());

    view! {
        <section class="collection-page">
            <header class="page-header">
                <h2>{title}</h2>
                <span class="item-count">{move || format!("{} items", count())}</span>
                <button class="refresh-btn" disabled=loading on:click=move |_| handle.reload()>
                    {move || if loading() { "Loading..." } else { "Refresh" }}
                </button>
            </header>
            <StatusBanner handle=handle />
            <EntityForm handle=handle />
            <EntityTable handle=handle on_select=on_select />
        </section>
    }
}
