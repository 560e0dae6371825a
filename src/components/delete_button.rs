//! Delete Button Component
//!
//! Row delete action guarded by the browser's confirm dialog.

use leptos::prelude::*;

use collection_sync::{ConfirmPrompt, ItemId, Removal, Resource};

use crate::context::CollectionHandle;

/// `window.confirm`; a missing window counts as "no"
pub struct BrowserConfirm;

impl ConfirmPrompt for BrowserConfirm {
    fn confirm(&self, message: &str) -> bool {
        web_sys::window()
            .and_then(|window| window.confirm_with_message(message).ok())
            .unwrap_or(false)
    }
}

/// Delete button for one table row
///
/// # Arguments
/// * `handle` - Collection the row belongs to
/// * `id` - Server identifier of the row
#[component]
pub fn DeleteButton<T: Resource>(
    handle: CollectionHandle<T>,
    #[prop(into)] id: ItemId,
) -> impl IntoView {
    view! {
        <button
            class="delete-btn"
            disabled=move || handle.read(|c| c.is_submitting())
            on:click=move |ev| {
                ev.stop_propagation();
                let id = id.clone();
                handle.spawn(move |controller| async move {
                    match controller.remove(&id, &BrowserConfirm).await {
                        Ok(Removal::Deleted) => log::debug!("{} {} deleted", T::schema().path, id),
                        Ok(Removal::Declined) => {}
                        Err(err) => log::debug!("{} {} not deleted: {}", T::schema().path, id, err),
                    }
                });
            }
        >
            "Delete"
        </button>
    }
}
