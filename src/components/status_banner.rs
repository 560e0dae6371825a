//! Status Banner Component
//!
//! Failure notice and load error for one collection.

use leptos::prelude::*;

use collection_sync::Resource;

use crate::context::CollectionHandle;

#[component]
pub fn StatusBanner<T: Resource>(handle: CollectionHandle<T>) -> impl IntoView {
    let notice = move || handle.read(|c| c.notice());
    let load_error = move || handle.read(|c| c.load_error().map(|err| err.to_string()));

    view! {
        {move || notice().map(|notice| view! {
            <div class=if notice.retryable { "notice retryable" } else { "notice" }>
                <span>{notice.message}</span>
                <button class="dismiss-btn" on:click=move |_| handle.get().dismiss_notice()>
                    "×"
                </button>
            </div>
        })}
        {move || load_error().map(|message| view! {
            <div class="load-error">
                <span>{format!("Could not load {} list: {}", T::schema().path, message)}</span>
                <button class="retry-btn" on:click=move |_| handle.reload()>"Retry"</button>
            </div>
        })}
    }
}
