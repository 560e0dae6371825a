//! Product Detail Component
//!
//! Side panel showing one product fetched by identifier.

use leptos::prelude::*;
use leptos::task::spawn_local;

use collection_sync::{ItemId, Product};

use crate::context::AppContext;

#[component]
pub fn ProductDetail(selected: RwSignal<Option<ItemId>>) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let (detail, set_detail) = signal::<Option<Result<Product, String>>>(None);

    Effect::new(move |_| {
        set_detail.set(None);
        let Some(id) = selected.get() else {
            return;
        };
        let controller = ctx.products.get();
        spawn_local(async move {
            let result = controller.fetch(&id).await.map_err(|err| err.to_string());
            // Ignore answers for a product that is no longer selected
            if selected.get_untracked().as_deref() == Some(id.as_str()) {
                set_detail.set(Some(result));
            }
        });
    });

    view! {
        <Show when=move || selected.get().is_some()>
            <aside class="detail-panel">
                <button class="close-btn" on:click=move |_| selected.set(None)>"×"</button>
                {move || match detail.get() {
                    None => view! { <p class="loading">"Loading..."</p> }.into_any(),
                    Some(Err(message)) => view! { <p class="load-error">{message}</p> }.into_any(),
                    Some(Ok(product)) => {
                        let category = product
                            .category
                            .as_ref()
                            .map(|c| c.name().unwrap_or(c.id()).to_string())
                            .unwrap_or_default();
                        view! {
                            <h3>{product.name}</h3>
                            <dl>
                                <dt>"Code"</dt>
                                <dd>{product.code}</dd>
                                <dt>"Price"</dt>
                                <dd>{format!("{:.2}", product.price)}</dd>
                                <dt>"Category"</dt>
                                <dd>{category}</dd>
                                <dt>"Description"</dt>
                                <dd>{product.description}</dd>
                            </dl>
                        }
                        .into_any()
                    }
                }}
            </aside>
        </Show>
    }
}
