//! Dashboard Component

use leptos::prelude::*;

use crate::context::AppContext;

/// Item counts per collection
#[component]
pub fn Dashboard() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    ctx.categories.reload();
    ctx.products.reload();

    view! {
        <section class="dashboard">
            <div class="stat-card">
                <h3>"Categories"</h3>
                <p class="stat-value">{move || ctx.categories.read(|c| c.snapshot().len())}</p>
            </div>
            <div class="stat-card">
                <h3>"Products"</h3>
                <p class="stat-value">{move || ctx.products.read(|c| c.snapshot().len())}</p>
            </div>
        </section>
    }
}
