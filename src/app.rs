//! Inventory Admin Console App
//!
//! Navigation bar plus the dashboard, categories and products screens.

use leptos::prelude::*;

use collection_sync::{ApiConfig, ItemId};

use crate::components::{CollectionPage, Dashboard, ProductDetail};
use crate::context::{self, AppContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Dashboard,
    Categories,
    Products,
}

impl Screen {
    const ALL: [Screen; 3] = [Screen::Dashboard, Screen::Categories, Screen::Products];

    fn label(self) -> &'static str {
        match self {
            Screen::Dashboard => "Dashboard",
            Screen::Categories => "Categories",
            Screen::Products => "Products",
        }
    }
}

#[component]
pub fn App() -> impl IntoView {
    match context::api_config() {
        Ok(config) => {
            log::info!("using API at {}", config.base_url());
            view! { <Console config=config /> }.into_any()
        }
        Err(err) => {
            log::error!("invalid API configuration: {}", err);
            view! {
                <div class="config-error">
                    <h1>"Inventory Admin"</h1>
                    <p>{format!("Invalid API configuration: {err}")}</p>
                </div>
            }
            .into_any()
        }
    }
}

#[component]
fn Console(config: ApiConfig) -> impl IntoView {
    let ctx = AppContext::new(&config);
    provide_context(ctx);

    let (screen, set_screen) = signal(Screen::Dashboard);

    view! {
        <div class="app-layout">
            <nav class="nav-bar">
                <span class="brand">"Inventory Admin"</span>
                {Screen::ALL
                    .into_iter()
                    .map(|s| view! {
                        <button
                            class=move || if screen.get() == s { "nav-tab active" } else { "nav-tab" }
                            on:click=move |_| set_screen.set(s)
                        >
                            {s.label()}
                        </button>
                    })
                    .collect_view()}
            </nav>

            <main class="main-content">
                {move || match screen.get() {
                    Screen::Dashboard => view! { <Dashboard /> }.into_any(),
                    Screen::Categories => view! {
                        <CollectionPage handle=ctx.categories title="Categories" />
                    }
                    .into_any(),
                    Screen::Products => view! { <ProductsScreen /> }.into_any(),
                }}
            </main>
        </div>
    }
}

/// Products need the category list for the category select.
#[component]
fn ProductsScreen() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    ctx.categories.reload();

    let selected = RwSignal::new(None::<ItemId>);
    let select = Callback::new(move |id: ItemId| selected.set(Some(id)));

    view! {
        <div class="products-screen">
            <CollectionPage handle=ctx.products title="Products" on_select=select />
            <ProductDetail selected=selected />
        </div>
    }
}
