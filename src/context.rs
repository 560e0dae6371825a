//! Application Context
//!
//! Collection controllers shared via Leptos Context API.

use std::future::Future;
use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;

use collection_sync::config::{API_TIMEOUT_VAR, API_URL_VAR};
use collection_sync::{
    ApiConfig, Category, CollectionController, ConfigError, HttpCollection, ItemId, Product,
    Resource,
};

pub type Controller<T> = CollectionController<T, HttpCollection<T>>;

/// API root used when none was given at build time
const DEFAULT_API_URL: &str = "http://localhost:3000";

/// Build-time API configuration (`INVENTORY_API_URL`, `INVENTORY_API_TIMEOUT_MS`)
pub fn api_config() -> Result<ApiConfig, ConfigError> {
    ApiConfig::from_lookup(|key| {
        let value = match key {
            API_URL_VAR => option_env!("INVENTORY_API_URL").or(Some(DEFAULT_API_URL)),
            API_TIMEOUT_VAR => option_env!("INVENTORY_API_TIMEOUT_MS"),
            _ => None,
        };
        value.map(str::to_string)
    })
}

/// Copyable handle to one collection controller
///
/// Every controller change bumps `revision`; reading through [`Self::read`]
/// inside a reactive closure re-runs it on the next change.
pub struct CollectionHandle<T: Resource> {
    controller: StoredValue<Rc<Controller<T>>, LocalStorage>,
    revision: RwSignal<u32>,
}

impl<T: Resource> Clone for CollectionHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Resource> Copy for CollectionHandle<T> {}

impl<T: Resource> CollectionHandle<T> {
    pub fn new(client: reqwest::Client, config: &ApiConfig) -> Self {
        let controller = Rc::new(
            CollectionController::new(HttpCollection::with_client(client, config.clone()))
                .with_timeout(config.timeout()),
        );
        let revision = RwSignal::new(0u32);
        controller.on_change(move |_| {
            revision.try_update(|v| *v = v.wrapping_add(1));
        });
        Self {
            controller: StoredValue::new_local(controller),
            revision,
        }
    }

    pub fn get(&self) -> Rc<Controller<T>> {
        self.controller.get_value()
    }

    pub fn read<U>(&self, f: impl FnOnce(&Controller<T>) -> U) -> U {
        self.revision.track();
        f(&self.get())
    }

    /// Run `op` on the UI task queue. Failures are already reflected on the
    /// controller (inline errors, notice, load error).
    pub fn spawn<F, Fut>(&self, op: F)
    where
        F: FnOnce(Rc<Controller<T>>) -> Fut,
        Fut: Future<Output = ()> + 'static,
    {
        spawn_local(op(self.get()));
    }

    pub fn reload(&self) {
        self.spawn(|controller| async move {
            if let Err(err) = controller.load().await {
                log::debug!("{} reload failed: {}", T::schema().path, err);
            }
        });
    }
}

/// App-wide controllers provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    pub categories: CollectionHandle<Category>,
    pub products: CollectionHandle<Product>,
}

impl AppContext {
    /// Both collections share one HTTP client.
    pub fn new(config: &ApiConfig) -> Self {
        let client = reqwest::Client::new();
        Self {
            categories: CollectionHandle::new(client.clone(), config),
            products: CollectionHandle::new(client, config),
        }
    }

    /// `(id, label)` choices for a reference field pointing at `path`
    pub fn reference_options(&self, path: &str) -> Vec<(ItemId, String)> {
        if path == Category::schema().path {
            self.categories.read(|c| {
                c.snapshot()
                    .items()
                    .map(|category| (category.id.clone(), category.name.clone()))
                    .collect()
            })
        } else {
            Vec::new()
        }
    }
}
