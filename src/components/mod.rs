//! UI Components
//!
//! Reusable Leptos components.

mod collection_page;
mod dashboard;
mod delete_button;
mod entity_form;
mod entity_table;
mod product_detail;
mod status_banner;

pub use collection_page::CollectionPage;
pub use dashboard::Dashboard;
pub use delete_button::DeleteButton;
pub use entity_form::EntityForm;
pub use entity_table::EntityTable;
pub use product_detail::ProductDetail;
pub use status_banner::StatusBanner;
