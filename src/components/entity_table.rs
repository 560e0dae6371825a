//! Entity Table Component
//!
//! Snapshot rows with edit/delete actions, columns taken from the schema.

use leptos::prelude::*;

use collection_sync::{ItemId, Resource, Row};

use crate::components::DeleteButton;
use crate::context::CollectionHandle;

/// Table over the current snapshot
///
/// Rows are keyed by server identifier within one snapshot; a new snapshot
/// re-renders every row.
#[component]
pub fn EntityTable<T: Resource>(
    handle: CollectionHandle<T>,
    /// Called with the row identifier when "View" is clicked
    #[prop(optional_no_strip)]
    on_select: Option<Callback<ItemId>>,
) -> impl IntoView {
    let schema = T::schema();

    let rows = move || {
        handle.read(|c| {
            let snapshot = c.snapshot();
            let seq = snapshot.seq();
            snapshot
                .rows()
                .iter()
                .map(|row| (seq, row.clone()))
                .collect::<Vec<_>>()
        })
    };
    let is_empty = move || handle.read(|c| c.snapshot().is_empty());
    let loading = move || handle.read(|c| c.is_loading());

    view! {
        <table class="entity-table">
            <thead>
                <tr>
                    {schema
                        .columns
                        .iter()
                        .map(|col| view! {
                            <th style=format!("width: {}px", col.width)>{col.header}</th>
                        })
                        .collect_view()}
                    <th class="actions-col">"Actions"</th>
                </tr>
            </thead>
            <tbody>
                <For
                    each=rows
                    key=|(seq, row)| (*seq, row.key.clone())
                    children=move |(_, row): (u64, Row<T>)| {
                        let Row { key, item } = row;
                        let cells = schema
                            .columns
                            .iter()
                            .map(|col| view! { <td>{item.cell(col.key)}</td> })
                            .collect_view();

                        let row_key = key.clone();
                        let is_editing = move || {
                            handle.read(|c| c.editing().is_some_and(|e| e.id() == row_key))
                        };
                        let view_key = key.clone();

                        view! {
                            <tr class=move || if is_editing() { "editing" } else { "" }>
                                {cells}
                                <td class="row-actions">
                                    {on_select.map(|select| view! {
                                        <button
                                            class="view-btn"
                                            on:click=move |_| select.run(view_key.clone())
                                        >
                                            "View"
                                        </button>
                                    })}
                                    <button
                                        class="edit-btn"
                                        on:click=move |_| {
                                            if let Err(err) = handle.get().begin_edit(&item) {
                                                log::debug!("edit not started: {}", err);
                                            }
                                        }
                                    >
                                        "Edit"
                                    </button>
                                    <DeleteButton handle=handle id=key.clone() />
                                </td>
                            </tr>
                        }
                    }
                />
            </tbody>
        </table>
        <Show when=move || is_empty() && !loading()>
            <p class="empty-hint">{format!("No {} items yet", schema.path)}</p>
        </Show>
    }
}
