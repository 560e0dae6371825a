//! Entity Form Component
//!
//! Create/edit form rendered from an entity schema.

use leptos::prelude::*;

use collection_sync::domain::{FieldKind, FieldSpec};
use collection_sync::Resource;

use crate::context::{AppContext, CollectionHandle};

/// Form for creating a new item, or updating the one being edited
///
/// Submit is disabled while a submission is in flight; validation messages
/// appear under their field.
#[component]
pub fn EntityForm<T: Resource>(handle: CollectionHandle<T>) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let schema = T::schema();

    let editing = move || handle.read(|c| c.editing().is_some());
    let submitting = move || handle.read(|c| c.is_submitting());

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        handle.spawn(|controller| async move {
            match controller.submit().await {
                Ok(()) => {}
                Err(err) => match err.field_errors() {
                    Some(errors) => log::debug!(
                        "{} form has {} invalid fields",
                        T::schema().path,
                        errors.len()
                    ),
                    None => log::debug!("{} form not saved: {}", T::schema().path, err),
                },
            }
        });
    };

    view! {
        <form class="entity-form" on:submit=submit>
            <h3>
                {move || if editing() {
                    format!("Edit {}", schema.name)
                } else {
                    format!("New {}", schema.name)
                }}
            </h3>

            {schema.fields.iter().map(|field| form_field(handle, field, ctx)).collect_view()}

            <div class="form-actions">
                <button type="submit" disabled=submitting>
                    {move || match (submitting(), editing()) {
                        (true, _) => "Saving...",
                        (false, true) => "Update",
                        (false, false) => "Add",
                    }}
                </button>
                <Show when=editing>
                    <button
                        type="button"
                        class="cancel-btn"
                        disabled=submitting
                        on:click=move |_| {
                            if let Err(err) = handle.get().cancel_edit() {
                                log::debug!("cancel ignored: {}", err);
                            }
                        }
                    >
                        "Cancel"
                    </button>
                </Show>
            </div>
        </form>
    }
}

fn form_field<T: Resource>(
    handle: CollectionHandle<T>,
    field: &'static FieldSpec,
    ctx: AppContext,
) -> impl IntoView {
    let name = field.name;
    let value = move || handle.read(|c| c.form().values.get(name).to_string());
    let error = move || handle.read(|c| c.form().errors.get(name).map(str::to_string));
    let on_input = move |ev: web_sys::Event| handle.get().set_field(name, event_target_value(&ev));

    let input = match field.kind {
        FieldKind::Text => view! {
            <input type="text" name=name prop:value=value on:input=on_input />
        }
        .into_any(),
        FieldKind::TextArea => view! {
            <textarea name=name rows="3" prop:value=value on:input=on_input></textarea>
        }
        .into_any(),
        FieldKind::Integer | FieldKind::Decimal => {
            let step = if field.kind == FieldKind::Integer { "1" } else { "0.01" };
            view! {
                <input type="number" name=name step=step prop:value=value on:input=on_input />
            }
            .into_any()
        }
        FieldKind::Reference { path } => view! {
            <select name=name on:change=on_input>
                <option value="" selected=move || value().is_empty()>
                    {format!("Select {}...", field.label.to_lowercase())}
                </option>
                {move || {
                    let current = value();
                    ctx.reference_options(path)
                        .into_iter()
                        .map(|(id, label)| {
                            let selected = id == current;
                            view! { <option value=id selected=selected>{label}</option> }
                        })
                        .collect_view()
                }}
            </select>
        }
        .into_any(),
    };

    view! {
        <label class="form-field">
            <span class="field-label">{field.label}</span>
            {input}
            {move || error().map(|message| view! { <span class="field-error">{message}</span> })}
        </label>
    }
}
