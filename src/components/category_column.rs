//! Category Column Component
//!
//! Editable header, delete/add buttons and the category's tasks.

use leptos::prelude::*;

use super::TaskCard;
use crate::actions::DragItem;
use crate::context::use_app_context;
use crate::models::CategoryId;
use crate::store::BoardStateStoreFields;

#[component]
pub fn CategoryColumn(category_id: CategoryId) -> impl IntoView {
    let id = category_id;
    let ctx = use_app_context();
    let store = ctx.store;
    let messages = ctx.messages();

    let name = move || {
        store.board().read().category(id).map(|c| c.name.clone()).unwrap_or_default()
    };
    let container_class = move || {
        if ctx.drag.is_hidden(&DragItem::Category(id)) {
            "category-container draggable hidden"
        } else {
            "category-container draggable"
        }
    };

    let rename = move |ev: web_sys::Event| {
        let value = event_target_value(&ev);
        ctx.spawn(move |actions| async move {
            actions.rename_category(id, &value).await;
        });
    };

    view! {
        <div
            class=container_class
            id=format!("c{}", id)
            data-category-id=id.to_string()
            draggable="true"
        >
            <div class="category-header">
                <input
                    type="text"
                    class="category-title"
                    data-category-id=id.to_string()
                    prop:value=name
                    on:change=rename
                />
                <button
                    class="category-delete"
                    title=messages.delete_category
                    on:click=move |_| ctx.spawn(move |actions| async move {
                        actions.delete_category(id).await;
                    })
                >
                    "×"
                </button>
            </div>
            <button
                class="add-button"
                on:click=move |_| ctx.spawn(move |actions| async move {
                    actions.add_task(id).await;
                })
            >
                {messages.add_task}
            </button>
            <For
                each=move || store.board().read().task_ids(id)
                key=|task_id| *task_id
                children=move |task_id| view! { <TaskCard task_id=task_id /> }
            />
        </div>
    }
}
