//! Task Card Component

use leptos::prelude::*;

use crate::actions::{DragItem, TaskEdit};
use crate::context::use_app_context;
use crate::models::{Task, TaskId};
use crate::store::BoardStateStoreFields;

#[component]
pub fn TaskCard(task_id: TaskId) -> impl IntoView {
    let id = task_id;
    let ctx = use_app_context();
    let store = ctx.store;
    let messages = ctx.messages();

    let field = move |get: fn(&Task) -> String| {
        move || store.board().read().task(id).map(get).unwrap_or_default()
    };
    let is_done = move || store.board().read().task(id).is_some_and(|t| t.state.is_done());
    let is_overdue = move || {
        let now = chrono::Local::now().naive_local();
        store.board().read().task(id).is_some_and(|t| t.is_overdue(now))
    };

    let card_class = move || {
        let mut class = String::from("todo-item draggable");
        if ctx.drag.is_hidden(&DragItem::Task(id)) {
            class.push_str(" hidden");
        }
        if is_overdue() {
            class.push_str(" overdue");
        }
        class
    };

    let edit = move |make: fn(String) -> TaskEdit| {
        move |ev: web_sys::Event| {
            let edit = make(event_target_value(&ev));
            ctx.spawn(move |actions| async move {
                actions.edit_task(id, edit).await;
            });
        }
    };

    view! {
        <div
            class=card_class
            id=format!("t{}", id)
            data-task-id=id.to_string()
            draggable="true"
            style=move || if is_done() { "text-decoration: line-through;" } else { "" }
        >
            <span class="drag-handle">"≡"</span>
            <input
                type="text"
                class="editable task-title"
                placeholder=messages.title_placeholder
                prop:value=field(|t| t.title.clone())
                on:change=edit(TaskEdit::Title)
            />
            <input
                type="text"
                class="editable task-details"
                placeholder=messages.details_placeholder
                prop:value=field(|t| t.details.clone())
                on:change=edit(TaskEdit::Details)
            />
            <input
                type="datetime-local"
                class="editable task-due"
                prop:value=field(|t| t.due.clone())
                on:change=edit(TaskEdit::Due)
            />
            <button
                class="complete-button"
                on:click=move |_| ctx.spawn(move |actions| async move {
                    actions.toggle_task(id).await;
                })
            >
                {messages.complete}
            </button>
            <button
                class="delete-button"
                on:click=move |_| ctx.spawn(move |actions| async move {
                    actions.delete_task(id).await;
                })
            >
                {messages.delete_task}
            </button>
        </div>
    }
}
