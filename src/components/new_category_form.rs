//! New Category Form Component

use leptos::prelude::*;
use wasm_bindgen::JsCast;

use crate::context::use_app_context;

/// Form appending a category at the end of the board
#[component]
pub fn NewCategoryForm() -> impl IntoView {
    let ctx = use_app_context();
    let messages = ctx.messages();

    let (new_name, set_new_name) = signal(String::new());

    let create_category = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let name = new_name.get();
        if name.trim().is_empty() {
            return;
        }
        ctx.spawn(move |actions| async move {
            if actions.add_category(&name).await.is_some() {
                set_new_name.set(String::new());
            }
        });
    };

    view! {
        <form id="category-form" class="new-category-form" on:submit=create_category>
            <input
                id="category-title"
                type="text"
                placeholder=messages.new_category_placeholder
                prop:value=move || new_name.get()
                on:input=move |ev| {
                    if let Some(input) = ev.target().and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok()) {
                        set_new_name.set(input.value());
                    }
                }
            />
            <button type="submit">{messages.add_category}</button>
        </form>
    }
}
