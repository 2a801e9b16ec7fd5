//! Board View Component
//!
//! All category columns in board order.

use leptos::prelude::*;

use super::CategoryColumn;
use crate::context::use_app_context;
use crate::store::BoardStateStoreFields;

#[component]
pub fn BoardView() -> impl IntoView {
    let store = use_app_context().store;

    view! {
        <div id="categories" class="categories">
            <For
                each=move || store.board().read().category_ids()
                key=|id| *id
                children=move |id| view! { <CategoryColumn category_id=id /> }
            />
        </div>
    }
}
