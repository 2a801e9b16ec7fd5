//! To-Do Board Frontend App
//!
//! The page path picks the view: `/tasks/...` is the board, anything else
//! is login/register.

use leptos::prelude::*;
use leptos_dragdrop::bind_global_drag;
use reactive_stores::Store;

use crate::components::{AuthPage, BoardView, NewCategoryForm};
use crate::config::{is_board_path, ClientConfig};
use crate::context::AppContext;
use crate::reorder::BoardReorder;
use crate::store::{BoardState, BoardStateStoreFields};

#[component]
pub fn App() -> impl IntoView {
    let config = ClientConfig::load();
    let path = web_sys::window()
        .and_then(|window| window.location().pathname().ok())
        .unwrap_or_default();
    tracing::info!(%path, origin = %config.api_origin, "starting");

    if is_board_path(&path) {
        view! { <BoardPage config=config /> }.into_any()
    } else {
        view! { <AuthPage config=config /> }.into_any()
    }
}

#[component]
fn BoardPage(config: ClientConfig) -> impl IntoView {
    let store = Store::new(BoardState::new());
    let ctx = AppContext::new(store, config);
    let messages = ctx.messages();

    // Provide context to all children
    provide_context(ctx);

    // Document-level drag handlers, bound once per page
    bind_global_drag(ctx.drag, BoardReorder::new(ctx));

    // Load the board on mount
    Effect::new(move |_| {
        ctx.spawn(move |actions| async move {
            actions.load().await;
            store.loading().set(false);
        });
    });

    let counts = move || {
        let board = store.board().read();
        let tasks: usize = board.columns().iter().map(|column| column.tasks.len()).sum();
        format!("{} / {}", board.category_count(), tasks)
    };

    view! {
        <main class="board-page">
            <h1>{messages.board_title}</h1>

            <NewCategoryForm />

            <Show when=move || !store.loading().get() fallback=|| view! { <p class="loading">"…"</p> }>
                <BoardView />
            </Show>

            <p class="item-count">{counts}</p>
        </main>
    }
}
