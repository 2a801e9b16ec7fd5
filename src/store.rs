//! Board State Store
//!
//! Uses Leptos reactive_stores so views can subscribe to the board model.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::actions::BoardHandle;
use crate::board::Board;

/// Reactive state behind the board page
#[derive(Clone, Debug, Default, Store)]
pub struct BoardState {
    /// Ordered categories and tasks; the DOM is a projection of this
    pub board: Board,
    /// True until the first snapshot arrived (or failed)
    pub loading: bool,
}

impl BoardState {
    pub fn new() -> Self {
        Self { loading: true, ..Default::default() }
    }
}

/// Type alias for the store
pub type BoardStore = Store<BoardState>;

/// [`BoardHandle`] over the store's `board` field
#[derive(Clone, Copy)]
pub struct StoreBoard(pub BoardStore);

impl BoardHandle for StoreBoard {
    fn read<R>(&self, f: impl FnOnce(&Board) -> R) -> R {
        f(&self.0.board().read_untracked())
    }

    fn write<R>(&self, f: impl FnOnce(&mut Board) -> R) -> R {
        f(&mut self.0.board().write())
    }
}

/// Replace the board only if `change` reports a difference, so no-op drag
/// moves do not re-render
pub fn store_try_update(store: &BoardStore, change: impl FnOnce(&mut Board) -> bool) {
    let mut next = store.board().get_untracked();
    if change(&mut next) {
        store.board().set(next);
    }
}
