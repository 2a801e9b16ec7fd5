//! Drag-reorder of categories and tasks
//!
//! While a drag is active the board model is rearranged live; the DOM follows
//! through the keyed `For` lists. Nothing is sent until the drop.

use leptos::prelude::*;
use leptos_dragdrop::{data_id, measure, resolve_placement, DragSession, Reorderable, Slot};

use crate::actions::DragItem;
use crate::board::Board;
use crate::context::AppContext;
use crate::models::{CategoryId, TaskId};
use crate::store::{store_try_update, BoardStateStoreFields};

pub const CATEGORY_ID_ATTR: &str = "data-category-id";
pub const TASK_ID_ATTR: &str = "data-task-id";

/// Visible category containers (the dragged one is hidden)
const CATEGORY_TARGETS: &str = ".category-container:not(.hidden)";
/// Visible task cards plus every category header
const TASK_TARGETS: &str = ".todo-item:not(.hidden), .category-title";

#[derive(Clone, Copy)]
pub struct BoardReorder {
    ctx: AppContext,
    threshold: f64,
}

impl BoardReorder {
    pub fn new(ctx: AppContext) -> Self {
        let threshold = ctx.config().drop_threshold_px;
        Self { ctx, threshold }
    }

    fn drag_category(&self, id: CategoryId, client_y: f64) {
        let candidates = measure(CATEGORY_TARGETS, |el| data_id(el, CATEGORY_ID_ATTR).map(Slot::Item));
        if let Some(placement) = resolve_placement(client_y, &candidates, self.threshold) {
            store_try_update(&self.ctx.store, |board| board.place_category(id, placement));
        }
    }

    fn drag_task(&self, id: TaskId, client_y: f64) {
        let board = self.ctx.store.board();
        let candidates = measure(TASK_TARGETS, |el| {
            if let Some(task_id) = data_id(el, TASK_ID_ATTR) {
                return Some(Slot::Item(task_id));
            }
            let container: CategoryId = data_id(el, CATEGORY_ID_ATTR)?;
            let is_empty = board.with_untracked(|b| b.is_empty_category(container));
            Some(Slot::Header { container, is_empty })
        });
        if let Some(placement) = resolve_placement(client_y, &candidates, self.threshold) {
            store_try_update(&self.ctx.store, |board| board.place_task(id, placement));
        }
    }
}

impl Reorderable for BoardReorder {
    type Item = DragItem;
    type Snapshot = Board;

    fn identify(&self, element: &web_sys::Element) -> Option<DragItem> {
        if let Some(id) = data_id(element, TASK_ID_ATTR) {
            return Some(DragItem::Task(id));
        }
        data_id(element, CATEGORY_ID_ATTR).map(DragItem::Category)
    }

    fn snapshot(&self) -> Board {
        self.ctx.store.board().get_untracked()
    }

    fn drag_over(&self, item: &DragItem, client_y: f64) {
        match *item {
            DragItem::Category(id) => self.drag_category(id, client_y),
            DragItem::Task(id) => self.drag_task(id, client_y),
        }
    }

    fn drop(&self, session: DragSession<DragItem, Board>) {
        tracing::debug!(item = ?session.item, "dropped");
        self.ctx.spawn(move |actions| async move {
            actions.relocate(session.item, session.origin).await;
        });
    }

    fn cancel(&self, session: DragSession<DragItem, Board>) {
        tracing::debug!(item = ?session.item, "drag cancelled, restoring order");
        self.ctx.store.board().set(session.origin);
    }
}
