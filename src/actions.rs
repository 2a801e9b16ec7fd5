//! Board Actions
//!
//! Every user mutation as one async flow: apply to the board model, call the
//! API, then confirm or roll back. A failure shows exactly one alert and
//! never retries.

use crate::api::payloads::{CategoryRef, CategoryRename, NewCategory, NewTask, TaskUpdate};
use crate::api::{ApiError, TodoApi};
use crate::board::Board;
use crate::i18n::Messages;
use crate::models::{Category, CategoryId, Task, TaskId};

/// Blocking user-facing alert
pub trait Notifier {
    fn alert(&self, message: &str);
}

/// `window.alert`
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserAlert;

impl Notifier for BrowserAlert {
    fn alert(&self, message: &str) {
        gloo_dialogs::alert(message);
    }
}

/// Access to the board model the actions operate on
pub trait BoardHandle {
    fn read<R>(&self, f: impl FnOnce(&Board) -> R) -> R;
    fn write<R>(&self, f: impl FnOnce(&mut Board) -> R) -> R;

    fn snapshot(&self) -> Board {
        self.read(Board::clone)
    }

    fn replace(&self, board: Board) {
        self.write(|b| *b = board);
    }
}

/// Which task field an edit touched
#[derive(Debug, Clone, PartialEq)]
pub enum TaskEdit {
    Title(String),
    Details(String),
    Due(String),
}

/// What a finished drag dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragItem {
    Category(CategoryId),
    Task(TaskId),
}

#[derive(Clone)]
pub struct BoardActions<A, N, B> {
    api: A,
    notifier: N,
    board: B,
    messages: &'static Messages,
}

impl<A: TodoApi, N: Notifier, B: BoardHandle> BoardActions<A, N, B> {
    pub fn new(api: A, notifier: N, board: B, messages: &'static Messages) -> Self {
        Self { api, notifier, board, messages }
    }

    pub fn board(&self) -> &B {
        &self.board
    }

    fn fail(&self, operation: &'static str, err: &ApiError, message: &str) {
        tracing::error!(operation, error = %err, "request failed");
        self.notifier.alert(message);
    }

    /// Replace the board with the server's snapshot
    pub async fn load(&self) -> bool {
        match self.api.snapshot().await {
            Ok(snapshot) => {
                let board = Board::from_snapshot(snapshot);
                tracing::info!(categories = board.category_count(), "board loaded");
                self.board.replace(board);
                true
            }
            Err(err) => {
                self.fail("load", &err, self.messages.load_failed);
                false
            }
        }
    }

    /// Append a category. Blank names are ignored; nothing changes locally
    /// until the server has created it.
    pub async fn add_category(&self, name: &str) -> Option<Category> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let body = NewCategory {
            order: self.board.read(|b| b.category_count()) as i64 + 1,
            name: name.to_string(),
        };
        match self.api.add_category(&body).await {
            Ok(category) => {
                self.board.write(|b| b.insert_category(category.clone()));
                Some(category)
            }
            Err(err) => {
                self.fail("add_category", &err, self.messages.add_failed);
                None
            }
        }
    }

    pub async fn rename_category(&self, id: CategoryId, name: &str) {
        let Some(previous) = self.board.write(|b| b.rename_category(id, name)) else {
            return;
        };
        let body = CategoryRename { id, name: name.to_string() };
        match self.api.update_category(&body).await {
            Ok(category) => {
                self.board.write(|b| b.rename_category(id, &category.name));
            }
            Err(err) => {
                self.board.write(|b| b.rename_category(id, &previous));
                self.fail("rename_category", &err, self.messages.change_failed);
            }
        }
    }

    pub async fn delete_category(&self, id: CategoryId) {
        match self.api.delete_category(&CategoryRef { id }).await {
            Ok(()) => {
                self.board.write(|b| b.remove_category(id));
            }
            Err(err) => self.fail("delete_category", &err, self.messages.delete_category_failed),
        }
    }

    /// Append a blank task to a category
    pub async fn add_task(&self, category_id: CategoryId) -> Option<Task> {
        let order = self.board.read(|b| b.task_count(category_id)) as i64 + 1;
        match self.api.add_task(&NewTask::blank(category_id, order)).await {
            Ok(task) => {
                if !self.board.write(|b| b.insert_task(task.clone())) {
                    tracing::warn!(task = task.id, category = category_id, "created task for a vanished category");
                }
                Some(task)
            }
            Err(err) => {
                self.fail("add_task", &err, self.messages.add_task_failed);
                None
            }
        }
    }

    /// Persist one edited field; reverts the task on failure
    pub async fn edit_task(&self, id: TaskId, edit: TaskEdit) {
        self.update_task(id, move |task| match edit {
            TaskEdit::Title(title) => task.title = title,
            TaskEdit::Details(details) => task.details = details,
            TaskEdit::Due(due) => task.due = due,
        })
        .await;
    }

    /// Flip completion and persist it right away
    pub async fn toggle_task(&self, id: TaskId) {
        self.update_task(id, |task| task.state = task.state.toggled()).await;
    }

    async fn update_task(&self, id: TaskId, change: impl FnOnce(&mut Task)) {
        let Some(mut edited) = self.board.read(|b| b.task(id).cloned()) else {
            return;
        };
        change(&mut edited);
        let Some(previous) = self.board.write(|b| b.replace_task(edited.clone())) else {
            return;
        };

        match self.api.update_task(&TaskUpdate::from(&edited)).await {
            Ok(confirmed) => {
                self.board.write(|b| b.replace_task(confirmed));
            }
            Err(err) => {
                self.board.write(|b| b.replace_task(previous));
                self.fail("update_task", &err, self.messages.change_failed);
            }
        }
    }

    pub async fn delete_task(&self, id: TaskId) {
        let Some(body) = self.board.read(|b| b.task_deletion(id)) else {
            return;
        };
        match self.api.delete_task(&body).await {
            Ok(()) => {
                self.board.write(|b| b.remove_task(id));
            }
            Err(err) => self.fail("delete_task", &err, self.messages.delete_task_failed),
        }
    }

    /// Persist a finished drag. The board already shows the new arrangement;
    /// on failure it goes back to `origin`.
    pub async fn relocate(&self, item: DragItem, origin: Board) -> bool {
        let result = match item {
            DragItem::Category(id) => {
                let Some(body) = self.board.read(|b| b.category_relocation(id)) else {
                    return false;
                };
                if origin.category_relocation(id) == Some(body) {
                    tracing::debug!(category = id, "drop without move");
                    return true;
                }
                tracing::info!(category = id, order = body.order, "relocating category");
                self.api.relocate_category(&body).await.map(|fresh| {
                    if let Some(snapshot) = fresh {
                        let diff = self.board.write(|b| b.reconcile(Board::from_snapshot(snapshot)));
                        if !diff.is_empty() {
                            tracing::info!(?diff, "board reconciled after relocation");
                        }
                    }
                })
            }
            DragItem::Task(id) => {
                let Some(body) = self.board.read(|b| b.task_relocation(id)) else {
                    return false;
                };
                if origin.task_relocation(id) == Some(body.clone()) {
                    tracing::debug!(task = id, "drop without move");
                    return true;
                }
                tracing::info!(task = id, order = body.order, category = body.belongs_to, "relocating task");
                self.api.relocate_task(&body).await.map(|confirmed| {
                    self.board.write(|b| b.apply_server_task(id, confirmed));
                })
            }
        };

        match result {
            Ok(()) => true,
            Err(err) => {
                self.board.replace(origin);
                self.fail("relocate", &err, self.messages.change_failed);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use async_trait::async_trait;
    use leptos_dragdrop::{resolve_placement, Candidate, Placement};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::api::payloads::{CategoryRelocation, TaskDeletion, TaskRelocation};
    use crate::api::ApiResult;
    use crate::config::DROP_THRESHOLD_PX;
    use crate::i18n::Locale;
    use crate::models::{Snapshot, TaskState};

    /// Everything the fake server was asked
    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Snapshot,
        AddCategory(NewCategory),
        UpdateCategory(CategoryRename),
        DeleteCategory(CategoryRef),
        RelocateCategory(CategoryRelocation),
        AddTask(NewTask),
        UpdateTask(TaskUpdate),
        DeleteTask(TaskDeletion),
        RelocateTask(TaskRelocation),
    }

    #[derive(Default)]
    struct FakeApi {
        calls: RefCell<Vec<Call>>,
        fail_with: Option<u16>,
        snapshot: Snapshot,
        next_id: RefCell<i64>,
        /// Answer to relocateCategory
        relocated_snapshot: Option<Snapshot>,
        /// relocateTask deletes and re-adds server-side, handing out a new id
        reissue_task_ids: bool,
    }

    impl FakeApi {
        fn failing(status: u16) -> Self {
            Self { fail_with: Some(status), ..Default::default() }
        }

        fn record(&self, call: Call) -> ApiResult<()> {
            self.calls.borrow_mut().push(call);
            match self.fail_with {
                Some(status) => Err(ApiError::Status { status, message: "Internal server error".to_string() }),
                None => Ok(()),
            }
        }

        fn fresh_id(&self) -> i64 {
            let mut id = self.next_id.borrow_mut();
            *id += 1;
            100 + *id
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.borrow().clone()
        }
    }

    #[async_trait(?Send)]
    impl TodoApi for FakeApi {
        async fn snapshot(&self) -> ApiResult<Snapshot> {
            self.record(Call::Snapshot)?;
            Ok(self.snapshot.clone())
        }

        async fn add_category(&self, body: &NewCategory) -> ApiResult<Category> {
            self.record(Call::AddCategory(body.clone()))?;
            Ok(Category { id: self.fresh_id(), name: body.name.clone(), order: body.order })
        }

        async fn update_category(&self, body: &CategoryRename) -> ApiResult<Category> {
            self.record(Call::UpdateCategory(body.clone()))?;
            Ok(Category { id: body.id, name: body.name.clone(), order: 1 })
        }

        async fn delete_category(&self, body: &CategoryRef) -> ApiResult<()> {
            self.record(Call::DeleteCategory(*body))
        }

        async fn relocate_category(&self, body: &CategoryRelocation) -> ApiResult<Option<Snapshot>> {
            self.record(Call::RelocateCategory(*body))?;
            Ok(self.relocated_snapshot.clone())
        }

        async fn add_task(&self, body: &NewTask) -> ApiResult<Task> {
            self.record(Call::AddTask(body.clone()))?;
            Ok(Task {
                id: self.fresh_id(),
                title: body.title.clone(),
                details: body.details.clone(),
                due: body.due.clone(),
                state: body.state,
                belongs_to: body.belongs_to,
                order: body.order,
            })
        }

        async fn update_task(&self, body: &TaskUpdate) -> ApiResult<Task> {
            self.record(Call::UpdateTask(body.clone()))?;
            Ok(Task {
                id: body.id,
                title: body.title.clone(),
                details: body.details.clone(),
                due: body.due.clone(),
                state: body.state,
                belongs_to: body.belongs_to,
                order: 0,
            })
        }

        async fn delete_task(&self, body: &TaskDeletion) -> ApiResult<()> {
            self.record(Call::DeleteTask(*body))
        }

        async fn relocate_task(&self, body: &TaskRelocation) -> ApiResult<Task> {
            self.record(Call::RelocateTask(body.clone()))?;
            Ok(Task {
                id: if self.reissue_task_ids { self.fresh_id() } else { body.id },
                title: body.title.clone(),
                details: body.details.clone(),
                due: body.due.clone(),
                state: body.state,
                belongs_to: body.belongs_to,
                order: body.order,
            })
        }
    }

    #[derive(Default, Clone)]
    struct RecordingAlert(Rc<RefCell<Vec<String>>>);

    impl RecordingAlert {
        fn messages(&self) -> Vec<String> {
            self.0.borrow().clone()
        }
    }

    impl Notifier for RecordingAlert {
        fn alert(&self, message: &str) {
            self.0.borrow_mut().push(message.to_string());
        }
    }

    #[derive(Default, Clone)]
    struct SharedBoard(Rc<RefCell<Board>>);

    impl BoardHandle for SharedBoard {
        fn read<R>(&self, f: impl FnOnce(&Board) -> R) -> R {
            f(&self.0.borrow())
        }

        fn write<R>(&self, f: impl FnOnce(&mut Board) -> R) -> R {
            f(&mut self.0.borrow_mut())
        }
    }

    fn category(id: CategoryId, order: i64) -> Category {
        Category { id, name: format!("Kategorie {}", id), order }
    }

    fn task(id: TaskId, belongs_to: CategoryId, order: i64) -> Task {
        Task {
            id,
            title: format!("Aufgabe {}", id),
            details: String::new(),
            due: String::new(),
            state: TaskState::Open,
            belongs_to,
            order,
        }
    }

    fn snapshot() -> Snapshot {
        // A(1): T1, T2, T3   B(2): empty
        Snapshot {
            categories: vec![category(1, 1), category(2, 2)],
            tasks: vec![task(1, 1, 1), task(2, 1, 2), task(3, 1, 3)],
        }
    }

    fn actions(api: FakeApi) -> (BoardActions<FakeApi, RecordingAlert, SharedBoard>, RecordingAlert) {
        let alerts = RecordingAlert::default();
        let board = SharedBoard::default();
        board.replace(Board::from_snapshot(snapshot()));
        let messages = Messages::for_locale(Locale::De);
        (BoardActions::new(api, alerts.clone(), board, messages), alerts)
    }

    #[tokio::test]
    async fn test_load_sorts_snapshot() {
        let api = FakeApi {
            snapshot: Snapshot {
                categories: vec![category(2, 2), category(1, 1)],
                tasks: vec![task(2, 1, 2), task(1, 1, 1)],
            },
            ..Default::default()
        };
        let (actions, alerts) = actions(api);
        assert!(actions.load().await);
        assert_eq!(actions.board().read(|b| b.category_ids()), vec![1, 2]);
        assert_eq!(actions.board().read(|b| b.task_ids(1)), vec![1, 2]);
        assert!(alerts.messages().is_empty());
    }

    #[tokio::test]
    async fn test_failed_add_category_leaves_board_and_alerts_once() {
        let (actions, alerts) = actions(FakeApi::failing(500));
        let before = actions.board().snapshot();

        assert_eq!(actions.add_category("Einkauf").await, None);

        assert_eq!(actions.board().snapshot(), before);
        assert_eq!(alerts.messages(), vec!["Fehler beim hinzufügen!".to_string()]);
    }

    #[tokio::test]
    async fn test_add_category_appends() {
        let (actions, alerts) = actions(FakeApi::default());
        let created = actions.add_category("  Einkauf ").await.unwrap();
        assert_eq!(created.name, "Einkauf");
        assert_eq!(actions.board().read(|b| b.category_ids()), vec![1, 2, created.id]);
        assert_eq!(
            actions.api.calls(),
            vec![Call::AddCategory(NewCategory { order: 3, name: "Einkauf".to_string() })]
        );

        assert_eq!(actions.add_category("   ").await, None);
        assert_eq!(actions.api.calls().len(), 1);
        assert!(alerts.messages().is_empty());
    }

    #[tokio::test]
    async fn test_drag_t2_above_t1_relocates_to_first() {
        let api = FakeApi { snapshot: Snapshot {
            categories: vec![category(1, 1)],
            tasks: vec![task(1, 1, 1), task(2, 1, 2)],
        }, ..Default::default() };
        let (actions, alerts) = actions(api);
        actions.load().await;
        let origin = actions.board().snapshot();

        // header at 0..20, T1 at 20..60; T2 is hidden while dragged
        let candidates: Vec<Candidate<TaskId, CategoryId>> = vec![
            Candidate::header(1, false, 0.0, 20.0),
            Candidate::item(1, 20.0, 40.0),
        ];
        let placement = resolve_placement(30.0, &candidates, DROP_THRESHOLD_PX).unwrap();
        assert_eq!(placement, Placement::Before(1));
        assert!(actions.board().write(|b| b.place_task(2, placement)));

        assert!(actions.relocate(DragItem::Task(2), origin).await);

        let Some(Call::RelocateTask(body)) = actions.api.calls().last().cloned() else {
            panic!("expected a relocateTask call");
        };
        assert_eq!((body.id, body.order, body.belongs_to), (2, 1, 1));
        assert_eq!(actions.board().read(|b| b.task_ids(1)), vec![2, 1]);
        assert!(alerts.messages().is_empty());
    }

    #[tokio::test]
    async fn test_relocated_task_takes_server_id_without_duplicate() {
        let api = FakeApi {
            snapshot: Snapshot {
                categories: vec![category(1, 1)],
                tasks: vec![task(1, 1, 1), task(2, 1, 2)],
            },
            reissue_task_ids: true,
            ..Default::default()
        };
        let (actions, alerts) = actions(api);
        actions.load().await;
        let origin = actions.board().snapshot();

        assert!(actions.board().write(|b| b.place_task(2, Placement::Before(1))));
        assert!(actions.relocate(DragItem::Task(2), origin).await);

        assert_eq!(actions.board().read(|b| b.task_ids(1)), vec![101, 1]);
        assert!(actions.board().read(|b| b.task(2).is_none()));
        assert!(alerts.messages().is_empty());
    }

    #[tokio::test]
    async fn test_relocated_category_adopts_server_snapshot() {
        // the server also knows a task another session added to B
        let server = Snapshot {
            categories: vec![category(2, 1), category(1, 2)],
            tasks: vec![task(1, 1, 1), task(2, 1, 2), task(3, 1, 3), task(4, 2, 1)],
        };
        let api = FakeApi { relocated_snapshot: Some(server.clone()), ..Default::default() };
        let (actions, alerts) = actions(api);
        let origin = actions.board().snapshot();

        assert!(actions.board().write(|b| b.place_category(2, Placement::Before(1))));
        assert!(actions.relocate(DragItem::Category(2), origin).await);

        assert_eq!(actions.board().snapshot(), Board::from_snapshot(server));
        assert_eq!(actions.board().read(|b| b.task_ids(2)), vec![4]);
        assert!(alerts.messages().is_empty());
    }

    #[tokio::test]
    async fn test_drop_on_empty_header_moves_into_category() {
        let (actions, _) = actions(FakeApi::default());
        let origin = actions.board().snapshot();

        let candidates: Vec<Candidate<TaskId, CategoryId>> = vec![
            Candidate::header(2, actions.board().read(|b| b.is_empty_category(2)), 300.0, 20.0),
        ];
        let placement = resolve_placement(305.0, &candidates, DROP_THRESHOLD_PX).unwrap();
        actions.board().write(|b| b.place_task(3, placement));
        actions.relocate(DragItem::Task(3), origin).await;

        assert_eq!(actions.board().read(|b| b.task_ids(2)), vec![3]);
        let Some(Call::RelocateTask(body)) = actions.api.calls().last().cloned() else {
            panic!("expected a relocateTask call");
        };
        assert_eq!((body.order, body.belongs_to), (1, 2));
    }

    #[tokio::test]
    async fn test_failed_relocate_reverts_to_origin() {
        let (actions, alerts) = actions(FakeApi::failing(403));
        let origin = actions.board().snapshot();

        actions.board().write(|b| b.place_category(2, Placement::Before(1)));
        assert!(!actions.relocate(DragItem::Category(2), origin.clone()).await);

        assert_eq!(actions.board().snapshot(), origin);
        assert_eq!(
            actions.api.calls(),
            vec![Call::RelocateCategory(CategoryRelocation { id: 2, order: 1 })]
        );
        assert_eq!(alerts.messages().len(), 1);
    }

    #[tokio::test]
    async fn test_drop_in_place_sends_nothing() {
        let (actions, _) = actions(FakeApi::default());
        let origin = actions.board().snapshot();
        assert!(actions.relocate(DragItem::Task(2), origin).await);
        assert!(actions.api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_delete_mid_list_sends_pre_delete_order() {
        let (actions, _) = actions(FakeApi::default());
        actions.delete_task(2).await;

        assert_eq!(
            actions.api.calls(),
            vec![Call::DeleteTask(TaskDeletion { belongs_to: 1, id: 2, order: 2 })]
        );
        assert_eq!(actions.board().read(|b| b.task_ids(1)), vec![1, 3]);
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_task() {
        let (actions, alerts) = actions(FakeApi::failing(500));
        actions.delete_task(2).await;
        assert_eq!(actions.board().read(|b| b.task_ids(1)), vec![1, 2, 3]);
        assert_eq!(alerts.messages(), vec!["Fehler beim Löschen der Aufgabe!".to_string()]);
    }

    #[tokio::test]
    async fn test_toggle_persists_full_record() {
        let (actions, _) = actions(FakeApi::default());
        actions.toggle_task(3).await;

        assert_eq!(actions.board().read(|b| b.task(3).unwrap().state), TaskState::Done);
        let Some(Call::UpdateTask(body)) = actions.api.calls().last().cloned() else {
            panic!("expected an updateTask call");
        };
        assert_eq!(body.state, TaskState::Done);
        assert_eq!(body.belongs_to, 1);
        // confirmation does not disturb the position
        assert_eq!(actions.board().read(|b| b.task(3).unwrap().order), 3);
    }

    #[tokio::test]
    async fn test_failed_edit_reverts_field() {
        let (actions, alerts) = actions(FakeApi::failing(500));
        actions.edit_task(1, TaskEdit::Title("Neu".to_string())).await;

        assert_eq!(actions.board().read(|b| b.task(1).unwrap().title.clone()), "Aufgabe 1");
        assert_eq!(alerts.messages().len(), 1);
    }

    #[tokio::test]
    async fn test_rename_and_delete_category() {
        let (actions, _) = actions(FakeApi::default());
        actions.rename_category(2, "Privat").await;
        assert_eq!(actions.board().read(|b| b.category(2).unwrap().name.clone()), "Privat");

        actions.delete_category(1).await;
        assert_eq!(actions.board().read(|b| b.category_ids()), vec![2]);
    }

    #[tokio::test]
    async fn test_add_task_appends_blank() {
        let (actions, _) = actions(FakeApi::default());
        let created = actions.add_task(1).await.unwrap();
        assert_eq!(actions.board().read(|b| b.task_ids(1)), vec![1, 2, 3, created.id]);
        assert_eq!(actions.api.calls(), vec![Call::AddTask(NewTask::blank(1, 4))]);
    }
}
