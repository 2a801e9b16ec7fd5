//! Application Context
//!
//! Shared state provided via Leptos Context API.

use std::future::Future;

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dragdrop::DragState;

use crate::actions::{BoardActions, BrowserAlert, DragItem};
use crate::api::HttpApi;
use crate::board::Board;
use crate::config::ClientConfig;
use crate::i18n::Messages;
use crate::store::{BoardStore, StoreBoard};

pub type AppActions = BoardActions<HttpApi, BrowserAlert, StoreBoard>;

/// Board-page handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Board model
    pub store: BoardStore,
    /// Active drag session, scoped to this page
    pub drag: DragState<DragItem, Board>,
    actions: StoredValue<AppActions>,
    config: StoredValue<ClientConfig>,
}

impl AppContext {
    pub fn new(store: BoardStore, config: ClientConfig) -> Self {
        let actions = BoardActions::new(
            HttpApi::new(config.clone()),
            BrowserAlert,
            StoreBoard(store),
            config.messages(),
        );
        Self {
            store,
            drag: DragState::new(),
            actions: StoredValue::new(actions),
            config: StoredValue::new(config),
        }
    }

    pub fn config(&self) -> ClientConfig {
        self.config.get_value()
    }

    pub fn messages(&self) -> &'static Messages {
        self.config.with_value(|config| config.messages())
    }

    /// Run a board action on the event loop; nothing awaits the result
    pub fn spawn<F, Fut>(&self, action: F)
    where
        F: FnOnce(AppActions) -> Fut,
        Fut: Future<Output = ()> + 'static,
    {
        spawn_local(action(self.actions.get_value()));
    }
}

pub fn use_app_context() -> AppContext {
    use_context::<AppContext>().expect("AppContext should be provided")
}
