//! Leptos DragDrop Utilities
//!
//! Sortable lists for Leptos on top of native HTML5 drag events.
//! A drag is a [`DragSession`] owned by a component-scoped [`DragState`];
//! placement is computed from element midpoints (see [`geometry`]).

pub mod geometry;

use leptos::prelude::*;
use wasm_bindgen::JsCast;

pub use geometry::{closest_above, closest_below, resolve_placement, Candidate, Placement, Slot};

/// One drag interaction, from `dragstart` to `drop`/`dragend`
#[derive(Clone, Debug, PartialEq)]
pub struct DragSession<K, S> {
    /// What is being dragged
    pub item: K,
    /// Model state when the drag began, for reverting
    pub origin: S,
    /// Set one tick after start so the drag image is captured first
    pub hidden: bool,
}

/// Reactive holder for the active session
pub struct DragState<K, S> {
    session: RwSignal<Option<DragSession<K, S>>>,
}

impl<K, S> Clone for DragState<K, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, S> Copy for DragState<K, S> {}

impl<K, S> DragState<K, S>
where
    K: Clone + PartialEq + Send + Sync + 'static,
    S: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self { session: RwSignal::new(None) }
    }

    /// Open a session; any stale one is replaced
    pub fn begin(&self, item: K, origin: S) {
        self.session.set(Some(DragSession { item, origin, hidden: false }));
    }

    /// Hide the dragged element if the session for `item` is still open
    pub fn mark_hidden(&self, item: &K) {
        self.session.update(|session| {
            if let Some(s) = session.as_mut().filter(|s| &s.item == item) {
                s.hidden = true;
            }
        });
    }

    /// Close the session and hand it back
    pub fn take(&self) -> Option<DragSession<K, S>> {
        let mut taken = None;
        self.session.update(|session| taken = session.take());
        taken
    }

    pub fn dragging_untracked(&self) -> Option<K> {
        self.session.with_untracked(|s| s.as_ref().map(|s| s.item.clone()))
    }

    /// Tracked: true while `item` is dragged and its hide tick has passed
    pub fn is_hidden(&self, item: &K) -> bool {
        self.session.with(|s| s.as_ref().is_some_and(|s| s.hidden && &s.item == item))
    }
}

impl<K, S> Default for DragState<K, S>
where
    K: Clone + PartialEq + Send + Sync + 'static,
    S: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Glue between the document-level drag events and a list model
pub trait Reorderable: Clone + 'static {
    type Item: Clone + PartialEq + Send + Sync + 'static;
    type Snapshot: Clone + Send + Sync + 'static;

    /// Map the dragged element (closest `.draggable`) to a model item
    fn identify(&self, element: &web_sys::Element) -> Option<Self::Item>;

    /// Model state to restore if the drag is abandoned or rejected
    fn snapshot(&self) -> Self::Snapshot;

    /// Pointer moved over the page during a drag
    fn drag_over(&self, item: &Self::Item, client_y: f64);

    /// The item was dropped
    fn drop(&self, session: DragSession<Self::Item, Self::Snapshot>);

    /// The drag ended without a drop
    fn cancel(&self, session: DragSession<Self::Item, Self::Snapshot>);
}

/// Marker class an element needs to start a drag
pub const DRAGGABLE_CLASS: &str = "draggable";

/// Measure every element matching `selector`, in document order.
/// `classify` decides what each element stands for; `None` skips it.
pub fn measure<I, C>(
    selector: &str,
    classify: impl Fn(&web_sys::Element) -> Option<Slot<I, C>>,
) -> Vec<Candidate<I, C>> {
    let Some(doc) = web_sys::window().and_then(|win| win.document()) else {
        return Vec::new();
    };
    let Ok(nodes) = doc.query_selector_all(selector) else {
        tracing::warn!(selector, "invalid candidate selector");
        return Vec::new();
    };

    (0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
        .filter_map(|element| {
            let slot = classify(&element)?;
            let rect = element.get_bounding_client_rect();
            Some(Candidate::new(slot, rect.top(), rect.height()))
        })
        .collect()
}

/// Parse a numeric `data-*` attribute
pub fn data_id<T: std::str::FromStr>(element: &web_sys::Element, attr: &str) -> Option<T> {
    element.get_attribute(attr)?.parse().ok()
}

/// Close the session without a drop. Both the source element and the
/// document listen for `dragend`; whichever runs second finds nothing.
fn end_without_drop<R: Reorderable>(state: DragState<R::Item, R::Snapshot>, list: &R) -> bool {
    match state.take() {
        Some(session) => {
            list.cancel(session);
            true
        }
        None => false,
    }
}

fn dragged_element(ev: &web_sys::DragEvent) -> Option<web_sys::Element> {
    let target = ev.target()?.dyn_into::<web_sys::Element>().ok()?;
    target.closest(&format!(".{DRAGGABLE_CLASS}")).ok().flatten()
}

/// Bind document-level dragstart/dragover/drop/dragend handlers for `list`
pub fn bind_global_drag<R: Reorderable>(state: DragState<R::Item, R::Snapshot>, list: R) {
    use wasm_bindgen::closure::Closure;

    let Some(doc) = web_sys::window().and_then(|win| win.document()) else {
        return;
    };

    let start_list = list.clone();
    let on_dragstart = Closure::<dyn FnMut(web_sys::DragEvent)>::new(move |ev: web_sys::DragEvent| {
        let Some(element) = dragged_element(&ev) else { return };
        let Some(item) = start_list.identify(&element) else { return };

        if let Some(transfer) = ev.data_transfer() {
            transfer.set_effect_allowed("move");
            // Firefox will not start a drag without data
            let _ = transfer.set_data("text/plain", "");
        }
        state.begin(item.clone(), start_list.snapshot());

        // A live reorder may unmount the source node; a detached node still
        // gets its own dragend, but it no longer bubbles to the document.
        let source_list = start_list.clone();
        let on_source_dragend = Closure::once_into_js(move |_ev: web_sys::DragEvent| {
            end_without_drop(state, &source_list);
        });
        let options = web_sys::AddEventListenerOptions::new();
        options.set_once(true);
        if element
            .add_event_listener_with_callback_and_add_event_listener_options(
                "dragend",
                on_source_dragend.unchecked_ref(),
                &options,
            )
            .is_err()
        {
            tracing::warn!("could not watch drag source for dragend");
        }

        let hide = gloo_timers::callback::Timeout::new(0, move || state.mark_hidden(&item));
        hide.forget();
    });

    let over_list = list.clone();
    let on_dragover = Closure::<dyn FnMut(web_sys::DragEvent)>::new(move |ev: web_sys::DragEvent| {
        ev.prevent_default();
        if let Some(item) = state.dragging_untracked() {
            over_list.drag_over(&item, f64::from(ev.client_y()));
        }
    });

    let drop_list = list.clone();
    let on_drop = Closure::<dyn FnMut(web_sys::DragEvent)>::new(move |ev: web_sys::DragEvent| {
        if let Some(session) = state.take() {
            ev.prevent_default();
            drop_list.drop(session);
        }
    });

    let on_dragend = Closure::<dyn FnMut(web_sys::DragEvent)>::new(move |_ev: web_sys::DragEvent| {
        end_without_drop(state, &list);
    });

    for (name, handler) in [
        ("dragstart", &on_dragstart),
        ("dragover", &on_dragover),
        ("drop", &on_drop),
        ("dragend", &on_dragend),
    ] {
        let _ = doc.add_event_listener_with_callback(name, handler.as_ref().unchecked_ref());
    }

    on_dragstart.forget();
    on_dragover.forget();
    on_drop.forget();
    on_dragend.forget();
}
