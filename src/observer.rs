//! Lifecycle: discovers carousel containers at load and later, owns the
//! registry of live instances, and tears instances down when their
//! containers leave the document.

use crate::config::CONTAINER_SELECTOR;
use crate::instance::CarouselInstance;
use gloo_utils::{body, document};
use log::{debug, warn};
use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, MutationObserver, MutationObserverInit, MutationRecord};

thread_local! {
    /// Live instances; survives across discovery events for the page's
    /// lifetime.
    static INSTANCES: RefCell<Vec<CarouselInstance>> = RefCell::new(Vec::new());

    /// The page-level observer, kept alive with its callback.
    static PAGE_OBSERVER: RefCell<Option<(MutationObserver, Closure<dyn FnMut(js_sys::Array, MutationObserver)>)>> =
        RefCell::new(None);
}

/// Instantiate every eligible container under `root`.
pub fn scan(root: &Element) {
    let list = match root.query_selector_all(CONTAINER_SELECTOR) {
        Ok(list) => list,
        Err(err) => {
            warn!("container scan failed: {err:?}");
            return;
        }
    };
    for i in 0..list.length() {
        if let Some(element) = list.item(i).and_then(|node| node.dyn_into::<HtmlElement>().ok()) {
            init_container(&element);
        }
    }
}

/// Mount a single container unless it already has a live instance.
pub fn init_container(container: &HtmlElement) {
    let already_live = INSTANCES.with(|instances| {
        instances
            .borrow()
            .iter()
            .any(|instance| instance.container().is_same_node(Some(container)))
    });
    if already_live {
        debug!("container already has a live carousel");
        return;
    }

    if let Some(instance) = CarouselInstance::mount(container) {
        INSTANCES.with(|instances| instances.borrow_mut().push(instance));
    }
}

fn handle_mutations(mutations: &js_sys::Array) {
    for mutation in mutations.iter() {
        let record: MutationRecord = mutation.unchecked_into();

        let added = record.added_nodes();
        for i in 0..added.length() {
            let Some(node) = added.item(i) else { continue };
            let Some(element) = node.dyn_ref::<Element>() else { continue };
            if element.matches(CONTAINER_SELECTOR).unwrap_or(false) {
                if let Some(container) = element.dyn_ref::<HtmlElement>() {
                    init_container(container);
                }
            }
            scan(element);
        }

        let removed = record.removed_nodes();
        for i in 0..removed.length() {
            let Some(node) = removed.item(i) else { continue };
            INSTANCES.with(|instances| {
                // Dropping a retained-out instance destroys it.
                instances
                    .borrow_mut()
                    .retain(|instance| !instance.is_within(&node));
            });
        }
    }
}

/// Install the page-level mutation observer. A second call is a no-op.
pub fn observe_page() -> Result<(), JsValue> {
    let installed = PAGE_OBSERVER.with(|slot| slot.borrow().is_some());
    if installed {
        return Ok(());
    }

    let callback = Closure::<dyn FnMut(js_sys::Array, MutationObserver)>::new(
        move |mutations: js_sys::Array, _observer: MutationObserver| {
            handle_mutations(&mutations);
        },
    );

    let observer = MutationObserver::new(callback.as_ref().unchecked_ref())?;
    let options = MutationObserverInit::new();
    options.set_child_list(true);
    options.set_subtree(true);
    observer.observe_with_options(&body(), &options)?;

    PAGE_OBSERVER.with(|slot| *slot.borrow_mut() = Some((observer, callback)));
    Ok(())
}

/// Discover the containers already in the document and start watching for
/// injected ones.
pub fn boot() {
    if let Some(root) = document().document_element() {
        scan(&root);
    }
    if let Err(err) = observe_page() {
        warn!("page observation unavailable: {err:?}");
    }
}
