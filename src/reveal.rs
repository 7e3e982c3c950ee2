use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Array;
use vitrina_core::reveal::{INVIEW_CLASS, REVEAL_CLASS};
use vitrina_core::{FxConfig, RevealTracker};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
};

use crate::dom;

type ObserverCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

struct Targets {
    elements: Vec<Element>,
    tracker: RefCell<RevealTracker>,
}

/// Adds `inview` to every `.reveal` element the first time it scrolls into
/// view, then stops watching it.
pub struct RevealAnimator {
    targets: Rc<Targets>,
    observer: IntersectionObserver,
    _callback: ObserverCallback,
}

impl RevealAnimator {
    pub fn install(document: &Document, config: &FxConfig) -> Option<Self> {
        let elements = dom::query_all(document, &format!(".{REVEAL_CLASS}"));
        if elements.is_empty() {
            return None;
        }
        let targets = Rc::new(Targets {
            tracker: RefCell::new(RevealTracker::new(elements.len())),
            elements,
        });
        let callback: ObserverCallback = {
            let targets = targets.clone();
            Closure::new(move |entries: Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    mark(&targets, &observer, &entry.target(), entry.is_intersecting());
                }
            })
        };

        let options = IntersectionObserverInit::new();
        options.set_root_margin(&config.reveal_root_margin());
        options.set_threshold(&JsValue::from_f64(config.reveal_threshold));
        let observer = match IntersectionObserver::new_with_options(
            callback.as_ref().unchecked_ref(),
            &options,
        ) {
            Ok(observer) => observer,
            Err(err) => {
                let err = dom::js_err(err);
                gloo::console::warn!("reveal observer unavailable, showing content", err);
                reveal_all(&targets.elements);
                return None;
            }
        };
        for el in &targets.elements {
            observer.observe(el);
        }
        gloo::console::log!("reveal: observing", targets.elements.len() as u32);
        Some(Self {
            targets,
            observer,
            _callback: callback,
        })
    }

    /// Handles one report for `target` the way an observer entry would.
    pub fn report(&self, target: &Element, is_intersecting: bool) {
        mark(&self.targets, &self.observer, target, is_intersecting);
    }
}

impl Drop for RevealAnimator {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

fn mark(
    targets: &Targets,
    observer: &IntersectionObserver,
    target: &Element,
    is_intersecting: bool,
) {
    let Some(index) = targets.elements.iter().position(|el| el == target) else {
        return;
    };
    if targets.tracker.borrow_mut().report(index, is_intersecting) {
        dom::toggle_class(target, INVIEW_CLASS, true);
        observer.unobserve(target);
    }
}

fn reveal_all(elements: &[Element]) {
    for el in elements {
        dom::toggle_class(el, INVIEW_CLASS, true);
    }
}
