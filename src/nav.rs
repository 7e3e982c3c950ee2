use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use js_sys::{Array, Date, Function, Reflect};
use vitrina_core::nav::{
    should_reset_on_reload, ACTIVE_CLASS, LINK_SELECTOR, NAV_SELECTOR, SECTION_SELECTOR,
};
use vitrina_core::{FxConfig, NavHighlighter, SectionReport};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, ScrollBehavior, ScrollToOptions, Window,
};

use crate::dom;

type ObserverCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

/// Keeps exactly one nav link marked active, driven by link clicks and by
/// which section fills the band under the nav bar.
pub struct NavBinding {
    highlighter: Rc<RefCell<NavHighlighter>>,
    links: Rc<Vec<Element>>,
    observer: Option<IntersectionObserver>,
    _observer_callback: Option<ObserverCallback>,
    _listeners: Vec<EventListener>,
}

impl NavBinding {
    pub fn install(document: &Document, config: &FxConfig) -> Option<Self> {
        let links = dom::query_all(document, LINK_SELECTOR);
        if links.is_empty() {
            return None;
        }
        let nav_height = document
            .query_selector(NAV_SELECTOR)
            .ok()
            .flatten()
            .and_then(|nav| nav.dyn_into::<HtmlElement>().ok())
            .map(|nav| nav.offset_height() as f64)
            .unwrap_or(0.0);
        let hrefs: Vec<String> = links
            .iter()
            .map(|link| link.get_attribute("href").unwrap_or_default())
            .collect();
        let highlighter = Rc::new(RefCell::new(NavHighlighter::new(
            hrefs.iter().map(String::as_str),
            nav_height,
            config,
        )));
        let links = Rc::new(links);

        let mut listeners = Vec::with_capacity(links.len());
        for (link, href) in links.iter().zip(hrefs) {
            let highlighter = highlighter.clone();
            let links = links.clone();
            let document = document.clone();
            listeners.push(EventListener::new_with_options(
                link,
                "click",
                EventListenerOptions::enable_prevent_default(),
                move |event| {
                    event.prevent_default();
                    on_link_click(&document, &highlighter, &links, &href);
                },
            ));
        }

        let (observer, callback) =
            observe_sections(document, config, nav_height, &highlighter, &links).unzip();

        Some(Self {
            highlighter,
            links,
            observer,
            _observer_callback: callback,
            _listeners: listeners,
        })
    }

    pub fn active(&self) -> Option<String> {
        self.highlighter.borrow().active().map(str::to_string)
    }

    /// Feeds observer-style reports, as the section observer would.
    pub fn report_sections(&self, reports: &[SectionReport]) {
        apply_reports(&self.highlighter, &self.links, reports);
    }
}

impl Drop for NavBinding {
    fn drop(&mut self) {
        if let Some(observer) = self.observer.as_ref() {
            observer.disconnect();
        }
    }
}

fn on_link_click(
    document: &Document,
    highlighter: &Rc<RefCell<NavHighlighter>>,
    links: &[Element],
    href: &str,
) {
    let Some(window) = dom::window() else {
        return;
    };
    let page_offset = window.page_y_offset().unwrap_or(0.0);
    let plan = highlighter.borrow_mut().click(href, Date::now(), |id| {
        document
            .get_element_by_id(id)
            .map(|el| el.get_bounding_client_rect().top() + page_offset)
    });
    let Some(plan) = plan else {
        return;
    };

    let options = ScrollToOptions::new();
    options.set_top(plan.scroll_top);
    options.set_behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);

    sync_links(links, &highlighter.borrow().link_states());

    match window.history() {
        Ok(history) => {
            let pushed = history.push_state_with_url(&JsValue::NULL, "", Some(&plan.fragment));
            if let Err(err) = pushed {
                gloo::console::warn!("history push failed", dom::js_err(err));
            }
        }
        Err(err) => gloo::console::warn!("history unavailable", dom::js_err(err)),
    }
}

fn observe_sections(
    document: &Document,
    config: &FxConfig,
    nav_height: f64,
    highlighter: &Rc<RefCell<NavHighlighter>>,
    links: &Rc<Vec<Element>>,
) -> Option<(IntersectionObserver, ObserverCallback)> {
    let sections = dom::query_all(document, SECTION_SELECTOR);
    if sections.is_empty() {
        return None;
    }
    let highlighter = highlighter.clone();
    let links = links.clone();
    let callback: ObserverCallback =
        Closure::new(move |entries: Array, _observer: IntersectionObserver| {
            let reports: Vec<SectionReport> = entries
                .iter()
                .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                .map(|entry| {
                    SectionReport::new(
                        entry.target().id(),
                        entry.intersection_ratio(),
                        entry.is_intersecting(),
                    )
                })
                .collect();
            apply_reports(&highlighter, &links, &reports);
        });

    let thresholds = Array::new();
    for value in &config.nav_thresholds {
        thresholds.push(&JsValue::from_f64(*value));
    }
    let options = IntersectionObserverInit::new();
    options.set_root_margin(&config.nav_root_margin(nav_height));
    options.set_threshold(&thresholds);
    let observer = match IntersectionObserver::new_with_options(
        callback.as_ref().unchecked_ref(),
        &options,
    ) {
        Ok(observer) => observer,
        Err(err) => {
            gloo::console::warn!("section observer unavailable", dom::js_err(err));
            return None;
        }
    };
    for section in &sections {
        observer.observe(section);
    }
    Some((observer, callback))
}

fn apply_reports(
    highlighter: &Rc<RefCell<NavHighlighter>>,
    links: &[Element],
    reports: &[SectionReport],
) {
    let changed = highlighter.borrow_mut().observe(reports, Date::now());
    if changed.is_some() {
        sync_links(links, &highlighter.borrow().link_states());
    }
}

fn sync_links(links: &[Element], states: &[bool]) {
    for (link, active) in links.iter().zip(states) {
        dom::toggle_class(link, ACTIVE_CLASS, *active);
        if *active {
            let _ = link.set_attribute("aria-current", "true");
        } else {
            let _ = link.remove_attribute("aria-current");
        }
    }
}

/// Navigation type of the current page load (`"navigate"`, `"reload"`, ...).
/// Browsers without navigation timing report `None`.
pub fn navigation_type() -> Option<String> {
    let window = dom::window()?;
    let performance = Reflect::get(&window, &JsValue::from_str("performance")).ok()?;
    if performance.is_null() || performance.is_undefined() {
        return None;
    }
    let getter = Reflect::get(&performance, &JsValue::from_str("getEntriesByType")).ok()?;
    let getter = getter.dyn_into::<Function>().ok()?;
    let entries = getter
        .call1(&performance, &JsValue::from_str("navigation"))
        .ok()?
        .dyn_into::<Array>()
        .ok()?;
    let entry = entries.get(0);
    if entry.is_undefined() {
        return None;
    }
    Reflect::get(&entry, &JsValue::from_str("type")).ok()?.as_string()
}

/// On a reload that landed on a fragment, drop the fragment and start from
/// the top instead of letting the browser jump to the anchor.
pub fn normalize_reload(navigation_type: Option<&str>) -> bool {
    let Some(window) = dom::window() else {
        return false;
    };
    let hash = window.location().hash().unwrap_or_default();
    if !should_reset_on_reload(navigation_type, &hash) {
        return false;
    }
    drop_fragment(&window);
    window.scroll_to_with_x_and_y(0.0, 0.0);
    true
}

/// Rewrites the current history entry without its fragment, so the reload
/// does not leave a `#section` behind for the next one.
fn drop_fragment(window: &Window) {
    let location = window.location();
    let bare = format!(
        "{}{}",
        location.pathname().unwrap_or_default(),
        location.search().unwrap_or_default()
    );
    let replaced = window
        .history()
        .and_then(|history| history.replace_state_with_url(&JsValue::NULL, "", Some(&bare)));
    if let Err(err) = replaced {
        gloo::console::warn!("history replace failed, clearing hash", dom::js_err(err));
        let _ = location.set_hash("");
    }
}
