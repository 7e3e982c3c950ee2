use std::cell::{Cell, RefCell};
use std::rc::Rc;

use js_sys::Date;
use vitrina_core::FxConfig;
use web_sys::Document;

use crate::collage::CollageOverlay;
use crate::dom;
use crate::nav::{self, NavBinding};
use crate::parallax::ParallaxEngine;
use crate::reveal::RevealAnimator;
use crate::settings;
use crate::storage::LocalStore;
use crate::theme::{SharedStore, ThemeToggle};
use crate::tilt::TiltEffect;

pub const YEAR_ID: &str = "year";

thread_local! {
    static PAGE: RefCell<Option<Page>> = RefCell::new(None);
    static STARTED: Cell<bool> = Cell::new(false);
}

/// Every effect wired to one document. Dropping the page detaches all
/// listeners and observers.
pub struct Page {
    pub theme: ThemeToggle,
    pub reveal: Option<RevealAnimator>,
    pub parallax: Option<ParallaxEngine>,
    pub tilt: Option<TiltEffect>,
    pub nav: Option<NavBinding>,
    pub collage: Option<Rc<CollageOverlay>>,
}

impl Page {
    pub fn mount(document: &Document, config: &FxConfig, store: SharedStore) -> Self {
        stamp_year(document);
        let theme = ThemeToggle::install(document, store, &config.theme_key);
        let reveal = RevealAnimator::install(document, config);
        let parallax = ParallaxEngine::install(document, config);
        let tilt = TiltEffect::install(document, config);
        let nav = NavBinding::install(document, config);
        let collage = CollageOverlay::install(document, config);
        Self {
            theme,
            reveal,
            parallax,
            tilt,
            nav,
            collage,
        }
    }
}

impl Drop for Page {
    fn drop(&mut self) {
        if let Some(collage) = self.collage.as_ref() {
            collage.shutdown();
        }
    }
}

fn stamp_year(document: &Document) {
    let Some(el) = document.get_element_by_id(YEAR_ID) else {
        return;
    };
    let year = Date::new_0().get_full_year();
    el.set_text_content(Some(&year.to_string()));
}

/// Wires the page once; later calls are ignored.
pub fn run() {
    if STARTED.with(|started| started.replace(true)) {
        return;
    }
    let Some(document) = dom::document() else {
        gloo::console::warn!("vitrina: no document, nothing to do");
        return;
    };
    let config = settings::load_config(&document);
    if nav::normalize_reload(nav::navigation_type().as_deref()) {
        gloo::console::log!("vitrina: reload on fragment, scrolled to top");
    }
    let store: SharedStore = Rc::new(LocalStore::open());
    let page = Page::mount(&document, &config, store);
    gloo::console::log!("vitrina: ready");
    PAGE.with(|slot| {
        *slot.borrow_mut() = Some(page);
    });
}
