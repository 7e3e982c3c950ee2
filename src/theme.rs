use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use vitrina_core::theme::LIGHT_CLASS;
use vitrina_core::{PreferenceStore, Theme, ThemeController};
use web_sys::{Document, HtmlElement};

use crate::dom;

pub const TOGGLE_ID: &str = "themeToggle";

pub type SharedStore = Rc<dyn PreferenceStore>;

/// Theme state bound to `<body>` and the optional toggle control.
pub struct ThemeToggle {
    controller: Rc<RefCell<ThemeController<SharedStore>>>,
    body: Option<HtmlElement>,
    button: Option<HtmlElement>,
    _listener: Option<EventListener>,
}

impl ThemeToggle {
    pub fn install(document: &Document, store: SharedStore, key: &str) -> Self {
        let controller = Rc::new(RefCell::new(ThemeController::load(store, key)));
        let body = document.body();
        let button = dom::html_by_id(document, TOGGLE_ID);
        let initial = controller.borrow().current();
        apply_theme(body.as_ref(), button.as_ref(), initial);

        let listener = button.as_ref().map(|button| {
            let controller = controller.clone();
            let body = body.clone();
            let button_for_click = button.clone();
            EventListener::new(button, "click", move |_| {
                let (next, saved) = controller.borrow_mut().toggle();
                if let Err(err) = saved {
                    gloo::console::warn!("theme preference not saved", err.to_string());
                }
                apply_theme(body.as_ref(), Some(&button_for_click), next);
            })
        });
        if button.is_none() {
            gloo::console::log!("theme toggle missing, theme is read-only");
        }

        Self {
            controller,
            body,
            button,
            _listener: listener,
        }
    }

    pub fn current(&self) -> Theme {
        self.controller.borrow().current()
    }

    /// Re-applies the current theme to the document.
    pub fn reapply(&self) {
        apply_theme(self.body.as_ref(), self.button.as_ref(), self.current());
    }
}

pub(crate) fn apply_theme(body: Option<&HtmlElement>, button: Option<&HtmlElement>, theme: Theme) {
    if let Some(body) = body {
        dom::toggle_class(body, LIGHT_CLASS, theme.is_light());
    }
    if let Some(button) = button {
        let _ = button.set_attribute("aria-label", theme.toggle_label());
    }
}
