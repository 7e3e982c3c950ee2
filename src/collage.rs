use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo::events::EventListener;
use gloo::render::{request_animation_frame, AnimationFrame};
use vitrina_core::collage::{
    tile_kind, CARD_IMAGE_SELECTOR, PLACEHOLDER_SVG, SHOW_CLASS, TILE_CLASS,
};
use vitrina_core::{
    collage_sources, tile_specs, Collage, FxConfig, Stagger, TileFallback, TileSpec,
};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement, HtmlImageElement, KeyboardEvent};

use crate::dom;

pub const MODAL_ID: &str = "collageModal";
pub const GRID_ID: &str = "collageGrid";
pub const CLOSE_ID: &str = "collageClose";
pub const BACKDROP_ID: &str = "collageBackdrop";

/// Lightbox of a card image and its numbered siblings.
pub struct CollageOverlay {
    document: Document,
    modal: HtmlElement,
    grid: HtmlElement,
    close_button: Option<HtmlElement>,
    placeholder: String,
    variants: u32,
    stagger: Stagger,
    state: RefCell<Collage<HtmlElement>>,
    tile_listeners: RefCell<Vec<EventListener>>,
    reveal_frame: RefCell<Option<AnimationFrame>>,
    listeners: RefCell<Vec<EventListener>>,
}

impl CollageOverlay {
    pub fn install(document: &Document, config: &FxConfig) -> Option<Rc<Self>> {
        let Some(modal) = dom::html_by_id(document, MODAL_ID) else {
            gloo::console::log!("collage: no modal on this page");
            return None;
        };
        let Some(grid) = dom::html_by_id(document, GRID_ID) else {
            gloo::console::warn!("collage: modal has no grid, collage disabled");
            return None;
        };
        let overlay = Rc::new(Self {
            document: document.clone(),
            modal,
            grid,
            close_button: dom::html_by_id(document, CLOSE_ID),
            placeholder: placeholder_data_uri(),
            variants: config.collage_variants,
            stagger: Stagger::from_config(config),
            state: RefCell::new(Collage::new()),
            tile_listeners: RefCell::new(Vec::new()),
            reveal_frame: RefCell::new(None),
            listeners: RefCell::new(Vec::new()),
        });
        overlay.install_listeners();
        Some(overlay)
    }

    fn install_listeners(self: &Rc<Self>) {
        let mut listeners = Vec::new();

        let view = Rc::clone(self);
        listeners.push(EventListener::new(&self.document, "click", move |event: &Event| {
            let target = event
                .target()
                .and_then(|target| target.dyn_into::<Element>().ok());
            let Some(target) = target else {
                return;
            };
            let Ok(Some(img)) = target.closest(CARD_IMAGE_SELECTOR) else {
                return;
            };
            let Some(src) = img.get_attribute("src") else {
                return;
            };
            view.open(&src);
        }));

        let view = Rc::clone(self);
        listeners.push(EventListener::new(&self.document, "keydown", move |event: &Event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            if event.key() == "Escape" {
                view.close();
            }
        }));

        if let Some(button) = self.close_button.as_ref() {
            let view = Rc::clone(self);
            listeners.push(EventListener::new(button, "click", move |_| view.close()));
        }
        if let Some(backdrop) = dom::html_by_id(&self.document, BACKDROP_ID) {
            let view = Rc::clone(self);
            listeners.push(EventListener::new(&backdrop, "click", move |_| view.close()));
        }

        *self.listeners.borrow_mut() = listeners;
    }

    pub fn is_open(&self) -> bool {
        self.state.borrow().is_open()
    }

    pub fn tile_count(&self) -> u32 {
        self.grid.child_element_count()
    }

    pub fn open(&self, src: &str) {
        let focused = self
            .document
            .active_element()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());
        let specs = {
            let mut state = self.state.borrow_mut();
            let sources = state.open(collage_sources(src, self.variants), focused);
            tile_specs(sources, self.stagger)
        };

        self.clear_tiles();
        let mut tiles = Vec::with_capacity(specs.len());
        for spec in &specs {
            if let Some(tile) = self.add_tile(spec) {
                tiles.push(tile);
            }
        }
        if self.grid.child_element_count() == 0 {
            let spec = TileSpec {
                class_name: format!("{TILE_CLASS} {}", tile_kind(0)),
                src: self.placeholder.clone(),
                delay: self.stagger.delay(0),
            };
            if let Some(tile) = self.add_tile(&spec) {
                tiles.push(tile);
            }
        }
        self.schedule_tile_failsafe(tiles);

        dom::toggle_class(&self.modal, SHOW_CLASS, true);
        let _ = self.modal.set_attribute("aria-hidden", "false");
        if let Some(body) = self.document.body() {
            dom::set_style(&body, "overflow", "hidden");
        }
        if let Some(button) = self.close_button.as_ref() {
            let _ = button.focus();
        }
    }

    pub fn close(&self) {
        let Some(closed) = self.state.borrow_mut().close() else {
            return;
        };
        dom::toggle_class(&self.modal, SHOW_CLASS, false);
        let _ = self.modal.set_attribute("aria-hidden", "true");
        if let Some(body) = self.document.body() {
            dom::set_style(&body, "overflow", "");
        }
        self.clear_tiles();
        if let Some(el) = closed.restore_focus {
            if el.is_connected() {
                let _ = el.focus();
            }
        }
    }

    /// Closes the overlay and detaches every listener. The listeners hold
    /// the overlay alive, so this is what releases it.
    pub fn shutdown(&self) {
        self.close();
        self.listeners.borrow_mut().clear();
    }

    fn clear_tiles(&self) {
        self.reveal_frame.borrow_mut().take();
        self.tile_listeners.borrow_mut().clear();
        self.grid.set_inner_html("");
    }

    fn add_tile(&self, spec: &TileSpec) -> Option<HtmlElement> {
        let tile = self
            .document
            .create_element("div")
            .ok()?
            .dyn_into::<HtmlElement>()
            .ok()?;
        tile.set_class_name(&spec.class_name);
        dom::set_style(&tile, "--d", &spec.delay);

        let img = self
            .document
            .create_element("img")
            .ok()?
            .dyn_into::<HtmlImageElement>()
            .ok()?;
        img.set_alt("");
        let fallback = Cell::new(TileFallback::new());
        let placeholder = self.placeholder.clone();
        let img_for_error = img.clone();
        let listener = EventListener::new(&img, "error", move |_| {
            let mut state = fallback.get();
            let next = state.on_error(&placeholder).map(str::to_string);
            fallback.set(state);
            if let Some(src) = next {
                img_for_error.set_src(&src);
            }
        });
        self.tile_listeners.borrow_mut().push(listener);
        img.set_src(&spec.src);

        tile.append_child(&img).ok()?;
        self.grid.append_child(&tile).ok()?;
        Some(tile)
    }

    /// Tiles normally fade in through CSS; a frame later they are forced
    /// visible so reduced-motion setups still show them.
    fn schedule_tile_failsafe(&self, tiles: Vec<HtmlElement>) {
        let handle = request_animation_frame(move |_| {
            for tile in &tiles {
                dom::set_style(tile, "opacity", "1");
            }
        });
        *self.reveal_frame.borrow_mut() = Some(handle);
    }
}

fn placeholder_data_uri() -> String {
    let encoded: String = js_sys::encode_uri_component(PLACEHOLDER_SVG).into();
    format!("data:image/svg+xml;utf8,{encoded}")
}
