use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use gloo::render::{request_animation_frame, AnimationFrame};
use vitrina_core::parallax::PARALLAX_SPEED_ATTR;
use vitrina_core::{FrameGate, FxConfig, Parallax};
use web_sys::{Document, HtmlElement};

use crate::dom;

struct ParallaxState {
    gate: FrameGate,
    frame: Option<AnimationFrame>,
}

/// Scroll-linked vertical drift for `[data-parallax-speed]` elements. Scroll
/// bursts collapse into one update per animation frame.
pub struct ParallaxEngine {
    elements: Rc<Vec<HtmlElement>>,
    parallax: Parallax,
    state: Rc<RefCell<ParallaxState>>,
    _listener: EventListener,
}

impl ParallaxEngine {
    pub fn install(document: &Document, config: &FxConfig) -> Option<Self> {
        let elements = dom::query_html_all(document, &format!("[{PARALLAX_SPEED_ATTR}]"));
        if elements.is_empty() {
            return None;
        }
        let window = dom::window()?;
        let elements = Rc::new(elements);
        let parallax = Parallax::from_config(config);
        let state = Rc::new(RefCell::new(ParallaxState {
            gate: FrameGate::new(),
            frame: None,
        }));

        let listener = {
            let elements = elements.clone();
            let state = state.clone();
            // gloo listeners are passive unless asked otherwise
            EventListener::new(&window, "scroll", move |_| {
                schedule(&state, &elements, parallax)
            })
        };

        Some(Self {
            elements,
            parallax,
            state,
            _listener: listener,
        })
    }

    /// Applies the offsets for the current scroll position right away.
    pub fn update_now(&self) {
        apply(&self.elements, self.parallax, dom::scroll_y());
    }

    pub fn frame_pending(&self) -> bool {
        self.state.borrow().gate.is_pending()
    }
}

fn schedule(
    state: &Rc<RefCell<ParallaxState>>,
    elements: &Rc<Vec<HtmlElement>>,
    parallax: Parallax,
) {
    if !state.borrow_mut().gate.request() {
        return;
    }
    let state_for_frame = state.clone();
    let elements = elements.clone();
    let handle = request_animation_frame(move |_| {
        {
            let mut state = state_for_frame.borrow_mut();
            state.frame.take();
            state.gate.complete();
        }
        apply(&elements, parallax, dom::scroll_y());
    });
    state.borrow_mut().frame = Some(handle);
}

fn apply(elements: &[HtmlElement], parallax: Parallax, scroll_y: f64) {
    for el in elements {
        let speed = parallax.speed(el.get_attribute(PARALLAX_SPEED_ATTR).as_deref());
        dom::set_style(el, "transform", &parallax.transform(scroll_y, speed));
    }
}
