use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use gloo::render::{request_animation_frame, AnimationFrame};
use vitrina_core::tilt::{NEUTRAL_TRANSFORM, TILT_CLASS};
use vitrina_core::{FxConfig, Rect, Tilt};
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, HtmlElement, MouseEvent};

use crate::dom;

/// Pointer-driven 3D tilt on `.tilt` cards. Only the latest pointer position
/// matters: a new move drops the frame scheduled by the previous one.
pub struct TiltEffect {
    _listeners: Vec<EventListener>,
}

impl TiltEffect {
    pub fn install(document: &Document, config: &FxConfig) -> Option<Self> {
        let cards = dom::query_html_all(document, &format!(".{TILT_CLASS}"));
        if cards.is_empty() {
            return None;
        }
        let tilt = Tilt::from_config(config);
        let mut listeners = Vec::with_capacity(cards.len() * 2);
        for card in cards {
            let frame: Rc<RefCell<Option<AnimationFrame>>> = Rc::new(RefCell::new(None));

            let card_for_move = card.clone();
            let frame_for_move = frame.clone();
            listeners.push(EventListener::new(&card, "mousemove", move |event: &Event| {
                let Some(event) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                let rect = card_for_move.get_bounding_client_rect();
                let rect = Rect::new(rect.left(), rect.top(), rect.width(), rect.height());
                let (x, y) = (event.client_x() as f64, event.client_y() as f64);
                let rotation = tilt.rotation(rect, x, y);
                let transform = tilt.transform(rotation);
                let card = card_for_move.clone();
                let slot = frame_for_move.clone();
                // replacing the handle cancels the frame it held
                *frame_for_move.borrow_mut() = Some(request_animation_frame(move |_| {
                    slot.borrow_mut().take();
                    dom::set_style(&card, "transform", &transform);
                }));
            }));

            let card_for_leave = card.clone();
            listeners.push(EventListener::new(&card, "mouseleave", move |_| {
                frame.borrow_mut().take();
                reset(&card_for_leave);
            }));
        }
        Some(Self {
            _listeners: listeners,
        })
    }
}

fn reset(card: &HtmlElement) {
    dom::set_style(card, "transform", NEUTRAL_TRANSFORM);
}
