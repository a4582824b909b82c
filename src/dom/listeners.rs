use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, HtmlElement, MouseEvent};

use crate::engine::PhysicsEngine;
use crate::simulation::SandboxCore;

use super::sampler::pointer_position;

/// Wire pointer input to the session.
///
/// Press, move, release and leave are observed on the container; a release
/// anywhere in the document also ends the drag. The context menu is
/// suppressed on the container. Dropping the returned listeners unbinds them.
pub fn install_pointer_listeners<E: PhysicsEngine + 'static>(
    container: &HtmlElement,
    document: &Document,
    core: &Rc<RefCell<SandboxCore<E, HtmlElement>>>,
) -> Vec<EventListener> {
    let mut listeners = Vec::with_capacity(6);

    {
        let core = Rc::clone(core);
        let target = container.clone();
        listeners.push(EventListener::new(container, "mousedown", move |event: &Event| {
            let Some(event) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let at = pointer_position(&target, event);
            core.borrow_mut().pointer_down(at);
        }));
    }
    {
        let core = Rc::clone(core);
        let target = container.clone();
        listeners.push(EventListener::new(container, "mousemove", move |event: &Event| {
            let Some(event) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let at = pointer_position(&target, event);
            core.borrow_mut().pointer_move(at);
        }));
    }
    {
        let core = Rc::clone(core);
        listeners.push(EventListener::new(container, "mouseup", move |_event: &Event| {
            core.borrow_mut().pointer_up();
        }));
    }
    {
        let core = Rc::clone(core);
        listeners.push(EventListener::new(container, "mouseleave", move |_event: &Event| {
            core.borrow_mut().pointer_leave();
        }));
    }
    {
        let core = Rc::clone(core);
        listeners.push(EventListener::new(document, "mouseup", move |_event: &Event| {
            core.borrow_mut().pointer_up();
        }));
    }
    listeners.push(EventListener::new_with_options(
        container,
        "contextmenu",
        EventListenerOptions::enable_prevent_default(),
        |event: &Event| event.prevent_default(),
    ));

    listeners
}
