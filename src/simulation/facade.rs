use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use gloo::render::{request_animation_frame, AnimationFrame};
use gloo::timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use crate::dom::{self, StylePresenter};
use crate::domain::{SandboxError, SimConfig};
use crate::rigid_body_system::RigidBodySystem;

use super::SandboxCore;

type DomCore = SandboxCore<RigidBodySystem, HtmlElement>;
type FrameSlot = Rc<RefCell<Option<AnimationFrame>>>;

struct Running {
    core: Rc<RefCell<DomCore>>,
    // Dropping these unbinds the listeners and cancels the frame loops
    _listeners: Vec<EventListener>,
    _physics_frame: FrameSlot,
    _render_frame: FrameSlot,
}

enum SandboxState {
    /// Waiting for the startup delay
    Pending(Timeout),
    Running(Running),
    /// Container missing or teardown called
    Inactive,
}

/// Handle to one physics sandbox on the page
#[wasm_bindgen]
pub struct Sandbox {
    state: Rc<RefCell<SandboxState>>,
}

#[wasm_bindgen]
impl Sandbox {
    /// Start a sandbox on the first element matching `container_selector`
    /// once `startupDelayMs` has passed. `config_json` overrides defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(container_selector: String, config_json: Option<String>) -> Result<Sandbox, JsValue> {
        let mut config = match config_json {
            Some(json) => SimConfig::from_json(&json)?,
            None => SimConfig::default(),
        };
        if config.seed.is_none() {
            config.seed = Some((js_sys::Math::random() * f64::from(u32::MAX)) as u32);
        }

        let state = Rc::new(RefCell::new(SandboxState::Inactive));
        let delay = config.startup_delay_ms;
        let slot = Rc::clone(&state);
        let timeout = Timeout::new(delay, move || {
            let next = match launch(&container_selector, config) {
                Ok(Some(running)) => SandboxState::Running(running),
                Ok(None) => SandboxState::Inactive,
                Err(err) => {
                    console_warn!("Physics sandbox failed to start: {}", err);
                    SandboxState::Inactive
                }
            };
            *slot.borrow_mut() = next;
        });
        *state.borrow_mut() = SandboxState::Pending(timeout);

        Ok(Sandbox { state })
    }

    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool {
        matches!(&*self.state.borrow(), SandboxState::Running(r) if r.core.borrow().is_running())
    }

    #[wasm_bindgen(getter)]
    pub fn object_count(&self) -> usize {
        self.with_core(|core| core.objects().len()).unwrap_or(0)
    }

    #[wasm_bindgen(getter)]
    pub fn top_wall_added(&self) -> bool {
        self.with_core(|core| core.top_wall().is_some()).unwrap_or(false)
    }

    #[wasm_bindgen(getter)]
    pub fn dragging(&self) -> bool {
        self.with_core(|core| core.drag_state() != super::DragState::Idle)
            .unwrap_or(false)
    }

    /// Stop both loops, unbind listeners and cancel the pending top wall.
    pub fn teardown(&self) {
        let previous = std::mem::replace(&mut *self.state.borrow_mut(), SandboxState::Inactive);
        if let SandboxState::Running(running) = previous {
            running.core.borrow_mut().teardown();
        }
    }
}

impl Drop for Sandbox {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl Sandbox {
    fn with_core<T>(&self, f: impl FnOnce(&DomCore) -> T) -> Option<T> {
        match &*self.state.borrow() {
            SandboxState::Running(running) => Some(f(&running.core.borrow())),
            _ => None,
        }
    }
}

/// Sample the page and start the session. `Ok(None)` when the container is
/// missing: that is reported, not thrown.
fn launch(selector: &str, config: SimConfig) -> Result<Option<Running>, SandboxError> {
    let window = web_sys::window().ok_or(SandboxError::NoWindow)?;
    let document = window.document().ok_or(SandboxError::NoWindow)?;

    let Some(container) = dom::find_container(&document, selector)? else {
        console_warn!("{}", SandboxError::MissingContainer(selector.to_string()));
        return Ok(None);
    };
    console_log!("Starting physics simulation...");

    let geometry = dom::sample_container(&container);
    let objects = dom::sample_objects(&container, &config.object_selector)?;
    let now = window.performance().map(|p| p.now()).unwrap_or(0.0);

    let core = Rc::new(RefCell::new(DomCore::with_builtin_engine(config, geometry, objects, now)?));
    let listeners = dom::install_pointer_listeners(&container, &document, &core);

    let physics_frame: FrameSlot = Rc::new(RefCell::new(None));
    let render_frame: FrameSlot = Rc::new(RefCell::new(None));
    schedule_physics(Rc::clone(&core), Rc::clone(&physics_frame));
    schedule_render(Rc::clone(&core), Rc::clone(&render_frame));

    Ok(Some(Running {
        core,
        _listeners: listeners,
        _physics_frame: physics_frame,
        _render_frame: render_frame,
    }))
}

/// Engine driver loop, independent of the render loop
fn schedule_physics(core: Rc<RefCell<DomCore>>, slot: FrameSlot) {
    let next_slot = Rc::clone(&slot);
    let handle = request_animation_frame(move |timestamp| {
        let running = {
            let mut core = core.borrow_mut();
            core.tick(timestamp);
            core.is_running()
        };
        if running {
            schedule_physics(core, next_slot);
        } else {
            next_slot.borrow_mut().take();
        }
    });
    *slot.borrow_mut() = Some(handle);
}

/// Render loop: reschedules itself every frame while the session runs
fn schedule_render(core: Rc<RefCell<DomCore>>, slot: FrameSlot) {
    let next_slot = Rc::clone(&slot);
    let handle = request_animation_frame(move |_timestamp| {
        let running = {
            let core = core.borrow();
            core.sync(&mut StylePresenter);
            core.is_running()
        };
        if running {
            schedule_render(core, next_slot);
        } else {
            next_slot.borrow_mut().take();
        }
    });
    *slot.borrow_mut() = Some(handle);
}
