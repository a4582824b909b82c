//! Browser bindings: layout sampling, style writes and pointer listeners.
//!
//! Everything here is a thin adapter between `web_sys` and the session;
//! the behavior lives in `simulation`.

mod listeners;
mod presenter;
mod sampler;

pub use listeners::install_pointer_listeners;
pub use presenter::{transform_css, StylePresenter};
pub use sampler::{find_container, pointer_position, sample_container, sample_objects};
