#[macro_use]
mod console;
mod numeric;

#[doc(hidden)]
pub use console::{Level, __log};
pub use numeric::{clamp, is_effectively_infinite, INFINITE_INERTIA};
