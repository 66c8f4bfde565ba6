//! Event handlers, one module per area. Each handler parses its query,
//! updates the page state and returns the resulting patches.

pub mod clock;
pub mod flow;
pub mod interact;
pub mod nav;
pub mod page;
pub mod showcase;
pub mod util;
