//! Form rendering module
//!
//! - `field_renderer`: per-widget field boxes with inline errors
//! - `request_form`: section layout, scrolling and the action panel

mod field_renderer;
mod request_form;

pub use request_form::draw_request_form;
