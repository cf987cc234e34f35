//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;
mod receipt;

use crate::app::App;
use crate::state::View;
use components::render_error_dialog;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let (header_area, main_area) = layout::create_layout(frame.area());

    layout::draw_header(frame, header_area);

    match &app.state.current_view {
        View::Form => forms::draw_request_form(frame, main_area, app),
        View::Receipt => receipt::draw(frame, main_area, app),
    }

    layout::draw_status_bar(frame, app);

    // Error dialog overlays everything
    if let Some(message) = app.state.current_error() {
        let pending = app.state.error_queue.len().saturating_sub(1);
        render_error_dialog(frame, message, pending);
    }
}
