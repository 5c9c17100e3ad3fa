//! Frame render: launcher when closed; panel with header, chat, input,
//! status and the optional confirm modal when open.

use ratatui::style::Style;
use ratatui::widgets::{Block, BorderType, Borders, Clear};
use ratatui::Frame;

use crate::app::App;
use crate::transport::ChatTransport;
use crate::ui::layout;
use crate::ui::theme::{colors, SPINNER};
use crate::ui::widgets::{
    render_chat, render_confirm, render_header, render_input, render_launcher, render_status,
};

pub fn render<T: ChatTransport + 'static>(f: &mut Frame, app: &App<T>) {
    let area = f.area();
    f.render_widget(Block::default().style(Style::default().bg(colors::CANVAS)), area);

    if !app.panel.is_open() {
        app.panel_area.set(None);
        render_launcher(f, area);
        return;
    }

    let spinner_char = SPINNER[app.tick % SPINNER.len()];
    let panel = layout::panel(area);
    app.panel_area.set(Some(panel));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(colors::BORDER))
        .style(Style::default().bg(colors::BG));
    let inner = block.inner(panel);
    f.render_widget(Clear, panel);
    f.render_widget(block, panel);

    let applied = {
        let view = app.session.view();
        let regions = layout::compute(inner, view.input.buffer.split('\n').count());
        render_header(f, regions.header, &app.server_label);
        let applied = render_chat(f, &view, regions.chat, spinner_char);
        render_input(f, &view.input, regions.input);
        render_status(f, regions.status, app.session.is_processing(), spinner_char);
        applied
    };
    // Keep scrolling responsive after overshooting the top.
    let mut view = app.session.view_mut();
    if view.messages.scroll.from_bottom > applied {
        view.messages.scroll.from_bottom = applied;
    }
    drop(view);

    if let Some(confirm) = app.confirm {
        render_confirm(f, panel, confirm.prompt());
    }
}
