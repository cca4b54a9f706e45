//! TUI rendering

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Gauge, List, ListItem, Paragraph, Wrap};
use ratatui::Frame;

use libris_core::{Book, LibraryStats};

use super::app::{App, Mode, Screen, SearchResults, MENU_ITEMS};
use super::forms::{field_label, BookField, BookForm, RemoveForm, SearchForm, SearchFormField};

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Width of the menu pane.
const MENU_WIDTH: u16 = 24;

pub(crate) fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let footer_height = FOOTER_HEIGHT.min(area.height);

    let (content_area, footer_area) = if area.height > footer_height {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(footer_height)])
            .split(area);
        (chunks[0], chunks[1])
    } else {
        (area, area)
    };

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(MENU_WIDTH), Constraint::Min(0)])
        .split(content_area);

    draw_menu(frame, panes[0], app);

    match &app.screen {
        Screen::Books => draw_books(frame, panes[1], app.store.books()),
        Screen::SearchResults(results) => draw_search_results(frame, panes[1], results),
        Screen::Stats => draw_stats(frame, panes[1], &app.store.stats()),
    }

    if area.height >= footer_height {
        draw_footer(frame, footer_area, app);
    }

    match &app.mode {
        Mode::AddingBook(form) => draw_book_form(frame, area, form),
        Mode::RemovingBook(form) => draw_remove_form(frame, area, form),
        Mode::Searching(form) => draw_search_form(frame, area, form),
        Mode::Normal => {}
    }
}

fn draw_menu(frame: &mut Frame, area: Rect, app: &App) {
    let items: Vec<ListItem> = MENU_ITEMS
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let style = if i == app.menu_index {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(Span::styled(*label, style))
        })
        .collect();

    let list = List::new(items).block(Block::default().title("Menu").borders(Borders::ALL));
    frame.render_widget(list, area);
}

fn draw_books(frame: &mut Frame, area: Rect, books: &[Book]) {
    let block = Block::default().title("Your Library").borders(Borders::ALL);

    if books.is_empty() {
        let message = Paragraph::new("Your library is empty!")
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(message, area);
        return;
    }

    let lines: Vec<Line> = books
        .iter()
        .enumerate()
        .map(|(i, book)| Line::from(format!("{}. {}", i + 1, book)))
        .collect();

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn draw_search_results(frame: &mut Frame, area: Rect, results: &SearchResults) {
    let title = format!(
        "Search Results - {} contains '{}'",
        field_label(results.field),
        results.term
    );
    let block = Block::default().title(title).borders(Borders::ALL);

    if results.books.is_empty() {
        let message = Paragraph::new("No matches found.")
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(message, area);
        return;
    }

    let mut lines = vec![Line::from("Matching Books:"), Line::from("")];
    lines.extend(
        results
            .books
            .iter()
            .enumerate()
            .map(|(i, book)| Line::from(format!("{}. {}", i + 1, book))),
    );

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn draw_stats(frame: &mut Frame, area: Rect, stats: &LibraryStats) {
    let block = Block::default()
        .title("Library Statistics")
        .borders(Borders::ALL);

    if stats.total == 0 {
        let message = Paragraph::new("Library is empty. No stats to show!")
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(message, area);
        return;
    }

    frame.render_widget(block.clone(), area);
    let inner = block.inner(area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(inner);

    let lines = vec![
        Line::from(format!("Total books: {}", stats.total)),
        Line::from(format!("Percentage read: {:.1}%", stats.percent_read)),
    ];
    frame.render_widget(Paragraph::new(lines), chunks[0]);

    let gauge = Gauge::default()
        .block(Block::default().title("Progress").borders(Borders::ALL))
        .gauge_style(Style::default().fg(Color::Green))
        .percent(stats.progress() as u16);
    frame.render_widget(gauge, chunks[1]);
}

fn draw_footer(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default().borders(Borders::TOP);
    frame.render_widget(block.clone(), area);
    let inner = block.inner(area);

    let status_line = if let Some(status) = &app.status {
        Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
    } else {
        Line::from("")
    };

    let instructions = footer_instructions(app);

    let paragraph = Paragraph::new(vec![status_line, instructions]).wrap(Wrap { trim: true });
    frame.render_widget(paragraph, inner);
}

fn footer_instructions(app: &App) -> Line<'static> {
    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    match &app.mode {
        Mode::Normal => Line::from(vec![
            Span::styled("[↑↓]", key_style),
            Span::raw(" Navigate   "),
            Span::styled("[Enter]", key_style),
            Span::raw(" Select   "),
            Span::styled("[q]", key_style),
            Span::raw(" Quit"),
        ]),
        Mode::AddingBook(_) => Line::from(vec![
            Span::styled("[Tab]", key_style),
            Span::raw(" Next Field   "),
            Span::styled("[Space]", key_style),
            Span::raw(" Toggle Read   "),
            Span::styled("[Enter]", key_style),
            Span::raw(" Save   "),
            Span::styled("[Esc]", key_style),
            Span::raw(" Cancel"),
        ]),
        Mode::RemovingBook(_) => Line::from(vec![
            Span::styled("[Enter]", key_style),
            Span::raw(" Remove   "),
            Span::styled("[Esc]", key_style),
            Span::raw(" Cancel"),
        ]),
        Mode::Searching(_) => Line::from(vec![
            Span::styled("[Tab]", key_style),
            Span::raw(" Switch Field   "),
            Span::styled("[Space]", key_style),
            Span::raw(" Toggle Search By   "),
            Span::styled("[Enter]", key_style),
            Span::raw(" Search   "),
            Span::styled("[Esc]", key_style),
            Span::raw(" Cancel"),
        ]),
    }
}

fn draw_book_form(frame: &mut Frame, area: Rect, form: &BookForm) {
    let popup_area = centered_rect(60, 50, area);
    frame.render_widget(Clear, popup_area);

    let block = Block::default().title("Add a Book").borders(Borders::ALL);
    frame.render_widget(block.clone(), popup_area);
    let inner = block.inner(popup_area);

    let mut lines = vec![
        form.build_line("Title", BookField::Title),
        form.build_line("Author", BookField::Author),
        form.build_line("Year", BookField::Year),
        form.build_line("Genre", BookField::Genre),
        form.build_line("Read", BookField::Read),
        Line::from(""),
    ];

    push_error_or_hint(
        &mut lines,
        form.error.as_deref(),
        "Enter to save • Tab to switch • Esc to cancel",
    );

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
    frame.render_widget(paragraph, inner);

    let (prefix, row) = match form.active {
        BookField::Title => ("Title: ", 0),
        BookField::Author => ("Author: ", 1),
        BookField::Year => ("Year: ", 2),
        BookField::Genre => ("Genre: ", 3),
        BookField::Read => ("Read: ", 4),
    };
    let cursor_x = inner.x + prefix.len() as u16 + form.value_len(form.active) as u16;
    frame.set_cursor_position((cursor_x, inner.y + row));
}

fn draw_remove_form(frame: &mut Frame, area: Rect, form: &RemoveForm) {
    let popup_area = centered_rect(60, 30, area);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title("Remove a Book")
        .borders(Borders::ALL);
    frame.render_widget(block.clone(), popup_area);
    let inner = block.inner(popup_area);

    let mut lines = vec![form.build_line(), Line::from("")];
    push_error_or_hint(
        &mut lines,
        form.error.as_deref(),
        "Enter to remove • Esc to cancel",
    );

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
    frame.render_widget(paragraph, inner);

    let cursor_x = inner.x + "Title: ".len() as u16 + form.value_len() as u16;
    frame.set_cursor_position((cursor_x, inner.y));
}

fn draw_search_form(frame: &mut Frame, area: Rect, form: &SearchForm) {
    let popup_area = centered_rect(60, 30, area);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title("Search for a Book")
        .borders(Borders::ALL);
    frame.render_widget(block.clone(), popup_area);
    let inner = block.inner(popup_area);

    let mut lines = vec![form.build_by_line(), form.build_term_line(), Line::from("")];
    push_error_or_hint(
        &mut lines,
        form.error.as_deref(),
        "Enter to search • Tab to switch • Esc to cancel",
    );

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
    frame.render_widget(paragraph, inner);

    let (cursor_x, cursor_y) = match form.active {
        SearchFormField::By => {
            let prefix = "Search by: ".len() as u16;
            (
                inner.x + prefix + field_label(form.field).len() as u16,
                inner.y,
            )
        }
        SearchFormField::Term => {
            let prefix = field_label(form.field).len() as u16 + 2;
            (inner.x + prefix + form.value_len() as u16, inner.y + 1)
        }
    };
    frame.set_cursor_position((cursor_x, cursor_y));
}

fn push_error_or_hint(lines: &mut Vec<Line<'static>>, error: Option<&str>, hint: &'static str) {
    if let Some(error) = error {
        lines.push(Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(Color::Red),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            hint,
            Style::default().fg(Color::Gray),
        )));
    }
}

/// Produce a rectangle centered within `area` that spans the requested percent
/// of the width and height. Used for modal dialogs.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(horizontal[1]);

    vertical[1]
}
