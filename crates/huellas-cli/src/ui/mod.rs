//! TUI rendering: orchestrates all panes.

pub mod catalog;
pub mod dashboard;
pub mod form;
pub mod pet_table;
pub mod user_table;

use chrono::Local;
use huellas_core::{backend::AdoptionBackend, notify::NotificationKind};
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Paragraph},
};
use strum::IntoEnumIterator;

use crate::app::{App, Dialog, Screen};

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw<B: AdoptionBackend + 'static>(f: &mut Frame, app: &App<B>) {
  let area = f.area();

  // Vertical stack: header, body, status bar.
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(area);

  draw_header(f, rows[0], app);
  match app.screen {
    Screen::Catalog => catalog::draw(f, rows[1], app),
    Screen::Dashboard => dashboard::draw(f, rows[1], app),
    Screen::Pets => pet_table::draw(f, rows[1], app),
    Screen::Users => user_table::draw(f, rows[1], app),
  }
  draw_status(f, rows[2], app);

  match &app.dialog {
    Some(Dialog::Pet(d)) => form::draw_pet(f, area, d),
    Some(Dialog::User(d)) => form::draw_user(f, area, d),
    Some(Dialog::Delete(target)) => form::draw_delete(f, area, target),
    None => {}
  }
}

/// A `width` × `height` rectangle centred in `area`, clipped to it.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
  let width = width.min(area.width);
  let height = height.min(area.height);
  Rect {
    x: area.x + (area.width - width) / 2,
    y: area.y + (area.height - height) / 2,
    width,
    height,
  }
}

/// Render `block` into `area` and, when a search is active or set, a
/// `/query` line along its bottom edge. Returns the space left for content.
pub fn search_bar<B: AdoptionBackend + 'static>(
  f: &mut Frame,
  block: Block,
  area: Rect,
  app: &App<B>,
) -> Rect {
  let mut inner = block.inner(area);
  f.render_widget(block, area);

  if (app.search_active || !app.search.is_empty()) && inner.height > 2 {
    let bar = Rect {
      x:      inner.x,
      y:      inner.y + inner.height - 1,
      width:  inner.width,
      height: 1,
    };
    inner.height -= 1;

    let text = if app.search_active {
      format!("/{}_", app.search)
    } else {
      format!("/{}", app.search)
    };
    f.render_widget(
      Paragraph::new(text).style(Style::default().fg(Color::Yellow)),
      bar,
    );
  }
  inner
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header<B: AdoptionBackend + 'static>(f: &mut Frame, area: Rect, app: &App<B>) {
  let date = Local::now().format("%Y-%m-%d").to_string();

  let mut spans = vec![Span::styled(
    " huellas ",
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  )];
  for (i, screen) in Screen::iter().enumerate() {
    let style = if screen == app.screen {
      Style::default()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
    } else {
      Style::default().fg(Color::Gray)
    };
    spans.push(Span::raw(" "));
    spans.push(Span::styled(format!("{} {screen}", i + 1), style));
  }
  let right = Span::styled(
    format!("{date} "),
    Style::default().fg(Color::DarkGray),
  );

  // Pad the middle so the date sits on the right edge.
  let left_width: usize = spans.iter().map(|s| s.content.chars().count()).sum();
  let pad = (area.width as usize)
    .saturating_sub(left_width)
    .saturating_sub(right.content.chars().count());
  spans.push(Span::raw(" ".repeat(pad)));
  spans.push(right);

  let block = Block::default().style(Style::default().bg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(Paragraph::new(Line::from(spans)), inner);
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status<B: AdoptionBackend + 'static>(f: &mut Frame, area: Rect, app: &App<B>) {
  let (mode_label, hints) = match (&app.dialog, app.screen) {
    (Some(Dialog::Delete(_)), _) => ("CONFIRM", "y delete  n/Esc cancel"),
    (Some(Dialog::Pet(_)), _) => (
      "FORM",
      "Tab/↑↓ field  Enter add tag/load image  ←→ Del tags  Ctrl-S save  Esc close",
    ),
    (Some(Dialog::User(_)), _) => (
      "FORM",
      "Tab/↑↓ field  ←→ choose  Ctrl-S save  Esc close",
    ),
    (None, _) if app.search_active => ("SEARCH", "Type to filter  Esc clear  Enter done"),
    (None, Screen::Catalog) if app.card.is_confirming() => {
      ("ADOPT", "y confirm  n/Esc cancel")
    }
    (None, Screen::Catalog) => (
      "CATALOG",
      "↑↓/jk move  Space flip  a adopt  [ ] min age  { } max age  b breed  x reset  q quit",
    ),
    (None, Screen::Dashboard) => ("DASHBOARD", "Tab/1-4 screens  r refresh  q quit"),
    (None, Screen::Pets | Screen::Users) => (
      "ADMIN",
      "↑↓/jk move  / search  n new  e edit  d delete  r refresh  q quit",
    ),
  };

  let (status, style) = if !app.status_msg.is_empty() {
    (app.status_msg.clone(), Style::default().fg(Color::Yellow))
  } else if let Some(notice) = &app.notice {
    let color = match notice.kind {
      NotificationKind::Success => Color::Green,
      NotificationKind::Error => Color::Red,
    };
    (
      format!("{}: {}", notice.title, notice.description),
      Style::default().fg(color),
    )
  } else {
    (hints.to_string(), Style::default().fg(Color::DarkGray))
  };

  let mode_span = Span::styled(
    format!(" {mode_label} "),
    Style::default()
      .fg(Color::Black)
      .bg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  );
  let hint_span = Span::styled(format!("  {status}"), style);

  let line = Line::from(vec![mode_span, hint_span]);
  f.render_widget(
    Paragraph::new(line).style(Style::default().bg(Color::Black)),
    area,
  );
}
