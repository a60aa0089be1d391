//! Admin user table.

use huellas_core::{backend::AdoptionBackend, cache::QueryKey};
use ratatui::{
  Frame,
  layout::{Constraint, Rect},
  style::{Color, Modifier, Style},
  widgets::{Block, Borders, Row, Table, TableState},
};

use super::search_bar;
use crate::app::App;

pub fn draw<B: AdoptionBackend + 'static>(f: &mut Frame, area: Rect, app: &App<B>) {
  let rows = app.user_rows();
  let total = app.users().len();

  let title = if app.is_loading(QueryKey::Users) {
    " Users (loading…) ".to_string()
  } else if app.search_active || !app.search.is_empty() {
    format!(" Users ({}/{}) ", rows.len(), total)
  } else {
    format!(" Users ({total}) ")
  };
  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = search_bar(f, block, area, app);

  let header = Row::new(["Name", "Document", "Email", "Phone", "City", "Role"]).style(
    Style::default()
      .fg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  );
  let body = rows.iter().map(|user| {
    Row::new(vec![
      user.full_name(),
      format!("{} {}", user.document_type, user.document_number),
      user.email.clone(),
      user.phone.clone(),
      user.city.clone(),
      user.role.to_string(),
    ])
  });

  let table = Table::new(
    body,
    [
      Constraint::Percentage(22),
      Constraint::Percentage(22),
      Constraint::Percentage(22),
      Constraint::Length(12),
      Constraint::Length(12),
      Constraint::Min(6),
    ],
  )
  .header(header)
  .row_highlight_style(
    Style::default()
      .bg(Color::Blue)
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  );

  let mut state = TableState::default();
  state.select((!rows.is_empty()).then_some(app.table_cursor));
  f.render_stateful_widget(table, inner, &mut state);
}
