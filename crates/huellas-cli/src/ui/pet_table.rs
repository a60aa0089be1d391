//! Admin pet table.

use huellas_core::{backend::AdoptionBackend, cache::QueryKey};
use ratatui::{
  Frame,
  layout::{Constraint, Rect},
  style::{Color, Modifier, Style},
  text::Line,
  widgets::{Block, Borders, Row, Table, TableState},
};

use super::search_bar;
use crate::app::App;

pub fn draw<B: AdoptionBackend + 'static>(f: &mut Frame, area: Rect, app: &App<B>) {
  let rows = app.pet_rows();
  let total = app.pets().len();

  let title = if app.is_loading(QueryKey::Pets) {
    " Pets (loading…) ".to_string()
  } else if app.search_active || !app.search.is_empty() {
    format!(" Pets ({}/{}) ", rows.len(), total)
  } else {
    format!(" Pets ({total}) ")
  };
  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = search_bar(f, block, area, app);

  let header = Row::new(["Name", "Age", "Breed", "Location", "Status", "Tags"]).style(
    Style::default()
      .fg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  );
  let body = rows.iter().map(|pet| {
    let status = pet
      .adoption_status
      .map_or_else(|| "-".to_string(), |s| s.to_string());
    // Records missing any tag collection are flagged for the admin.
    let tags = if pet.is_complete() {
      Line::from("ok")
    } else {
      Line::styled("incomplete", Style::default().fg(Color::Red))
    };
    Row::new(vec![
      Line::from(pet.name.clone()),
      Line::from(pet.age.to_string()),
      Line::from(pet.breed.clone()),
      Line::from(pet.location.clone()),
      Line::from(status),
      tags,
    ])
  });

  let table = Table::new(
    body,
    [
      Constraint::Percentage(20),
      Constraint::Length(5),
      Constraint::Percentage(20),
      Constraint::Percentage(20),
      Constraint::Length(12),
      Constraint::Min(10),
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
