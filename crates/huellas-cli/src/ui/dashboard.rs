//! Admin dashboard: headline counts and the most recent pets.

use huellas_core::{
  backend::AdoptionBackend,
  filter::{DashboardStats, recent_pets},
};
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph},
};

use crate::app::App;

pub fn draw<B: AdoptionBackend + 'static>(f: &mut Frame, area: Rect, app: &App<B>) {
  let pets = app.pets();
  let stats = DashboardStats::from_pets(&pets);

  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([Constraint::Length(4), Constraint::Min(0)])
    .split(area);
  let tiles = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Ratio(1, 4); 4])
    .split(rows[0]);

  for (i, (title, value, color)) in [
    ("Total pets", stats.total, Color::Cyan),
    ("Available", stats.available, Color::Green),
    ("Adopted", stats.adopted, Color::Magenta),
    ("Locations", stats.locations, Color::Yellow),
  ]
  .into_iter()
  .enumerate()
  {
    let block = Block::default()
      .title(format!(" {title} "))
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Color::DarkGray));
    f.render_widget(
      Paragraph::new(Span::styled(
        value.to_string(),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
      ))
      .block(block),
      tiles[i],
    );
  }

  let block = Block::default()
    .title(" Recent pets ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let recent = recent_pets(&pets);
  let lines: Vec<Line> = if recent.is_empty() {
    vec![Line::from(Span::styled(
      "No pets yet.",
      Style::default().fg(Color::DarkGray),
    ))]
  } else {
    recent
      .iter()
      .map(|pet| {
        let status = pet
          .adoption_status
          .map_or_else(|| "looking for a home".to_string(), |s| s.to_string());
        Line::from(vec![
          Span::styled(
            format!("{:<20}", pet.name),
            Style::default().add_modifier(Modifier::BOLD),
          ),
          Span::raw(format!("{:<16}", pet.breed)),
          Span::raw(format!("{:<16}", pet.location)),
          Span::styled(status, Style::default().fg(Color::DarkGray)),
        ])
      })
      .collect()
  };
  f.render_widget(Paragraph::new(lines).block(block), rows[1]);
}
