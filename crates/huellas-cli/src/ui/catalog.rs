//! Adopter catalog: filters, pet list and the flip card.

use huellas_core::{
  backend::AdoptionBackend,
  cache::QueryKey,
  card::{back, front},
  filter::MAX_AGE,
  pet::Pet,
};
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};

use super::centered;
use crate::app::App;

// ─── Public entry ─────────────────────────────────────────────────────────────

pub fn draw<B: AdoptionBackend + 'static>(f: &mut Frame, area: Rect, app: &App<B>) {
  let cols = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
    .split(area);
  let left = Layout::default()
    .direction(Direction::Vertical)
    .constraints([Constraint::Length(5), Constraint::Min(0)])
    .split(cols[0]);

  let pets = app.catalog();
  draw_filters(f, left[0], app);
  draw_list(f, left[1], app, &pets);

  match pets.get(app.catalog_cursor) {
    Some(pet) if app.card.is_flipped() => draw_back(f, cols[1], pet),
    Some(pet) => draw_front(f, cols[1], pet),
    None => {
      let block = Block::default()
        .title(" Pet ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
      let inner = block.inner(cols[1]);
      f.render_widget(block, cols[1]);
      let hint = if app.is_loading(QueryKey::Pets) {
        "Loading pets…"
      } else {
        "No pets match these filters."
      };
      f.render_widget(
        Paragraph::new(hint).style(Style::default().fg(Color::DarkGray)),
        inner,
      );
    }
  }

  if app.card.is_confirming()
    && let Some(pet) = pets.get(app.catalog_cursor)
  {
    draw_confirm(f, area, pet);
  }
}

// ─── Filters ──────────────────────────────────────────────────────────────────

fn draw_filters<B: AdoptionBackend + 'static>(f: &mut Frame, area: Rect, app: &App<B>) {
  let block = Block::default()
    .title(" Filters ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);

  let (lo, hi) = app.filter.age_range;
  // One cell per year, the selected range highlighted.
  let slider: String = (0..=MAX_AGE)
    .map(|age| if (lo..=hi).contains(&age) { '■' } else { '·' })
    .collect();
  let label = Style::default()
    .fg(Color::Cyan)
    .add_modifier(Modifier::BOLD);

  let lines = vec![
    Line::from(vec![
      Span::styled(format!("{:<7}", "Age"), label),
      Span::raw(format!("{lo}–{hi} years")),
    ]),
    Line::from(vec![
      Span::raw(" ".repeat(7)),
      Span::styled(slider, Style::default().fg(Color::Yellow)),
    ]),
    Line::from(vec![
      Span::styled(format!("{:<7}", "Breed"), label),
      Span::raw(app.filter.breed.clone().unwrap_or_else(|| "Any".into())),
    ]),
  ];
  f.render_widget(Paragraph::new(lines), inner);
}

// ─── List ─────────────────────────────────────────────────────────────────────

fn draw_list<B: AdoptionBackend + 'static>(
  f: &mut Frame,
  area: Rect,
  app: &App<B>,
  pets: &[Pet],
) {
  let block = Block::default()
    .title(format!(" Available ({}) ", pets.len()))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  let items: Vec<ListItem> = pets
    .iter()
    .map(|pet| {
      ListItem::new(Line::from(vec![
        Span::raw(pet.name.clone()),
        Span::styled(
          format!("  {}", pet.breed),
          Style::default().fg(Color::DarkGray),
        ),
      ]))
    })
    .collect();

  let mut state = ListState::default();
  state.select((!pets.is_empty()).then_some(app.catalog_cursor));

  f.render_stateful_widget(
    List::new(items).block(block).highlight_style(
      Style::default()
        .bg(Color::Blue)
        .fg(Color::White)
        .add_modifier(Modifier::BOLD),
    ),
    area,
    &mut state,
  );
}

// ─── Card faces ───────────────────────────────────────────────────────────────

fn draw_front(f: &mut Frame, area: Rect, pet: &Pet) {
  let face = front(pet);
  let block = Block::default()
    .title(format!(" {} ", face.name))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Cyan));
  let label = Style::default()
    .fg(Color::Cyan)
    .add_modifier(Modifier::BOLD);
  let image = if face.image_url.is_empty() {
    "(no photo)"
  } else {
    face.image_url
  };

  let lines = vec![
    Line::from(Span::styled(image, Style::default().fg(Color::DarkGray))),
    Line::from(""),
    Line::from(vec![
      Span::styled(format!("{:<10}", "Age"), label),
      Span::raw(format!("{} years", face.age)),
    ]),
    Line::from(vec![
      Span::styled(format!("{:<10}", "Breed"), label),
      Span::raw(face.breed),
    ]),
    Line::from(vec![
      Span::styled(format!("{:<10}", "Location"), label),
      Span::raw(face.location),
    ]),
    Line::from(""),
    Line::from(Span::styled(
      "Space to see more",
      Style::default().fg(Color::DarkGray),
    )),
  ];
  f.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_back(f: &mut Frame, area: Rect, pet: &Pet) {
  let block = Block::default()
    .title(format!(" {} ", pet.name))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Magenta));

  let mut lines: Vec<Line> = Vec::new();
  for section in back(pet) {
    lines.push(Line::from(Span::styled(
      section.title,
      Style::default()
        .fg(Color::Magenta)
        .add_modifier(Modifier::BOLD),
    )));
    for item in section.items {
      lines.push(Line::from(format!("  • {item}")));
    }
    lines.push(Line::from(""));
  }
  lines.push(Line::from(Span::styled(
    "[a] Adopt",
    Style::default()
      .fg(Color::Black)
      .bg(Color::Green)
      .add_modifier(Modifier::BOLD),
  )));

  f.render_widget(
    Paragraph::new(lines)
      .block(block)
      .wrap(Wrap { trim: false }),
    area,
  );
}

fn draw_confirm(f: &mut Frame, area: Rect, pet: &Pet) {
  let popup = centered(area, 44, 5);
  let block = Block::default()
    .title(" Confirm adoption ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Green));
  let text = vec![
    Line::from(format!("Do you want to adopt {}?", pet.name)),
    Line::from(""),
    Line::from(Span::styled(
      "y confirm   n cancel",
      Style::default().fg(Color::DarkGray),
    )),
  ];
  f.render_widget(Clear, popup);
  f.render_widget(Paragraph::new(text).block(block), popup);
}
