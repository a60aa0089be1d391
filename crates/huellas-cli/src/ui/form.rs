//! Modal dialogs: the pet and user forms and the delete confirmation.

use huellas_core::form::{FormMode, PetField, UserField};
use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use strum::IntoEnumIterator;

use super::centered;
use crate::app::{DeleteTarget, PetDialog, UserDialog};

const LABEL_WIDTH: usize = 24;

fn title(noun: &str, mode: FormMode) -> String {
  match mode {
    FormMode::Create => format!(" New {noun} "),
    FormMode::Edit(_) => format!(" Edit {noun} "),
  }
}

fn label(text: String, focused: bool) -> Span<'static> {
  let style = if focused {
    Style::default()
      .fg(Color::Black)
      .bg(Color::Cyan)
      .add_modifier(Modifier::BOLD)
  } else {
    Style::default().fg(Color::Cyan)
  };
  Span::styled(format!("{text:<LABEL_WIDTH$}"), style)
}

fn error_line(message: &str) -> Line<'static> {
  Line::from(Span::styled(
    format!("{}{message}", " ".repeat(LABEL_WIDTH)),
    Style::default().fg(Color::Red),
  ))
}

/// Trailing lines shared by both forms: the request error or progress.
fn footer(lines: &mut Vec<Line<'static>>, saving: bool, submit_error: Option<&str>) {
  lines.push(Line::from(""));
  if saving {
    lines.push(Line::from(Span::styled(
      "Saving…",
      Style::default().fg(Color::Yellow),
    )));
  } else if let Some(message) = submit_error {
    lines.push(Line::from(Span::styled(
      message.to_string(),
      Style::default()
        .fg(Color::Red)
        .add_modifier(Modifier::BOLD),
    )));
  }
}

fn render(f: &mut Frame, area: Rect, title: String, lines: Vec<Line<'static>>) {
  let popup = centered(area, 80, lines.len() as u16 + 2);
  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Cyan));
  f.render_widget(Clear, popup);
  f.render_widget(
    Paragraph::new(lines)
      .block(block)
      .wrap(Wrap { trim: false }),
    popup,
  );
}

// ─── Pet form ─────────────────────────────────────────────────────────────────

pub fn draw_pet(f: &mut Frame, area: Rect, dialog: &PetDialog) {
  let form = &dialog.form;
  let focused = dialog.field();
  let mut lines = Vec::new();

  for field in PetField::iter() {
    let is_focused = field == focused;
    let cursor = if is_focused { "_" } else { "" };

    if let Some(tags) = form.tags(field) {
      let mut spans = vec![label(field.to_string(), is_focused)];
      for (i, tag) in tags.items().iter().enumerate() {
        let style = if is_focused && i == dialog.tag_cursor {
          Style::default().fg(Color::Black).bg(Color::Yellow)
        } else {
          Style::default().fg(Color::Yellow)
        };
        spans.push(Span::styled(format!("[{tag}]"), style));
        spans.push(Span::raw(" "));
      }
      lines.push(Line::from(spans));
      lines.push(Line::from(format!(
        "{}+ {}{cursor}",
        " ".repeat(LABEL_WIDTH),
        form.text(field)
      )));
    } else if field == PetField::Image {
      let attached = form.text(field);
      let mut spans = vec![
        label(field.to_string(), is_focused),
        Span::raw(format!("{}{cursor}", dialog.image_path)),
      ];
      if dialog.image_read.is_some() {
        spans.push(Span::styled(
          "  (reading…)",
          Style::default().fg(Color::Yellow),
        ));
      } else if !attached.is_empty() {
        spans.push(Span::styled(
          format!("  (attached: {attached})"),
          Style::default().fg(Color::Green),
        ));
      }
      lines.push(Line::from(spans));
    } else {
      lines.push(Line::from(vec![
        label(field.to_string(), is_focused),
        Span::raw(format!("{}{cursor}", form.text(field))),
      ]));
    }

    if let Some(message) = form.error(field) {
      lines.push(error_line(message));
    }
  }

  footer(&mut lines, dialog.is_saving(), form.submit_error());
  render(f, area, title("pet", form.mode()), lines);
}

// ─── User form ────────────────────────────────────────────────────────────────

pub fn draw_user(f: &mut Frame, area: Rect, dialog: &UserDialog) {
  let form = &dialog.form;
  let focused = dialog.field();
  let mut lines = Vec::new();

  for field in form.visible_fields() {
    let is_focused = field == focused;
    let value = match field {
      _ if field.is_choice() => format!("‹ {} ›", form.text(field)),
      UserField::Password => "*".repeat(form.text(field).chars().count()),
      _ => form.text(field),
    };
    let cursor = if is_focused && !field.is_choice() {
      "_"
    } else {
      ""
    };
    lines.push(Line::from(vec![
      label(field.to_string(), is_focused),
      Span::raw(format!("{value}{cursor}")),
    ]));
    if let Some(message) = form.error(field) {
      lines.push(error_line(message));
    }
  }

  footer(&mut lines, dialog.is_saving(), form.submit_error());
  render(f, area, title("user", form.mode()), lines);
}

// ─── Delete confirmation ──────────────────────────────────────────────────────

pub fn draw_delete(f: &mut Frame, area: Rect, target: &DeleteTarget) {
  let (noun, name) = match target {
    DeleteTarget::Pet { name, .. } => ("pet", name),
    DeleteTarget::User { name, .. } => ("user", name),
  };
  let popup = centered(area, 50, 5);
  let block = Block::default()
    .title(format!(" Delete {noun} "))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Red));
  let text = vec![
    Line::from(format!("Delete {name}? This cannot be undone.")),
    Line::from(""),
    Line::from(Span::styled(
      "y delete   n cancel",
      Style::default().fg(Color::DarkGray),
    )),
  ];
  f.render_widget(Clear, popup);
  f.render_widget(Paragraph::new(text).block(block), popup);
}
