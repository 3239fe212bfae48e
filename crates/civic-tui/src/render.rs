// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{DetailUiState, FormUiState, PromptTarget, PromptUiState, ViewData};
use civic_app::{AppMode, AppState, DashboardCounts, FieldKind, Rgb, Role, ThemeTokens};
use civic_table::{ColumnDef, Record, TableBody, TableRow, TableView, format_rupees};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Tabs, Wrap};

fn color(rgb: Rgb) -> Color {
    let Rgb(r, g, b) = rgb;
    Color::Rgb(r, g, b)
}

fn block(tokens: &ThemeTokens, title: impl Into<String>) -> Block<'static> {
    Block::default()
        .title(title.into())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color(tokens.border)))
        .style(
            Style::default()
                .fg(color(tokens.text))
                .bg(color(tokens.surface)),
        )
}

pub(crate) fn render(frame: &mut Frame<'_>, state: &AppState, view_data: &ViewData) {
    let tokens = view_data.theme.tokens();
    frame.render_widget(
        Block::default().style(
            Style::default()
                .fg(color(tokens.text))
                .bg(color(tokens.background)),
        ),
        frame.area(),
    );

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let screens = state.role.screens();
    let selected = screens
        .iter()
        .position(|screen| *screen == state.active_screen)
        .unwrap_or(0);
    let titles = screens
        .iter()
        .enumerate()
        .map(|(index, screen)| format!("{} {}", index + 1, screen.label()))
        .collect::<Vec<String>>();
    let tabs = Tabs::new(titles)
        .block(block(tokens, format!("civic · {}", state.role.label())))
        .style(Style::default().fg(color(tokens.muted)))
        .highlight_style(
            Style::default()
                .fg(color(tokens.accent))
                .add_modifier(Modifier::BOLD),
        )
        .select(selected);
    frame.render_widget(tabs, layout[0]);

    match &view_data.table {
        Some(table) => render_table(frame, layout[1], state, view_data, table),
        None => {
            let body = Paragraph::new(dashboard_text(state, &view_data.dashboard_counts))
                .block(block(tokens, "dashboard"));
            frame.render_widget(body, layout[1]);
        }
    }

    let status = Paragraph::new(status_text(state, view_data))
        .style(Style::default().fg(color(tokens.warning)))
        .block(block(tokens, ""));
    frame.render_widget(status, layout[2]);

    if let Some(prompt) = &view_data.prompt {
        let area = bottom_rect(layout[1]);
        frame.render_widget(Clear, area);
        frame.render_widget(
            Paragraph::new(prompt_text(prompt)).block(block(tokens, prompt_title(prompt))),
            area,
        );
    }

    if let (Some(menu), Some(table)) = (&view_data.column_menu, &view_data.table) {
        let area = centered_rect(40, 60, frame.area());
        frame.render_widget(Clear, area);
        frame.render_widget(
            Paragraph::new(column_menu_lines(table, menu.cursor).join("\n"))
                .block(block(tokens, "columns")),
            area,
        );
    }

    if let Some(menu) = &view_data.action_menu {
        let area = centered_rect(36, 30, frame.area());
        frame.render_widget(Clear, area);
        frame.render_widget(
            Paragraph::new(menu.render_lines().join("\n")).block(block(tokens, menu.title())),
            area,
        );
    }

    if let Some(form) = &view_data.form {
        let area = centered_rect(64, 70, frame.area());
        frame.render_widget(Clear, area);
        let title = format!("new {}", form.payload.kind().label());
        frame.render_widget(
            Paragraph::new(form_lines(form, tokens))
                .wrap(Wrap { trim: false })
                .block(block(tokens, title)),
            area,
        );
    }

    if let Some(detail) = &view_data.detail {
        let area = centered_rect(60, 60, frame.area());
        frame.render_widget(Clear, area);
        frame.render_widget(
            Paragraph::new(detail_lines(detail).join("\n"))
                .wrap(Wrap { trim: false })
                .block(block(tokens, detail.title.clone())),
            area,
        );
    }

    if view_data.help_visible {
        let area = centered_rect(76, 60, frame.area());
        frame.render_widget(Clear, area);
        frame.render_widget(
            Paragraph::new(help_overlay_text()).block(block(tokens, "help")),
            area,
        );
    }
}

fn render_table(
    frame: &mut Frame<'_>,
    area: Rect,
    state: &AppState,
    view_data: &ViewData,
    table: &TableView<Record>,
) {
    let tokens = view_data.theme.tokens();
    let columns = table.visible_columns().collect::<Vec<&ColumnDef>>();
    let widths = vec![Constraint::Min(6); columns.len().max(1)];

    let header = Row::new(columns.iter().enumerate().map(|(index, column)| {
        let mut style = Style::default()
            .fg(color(tokens.text))
            .add_modifier(Modifier::BOLD);
        if index == view_data.selected_col {
            style = style.fg(color(tokens.accent));
        }
        Cell::from(table.header_label(column.key).unwrap_or_default()).style(style)
    }));

    let rows = match table.body() {
        TableBody::Rows(rows) => rows
            .into_iter()
            .enumerate()
            .map(|(row_index, row)| {
                let selected = row_index == view_data.selected_row;
                let cells = columns
                    .iter()
                    .map(|column| {
                        let rendered = column.render_cell(&row.cell(column.key));
                        let mut style = Style::default();
                        if let Some(tone) = rendered.tone {
                            style = style.fg(color(tokens.tone(tone)));
                        }
                        if selected {
                            style = style.bg(color(tokens.selection));
                        }
                        Cell::from(rendered.text).style(style)
                    })
                    .collect::<Vec<_>>();
                Row::new(cells)
            })
            .collect::<Vec<_>>(),
        TableBody::Placeholder(text) => vec![Row::new(vec![
            Cell::from(text).style(Style::default().fg(color(tokens.muted))),
        ])],
    };

    let widget = Table::new(rows, widths)
        .header(header)
        .column_spacing(1)
        .block(block(tokens, table.title(state.active_screen.label())));
    frame.render_widget(widget, area);
}

pub(crate) fn dashboard_text(state: &AppState, counts: &DashboardCounts) -> String {
    let mut lines = vec![
        format!("welcome, {}", state.role.label()),
        String::new(),
        format!("open grievances: {}", counts.grievances_open),
        format!("active projects: {}", counts.projects_active),
        format!("active polls: {}", counts.polls_active),
    ];
    if state.role == Role::Admin {
        lines.push(format!("active users: {}", counts.users_active));
    }
    if matches!(state.role, Role::Admin | Role::Mla) {
        lines.push(format!(
            "budget allocated: {}",
            format_rupees(counts.budget_allocated_paise)
        ));
        lines.push(format!(
            "budget utilized: {} ({}%)",
            format_rupees(counts.budget_utilized_paise),
            counts.utilization_percent()
        ));
    }
    lines.join("\n")
}

pub(crate) fn status_text(state: &AppState, view_data: &ViewData) -> String {
    let (mode, hints) = match state.mode {
        AppMode::Form(_) => (
            "FORM",
            "tab/shift+tab field | ←/→ choice | enter submit | esc cancel",
        ),
        AppMode::Nav if view_data.prompt.is_some() => {
            ("NAV", "type to filter | enter keep | esc clear")
        }
        AppMode::Nav if view_data.table.is_some() => (
            "NAV",
            "/ search | f filter | s sort | c cols | ]/[ page | enter actions | n new | ? help",
        ),
        AppMode::Nav => ("NAV", "tab screen | r role | t theme | ? help | q quit"),
    };
    match &state.status_line {
        Some(status) => format!("{mode} {} | {status} | {hints}", state.path()),
        None => format!("{mode} {} | {hints}", state.path()),
    }
}

fn prompt_title(prompt: &PromptUiState) -> String {
    match prompt.target {
        PromptTarget::Search => "search".to_owned(),
        PromptTarget::Column(key) => format!("filter {key}"),
    }
}

fn prompt_text(prompt: &PromptUiState) -> String {
    format!("> {}_", prompt.input)
}

fn column_menu_lines(table: &TableView<Record>, cursor: usize) -> Vec<String> {
    table
        .columns()
        .iter()
        .enumerate()
        .map(|(index, column)| {
            let marker = if index == cursor { ">" } else { " " };
            let check = if table.is_hidden(column.key) {
                "[ ]"
            } else {
                "[x]"
            };
            let pinned = if column.hideable { "" } else { " (always)" };
            format!("{marker} {check} {}{pinned}", column.label)
        })
        .collect()
}

fn form_lines(form: &FormUiState, tokens: &ThemeTokens) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (index, field) in form.payload.fields().iter().enumerate() {
        let marker = if index == form.field_index { ">" } else { " " };
        let value = form.payload.value(field.key).unwrap_or_default();
        let shown = match field.kind {
            FieldKind::Choice => format!("< {value} >"),
            _ if index == form.field_index => format!("{value}_"),
            _ => value,
        };
        let label_style = if index == form.field_index {
            Style::default()
                .fg(color(tokens.accent))
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(color(tokens.muted))
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{marker} {}: ", field.label), label_style),
            Span::raw(shown),
        ]));
        if let Some(message) = form.errors.get(field.key) {
            lines.push(Line::from(Span::styled(
                format!("    {message}"),
                Style::default().fg(color(tokens.danger)),
            )));
        }
    }
    lines
}

pub(crate) fn detail_lines(detail: &DetailUiState) -> Vec<String> {
    let width = detail
        .fields
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0);
    detail
        .fields
        .iter()
        .map(|(label, value)| format!("{label:<width$}  {value}"))
        .collect()
}

pub(crate) fn help_overlay_text() -> &'static str {
    "global: ctrl+q quit | ? help\n\
nav: tab/shift+tab screen | 1-9 jump | r switch role | t theme | q quit\n\
table: j/k rows | h/l columns | ]/[ or pgdn/pgup page\n\
table: / search | f filter column | x clear filters | s/S sort/unsort | c columns\n\
table: enter row actions | n new record\n\
columns: j/k move | space toggle | a show all | esc close\n\
actions: j/k move | enter run | esc close\n\
form: tab/shift+tab field | ←/→ or space choice | enter or ctrl+s submit | esc cancel\n\
detail: any key close"
}

fn bottom_rect(area: Rect) -> Rect {
    let height = 3.min(area.height);
    Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(height),
        width: area.width,
        height,
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::{bottom_rect, column_menu_lines, form_lines, prompt_text};
    use crate::{FormUiState, PromptTarget, PromptUiState};
    use civic_app::schema::columns_for;
    use civic_app::{FormKind, Screen, ThemeMode, tokens_for};
    use civic_table::{Record, TableView};
    use ratatui::layout::Rect;

    fn line_text(line: &ratatui::text::Line<'_>) -> String {
        line.spans
            .iter()
            .map(|span| span.content.as_ref())
            .collect()
    }

    #[test]
    fn form_lines_put_errors_under_their_field() {
        let mut form = FormUiState::blank(FormKind::State);
        form.errors = form.payload.validate().expect_err("blank state form");
        let lines = form_lines(&form, &tokens_for(ThemeMode::Light))
            .iter()
            .map(line_text)
            .collect::<Vec<_>>();

        assert_eq!(lines[0], "> Name: _");
        assert_eq!(lines[1], "    name is required");
        assert!(lines.iter().any(|line| line.contains("code is required")));
        assert_eq!(lines.len(), 6);
    }

    #[test]
    fn choice_fields_render_with_arrows() {
        let form = FormUiState::blank(FormKind::Grievance);
        let lines = form_lines(&form, &tokens_for(ThemeMode::Dark))
            .iter()
            .map(line_text)
            .collect::<Vec<_>>();
        assert!(lines.iter().any(|line| line.ends_with("< medium >")));
    }

    #[test]
    fn column_menu_marks_hidden_and_fixed_columns() {
        let columns = columns_for(Screen::Users).expect("users table");
        let mut table = TableView::new(columns, Vec::<Record>::new()).expect("valid schema");
        table
            .toggle_column_visibility("email")
            .expect("email hideable");

        let lines = column_menu_lines(&table, 2);
        assert_eq!(lines[0], "  [x] ID (always)");
        assert_eq!(lines[2], "> [ ] Email");
    }

    #[test]
    fn prompt_shows_cursor() {
        let prompt = PromptUiState {
            target: PromptTarget::Search,
            input: "pune".to_owned(),
        };
        assert_eq!(prompt_text(&prompt), "> pune_");
    }

    #[test]
    fn bottom_rect_fits_small_areas() {
        let area = Rect::new(0, 0, 20, 2);
        assert_eq!(bottom_rect(area), Rect::new(0, 0, 20, 2));
        let tall = Rect::new(0, 5, 20, 10);
        assert_eq!(bottom_rect(tall), Rect::new(0, 12, 20, 3));
    }
}
