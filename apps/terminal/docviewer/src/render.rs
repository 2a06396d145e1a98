//! Pure view functions: read the state, draw to a frame, nothing else.

use crate::state::AppState;

use client_core::screens::{DocumentScreen, DocumentsView, LoginScreen, Screen, documents, login};

use models::CredentialField;

use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};

const LOGIN_FORM_WIDTH: u16 = 48;
const LOGIN_FORM_HEIGHT: u16 = 12;
const FOOTER_HEIGHT: u16 = 1;

const LOGIN_FOOTER: &str = "Tab: champ suivant   Entrée: valider   Échap: quitter";
const QUIT_HINT: &str = "Échap: quitter";

pub fn render(state: &AppState, frame: &mut Frame) {
    let [body, footer] =
        Layout::vertical([Constraint::Fill(1), Constraint::Length(FOOTER_HEIGHT)])
            .areas(frame.area());

    match state.shell.screen() {
        Screen::Login(screen) => {
            render_login(screen, frame, body);
            render_footer(frame, footer, LOGIN_FOOTER.to_string());
        }
        Screen::Documents(screen) => {
            render_documents(screen, frame, body);
            render_footer(frame, footer, documents_footer(screen.view()));
        }
    }
}

/// List actions are only offered once there is a list to act on.
fn documents_footer(view: DocumentsView<'_>) -> String {
    match view {
        DocumentsView::Loaded(_) => format!(
            "Ctrl+L: {}   Entrée: {}   {QUIT_HINT}",
            documents::LOGOUT_LABEL,
            documents::LINK_LABEL
        ),
        DocumentsView::Loading | DocumentsView::Error(_) => QUIT_HINT.to_string(),
    }
}

fn render_footer(frame: &mut Frame, area: Rect, text: String) {
    let footer = Paragraph::new(text).style(Style::new().fg(Color::DarkGray));
    frame.render_widget(footer, area);
}

// ============================================================================
// Login
// ============================================================================

fn render_login(screen: &LoginScreen, frame: &mut Frame, area: Rect) {
    let form_area = centered(area, LOGIN_FORM_WIDTH, LOGIN_FORM_HEIGHT);

    let mut lines = Vec::new();
    push_field(
        &mut lines,
        screen,
        CredentialField::Username,
        login::USERNAME_LABEL,
        screen.username().to_string(),
    );
    push_field(
        &mut lines,
        screen,
        CredentialField::Password,
        login::PASSWORD_LABEL,
        screen.masked_password(),
    );

    let submit_style = if screen.is_submitting() {
        Style::new().fg(Color::DarkGray)
    } else {
        Style::new().add_modifier(Modifier::BOLD)
    };
    lines.push(Line::from(Span::styled(
        format!("[ {} ]", screen.submit_label()),
        submit_style,
    )));

    if let Some(error) = screen.error() {
        lines.push(Line::from(Span::styled(
            error.to_string(),
            Style::new().fg(Color::Red),
        )));
    }

    let form = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::new().borders(Borders::ALL).title(login::TITLE));
    frame.render_widget(form, form_area);
}

fn push_field(
    lines: &mut Vec<Line<'static>>,
    screen: &LoginScreen,
    field: CredentialField,
    label: &'static str,
    value: String,
) {
    let focused = screen.focus() == field;
    let (marker, value_style) = if focused {
        ("> ", Style::new().add_modifier(Modifier::BOLD))
    } else {
        ("  ", Style::new())
    };

    lines.push(Line::from(label));
    lines.push(Line::from(vec![
        Span::raw(marker),
        Span::styled(value, value_style),
    ]));
    match screen.field_hint(field) {
        Some(hint) => lines.push(Line::from(Span::styled(
            hint.to_string(),
            Style::new().fg(Color::Yellow),
        ))),
        None => lines.push(Line::default()),
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    cell
}

// ============================================================================
// Documents
// ============================================================================

fn render_documents(screen: &DocumentScreen, frame: &mut Frame, area: Rect) {
    match screen.view() {
        DocumentsView::Loading => {
            frame.render_widget(Paragraph::new(documents::LOADING_MESSAGE), area);
        }
        DocumentsView::Error(message) => {
            let error = Paragraph::new(message.to_string())
                .style(Style::new().fg(Color::Red))
                .wrap(Wrap { trim: false });
            frame.render_widget(error, area);
        }
        DocumentsView::Loaded(entries) => {
            let items: Vec<ListItem> = entries
                .iter()
                .map(|document| {
                    ListItem::new(Line::from(vec![
                        Span::raw(document.filename.clone()),
                        Span::raw("  "),
                        Span::styled(
                            format!("[{}]", documents::LINK_LABEL),
                            Style::new()
                                .fg(Color::Cyan)
                                .add_modifier(Modifier::UNDERLINED),
                        ),
                    ]))
                })
                .collect();

            let list = List::new(items)
                .block(Block::new().borders(Borders::ALL).title(documents::TITLE))
                .highlight_symbol("> ")
                .highlight_style(Style::new().add_modifier(Modifier::REVERSED));
            let mut list_state = ListState::default().with_selected(Some(screen.selected_index()));
            frame.render_stateful_widget(list, area, &mut list_state);
        }
    }
}
