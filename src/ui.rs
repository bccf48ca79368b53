//! Terminal drawing - one function per view plus the popups

use ratatui::{prelude::*, widgets::*};

use crate::app::Screen;
use crate::constants::APP_NAME;
use crate::messages::RenderState;
use crate::models::{CourseStatus, ReorderDirection};
use crate::screens::login::{AuthField, CredentialsForm};
use crate::screens::{
    ConfirmAction, CoursesScreen, InputMode, LessonManager, LoginScreen, Notice, NoticeKind, RegisterScreen,
    TextInput,
};

pub fn draw(f: &mut Frame, state: &RenderState) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title bar
            Constraint::Length(1), // Banner
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_title_bar(f, state, chunks[0]);
    if let Some(banner) = &state.banner {
        f.render_widget(notice_line(banner), chunks[1]);
    }

    match &state.screen {
        Screen::Login(login) => draw_login(f, login, chunks[2]),
        Screen::Register(register) => draw_register(f, register, chunks[2]),
        Screen::Courses(courses) => match &courses.lessons {
            Some(lessons) => draw_lessons(f, lessons, chunks[2]),
            None => draw_courses(f, courses, chunks[2]),
        },
    }

    draw_status_bar(f, state, chunks[3]);

    if state.show_help {
        draw_help_popup(f, area);
    }
}

fn draw_title_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let location = match &state.screen {
        Screen::Login(_) => "Login",
        Screen::Register(_) => "Register",
        Screen::Courses(c) if c.lessons.is_some() => "Lessons",
        Screen::Courses(_) => "Courses",
    };
    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", APP_NAME),
            Style::default().fg(Color::Black).bg(Color::Cyan).bold(),
        ),
        Span::raw(" "),
        Span::styled(location, Style::default().fg(Color::Gray)),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let ctx = state.key_context();
    let status = if ctx.confirm_pending {
        " y/Enter:confirm | n/Esc:cancel "
    } else if ctx.import_open {
        " Enter:import | Tab:complete | Esc:cancel "
    } else if ctx.editing {
        " Enter:save | Esc:stop editing | arrows:move "
    } else {
        match &state.screen {
            Screen::Login(_) => " Tab:next field | Enter:sign in | Ctrl+R:register | F1:help | Ctrl+C:quit ",
            Screen::Register(_) => " Tab:next field | Enter:register | Esc:back to login | Ctrl+C:quit ",
            Screen::Courses(c) if c.lessons.is_some() => {
                " n:new | d:delete | K/J:move | r:reload | Esc:back | ?:help "
            }
            Screen::Courses(_) => {
                " n:new | d:delete | p:publish | l:lessons | f:filter | ←/→:page | i:import | o:logout | ?:help "
            }
        }
    };

    let bar = Paragraph::new(status).style(Style::default().fg(Color::DarkGray));
    f.render_widget(bar, area);
}

// ============================================================================
// Login / Register
// ============================================================================

fn draw_login(f: &mut Frame, login: &LoginScreen, area: Rect) {
    let message = match (&login.error, login.loading) {
        (_, true) => Some(Notice::info("Signing in...")),
        (Some(error), false) => Some(Notice::error(error.clone())),
        _ => None,
    };
    draw_credentials_form(f, " Login ", &login.form, message.as_ref(), area);
}

fn draw_register(f: &mut Frame, register: &RegisterScreen, area: Rect) {
    let message = if register.loading {
        Some(Notice::info("Creating account..."))
    } else if let Some(error) = &register.error {
        Some(Notice::error(error.clone()))
    } else {
        register.success.as_ref().map(|s| Notice::success(s.clone()))
    };
    draw_credentials_form(f, " Create account ", &register.form, message.as_ref(), area);
}

fn draw_credentials_form(f: &mut Frame, title: &str, form: &CredentialsForm, message: Option<&Notice>, area: Rect) {
    let popup = centered_fixed(52, 11, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(title);
    let inner = block.inner(popup);
    f.render_widget(Clear, popup);
    f.render_widget(block, popup);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Email
            Constraint::Length(3), // Password
            Constraint::Length(1), // Message
        ])
        .split(inner);

    let email_focused = form.focus == AuthField::Email;
    f.render_widget(render_input(form.email.value().to_string(), " Email ", email_focused), rows[0]);
    let masked = "*".repeat(form.password.value().chars().count());
    f.render_widget(render_input(masked, " Password ", !email_focused), rows[1]);

    if let Some(message) = message {
        f.render_widget(notice_line(message), rows[2]);
    }

    let (input, row) = if email_focused {
        (&form.email, rows[0])
    } else {
        (&form.password, rows[1])
    };
    place_cursor(f, input, row);
}

// ============================================================================
// Courses
// ============================================================================

fn draw_courses(f: &mut Frame, courses: &CoursesScreen, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // New course
            Constraint::Length(1), // Filter + paging
            Constraint::Length(1), // Notice
            Constraint::Min(3),    // List
        ])
        .split(area);

    let editing = courses.mode == InputMode::Editing;
    f.render_widget(
        render_input(courses.title.value().to_string(), " New course (n) ", editing),
        chunks[0],
    );
    if editing {
        place_cursor(f, &courses.title, chunks[0]);
    }

    let info = Line::from(vec![
        Span::styled(" Status: ", Style::default().fg(Color::Gray)),
        Span::styled(courses.filter.as_str(), Style::default().fg(Color::Yellow).bold()),
        Span::styled("  Page ", Style::default().fg(Color::Gray)),
        Span::raw(format!("{}/{}", courses.page, courses.total_pages())),
        Span::styled(format!("  ({} courses)", courses.total), Style::default().fg(Color::DarkGray)),
    ]);
    f.render_widget(Paragraph::new(info), chunks[1]);

    if let Some(notice) = &courses.notice {
        f.render_widget(notice_line(notice), chunks[2]);
    }

    let block = Block::default().borders(Borders::ALL).title(" Courses ");
    if courses.loading && courses.courses.is_empty() {
        f.render_widget(Paragraph::new("Loading...").block(block), chunks[3]);
    } else if let Some(placeholder) = courses.placeholder() {
        f.render_widget(
            Paragraph::new(placeholder).style(Style::default().fg(Color::DarkGray)).block(block),
            chunks[3],
        );
    } else {
        let items: Vec<ListItem> = courses
            .courses
            .iter()
            .map(|course| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{:<10}", course.status.as_str()),
                        Style::default().fg(status_color(course.status)).bold(),
                    ),
                    Span::raw(course.title.clone()),
                    Span::styled(format!("  {}", course.created_on()), Style::default().fg(Color::DarkGray)),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().fg(Color::Yellow).bold())
            .highlight_symbol("> ");
        let mut list_state = ListState::default();
        list_state.select(Some(courses.selected));
        f.render_stateful_widget(list, chunks[3], &mut list_state);
    }

    if let Some(confirm) = &courses.confirm {
        draw_confirm_popup(f, confirm, area);
    }
    if let Some(path) = &courses.import_path {
        draw_import_popup(f, path, area);
    }
}

// ============================================================================
// Lessons
// ============================================================================

fn draw_lessons(f: &mut Frame, lessons: &LessonManager, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // New lesson
            Constraint::Length(1), // Error
            Constraint::Length(1), // Success
            Constraint::Min(3),    // List
        ])
        .split(area);

    let editing = lessons.mode == InputMode::Editing;
    f.render_widget(
        render_input(lessons.title.value().to_string(), " New lesson (n) ", editing),
        chunks[0],
    );
    if editing {
        place_cursor(f, &lessons.title, chunks[0]);
    }

    if let Some(error) = &lessons.error {
        f.render_widget(notice_line(error), chunks[1]);
    }
    if let Some(success) = &lessons.success {
        f.render_widget(notice_line(success), chunks[2]);
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Lessons - {} ", lessons.course_title));

    if let Some(placeholder) = lessons.placeholder() {
        let text = if lessons.loading { "Loading..." } else { placeholder };
        f.render_widget(
            Paragraph::new(text).style(Style::default().fg(Color::DarkGray)).block(block),
            chunks[3],
        );
    } else {
        let items: Vec<ListItem> = lessons
            .lessons
            .iter()
            .enumerate()
            .map(|(i, lesson)| {
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{:>3}. ", lesson.order), Style::default().fg(Color::DarkGray)),
                    Span::raw(lesson.title.clone()),
                    Span::raw("  "),
                    move_arrow("↑", lessons.can_move(i, ReorderDirection::Up)),
                    Span::raw(" "),
                    move_arrow("↓", lessons.can_move(i, ReorderDirection::Down)),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().fg(Color::Yellow).bold())
            .highlight_symbol("> ");
        let mut list_state = ListState::default();
        list_state.select(Some(lessons.selected));
        f.render_stateful_widget(list, chunks[3], &mut list_state);
    }

    if let Some(confirm) = &lessons.confirm {
        draw_confirm_popup(f, confirm, area);
    }
}

/// Disabled arrows are dimmed
fn move_arrow(symbol: &'static str, enabled: bool) -> Span<'static> {
    let style = if enabled {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM)
    };
    Span::styled(symbol, style)
}

// ============================================================================
// Popups
// ============================================================================

fn draw_confirm_popup(f: &mut Frame, confirm: &ConfirmAction, area: Rect) {
    let popup_area = centered_fixed(50, 5, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(" Confirm ")
        .style(Style::default().bg(Color::Black));

    let text = vec![Line::from(confirm.prompt()), Line::from(" y: yes   n: no ").dark_gray()];
    let paragraph = Paragraph::new(text).block(block).wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(paragraph, popup_area);
}

fn draw_import_popup(f: &mut Frame, path: &TextInput, area: Rect) {
    let popup_area = centered_fixed(64, 3, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Import courses from .xlsx (Enter to import, Esc to cancel) ")
        .style(Style::default().bg(Color::Black));

    let content = if path.is_empty() {
        Line::from("Path to spreadsheet, e.g. ~/courses.xlsx").dark_gray()
    } else {
        Line::from(path.value().to_string())
    };

    f.render_widget(Clear, popup_area);
    f.render_widget(Paragraph::new(content).block(block), popup_area);
    place_cursor(f, path, popup_area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 80, area);

    let help_text = r#"
 COURSES PLATFORM - Keyboard Shortcuts

 LOGIN / REGISTER
   Tab                Next field
   Enter              Submit
   Ctrl+R             Create an account
   Esc                Back to login

 COURSES
   ↑ / ↓              Select course
   n                  New course title (Enter saves)
   d                  Delete selected course
   p                  Publish / unpublish
   l / Enter          Manage lessons
   f                  Cycle status filter
   ← / →              Previous / next page
   i                  Import from spreadsheet
   r                  Reload
   o                  Log out

 LESSONS
   n                  New lesson title
   d                  Delete selected lesson
   K / J              Move lesson up / down
   Esc / b            Back to courses

 GENERAL
   ? / F1             Toggle this help
   q / Ctrl+C         Quit

 Press any key to close...
"#;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(help_text).block(block).wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}

// ============================================================================
// Helpers
// ============================================================================

/// Renders a text input field
pub fn render_input<'a>(content: String, title: &'a str, is_focused: bool) -> Paragraph<'a> {
    let style = if is_focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let block = Block::default().borders(Borders::ALL).border_style(style).title(title);

    Paragraph::new(content).block(block)
}

/// Put the terminal cursor inside a bordered input
fn place_cursor(f: &mut Frame, input: &TextInput, area: Rect) {
    let column = u16::try_from(input.cursor_column()).unwrap_or(u16::MAX);
    let x = area.x.saturating_add(1).saturating_add(column);
    let max_x = area.right().saturating_sub(2);
    f.set_cursor_position((x.min(max_x), area.y + 1));
}

fn notice_line(notice: &Notice) -> Paragraph<'static> {
    Paragraph::new(format!(" {}", notice.text)).style(Style::default().fg(notice_color(notice.kind)))
}

pub fn notice_color(kind: NoticeKind) -> Color {
    match kind {
        NoticeKind::Error => Color::Red,
        NoticeKind::Info => Color::Cyan,
        NoticeKind::Success => Color::Green,
    }
}

pub fn status_color(status: CourseStatus) -> Color {
    match status {
        CourseStatus::Draft => Color::Yellow,
        CourseStatus::Published => Color::Green,
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Fixed-size box centered in `r`, shrunk to fit
fn centered_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let width = width.min(r.width);
    let height = height.min(r.height);
    Rect {
        x: r.x + (r.width - width) / 2,
        y: r.y + (r.height - height) / 2,
        width,
        height,
    }
}
