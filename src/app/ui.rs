//! UI rendering for the TUI

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, Paragraph, Wrap},
};
use ratatui_image::StatefulImage;

use super::state::{AppState, ComposeField, FeedLoad, LoginField, Mode, Screen};

/// MyCircle icon
const ICON: &str = "📷";

/// Main render function
pub fn render(frame: &mut Frame, state: &mut AppState) {
    let colors = state.theme.colors();

    // Set background
    let area = frame.area();
    let bg_block = Block::default().style(Style::default().bg(colors.bg));
    frame.render_widget(bg_block, area);

    match state.screen {
        Screen::Login => render_login(frame, state),
        Screen::Feed => render_feed(frame, state),
    }

    // Render modal dialogs
    match state.mode {
        Mode::Help => render_help_popup(frame, state),
        Mode::Compose => render_compose_popup(frame, state),
        Mode::Comment => render_comment_popup(frame, state),
        Mode::ConfirmDelete => render_confirm_delete(frame, state),
        Mode::Normal => {}
    }

    render_snackbar(frame, state);
}

// ==================== Login screen ====================

fn render_login(frame: &mut Frame, state: &AppState) {
    let colors = state.theme.colors();
    let area = centered_rect(frame.area(), 44, 14);

    let block = Block::default()
        .title(format!(" {ICON} MyCircle "))
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(colors.block_focus());
    let inner = block.inner(area);
    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // "Login"
            Constraint::Length(1),
            Constraint::Length(3), // Email
            Constraint::Length(3), // Password
            Constraint::Length(1), // hint
            Constraint::Min(1),    // error line
        ])
        .split(inner);

    let title = Paragraph::new(Line::styled(
        "Login",
        colors.text_primary().add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    render_input(
        frame,
        state,
        chunks[2],
        "Email",
        &state.login.email,
        state.login.focus == LoginField::Email,
    );

    let masked = "•".repeat(state.login.password.chars().count());
    render_input(
        frame,
        state,
        chunks[3],
        "Password",
        &masked,
        state.login.focus == LoginField::Password,
    );

    let hint = if state.login.submitting {
        Line::styled("Signing in...", colors.text_dim())
    } else {
        Line::from(vec![
            Span::styled("Enter", colors.key_hint()),
            Span::styled(" sign in  ", colors.text_dim()),
            Span::styled("Tab", colors.key_hint()),
            Span::styled(" switch field", colors.text_dim()),
        ])
    };
    frame.render_widget(Paragraph::new(hint).alignment(Alignment::Center), chunks[4]);

    if !state.login.status.is_empty() {
        let error = Paragraph::new(Line::styled(
            state.login.status.clone(),
            colors.text_error(),
        ))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
        frame.render_widget(error, chunks[5]);
    }
}

fn render_input(
    frame: &mut Frame,
    state: &AppState,
    area: Rect,
    label: &str,
    value: &str,
    focused: bool,
) {
    let colors = state.theme.colors();
    let border = if focused {
        colors.block_focus()
    } else {
        colors.block()
    };

    let mut text = value.to_string();
    if focused {
        text.push('▏');
    }

    let input = Paragraph::new(Line::styled(text, colors.text())).block(
        Block::default()
            .title(format!(" {label} "))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border),
    );
    frame.render_widget(input, area);
}

// ==================== Feed screen ====================

fn render_feed(frame: &mut Frame, state: &mut AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_header(frame, state, chunks[0]);
    render_status_bar(frame, state, chunks[2]);

    let main = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[1]);

    render_post_list(frame, state, main[0]);
    render_post_detail(frame, state, main[1]);
}

fn render_header(frame: &mut Frame, state: &AppState, area: Rect) {
    let colors = state.theme.colors();

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            format!(" {ICON} MyCircle "),
            colors.text_primary().add_modifier(Modifier::BOLD),
        ),
        Span::styled("· Profile", colors.text_dim()),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(colors.block()),
    );
    frame.render_widget(header, area);
}

fn render_post_list(frame: &mut Frame, state: &AppState, area: Rect) {
    let colors = state.theme.colors();

    let block = Block::default()
        .title(" Posts ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(colors.block_focus());

    match &state.feed.load {
        FeedLoad::Loading => {
            let loading = Paragraph::new(vec![
                Line::from(""),
                Line::styled("  Loading posts...", colors.text_dim()),
            ])
            .block(block);
            frame.render_widget(loading, area);
        }
        FeedLoad::Failed(message) => {
            let failed = Paragraph::new(vec![
                Line::from(""),
                Line::styled(format!("  {message}"), colors.text_error()),
                Line::from(""),
                Line::from(vec![
                    Span::styled("  r", colors.key_hint()),
                    Span::styled(" retry", colors.text_dim()),
                ]),
            ])
            .block(block);
            frame.render_widget(failed, area);
        }
        FeedLoad::Loaded if state.feed.posts.is_empty() => {
            let empty = Paragraph::new(vec![
                Line::from(""),
                Line::styled("  No posts yet", colors.text_dim()),
                Line::from(""),
                Line::from(vec![
                    Span::styled("  n", colors.key_hint()),
                    Span::styled(" create the first one", colors.text_dim()),
                ]),
            ])
            .block(block);
            frame.render_widget(empty, area);
        }
        FeedLoad::Loaded => {
            let width = area.width.saturating_sub(6) as usize;
            let items: Vec<ListItem> = state
                .feed
                .posts
                .iter()
                .enumerate()
                .map(|(i, post)| {
                    let selected = i == state.feed.selected;
                    let marker = if selected { "● " } else { "  " };
                    let style = if selected {
                        colors.selected()
                    } else {
                        colors.text()
                    };
                    let image_tag = if post.has_image() { " 🖼" } else { "" };
                    ListItem::new(Line::from(vec![
                        Span::styled(marker, colors.text_primary()),
                        Span::styled(format!("@{}", post.author()), style),
                        Span::styled(
                            format!("  {}{image_tag}", post.preview(width)),
                            if selected { colors.selected() } else { colors.text_dim() },
                        ),
                    ]))
                })
                .collect();

            frame.render_widget(List::new(items).block(block), area);
        }
    }
}

fn render_post_detail(frame: &mut Frame, state: &mut AppState, area: Rect) {
    let colors = state.theme.colors();

    let block = Block::default()
        .title(" Post ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(colors.block());

    let Some(post) = state.feed.selected_post().cloned() else {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::styled("  Select a post", colors.text_dim()),
        ])
        .block(block);
        frame.render_widget(empty, area);
        return;
    };

    let wrap_width = area.width.saturating_sub(4).max(10) as usize;
    let mut lines: Vec<Line> = vec![
        Line::from(vec![
            Span::styled(
                format!(" @{}", post.author()),
                colors.text().add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  #{}", post.id), colors.text_dim()),
        ]),
        Line::from(""),
    ];

    for wrapped in textwrap::wrap(&post.title, wrap_width) {
        lines.push(Line::styled(format!(" {wrapped}"), colors.text()));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(" ♥ ", colors.text_error()),
        Span::styled(
            format!("{} likes", state.feed.like_count(post.id)),
            colors.text(),
        ),
        Span::styled("   l", colors.key_hint()),
        Span::styled(" like  ", colors.text_dim()),
        Span::styled("c", colors.key_hint()),
        Span::styled(" comment  ", colors.text_dim()),
        Span::styled("s", colors.key_hint()),
        Span::styled(" share  ", colors.text_dim()),
        Span::styled("d", colors.key_hint()),
        Span::styled(" delete", colors.text_dim()),
    ]));
    lines.push(Line::from(""));

    if state.feed.comments_for == Some(post.id) {
        lines.push(Line::styled(
            " Comments",
            colors.text().add_modifier(Modifier::BOLD),
        ));
        if state.feed.comments.is_empty() {
            lines.push(Line::styled("  No comments yet", colors.text_dim()));
        }
        for comment in &state.feed.comments {
            for wrapped in textwrap::wrap(&comment.text, wrap_width.saturating_sub(2)) {
                lines.push(Line::styled(format!("  · {wrapped}"), colors.text_dim()));
            }
        }
    }

    // Split the detail area only when the post image is ready
    let show_image =
        state.config.show_images && state.feed.image_protocols.contains_key(&post.id);

    let (text_area, image_area) = if show_image {
        let areas = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(8),     // Text content
                Constraint::Length(12), // Image area
            ])
            .split(area);
        (areas[0], Some(areas[1]))
    } else {
        (area, None)
    };

    let detail = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(detail, text_area);

    if let Some(img_area) = image_area {
        let inner_area = Rect {
            x: img_area.x + 2,
            y: img_area.y,
            width: img_area.width.saturating_sub(4),
            height: img_area.height,
        };

        if let Some(protocol) = state.feed.image_protocols.get_mut(&post.id) {
            let image_widget = StatefulImage::new();
            frame.render_stateful_widget(image_widget, inner_area, protocol);
        }
    }
}

fn render_status_bar(frame: &mut Frame, state: &AppState, area: Rect) {
    let colors = state.theme.colors();

    let line = if state.status.is_empty() {
        Line::from(vec![
            Span::styled(" j/k", colors.key_hint()),
            Span::styled(" move  ", colors.text_dim()),
            Span::styled("n", colors.key_hint()),
            Span::styled(" new post  ", colors.text_dim()),
            Span::styled("r", colors.key_hint()),
            Span::styled(" refresh  ", colors.text_dim()),
            Span::styled("?", colors.key_hint()),
            Span::styled(" help  ", colors.text_dim()),
            Span::styled("q", colors.key_hint()),
            Span::styled(" quit", colors.text_dim()),
        ])
    } else {
        Line::styled(format!(" {}", state.status), colors.text_dim())
    };

    frame.render_widget(Paragraph::new(line), area);
}

// ==================== Popups ====================

fn render_confirm_delete(frame: &mut Frame, state: &AppState) {
    let colors = state.theme.colors();
    let area = centered_rect(frame.area(), 46, 8);

    let block = Block::default()
        .title(" Delete post ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(colors.text_warning());
    let inner = block.inner(area);
    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    let caption = state
        .feed
        .pending_delete
        .as_ref()
        .map(|p| p.preview(30))
        .unwrap_or_default();

    let body = Paragraph::new(vec![
        Line::from(""),
        Line::styled(
            "Are you sure you want to delete your post?",
            colors.text(),
        ),
        Line::styled(format!("\"{caption}\""), colors.text_dim()),
        Line::from(""),
        Line::from(vec![
            Span::styled("y", colors.key_hint()),
            Span::styled(" confirm   ", colors.text_dim()),
            Span::styled("n", colors.key_hint()),
            Span::styled(" keep it", colors.text_dim()),
        ]),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });
    frame.render_widget(body, inner);
}

fn render_compose_popup(frame: &mut Frame, state: &AppState) {
    let colors = state.theme.colors();
    let area = centered_rect(frame.area(), 56, 12);

    let block = Block::default()
        .title(" New post ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(colors.block_focus());
    let inner = block.inner(area);
    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // image path
            Constraint::Length(3), // caption
            Constraint::Length(1),
            Constraint::Min(1), // hints
        ])
        .split(inner);

    render_input(
        frame,
        state,
        chunks[0],
        "Image file",
        &state.feed.compose_image,
        state.feed.compose_focus == ComposeField::ImagePath,
    );
    render_input(
        frame,
        state,
        chunks[1],
        "Caption",
        &state.feed.compose_caption,
        state.feed.compose_focus == ComposeField::Caption,
    );

    let hint = if state.feed.uploading {
        Line::styled("Uploading...", colors.text_warning())
    } else {
        Line::from(vec![
            Span::styled("Enter", colors.key_hint()),
            Span::styled(" upload  ", colors.text_dim()),
            Span::styled("Tab", colors.key_hint()),
            Span::styled(" switch field  ", colors.text_dim()),
            Span::styled("Esc", colors.key_hint()),
            Span::styled(" cancel", colors.text_dim()),
        ])
    };
    frame.render_widget(Paragraph::new(hint).alignment(Alignment::Center), chunks[3]);
}

fn render_comment_popup(frame: &mut Frame, state: &AppState) {
    let colors = state.theme.colors();
    let area = centered_rect(frame.area(), 56, 9);

    let block = Block::default()
        .title(" Add comment ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(colors.block_focus());
    let inner = block.inner(area);
    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(1), Constraint::Min(1)])
        .split(inner);

    render_input(
        frame,
        state,
        chunks[0],
        "Comment",
        &state.feed.comment_input,
        true,
    );

    let hint = Line::from(vec![
        Span::styled("Enter", colors.key_hint()),
        Span::styled(" post  ", colors.text_dim()),
        Span::styled("Esc", colors.key_hint()),
        Span::styled(" cancel", colors.text_dim()),
    ]);
    frame.render_widget(Paragraph::new(hint).alignment(Alignment::Center), chunks[2]);
}

fn render_help_popup(frame: &mut Frame, state: &AppState) {
    let colors = state.theme.colors();
    let area = centered_rect(frame.area(), 46, 16);

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(colors.block_focus());
    let inner = block.inner(area);
    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    let key = |k: &str, desc: &str| {
        Line::from(vec![
            Span::styled(format!("  {k:<8}"), colors.key_hint()),
            Span::styled(desc.to_string(), colors.text()),
        ])
    };

    let body = Paragraph::new(vec![
        Line::styled(" Navigation", colors.text_dim()),
        key("j/k", "move selection"),
        key("g/G", "jump to top/bottom"),
        Line::from(""),
        Line::styled(" Actions", colors.text_dim()),
        key("n", "new post"),
        key("c", "comment on post"),
        key("l", "like post"),
        key("s", "share post"),
        key("d", "delete post"),
        key("r", "refresh feed"),
        Line::from(""),
        Line::styled(" View", colors.text_dim()),
        key("t", "cycle theme"),
        key("q", "quit"),
    ]);
    frame.render_widget(body, inner);
}

fn render_snackbar(frame: &mut Frame, state: &AppState) {
    let Some(snackbar) = &state.snackbar else {
        return;
    };
    let colors = state.theme.colors();

    let area = frame.area();
    let width = (snackbar.notice.message().len() as u16 + 4).min(area.width);
    let bar = Rect {
        x: area.width.saturating_sub(width) / 2,
        y: area.height.saturating_sub(3),
        width,
        height: 1,
    };

    let style = if snackbar.notice.is_error() {
        Style::default().bg(colors.error).fg(colors.bg)
    } else {
        Style::default().bg(colors.success).fg(colors.bg)
    };

    frame.render_widget(Clear, bar);
    frame.render_widget(
        Paragraph::new(Line::from(snackbar.notice.message()))
            .alignment(Alignment::Center)
            .style(style),
        bar,
    );
}

/// Center a fixed-size rect inside `area`.
fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}
