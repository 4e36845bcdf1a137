//! Event handling

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::async_ops::AsyncCommand;
use super::state::{AppState, ComposeField, FeedLoad, Mode, Screen};
use crate::share;

/// Handle key events, returning an optional async command
pub fn handle_key(state: &mut AppState, key: KeyEvent) -> Option<AsyncCommand> {
    // Ctrl+C quits from anywhere
    if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return None;
    }

    match state.screen {
        Screen::Login => handle_login_key(state, key),
        Screen::Feed => match state.mode {
            Mode::Normal => handle_feed_key(state, key),
            Mode::Compose => handle_compose_key(state, key),
            Mode::Comment => handle_comment_key(state, key),
            Mode::ConfirmDelete => handle_confirm_delete_key(state, key),
            Mode::Help => {
                if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Enter) {
                    state.mode = Mode::Normal;
                }
                None
            }
        },
    }
}

fn handle_login_key(state: &mut AppState, key: KeyEvent) -> Option<AsyncCommand> {
    match key.code {
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            state.login.focus = state.login.focus.toggle();
            None
        }
        KeyCode::Enter => {
            if state.login.submitting {
                return None;
            }
            state.login.submitting = true;
            state.login.status.clear();
            state.set_status("Signing in...");
            Some(AsyncCommand::Login {
                email: state.login.email.clone(),
                password: state.login.password.clone(),
            })
        }
        KeyCode::Backspace => {
            state.login.focused_mut().pop();
            None
        }
        KeyCode::Char(c) => {
            state.login.focused_mut().push(c);
            None
        }
        KeyCode::Esc => {
            state.login.status.clear();
            None
        }
        _ => None,
    }
}

fn handle_feed_key(state: &mut AppState, key: KeyEvent) -> Option<AsyncCommand> {
    match (key.modifiers, key.code) {
        (_, KeyCode::Char('q')) => {
            state.should_quit = true;
            None
        }
        (_, KeyCode::Char('?')) | (_, KeyCode::F(1)) => {
            state.mode = Mode::Help;
            None
        }

        // Navigation
        (_, KeyCode::Char('j') | KeyCode::Down) => {
            state.feed.select_next();
            None
        }
        (_, KeyCode::Char('k') | KeyCode::Up) => {
            state.feed.select_prev();
            None
        }
        (_, KeyCode::Char('g')) => {
            state.feed.selected = 0;
            None
        }
        (KeyModifiers::SHIFT, KeyCode::Char('G')) => {
            if !state.feed.posts.is_empty() {
                state.feed.selected = state.feed.posts.len() - 1;
            }
            None
        }

        // Refresh
        (_, KeyCode::Char('r')) => {
            if state.feed.load == FeedLoad::Loading {
                None
            } else {
                state.feed.load = FeedLoad::Loading;
                state.set_status("Loading posts...");
                Some(AsyncCommand::RefreshPosts)
            }
        }

        // Compose a new post
        (_, KeyCode::Char('n')) => {
            state.open_compose();
            None
        }

        // Comment on the selected post
        (_, KeyCode::Char('c')) => {
            let post_id = state.feed.selected_post().map(|p| p.id)?;
            state.mode = Mode::Comment;
            Some(AsyncCommand::LoadComments { post_id })
        }

        // Delete the selected post (asks for confirmation first)
        (_, KeyCode::Char('d')) => {
            if let Some(post) = state.feed.selected_post().cloned() {
                state.feed.pending_delete = Some(post);
                state.mode = Mode::ConfirmDelete;
            }
            None
        }

        // Like: purely client-local, no request
        (_, KeyCode::Char('l')) => {
            if let Some(post) = state.feed.selected_post() {
                let id = post.id;
                state.feed.increment_like(id);
            }
            None
        }

        // Share via the host opener; neither outcome is surfaced
        (_, KeyCode::Char('s')) => {
            if let Some(post) = state.feed.selected_post() {
                match share::share_post(post) {
                    Ok(share::ShareOutcome::Shared) => {}
                    Ok(share::ShareOutcome::Dismissed) => {}
                    Err(e) => tracing::warn!("Error sharing post: {e}"),
                }
            }
            None
        }

        (_, KeyCode::Char('t')) => {
            state.next_theme();
            state.set_status(format!("Theme: {}", state.theme.name()));
            None
        }

        (_, KeyCode::Esc) => {
            state.clear_status();
            None
        }

        _ => None,
    }
}

fn handle_compose_key(state: &mut AppState, key: KeyEvent) -> Option<AsyncCommand> {
    match key.code {
        KeyCode::Esc => {
            state.close_compose();
            None
        }
        KeyCode::Tab | KeyCode::BackTab => {
            state.feed.compose_focus = state.feed.compose_focus.toggle();
            None
        }
        KeyCode::Enter => {
            if state.feed.uploading {
                return None;
            }
            // Nothing to upload without an image file
            if state.feed.compose_image.is_empty() {
                state.set_status("Pick an image file first");
                return None;
            }
            state.feed.uploading = true;
            Some(AsyncCommand::CreatePost {
                image_path: state.feed.compose_image.clone(),
                caption: state.feed.compose_caption.clone(),
            })
        }
        KeyCode::Backspace => {
            match state.feed.compose_focus {
                ComposeField::ImagePath => state.feed.compose_image.pop(),
                ComposeField::Caption => state.feed.compose_caption.pop(),
            };
            None
        }
        KeyCode::Char(c) => {
            match state.feed.compose_focus {
                ComposeField::ImagePath => state.feed.compose_image.push(c),
                ComposeField::Caption => state.feed.compose_caption.push(c),
            }
            None
        }
        _ => None,
    }
}

fn handle_comment_key(state: &mut AppState, key: KeyEvent) -> Option<AsyncCommand> {
    match key.code {
        KeyCode::Esc => {
            // Closing the prompt keeps the typed text for next time
            state.mode = Mode::Normal;
            None
        }
        KeyCode::Enter => {
            state.mode = Mode::Normal;
            let post_id = state.feed.selected_post().map(|p| p.id)?;
            let text = state.feed.submit_comment(post_id)?;
            Some(AsyncCommand::AddComment { post_id, text })
        }
        KeyCode::Backspace => {
            state.feed.comment_input.pop();
            None
        }
        KeyCode::Char(c) => {
            state.feed.comment_input.push(c);
            None
        }
        _ => None,
    }
}

fn handle_confirm_delete_key(state: &mut AppState, key: KeyEvent) -> Option<AsyncCommand> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Enter => {
            state.mode = Mode::Normal;
            let post = state.feed.pending_delete.take()?;
            Some(AsyncCommand::DeletePost { post_id: post.id })
        }
        KeyCode::Char('n') | KeyCode::Esc => {
            state.feed.pending_delete = None;
            state.mode = Mode::Normal;
            None
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::models::Post;

    fn feed_state() -> AppState {
        let mut state = AppState::new(Config::default());
        state.enter_feed();
        state.feed.set_posts(vec![
            Post {
                id: 1,
                username: "nemo".to_string(),
                title: "first".to_string(),
                content: String::new(),
            },
            Post {
                id: 2,
                username: "ned".to_string(),
                title: "second".to_string(),
                content: String::new(),
            },
        ]);
        state
    }

    fn press(state: &mut AppState, code: KeyCode) -> Option<AsyncCommand> {
        handle_key(state, KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_like_issues_no_command() {
        let mut state = feed_state();
        let cmd = press(&mut state, KeyCode::Char('l'));
        assert!(cmd.is_none());
        assert_eq!(state.feed.like_count(1), 1);
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let mut state = feed_state();

        // Selecting delete only opens the prompt
        let cmd = press(&mut state, KeyCode::Char('d'));
        assert!(cmd.is_none());
        assert_eq!(state.mode, Mode::ConfirmDelete);

        // The request fires on explicit confirmation
        let cmd = press(&mut state, KeyCode::Char('y'));
        assert!(matches!(cmd, Some(AsyncCommand::DeletePost { post_id: 1 })));
        assert_eq!(state.mode, Mode::Normal);
    }

    #[test]
    fn test_delete_can_be_cancelled() {
        let mut state = feed_state();
        press(&mut state, KeyCode::Char('d'));
        let cmd = press(&mut state, KeyCode::Char('n'));
        assert!(cmd.is_none());
        assert!(state.feed.pending_delete.is_none());
    }

    #[test]
    fn test_empty_comment_submit_yields_no_command() {
        let mut state = feed_state();
        press(&mut state, KeyCode::Char('c'));
        let cmd = press(&mut state, KeyCode::Enter);
        assert!(cmd.is_none());
        assert_eq!(state.mode, Mode::Normal);
    }

    #[test]
    fn test_comment_submit_targets_selected_post() {
        let mut state = feed_state();
        press(&mut state, KeyCode::Char('j'));
        press(&mut state, KeyCode::Char('c'));
        for c in "hi".chars() {
            press(&mut state, KeyCode::Char(c));
        }
        let cmd = press(&mut state, KeyCode::Enter);
        match cmd {
            Some(AsyncCommand::AddComment { post_id, text }) => {
                assert_eq!(post_id, 2);
                assert_eq!(text, "hi");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_compose_without_image_stays_local() {
        let mut state = feed_state();
        press(&mut state, KeyCode::Char('n'));
        let cmd = press(&mut state, KeyCode::Enter);
        assert!(cmd.is_none());
        assert_eq!(state.mode, Mode::Compose);
    }

    #[test]
    fn test_login_enter_submits_credentials() {
        let mut state = AppState::new(Config::default());
        for c in "a@b".chars() {
            press(&mut state, KeyCode::Char(c));
        }
        press(&mut state, KeyCode::Tab);
        for c in "pw".chars() {
            press(&mut state, KeyCode::Char(c));
        }
        let cmd = press(&mut state, KeyCode::Enter);
        match cmd {
            Some(AsyncCommand::Login { email, password }) => {
                assert_eq!(email, "a@b");
                assert_eq!(password, "pw");
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(state.login.submitting);
    }
}
