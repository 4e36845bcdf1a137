//! TUI Application module

mod async_ops;
mod events;
mod state;
mod ui;

pub use state::{AppState, FeedLoad, FeedState, LoginState, Mode, Notice, Screen};

use anyhow::Result;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use std::io::stdout;
use std::time::Duration;
use tokio::runtime::Runtime;

use crate::api::CircleClient;
use crate::auth::LoginOutcome;
use crate::config::Config;
use crate::demo;
use crate::images;

use async_ops::{AsyncCommand, AsyncHandle, AsyncResult, spawn_worker};

/// Run the TUI application
pub fn run() -> Result<()> {
    // Create tokio runtime
    let rt = Runtime::new()?;

    // Load config
    let config = Config::load()?;

    // Query terminal graphics support before entering raw mode
    if config.show_images {
        images::init_picker();
    }

    // Spawn async worker
    let api = CircleClient::new(&config.base_url, config.user_id);
    let async_handle = rt.block_on(async { spawn_worker(api) });

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Create app state (starts on the login screen)
    let mut state = AppState::new(config);

    // Main loop
    let result = run_app(&mut terminal, &mut state, async_handle);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    state: &mut AppState,
    mut async_handle: AsyncHandle,
) -> Result<()> {
    loop {
        // Process any async results
        while let Ok(result) = async_handle.result_rx.try_recv() {
            if let Some(cmd) = handle_async_result(state, result) {
                let _ = async_handle.cmd_tx.blocking_send(cmd);
            }
        }

        // Draw UI
        terminal.draw(|frame| ui::render(frame, state))?;

        // Handle events
        if event::poll(Duration::from_millis(50))?
            && let Event::Key(key) = event::read()?
            && let Some(cmd) = events::handle_key(state, key)
        {
            let _ = async_handle.cmd_tx.blocking_send(cmd);
        }

        // Decode the selected post's image for rendering
        prepare_selected_image(state);

        // Tick for animations and snackbar expiry
        state.tick();

        if state.should_quit {
            // Shutdown async worker
            let _ = async_handle.cmd_tx.blocking_send(AsyncCommand::Shutdown);
            break;
        }
    }

    // Save config on exit
    state.config.save()?;

    Ok(())
}

/// Decode the selected post's payload into a render protocol.
///
/// Payloads arrive inline with the post list, so this is a pure
/// in-memory decode; the protocols are dropped on every reload.
fn prepare_selected_image(state: &mut AppState) {
    if !state.config.show_images || state.screen != Screen::Feed {
        return;
    }

    let Some(post) = state.feed.selected_post().cloned() else {
        return;
    };
    if !post.has_image() || state.feed.image_protocols.contains_key(&post.id) {
        return;
    }

    if let Some(protocol) = images::protocol_for(&post) {
        state.feed.image_protocols.insert(post.id, protocol);
    }
}

fn handle_async_result(state: &mut AppState, result: AsyncResult) -> Option<AsyncCommand> {
    match result {
        AsyncResult::LoginFinished { outcome } => {
            state.login.submitting = false;
            state.clear_status();
            match outcome {
                LoginOutcome::Success => {
                    // Fresh feed state, then trigger the initial load
                    state.enter_feed();
                    state.set_status("Loading posts...");
                    return Some(AsyncCommand::RefreshPosts);
                }
                LoginOutcome::InvalidCredentials | LoginOutcome::Unavailable => {
                    state.login.status = outcome.message().unwrap_or_default().to_string();
                }
            }
            None
        }
        AsyncResult::PostsLoaded { posts } => {
            state.feed.set_posts(posts);
            state.set_status(format!("Loaded {} posts", state.feed.posts.len()));
            None
        }
        AsyncResult::PostsFailed { message } => {
            state.feed.load = FeedLoad::Failed(message);
            state.clear_status();
            None
        }
        AsyncResult::PostCreated => {
            // Success clears the compose form and closes the modal
            state.close_compose();
            state.show_notice(Notice::PostCreated);
            state.clear_status();
            None
        }
        AsyncResult::PostCreateFailed => {
            // The form keeps its inputs for a retry
            state.feed.uploading = false;
            state.show_notice(Notice::PostCreateFailed);
            state.clear_status();
            None
        }
        AsyncResult::PostDeleted => {
            state.show_notice(Notice::PostDeleted);
            None
        }
        AsyncResult::CommentsLoaded { post_id, comments } => {
            state.feed.comments = comments;
            state.feed.comments_for = Some(post_id);
            None
        }
        AsyncResult::CommentAdded { post_id: _ } => {
            state.feed.comment_input.clear();
            None
        }
        AsyncResult::Status { message } => {
            state.set_status(message);
            None
        }
    }
}

/// Run the TUI in demo mode with canned data (for screenshots)
pub fn run_demo() -> Result<()> {
    // Load config
    let config = Config::load()?;

    if config.show_images {
        images::init_picker();
    }

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Create app state with demo data, skipping the login screen
    let mut state = AppState::new(config);
    state.enter_feed();
    state.feed.set_posts(demo::demo_posts());
    state.set_status(format!(
        "Demo mode | {} posts | Press ? for help | q to quit",
        state.feed.posts.len()
    ));

    // Main loop (simpler, no worker: commands are dropped)
    loop {
        terminal.draw(|frame| ui::render(frame, &mut state))?;

        if event::poll(Duration::from_millis(50))?
            && let Event::Key(key) = event::read()?
        {
            let _ = events::handle_key(&mut state, key);
        }

        prepare_selected_image(&mut state);
        state.tick();

        if state.should_quit {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Save config on exit
    state.config.save()?;

    Ok(())
}
