//! Application state
//!
//! Each screen owns its own state struct; nothing is shared across
//! screens. Feed-local data (likes, comment list, modal visibility)
//! lives and dies with the feed screen.

use std::collections::HashMap;

use ratatui_image::protocol::StatefulProtocol;

use crate::config::Config;
use crate::models::{Comment, Post};
use crate::theme::Theme;

/// How long a snackbar stays up, in event-loop ticks (~50ms each)
const SNACKBAR_TICKS: u16 = 60;

/// Which screen is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// Credential entry
    #[default]
    Login,
    /// The post feed
    Feed,
}

/// Modal/input mode within the feed screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Browsing the feed
    #[default]
    Normal,
    /// Composing a new post (image path + caption)
    Compose,
    /// Writing a comment for the selected post
    Comment,
    /// Delete confirmation prompt
    ConfirmDelete,
    /// Keybinding help
    Help,
}

/// Which login field has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    /// Email input
    #[default]
    Email,
    /// Password input
    Password,
}

impl LoginField {
    /// The other field.
    pub const fn toggle(self) -> Self {
        match self {
            Self::Email => Self::Password,
            Self::Password => Self::Email,
        }
    }
}

/// Which compose field has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ComposeField {
    /// Path to the image file to upload
    #[default]
    ImagePath,
    /// Caption text
    Caption,
}

impl ComposeField {
    /// The other field.
    pub const fn toggle(self) -> Self {
        match self {
            Self::ImagePath => Self::Caption,
            Self::Caption => Self::ImagePath,
        }
    }
}

/// Transient notification kinds (snackbar)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// A post was created
    PostCreated,
    /// A post was deleted
    PostDeleted,
    /// Creating a post failed
    PostCreateFailed,
}

impl Notice {
    /// User-facing snackbar text.
    pub const fn message(&self) -> &'static str {
        match self {
            Self::PostCreated => "Post created successfully",
            Self::PostDeleted => "Post deleted successfully",
            Self::PostCreateFailed => "Error creating post",
        }
    }

    /// Whether this notice reports a failure.
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::PostCreateFailed)
    }
}

/// An active snackbar with its remaining display time
#[derive(Debug, Clone, Copy)]
pub struct Snackbar {
    /// What is being announced
    pub notice: Notice,
    /// Ticks left before auto-dismissal
    pub ticks_left: u16,
}

/// Login screen state
#[derive(Debug, Clone, Default)]
pub struct LoginState {
    /// Email input buffer
    pub email: String,
    /// Password input buffer
    pub password: String,
    /// Focused field
    pub focus: LoginField,
    /// Inline error under the form
    pub status: String,
    /// A login request is in flight
    pub submitting: bool,
}

impl LoginState {
    /// Mutable buffer for the focused field.
    pub fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            LoginField::Email => &mut self.email,
            LoginField::Password => &mut self.password,
        }
    }
}

/// Feed loading status; a failed load is distinct from an empty feed
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FeedLoad {
    /// Initial load (or reload) in flight
    #[default]
    Loading,
    /// Last reload succeeded
    Loaded,
    /// Last reload failed
    Failed(String),
}

/// Feed screen state
#[derive(Default)]
pub struct FeedState {
    /// Posts from the last successful reload
    pub posts: Vec<Post>,
    /// Selected post index
    pub selected: usize,
    /// Load status of the post list
    pub load: FeedLoad,

    /// Client-local like counters, keyed by post id.
    /// Never sent to the service; reset when the screen remounts.
    pub likes: HashMap<u64, u32>,

    /// Comment list for the post in `comments_for`
    pub comments: Vec<Comment>,
    /// Which post the loaded comments belong to
    pub comments_for: Option<u64>,
    /// Comment input buffer
    pub comment_input: String,

    /// Compose: caption buffer
    pub compose_caption: String,
    /// Compose: image file path buffer
    pub compose_image: String,
    /// Compose: focused field
    pub compose_focus: ComposeField,
    /// An upload is in flight
    pub uploading: bool,

    /// Post awaiting delete confirmation
    pub pending_delete: Option<Post>,

    /// Decoded render protocols for post images, keyed by post id
    pub image_protocols: HashMap<u64, StatefulProtocol>,
}

impl FeedState {
    /// Fresh feed state, as on first entering the screen.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the currently selected post
    pub fn selected_post(&self) -> Option<&Post> {
        self.posts.get(self.selected)
    }

    /// Move selection down
    pub fn select_next(&mut self) {
        if !self.posts.is_empty() {
            self.selected = (self.selected + 1).min(self.posts.len() - 1);
        }
    }

    /// Move selection up
    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Replace the post list after a reload.
    ///
    /// Decoded images belong to the previous list and are dropped.
    pub fn set_posts(&mut self, posts: Vec<Post>) {
        self.posts = posts;
        self.load = FeedLoad::Loaded;
        if self.selected >= self.posts.len() {
            self.selected = self.posts.len().saturating_sub(1);
        }
        self.image_protocols.clear();
    }

    /// Like counter for a post.
    pub fn like_count(&self, post_id: u64) -> u32 {
        self.likes.get(&post_id).copied().unwrap_or(0)
    }

    /// Bump the local like counter for a post. No network call.
    pub fn increment_like(&mut self, post_id: u64) {
        *self.likes.entry(post_id).or_insert(0) += 1;
    }

    /// Clear compose inputs (after a successful upload or a cancel).
    pub fn clear_compose(&mut self) {
        self.compose_caption.clear();
        self.compose_image.clear();
        self.compose_focus = ComposeField::default();
        self.uploading = false;
    }

    /// Validate the comment input for the given post.
    ///
    /// Returns the text to submit, or `None` for empty input, which is
    /// a logged no-op: no request is issued and the list is untouched.
    pub fn submit_comment(&self, post_id: u64) -> Option<String> {
        if self.comment_input.is_empty() {
            tracing::debug!("Comment text is empty, nothing to post for post {post_id}");
            return None;
        }
        Some(self.comment_input.clone())
    }
}

/// Application state
pub struct AppState {
    /// Configuration
    pub config: Config,
    /// Current theme
    pub theme: Theme,
    /// Active screen
    pub screen: Screen,
    /// Feed modal mode
    pub mode: Mode,
    /// Login screen state
    pub login: LoginState,
    /// Feed screen state
    pub feed: FeedState,
    /// Active snackbar, if any
    pub snackbar: Option<Snackbar>,
    /// Status message (bottom bar)
    pub status: String,
    /// Whether to quit
    pub should_quit: bool,

    /// Tick counter for animations
    tick: u64,
}

impl AppState {
    /// Create a new app state on the login screen.
    pub fn new(config: Config) -> Self {
        let theme = config.theme;
        Self {
            config,
            theme,
            screen: Screen::default(),
            mode: Mode::default(),
            login: LoginState::default(),
            feed: FeedState::new(),
            snackbar: None,
            status: String::new(),
            should_quit: false,
            tick: 0,
        }
    }

    /// Tick for animations and snackbar expiry
    pub fn tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);

        if let Some(snackbar) = &mut self.snackbar {
            snackbar.ticks_left = snackbar.ticks_left.saturating_sub(1);
            if snackbar.ticks_left == 0 {
                self.snackbar = None;
            }
        }
    }

    /// Set status message
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status = msg.into();
    }

    /// Clear status message
    pub fn clear_status(&mut self) {
        self.status.clear();
    }

    /// Raise a snackbar.
    pub fn show_notice(&mut self, notice: Notice) {
        self.snackbar = Some(Snackbar {
            notice,
            ticks_left: SNACKBAR_TICKS,
        });
    }

    /// Switch to the feed screen with freshly mounted state.
    pub fn enter_feed(&mut self) {
        self.screen = Screen::Feed;
        self.mode = Mode::Normal;
        self.feed = FeedState::new();
    }

    /// Open the compose modal.
    pub fn open_compose(&mut self) {
        self.mode = Mode::Compose;
    }

    /// Close the compose modal, dropping its inputs.
    pub fn close_compose(&mut self) {
        self.feed.clear_compose();
        self.mode = Mode::Normal;
    }

    /// Cycle through themes
    pub fn next_theme(&mut self) {
        self.theme = self.theme.next();
        self.config.theme = self.theme;
    }
}
