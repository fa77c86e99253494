// ABOUTME: Hierarchical tmux target addressing (session[:window[.pane]])

use std::fmt;

/// Address of a tmux session, window or pane.
///
/// Renders as `session:` for a bare session, `session:window` for a window
/// and `session:window.pane` for a pane.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Target {
    pub session: String,
    pub window: Option<String>,
    pub pane: Option<String>,
}

impl Target {
    pub fn session(session: impl Into<String>) -> Self {
        Self {
            session: session.into(),
            window: None,
            pane: None,
        }
    }

    #[must_use]
    pub fn with_window(mut self, window: impl Into<String>) -> Self {
        self.window = Some(window.into());
        self
    }

    #[must_use]
    pub fn with_pane(mut self, pane: impl Into<String>) -> Self {
        self.pane = Some(pane.into());
        self
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.session, self.window.as_deref().unwrap_or(""))?;
        if let Some(pane) = &self.pane {
            write!(f, ".{pane}")?;
        }
        Ok(())
    }
}
