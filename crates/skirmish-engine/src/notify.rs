//! Game-over collaborators: announcing the result and moving on.

use tracing::info;

/// Presents a message to the players.
pub trait Notifier {
    /// Shows `message`. Never blocks the simulation.
    fn notify(&mut self, message: &str);
}

/// Transitions to whatever follows a finished match.
pub trait Navigator {
    /// Requests a transition to `destination`.
    fn navigate(&mut self, destination: &str);
}

/// Notifier that logs each message and keeps a copy.
#[derive(Debug, Default)]
pub struct LogNotifier {
    messages: Vec<String>,
}

impl LogNotifier {
    /// Creates an empty notifier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages shown so far.
    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.messages
    }
}

impl Notifier for LogNotifier {
    fn notify(&mut self, message: &str) {
        info!("{}", message.replace('\n', " "));
        self.messages.push(message.to_string());
    }
}

/// Navigator that logs each request and remembers the destinations.
#[derive(Debug, Default)]
pub struct LogNavigator {
    visited: Vec<String>,
}

impl LogNavigator {
    /// Creates a navigator with no history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Destinations requested so far.
    #[must_use]
    pub fn visited(&self) -> &[String] {
        &self.visited
    }
}

impl Navigator for LogNavigator {
    fn navigate(&mut self, destination: &str) {
        info!(destination, "Navigating");
        self.visited.push(destination.to_string());
    }
}
