//! Read-only application configuration.
//!
//! Consumed by frontends, never by the engine itself: project URLs shown
//! in an about screen and the input limit for the score entry field.

use serde::Deserialize;

/// Application-level settings with built-in defaults.
///
/// A frontend may deserialize overrides from its own config file; missing
/// fields fall back to the defaults.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    /// Project website.
    pub website_url: String,
    /// Source repository.
    pub github_url: String,
    /// Social media link shown on the about screen.
    pub instagram_url: String,
    /// Maximum number of text lines accepted by the score entry field.
    pub max_lines_for_enter_text: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            website_url: "https://fredplus10.me".to_owned(),
            github_url: "https://github.com/vatbub/Scoreboard".to_owned(),
            instagram_url: "https://www.instagram.com/vatbub/".to_owned(),
            max_lines_for_enter_text: 5,
        }
    }
}
