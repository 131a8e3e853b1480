//! Operation: summarize a finished publication for the user.

use std::fmt;

use serde::Serialize;
use shipjar_core::config::ResolvedConfig;
use shipjar_maven::repository::SelectedRepository;

const RULE_WIDTH: usize = 100;

/// What was published and where.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublishReport {
    pub artifact_id: String,
    pub coordinate: String,
    pub location: String,
}

impl PublishReport {
    pub fn new(config: &ResolvedConfig, repository: &SelectedRepository) -> Self {
        Self {
            artifact_id: config.artifact_id.clone(),
            coordinate: config.coordinate(),
            location: repository.location().to_string(),
        }
    }

    /// `group:artifactId:version`.
    pub fn coordinate(&self) -> &str {
        &self.coordinate
    }

    /// Boxed multi-line summary.
    pub fn render(&self) -> String {
        let rule = "─".repeat(RULE_WIDTH);
        let title = "Your component published succeed!";
        let pad = (RULE_WIDTH.saturating_sub(title.len())) / 2;
        format!(
            "┌{rule}\n\
             |{:pad$}{title}\n\
             | Component artifactId: {}\n\
             | Component dependency url: implementation '{}'\n\
             | Published at: {}\n\
             └{rule}",
            "", self.artifact_id, self.coordinate, self.location
        )
    }
}

impl fmt::Display for PublishReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
