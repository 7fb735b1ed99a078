/// Common test utilities and helpers for issuepad tests
use issuepad::{Config, Issue, Repository};

/// Builder-style helper for repository snapshots
#[derive(Debug, Clone)]
pub struct TestRepository {
    pub name: String,
    pub private: bool,
    pub has_issues: bool,
}

impl TestRepository {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            private: false,
            has_issues: true,
        }
    }

    pub fn without_issue_tracking(mut self) -> Self {
        self.has_issues = false;
        self
    }

    pub fn as_private(mut self) -> Self {
        self.private = true;
        self
    }

    pub fn build(self) -> Repository {
        Repository {
            name: self.name,
            private: self.private,
            has_issues: self.has_issues,
        }
    }
}

pub fn issue(title: &str, labels: &[&str]) -> Issue {
    Issue {
        title: title.to_string(),
        labels: labels.iter().map(|l| l.to_string()).collect(),
    }
}

/// Configuration matching the canonical sc3 scenario
pub fn sc3_config() -> Config {
    let mut config = Config::default();
    config.github.organization = "sc3".to_string();
    config.github.projects = vec!["sc3".to_string(), "cookcountyjail".to_string()];
    config.github.label = "in progress".to_string();
    config
}
