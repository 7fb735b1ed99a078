use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use octocrab::Octocrab;
use std::env;
use std::process::Command;
use tracing::{debug, info, warn};

use crate::config::GitHubConfig;
use crate::error::RemoteError;
use crate::gateway::{Issue, Repository, SourceControlGateway};

/// GitHub client wrapper with authentication management
pub struct GitHubClient {
    client: Octocrab,
    username: String,
}

/// GitHub authentication strategies
#[derive(Debug, Clone)]
pub enum AuthStrategy {
    /// Use GitHub CLI authentication
    GitHubCLI,
    /// Use environment variable token
    EnvironmentToken,
}

impl GitHubClient {
    /// Create a new GitHub client with automatic authentication
    pub async fn new(config: &GitHubConfig) -> Result<Self> {
        let (auth_strategy, token) = Self::detect_authentication(config)?;

        info!("Using authentication strategy: {:?}", auth_strategy);

        let client = Octocrab::builder()
            .personal_token(token)
            .build()
            .context("Failed to create GitHub client")?;

        // Get authenticated user information
        let user = client
            .current()
            .user()
            .await
            .context("Failed to get current user information. Check your authentication.")?;

        let username = user.login.clone();

        info!("Authenticated as GitHub user: {}", username);

        Ok(Self { client, username })
    }

    /// Detect and obtain GitHub authentication
    fn detect_authentication(config: &GitHubConfig) -> Result<(AuthStrategy, String)> {
        match config.auth_method.as_str() {
            "auto" => {
                // Try GitHub CLI first, then environment token
                if let Ok(token) = Self::try_github_cli() {
                    Ok((AuthStrategy::GitHubCLI, token))
                } else if let Ok(token) = Self::try_environment_token() {
                    Ok((AuthStrategy::EnvironmentToken, token))
                } else {
                    Err(anyhow!(
                        "No GitHub authentication found. Please either:\n\
                         1. Install and authenticate GitHub CLI: gh auth login\n\
                         2. Set GITHUB_TOKEN environment variable\n\
                         3. Run: issuepad auth setup"
                    ))
                }
            }
            "gh_cli" => {
                let token = Self::try_github_cli()
                    .context("GitHub CLI authentication failed. Run: gh auth login")?;
                Ok((AuthStrategy::GitHubCLI, token))
            }
            "token" => {
                let token = Self::try_environment_token()
                    .context("GITHUB_TOKEN environment variable not found or invalid")?;
                Ok((AuthStrategy::EnvironmentToken, token))
            }
            other => Err(anyhow!("Unknown auth method: {}", other)),
        }
    }

    /// Try to get token from GitHub CLI
    fn try_github_cli() -> Result<String> {
        debug!("Attempting GitHub CLI authentication");

        // Check if gh CLI is installed
        if !Self::is_command_available("gh") {
            return Err(anyhow!("GitHub CLI (gh) is not installed"));
        }

        // Check if user is authenticated
        let auth_status = Command::new("gh")
            .args(["auth", "status"])
            .output()
            .context("Failed to check GitHub CLI auth status")?;

        if !auth_status.status.success() {
            return Err(anyhow!(
                "GitHub CLI is not authenticated. Run: gh auth login"
            ));
        }

        // Get the token
        let token_output = Command::new("gh")
            .args(["auth", "token"])
            .output()
            .context("Failed to get GitHub CLI token")?;

        if !token_output.status.success() {
            return Err(anyhow!(
                "Failed to retrieve token from GitHub CLI: {}",
                String::from_utf8_lossy(&token_output.stderr)
            ));
        }

        let token = String::from_utf8(token_output.stdout)
            .context("GitHub CLI token is not valid UTF-8")?
            .trim()
            .to_string();

        if token.is_empty() {
            return Err(anyhow!("GitHub CLI returned empty token"));
        }

        debug!("Successfully obtained token from GitHub CLI");
        Ok(token)
    }

    /// Try to get token from environment variable
    fn try_environment_token() -> Result<String> {
        debug!("Attempting environment variable authentication");

        let token =
            env::var("GITHUB_TOKEN").context("GITHUB_TOKEN environment variable not set")?;

        if token.is_empty() {
            return Err(anyhow!("GITHUB_TOKEN is empty"));
        }

        if !token.starts_with("ghp_") && !token.starts_with("gho_") && !token.starts_with("ghs_") {
            warn!("GITHUB_TOKEN doesn't look like a valid GitHub token (should start with ghp_, gho_, or ghs_)");
        }

        debug!("Successfully found GITHUB_TOKEN environment variable");
        Ok(token)
    }

    /// Check if a command is available in PATH
    fn is_command_available(command: &str) -> bool {
        Command::new("which")
            .arg(command)
            .output()
            .map(|output| output.status.success())
            .unwrap_or(false)
    }

    /// Get the authenticated username
    pub fn username(&self) -> &str {
        &self.username
    }

    /// List repositories for a specific organization
    async fn list_organization_repositories(&self, org: &str) -> Result<Vec<Repository>> {
        debug!("Fetching repositories for organization: {}", org);

        let mut repositories = Vec::new();
        let mut page = 1u8;

        loop {
            let page_repos = self
                .client
                .orgs(org)
                .list_repos()
                .per_page(100)
                .page(page)
                .send()
                .await
                .with_context(|| {
                    format!(
                        "Failed to fetch repositories for organization {} page {}",
                        org, page
                    )
                })?;

            let items = page_repos.items;
            if items.is_empty() {
                break;
            }

            repositories.extend(items.iter().map(repo_snapshot));

            // GitHub API pagination limit for u8
            if page >= 255 {
                warn!("Reached maximum pagination limit (255 pages) for org: {}", org);
                break;
            }
            page += 1;
        }

        info!(
            "Found {} repositories for organization: {}",
            repositories.len(),
            org
        );
        Ok(repositories)
    }

    /// List open issues for a repository
    async fn list_open_issues(&self, org: &str, repo: &str) -> Result<Vec<Issue>> {
        debug!("Fetching open issues for repository: {}/{}", org, repo);

        let mut issues = Vec::new();
        let mut page = 1u32;

        loop {
            let page_issues = self
                .client
                .issues(org, repo)
                .list()
                .state(octocrab::params::State::Open)
                .per_page(100)
                .page(page)
                .send()
                .await
                .with_context(|| {
                    format!("Failed to fetch issues for {}/{} page {}", org, repo, page)
                })?;

            let items = page_issues.items;
            if items.is_empty() {
                break;
            }

            // The issues endpoint also returns pull requests; skip them
            issues.extend(
                items
                    .iter()
                    .filter(|issue| issue.pull_request.is_none())
                    .map(issue_snapshot),
            );

            page += 1;
        }

        info!("Found {} open issues for {}/{}", issues.len(), org, repo);
        Ok(issues)
    }
}

/// Convert an octocrab repository model to our snapshot type.
///
/// Missing flags are treated conservatively: unknown visibility counts as
/// private, unknown tracking state counts as disabled.
fn repo_snapshot(repo: &octocrab::models::Repository) -> Repository {
    Repository {
        name: repo.name.clone(),
        private: repo.private.unwrap_or(true),
        has_issues: repo.has_issues.unwrap_or(false),
    }
}

fn issue_snapshot(issue: &octocrab::models::issues::Issue) -> Issue {
    Issue {
        title: issue.title.clone(),
        labels: issue.labels.iter().map(|l| l.name.clone()).collect(),
    }
}

#[async_trait]
impl SourceControlGateway for GitHubClient {
    async fn list_repositories(&self, org: &str) -> Result<Vec<Repository>, RemoteError> {
        self.list_organization_repositories(org)
            .await
            .map_err(|e| RemoteError::SourceControl(format!("{:#}", e)))
    }

    async fn list_issues(&self, org: &str, repo: &str) -> Result<Vec<Issue>, RemoteError> {
        self.list_open_issues(org, repo)
            .await
            .map_err(|e| RemoteError::SourceControl(format!("{:#}", e)))
    }
}

/// Utility functions for GitHub authentication setup
pub mod auth_setup {
    use super::*;

    /// Interactive authentication setup guide
    pub async fn setup_authentication() -> Result<()> {
        println!("🔧 issuepad Authentication Setup");
        println!();

        // Check if gh CLI is available
        if Command::new("which").arg("gh").output()?.status.success() {
            println!("✅ GitHub CLI (gh) is installed");

            // Check if already authenticated
            if Command::new("gh")
                .args(["auth", "status"])
                .output()?
                .status
                .success()
            {
                println!("✅ GitHub CLI is already authenticated");
                return Ok(());
            } else {
                println!("🔄 GitHub CLI needs authentication");
                println!("Run: gh auth login");
                return Ok(());
            }
        }

        // Suggest GitHub CLI installation
        println!("❌ GitHub CLI (gh) is not installed");
        println!();
        println!("Recommended setup:");
        println!("1. Install GitHub CLI:");

        #[cfg(target_os = "macos")]
        println!("   brew install gh");

        #[cfg(target_os = "linux")]
        println!("   See: https://github.com/cli/cli/blob/trunk/docs/install_linux.md");

        #[cfg(target_os = "windows")]
        println!("   winget install --id GitHub.cli");

        println!();
        println!("2. Authenticate:");
        println!("   gh auth login");
        println!();
        println!("Alternative: Set GITHUB_TOKEN environment variable");
        println!("   export GITHUB_TOKEN=your_token_here");

        Ok(())
    }

    /// Test current authentication
    pub async fn test_authentication(config: &GitHubConfig) -> Result<()> {
        println!("🔍 Testing GitHub authentication...");

        match GitHubClient::new(config).await {
            Ok(client) => {
                println!("✅ Authentication successful");
                println!("   Username: {}", client.username());

                if !config.organization.is_empty() {
                    match client.list_repositories(&config.organization).await {
                        Ok(repos) => {
                            println!(
                                "   Organization {}: {} repositories visible",
                                config.organization,
                                repos.len()
                            );
                        }
                        Err(e) => {
                            println!(
                                "⚠️  Could not list repositories for {}: {}",
                                config.organization, e
                            );
                        }
                    }
                }
            }
            Err(e) => {
                println!("❌ Authentication failed: {}", e);
                println!();
                println!("To fix this, run: issuepad auth setup");
            }
        }

        Ok(())
    }
}
