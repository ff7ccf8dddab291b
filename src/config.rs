use crate::cli::Cli;

pub const DEFAULT_GITHUB_USERNAME: &str = "tpoulianas";
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Page settings, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortfolioConfig {
    pub github_username: String,
    /// Form-relay endpoint; empty means the contact form is not set up.
    pub formspree_endpoint: String,
    pub github_api_base: String,
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        Self {
            github_username: DEFAULT_GITHUB_USERNAME.to_string(),
            formspree_endpoint: String::new(),
            github_api_base: DEFAULT_API_BASE.to_string(),
        }
    }
}

impl From<&Cli> for PortfolioConfig {
    fn from(cli: &Cli) -> Self {
        Self {
            github_username: cli.github_username.clone(),
            formspree_endpoint: cli.formspree_endpoint.clone(),
            github_api_base: cli.api_base.clone(),
        }
    }
}
