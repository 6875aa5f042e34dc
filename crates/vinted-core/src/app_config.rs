use std::time::Duration;

/// How a missing seller last-login timestamp is treated.
///
/// Site revisions disagree on whether the field is always present, so the
/// behavior is chosen at configuration time rather than hard-coded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LastLoginPolicy {
    /// Missing timestamp renders as an empty string.
    #[default]
    Lenient,
    /// Missing timestamp is a normalization error.
    Strict,
}

impl std::fmt::Display for LastLoginPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LastLoginPolicy::Lenient => write!(f, "lenient"),
            LastLoginPolicy::Strict => write!(f, "strict"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub user_agent: String,
    pub accept_language: String,
    /// Candidate courtesy delays; one is picked at random before each request.
    /// Empty disables pacing.
    pub pauses: Vec<Duration>,
    pub last_login_policy: LastLoginPolicy,
    pub wardrobe_page_size: u32,
}
