use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Upper bound both upstream APIs put on a single page
pub const MAX_PAGE_SIZE: u32 = 100;

#[derive(Clone, Debug)]
pub struct Config {
    /// GitHub REST API base URL
    pub github_api_url: String,
    /// GitHub web base URL, used to template profile/tree/commit links
    pub github_web_url: String,
    /// `per_page` sent to GitHub (clamped to 1..=100)
    pub github_page_size: u32,
    /// StackExchange API base URL (including the version segment)
    pub stackexchange_api_url: String,
    /// StackExchange site the user id belongs to
    pub stackexchange_site: String,
    /// StackExchange sparse-field filter
    pub stackexchange_filter: String,
    /// `pagesize` sent to StackExchange (clamped to 1..=100)
    pub stackexchange_page_size: u32,
    /// Optional stop on pages fetched per pipeline; `None` fetches every page
    pub max_pages: Option<u32>,
    /// Caller-level timeout around one aggregation; `None` waits indefinitely
    pub aggregate_timeout: Option<Duration>,
    pub user_agent: String,
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            github_api_url: "https://api.github.com".to_string(),
            github_web_url: "https://github.com".to_string(),
            github_page_size: MAX_PAGE_SIZE,
            stackexchange_api_url: "https://api.stackexchange.com/2.2".to_string(),
            stackexchange_site: "stackoverflow".to_string(),
            stackexchange_filter: "!))yem8S".to_string(),
            stackexchange_page_size: MAX_PAGE_SIZE,
            max_pages: None,
            aggregate_timeout: Some(Duration::from_secs(30)),
            user_agent: format!("devfeed/{}", env!("CARGO_PKG_VERSION")),
            port: 8080,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        Self {
            github_api_url: env::var("GITHUB_API_URL").unwrap_or(defaults.github_api_url),
            github_web_url: env::var("GITHUB_WEB_URL").unwrap_or(defaults.github_web_url),
            github_page_size: clamp_page_size(parse_var(
                "GITHUB_PAGE_SIZE",
                defaults.github_page_size,
            )),
            stackexchange_api_url: env::var("STACKEXCHANGE_API_URL")
                .unwrap_or(defaults.stackexchange_api_url),
            stackexchange_site: env::var("STACKEXCHANGE_SITE")
                .unwrap_or(defaults.stackexchange_site),
            stackexchange_filter: env::var("STACKEXCHANGE_FILTER")
                .unwrap_or(defaults.stackexchange_filter),
            stackexchange_page_size: clamp_page_size(parse_var(
                "STACKEXCHANGE_PAGE_SIZE",
                defaults.stackexchange_page_size,
            )),
            max_pages: page_limit(parse_var("MAX_PAGES", defaults.max_pages.unwrap_or(0))),
            aggregate_timeout: timeout_secs(parse_var(
                "AGGREGATE_TIMEOUT_SECS",
                defaults.aggregate_timeout.map_or(0, |t| t.as_secs()),
            )),
            user_agent: env::var("HTTP_USER_AGENT").unwrap_or(defaults.user_agent),
            port: parse_var("PORT", defaults.port),
        }
    }
}

/// Requests must never exceed the upstream page cap
pub fn clamp_page_size(size: u32) -> u32 {
    size.clamp(1, MAX_PAGE_SIZE)
}

/// 0 means unbounded
pub fn page_limit(pages: u32) -> Option<u32> {
    (pages > 0).then_some(pages)
}

/// 0 means no timeout
pub fn timeout_secs(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}

fn parse_var<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
