use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub server: ServerConfig,
    pub graphql: GraphQlConfig,
    pub history: HistoryConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GraphQlConfig {
    pub endpoint: String,
    pub timeout_secs: u64,
}

impl GraphQlConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HistoryConfig {
    /// Transfers requested per page.
    pub page_size: usize,
    pub ticker_query: TickerQueryMode,
    pub volume_gap_policy: VolumeGapPolicy,
    /// Windows resolved at the same time. 1 resolves them one after another.
    pub window_concurrency: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            page_size: 1000,
            ticker_query: TickerQueryMode::Scoped,
            volume_gap_policy: VolumeGapPolicy::Skip,
            window_concurrency: 1,
        }
    }
}

/// How the ticker at a block height is looked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TickerQueryMode {
    /// `ticker(block, id: token)`, a single ticker or null.
    Scoped,
    /// `tickers(block)`, a list of which the first entry is used.
    Unscoped,
}

impl FromStr for TickerQueryMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "scoped" => Ok(TickerQueryMode::Scoped),
            "unscoped" => Ok(TickerQueryMode::Unscoped),
            other => Err(format!("expected scoped or unscoped, got '{}'", other)),
        }
    }
}

impl fmt::Display for TickerQueryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TickerQueryMode::Scoped => f.write_str("scoped"),
            TickerQueryMode::Unscoped => f.write_str("unscoped"),
        }
    }
}

/// What a volume window does when the window before it has no transfers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VolumeGapPolicy {
    /// Emit no point for that window.
    Skip,
    /// Compare against a cumulative volume of zero.
    Zero,
}

impl FromStr for VolumeGapPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "skip" => Ok(VolumeGapPolicy::Skip),
            "zero" => Ok(VolumeGapPolicy::Zero),
            other => Err(format!("expected skip or zero, got '{}'", other)),
        }
    }
}

impl fmt::Display for VolumeGapPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VolumeGapPolicy::Skip => f.write_str("skip"),
            VolumeGapPolicy::Zero => f.write_str("zero"),
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let _ = dotenv::dotenv().ok();

        if std::env::var("GRAPHQL_ENDPOINT").is_err() {
            Self::print_config_help();
        }

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = HistoryConfig::default();

        let history = HistoryConfig {
            page_size: var_or_default(&lookup, "TRANSFER_PAGE_SIZE", defaults.page_size)?,
            ticker_query: var_or_default(&lookup, "TICKER_QUERY_MODE", defaults.ticker_query)?,
            volume_gap_policy: var_or_default(&lookup, "VOLUME_GAP_POLICY", defaults.volume_gap_policy)?,
            window_concurrency: var_or_default(&lookup, "WINDOW_CONCURRENCY", defaults.window_concurrency)?,
        };

        if history.page_size == 0 {
            return Err(anyhow::anyhow!("TRANSFER_PAGE_SIZE must be greater than 0"));
        }
        if history.window_concurrency == 0 {
            return Err(anyhow::anyhow!("WINDOW_CONCURRENCY must be greater than 0"));
        }

        Ok(Config {
            server: ServerConfig {
                host: var_or_default(&lookup, "SERVER_HOST", "0.0.0.0".to_string())?,
                port: var_or_default(&lookup, "SERVER_PORT", 3000)?,
            },
            graphql: GraphQlConfig {
                endpoint: required_var(&lookup, "GRAPHQL_ENDPOINT")?,
                timeout_secs: var_or_default(&lookup, "GRAPHQL_TIMEOUT_SECS", 30)?,
            },
            history,
        })
    }

    fn print_config_help() {
        println!("\n🔧 Configuration");
        println!("{}", "=".repeat(50));

        println!("[required]");
        println!("GRAPHQL_ENDPOINT=https://.../subgraphs/name/...\n");

        println!("[optional]");
        println!("SERVER_HOST=0.0.0.0");
        println!("SERVER_PORT=3000");
        println!("GRAPHQL_TIMEOUT_SECS=30");
        println!("TRANSFER_PAGE_SIZE=1000");
        println!("TICKER_QUERY_MODE=scoped      # scoped | unscoped");
        println!("VOLUME_GAP_POLICY=skip        # skip | zero");
        println!("WINDOW_CONCURRENCY=1\n");

        println!("{}", "=".repeat(50));
    }
}

fn var_or_default<F, T>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: fmt::Display,
{
    match lookup(key) {
        Some(val) => val
            .parse()
            .map_err(|e| anyhow::anyhow!("failed to parse {}: {}", key, e)),
        None => Ok(default),
    }
}

fn required_var<F>(lookup: &F, key: &str) -> anyhow::Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|val| !val.trim().is_empty())
        .ok_or_else(|| anyhow::anyhow!("missing required configuration: {}", key))
}
