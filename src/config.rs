//! Runtime configuration from environment variables.
//!
//! `main` loads a `.env` file first, so every variable below may also come
//! from there.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{TaskforgeError, TaskforgeResult};
use crate::judge::{JudgeOptions, PollPolicy};
use crate::model::TypePolicy;

const DEFAULT_JUDGE_URL: &str = "https://judge0-ce.p.rapidapi.com";
const DEFAULT_JUDGE_HOST: &str = "judge0-ce.p.rapidapi.com";
const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
const DEFAULT_MAX_TOKENS: u32 = 2048;
const DEFAULT_JUDGE_TIMEOUT_SECS: u64 = 30;

/// Where and how to reach the judge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JudgeEndpoint {
    /// Base URL without trailing slash.
    pub base_url: String,
    /// Sent as `x-rapidapi-key` when present.
    pub api_key: Option<String>,
    /// Sent as `x-rapidapi-host`.
    pub host: String,
    /// Upper bound on any single HTTP request to the judge.
    pub request_timeout: Duration,
}

/// Model parameters for collaborator calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmSettings {
    /// Model identifier.
    pub model: String,
    /// Completion budget.
    pub max_tokens: u32,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self { model: DEFAULT_MODEL.to_string(), max_tokens: DEFAULT_MAX_TOKENS }
    }
}

/// Everything the commands need from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Judge endpoint.
    pub judge: JudgeEndpoint,
    /// Collaborator model settings.
    pub llm: LlmSettings,
    /// Polling, fan-out and deadline for judging runs.
    pub judge_options: JudgeOptions,
    /// How validation treats unsupported types.
    pub type_policy: TypePolicy,
    /// When set, port traffic is recorded to cassettes under this directory.
    pub record_dir: Option<PathBuf>,
}

impl Config {
    /// Reads the process environment.
    ///
    /// # Errors
    ///
    /// [`TaskforgeError::Config`] when a variable holds an unparsable value.
    pub fn from_env() -> TaskforgeResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads variables through `lookup`; empty values count as unset.
    ///
    /// # Errors
    ///
    /// [`TaskforgeError::Config`] when a variable holds an unparsable value.
    pub fn from_lookup<F>(lookup: F) -> TaskforgeResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let judge = JudgeEndpoint {
            base_url: get("TASKFORGE_JUDGE_URL")
                .unwrap_or_else(|| DEFAULT_JUDGE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            api_key: get("TASKFORGE_JUDGE_KEY").or_else(|| get("RAPIDAPI_KEY")),
            host: get("TASKFORGE_JUDGE_HOST").unwrap_or_else(|| DEFAULT_JUDGE_HOST.to_string()),
            request_timeout: Duration::from_secs(parse_or(
                &get,
                "TASKFORGE_JUDGE_TIMEOUT_SECS",
                DEFAULT_JUDGE_TIMEOUT_SECS,
            )?),
        };
        if judge.request_timeout.is_zero() {
            return Err(TaskforgeError::Config("TASKFORGE_JUDGE_TIMEOUT_SECS must be at least 1".into()));
        }

        let llm = LlmSettings {
            model: get("TASKFORGE_LLM_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            max_tokens: parse_or(&get, "TASKFORGE_LLM_MAX_TOKENS", DEFAULT_MAX_TOKENS)?,
        };

        let defaults = PollPolicy::default();
        let poll = PollPolicy {
            initial_interval: Duration::from_millis(parse_or(
                &get,
                "TASKFORGE_POLL_INTERVAL_MS",
                millis(defaults.initial_interval),
            )?),
            max_interval: Duration::from_millis(parse_or(
                &get,
                "TASKFORGE_POLL_MAX_INTERVAL_MS",
                millis(defaults.max_interval),
            )?),
            multiplier: defaults.multiplier,
            max_attempts: parse_or(&get, "TASKFORGE_POLL_MAX_ATTEMPTS", defaults.max_attempts)?,
        };
        let concurrency: usize = parse_or(&get, "TASKFORGE_CONCURRENCY", 1)?;
        if concurrency == 0 {
            return Err(TaskforgeError::Config("TASKFORGE_CONCURRENCY must be at least 1".into()));
        }
        let deadline = get("TASKFORGE_DEADLINE_SECS")
            .map(|raw| parse_value::<u64>("TASKFORGE_DEADLINE_SECS", &raw))
            .transpose()?
            .map(Duration::from_secs);

        let type_policy = if parse_bool(&get, "TASKFORGE_STRICT_TYPES")? {
            TypePolicy::Reject
        } else {
            TypePolicy::Sentinel
        };

        Ok(Self {
            judge,
            llm,
            judge_options: JudgeOptions { poll, concurrency, deadline },
            type_policy,
            record_dir: get("TASKFORGE_RECORD").map(PathBuf::from),
        })
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

fn parse_or<T, G>(get: &G, key: &str, default: T) -> TaskforgeResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    G: Fn(&str) -> Option<String>,
{
    get(key).map_or(Ok(default), |raw| parse_value(key, &raw))
}

fn parse_value<T>(key: &str, raw: &str) -> TaskforgeResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse().map_err(|e| TaskforgeError::Config(format!("{key}={raw:?}: {e}")))
}

fn parse_bool<G>(get: &G, key: &str) -> TaskforgeResult<bool>
where
    G: Fn(&str) -> Option<String>,
{
    match get(key).map(|raw| raw.to_ascii_lowercase()).as_deref() {
        None | Some("0" | "false" | "no" | "off") => Ok(false),
        Some("1" | "true" | "yes" | "on") => Ok(true),
        Some(other) => Err(TaskforgeError::Config(format!("{key}={other:?}: expected a boolean"))),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> TaskforgeResult<Config> {
        let map: HashMap<String, String> =
            vars.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = config(&[]).unwrap();
        assert_eq!(config.judge.base_url, "https://judge0-ce.p.rapidapi.com");
        assert_eq!(config.judge.api_key, None);
        assert_eq!(config.judge.request_timeout, Duration::from_secs(30));
        assert_eq!(config.llm, LlmSettings::default());
        assert_eq!(config.judge_options, JudgeOptions::default());
        assert_eq!(config.type_policy, TypePolicy::Sentinel);
        assert_eq!(config.record_dir, None);
    }

    #[test]
    fn reads_overrides() {
        let config = config(&[
            ("TASKFORGE_JUDGE_URL", "http://localhost:2358/"),
            ("RAPIDAPI_KEY", "fallback"),
            ("TASKFORGE_POLL_INTERVAL_MS", "250"),
            ("TASKFORGE_POLL_MAX_ATTEMPTS", "5"),
            ("TASKFORGE_CONCURRENCY", "4"),
            ("TASKFORGE_DEADLINE_SECS", "30"),
            ("TASKFORGE_STRICT_TYPES", "true"),
            ("TASKFORGE_RECORD", "/tmp/cassettes"),
            ("TASKFORGE_JUDGE_TIMEOUT_SECS", "5"),
        ])
        .unwrap();
        assert_eq!(config.judge.base_url, "http://localhost:2358");
        assert_eq!(config.judge.api_key.as_deref(), Some("fallback"));
        assert_eq!(config.judge_options.poll.initial_interval, Duration::from_millis(250));
        assert_eq!(config.judge_options.poll.max_attempts, 5);
        assert_eq!(config.judge_options.concurrency, 4);
        assert_eq!(config.judge_options.deadline, Some(Duration::from_secs(30)));
        assert_eq!(config.type_policy, TypePolicy::Reject);
        assert_eq!(config.record_dir, Some(PathBuf::from("/tmp/cassettes")));
        assert_eq!(config.judge.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn primary_key_wins_over_fallback() {
        let config =
            config(&[("TASKFORGE_JUDGE_KEY", "primary"), ("RAPIDAPI_KEY", "fallback")]).unwrap();
        assert_eq!(config.judge.api_key.as_deref(), Some("primary"));
    }

    #[test]
    fn malformed_values_are_config_errors() {
        for (key, value) in [
            ("TASKFORGE_POLL_MAX_ATTEMPTS", "many"),
            ("TASKFORGE_CONCURRENCY", "0"),
            ("TASKFORGE_STRICT_TYPES", "maybe"),
            ("TASKFORGE_DEADLINE_SECS", "-1"),
            ("TASKFORGE_JUDGE_TIMEOUT_SECS", "0"),
        ] {
            assert!(matches!(config(&[(key, value)]), Err(TaskforgeError::Config(_))), "{key}");
        }
    }
}
