//! # config
//!
//! Runtime configuration, read once from the environment at startup
//! (after `.env` has been loaded by `dotenvy`).
//!
//! | Variable                 | Default        |
//! |--------------------------|----------------|
//! | `BIND_ADDR`              | `0.0.0.0:3000` |
//! | `JOURNAL_DATA_PATH`      | unset (memory) |
//! | `JOURNAL_UTC_OFFSET`     | unset (local)  |
//! | `PIP_VALUE_OVERRIDES`    | unset          |
//! | `PIP_VALUE_DEFAULT`      | `10`           |
//! | `EVENT_CHANNEL_CAPACITY` | `256`          |
//!
//! Blank values count as unset. Malformed values are startup errors.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{anyhow, bail, Context};
use chrono::FixedOffset;

use crate::engine::pip::{PipValueRule, PipValueTable, DEFAULT_PIP_VALUE};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_EVENT_CAPACITY: usize = 256;

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    /// Snapshot file; `None` keeps the journal in memory only.
    pub data_path: Option<PathBuf>,
    /// Zone used for month keys and the daily series; `None` = server local time.
    pub utc_offset: Option<FixedOffset>,
    pub pip_values: PipValueTable,
    pub event_capacity: usize,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key → value source.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let bind_addr: SocketAddr = var("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .context("BIND_ADDR must be a socket address such as 0.0.0.0:3000")?;

        let utc_offset = var("JOURNAL_UTC_OFFSET")
            .map(|raw| parse_offset(&raw).context("invalid JOURNAL_UTC_OFFSET"))
            .transpose()?;

        let default_pip_value = var("PIP_VALUE_DEFAULT")
            .map(|raw| parse_positive(&raw).context("invalid PIP_VALUE_DEFAULT"))
            .transpose()?
            .unwrap_or(DEFAULT_PIP_VALUE);

        let overrides = var("PIP_VALUE_OVERRIDES")
            .map(|raw| parse_pip_overrides(&raw).context("invalid PIP_VALUE_OVERRIDES"))
            .transpose()?
            .unwrap_or_default();

        let event_capacity = var("EVENT_CHANNEL_CAPACITY")
            .map(|raw| match raw.parse::<usize>() {
                Ok(n) if n > 0 => Ok(n),
                _ => Err(anyhow!("EVENT_CHANNEL_CAPACITY must be a positive integer, got {raw:?}")),
            })
            .transpose()?
            .unwrap_or(DEFAULT_EVENT_CAPACITY);

        Ok(Self {
            bind_addr,
            data_path:      var("JOURNAL_DATA_PATH").map(PathBuf::from),
            utc_offset,
            pip_values:     PipValueTable::default()
                .with_overrides(overrides)
                .with_default(default_pip_value),
            event_capacity,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr:      SocketAddr::from(([0, 0, 0, 0], 3000)),
            data_path:      None,
            utc_offset:     None,
            pip_values:     PipValueTable::default(),
            event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }
}

// ─── Parsers ──────────────────────────────────────────────────────────────────

/// `+07:00`, `-05:30`, `Z`. Hours up to 23.
pub fn parse_offset(raw: &str) -> anyhow::Result<FixedOffset> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("z") || raw.eq_ignore_ascii_case("utc") {
        return FixedOffset::east_opt(0).ok_or_else(|| anyhow!("zero offset"));
    }

    let (sign, rest) = if let Some(rest) = raw.strip_prefix('+') {
        (1, rest)
    } else if let Some(rest) = raw.strip_prefix('-') {
        (-1, rest)
    } else {
        bail!("offset must start with + or -, got {raw:?}");
    };
    let (hours, minutes) = rest
        .split_once(':')
        .ok_or_else(|| anyhow!("offset must look like +HH:MM, got {raw:?}"))?;

    let hours: i32 = hours.parse().with_context(|| format!("bad hours in {raw:?}"))?;
    let minutes: i32 = minutes.parse().with_context(|| format!("bad minutes in {raw:?}"))?;
    if !(0..24).contains(&hours) || !(0..60).contains(&minutes) {
        bail!("offset out of range: {raw:?}");
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
        .ok_or_else(|| anyhow!("offset out of range: {raw:?}"))
}

/// `"XAU=1,USD/SGD=7.4"` → rules in the order given.
pub fn parse_pip_overrides(raw: &str) -> anyhow::Result<Vec<PipValueRule>> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (pattern, value) = entry
                .split_once('=')
                .ok_or_else(|| anyhow!("expected PATTERN=VALUE, got {entry:?}"))?;
            let pattern = pattern.trim();
            if pattern.is_empty() {
                bail!("empty pattern in {entry:?}");
            }
            Ok(PipValueRule::new(pattern, parse_positive(value.trim())?))
        })
        .collect()
}

fn parse_positive(raw: &str) -> anyhow::Result<f64> {
    let value = f64::from_str(raw).with_context(|| format!("{raw:?} is not a number"))?;
    if !value.is_finite() || value <= 0.0 {
        bail!("{raw:?} must be a positive number");
    }
    Ok(value)
}
