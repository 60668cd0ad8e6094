use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use uuid::Uuid;

use crate::{Error, Result};

/// One OHLC(V) sample for a fixed interval, as delivered by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Unix timestamp of the interval start.
    pub t: i64,
    pub o: f64,
    pub h: f64,
    pub l: f64,
    pub c: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub v: Option<f64>,
}

impl Candle {
    pub fn new(t: i64, o: f64, h: f64, l: f64, c: f64) -> Self {
        Self { t, o, h, l, c, v: None }
    }

    /// Reject non-finite prices or volume.
    pub fn validate(&self) -> Result<()> {
        let prices = [("o", self.o), ("h", self.h), ("l", self.l), ("c", self.c)];
        for (field, value) in prices {
            if !value.is_finite() {
                return Err(Error::MalformedInput(format!(
                    "candle t={} has non-finite {field}: {value}",
                    self.t
                )));
            }
        }
        if let Some(v) = self.v {
            if !v.is_finite() {
                return Err(Error::MalformedInput(format!(
                    "candle t={} has non-finite volume: {v}",
                    self.t
                )));
            }
        }
        Ok(())
    }
}

/// Provider response envelope: `{ "data": [ {t,o,h,l,c,v}, ... ] }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSeriesPayload {
    pub data: Vec<Candle>,
}

/// Canonical forecast direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Flat,
}

impl Direction {
    /// Render this direction as a canonical classification in `casing`.
    pub fn label(self, casing: Casing) -> Classification {
        Classification::Canonical(self, casing)
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
            Direction::Flat => write!(f, "flat"),
        }
    }
}

/// Letter case a strategy emits its canonical token in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Casing {
    /// `up`
    Lower,
    /// `Up`
    Title,
    /// `UP`
    Upper,
}

/// A strategy verdict.
///
/// Only `Canonical` verdicts are counted by the aggregator. Qualified and
/// trade-style tokens are reported in the raw results but contribute to no
/// counter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Classification {
    Canonical(Direction, Casing),
    /// Directional text with a qualifier, e.g. `Down (Overbought)`.
    Qualified(String),
    /// Trade-style vocabulary: `PUT`, `CALL`, `buy`, `sell`, `hold`.
    TradeSignal(String),
}

const TRADE_TOKENS: [&str; 5] = ["put", "call", "buy", "sell", "hold"];

impl Classification {
    /// The neutral verdict substituted for strategies that cannot run.
    pub fn flat() -> Self {
        Classification::Canonical(Direction::Flat, Casing::Lower)
    }

    pub fn qualified(text: impl Into<String>) -> Self {
        Classification::Qualified(text.into())
    }

    pub fn trade(text: impl Into<String>) -> Self {
        Classification::TradeSignal(text.into())
    }

    /// Map a free-form label onto a variant.
    ///
    /// `up`, `down` and `flat` match case-insensitively and become canonical;
    /// trade vocabulary becomes `TradeSignal`; everything else is `Qualified`.
    pub fn normalize(token: &str) -> Self {
        let lower = token.to_lowercase();
        let direction = match lower.as_str() {
            "up" => Some(Direction::Up),
            "down" => Some(Direction::Down),
            "flat" => Some(Direction::Flat),
            _ => None,
        };

        if let Some(direction) = direction {
            let casing = if token == lower {
                Casing::Lower
            } else if token == token.to_uppercase() {
                Casing::Upper
            } else {
                Casing::Title
            };
            return Classification::Canonical(direction, casing);
        }

        if TRADE_TOKENS.contains(&lower.as_str()) {
            Classification::TradeSignal(token.to_string())
        } else {
            Classification::Qualified(token.to_string())
        }
    }

    /// The counted direction, if this verdict is canonical.
    pub fn direction(&self) -> Option<Direction> {
        match self {
            Classification::Canonical(direction, _) => Some(*direction),
            _ => None,
        }
    }

    /// True for a canonical up or down verdict.
    pub fn is_firm(&self) -> bool {
        matches!(self.direction(), Some(Direction::Up | Direction::Down))
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Classification::Canonical(direction, casing) => {
                let text = match (direction, casing) {
                    (Direction::Up, Casing::Lower) => "up",
                    (Direction::Up, Casing::Title) => "Up",
                    (Direction::Up, Casing::Upper) => "UP",
                    (Direction::Down, Casing::Lower) => "down",
                    (Direction::Down, Casing::Title) => "Down",
                    (Direction::Down, Casing::Upper) => "DOWN",
                    (Direction::Flat, Casing::Lower) => "flat",
                    (Direction::Flat, Casing::Title) => "Flat",
                    (Direction::Flat, Casing::Upper) => "FLAT",
                };
                f.write_str(text)
            }
            Classification::Qualified(text) | Classification::TradeSignal(text) => {
                f.write_str(text)
            }
        }
    }
}

impl Serialize for Classification {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Classification {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        Ok(Classification::normalize(&token))
    }
}

/// Consensus tally over one symbol's raw results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts {
    pub up: usize,
    pub down: usize,
    pub flat: usize,
}

impl Counts {
    pub fn tally(results: &[Classification]) -> Self {
        let mut counts = Counts::default();
        for result in results {
            match result.direction() {
                Some(Direction::Up) => counts.up += 1,
                Some(Direction::Down) => counts.down += 1,
                Some(Direction::Flat) => counts.flat += 1,
                None => {}
            }
        }
        counts
    }
}

/// A strategy that could not produce a verdict for this sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyFailure {
    pub strategy: String,
    pub reason: String,
}

/// Catalog output for one candle sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolAnalysis {
    /// Verdicts in catalog order.
    pub raw_results: Vec<Classification>,
    pub counts: Counts,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<StrategyFailure>,
}

/// Result of one analysis pass over a batch of symbols.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub symbols: BTreeMap<String, SymbolAnalysis>,
    /// Symbols left out of this pass and why.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub skipped: BTreeMap<String, String>,
}

impl AnalysisReport {
    pub fn new(generated_at: DateTime<Utc>) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            generated_at,
            symbols: BTreeMap::new(),
            skipped: BTreeMap::new(),
        }
    }
}

/// Current state of the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EngineState {
    #[default]
    Stopped,
    Running,
}

impl std::fmt::Display for EngineState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineState::Stopped => write!(f, "stopped"),
            EngineState::Running => write!(f, "running"),
        }
    }
}

/// Commands sent to the scheduler via the command channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineCommand {
    Start,
    Stop,
    /// Run one fetch/analyze/notify cycle immediately.
    RunNow,
}
