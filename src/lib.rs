//! Vietnamese number-to-words conversion.
//!
//! Renders integers in `0..=999_999_999_999_999` as Vietnamese text, with an
//! optional currency word:
//!
//! ```rust
//! use vi_numwords::VietnameseConverter;
//!
//! let converter = VietnameseConverter::new();
//! assert_eq!(
//!     converter.convert(2_355_200_847, "đồng").unwrap(),
//!     "hai tỷ ba trăm năm mươi lăm triệu hai trăm nghìn tám trăm bốn mươi bảy đồng"
//! );
//! assert_eq!(converter.convert(1_001, "").unwrap(), "một nghìn lẻ một");
//! ```
//!
//! [`VietnameseConverter`] is built once and shared: its group tables are
//! frozen after construction, scratch buffers come from a lock-free pool and
//! instrumentation is atomic, so `&VietnameseConverter` can be used from any
//! number of threads. [`DirectConverter`] renders every call from scratch and
//! serves as the reference implementation.

use std::borrow::Cow;
use std::time::Instant;

use once_cell::sync::Lazy;
use rayon::prelude::*;
use regex::Regex;
use serde::Serialize;

pub mod config;
pub mod direct;
pub mod error;
pub mod metrics;
pub mod pool;
pub mod render;
pub mod segment;
pub mod tables;
pub mod utils;

pub use crate::config::{ConverterConfig, DEFAULT_CURRENCY};
pub use crate::direct::DirectConverter;
pub use crate::error::{ConfigError, ConvertError};
pub use crate::metrics::{AtomicMetrics, MetricsSnapshot};
pub use crate::pool::{BufferPool, PoolStats};
pub use crate::render::{FillerStyle, GroupRenderer};
pub use crate::tables::{FourForm, GroupCache, Lexicon};

use crate::segment::segment;
use crate::tables::lexicon::ZERO_WORD;
use crate::tables::scale::scale_word;

/// Largest convertible value: 15 digits, 5 groups.
pub const MAX_NUMBER: u64 = 999_999_999_999_999;

static TENS_ONE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bmươi một\b").expect("tens/one pattern is valid"));

/// Checks that `number` lies in `0..=MAX_NUMBER`.
pub fn validate(number: i64) -> Result<u64, ConvertError> {
    if number < 0 {
        return Err(ConvertError::NegativeNumber(number));
    }
    let value = number as u64;
    if value > MAX_NUMBER {
        return Err(ConvertError::NumberTooLarge(number));
    }
    Ok(value)
}

/// Contracts every `mươi một` word pair to `mươi mốt`.
///
/// Group rendering already picks "mốt" after a tens multiplier; this pass is
/// the final guarantee over the assembled phrase.
pub fn normalize(text: &str) -> Cow<'_, str> {
    TENS_ONE.replace_all(text, "mươi mốt")
}

/// Common interface of the converters.
pub trait NumberConverter: Send + Sync {
    /// Renders `number`, appending `currency` unless it is empty.
    fn convert(&self, number: i64, currency: &str) -> Result<String, ConvertError>;

    /// Currency used by [`convert_default`](Self::convert_default).
    fn default_currency(&self) -> &str;

    fn convert_default(&self, number: i64) -> Result<String, ConvertError> {
        self.convert(number, self.default_currency())
    }
}

/// One conversion with its timing, shaped like a service response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conversion {
    pub number: i64,
    pub vietnamese: String,
    pub processing_time_ms: f64,
}

/// The cached, pooled and instrumented conversion engine.
#[derive(Debug)]
pub struct VietnameseConverter {
    renderer: GroupRenderer,
    cache: GroupCache,
    pool: BufferPool,
    metrics: AtomicMetrics,
    metrics_enabled: bool,
    default_currency: String,
}

impl Default for VietnameseConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl VietnameseConverter {
    /// Builds an engine with [`ConverterConfig::default`].
    pub fn new() -> Self {
        Self::with_config(ConverterConfig::default())
    }

    /// Builds an engine, rendering all group tables up front.
    pub fn with_config(config: ConverterConfig) -> Self {
        let renderer = GroupRenderer::new(Lexicon::new(config.four_form), config.filler);
        let cache = GroupCache::build(&renderer);
        let pool = BufferPool::new(
            config.pool_slots,
            config.buffer_capacity,
            config.max_retained_capacity,
        );
        tracing::debug!(
            filler = ?config.filler,
            four_form = ?config.four_form,
            pool_slots = pool.slot_count(),
            metrics = config.metrics,
            "converter ready"
        );
        Self {
            renderer,
            cache,
            pool,
            metrics: AtomicMetrics::new(),
            metrics_enabled: config.metrics,
            default_currency: config.default_currency,
        }
    }

    pub fn renderer(&self) -> &GroupRenderer {
        &self.renderer
    }

    pub fn default_currency(&self) -> &str {
        &self.default_currency
    }

    /// Renders `number`, appending `currency` unless it is empty.
    pub fn convert(&self, number: i64, currency: &str) -> Result<String, ConvertError> {
        if !self.metrics_enabled {
            return self.render(number, currency);
        }
        let started = Instant::now();
        let result = self.render(number, currency);
        self.metrics.record(started.elapsed(), result.is_ok());
        result
    }

    /// [`convert`](Self::convert) with the configured default currency.
    pub fn convert_default(&self, number: i64) -> Result<String, ConvertError> {
        self.convert(number, &self.default_currency)
    }

    /// Converts and reports how long the conversion took.
    pub fn convert_record(&self, number: i64, currency: &str) -> Result<Conversion, ConvertError> {
        let started = Instant::now();
        let vietnamese = self.convert(number, currency)?;
        Ok(Conversion {
            number,
            vietnamese,
            processing_time_ms: started.elapsed().as_secs_f64() * 1000.0,
        })
    }

    /// Converts a batch in parallel; results keep the input order.
    pub fn convert_many(&self, numbers: &[i64], currency: &str) -> Vec<Result<String, ConvertError>> {
        numbers
            .par_iter()
            .map(|&number| self.convert(number, currency))
            .collect()
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    pub fn reset_metrics(&self) {
        self.metrics.reset();
    }

    pub fn pool_stats(&self) -> PoolStats {
        self.pool.stats()
    }

    fn render(&self, number: i64, currency: &str) -> Result<String, ConvertError> {
        let mut buf = self.pool.acquire();
        let number = validate(number)?;

        if number == 0 {
            buf.push_str(ZERO_WORD);
        } else {
            self.write_groups(&mut buf, number);
            let normalized = match normalize(&buf) {
                Cow::Owned(text) => Some(text),
                Cow::Borrowed(_) => None,
            };
            if let Some(text) = normalized {
                buf.clear();
                buf.push_str(&text);
            }
        }

        if !currency.is_empty() {
            buf.push(' ');
            buf.push_str(currency);
        }
        Ok(buf.as_str().to_owned())
    }

    fn write_groups(&self, out: &mut String, number: u64) {
        let mut leading = true;
        for group in segment(number).iter() {
            if group.value == 0 {
                continue;
            }
            if !leading {
                out.push(' ');
            }
            out.push_str(self.cache.lookup(group.value, leading, group.index));
            let scale = scale_word(group.index);
            if !scale.is_empty() {
                out.push(' ');
                out.push_str(&scale);
            }
            leading = false;
        }
    }
}

impl NumberConverter for VietnameseConverter {
    fn convert(&self, number: i64, currency: &str) -> Result<String, ConvertError> {
        VietnameseConverter::convert(self, number, currency)
    }

    fn default_currency(&self) -> &str {
        &self.default_currency
    }
}
