//! Memoizer configuration types and builder patterns
//!
//! This module provides [`MaxSize`], the normalised entry bound, and
//! [`MemoizeConfig`] with its fluent builder. With the `config` feature the
//! configuration can also be loaded from TOML.

use std::fmt;
use std::num::NonZeroUsize;

#[cfg(feature = "config")]
use std::path::Path;

#[cfg(feature = "config")]
use serde::Deserialize;

#[cfg(feature = "config")]
use crate::error::MemoizeResult;

/// Maximum number of distinct argument lists a wrapper keeps.
///
/// Built from any size hint without failing:
/// - non-numeric and non-finite hints become 1
/// - fractional hints are floored
/// - hints below 1 become 1
/// - hints beyond `usize::MAX` saturate
///
/// # Example
/// ```
/// use tiny_memoize::MaxSize;
///
/// assert_eq!(MaxSize::from(3.99).get(), 3);
/// assert_eq!(MaxSize::from(-2).get(), 1);
/// assert_eq!(MaxSize::from(f64::NAN).get(), 1);
/// assert_eq!(MaxSize::from("12").get(), 12);
/// assert_eq!(MaxSize::from(None::<u32>).get(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MaxSize(NonZeroUsize);

impl MaxSize {
    /// The smallest bound, also used for every unusable hint
    pub const ONE: Self = Self(NonZeroUsize::MIN);

    /// The bound as a plain count
    pub fn get(self) -> usize {
        self.0.get()
    }

    /// Normalise a floating point hint
    pub fn from_f64(hint: f64) -> Self {
        if !hint.is_finite() {
            return Self::ONE;
        }
        let floored = hint.floor();
        if floored < 1.0 {
            return Self::ONE;
        }
        // float-to-int `as` saturates at usize::MAX
        Self::from_count(floored as usize)
    }

    /// Normalise an entry count, mapping 0 to 1
    pub fn from_count(count: usize) -> Self {
        NonZeroUsize::new(count).map_or(Self::ONE, Self)
    }

    /// Normalise a textual hint; anything that does not parse as a number is
    /// treated as 1
    pub fn parse_lossy(hint: &str) -> Self {
        hint.trim().parse::<f64>().map_or(Self::ONE, Self::from_f64)
    }
}

impl Default for MaxSize {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for MaxSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<NonZeroUsize> for MaxSize {
    fn from(size: NonZeroUsize) -> Self {
        Self(size)
    }
}

impl From<f64> for MaxSize {
    fn from(hint: f64) -> Self {
        Self::from_f64(hint)
    }
}

impl From<f32> for MaxSize {
    fn from(hint: f32) -> Self {
        Self::from_f64(f64::from(hint))
    }
}

impl From<&str> for MaxSize {
    fn from(hint: &str) -> Self {
        Self::parse_lossy(hint)
    }
}

impl From<String> for MaxSize {
    fn from(hint: String) -> Self {
        Self::parse_lossy(&hint)
    }
}

impl From<&String> for MaxSize {
    fn from(hint: &String) -> Self {
        Self::parse_lossy(hint)
    }
}

impl<T> From<Option<T>> for MaxSize
where
    T: Into<MaxSize>,
{
    fn from(hint: Option<T>) -> Self {
        hint.map_or(Self::ONE, Into::into)
    }
}

macro_rules! impl_from_unsigned {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for MaxSize {
                fn from(hint: $ty) -> Self {
                    Self::from_count(usize::try_from(hint).unwrap_or(usize::MAX))
                }
            }
        )*
    };
}

macro_rules! impl_from_signed {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for MaxSize {
                fn from(hint: $ty) -> Self {
                    if hint < 1 {
                        return Self::ONE;
                    }
                    Self::from_count(usize::try_from(hint).unwrap_or(usize::MAX))
                }
            }
        )*
    };
}

impl_from_unsigned!(u8, u16, u32, u64, u128, usize);
impl_from_signed!(i8, i16, i32, i64, i128, isize);

#[cfg(feature = "config")]
impl<'de> Deserialize<'de> for MaxSize {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_any(MaxSizeVisitor)
    }
}

/// Accepts every TOML shape; anything that is not a number or numeric string
/// normalises to 1 instead of failing.
#[cfg(feature = "config")]
struct MaxSizeVisitor;

#[cfg(feature = "config")]
impl<'de> serde::de::Visitor<'de> for MaxSizeVisitor {
    type Value = MaxSize;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a maximum number of memoizations")
    }

    fn visit_i64<E>(self, v: i64) -> Result<MaxSize, E> {
        Ok(MaxSize::from(v))
    }

    fn visit_u64<E>(self, v: u64) -> Result<MaxSize, E> {
        Ok(MaxSize::from(v))
    }

    fn visit_f64<E>(self, v: f64) -> Result<MaxSize, E> {
        Ok(MaxSize::from_f64(v))
    }

    fn visit_str<E>(self, v: &str) -> Result<MaxSize, E> {
        Ok(MaxSize::parse_lossy(v))
    }

    fn visit_bool<E>(self, _v: bool) -> Result<MaxSize, E> {
        Ok(MaxSize::ONE)
    }

    fn visit_unit<E>(self) -> Result<MaxSize, E> {
        Ok(MaxSize::ONE)
    }

    fn visit_seq<S>(self, mut seq: S) -> Result<MaxSize, S::Error>
    where
        S: serde::de::SeqAccess<'de>,
    {
        while seq.next_element::<serde::de::IgnoredAny>()?.is_some() {}
        Ok(MaxSize::ONE)
    }

    fn visit_map<M>(self, mut map: M) -> Result<MaxSize, M::Error>
    where
        M: serde::de::MapAccess<'de>,
    {
        while map.next_entry::<serde::de::IgnoredAny, serde::de::IgnoredAny>()?.is_some() {}
        Ok(MaxSize::ONE)
    }
}

/// Configuration for a memoized function
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct MemoizeConfig {
    /// Maximum number of cached argument lists
    #[cfg_attr(feature = "config", serde(rename = "max_memoizations"))]
    pub max_size: MaxSize,

    /// Whether to collect hit/miss/eviction counters
    pub track_metrics: bool,

    /// Label attached to log events
    pub name: Option<String>,
}

impl MemoizeConfig {
    /// Create a new configuration builder
    pub fn builder() -> MemoizeConfigBuilder {
        MemoizeConfigBuilder::default()
    }

    /// Quick preset keeping up to `max_memoizations` entries
    ///
    /// # Example
    /// ```
    /// use tiny_memoize::MemoizeConfig;
    ///
    /// let config = MemoizeConfig::bounded(3.99);
    /// assert_eq!(config.max_size.get(), 3);
    /// ```
    pub fn bounded(max_memoizations: impl Into<MaxSize>) -> Self {
        Self { max_size: max_memoizations.into(), ..Self::default() }
    }

    /// Parse a configuration from TOML text
    ///
    /// Recognised keys are `max_memoizations`, `track_metrics` and `name`.
    ///
    /// # Example
    /// ```
    /// use tiny_memoize::MemoizeConfig;
    ///
    /// let config = MemoizeConfig::from_toml_str("max_memoizations = 8\ntrack_metrics = true")?;
    /// assert_eq!(config.max_size.get(), 8);
    /// assert!(config.track_metrics);
    /// # Ok::<(), tiny_memoize::MemoizeError>(())
    /// ```
    #[cfg(feature = "config")]
    pub fn from_toml_str(source: &str) -> MemoizeResult<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Read and parse a TOML configuration file
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> MemoizeResult<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }
}

/// Builder for MemoizeConfig with fluent API
#[derive(Debug, Default)]
pub struct MemoizeConfigBuilder {
    config: MemoizeConfig,
}

impl MemoizeConfigBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of cached argument lists
    pub fn max_memoizations(mut self, hint: impl Into<MaxSize>) -> Self {
        self.config.max_size = hint.into();
        self
    }

    /// Enable or disable metrics tracking
    pub fn track_metrics(mut self, enabled: bool) -> Self {
        self.config.track_metrics = enabled;
        self
    }

    /// Label log events emitted by the wrapper
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.config.name = Some(name.into());
        self
    }

    /// Build the configuration
    pub fn build(self) -> MemoizeConfig {
        self.config
    }
}
