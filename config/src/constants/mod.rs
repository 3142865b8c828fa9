//! Centralized configuration values shared across the C/ASDL pipeline.
//!
//! Each public item in this module documents its purpose and provides a minimal
//! usage example so that downstream crates can remain declarative and avoid
//! scattering literals.

use std::fmt;
use std::num::NonZeroUsize;

// =============================================================================
// TOKEN LEAVES
// =============================================================================

/// Reserved sentinel that prefixes a subword piece beginning a new word.
///
/// This is the SentencePiece "lower one eighth block" (U+2581). It is assumed
/// never to appear in ordinary identifier or string text.
///
/// # Examples
/// ```
/// use config::constants::SUBWORD_BOUNDARY_MARKER;
/// assert!(!SUBWORD_BOUNDARY_MARKER.is_ascii());
/// ```
pub const SUBWORD_BOUNDARY_MARKER: char = '\u{2581}';

/// Grammar type name of identifier leaves.
///
/// # Examples
/// ```
/// use config::constants::IDENT_TYPE;
/// assert_eq!(IDENT_TYPE, "IDENT");
/// ```
pub const IDENT_TYPE: &str = "IDENT";

/// Grammar type name of string leaves.
///
/// # Examples
/// ```
/// use config::constants::STR_TYPE;
/// assert_eq!(STR_TYPE, "STR");
/// ```
pub const STR_TYPE: &str = "STR";

/// Constructor holding an identifier as a single raw token.
pub const IDENT_TOKEN_CTOR: &str = "IdentToken";

/// Constructor holding a string as a single raw token.
pub const STR_TOKEN_CTOR: &str = "StrToken";

/// Constructor holding an identifier as a sequence of subword pieces.
pub const IDENT_SUBWORD_CTOR: &str = "IdentSubword";

/// Constructor holding a string as a sequence of subword pieces.
pub const STR_SUBWORD_CTOR: &str = "StrSubword";

// =============================================================================
// LIMITS
// =============================================================================

/// Number of resolved converters a `ConverterCache` keeps before evicting
/// the least recently used one.
///
/// # Examples
/// ```
/// use config::constants::CONVERTER_CACHE_CAPACITY;
/// assert!(CONVERTER_CACHE_CAPACITY >= 1);
/// ```
pub const CONVERTER_CACHE_CAPACITY: usize = 8;

/// Remaining stack below which a recursive conversion step grows the stack
/// using the `stacker` crate.
///
/// # Examples
/// ```
/// use config::constants::{STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES};
/// assert!(STACKER_RED_ZONE_BYTES < STACKER_STACK_SIZE_BYTES);
/// ```
pub const STACKER_RED_ZONE_BYTES: usize = 64 * 1024;

/// Size of each stack segment allocated when a conversion step grows the stack.
///
/// # Examples
/// ```
/// use config::constants::STACKER_STACK_SIZE_BYTES;
/// assert!(STACKER_STACK_SIZE_BYTES >= 1024);
/// ```
pub const STACKER_STACK_SIZE_BYTES: usize = 2 * 1024 * 1024;

// =============================================================================
// CONVERTER CONFIG
// =============================================================================

/// `CONVERTER_CACHE_CAPACITY` as a non-zero count, checked at compile time.
const DEFAULT_CACHE_CAPACITY: NonZeroUsize = match NonZeroUsize::new(CONVERTER_CACHE_CAPACITY) {
    Some(capacity) => capacity,
    None => panic!("CONVERTER_CACHE_CAPACITY must be positive"),
};

/// Immutable snapshot of converter settings that can be shared between crates.
///
/// Values are only built through `ConverterConfig::new` or `Default`, so a
/// snapshot always satisfies the checks `new` performs.
///
/// # Examples
/// ```
/// use config::constants::ConverterConfig;
/// let config = ConverterConfig::default();
/// assert_eq!(config.cache_capacity().get(), 8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConverterConfig {
    boundary_marker: char,
    cache_capacity: NonZeroUsize,
    stack_red_zone: usize,
    stack_size: usize,
}

impl ConverterConfig {
    /// Builds a configuration, validating every supplied value.
    ///
    /// # Examples
    /// ```
    /// use config::constants::ConverterConfig;
    /// let cfg = ConverterConfig::new('\u{2581}', 4, 32 * 1024, 1024 * 1024).expect("valid config");
    /// assert_eq!(cfg.cache_capacity().get(), 4);
    /// ```
    pub fn new(
        boundary_marker: char,
        cache_capacity: usize,
        stack_red_zone: usize,
        stack_size: usize,
    ) -> Result<Self, ConfigError> {
        if boundary_marker.is_ascii() || boundary_marker.is_whitespace() {
            return Err(ConfigError::InvalidBoundaryMarker(boundary_marker));
        }
        let cache_capacity = NonZeroUsize::new(cache_capacity).ok_or(ConfigError::ZeroCacheCapacity)?;
        if stack_red_zone >= stack_size {
            return Err(ConfigError::InvalidStackSizes {
                red_zone: stack_red_zone,
                stack_size,
            });
        }
        Ok(Self {
            boundary_marker,
            cache_capacity,
            stack_red_zone,
            stack_size,
        })
    }

    /// Marker prefixing subword pieces that start a new word.
    pub fn boundary_marker(&self) -> char {
        self.boundary_marker
    }

    /// Capacity of the converter cache.
    pub fn cache_capacity(&self) -> NonZeroUsize {
        self.cache_capacity
    }

    /// Red zone handed to `stacker::maybe_grow`.
    pub fn stack_red_zone(&self) -> usize {
        self.stack_red_zone
    }

    /// Stack segment size handed to `stacker::maybe_grow`.
    pub fn stack_size(&self) -> usize {
        self.stack_size
    }
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            boundary_marker: SUBWORD_BOUNDARY_MARKER,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            stack_red_zone: STACKER_RED_ZONE_BYTES,
            stack_size: STACKER_STACK_SIZE_BYTES,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// Raised when the marker could collide with ordinary source text.
    InvalidBoundaryMarker(char),
    /// Raised when the converter cache could never hold an entry.
    ZeroCacheCapacity,
    /// Raised when the red zone does not fit inside a new stack segment.
    InvalidStackSizes {
        /// Requested red zone.
        red_zone: usize,
        /// Requested segment size.
        stack_size: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidBoundaryMarker(marker) => {
                write!(f, "boundary marker must be a non-ASCII, non-whitespace character: {marker:?}")
            }
            ConfigError::ZeroCacheCapacity => write!(f, "cache_capacity must be >= 1"),
            ConfigError::InvalidStackSizes { red_zone, stack_size } => {
                write!(f, "stack red zone {red_zone} must be smaller than stack size {stack_size}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
