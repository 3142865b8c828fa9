//! # Converter Cache
//!
//! Bounded, thread-safe map from grammar identity to a resolved converter.
//! The cache is an ordinary value owned by the caller; there is no global
//! instance.
//!
//! ```rust
//! use c_asdl::{c_grammar, ConverterCache};
//! use std::sync::Arc;
//!
//! let cache = ConverterCache::new();
//! let grammar = c_grammar().unwrap();
//! let first = cache.get_or_create(&grammar).unwrap();
//! let second = cache.get_or_create(&grammar).unwrap();
//! assert!(Arc::ptr_eq(&first, &second));
//! ```

use crate::converter::AstConverter;
use crate::error::ConvertError;
use asdl::{AsdlTree, Grammar, GrammarId};
use c_ast::CNode;
use config::constants::ConverterConfig;
use lru::LruCache;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// Least-recently-used cache of raw-token converters keyed by grammar.
pub struct ConverterCache {
    converters: Mutex<LruCache<GrammarId, Arc<AstConverter>>>,
    config: ConverterConfig,
}

impl ConverterCache {
    /// Create a cache with the default capacity.
    pub fn new() -> Self {
        Self::with_config(ConverterConfig::default())
    }

    /// Create a cache whose capacity and converter settings come from
    /// `config`.
    pub fn with_config(config: ConverterConfig) -> Self {
        Self {
            converters: Mutex::new(LruCache::new(config.cache_capacity())),
            config,
        }
    }

    /// Converter for `grammar`, resolving and inserting it if absent.
    ///
    /// Resolution happens outside the lock; when two threads race on the
    /// same grammar the first insert wins and both get that converter.
    pub fn get_or_create(&self, grammar: &Arc<Grammar>) -> Result<Arc<AstConverter>, ConvertError> {
        let id = grammar.id();
        if let Some(converter) = self.lock().get(&id) {
            debug!(grammar = %id, "converter cache hit");
            return Ok(Arc::clone(converter));
        }

        debug!(grammar = %id, "converter cache miss");
        let converter = Arc::new(AstConverter::new(Arc::clone(grammar))?.with_config(self.config));

        let mut converters = self.lock();
        if let Some(existing) = converters.get(&id) {
            return Ok(Arc::clone(existing));
        }
        if let Some((evicted, _)) = converters.push(id, Arc::clone(&converter)) {
            debug!(grammar = %evicted, "converter cache eviction");
        }
        Ok(converter)
    }

    /// Check whether a converter for `grammar` is cached, without touching
    /// recency.
    pub fn contains(&self, grammar: &Grammar) -> bool {
        self.lock().contains(&grammar.id())
    }

    /// Number of cached converters.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Check whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of cached converters.
    pub fn capacity(&self) -> usize {
        self.lock().cap().get()
    }

    /// Drop every cached converter.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, LruCache<GrammarId, Arc<AstConverter>>> {
        self.converters.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ConverterCache {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// PUBLIC API
// =============================================================================

/// Encode `node` with the cached converter for `grammar`.
pub fn c_ast_to_asdl_ast(node: &CNode, cache: &ConverterCache, grammar: &Arc<Grammar>) -> Result<AsdlTree, ConvertError> {
    cache.get_or_create(grammar)?.c_ast_to_asdl_ast(node)
}

/// Decode `tree` with the cached converter for `grammar`.
pub fn asdl_ast_to_c_ast(tree: &AsdlTree, cache: &ConverterCache, grammar: &Arc<Grammar>) -> Result<CNode, ConvertError> {
    cache.get_or_create(grammar)?.asdl_ast_to_c_ast(tree)
}

// =============================================================================
// TESTS
// =============================================================================
