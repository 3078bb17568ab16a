//! Signature metadata cache and typed signature handles.
//!
//! Introspection walks the whole shape tree, so its result is built once per
//! input/output type pair and shared. The [`SignatureRegistry`] keeps one
//! immutable [`SignatureMetadata`] per pair for as long as the registry
//! lives. Lookups go to a sharded map, so unrelated pairs do not contend on
//! one lock. On a miss the metadata is built outside any lock; if another
//! thread publishes first, the local copy is dropped and the published one
//! is returned.

use core::any::{TypeId, type_name};
use core::fmt;
use core::marker::PhantomData;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::{debug, trace};
use tysig_error::FieldPath;

use crate::{
    error::ValidationResult,
    field::TypeRef,
    introspect::describe,
    legacy::LegacySignature,
    options::Options,
    shape::Introspect,
    signature::{SignatureMetadata, render},
    validate::validate,
    value::ToValue,
};

/// Identity of an input/output type pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SignatureCacheKey {
    pub input: TypeId,
    pub output: TypeId,
}

impl SignatureCacheKey {
    #[must_use]
    pub fn of<I: 'static, O: 'static>() -> Self {
        Self {
            input: TypeId::of::<I>(),
            output: TypeId::of::<O>(),
        }
    }
}

/// Hit/miss counters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RegistryStats {
    pub hits: u64,
    pub misses: u64,
}

/// Process-lifetime cache of signature metadata, keyed by type pair.
///
/// ```rust
/// use std::sync::Arc;
/// use tysig::{Introspect, SignatureRegistry};
///
/// #[derive(Introspect)]
/// struct Question {
///     question: String,
/// }
///
/// #[derive(Introspect)]
/// struct Answer {
///     answer: String,
/// }
///
/// let registry = SignatureRegistry::new();
/// let first = registry.get_or_create::<Question, Answer>();
/// let second = registry.get_or_create::<Question, Answer>();
/// assert!(Arc::ptr_eq(&first, &second));
/// assert_eq!(registry.len(), 1);
/// ```
pub struct SignatureRegistry {
    entries: DashMap<SignatureCacheKey, Arc<SignatureMetadata>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl SignatureRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(&Options::default())
    }

    #[must_use]
    pub fn with_options(options: &Options) -> Self {
        let entries = match options.shard_amount() {
            Some(shards) => DashMap::with_capacity_and_shard_amount(options.registry_capacity, shards),
            None => DashMap::with_capacity(options.registry_capacity),
        };
        Self {
            entries,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Metadata for `I -> O`, introspecting on first use.
    ///
    /// Concurrent first calls for the same pair all return the same `Arc`.
    pub fn get_or_create<I: Introspect, O: Introspect>(&self) -> Arc<SignatureMetadata> {
        let key = SignatureCacheKey::of::<I, O>();

        if let Some(hit) = self.entries.get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            trace!(input = type_name::<I>(), output = type_name::<O>(), "signature registry hit");
            return Arc::clone(hit.value());
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        debug!(input = type_name::<I>(), output = type_name::<O>(), "building signature metadata");
        let built = Arc::new(describe::<I, O>());

        match self.entries.entry(key) {
            Entry::Occupied(winner) => {
                debug!(
                    input = type_name::<I>(),
                    output = type_name::<O>(),
                    "signature metadata published concurrently, dropping local copy"
                );
                Arc::clone(winner.get())
            }
            Entry::Vacant(slot) => Arc::clone(slot.insert(built).value()),
        }
    }

    /// Metadata for `I -> O`, if already built.
    #[must_use]
    pub fn get<I: 'static, O: 'static>(&self) -> Option<Arc<SignatureMetadata>> {
        self.entries
            .get(&SignatureCacheKey::of::<I, O>())
            .map(|entry| Arc::clone(entry.value()))
    }

    #[must_use]
    pub fn contains<I: 'static, O: 'static>(&self) -> bool {
        self.entries.contains_key(&SignatureCacheKey::of::<I, O>())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn stats(&self) -> RegistryStats {
        RegistryStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

impl Default for SignatureRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SignatureRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignatureRegistry")
            .field("len", &self.len())
            .field("stats", &self.stats())
            .finish_non_exhaustive()
    }
}

/// A signature bound to an input type `I` and an output type `O`.
///
/// ```rust
/// use tysig::{Introspect, ToValue, TypedSignature};
///
/// #[derive(Introspect, ToValue)]
/// struct Question {
///     #[sig(required)]
///     question: String,
/// }
///
/// #[derive(Introspect, ToValue)]
/// struct Answer {
///     answer: String,
/// }
///
/// let sig = TypedSignature::<Question, Answer>::new().with_instruction("Answer briefly.");
/// assert!(sig.validate_input(&Question { question: "why?".into() }).is_ok());
///
/// let err = sig.validate_input(&Question { question: String::new() }).unwrap_err();
/// assert_eq!(err.field_path(), "input.question");
/// ```
pub struct TypedSignature<I, O> {
    metadata: Arc<SignatureMetadata>,
    types: PhantomData<fn() -> (I, O)>,
}

impl<I: Introspect, O: Introspect> TypedSignature<I, O> {
    /// Introspect `I` and `O` without caching.
    #[must_use]
    pub fn new() -> Self {
        Self::from_metadata(Arc::new(describe::<I, O>()))
    }

    /// Share the registry's metadata for `I -> O`.
    #[must_use]
    pub fn cached(registry: &SignatureRegistry) -> Self {
        Self::from_metadata(registry.get_or_create::<I, O>())
    }

    #[must_use]
    pub fn input_type(&self) -> TypeRef {
        TypeRef::of::<I>()
    }

    #[must_use]
    pub fn output_type(&self) -> TypeRef {
        TypeRef::of::<O>()
    }
}

impl<I: Introspect, O: Introspect> Default for TypedSignature<I, O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I, O> TypedSignature<I, O> {
    fn from_metadata(metadata: Arc<SignatureMetadata>) -> Self {
        Self {
            metadata,
            types: PhantomData,
        }
    }

    #[must_use]
    pub fn metadata(&self) -> &SignatureMetadata {
        &self.metadata
    }

    /// The shared metadata handle.
    #[must_use]
    pub fn shared_metadata(&self) -> Arc<SignatureMetadata> {
        Arc::clone(&self.metadata)
    }

    /// Check the required input fields, reporting under `input`.
    pub fn validate_input(&self, input: &I) -> ValidationResult<()>
    where
        I: ToValue,
    {
        validate(&input.to_value(), &self.metadata.inputs, &FieldPath::root("input"))
    }

    /// Check the required output fields, reporting under `output`.
    pub fn validate_output(&self, output: &O) -> ValidationResult<()>
    where
        O: ToValue,
    {
        validate(&output.to_value(), &self.metadata.outputs, &FieldPath::root("output"))
    }

    /// A new handle with its own copy of the metadata and the given
    /// instruction. Cached metadata is left untouched.
    #[must_use]
    pub fn with_instruction(&self, instruction: impl Into<String>) -> Self {
        let metadata = (*self.metadata).clone().with_instruction(instruction);
        Self::from_metadata(Arc::new(metadata))
    }

    #[must_use]
    pub fn to_legacy(&self) -> LegacySignature {
        self.metadata.to_legacy()
    }
}

impl<I, O> Clone for TypedSignature<I, O> {
    fn clone(&self) -> Self {
        Self::from_metadata(Arc::clone(&self.metadata))
    }
}

impl<I, O> fmt::Debug for TypedSignature<I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedSignature")
            .field("input", &type_name::<I>())
            .field("output", &type_name::<O>())
            .field("metadata", &self.metadata)
            .finish()
    }
}

impl<I, O> fmt::Display for TypedSignature<I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(self.metadata()))
    }
}
