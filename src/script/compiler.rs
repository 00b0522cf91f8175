//! Cached, thread-safe script compilation.

use std::collections::{HashMap, VecDeque};
use std::ops::{Deref, DerefMut};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use sha2::{Digest, Sha256};
use tracing::debug;

use super::artifact::CompiledScript;
use super::checker::CompilerSession;
use super::parser::normalize;
use crate::error::{Result, VigilError};

/// Artifacts kept by [`ScriptCompiler::new`] and the global compiler.
pub const DEFAULT_CACHE_CAPACITY: usize = 256;

/// Compiles scripts, reusing artifacts for identical normalized sources.
///
/// Safe to share between threads. Each compilation borrows a session from
/// a pool and returns it reset, so no state carries over between scripts.
/// Failed compilations are not cached.
#[derive(Debug)]
pub struct ScriptCompiler {
    sessions: Mutex<Vec<CompilerSession>>,
    cache: Mutex<ArtifactCache>,
}

impl Default for ScriptCompiler {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }
}

impl ScriptCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// A compiler keeping at most `capacity` artifacts. When full, the
    /// oldest artifact is evicted; callers holding it keep their `Arc`.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            sessions: Mutex::new(Vec::new()),
            cache: Mutex::new(ArtifactCache::new(capacity)),
        }
    }

    /// Process-wide compiler instance.
    ///
    /// Lives for the whole process and holds up to
    /// [`DEFAULT_CACHE_CAPACITY`] artifacts.
    pub fn global() -> &'static ScriptCompiler {
        static GLOBAL: OnceLock<ScriptCompiler> = OnceLock::new();
        GLOBAL.get_or_init(ScriptCompiler::new)
    }

    /// Compile `source`, or return the cached artifact for it.
    ///
    /// # Errors
    ///
    /// Returns `ScriptCompilation` with every diagnostic when the script is
    /// invalid. The same invalid source always yields the same diagnostics.
    pub fn compile(&self, source: &str) -> Result<Arc<CompiledScript>> {
        let key = fingerprint(&normalize(source));

        if let Some(hit) = lock(&self.cache).get(&key) {
            debug!("Script cache hit for {}", &key[..12]);
            return Ok(Arc::clone(hit));
        }
        debug!("Script cache miss for {}", &key[..12]);

        let compiled = {
            let mut session = self.acquire();
            session.compile(source, key.clone())
        };
        let compiled =
            compiled.map_err(|diagnostics| VigilError::ScriptCompilation { diagnostics })?;

        // A concurrent compilation of the same source may have won the race;
        // keep the first artifact so callers share one instance.
        Ok(lock(&self.cache).insert(key, compiled))
    }

    /// Number of cached artifacts.
    pub fn cached(&self) -> usize {
        lock(&self.cache).entries.len()
    }

    /// Drop every cached artifact.
    pub fn clear_cache(&self) {
        let mut cache = lock(&self.cache);
        cache.entries.clear();
        cache.order.clear();
    }

    /// Number of idle sessions in the pool.
    pub fn idle_sessions(&self) -> usize {
        lock(&self.sessions).len()
    }

    fn acquire(&self) -> SessionGuard<'_> {
        let session = lock(&self.sessions).pop().unwrap_or_default();
        SessionGuard {
            pool: &self.sessions,
            session,
        }
    }
}

/// Artifacts by fingerprint, evicted oldest first.
#[derive(Debug)]
struct ArtifactCache {
    capacity: usize,
    entries: HashMap<String, Arc<CompiledScript>>,
    order: VecDeque<String>,
}

impl ArtifactCache {
    fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: HashMap::new(),
            order: VecDeque::new(),
        }
    }

    fn get(&self, key: &str) -> Option<&Arc<CompiledScript>> {
        self.entries.get(key)
    }

    /// Store `compiled` unless `key` is already present, and return the
    /// stored artifact.
    fn insert(&mut self, key: String, compiled: CompiledScript) -> Arc<CompiledScript> {
        if let Some(existing) = self.entries.get(&key) {
            return Arc::clone(existing);
        }
        let artifact = Arc::new(compiled);
        if self.capacity == 0 {
            return artifact;
        }
        while self.entries.len() >= self.capacity {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            debug!("Evicting script artifact {}", &oldest[..12]);
            self.entries.remove(&oldest);
        }
        self.order.push_back(key.clone());
        self.entries.insert(key, Arc::clone(&artifact));
        artifact
    }
}

/// A pooled session, reset and returned to the pool when dropped.
struct SessionGuard<'a> {
    pool: &'a Mutex<Vec<CompilerSession>>,
    session: CompilerSession,
}

impl Deref for SessionGuard<'_> {
    type Target = CompilerSession;

    fn deref(&self) -> &Self::Target {
        &self.session
    }
}

impl DerefMut for SessionGuard<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.session
    }
}

impl Drop for SessionGuard<'_> {
    fn drop(&mut self) {
        let mut session = std::mem::take(&mut self.session);
        session.reset();
        lock(self.pool).push(session);
    }
}

/// Lock a mutex, recovering the data if a previous holder panicked.
/// Pool and cache stay consistent: sessions are reset before they are
/// pooled and artifacts are inserted whole.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Hex SHA-256 of a normalized source.
pub fn fingerprint(normalized: &str) -> String {
    let hash = Sha256::digest(normalized.as_bytes());
    hex::encode(&hash[..])
}
