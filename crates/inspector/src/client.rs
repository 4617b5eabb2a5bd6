//! # Registry Client
//!
//! Explicitly constructed handle to registry state. A client owns one
//! snapshot source and one set of rules evaluated against its own clock;
//! callers build it with [`CivilClient::connect`] and tear it down with
//! [`CivilClient::shutdown`].

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use tracing::{debug, info};

use civil_core::{CivilRules, Clock, DomainRules, FixedClock, SystemClock};
use civil_types::StateSnapshot;

use crate::config::ClientConfig;
use crate::error::{InspectorError, InspectorResult};

/// Producer of registry snapshots
pub trait SnapshotSource: Send {
    /// Current snapshot. Returning the same `Arc` while nothing changed lets
    /// memoized selectors skip work.
    fn load(&mut self) -> InspectorResult<Arc<StateSnapshot>>;

    /// Human readable origin for logs
    fn describe(&self) -> String;
}

/// Reads the JSON snapshot dump written by the sync layer
pub struct FileSnapshotSource {
    path: PathBuf,
    cached: Option<(SystemTime, Arc<StateSnapshot>)>,
    reloads: usize,
}

impl FileSnapshotSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            cached: None,
            reloads: 0,
        }
    }

    /// How many times the file has been decoded
    pub fn reloads(&self) -> usize {
        self.reloads
    }

    fn modified(&self) -> InspectorResult<SystemTime> {
        let metadata = fs::metadata(&self.path).map_err(|e| {
            InspectorError::SourceUnavailable(format!("{}: {}", self.path.display(), e))
        })?;
        Ok(metadata.modified()?)
    }
}

impl SnapshotSource for FileSnapshotSource {
    fn load(&mut self) -> InspectorResult<Arc<StateSnapshot>> {
        let modified = self.modified()?;

        if let Some((cached_at, snapshot)) = &self.cached {
            if *cached_at == modified {
                return Ok(snapshot.clone());
            }
        }

        let content = fs::read_to_string(&self.path)?;
        let decoded = StateSnapshot::from_json(&content)?;
        let snapshot = match &self.cached {
            Some((_, previous)) => decoded.reconcile(previous),
            None => decoded,
        };

        self.reloads += 1;
        debug!(
            path = %self.path.display(),
            listings = snapshot.listings.len(),
            challenges = snapshot.challenges.len(),
            reloads = self.reloads,
            "snapshot reloaded"
        );

        let snapshot = Arc::new(snapshot);
        self.cached = Some((modified, snapshot.clone()));
        Ok(snapshot)
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}

/// Handle to registry state and the rules used to interpret it
pub struct CivilClient {
    source: Box<dyn SnapshotSource>,
    clock: Arc<dyn Clock>,
    rules: Arc<dyn DomainRules>,
}

impl CivilClient {
    /// Open the configured snapshot file and check it decodes
    pub fn connect(config: &ClientConfig) -> InspectorResult<Self> {
        let source = FileSnapshotSource::new(&config.snapshot_path);
        let mut client = Self::with_source(config, Box::new(source));
        client.snapshot()?;
        info!(source = %client.source.describe(), now = client.now(), "client connected");
        Ok(client)
    }

    /// Client over an arbitrary source
    pub fn with_source(config: &ClientConfig, source: Box<dyn SnapshotSource>) -> Self {
        let clock: Arc<dyn Clock> = match config.evaluation_time {
            Some(now) => Arc::new(FixedClock::new(now)),
            None => Arc::new(SystemClock),
        };
        Self::with_clock(source, clock)
    }

    /// Client evaluating deadlines against a caller-owned clock
    pub fn with_clock(source: Box<dyn SnapshotSource>, clock: Arc<dyn Clock>) -> Self {
        let rules: Arc<dyn DomainRules> = Arc::new(CivilRules::new(clock.clone()));

        Self {
            source,
            clock,
            rules,
        }
    }

    pub fn snapshot(&mut self) -> InspectorResult<Arc<StateSnapshot>> {
        self.source.load()
    }

    pub fn rules(&self) -> Arc<dyn DomainRules> {
        self.rules.clone()
    }

    /// Current evaluation time in unix seconds
    pub fn now(&self) -> u64 {
        self.clock.now()
    }

    pub fn describe(&self) -> String {
        self.source.describe()
    }

    /// Release the source
    pub fn shutdown(self) {
        info!(source = %self.source.describe(), "client shut down");
    }
}
