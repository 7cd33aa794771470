//! Test helper module
//!
//! Provides a scripted resolver and convenient factory methods.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{CoreError, CoreResult};
use crate::traits::{DnsResolver, ResolveFailure};
use crate::types::RecordType;

// ===== ScriptedResolver =====

#[derive(Clone)]
enum Reply {
    Records(Vec<String>),
    Failure(String),
}

/// Resolver returning canned answers; unscripted pairs answer with no records.
pub struct ScriptedResolver {
    replies: RwLock<HashMap<(String, RecordType), Reply>>,
    delays: RwLock<HashMap<(String, RecordType), Duration>>,
    hanging: RwLock<HashSet<String>>,
    unavailable: RwLock<Option<String>>,
    calls: AtomicUsize,
}

impl ScriptedResolver {
    pub fn new() -> Self {
        Self {
            replies: RwLock::new(HashMap::new()),
            delays: RwLock::new(HashMap::new()),
            hanging: RwLock::new(HashSet::new()),
            unavailable: RwLock::new(None),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    pub async fn set_records(&self, name: &str, record_type: RecordType, values: &[&str]) {
        self.replies.write().await.insert(
            (name.to_string(), record_type),
            Reply::Records(values.iter().map(ToString::to_string).collect()),
        );
    }

    pub async fn set_failure(&self, name: &str, record_type: RecordType, message: &str) {
        self.replies.write().await.insert(
            (name.to_string(), record_type),
            Reply::Failure(message.to_string()),
        );
    }

    pub async fn set_delay(&self, name: &str, record_type: RecordType, delay: Duration) {
        self.delays
            .write()
            .await
            .insert((name.to_string(), record_type), delay);
    }

    /// Every lookup for `name` never completes.
    pub async fn set_hanging(&self, name: &str) {
        self.hanging.write().await.insert(name.to_string());
    }

    pub async fn set_unavailable(&self, message: &str) {
        *self.unavailable.write().await = Some(message.to_string());
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DnsResolver for ScriptedResolver {
    async fn resolve(
        &self,
        name: &str,
        record_type: RecordType,
    ) -> Result<Vec<String>, ResolveFailure> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let key = (name.to_string(), record_type);

        if self.hanging.read().await.contains(name) {
            std::future::pending::<()>().await;
        }

        let delay = self.delays.read().await.get(&key).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        match self.replies.read().await.get(&key).cloned() {
            Some(Reply::Records(values)) => Ok(values),
            Some(Reply::Failure(message)) => Err(ResolveFailure::new(message)),
            None => Ok(Vec::new()),
        }
    }

    async fn resolve_detailed(
        &self,
        name: &str,
        record_type: RecordType,
    ) -> Result<Option<String>, ResolveFailure> {
        Ok(Some(format!(";; ANSWER SECTION:\n{name} IN {record_type}")))
    }

    async fn check_available(&self) -> CoreResult<()> {
        match self.unavailable.read().await.clone() {
            Some(message) => Err(CoreError::ResolverUnavailable(message)),
            None => Ok(()),
        }
    }

    fn label(&self) -> String {
        "scripted".to_string()
    }
}

// ===== Factories =====

pub fn lines(raw: &[&str]) -> Vec<String> {
    raw.iter().map(ToString::to_string).collect()
}
