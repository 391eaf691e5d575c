//! In-memory durable store for development and tests.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use ll_protocol::LogId;

use super::{DurableStore, StoreResult};

/// Durable store backed by a `RwLock<HashMap>`. Contents live as long as
/// the process.
#[derive(Default)]
pub struct MemoryDurableStore {
    logs: RwLock<HashMap<LogId, String>>,
}

impl MemoryDurableStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_logs(logs: impl IntoIterator<Item = (LogId, String)>) -> Self {
        Self {
            logs: RwLock::new(logs.into_iter().collect()),
        }
    }

    /// Sample Minecraft server logs for development mode.
    pub fn with_sample_data() -> Self {
        let samples = [
            ("crash01", SAMPLE_CRASH_LOG),
            ("clean01", SAMPLE_CLEAN_LOG),
        ];
        Self::with_logs(samples.into_iter().filter_map(|(raw, content)| {
            LogId::parse(raw)
                .ok()
                .map(|id| (id, content.to_string()))
        }))
    }

    pub async fn insert(&self, id: LogId, content: impl Into<String>) {
        self.logs.write().await.insert(id, content.into());
    }

    pub async fn len(&self) -> usize {
        self.logs.read().await.len()
    }
}

#[async_trait]
impl DurableStore for MemoryDurableStore {
    async fn exists(&self, id: &LogId) -> StoreResult<bool> {
        Ok(self.logs.read().await.contains_key(id))
    }

    async fn fetch(&self, id: &LogId) -> StoreResult<Option<String>> {
        Ok(self.logs.read().await.get(id).cloned())
    }

    fn backend_name(&self) -> &str {
        "memory"
    }
}

const SAMPLE_CRASH_LOG: &str = "\
[12:00:01] [main/INFO]: Loading properties
[12:00:01] [main/INFO]: Default game type: SURVIVAL
[12:00:02] [Server thread/INFO]: Starting Minecraft server on *:25565
[12:00:05] [Server thread/INFO]: Preparing level \"world\"
[12:00:09] [Server thread/WARN]: Can't keep up! Is the server overloaded? Running 2504ms or 50 ticks behind
[12:00:12] [Server thread/ERROR]: Encountered an unexpected exception
net.minecraft.util.ReportedException: Ticking entity
\tat net.minecraft.server.MinecraftServer.tick(MinecraftServer.java:812)
Caused by: java.lang.OutOfMemoryError: Java heap space
\tat java.util.Arrays.copyOf(Arrays.java:3236)
[12:00:12] [Server thread/INFO]: Stopping server";

const SAMPLE_CLEAN_LOG: &str = "\
[08:30:00] [main/INFO]: Loading properties
[08:30:01] [Server thread/INFO]: Starting Minecraft server on *:25565
[08:30:04] [Server thread/INFO]: Preparing spawn area: 100%
[08:30:04] [Server thread/INFO]: Done (3.2s)! For help, type \"help\"
[08:41:17] [Server thread/INFO]: Steve joined the game";
