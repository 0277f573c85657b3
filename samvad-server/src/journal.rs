//! Append-only journal of review decisions.
//!
//! Entries are serialized as JSON lines by a background task so that request
//! handlers never wait on disk. The journal is never read back by the server.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc;
use tracing::{error, info};
use uuid::Uuid;

use samvad_core::{ResolutionAction, ReviewItemId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Decision {
    Resolved {
        action: ResolutionAction,
        actor: String,
    },
    Reverted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionEntry {
    pub id: Uuid,
    pub recorded_at: DateTime<Utc>,
    pub item_id: ReviewItemId,
    #[serde(flatten)]
    pub decision: Decision,
}

impl DecisionEntry {
    pub fn new(item_id: ReviewItemId, decision: Decision) -> Self {
        Self {
            id: Uuid::new_v4(),
            recorded_at: Utc::now(),
            item_id,
            decision,
        }
    }
}

#[derive(Clone)]
pub struct DecisionJournal {
    sender: mpsc::UnboundedSender<DecisionEntry>,
}

impl DecisionJournal {
    /// Open (or create) the journal file and start the writer task.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(path: PathBuf) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create journal directory {}", parent.display())
                })?;
            }
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open decision journal {}", path.display()))?;

        let (sender, receiver) = mpsc::unbounded_channel();

        info!("Recording decisions to: {}", path.display());
        tokio::spawn(Self::writer_task(File::from_std(file), receiver));

        Ok(Self { sender })
    }

    pub fn record(&self, entry: DecisionEntry) {
        if self.sender.send(entry).is_err() {
            error!("Failed to send entry to decision journal: writer stopped");
        }
    }

    async fn writer_task(mut file: File, mut receiver: mpsc::UnboundedReceiver<DecisionEntry>) {
        while let Some(entry) = receiver.recv().await {
            match serde_json::to_string(&entry) {
                Ok(json_line) => {
                    if let Err(e) = file.write_all(format!("{}\n", json_line).as_bytes()).await {
                        error!("Failed to write decision to journal: {}", e);
                        continue;
                    }
                    if let Err(e) = file.flush().await {
                        error!("Failed to flush decision journal: {}", e);
                    }
                }
                Err(e) => {
                    error!("Failed to serialize decision: {}", e);
                }
            }
        }

        info!("Decision journal writer shutting down");
    }
}
