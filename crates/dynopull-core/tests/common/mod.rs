//! Common test utilities.
//!
//! Hand-written fakes for the core ports: a scripted command runner, a
//! recording chat transport and an archiver that writes a stub file.

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use dynopull_core::{
    ArchiveError, ArchiveSummary, Archiver, BotService, BotServiceConfig, ChatId, ChatTransport,
    CommandOutput, CommandRunner, CommandSpec, CredentialStore, GatewayConfig, HerokuGateway,
    MessageId, OutgoingDocument, ProcessError, TransportError,
};

/// Container ID returned by the scripted `docker create`.
pub const CONTAINER_ID: &str = "c0ffee123456";

/// Runner that records every spec and answers from a script keyed by
/// `"<program> <first arg>"`.
#[derive(Default)]
pub struct ScriptedRunner {
    calls: Mutex<Vec<CommandSpec>>,
    script: Mutex<HashMap<String, Result<CommandOutput, ProcessError>>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        let runner = Self::default();
        runner.respond("docker create", Ok(CommandOutput::ok(format!("{CONTAINER_ID}\n"))));
        runner
    }

    pub fn respond(&self, key: &str, response: Result<CommandOutput, ProcessError>) {
        self.script
            .lock()
            .unwrap()
            .insert(key.to_string(), response);
    }

    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.lock().unwrap().clone()
    }

    /// Recorded calls rendered as `"<program> <first arg>"`.
    pub fn call_keys(&self) -> Vec<String> {
        self.calls().iter().map(key_of).collect()
    }
}

fn key_of(spec: &CommandSpec) -> String {
    match spec.args.first() {
        Some(first) => format!("{} {first}", spec.program),
        None => spec.program.clone(),
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, ProcessError> {
        self.calls.lock().unwrap().push(spec.clone());
        self.script
            .lock()
            .unwrap()
            .get(&key_of(spec))
            .cloned()
            .unwrap_or_else(|| Ok(CommandOutput::ok("")))
    }
}

/// What the transport was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    Text(ChatId, String),
    Document {
        chat: ChatId,
        file_name: String,
        caption: Option<String>,
        existed: bool,
    },
    Deleted(ChatId, MessageId),
}

#[derive(Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<Sent>>,
    refuse_deletes: AtomicBool,
}

impl RecordingTransport {
    /// Make every `delete_message` fail, as in a group without admin rights.
    pub fn refuse_deletes(&self) {
        self.refuse_deletes.store(true, Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter_map(|s| match s {
                Sent::Text(_, text) => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn documents(&self) -> Vec<Sent> {
        self.sent()
            .into_iter()
            .filter(|s| matches!(s, Sent::Document { .. }))
            .collect()
    }
}

#[async_trait]
impl ChatTransport for RecordingTransport {
    async fn send_text(&self, chat: ChatId, text: &str) -> Result<(), TransportError> {
        self.sent
            .lock()
            .unwrap()
            .push(Sent::Text(chat, text.to_string()));
        Ok(())
    }

    async fn send_document(
        &self,
        chat: ChatId,
        document: &OutgoingDocument,
    ) -> Result<(), TransportError> {
        self.sent.lock().unwrap().push(Sent::Document {
            chat,
            file_name: document.file_name.clone(),
            caption: document.caption.clone(),
            existed: document.path.exists(),
        });
        Ok(())
    }

    async fn delete_message(
        &self,
        chat: ChatId,
        message: MessageId,
    ) -> Result<(), TransportError> {
        if self.refuse_deletes.load(Ordering::SeqCst) {
            return Err(TransportError::Rejected {
                message: "Bad Request: message can't be deleted".to_string(),
            });
        }
        self.sent.lock().unwrap().push(Sent::Deleted(chat, message));
        Ok(())
    }
}

/// Archiver that writes a stub archive of a fixed reported size.
pub struct StubArchiver {
    pub reported_bytes: u64,
    pub requests: Mutex<Vec<(PathBuf, PathBuf, PathBuf)>>,
}

impl StubArchiver {
    pub fn new(reported_bytes: u64) -> Self {
        Self {
            reported_bytes,
            requests: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl Archiver for StubArchiver {
    async fn zip_dir(
        &self,
        source: &Path,
        base: &Path,
        dest: &Path,
    ) -> Result<ArchiveSummary, ArchiveError> {
        self.requests.lock().unwrap().push((
            source.to_path_buf(),
            base.to_path_buf(),
            dest.to_path_buf(),
        ));
        std::fs::write(dest, b"PK\x05\x06").map_err(|e| ArchiveError::Io {
            path: dest.to_path_buf(),
            reason: e.to_string(),
        })?;
        Ok(ArchiveSummary {
            path: dest.to_path_buf(),
            files: 3,
            bytes: self.reported_bytes,
        })
    }
}

/// A fully wired service over fakes.
pub struct Harness {
    pub service: BotService,
    pub runner: Arc<ScriptedRunner>,
    pub transport: Arc<RecordingTransport>,
    pub archiver: Arc<StubArchiver>,
    pub credentials: Arc<CredentialStore>,
    pub work_dir: tempfile::TempDir,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(|_| {})
    }

    pub fn with_config(adjust: impl FnOnce(&mut BotServiceConfig)) -> Self {
        let work_dir = tempfile::tempdir().unwrap();
        let mut config = BotServiceConfig {
            work_dir: Some(work_dir.path().to_path_buf()),
            ..BotServiceConfig::default()
        };
        adjust(&mut config);

        let runner = Arc::new(ScriptedRunner::new());
        let transport = Arc::new(RecordingTransport::default());
        let archiver = Arc::new(StubArchiver::new(1024));
        let credentials = Arc::new(CredentialStore::default());
        let gateway = HerokuGateway::new(runner.clone(), GatewayConfig::default());

        let service = BotService::new(
            config,
            credentials.clone(),
            gateway,
            archiver.clone(),
            transport.clone(),
        );

        Self {
            service,
            runner,
            transport,
            archiver,
            credentials,
            work_dir,
        }
    }

    /// Number of entries left in the parent working directory.
    pub fn leftover_workspaces(&self) -> usize {
        std::fs::read_dir(self.work_dir.path()).unwrap().count()
    }
}
