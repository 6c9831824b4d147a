#![allow(dead_code)]

use gnip_kinesis::{ConfigurationProvider, MapEnv, PropertySet};
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Writes `raw` as a property resource in a fresh temp dir.
/// Keep the `TempDir` alive for as long as the path is used.
pub fn properties_file(raw: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::Builder::new()
        .prefix("gnip_kinesis_test_")
        .tempdir()
        .expect("failed to create temp dir");
    let path = dir.path().join("config.properties");
    fs::write(&path, raw).expect("failed to write properties");
    (dir, path)
}

pub fn provider(raw: &str) -> ConfigurationProvider<Arc<MapEnv>> {
    provider_with_env(raw, Arc::new(MapEnv::new()))
}

pub fn provider_with_env(raw: &str, env: Arc<MapEnv>) -> ConfigurationProvider<Arc<MapEnv>> {
    let properties = PropertySet::parse(raw).expect("failed to parse properties");
    ConfigurationProvider::from_properties(properties, env)
}

/// Formatted log output collected by [`capture_logs`].
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub fn lines(&self) -> Vec<String> {
        let buf = self.0.lock().expect("log buffer poisoned");
        String::from_utf8_lossy(&buf)
            .lines()
            .map(str::to_owned)
            .collect()
    }

    /// Index of the first line containing `needle`.
    pub fn position(&self, needle: &str) -> Option<usize> {
        self.lines().iter().position(|l| l.contains(needle))
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .expect("log buffer poisoned")
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Runs `f` with a thread-local subscriber writing plain lines into a buffer.
pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, CapturedLogs) {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .without_time()
        .with_target(false)
        .with_level(true)
        .finish();

    let out = tracing::subscriber::with_default(subscriber, f);
    (out, logs)
}
