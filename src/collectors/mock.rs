//! In-memory [`Source`] for collector tests.

use crate::sources::{Source, NOT_AVAILABLE};
use std::cell::Cell;
use std::collections::HashMap;

#[derive(Debug, Default, Clone)]
pub struct MockSource {
    files: HashMap<String, String>,
    dirs: HashMap<String, Vec<String>>,
    commands: HashMap<String, String>,
    calls: Cell<usize>,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: &str, contents: &str) -> Self {
        self.files.insert(path.to_string(), contents.to_string());
        self
    }

    pub fn with_dir(mut self, path: &str, entries: &[&str]) -> Self {
        self.dirs.insert(
            path.to_string(),
            entries.iter().map(|e| e.to_string()).collect(),
        );
        self
    }

    /// `command_line` is the program and its arguments joined by single spaces.
    pub fn with_command(mut self, command_line: &str, stdout: &str) -> Self {
        self.commands
            .insert(command_line.to_string(), stdout.to_string());
        self
    }

    /// Number of reader calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    fn record_call(&self) {
        self.calls.set(self.calls.get() + 1);
    }
}

fn command_line(name: &str, args: &[&str]) -> String {
    std::iter::once(name)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}

impl Source for MockSource {
    async fn read_file(&self, path: &str) -> String {
        self.record_call();
        self.files
            .get(path)
            .map(|c| c.trim().to_string())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    }

    async fn run_command(&self, name: &str, args: &[&str]) -> String {
        self.record_call();
        self.commands
            .get(&command_line(name, args))
            .map(|c| c.trim().to_string())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    }

    async fn list_dir(&self, path: &str) -> Vec<String> {
        self.record_call();
        let mut entries = self.dirs.get(path).cloned().unwrap_or_default();
        entries.sort();
        entries
    }

    async fn exists(&self, path: &str) -> bool {
        self.record_call();
        self.files.contains_key(path) || self.dirs.contains_key(path)
    }
}
