#![allow(dead_code)]

use std::collections::VecDeque;
use std::fs;
use std::path::Path;
use std::sync::Mutex;

use adbcp::bridge::{Bridge, BridgeCommand};
use adbcp::error::BridgeError;
use adbcp::prompt::Prompter;

type Handler = Box<dyn Fn(&BridgeCommand) -> Result<String, BridgeError>>;

/// Records every command and answers through a handler.
pub struct FakeBridge {
    calls: Mutex<Vec<BridgeCommand>>,
    handler: Handler,
}

impl FakeBridge {
    pub fn new(handler: impl Fn(&BridgeCommand) -> Result<String, BridgeError> + 'static) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            handler: Box::new(handler),
        }
    }

    /// Every command succeeds with empty output.
    pub fn ok() -> Self {
        Self::new(|_| Ok(String::new()))
    }

    pub fn calls(&self) -> Vec<BridgeCommand> {
        self.calls.lock().unwrap().clone()
    }

    pub fn transfer_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, BridgeCommand::Push { .. } | BridgeCommand::Pull { .. }))
            .count()
    }
}

impl Bridge for FakeBridge {
    fn run(&self, command: &BridgeCommand) -> Result<String, BridgeError> {
        self.calls.lock().unwrap().push(command.clone());
        (self.handler)(command)
    }
}

pub fn bridge_failure(output: &str) -> BridgeError {
    BridgeError::Failed {
        command: "adb".into(),
        status: "exit status: 1".into(),
        output: output.into(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Select(usize),
    Multi(Vec<usize>),
    Text(String),
    Confirm(bool),
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Select,
    Multi,
    Text,
    Confirm,
}

/// Replays canned answers and records what was asked.
#[derive(Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<Answer>,
    pub asked: Vec<(Kind, String, Vec<String>)>,
    pub infos: Vec<String>,
    pub warnings: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            ..Default::default()
        }
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    pub fn asked_kinds(&self) -> Vec<Kind> {
        self.asked.iter().map(|(k, _, _)| *k).collect()
    }

    fn next(&mut self, kind: Kind, message: &str, options: &[String]) -> Answer {
        self.asked.push((kind, message.to_string(), options.to_vec()));
        self.answers
            .pop_front()
            .unwrap_or_else(|| panic!("no scripted answer for {:?} prompt {:?}", kind, message))
    }
}

impl Prompter for ScriptedPrompter {
    fn select(&mut self, message: &str, options: &[String]) -> anyhow::Result<Option<usize>> {
        match self.next(Kind::Select, message, options) {
            Answer::Select(i) => {
                assert!(i < options.len(), "select index {} out of range", i);
                Ok(Some(i))
            }
            Answer::Cancel => Ok(None),
            other => panic!("expected select answer for {:?}, got {:?}", message, other),
        }
    }

    fn multiselect(
        &mut self,
        message: &str,
        options: &[String],
    ) -> anyhow::Result<Option<Vec<usize>>> {
        match self.next(Kind::Multi, message, options) {
            Answer::Multi(picked) => {
                assert!(!picked.is_empty(), "multiselect requires a selection");
                assert!(picked.iter().all(|i| *i < options.len()));
                Ok(Some(picked))
            }
            Answer::Cancel => Ok(None),
            other => panic!("expected multiselect answer for {:?}, got {:?}", message, other),
        }
    }

    fn text(&mut self, message: &str, _placeholder: &str) -> anyhow::Result<Option<String>> {
        match self.next(Kind::Text, message, &[]) {
            Answer::Text(t) => Ok(Some(t)),
            Answer::Cancel => Ok(None),
            other => panic!("expected text answer for {:?}, got {:?}", message, other),
        }
    }

    fn confirm(&mut self, message: &str, _default: bool) -> anyhow::Result<Option<bool>> {
        match self.next(Kind::Confirm, message, &[]) {
            Answer::Confirm(b) => Ok(Some(b)),
            Answer::Cancel => Ok(None),
            other => panic!("expected confirm answer for {:?}, got {:?}", message, other),
        }
    }

    fn info(&mut self, msg: &str) {
        self.infos.push(msg.to_string());
    }

    fn warn(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }
}

pub fn write_file(path: &Path, len: usize) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, vec![0xABu8; len]).unwrap();
}

/// `root/{a.txt (10 bytes), sub/{b.txt (20 bytes)}}` inside `base`.
pub fn sample_tree(base: &Path) -> std::path::PathBuf {
    let root = base.join("root");
    write_file(&root.join("a.txt"), 10);
    write_file(&root.join("sub/b.txt"), 20);
    root
}

pub fn s(p: &Path) -> String {
    p.to_string_lossy().into_owned()
}
