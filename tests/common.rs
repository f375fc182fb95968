#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{Duration, Local, TimeZone, Utc};
use rcountdown::core::channels::{AlertChannels, LinkChannel, NotificationChannel, SoundChannel};
use std::cell::RefCell;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;

/// 2026-01-01T00:00:00Z
pub const T0: i64 = 1_767_225_600_000;

pub fn rcd() -> Command {
    cargo_bin_cmd!("rcountdown")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rcountdown.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Initialize a fresh test DB through the CLI.
pub fn init_test_db(name: &str) -> String {
    let db_path = setup_test_db(name);
    rcd()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();
    db_path
}

/// Local start time `secs` seconds from now, in the CLI's input format.
pub fn start_in(secs: i64) -> String {
    (Local::now() + Duration::seconds(secs))
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

/// RFC 3339 text for an epoch-millisecond instant.
pub fn rfc(ms: i64) -> String {
    Utc.timestamp_millis_opt(ms).unwrap().to_rfc3339()
}

/// Add a target through the CLI and return its short id.
pub fn add_target(db_path: &str, title: &str, start: &str, extra: &[&str]) -> String {
    let mut args = vec!["--db", db_path, "--test", "add", title, "https://example.com/item", start];
    args.extend_from_slice(extra);
    let out = rcd().args(&args).output().expect("run add");
    assert!(out.status.success());

    let stdout = String::from_utf8_lossy(&out.stdout);
    let marker = "Added target ";
    let pos = stdout.find(marker).expect("add output contains the new id");
    stdout[pos + marker.len()..].chars().take(8).collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Sound(u32),
    Notify(String, String),
    Open(String),
}

/// Alert channel fake that records every call, in order.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    effects: Rc<RefCell<Vec<Effect>>>,
    pub ready_calls: Rc<RefCell<u32>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn channels(&self) -> AlertChannels {
        AlertChannels::new(
            Box::new(self.clone()),
            Box::new(self.clone()),
            Box::new(self.clone()),
        )
    }

    pub fn effects(&self) -> Vec<Effect> {
        self.effects.borrow().clone()
    }

    pub fn clear(&self) {
        self.effects.borrow_mut().clear();
    }

    pub fn opens(&self) -> usize {
        self.effects()
            .iter()
            .filter(|e| matches!(e, Effect::Open(_)))
            .count()
    }

    pub fn sounds(&self) -> Vec<u32> {
        self.effects()
            .iter()
            .filter_map(|e| match e {
                Effect::Sound(n) => Some(*n),
                _ => None,
            })
            .collect()
    }
}

impl SoundChannel for Recorder {
    fn ensure_ready(&mut self) {
        *self.ready_calls.borrow_mut() += 1;
    }

    fn pulses(&mut self, count: u32) {
        self.effects.borrow_mut().push(Effect::Sound(count));
    }
}

impl NotificationChannel for Recorder {
    fn notify(&mut self, title: &str, body: &str) {
        self.effects
            .borrow_mut()
            .push(Effect::Notify(title.to_string(), body.to_string()));
    }
}

impl LinkChannel for Recorder {
    fn open(&mut self, url: &str) {
        self.effects.borrow_mut().push(Effect::Open(url.to_string()));
    }
}
