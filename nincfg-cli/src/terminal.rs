//! Terminal backend
//!
//! Reads whitespace-separated command tokens from stdin on a background
//! thread and prints frames to stdout. End of input asks the loop to exit.

use nincfg_core::host::{InputSource, LifecycleSource, LifecycleStatus, RenderSink};
use nincfg_core::session::EditorEvent;
use std::io::BufRead;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;

/// Map one input token to an event. Unknown tokens are ignored.
pub fn parse_token(token: &str) -> Option<EditorEvent> {
    match token.to_ascii_lowercase().as_str() {
        "w" | "up" => Some(EditorEvent::Up),
        "s" | "down" => Some(EditorEvent::Down),
        "a" | "left" => Some(EditorEvent::Left),
        "d" | "right" => Some(EditorEvent::Right),
        "+" | "confirm" => Some(EditorEvent::Confirm),
        "-" | "cancel" => Some(EditorEvent::Cancel),
        _ => None,
    }
}

/// Shared exit request, raised by an input backend and read by the loop.
#[derive(Debug, Clone, Default)]
pub struct ExitSignal(Arc<AtomicBool>);

impl ExitSignal {
    pub fn raise(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Lifecycle for a foreground process: running until an exit is requested.
pub struct ProcessLifecycle {
    exit: ExitSignal,
}

impl ProcessLifecycle {
    pub fn new(exit: ExitSignal) -> Self {
        Self { exit }
    }
}

impl LifecycleSource for ProcessLifecycle {
    fn poll(&mut self) -> LifecycleStatus {
        if self.exit.is_raised() {
            LifecycleStatus::Exiting
        } else {
            LifecycleStatus::Running
        }
    }
}

pub struct StdinInput {
    events: Receiver<EditorEvent>,
    exit: ExitSignal,
}

impl StdinInput {
    /// Start the reader thread.
    pub fn spawn(exit: ExitSignal) -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else { break };
                for token in line.split_whitespace() {
                    match parse_token(token) {
                        Some(event) => {
                            if tx.send(event).is_err() {
                                return;
                            }
                        }
                        None => log::debug!("Ignoring input token {:?}", token),
                    }
                }
            }
        });
        Self::from_receiver(rx, exit)
    }

    pub fn from_receiver(events: Receiver<EditorEvent>, exit: ExitSignal) -> Self {
        Self { events, exit }
    }
}

impl InputSource for StdinInput {
    fn poll_event(&mut self) -> Option<EditorEvent> {
        match self.events.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                // Queued tokens are drained before this point
                self.exit.raise();
                None
            }
        }
    }
}

/// Prints each frame padded to a fixed height.
pub struct ConsoleSink {
    screen_lines: usize,
}

impl ConsoleSink {
    pub fn new(screen_lines: usize) -> Self {
        Self { screen_lines }
    }

    pub fn frame(&self, lines: &[String]) -> Vec<String> {
        let mut frame = lines.to_vec();
        if frame.len() < self.screen_lines {
            frame.resize(self.screen_lines, String::new());
        }
        frame
    }
}

impl RenderSink for ConsoleSink {
    fn draw(&mut self, lines: &[String]) {
        for line in self.frame(lines) {
            println!("{}", line);
        }
    }
}
