// CLI command handlers
use crate::settings::EditorSettings;
use crate::terminal::{ConsoleSink, ExitSignal, ProcessLifecycle, StdinInput};
use anyhow::{Context, Result};
use nincfg_core::host::{
    self, decode_error_screen, EditLoop, InputSource, LifecycleSource, LifecycleStatus, LoopStatus,
    RenderSink,
};
use nincfg_core::record::Fixup;
use nincfg_core::{ConfigRecord, EditSession};
use std::fs;
use std::path::Path;
use std::thread;
use std::time::Duration;

fn read_record(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("Failed to read record: {}", path.display()))
}

fn decode(path: &Path) -> Result<(ConfigRecord, Vec<Fixup>)> {
    let data = read_record(path)?;
    ConfigRecord::decode_with_report(&data)
        .with_context(|| format!("Failed to decode record: {}", path.display()))
}

/// Print every field of the record, as text or as a JSON array of rows.
pub fn show_record(path: &Path, json: bool) -> Result<()> {
    let data = read_record(path)?;
    let record = host::load(&data)
        .with_context(|| format!("Failed to decode record: {}", path.display()))?;
    let session = EditSession::new(record);

    if json {
        let rows = session.snapshot()?;
        let content = serde_json::to_string_pretty(&rows).context("Failed to serialize fields")?;
        println!("{}", content);
    } else {
        for row in session.snapshot()? {
            println!("{:<24}{}", format!("{}:", row.label), row.value);
        }
    }

    Ok(())
}

/// Report what loading the record would change. Returns the number of repairs.
pub fn check_record(path: &Path) -> Result<usize> {
    println!("Checking record: {}", path.display());
    let (_, fixups) = decode(path)?;

    if fixups.is_empty() {
        println!("Record is clean");
        return Ok(0);
    }

    let mut repairs = 0;
    for fixup in &fixups {
        if fixup.is_repair() {
            repairs += 1;
            println!("  repair: {}", fixup);
        } else {
            println!("  clear:  {}", fixup);
        }
    }
    println!("{} change(s) on load, {} repair(s)", fixups.len(), repairs);
    Ok(repairs)
}

/// Run the interactive editor and write the record back on commit.
pub fn edit_record(path: &Path, settings: &EditorSettings, gamepad: bool) -> Result<()> {
    let exit = ExitSignal::default();
    let mut lifecycle = ProcessLifecycle::new(exit.clone());
    let mut input = open_input(gamepad, exit)?;
    let mut sink = ConsoleSink::new(settings.screen_lines);
    let tick = Duration::from_millis(settings.tick_ms);

    let data = read_record(path)?;
    let mut edit_loop = match EditLoop::open(&data) {
        Ok(edit_loop) => edit_loop,
        Err(err) => {
            sink.draw(&decode_error_screen(&err));
            wait_for_exit(&mut lifecycle, input.as_mut(), tick);
            return Err(err).with_context(|| format!("Failed to decode record: {}", path.display()));
        }
    };

    log::info!("Editing {}", path.display());
    loop {
        match edit_loop.tick(&mut lifecycle, input.as_mut(), &mut sink)? {
            LoopStatus::Continue => thread::sleep(tick),
            LoopStatus::Committed(bytes) => {
                fs::write(path, bytes)
                    .with_context(|| format!("Failed to write record: {}", path.display()))?;
                println!("Saved {}", path.display());
                return Ok(());
            }
            LoopStatus::Discarded => {
                println!("Changes discarded");
                return Ok(());
            }
            LoopStatus::Exited => {
                log::info!("Editor closed without saving");
                return Ok(());
            }
        }
    }
}

fn open_input(gamepad: bool, exit: ExitSignal) -> Result<Box<dyn InputSource>> {
    if gamepad {
        #[cfg(feature = "gamepad")]
        {
            return Ok(Box::new(crate::gamepad::GamepadInput::new(exit)?));
        }
        #[cfg(not(feature = "gamepad"))]
        anyhow::bail!("Built without gamepad support (enable the \"gamepad\" feature)");
    }
    Ok(Box::new(StdinInput::spawn(exit)))
}

/// Idle on the error screen until the host exits or the user backs out.
fn wait_for_exit(lifecycle: &mut dyn LifecycleSource, input: &mut dyn InputSource, tick: Duration) {
    while lifecycle.poll() != LifecycleStatus::Exiting {
        if input.poll_event().is_some() {
            break;
        }
        thread::sleep(tick);
    }
}
