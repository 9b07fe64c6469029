//! Command-line player: plays MIDI input on one engine and shows levels.

use clap::Parser;
use fmhost::core::config::DEFAULT_SAMPLE_RATE;
use fmhost::prelude::*;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const REFRESH: Duration = Duration::from_millis(50);
const BAR_WIDTH: usize = 30;

/// Plays incoming MIDI on a synthesis engine
#[derive(Parser)]
#[command(name = "fmhost")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Engine family (see --list)
    #[arg(short = 'p', long = "player")]
    player: Option<String>,

    /// Number of chips
    #[arg(short = 'n', long, default_value_t = 2)]
    chips: u32,

    /// Instrument bank file (default: the engine's built-in bank)
    #[arg(short, long)]
    bank: Option<PathBuf>,

    /// Emulator index within the engine family
    #[arg(short, long, default_value_t = 0)]
    emulator: usize,

    /// Output volume in percent
    #[arg(long, default_value_t = 100)]
    volume: u32,

    /// SysEx device id to answer to
    #[arg(long, default_value_t = 0x10)]
    sysex_id: u8,

    /// Audio output device index
    #[cfg(feature = "audio-io")]
    #[arg(long)]
    device: Option<usize>,

    /// Connect the first MIDI input whose name contains this text
    #[cfg(feature = "midi-io")]
    #[arg(long)]
    midi_port: Option<String>,

    /// Run without audio device or MIDI input
    #[arg(long)]
    headless: bool,

    /// List engines, emulators and devices, then exit
    #[arg(long)]
    list: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_level = if args.quiet { "warn" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    let result = if args.list { list() } else { run(args) };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn list() -> Result<()> {
    let mut out = io::stdout().lock();

    writeln!(out, "Engines:")?;
    for &kind in EngineKind::ALL {
        writeln!(out, "  {}: {} ({})", kind.index(), kind, kind.version())?;
        for (index, name) in kind
            .enumerate_emulators(DEFAULT_SAMPLE_RATE)?
            .iter()
            .enumerate()
        {
            writeln!(out, "      {}: {}", index, name)?;
        }
    }

    #[cfg(feature = "audio-io")]
    {
        writeln!(out, "Output devices:")?;
        for device in FmHost::list_output_devices()? {
            writeln!(out, "  {}", device)?;
        }
    }

    #[cfg(feature = "midi-io")]
    {
        writeln!(out, "MIDI inputs:")?;
        for device in FmHost::list_midi_inputs()? {
            writeln!(out, "  {}: {}", device.index, device.name)?;
        }
    }

    Ok(())
}

fn run(args: Args) -> Result<()> {
    let kind = match &args.player {
        Some(name) => EngineKind::from_name(name)?,
        None => EngineKind::default(),
    };

    let mut builder = FmHost::builder()
        .engine(kind)
        .chips(args.chips)
        .emulator(args.emulator)
        .volume(args.volume)
        .sysex_device_id(args.sysex_id);
    if let Some(bank) = args.bank {
        builder = builder.bank(bank);
    }
    if args.headless {
        builder = builder.headless(DEFAULT_SAMPLE_RATE);
    }
    #[cfg(feature = "audio-io")]
    if let Some(device) = args.device {
        builder = builder.output_device(device);
    }
    #[cfg(feature = "midi-io")]
    if let Some(pattern) = args.midi_port {
        builder = builder.midi_port(pattern);
    }

    let host = builder.build()?;
    info!("Press Enter to quit");
    meter(&host)
}

/// Redraws the level meter until Enter is pressed or stdin closes.
fn meter(host: &FmHost) -> Result<()> {
    let (quit_tx, quit_rx) = mpsc::channel();
    thread::spawn(move || {
        let mut line = String::new();
        let _ = io::stdin().lock().read_line(&mut line);
        let _ = quit_tx.send(());
    });

    let mut out = io::stdout();
    loop {
        match quit_rx.recv_timeout(REFRESH) {
            Err(RecvTimeoutError::Timeout) => {}
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
        }

        while let Some(notification) = host.poll_notification() {
            write!(out, "\r\x1b[K")?;
            writeln!(out, "{}", notification.text())?;
        }

        let snapshot = host.snapshot();
        write!(
            out,
            "\rL {} R {} CPU {:5.1}%{}",
            bar(snapshot.left),
            bar(snapshot.right),
            snapshot.cpu_ratio * 100.0,
            if snapshot.is_clipping() { " CLIP" } else { "     " }
        )?;
        out.flush()?;
    }

    writeln!(out)?;
    Ok(())
}

fn bar(level: f64) -> String {
    let filled = ((level.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH);
    format!("[{}{}]", "#".repeat(filled), " ".repeat(BAR_WIDTH - filled))
}
