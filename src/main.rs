use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use tracing::{Level, info};

mod bridge;
mod host;

use bridge::report::{REPORT_ID_KEYBOARD, ReportType};
use bridge::{Bridge, BridgeConfig, PROBE_INTERVAL};
use host::comm::{ChannelLink, ConsoleSink};
use host::keyboard::EmuKeyboard;

/// Scan-code keyboard to USB HID bridge, wired to an emulated keyboard for
/// a self-contained demonstration run.
#[derive(Parser)]
#[command(name = "keybridge")]
#[command(about = "A legacy scan-code keyboard to USB HID protocol bridge")]
struct Args {
    /// Text the emulated keyboard types
    #[arg(long, default_value = "hello world")]
    text: String,

    /// Disable the bring-up liveness probe
    #[arg(long)]
    no_probe: bool,

    /// Write logs to a file in the temp directory instead of stdio
    #[arg(long)]
    log_file: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn run_for(
    bridge: &mut Bridge<ChannelLink, ConsoleSink>,
    keyboard: &mut EmuKeyboard,
    iterations: u32,
) {
    for _ in 0..iterations {
        keyboard.tick();
        bridge.poll(Instant::now());
        thread::sleep(Duration::from_millis(1));
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let level = if args.verbose {
        Level::TRACE
    } else {
        Level::INFO
    };
    if args.log_file {
        host::logging::setup_logging_file(level);
    } else {
        host::logging::setup_logging_stdio(level);
    }

    info!("keybridge demo starting");

    let config = BridgeConfig {
        probe_interval: if args.no_probe {
            None
        } else {
            Some(PROBE_INTERVAL)
        },
    };
    let (link, commands) = ChannelLink::pair();
    let mut bridge = Bridge::new(link, ConsoleSink, config);
    let mut keyboard = EmuKeyboard::new(commands, bridge.queue());

    // Power-on self test announces the keyboard and triggers the first
    // indicator sync.
    keyboard.power_on();
    run_for(&mut bridge, &mut keyboard, 10);

    // The host turns num lock on.
    bridge.host_report(REPORT_ID_KEYBOARD, ReportType::Output, &[0x01]);
    run_for(&mut bridge, &mut keyboard, 10);
    info!("keyboard lamps: {:?}", keyboard.leds());

    info!("typing {:?}", args.text);
    for c in args.text.chars() {
        keyboard.tap_char(c);
        run_for(&mut bridge, &mut keyboard, 5);
    }

    // Function layer: hold the secondary trigger and tap volume up.
    info!("volume up through the function layer");
    keyboard.press_extended(0x14);
    keyboard.press_extended(0x75);
    run_for(&mut bridge, &mut keyboard, 5);
    keyboard.release_extended(0x75);
    keyboard.release_extended(0x14);
    run_for(&mut bridge, &mut keyboard, 10);

    info!("keybridge demo finished");
    Ok(())
}
