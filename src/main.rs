//! syntype — turn typing into music.
//!
//! One binary, three input channels. The terminal channel works anywhere a
//! terminal does; the device channel reads /dev/input on Linux; the hook
//! channel captures keys system-wide through the OS hook API.

use std::time::Duration;

use clap::{Parser, ValueEnum};

use syntype::config::Config;
use syntype::controller::Controller;
use syntype::engine::MidirEngine;
use syntype::input::{self, InputError};
use syntype::mode::Mode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Channel {
    /// Polled terminal input: 8 fixed keys, release inferred by timeout.
    Term,
    /// Global /dev/input device (Linux; needs read access to the node).
    Device,
    /// Cross-platform keyboard hook.
    Hook,
}

#[derive(Parser, Debug)]
#[command(name = "syntype", about = "Generative typing synthesizer controller")]
struct Args {
    /// Input channel to run.
    #[arg(long, value_enum, default_value = "hook")]
    channel: Channel,
    /// Path to a syntype.toml config file.
    #[arg(long)]
    config: Option<String>,
    /// Initial mode: harmonious, mechanical, 8bit, crystal, scifi, massive.
    #[arg(long)]
    mode: Option<String>,
    /// Play a two-second C4 test tone through the engine and exit.
    #[arg(long)]
    test_tone: bool,
}

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("syntype: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = Config::load(args.config.as_deref());

    let initial_mode = args
        .mode
        .as_deref()
        .or(config.mode.as_deref())
        .map(Mode::from_string)
        .unwrap_or_default();

    let engine = MidirEngine::new(config.midi_port.clone());
    let mut controller = Controller::new(Box::new(engine), initial_mode)?;

    let result = if args.test_tone {
        test_tone(&mut controller);
        Ok(())
    } else {
        match args.channel {
            Channel::Term => input::term::run(&mut controller, &config),
            Channel::Device => run_device(&mut controller, &config),
            Channel::Hook => input::hook::run(&mut controller),
        }
    };

    controller.shutdown();
    result?;
    println!("Stopped.");
    Ok(())
}

fn test_tone(controller: &mut Controller) {
    println!("Playing test tone (C4) for 2 seconds...");
    controller.note_on_fixed("test-tone", 60, 100);
    std::thread::sleep(Duration::from_secs(2));
    controller.note_off("test-tone");
}

#[cfg(target_os = "linux")]
fn run_device(controller: &mut Controller, config: &Config) -> Result<(), InputError> {
    input::device::run(controller, config)
}

#[cfg(not(target_os = "linux"))]
fn run_device(_controller: &mut Controller, _config: &Config) -> Result<(), InputError> {
    Err(InputError::Unsupported)
}
