//! CHIP-8 emulator CLI.

use std::path::PathBuf;
use std::process;

use argh::FromArgs;
use log::LevelFilter;

use chip8_studio::cartridge::Cartridge;
use chip8_studio::drivers::{WindowInterface, WinitWindowDriver};
use chip8_studio::emulator::Emulator;
use chip8_studio::errors::CResult;

/// run a CHIP-8 ROM
#[derive(FromArgs)]
struct Args {
    /// ROM path
    #[argh(positional)]
    rom: PathBuf,

    /// instructions executed per 60 Hz tick
    #[argh(option, short = 'c', default = "1")]
    cycles: u32,

    /// verbose mode
    #[argh(switch, short = 'v')]
    verbose: bool,
}

fn main() {
    let args: Args = argh::from_env();

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    if let Err(error) = run(args) {
        eprintln!("{}", error);
        process::exit(1);
    }
}

fn run(args: Args) -> CResult {
    let cartridge = Cartridge::load_from_path(&args.rom)?;

    let mut emulator = Emulator::new();
    emulator.cpu.set_cycles_per_tick(args.cycles);
    emulator.load_game(&cartridge);

    let mut driver = WinitWindowDriver::new();
    driver.run_emulator(emulator)
}
