//! CHIP-8 assembler CLI.

use std::path::PathBuf;
use std::process;

use argh::FromArgs;
use log::LevelFilter;

use chip8_studio::assembler::Assembler;
use chip8_studio::errors::CResult;

/// assemble a .c8s source file into a CHIP-8 ROM
#[derive(FromArgs)]
struct Args {
    /// source file path (must end in .c8s)
    #[argh(positional)]
    input: PathBuf,

    /// output ROM path (default: input path with a .ch8 extension)
    #[argh(option)]
    outpath: Option<PathBuf>,

    /// stop after lexing, emit nothing
    #[argh(switch)]
    skip_parsing: bool,

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
    let assembler = Assembler::from_path(&args.input)?;

    if args.skip_parsing {
        let tokens = assembler.tokenize();
        log::debug!("{} tokens scanned", tokens.len());
        return Ok(());
    }

    let cartridge = assembler.assemble_cartridge()?;
    let default_outpath = args.input.with_extension("ch8");
    let outpath = args.outpath.unwrap_or(default_outpath);
    cartridge.save_to_path(&outpath)?;

    println!("ROM generated at {}", outpath.display());
    Ok(())
}
