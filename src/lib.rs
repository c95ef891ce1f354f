//! CHIP-8 platform: a `.c8s` assembler and a CHIP-8 virtual machine.

#![warn(missing_docs)]

#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;

pub mod assembler;
pub mod cartridge;
pub mod core;
pub mod debugger;
pub mod drivers;
pub mod emulator;
pub mod errors;
pub mod peripherals;
pub mod types;
