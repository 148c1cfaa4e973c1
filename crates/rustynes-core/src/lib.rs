//! RustyNES Core - NES Emulation Integration Layer.
//!
//! This crate provides the high-level NES emulation API, integrating the
//! cycle-accurate 6502 CPU, the 2C02 PPU, and a Mapper-0 (NROM) cartridge
//! into a complete console, plus a pure-function disassembler.
//!
//! # Architecture
//!
//! The core crate connects the CPU and PPU through a central bus:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Console                              │
//! │  ┌─────────────────────────────────────────────────────┐   │
//! │  │                      NesBus                          │   │
//! │  │  ┌─────┐  ┌─────┐  ┌───────────┐  ┌──────────────┐  │   │
//! │  │  │ RAM │  │ PPU │  │ Cartridge │  │ Controllers  │  │   │
//! │  │  │ 2KB │  │     │  │  (NROM)   │  │              │  │   │
//! │  │  └─────┘  └─────┘  └───────────┘  └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────┘   │
//! │                          ▲                                  │
//! │                          │                                  │
//! │                     ┌────┴────┐                             │
//! │                     │   CPU   │                             │
//! │                     │  6502   │                             │
//! │                     └─────────┘                             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! `NesBus::clock` is the single master-tick primitive: the PPU advances
//! every tick, the CPU advances every third tick, and any NMI the PPU raises
//! is delivered to the CPU in the same tick it occurs.
//!
//! # Usage
//!
//! ```no_run
//! use rustynes_core::{Console, Button};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let rom_data = std::fs::read("game.nes")?;
//! let mut console = Console::new(&rom_data)?;
//!
//! console.power_on();
//!
//! loop {
//!     console.set_controller(0, Button::A as u8 | Button::Start as u8);
//!     console.step_frame();
//!
//!     // 256x240 RGB24 framebuffer.
//!     let _framebuffer = console.framebuffer();
//! }
//! # }
//! ```

mod bus;
mod cartridge;
mod console;
mod disassembler;
mod input;

pub use bus::{BreakpointKind, NesBus, StepResult};
pub use cartridge::Cartridge;
pub use console::{Console, ConsoleError, timing};
pub use disassembler::disassemble;
pub use input::{Button, Controller};

pub use rustynes_cpu::Cpu;
pub use rustynes_mappers::{Mapper, Mirroring, Rom, RomError, RomHeader, create_mapper};
pub use rustynes_ppu::Ppu;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// NES screen dimensions.
pub mod screen {
    /// Screen width in pixels.
    pub const WIDTH: u32 = 256;
    /// Screen height in pixels.
    pub const HEIGHT: u32 = 240;
    /// Total pixels per frame.
    pub const PIXELS: u32 = WIDTH * HEIGHT;
    /// Bytes per frame (RGB24, 3 bytes/pixel).
    pub const FRAMEBUFFER_SIZE: usize = (PIXELS * 3) as usize;
}
