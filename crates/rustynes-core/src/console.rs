//! The top-level NES console: wires CPU, PPU, and cartridge through the bus
//! and exposes the host-facing stepping API.

use std::collections::BTreeMap;

use rustynes_cpu::{Bus as CpuBus, Cpu};
use rustynes_mappers::RomError;

use crate::bus::{BreakpointKind, NesBus, StepResult};
use crate::cartridge::Cartridge;
use crate::disassembler::disassemble;

/// NES emulation timing constants.
pub mod timing {
    /// Master clock frequency (NTSC).
    pub const MASTER_CLOCK_NTSC: u32 = 21_477_272;
    /// CPU clock frequency (NTSC): master / 12.
    pub const CPU_CLOCK_NTSC: u32 = MASTER_CLOCK_NTSC / 12;
    /// PPU clock frequency (NTSC): master / 4.
    pub const PPU_CLOCK_NTSC: u32 = MASTER_CLOCK_NTSC / 4;
    /// PPU dots per scanline.
    pub const PPU_DOTS_PER_SCANLINE: u16 = 341;
    /// Scanlines per frame, including vertical blank.
    pub const PPU_SCANLINES_PER_FRAME: u16 = 262;
}

/// Error constructing a [`Console`].
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConsoleError {
    /// The ROM image could not be parsed, or names an unsupported mapper.
    #[error(transparent)]
    Rom(#[from] RomError),
}

/// A complete NES console: CPU, bus (PPU + cartridge + controllers), and the
/// stepping API a host drives emulation through.
pub struct Console {
    cpu: Cpu,
    bus: NesBus,
}

impl Console {
    /// Load an iNES ROM image and construct a console around it.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError`] if the ROM is malformed or its mapper id is
    /// unsupported.
    pub fn new(rom_bytes: &[u8]) -> Result<Self, ConsoleError> {
        let cartridge = Cartridge::load(rom_bytes)?;
        Ok(Self {
            cpu: Cpu::new(),
            bus: NesBus::new(cartridge),
        })
    }

    /// Alias for [`Console::new`].
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError`] if the ROM is malformed or its mapper id is
    /// unsupported.
    pub fn from_rom_bytes(rom_bytes: &[u8]) -> Result<Self, ConsoleError> {
        Self::new(rom_bytes)
    }

    /// Reset the console: CPU registers are reinitialized and PC is loaded
    /// from the reset vector; PPU scanline/cycle counters are left
    /// undisturbed (documented NES behavior).
    pub fn reset(&mut self) {
        self.bus.clear_breakpoint_hit();
        self.cpu.reset(&mut self.bus);
        self.bus.reset_devices();
    }

    /// Power on the console (cold boot is equivalent to [`Console::reset`]
    /// for this core; there is no distinct battery-RAM warm state).
    pub fn power_on(&mut self) {
        self.reset();
    }

    /// Advance by exactly one master tick: PPU always, CPU every third
    /// tick, with any PPU-raised NMI delivered to the CPU the same tick.
    pub fn clock(&mut self) -> StepResult {
        self.bus.clear_breakpoint_hit();
        self.bus.clock(&mut self.cpu);
        match self.bus.take_breakpoint_hit() {
            Some((addr, kind)) => StepResult::BreakpointHit(addr, kind),
            None => StepResult::Continued,
        }
    }

    /// Advance until the CPU retires its next instruction.
    pub fn step_instruction(&mut self) -> StepResult {
        if self.bus.has_read_breakpoint(self.cpu.pc) {
            return StepResult::BreakpointHit(self.cpu.pc, BreakpointKind::Read);
        }

        loop {
            if let StepResult::BreakpointHit(addr, kind) = self.clock() {
                return StepResult::BreakpointHit(addr, kind);
            }
            if self.cpu.instruction_complete() {
                return StepResult::Continued;
            }
        }
    }

    /// Advance until the PPU signals a completed frame.
    pub fn step_frame(&mut self) -> StepResult {
        loop {
            if let StepResult::BreakpointHit(addr, kind) = self.clock() {
                return StepResult::BreakpointHit(addr, kind);
            }
            if self.bus.frame_complete() {
                return StepResult::Continued;
            }
        }
    }

    /// Set a controller's live button byte. `port` 0 is controller 1, any
    /// other value is controller 2.
    pub fn set_controller(&mut self, port: u8, buttons: u8) {
        self.bus.set_controller(port, buttons);
    }

    /// The current 256x240 RGB24 framebuffer.
    #[must_use]
    pub fn framebuffer(&self) -> &[u8] {
        self.bus.framebuffer()
    }

    /// Disassemble every instruction in `[start, end]` into `address ->
    /// mnemonic`, without mutating CPU or bus state.
    #[must_use]
    pub fn disassemble(&self, start: u16, end: u16) -> BTreeMap<u16, String> {
        disassemble(&self.bus, start, end)
    }

    /// Peek at CPU-space memory without side effects.
    #[must_use]
    pub fn peek_memory(&self, addr: u16) -> u8 {
        self.bus.peek_memory(addr)
    }

    /// Reference to the CPU, for debugging/test inspection.
    #[must_use]
    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    /// Reference to the bus, for debugging/test inspection.
    #[must_use]
    pub fn bus(&self) -> &NesBus {
        &self.bus
    }

    /// Total CPU cycles executed since the last reset.
    #[must_use]
    pub fn total_cycles(&self) -> u64 {
        self.cpu.cycles()
    }

    /// The cartridge's iNES mapper number.
    #[must_use]
    pub fn mapper_number(&self) -> u16 {
        self.bus.cartridge().mapper_number()
    }

    /// The cartridge mapper's name, for diagnostics.
    #[must_use]
    pub fn mapper_name(&self) -> &'static str {
        self.bus.cartridge().mapper_name()
    }

    /// Arm a read breakpoint at `addr`.
    pub fn add_read_breakpoint(&mut self, addr: u16) {
        self.bus.add_read_breakpoint(addr);
    }

    /// Arm a write breakpoint at `addr`.
    pub fn add_write_breakpoint(&mut self, addr: u16) {
        self.bus.add_write_breakpoint(addr);
    }

    /// Disarm a read breakpoint at `addr`.
    pub fn remove_read_breakpoint(&mut self, addr: u16) {
        self.bus.remove_read_breakpoint(addr);
    }

    /// Disarm a write breakpoint at `addr`.
    pub fn remove_write_breakpoint(&mut self, addr: u16) {
        self.bus.remove_write_breakpoint(addr);
    }
}
