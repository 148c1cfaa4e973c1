//! NES system bus: address decoding, clock division, and NMI wiring.
//!
//! The bus connects the CPU to everything else:
//! - Internal RAM ($0000-$1FFF, mirrored every 0x0800)
//! - PPU registers ($2000-$3FFF, mirrored every 8 bytes)
//! - Controller ports ($4016-$4017)
//! - Cartridge space ($4020-$FFFF, via the mapper)
//!
//! `clock()` is the single master-tick primitive: it always advances the
//! PPU, advances the CPU on every third tick, and delivers any NMI the PPU
//! raised this tick to the CPU immediately afterward. This keeps the 1:3
//! CPU:PPU clock ratio and NMI delivery in one, easily-tested place.

use std::collections::BTreeSet;

use rustynes_cpu::{Bus as CpuBus, Cpu};
use rustynes_ppu::{Ppu, PpuBus};

use crate::cartridge::Cartridge;
use crate::input::Controller;

/// Which side of a memory access a breakpoint watches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakpointKind {
    /// A read from the watched address.
    Read,
    /// A write to the watched address.
    Write,
}

/// Result of advancing the bus by one tick, instruction, or frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResult {
    /// Execution advanced normally.
    Continued,
    /// A debug breakpoint was hit at the given address.
    BreakpointHit(u16, BreakpointKind),
}

/// The NES-vector address range (NMI/RESET/IRQ). Breakpoints never fire on
/// reads in this range, so a reset or interrupt's vector fetch can never
/// self-trigger a breakpoint.
const VECTOR_RANGE: core::ops::RangeInclusive<u16> = 0xFFFA..=0xFFFF;

/// The NES system bus: RAM, PPU, cartridge, and controllers, wired together.
pub struct NesBus {
    ram: [u8; 2048],
    ppu: Ppu,
    cartridge: Cartridge,
    controller1: Controller,
    controller2: Controller,
    system_tick: u64,
    breakpoints_read: BTreeSet<u16>,
    breakpoints_write: BTreeSet<u16>,
    breakpoint_hit: Option<(u16, BreakpointKind)>,
}

/// Adapts the cartridge's CHR-space access to [`PpuBus`] for the duration of
/// a single PPU register or rendering call.
struct CartridgeChrBus<'a> {
    cartridge: &'a mut Cartridge,
}

impl PpuBus for CartridgeChrBus<'_> {
    fn read(&mut self, addr: u16) -> u8 {
        self.cartridge.ppu_read(addr).unwrap_or(0)
    }

    fn write(&mut self, addr: u16, value: u8) {
        self.cartridge.ppu_write(addr, value);
    }
}

impl NesBus {
    /// Construct a bus around an already-loaded cartridge.
    #[must_use]
    pub fn new(cartridge: Cartridge) -> Self {
        let mut ppu = Ppu::new();
        ppu.set_mirroring(cartridge.mirroring());
        Self {
            ram: [0; 2048],
            ppu,
            cartridge,
            controller1: Controller::new(),
            controller2: Controller::new(),
            system_tick: 0,
            breakpoints_read: BTreeSet::new(),
            breakpoints_write: BTreeSet::new(),
            breakpoint_hit: None,
        }
    }

    /// Reset the bus-owned devices. PPU scanline/cycle counters are left
    /// undisturbed, matching documented NES behavior: the CPU resets
    /// through its own vector fetch, but the PPU keeps ticking through it.
    pub fn reset_devices(&mut self) {
        self.controller1.reset();
        self.controller2.reset();
        self.system_tick = 0;
    }

    /// Advance the bus by one master tick: always tick the PPU; tick the
    /// CPU every third call; deliver any NMI the PPU raised this tick to
    /// the CPU immediately after.
    pub fn clock(&mut self, cpu: &mut Cpu) {
        let mut chr_bus = CartridgeChrBus {
            cartridge: &mut self.cartridge,
        };
        let nmi_requested = self.ppu.step(&mut chr_bus);

        if self.system_tick % 3 == 0 {
            cpu.tick(self);
        }

        if nmi_requested {
            cpu.trigger_nmi();
        }

        self.system_tick = self.system_tick.wrapping_add(1);
    }

    /// Whether the PPU just completed a frame (valid immediately after a
    /// [`NesBus::clock`] call).
    #[must_use]
    pub fn frame_complete(&self) -> bool {
        self.ppu.frame_complete()
    }

    /// The PPU's 256x240 RGB24 framebuffer.
    #[must_use]
    pub fn framebuffer(&self) -> &[u8] {
        self.ppu.framebuffer()
    }

    /// Read access to the PPU, for tests and debug tooling.
    #[must_use]
    pub fn ppu(&self) -> &Ppu {
        &self.ppu
    }

    /// Read access to the cartridge, for mapper diagnostics.
    #[must_use]
    pub fn cartridge(&self) -> &Cartridge {
        &self.cartridge
    }

    /// Set a controller's live button byte (MSB-first: A, B, Select, Start,
    /// Up, Down, Left, Right).
    pub fn set_controller(&mut self, port: u8, buttons: u8) {
        match port {
            0 => self.controller1.set_buttons(buttons),
            _ => self.controller2.set_buttons(buttons),
        }
    }

    /// Peek at CPU-space memory without side effects: no PPU register
    /// mutation, no controller shifting, no mapper state change.
    #[must_use]
    pub fn peek_memory(&self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x1FFF => self.ram[usize::from(addr & 0x07FF)],
            0x2000..=0x3FFF => 0,
            0x4016 | 0x4017 => 0,
            0x4020..=0xFFFF => self.cartridge.cpu_read(addr).unwrap_or(0),
            _ => 0,
        }
    }

    /// Arm a read breakpoint at `addr`.
    pub fn add_read_breakpoint(&mut self, addr: u16) {
        self.breakpoints_read.insert(addr);
    }

    /// Arm a write breakpoint at `addr`.
    pub fn add_write_breakpoint(&mut self, addr: u16) {
        self.breakpoints_write.insert(addr);
    }

    /// Disarm a read breakpoint at `addr`.
    pub fn remove_read_breakpoint(&mut self, addr: u16) {
        self.breakpoints_read.remove(&addr);
    }

    /// Disarm a write breakpoint at `addr`.
    pub fn remove_write_breakpoint(&mut self, addr: u16) {
        self.breakpoints_write.remove(&addr);
    }

    /// Whether a read breakpoint is armed at `addr`.
    #[must_use]
    pub fn has_read_breakpoint(&self, addr: u16) -> bool {
        self.breakpoints_read.contains(&addr)
    }

    /// Clear any breakpoint hit recorded during the last tick.
    pub(crate) fn clear_breakpoint_hit(&mut self) {
        self.breakpoint_hit = None;
    }

    /// Take the breakpoint hit recorded during the last tick, if any.
    pub(crate) fn take_breakpoint_hit(&mut self) -> Option<(u16, BreakpointKind)> {
        self.breakpoint_hit.take()
    }

    fn record_breakpoint(&mut self, addr: u16, kind: BreakpointKind) {
        if self.breakpoint_hit.is_none() && !VECTOR_RANGE.contains(&addr) {
            let armed = match kind {
                BreakpointKind::Read => self.breakpoints_read.contains(&addr),
                BreakpointKind::Write => self.breakpoints_write.contains(&addr),
            };
            if armed {
                self.breakpoint_hit = Some((addr, kind));
            }
        }
    }
}

impl CpuBus for NesBus {
    fn read(&mut self, addr: u16) -> u8 {
        self.record_breakpoint(addr, BreakpointKind::Read);

        match addr {
            0x0000..=0x1FFF => self.ram[usize::from(addr & 0x07FF)],
            0x2000..=0x3FFF => {
                let mut chr_bus = CartridgeChrBus {
                    cartridge: &mut self.cartridge,
                };
                self.ppu.read_register(addr, &mut chr_bus)
            }
            0x4016 => self.controller1.read(),
            0x4017 => self.controller2.read(),
            0x4020..=0xFFFF => self.cartridge.cpu_read(addr).unwrap_or(0),
            _ => {
                log::trace!("read from unmapped address 0x{addr:04X}");
                0
            }
        }
    }

    fn write(&mut self, addr: u16, value: u8) {
        self.record_breakpoint(addr, BreakpointKind::Write);

        match addr {
            0x0000..=0x1FFF => self.ram[usize::from(addr & 0x07FF)] = value,
            0x2000..=0x3FFF => {
                let mut chr_bus = CartridgeChrBus {
                    cartridge: &mut self.cartridge,
                };
                self.ppu.write_register(addr, value, &mut chr_bus);
            }
            0x4016 => {
                self.controller1.strobe();
                self.controller2.strobe();
            }
            0x4017 => {}
            0x4020..=0xFFFF => self.cartridge.cpu_write(addr, value),
            _ => log::trace!("write to unmapped address 0x{addr:04X} (0x{value:02X} dropped)"),
        }
    }

    fn peek(&self, addr: u16) -> u8 {
        self.peek_memory(addr)
    }
}
