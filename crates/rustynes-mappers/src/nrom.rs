//! Mapper 0: NROM
//!
//! NROM is the simplest NES mapper with no bank switching capabilities.
//! It provides direct memory mapping with optional mirroring for 16KB PRG-ROM.
//!
//! # Hardware Details
//!
//! - **PRG-ROM**: 16KB or 32KB
//! - **CHR**: 8KB CHR-ROM
//! - **Mirroring**: Fixed horizontal or vertical
//! - **Battery**: Not supported
//!
//! # Variants
//!
//! - **NROM-128**: 16KB PRG-ROM (mirrored to fill 32KB)
//! - **NROM-256**: 32KB PRG-ROM (no mirroring needed)
//!
//! # Games
//!
//! - Super Mario Bros.
//! - Donkey Kong
//! - Balloon Fight
//! - Excitebike
//! - Ice Climber

use crate::mirroring::Mirroring;
use crate::rom::Rom;

/// NROM mapper implementation (Mapper 0).
#[derive(Debug, Clone)]
pub struct Nrom {
    /// PRG-ROM data (16KB or 32KB).
    prg_rom: Vec<u8>,

    /// CHR-ROM data (8KB). Pattern memory is read-only on NROM.
    chr_rom: Vec<u8>,

    /// Nametable mirroring mode, fixed at cartridge construction.
    mirroring: Mirroring,
}

impl Nrom {
    /// Create a new NROM mapper from a ROM.
    ///
    /// A zero-length CHR bank means the cartridge carries CHR-RAM rather
    /// than CHR-ROM; this still allocates the full 8 KiB so pattern-table
    /// reads never index past the end of the buffer.
    #[must_use]
    pub fn new(rom: &Rom) -> Self {
        let chr_rom = if rom.chr_rom.is_empty() {
            vec![0u8; 8192]
        } else {
            rom.chr_rom.clone()
        };
        Self {
            prg_rom: rom.prg_rom.clone(),
            chr_rom,
            mirroring: rom.header.mirroring,
        }
    }

    /// PRG-ROM size in bytes.
    #[must_use]
    pub fn prg_size(&self) -> usize {
        self.prg_rom.len()
    }

    /// The PRG-ROM bank count, used to decide whether $8000-$FFFF mirrors a
    /// single 16KB bank or spans a full 32KB image.
    fn prg_banks(&self) -> usize {
        self.prg_rom.len() / 16384
    }

    /// Translate a CPU address ($8000-$FFFF) to a PRG-ROM offset.
    #[must_use]
    pub fn map_cpu_read(&self, addr: u16) -> Option<usize> {
        if addr < 0x8000 {
            return None;
        }
        let mask = if self.prg_banks() > 1 { 0x7FFF } else { 0x3FFF };
        Some((addr & mask) as usize)
    }

    /// NROM has no PRG-RAM or writable registers; writes are never claimed.
    #[must_use]
    pub fn map_cpu_write(&self, _addr: u16) -> Option<usize> {
        None
    }

    /// Translate a PPU address ($0000-$1FFF) to a CHR-ROM offset.
    #[must_use]
    pub fn map_ppu_read(&self, addr: u16) -> Option<usize> {
        if addr <= 0x1FFF {
            Some(addr as usize)
        } else {
            None
        }
    }

    /// Pattern memory is read-only on NROM; writes are never claimed.
    #[must_use]
    pub fn map_ppu_write(&self, _addr: u16) -> Option<usize> {
        None
    }

    /// Read the byte at a resolved PRG offset.
    #[must_use]
    pub fn prg(&self, offset: usize) -> u8 {
        self.prg_rom[offset]
    }

    /// Read the byte at a resolved CHR offset.
    #[must_use]
    pub fn chr(&self, offset: usize) -> u8 {
        self.chr_rom[offset]
    }

    /// Nametable mirroring mode.
    #[must_use]
    pub fn mirroring(&self) -> Mirroring {
        self.mirroring
    }
}
