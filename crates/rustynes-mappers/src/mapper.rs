//! Cartridge mapper abstraction.
//!
//! Every supported mapper is a variant of a single tagged enum rather than a
//! trait object; this keeps dispatch a plain `match` and avoids heap
//! allocation for the (currently singleton) mapper set. Each variant
//! exposes the same four-operation contract the cartridge and PPU drive it
//! through: [`Mapper::map_cpu_read`], [`Mapper::map_cpu_write`],
//! [`Mapper::map_ppu_read`], [`Mapper::map_ppu_write`]. Each returns the
//! byte offset into the relevant PRG/CHR array, or `None` if the mapper
//! does not claim that address.

use crate::mirroring::Mirroring;
use crate::nrom::Nrom;

/// A cartridge mapper.
#[derive(Debug, Clone)]
pub enum Mapper {
    /// Mapper 0 (NROM): fixed PRG/CHR banking, no registers.
    Nrom(Nrom),
}

impl Mapper {
    /// Translate a CPU-space address ($4020-$FFFF) to a PRG-ROM offset.
    #[must_use]
    pub fn map_cpu_read(&self, addr: u16) -> Option<usize> {
        match self {
            Self::Nrom(m) => m.map_cpu_read(addr),
        }
    }

    /// Translate a CPU-space write address to a PRG offset, if the mapper
    /// has any writable banking registers or PRG-RAM at that address.
    #[must_use]
    pub fn map_cpu_write(&self, addr: u16) -> Option<usize> {
        match self {
            Self::Nrom(m) => m.map_cpu_write(addr),
        }
    }

    /// Translate a PPU-space address ($0000-$1FFF) to a CHR offset.
    #[must_use]
    pub fn map_ppu_read(&self, addr: u16) -> Option<usize> {
        match self {
            Self::Nrom(m) => m.map_ppu_read(addr),
        }
    }

    /// Translate a PPU-space write address to a CHR offset, if the
    /// cartridge has CHR-RAM there.
    #[must_use]
    pub fn map_ppu_write(&self, addr: u16) -> Option<usize> {
        match self {
            Self::Nrom(m) => m.map_ppu_write(addr),
        }
    }

    /// Current nametable mirroring mode.
    #[must_use]
    pub fn mirroring(&self) -> Mirroring {
        match self {
            Self::Nrom(m) => m.mirroring(),
        }
    }

    /// Read the byte at a PRG offset previously resolved by
    /// [`Mapper::map_cpu_read`].
    #[must_use]
    pub fn prg_byte(&self, offset: usize) -> u8 {
        match self {
            Self::Nrom(m) => m.prg(offset),
        }
    }

    /// Read the byte at a CHR offset previously resolved by
    /// [`Mapper::map_ppu_read`].
    #[must_use]
    pub fn chr_byte(&self, offset: usize) -> u8 {
        match self {
            Self::Nrom(m) => m.chr(offset),
        }
    }

    /// iNES mapper number.
    #[must_use]
    pub fn mapper_number(&self) -> u16 {
        match self {
            Self::Nrom(_) => 0,
        }
    }

    /// Mapper name, for diagnostics.
    #[must_use]
    pub fn mapper_name(&self) -> &'static str {
        match self {
            Self::Nrom(_) => "NROM",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rom::{Rom, RomHeader};

    fn rom(prg_size: usize, chr_size: usize, mirroring: Mirroring) -> Rom {
        Rom {
            header: RomHeader {
                prg_rom_size: prg_size,
                chr_rom_size: chr_size,
                mapper_number: 0,
                submapper: 0,
                mirroring,
                has_battery: false,
                has_trainer: false,
                nes2_format: false,
                prg_ram_size: 0,
                prg_nvram_size: 0,
                chr_ram_size: 0,
                chr_nvram_size: 0,
            },
            trainer: None,
            prg_rom: vec![0; prg_size],
            chr_rom: vec![0; chr_size],
        }
    }

    #[test]
    fn test_mapper_dispatch() {
        let mapper = Mapper::Nrom(Nrom::new(&rom(16384, 8192, Mirroring::Horizontal)));
        assert_eq!(mapper.mapper_number(), 0);
        assert_eq!(mapper.mapper_name(), "NROM");
        assert_eq!(mapper.mirroring(), Mirroring::Horizontal);
        assert_eq!(mapper.map_cpu_read(0x8000), Some(0));
        assert_eq!(mapper.map_ppu_read(0x0000), Some(0));
    }
}
