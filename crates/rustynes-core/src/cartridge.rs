//! Cartridge: the bus-facing wrapper around a [`Mapper`].
//!
//! The cartridge itself holds no PRG/CHR bytes of its own; the mapper owns
//! them and resolves addresses to offsets. `Cartridge` only turns those
//! offsets into bytes (or declines the address), matching the `cpu_read`/
//! `ppu_read` contract the bus and PPU drive it through.

use rustynes_mappers::{Mapper, Mirroring, Rom, RomError, create_mapper};

/// A loaded NES cartridge: ROM data plus the mapper that interprets it.
pub struct Cartridge {
    mapper: Mapper,
}

impl Cartridge {
    /// Parse an iNES ROM image and construct the matching mapper.
    ///
    /// # Errors
    ///
    /// Returns [`RomError`] if the header is malformed or the mapper id is
    /// unsupported.
    pub fn load(rom_bytes: &[u8]) -> Result<Self, RomError> {
        let rom = Rom::load(rom_bytes)?;
        Self::from_rom(&rom)
    }

    /// Construct a cartridge from an already-parsed [`Rom`].
    ///
    /// # Errors
    ///
    /// Returns [`RomError::UnsupportedMapper`] if the ROM's mapper id has no
    /// implementation.
    pub fn from_rom(rom: &Rom) -> Result<Self, RomError> {
        let mapper = create_mapper(rom)?;
        Ok(Self { mapper })
    }

    /// Read a byte at a CPU-space address (0x4020-0xFFFF), if the cartridge
    /// claims it.
    #[must_use]
    pub fn cpu_read(&self, addr: u16) -> Option<u8> {
        self.mapper
            .map_cpu_read(addr)
            .map(|offset| self.mapper.prg_byte(offset))
    }

    /// Write a byte at a CPU-space address, if the cartridge has a writable
    /// register or PRG-RAM there. NROM never claims writes; this is a no-op
    /// for the mapper set this core implements.
    pub fn cpu_write(&mut self, addr: u16, _value: u8) {
        let _ = self.mapper.map_cpu_write(addr);
    }

    /// Read a byte at a PPU-space (pattern table) address, if the cartridge
    /// claims it.
    #[must_use]
    pub fn ppu_read(&self, addr: u16) -> Option<u8> {
        self.mapper
            .map_ppu_read(addr)
            .map(|offset| self.mapper.chr_byte(offset))
    }

    /// Write a byte at a PPU-space address, if the cartridge has CHR-RAM
    /// there. NROM's pattern memory is read-only, so this is always
    /// declined for mapper 0.
    pub fn ppu_write(&mut self, addr: u16, _value: u8) {
        let _ = self.mapper.map_ppu_write(addr);
    }

    /// The cartridge's nametable mirroring mode.
    #[must_use]
    pub fn mirroring(&self) -> Mirroring {
        self.mapper.mirroring()
    }

    /// The iNES mapper number.
    #[must_use]
    pub fn mapper_number(&self) -> u16 {
        self.mapper.mapper_number()
    }

    /// The mapper's name, for diagnostics.
    #[must_use]
    pub fn mapper_name(&self) -> &'static str {
        self.mapper.mapper_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustynes_mappers::RomHeader;

    fn test_rom() -> Rom {
        let mut prg = vec![0xEAu8; 32768];
        prg[0x7FFC] = 0x00;
        prg[0x7FFD] = 0x80;
        Rom {
            header: RomHeader {
                prg_rom_size: 32768,
                chr_rom_size: 8192,
                mapper_number: 0,
                submapper: 0,
                mirroring: Mirroring::Vertical,
                has_battery: false,
                has_trainer: false,
                nes2_format: false,
                prg_ram_size: 0,
                prg_nvram_size: 0,
                chr_ram_size: 0,
                chr_nvram_size: 0,
            },
            trainer: None,
            prg_rom: prg,
            chr_rom: vec![0x11; 8192],
        }
    }

    #[test]
    fn cpu_read_resolves_prg() {
        let cart = Cartridge::from_rom(&test_rom()).unwrap();
        assert_eq!(cart.cpu_read(0xFFFC), Some(0x00));
        assert_eq!(cart.cpu_read(0xFFFD), Some(0x80));
        assert_eq!(cart.cpu_read(0x0000), None);
    }

    #[test]
    fn ppu_read_resolves_chr() {
        let cart = Cartridge::from_rom(&test_rom()).unwrap();
        assert_eq!(cart.ppu_read(0x0000), Some(0x11));
        assert_eq!(cart.ppu_read(0x2000), None);
    }

    #[test]
    fn unsupported_mapper_is_rejected() {
        let mut rom = test_rom();
        rom.header.mapper_number = 4;
        assert!(matches!(
            Cartridge::from_rom(&rom),
            Err(RomError::UnsupportedMapper(4))
        ));
    }
}
