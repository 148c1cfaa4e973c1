//! NES cartridge mapper implementations.
//!
//! This crate parses iNES ROM images and provides the cartridge-side memory
//! mapping for the supported mapper set. Mapper 0 (NROM) is the only mapper
//! implemented; an unsupported mapper id is a fatal error at construction.
//!
//! # Example
//!
//! ```no_run
//! use rustynes_mappers::{Rom, create_mapper};
//!
//! let rom_data = std::fs::read("game.nes").expect("failed to read ROM");
//! let rom = Rom::load(&rom_data).expect("failed to parse ROM");
//! let mapper = create_mapper(&rom).expect("unsupported mapper");
//!
//! let offset = mapper.map_cpu_read(0x8000);
//! assert!(offset.is_some());
//! ```

mod mapper;
mod mirroring;
mod nrom;
pub mod rom;

pub use mapper::Mapper;
pub use mirroring::Mirroring;
pub use nrom::Nrom;
pub use rom::{Rom, RomError, RomHeader};

/// Create a mapper instance from ROM data.
///
/// # Errors
///
/// Returns [`RomError::UnsupportedMapper`] if the ROM's mapper id is not
/// implemented in this crate.
pub fn create_mapper(rom: &Rom) -> Result<Mapper, RomError> {
    match rom.header.mapper_number {
        0 => Ok(Mapper::Nrom(Nrom::new(rom))),
        n => Err(RomError::UnsupportedMapper(n)),
    }
}

/// Get a list of supported mapper numbers.
#[must_use]
pub fn supported_mappers() -> &'static [u16] {
    &[0]
}

/// Check if a mapper number is supported.
#[must_use]
pub fn is_mapper_supported(mapper: u16) -> bool {
    supported_mappers().contains(&mapper)
}
