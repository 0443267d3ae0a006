pub mod commavid;
pub mod memory_region;

use std::io::{Read, Write};

use thiserror::Error;

use crate::bus::{DataBus, PageTable, Region};

pub trait Cartridge {
    /// Identifies this cartridge's block in a saved state.
    fn name(&self) -> &'static str;

    fn reset(&mut self);
    fn install(&mut self, pages: &mut PageTable);

    fn peek(&mut self, addr: u16, data_bus: &dyn DataBus) -> u8;
    fn poke(&mut self, addr: u16, value: u8) -> bool;
    fn patch(&mut self, addr: u16, value: u8) -> bool;

    fn read_direct(&self, region: Region, index: usize) -> u8;
    fn write_direct(&mut self, region: Region, index: usize, value: u8);

    fn image(&self) -> &[u8];
    fn code_access(&self) -> &[u8];
    fn code_access_mut(&mut self) -> &mut [u8];

    fn save(&self, out: &mut dyn Write) -> bool;
    fn load(&mut self, input: &mut dyn Read) -> bool;

    /// Reports whether memory changed behind the debugger's back since the
    /// last call, and clears the flag.
    fn bank_changed(&mut self) -> bool;

    fn lock_bank(&mut self);
    fn unlock_bank(&mut self);
    fn bank_locked(&self) -> bool;

    /// Address of the last read that landed on a write port, if any. Taking
    /// it clears it.
    fn take_write_port_read(&mut self) -> Option<u16>;

    fn bank_count(&self) -> u16 {
        1
    }

    fn current_bank(&self) -> u16 {
        0
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CartridgeError {
    #[error("The image is {0} bytes but this cartridge needs {1}")]
    InvalidImageSize(usize, &'static str),
}
