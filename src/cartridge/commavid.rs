
use std::io::{Read, Write};

use anyhow::Result;
use log::{debug, error, trace};

use crate::{
    bus::{DataBus, PageTable, Region, flags::AccessFlags},
    cartridge::{
        Cartridge, CartridgeError,
        memory_region::{MemoryRegion, Port},
    },
    random::Random,
    serializer::{Deserializer, Serializer},
    settings::{RamInit, Settings},
};

pub const ROM_SIZE: usize = 0x0800;
pub const RAM_SIZE: usize = 0x0400;
static IMAGE_SIZE_2K: usize = 0x0800;
static IMAGE_SIZE_4K: usize = 0x1000;
// Kept identical to the tag other emulators write, so their states load here
static STATE_TAG: &str = "CartridgeCV";

// The RAM has no R/W line of its own: A10 picks between reading and writing,
// so the same 1K appears twice, once per direction.
// 0x1000 - 0x13FF  RAM read port
// 0x1400 - 0x17FF  RAM write port
// 0x1800 - 0x1FFF  ROM
// The code access buffer holds the ROM bytes first, then the RAM bytes.
pub static REGIONS: [MemoryRegion; 3] = [
    MemoryRegion::new(Port::Rom, 0x1800, 0x1FFF, 0x07FF, Some(0)),
    MemoryRegion::new(Port::RamWrite, 0x1400, 0x17FF, 0x03FF, None),
    MemoryRegion::new(Port::RamRead, 0x1000, 0x13FF, 0x03FF, Some(ROM_SIZE)),
];

/**
 * CommaVid CV: 2K ROM and 1K RAM, no bank switching
 */
pub struct CommaVid {
    image: Vec<u8>,
    ram: Vec<u8>,
    // Only 4K images have one, e.g. MagiCard with a program listing already typed in
    initial_ram: Option<Vec<u8>>,
    code_access: Vec<u8>,
    settings: Settings,
    bank_changed: bool,
    bank_locked: bool,
    write_port_read: Option<u16>,
}

impl CommaVid {
    pub fn new(image: &[u8], settings: Settings) -> Result<Self> {
        let (rom, initial_ram) = if image.len() == IMAGE_SIZE_2K {
            (image.to_vec(), None)
        } else if image.len() == IMAGE_SIZE_4K {
            // The 4K layout is 1K of RAM contents, 1K unused, then the 2K ROM
            (
                image[IMAGE_SIZE_4K - ROM_SIZE..].to_vec(),
                Some(image[..RAM_SIZE].to_vec()),
            )
        } else {
            Err(CartridgeError::InvalidImageSize(image.len(), "2048 or 4096"))?
        };

        debug!(
            "CommaVid image {:#06x} bytes | initial ram {} | ram init {}",
            image.len(),
            initial_ram.is_some(),
            settings.ram_init
        );

        Ok(Self {
            image: rom,
            ram: vec![0; RAM_SIZE],
            initial_ram,
            code_access: vec![AccessFlags::ROW.bits(); ROM_SIZE + RAM_SIZE],
            settings,
            bank_changed: false,
            bank_locked: false,
            write_port_read: None,
        })
    }

    pub fn ram(&self) -> &[u8] {
        &self.ram
    }

    pub fn initial_ram(&self) -> Option<&[u8]> {
        self.initial_ram.as_deref()
    }

    fn region_for(addr: u16) -> Option<&'static MemoryRegion> {
        // fold every mirror down onto 0x1000 - 0x1FFF
        let addr = (addr & 0x0FFF) | 0x1000;
        REGIONS.iter().find(|region| region.contains_addr(addr))
    }

    fn try_save(&self, out: &mut dyn Write) -> Result<()> {
        let mut serializer = Serializer::new(out);
        serializer.put_string(self.name())?;
        serializer.put_byte_array(&self.ram)?;
        Ok(())
    }

    fn try_load(&mut self, input: &mut dyn Read) -> Result<bool> {
        let mut deserializer = Deserializer::new(input);
        let tag = deserializer.get_string()?;
        if tag != self.name() {
            debug!("State tag {:?} doesn't belong to {}", tag, self.name());
            return Ok(false);
        }

        // read_exact leaves its buffer in an unknown state on failure
        let mut ram = vec![0; RAM_SIZE];
        deserializer.get_byte_array(&mut ram)?;
        self.ram.copy_from_slice(&ram);
        Ok(true)
    }
}

impl Cartridge for CommaVid {
    fn name(&self) -> &'static str {
        STATE_TAG
    }

    fn reset(&mut self) {
        match &self.initial_ram {
            Some(initial_ram) => self.ram.copy_from_slice(initial_ram),
            None => match self.settings.ram_init {
                RamInit::Random => Random::new(self.settings.ram_seed).fill(&mut self.ram),
                RamInit::Zero => self.ram.fill(0),
            },
        }
        self.bank_changed = true;
    }

    fn install(&mut self, pages: &mut PageTable) {
        for region in &REGIONS {
            region.install(pages);
        }
    }

    /// Only the write port reaches here through the bus, since the ROM and
    /// read port are mapped directly. Any read in the low 2K still strobes a
    /// write on the real hardware, so whatever is floating on the data bus
    /// ends up in RAM.
    fn peek(&mut self, addr: u16, data_bus: &dyn DataBus) -> u8 {
        let Some(region) = Self::region_for(addr) else {
            return data_bus.data_bus_state();
        };

        match region.port {
            Port::RamWrite | Port::RamRead => {
                let value = data_bus.data_bus_state();
                if !self.bank_locked {
                    debug!("Read from write port {:#06x} stores {:#04x}", addr, value);
                    self.ram[region.convert(addr)] = value;
                    self.write_port_read = Some(addr);
                    self.bank_changed = true;
                }
                value
            }
            Port::Rom => self.read_direct(region.region(), region.convert(addr)),
        }
    }

    fn poke(&mut self, addr: u16, value: u8) -> bool {
        // RAM writes go through the direct poke base and the bus never pokes
        // a read-only page, so nothing should get here
        trace!("Ignored write {:#04x} to {:#06x}", value, addr);
        false
    }

    /// Writes regardless of port direction, including into ROM.
    fn patch(&mut self, addr: u16, value: u8) -> bool {
        if let Some(region) = Self::region_for(addr) {
            self.write_direct(region.region(), region.convert(addr), value);
        }
        self.bank_changed = true;
        true
    }

    fn read_direct(&self, region: Region, index: usize) -> u8 {
        match region {
            Region::Rom => self.image[index],
            Region::Ram => self.ram[index],
        }
    }

    fn write_direct(&mut self, region: Region, index: usize, value: u8) {
        match region {
            Region::Rom => self.image[index] = value,
            Region::Ram => self.ram[index] = value,
        }
    }

    fn image(&self) -> &[u8] {
        &self.image
    }

    fn code_access(&self) -> &[u8] {
        &self.code_access
    }

    fn code_access_mut(&mut self) -> &mut [u8] {
        &mut self.code_access
    }

    fn save(&self, out: &mut dyn Write) -> bool {
        match self.try_save(out) {
            Ok(()) => true,
            Err(err) => {
                error!("{}::save failed: {}", self.name(), err);
                false
            }
        }
    }

    fn load(&mut self, input: &mut dyn Read) -> bool {
        match self.try_load(input) {
            Ok(loaded) => loaded,
            Err(err) => {
                error!("{}::load failed: {}", self.name(), err);
                false
            }
        }
    }

    fn bank_changed(&mut self) -> bool {
        let changed = self.bank_changed;
        self.bank_changed = false;
        changed
    }

    fn lock_bank(&mut self) {
        self.bank_locked = true;
    }

    fn unlock_bank(&mut self) {
        self.bank_locked = false;
    }

    fn bank_locked(&self) -> bool {
        self.bank_locked
    }

    fn take_write_port_read(&mut self) -> Option<u16> {
        self.write_port_read.take()
    }
}
