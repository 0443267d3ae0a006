#[cfg(test)]
mod unit_tests;

use crate::bus::{AccessType, DirectBase, PAGE_SHIFT, PAGE_SIZE, PageAccess, PageTable, Region};

/// The kind of port a window exposes. `RamWrite` is the odd one: the bus
/// writes straight through it, but a read through it is not pure and has to
/// go through the cartridge's `peek`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Port {
    Rom,
    RamRead,
    RamWrite,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct MemoryRegion {
    pub port: Port,
    pub start_address: u16,
    pub end_address: u16,
    pub addr_mask: u16,
    code_access_base: Option<usize>,
}

impl MemoryRegion {
    pub const fn new(
        port: Port,
        start_address: u16,
        end_address: u16,
        addr_mask: u16,
        code_access_base: Option<usize>,
    ) -> MemoryRegion {
        Self {
            port,
            start_address,
            end_address,
            addr_mask,
            code_access_base,
        }
    }

    pub fn contains_addr(&self, addr: u16) -> bool {
        self.start_address <= addr && addr <= self.end_address
    }

    pub fn convert(&self, addr: u16) -> usize {
        (addr & self.addr_mask) as usize
    }

    pub fn region(&self) -> Region {
        match self.port {
            Port::Rom => Region::Rom,
            Port::RamRead | Port::RamWrite => Region::Ram,
        }
    }

    pub fn page_access(&self, addr: u16) -> PageAccess {
        let base = DirectBase::new(self.region(), self.convert(addr));
        let code_access = self.code_access_base.map(|code| code + self.convert(addr));
        match self.port {
            Port::Rom | Port::RamRead => PageAccess {
                direct_peek: Some(base),
                code_access,
                ..PageAccess::new(AccessType::Read)
            },
            Port::RamWrite => PageAccess {
                direct_poke: Some(base),
                ..PageAccess::new(AccessType::Write)
            },
        }
    }

    pub fn pages(&self) -> impl Iterator<Item = u16> {
        (self.start_address..=self.end_address).step_by(PAGE_SIZE as usize)
    }

    pub fn install(&self, pages: &mut PageTable) {
        for addr in self.pages() {
            pages.set_page_access(addr >> PAGE_SHIFT, self.page_access(addr));
        }
    }
}
