pub mod flags;


use std::{cell::RefCell, rc::Rc};

use crate::cartridge::Cartridge;

use self::flags::AccessFlags;

// The 6507 only brings out 13 address lines, so everything above 0x1FFF
// is a mirror of the low 8K.
pub const ADDRESS_MASK: u16 = 0x1FFF;
pub const PAGE_SHIFT: u16 = 6;
pub const PAGE_SIZE: u16 = 1 << PAGE_SHIFT;
pub const PAGE_MASK: u16 = PAGE_SIZE - 1;
pub const PAGE_COUNT: usize = (ADDRESS_MASK as usize + 1) >> PAGE_SHIFT;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AccessType {
    Read,
    Write,
}

/// Which of a device's buffers a direct base points into.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Region {
    Rom,
    Ram,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct DirectBase {
    pub region: Region,
    pub offset: usize,
}

impl DirectBase {
    pub fn new(region: Region, offset: usize) -> Self {
        Self { region, offset }
    }

    pub fn index(&self, addr: u16) -> usize {
        self.offset + (addr & PAGE_MASK) as usize
    }
}

/// How the bus services one page of the address space. A page without a
/// direct base is handed to the device's `peek`/`poke`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PageAccess {
    pub access_type: AccessType,
    pub direct_peek: Option<DirectBase>,
    pub direct_poke: Option<DirectBase>,
    pub code_access: Option<usize>,
}

impl PageAccess {
    pub fn new(access_type: AccessType) -> Self {
        Self {
            access_type,
            direct_peek: None,
            direct_poke: None,
            code_access: None,
        }
    }
}

pub struct PageTable {
    pages: Vec<Option<PageAccess>>,
}

impl PageTable {
    pub fn new() -> Self {
        Self {
            pages: vec![None; PAGE_COUNT],
        }
    }

    pub fn set_page_access(&mut self, page: u16, access: PageAccess) {
        self.pages[page as usize % PAGE_COUNT] = Some(access);
    }

    pub fn page_access(&self, page: u16) -> Option<PageAccess> {
        self.pages[page as usize % PAGE_COUNT]
    }

    pub fn lookup(&self, addr: u16) -> Option<PageAccess> {
        self.page_access((addr & ADDRESS_MASK) >> PAGE_SHIFT)
    }
}

impl Default for PageTable {
    fn default() -> Self {
        Self::new()
    }
}

/// The value left on the data bus by the most recent access. Reading a
/// location nothing drives returns this.
pub trait DataBus {
    fn data_bus_state(&self) -> u8;
}

pub struct Bus {
    pages: PageTable,
    cartridge: Option<Rc<RefCell<dyn Cartridge>>>,
    data_bus_state: u8,
}

impl Bus {
    pub fn new() -> Self {
        Self {
            pages: PageTable::new(),
            cartridge: None,
            data_bus_state: 0,
        }
    }

    pub fn attach(&mut self, cartridge: Rc<RefCell<dyn Cartridge>>) {
        self.pages = PageTable::new();
        cartridge.borrow_mut().install(&mut self.pages);
        self.cartridge = Some(cartridge);
    }

    pub fn cartridge(&self) -> Option<Rc<RefCell<dyn Cartridge>>> {
        self.cartridge.clone()
    }

    pub fn pages(&self) -> &PageTable {
        &self.pages
    }

    pub fn reset(&mut self) {
        if let Some(cartridge) = &self.cartridge {
            cartridge.borrow_mut().reset();
        }
    }

    pub fn peek(&mut self, addr: u16) -> u8 {
        let value = self.read(addr);
        self.data_bus_state = value;
        value
    }

    /// Same as `peek`, but also tags the byte in the cartridge's code access
    /// buffer so a disassembler can tell code from data.
    pub fn peek_with_flags(&mut self, addr: u16, flags: AccessFlags) -> u8 {
        if !flags.is_empty() {
            if let (Some(cartridge), Some(access)) = (&self.cartridge, self.pages.lookup(addr)) {
                if let Some(base) = access.code_access {
                    let index = base + (addr & PAGE_MASK) as usize;
                    cartridge.borrow_mut().code_access_mut()[index] |= flags.bits();
                }
            }
        }
        self.peek(addr)
    }

    pub fn poke(&mut self, addr: u16, value: u8) -> bool {
        let handled = match (&self.cartridge, self.pages.lookup(addr)) {
            (Some(cartridge), Some(access)) => match access.direct_poke {
                None if access.access_type == AccessType::Read => false,
                Some(base) => {
                    cartridge
                        .borrow_mut()
                        .write_direct(base.region, base.index(addr), value);
                    true
                }
                None => cartridge.borrow_mut().poke(addr, value),
            },
            _ => false,
        };
        self.data_bus_state = value;
        handled
    }

    fn read(&self, addr: u16) -> u8 {
        match (&self.cartridge, self.pages.lookup(addr)) {
            (Some(cartridge), Some(access)) => match access.direct_peek {
                Some(base) => cartridge.borrow().read_direct(base.region, base.index(addr)),
                None => cartridge.borrow_mut().peek(addr, self),
            },
            _ => self.data_bus_state,
        }
    }
}

impl Default for Bus {
    fn default() -> Self {
        Self::new()
    }
}

impl DataBus for Bus {
    fn data_bus_state(&self) -> u8 {
        self.data_bus_state
    }
}
