use crate::bus::{AccessType, DirectBase, PageTable, Region};
use crate::cartridge::memory_region::{MemoryRegion, Port};

#[test]
fn test_mirroring() {
    let rom = MemoryRegion::new(Port::Rom, 0x1800, 0x1FFF, 0x07FF, Some(0));

    assert_eq!(0x0000, rom.convert(0x1800));
    assert_eq!(0x07FF, rom.convert(0x1FFF));
    assert_eq!(0x0399, rom.convert(0xF399));
    assert_eq!(rom.convert(0x1A42), rom.convert(0xFA42));

    let ram = MemoryRegion::new(Port::RamWrite, 0x1400, 0x17FF, 0x03FF, None);

    assert_eq!(0x0000, ram.convert(0x1400));
    assert_eq!(0x03FF, ram.convert(0x17FF));
    assert_eq!(0x0123, ram.convert(0x1523));
}

#[test]
fn test_contains_addr() {
    let ram = MemoryRegion::new(Port::RamRead, 0x1000, 0x13FF, 0x03FF, Some(0x0800));

    assert!(!ram.contains_addr(0x0FFF));
    assert!(ram.contains_addr(0x1000));
    assert!(ram.contains_addr(0x13FF));
    assert!(!ram.contains_addr(0x1400));
}

#[test]
fn test_page_access_by_port() {
    let rom = MemoryRegion::new(Port::Rom, 0x1800, 0x1FFF, 0x07FF, Some(0));
    let access = rom.page_access(0x1840);
    assert_eq!(AccessType::Read, access.access_type);
    assert_eq!(Some(DirectBase::new(Region::Rom, 0x0040)), access.direct_peek);
    assert_eq!(None, access.direct_poke);
    assert_eq!(Some(0x0040), access.code_access);

    let write_port = MemoryRegion::new(Port::RamWrite, 0x1400, 0x17FF, 0x03FF, None);
    let access = write_port.page_access(0x1480);
    assert_eq!(AccessType::Write, access.access_type);
    assert_eq!(None, access.direct_peek);
    assert_eq!(Some(DirectBase::new(Region::Ram, 0x0080)), access.direct_poke);
    assert_eq!(None, access.code_access);

    let read_port = MemoryRegion::new(Port::RamRead, 0x1000, 0x13FF, 0x03FF, Some(0x0800));
    let access = read_port.page_access(0x13C0);
    assert_eq!(AccessType::Read, access.access_type);
    assert_eq!(Some(DirectBase::new(Region::Ram, 0x03C0)), access.direct_peek);
    assert_eq!(None, access.direct_poke);
    assert_eq!(Some(0x0BC0), access.code_access);
}

#[test]
fn test_install_covers_every_page() {
    let ram = MemoryRegion::new(Port::RamWrite, 0x1400, 0x17FF, 0x03FF, None);
    assert_eq!(16, ram.pages().count());

    let mut pages = PageTable::new();
    ram.install(&mut pages);

    assert_eq!(None, pages.lookup(0x13FF));
    for addr in 0x1400..=0x17FF {
        assert!(pages.lookup(addr).is_some(), "{:#06x} not mapped", addr);
    }
    assert_eq!(None, pages.lookup(0x1800));
}
