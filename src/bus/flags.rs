extern crate bitflags;

bitflags::bitflags! {
    // Classification a debugger records per cartridge byte. Only the
    // debugger interprets these, the cartridge just owns the storage.
    #[derive(Clone, Copy, PartialEq, Eq, Debug)]
    pub struct AccessFlags: u8 {
        const SKIP = 0b00000001;
        const CODE = 0b00000010;
        const GFX = 0b00000100;
        const PGFX = 0b00001000;
        const DATA = 0b00010000;
        const ROW = 0b00100000;
    }
}
