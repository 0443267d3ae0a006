use std::{cell::RefCell, io::Cursor, rc::Rc};

use anyhow::Result;

use crate::{Bus, Cartridge, CommaVid, Settings};

// A 4K image as MagiCard ships it: a listing in the first 1K, then the ROM
// at the top 2K
fn magicard_image() -> Vec<u8> {
    let mut image = vec![0; 0x1000];
    let listing = b"10 PRINT \"HELLO\"\n20 GOTO 10\n";
    image[..listing.len()].copy_from_slice(listing);
    for (i, byte) in image[0x0800..].iter_mut().enumerate() {
        *byte = 0xEA ^ (i as u8);
    }
    // reset vector at 0x1FFC
    image[0x0FFC] = 0x00;
    image[0x0FFD] = 0xF8;
    image
}

fn power_on(image: &[u8]) -> Result<(Bus, Rc<RefCell<CommaVid>>)> {
    let _ = env_logger::builder().is_test(true).try_init();

    let cart = Rc::new(RefCell::new(CommaVid::new(image, Settings::default())?));
    let mut bus = Bus::new();
    bus.attach(cart.clone());
    bus.reset();
    Ok((bus, cart))
}

#[test]
fn magicard_listing_survives_a_save_state() -> Result<()> {
    let image = magicard_image();
    let (mut bus, cart) = power_on(&image)?;

    let listing: Vec<u8> = (0xF000..0xF01C).map(|addr| bus.peek(addr)).collect();
    assert_eq!(b"10 PRINT \"HELLO\"\n20 GOTO 10\n".to_vec(), listing);
    assert_eq!(0xF800, u16::from_le_bytes([bus.peek(0xFFFC), bus.peek(0xFFFD)]));

    // edit the listing through the write port
    for (i, &byte) in b"30 END\n".iter().enumerate() {
        assert!(bus.poke(0xF41C + i as u16, byte));
    }

    let mut state = Vec::new();
    assert!(cart.borrow().save(&mut state));

    let (mut restored, restored_cart) = power_on(&image)?;
    assert_eq!(b'\0', restored.peek(0xF01C));
    assert!(restored_cart.borrow_mut().load(&mut Cursor::new(state)));

    let listing: Vec<u8> = (0xF000..0xF023).map(|addr| restored.peek(addr)).collect();
    assert_eq!(
        b"10 PRINT \"HELLO\"\n20 GOTO 10\n30 END\n".to_vec(),
        listing
    );
    assert_eq!(cart.borrow().ram(), restored_cart.borrow().ram());
    Ok(())
}

#[test]
fn debugger_reads_leave_ram_alone_while_locked() -> Result<()> {
    let (mut bus, cart) = power_on(&magicard_image())?;
    let before = cart.borrow().ram().to_vec();

    cart.borrow_mut().lock_bank();
    for addr in 0xF400..0xF800 {
        bus.peek(addr);
    }
    assert_eq!(before, cart.borrow().ram());

    // a running program doing LDA $F400 clobbers the first byte of the listing
    cart.borrow_mut().unlock_bank();
    let floating = bus.peek(0xF9AB);
    assert_eq!(floating, bus.peek(0xF400));
    assert_eq!(floating, bus.peek(0xF000));
    assert_ne!(before[0], cart.borrow().ram()[0]);
    Ok(())
}

#[test]
fn patched_rom_is_what_the_image_reports() -> Result<()> {
    let (mut bus, cart) = power_on(&magicard_image())?;

    assert!(cart.borrow_mut().patch(0xF900, 0x60));
    assert!(cart.borrow_mut().bank_changed());
    assert_eq!(0x60, bus.peek(0xF900));
    assert_eq!(0x60, cart.borrow().image()[0x0100]);
    Ok(())
}
