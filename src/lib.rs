pub mod bus;
pub mod cartridge;
pub mod random;
pub mod serializer;
pub mod settings;

pub use bus::{Bus, DataBus};
pub use cartridge::{Cartridge, CartridgeError, commavid::CommaVid};
pub use settings::{RamInit, Settings};
