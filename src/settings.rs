
use std::str::FromStr;

use strum_macros::{Display, EnumString};
use thiserror::Error;

// Any nonzero value works. This one is only here so that two runs of the
// same image see the same power-on RAM.
pub const DEFAULT_RAM_SEED: u32 = 0x2600_C0DE;

/// What cartridge RAM holds on reset when the image carries no RAM payload.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum RamInit {
    Random,
    Zero,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Settings {
    pub ram_init: RamInit,
    pub ram_seed: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ram_init: RamInit::Random,
            ram_seed: DEFAULT_RAM_SEED,
        }
    }
}

impl Settings {
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
        match key {
            "ramrandom" => {
                let random = bool::from_str(value)
                    .map_err(|_| SettingsError::InvalidValue(key.to_string(), value.to_string()))?;
                self.ram_init = if random {
                    RamInit::Random
                } else {
                    RamInit::Zero
                };
            }
            "raminit" => {
                self.ram_init = RamInit::from_str(value)
                    .map_err(|_| SettingsError::InvalidValue(key.to_string(), value.to_string()))?;
            }
            "ramseed" => {
                let hex = value
                    .strip_prefix("0x")
                    .or_else(|| value.strip_prefix("0X"));
                let parsed = match hex {
                    Some(hex) => u32::from_str_radix(hex, 16),
                    None => value.parse::<u32>(),
                };
                self.ram_seed = parsed
                    .map_err(|_| SettingsError::InvalidValue(key.to_string(), value.to_string()))?;
            }
            _ => Err(SettingsError::UnknownKey(key.to_string()))?,
        }
        Ok(())
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SettingsError {
    #[error("There is no setting called {0}")]
    UnknownKey(String),
    #[error("The setting {0} can't be set to {1}")]
    InvalidValue(String, String),
}
