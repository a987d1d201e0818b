//! Physical pin bookkeeping for startup binding.

use crate::config::MAX_PIN;
use crate::error::Error;

/// Set of pin numbers already handed out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PinClaims {
    claimed: u64,
}

impl PinClaims {
    pub const fn new() -> Self {
        Self { claimed: 0 }
    }

    /// Claims with `reserved` already taken (e.g. I²C lines used elsewhere).
    pub fn reserving(reserved: &[u8]) -> Self {
        let mut claims = Self::new();
        for &pin in reserved {
            if pin <= MAX_PIN {
                claims.claimed |= 1 << pin;
            }
        }
        claims
    }

    /// Take `pin`, failing if it does not exist or is already taken.
    pub fn claim(&mut self, pin: u8) -> Result<(), Error> {
        if pin > MAX_PIN {
            return Err(Error::PinUnavailable(pin));
        }
        if self.is_claimed(pin) {
            return Err(Error::PinInUse(pin));
        }
        self.claimed |= 1 << pin;
        Ok(())
    }

    /// Give `pin` back after a failed bind.
    pub fn release(&mut self, pin: u8) {
        if pin <= MAX_PIN {
            self.claimed &= !(1 << pin);
        }
    }

    pub fn is_claimed(&self, pin: u8) -> bool {
        pin <= MAX_PIN && self.claimed & (1 << pin) != 0
    }

    pub fn count(&self) -> u32 {
        self.claimed.count_ones()
    }
}
