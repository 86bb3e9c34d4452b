//! PS/2 device-to-host frame assembly.
//!
//! Frame (11 bits, sampled on the falling clock edge):
//! ```text
//! bit 0      start, always 0
//! bit 1-8    data, LSB first
//! bit 9      odd parity over the data bits
//! bit 10     stop, always 1
//! ```

/// Malformed frame. The receiver has already discarded it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    BadStartBit,
    BadParity,
    BadStopBit,
}

/// Bit-at-a-time frame receiver.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameReceiver {
    bits: u16,
    count: u8,
}

impl FrameReceiver {
    pub const fn new() -> Self {
        Self { bits: 0, count: 0 }
    }

    /// `true` while a frame is partially received.
    pub fn in_progress(&self) -> bool {
        self.count != 0
    }

    /// Drop any partial frame (clock timeout, line reset).
    pub fn reset(&mut self) {
        self.bits = 0;
        self.count = 0;
    }

    /// Feed the data line level sampled at one falling clock edge.
    ///
    /// Returns the data byte once the stop bit arrives.
    pub fn push_bit(&mut self, level: bool) -> Result<Option<u8>, FrameError> {
        if self.count == 0 && level {
            return Err(FrameError::BadStartBit);
        }

        self.bits |= (level as u16) << self.count;
        self.count += 1;

        if self.count < 11 {
            return Ok(None);
        }

        let frame = self.bits;
        self.reset();

        let data = (frame >> 1) as u8;
        let parity = (frame >> 9) & 1 == 1;
        if frame & (1 << 10) == 0 {
            return Err(FrameError::BadStopBit);
        }
        // Odd parity: data ones + parity bit must be odd.
        if (data.count_ones() + parity as u32) % 2 == 0 {
            return Err(FrameError::BadParity);
        }
        Ok(Some(data))
    }
}

/// Bits of a well-formed frame carrying `data`, in line order.
#[cfg(test)]
pub fn encode_frame(data: u8) -> [bool; 11] {
    let mut bits = [false; 11];
    for (i, bit) in bits[1..9].iter_mut().enumerate() {
        *bit = data & (1 << i) != 0;
    }
    bits[9] = data.count_ones() % 2 == 0;
    bits[10] = true;
    bits
}
