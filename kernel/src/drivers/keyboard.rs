//! Polling PS/2 keyboard decoder.
//!
//! Reads raw scan codes from port 0x60 whenever the controller status
//! port 0x64 reports data, tracks the shift-modifier state, and
//! translates press codes through one of two fixed 128-entry tables.
//! There is no interrupt wiring: the shell loop polls synchronously, and
//! a fixed busy-wait after every decoded character stands in for edge
//! detection as a crude debounce against re-reading the same key
//! transition. That spin is a blocking cost proportional to host clock
//! speed and is part of the observed timing contract.

/// Scan codes for the two shift keys; their release codes are the press
/// codes with bit 7 set.
const SCANCODE_LSHIFT: u8 = 0x2A;
const SCANCODE_RSHIFT: u8 = 0x36;

/// Bit 7 set marks a key-release event.
const RELEASE_BIT: u8 = 0x80;

/// The Escape key, used by the modal editor as its exit code.
pub const SCANCODE_ESC: u8 = 0x01;

/// Iterations of the post-key debounce spin.
const DEBOUNCE_SPINS: u32 = 400_000;

/// US layout, unshifted. A zero entry means the code produces no
/// character (control keys, F-keys, unmapped codes).
const KBD_US: [u8; 128] = [
    0, 0x1B, b'1', b'2', b'3', b'4', b'5', b'6', b'7', b'8', b'9', b'0', b'-', b'=', 0x08, b'\t', // 0x00
    b'q', b'w', b'e', b'r', b't', b'y', b'u', b'i', b'o', b'p', b'[', b']', b'\n', 0, b'a', b's', // 0x10
    b'd', b'f', b'g', b'h', b'j', b'k', b'l', b';', b'\'', b'`', 0, b'\\', b'z', b'x', b'c', b'v', // 0x20
    b'b', b'n', b'm', b',', b'.', b'/', 0, b'*', 0, b' ', 0, 0, 0, 0, 0, 0, // 0x30
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, b'-', 0, 0, 0, b'+', 0, // 0x40
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, // 0x50
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, // 0x60
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, // 0x70
];

/// US layout with shift held.
const KBD_US_SHIFT: [u8; 128] = [
    0, 0x1B, b'!', b'@', b'#', b'$', b'%', b'^', b'&', b'*', b'(', b')', b'_', b'+', 0x08, b'\t', // 0x00
    b'Q', b'W', b'E', b'R', b'T', b'Y', b'U', b'I', b'O', b'P', b'{', b'}', b'\n', 0, b'A', b'S', // 0x10
    b'D', b'F', b'G', b'H', b'J', b'K', b'L', b':', b'"', b'~', 0, b'|', b'Z', b'X', b'C', b'V', // 0x20
    b'B', b'N', b'M', b'<', b'>', b'?', 0, b'*', 0, b' ', 0, 0, 0, 0, 0, 0, // 0x30
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, b'-', 0, 0, 0, b'+', 0, // 0x40
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, // 0x50
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, // 0x60
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, // 0x70
];

/// Scan-code decoder with shift-modifier state.
pub struct Keyboard {
    shift: bool,
}

impl Keyboard {
    pub const fn new() -> Self {
        Self { shift: false }
    }

    /// Read one raw scan code if the controller has data ready.
    pub fn poll_scancode(&mut self) -> Option<u8> {
        #[cfg(all(target_arch = "x86_64", not(test)))]
        {
            use x86_64::instructions::port::Port;

            let mut status: Port<u8> = Port::new(0x64);
            let mut data: Port<u8> = Port::new(0x60);
            // SAFETY: Reading the PS/2 controller status and data ports
            // has no memory effects; bit 0 of the status byte gates the
            // data read.
            unsafe {
                if status.read() & 1 != 0 {
                    Some(data.read())
                } else {
                    None
                }
            }
        }
        #[cfg(not(all(target_arch = "x86_64", not(test))))]
        {
            None
        }
    }

    /// Translate one raw scan code into a character.
    ///
    /// Shift press codes set the modifier and their release codes clear
    /// it; neither produces a character. Any other code with the release
    /// bit set is discarded. Remaining codes index the table selected by
    /// the modifier; a zero entry yields nothing.
    pub fn decode(&mut self, scancode: u8) -> Option<u8> {
        match scancode {
            SCANCODE_LSHIFT | SCANCODE_RSHIFT => {
                self.shift = true;
                None
            }
            code if code == (SCANCODE_LSHIFT | RELEASE_BIT)
                || code == (SCANCODE_RSHIFT | RELEASE_BIT) =>
            {
                self.shift = false;
                None
            }
            code if code & RELEASE_BIT != 0 => None,
            code => {
                let table = if self.shift { &KBD_US_SHIFT } else { &KBD_US };
                match table[code as usize] {
                    0 => None,
                    ch => Some(ch),
                }
            }
        }
    }

    /// Poll, decode, and debounce one keystroke.
    pub fn poll(&mut self) -> Option<u8> {
        let scancode = self.poll_scancode()?;
        let ch = self.decode(scancode)?;
        debounce();
        Some(ch)
    }
}

impl Default for Keyboard {
    fn default() -> Self {
        Self::new()
    }
}

/// Busy-wait after a decoded keystroke so one physical key transition is
/// not read twice from the polled data port.
pub fn debounce() {
    for _ in 0..DEBOUNCE_SPINS {
        core::hint::spin_loop();
    }
}
