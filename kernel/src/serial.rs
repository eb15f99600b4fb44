//! COM1 serial output.
//!
//! Diagnostic channel only: user-facing output goes to the VGA console.
//! The port is initialized lazily behind a spinlock and written with
//! interrupts disabled so a panic inside a print cannot deadlock.

use core::fmt;

#[cfg(target_arch = "x86_64")]
mod x86_64_impl {
    use lazy_static::lazy_static;
    use spin::Mutex;
    use uart_16550::SerialPort;

    lazy_static! {
        pub static ref SERIAL1: Mutex<SerialPort> = {
            // SAFETY: 0x3F8 is the standard COM1 base port and is not
            // driven by anything else in this kernel.
            let mut port = unsafe { SerialPort::new(0x3F8) };
            port.init();
            Mutex::new(port)
        };
    }
}

/// Bring up COM1 during boot so the first log line does not pay the
/// init cost inside the lock.
pub fn init() {
    #[cfg(target_arch = "x86_64")]
    lazy_static::initialize(&x86_64_impl::SERIAL1);
}

#[doc(hidden)]
pub fn _serial_print(args: fmt::Arguments) {
    #[cfg(target_arch = "x86_64")]
    {
        use core::fmt::Write;

        use x86_64::instructions::interrupts;

        interrupts::without_interrupts(|| {
            x86_64_impl::SERIAL1
                .lock()
                .write_fmt(args)
                .expect("serial write failed");
        });
    }
    #[cfg(not(target_arch = "x86_64"))]
    {
        let _ = args;
    }
}

#[macro_export]
macro_rules! serial_print {
    ($($arg:tt)*) => {
        $crate::serial::_serial_print(format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! serial_println {
    () => ($crate::serial_print!("\n"));
    ($($arg:tt)*) => {
        $crate::serial_print!("{}\n", format_args!($($arg)*))
    };
}
