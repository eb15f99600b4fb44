//! Kernel entry point.
//!
//! The real entry only exists on bare-metal builds (`x86_64-unknown-none`);
//! hosted builds get a stub so the workspace compiles everywhere the
//! library tests run.

#![cfg_attr(target_os = "none", no_std)]
#![cfg_attr(target_os = "none", no_main)]

#[cfg(target_os = "none")]
mod boot {
    use core::panic::PanicInfo;

    use micros_kernel::drivers::vga::{Color, ColorCode, Vga};
    use micros_kernel::shell::Shell;
    use micros_kernel::{logger, serial, serial_println, Context};

    #[no_mangle]
    pub extern "C" fn kernel_main() -> ! {
        serial::init();
        logger::init();
        log::info!("micros-kernel {} booting", env!("CARGO_PKG_VERSION"));

        // SAFETY: kernel_main runs once, on one CPU, so this is the only
        // handle over the VGA text buffer for the kernel's lifetime.
        let vga = unsafe { Vga::hardware() };
        let mut ctx = Context::new(vga);
        ctx.vga.clear(ColorCode::new(Color::LightCyan, Color::Black));
        ctx.processes.spawn("shell", 1);

        let mut shell = Shell::new();
        shell.banner(&mut ctx);
        log::info!("entering shell loop");
        shell.run(&mut ctx)
    }

    #[panic_handler]
    fn panic(info: &PanicInfo) -> ! {
        serial_println!("KERNEL PANIC: {}", info);
        loop {
            x86_64::instructions::hlt();
        }
    }
}

#[cfg(not(target_os = "none"))]
fn main() {
    eprintln!("micros-kernel only runs on bare metal; build for x86_64-unknown-none");
}
