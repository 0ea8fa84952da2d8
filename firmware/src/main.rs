#![no_std]
#![no_main]

mod devices;
mod machine;

use machine::Machine;
use panic_halt as _;

#[arduino_hal::entry]
fn main() -> ! {
    Machine::new().run()
}
