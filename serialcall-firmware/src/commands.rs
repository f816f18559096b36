//! Functions this board exposes to the host
//!
//! | id   | function       | signature            |
//! |------|----------------|----------------------|
//! | 0x10 | `led_set`      | `(bool) -> void`     |
//! | 0x11 | `led_toggle`   | `() -> bool`         |
//! | 0x12 | `add`          | `(int, int) -> int`  |
//! | 0x13 | `uptime_s`     | `() -> ulong`        |
//! | 0x14 | `echo`         | `(byte) -> byte`     |

use core::cell::RefCell;

use embassy_rp::gpio::Output;
use embassy_time::Instant;
use serialcall_core::{Arguments, Function, Signature};
use serialcall_protocol::{FunctionType, Value};

pub const CMD_LED_SET: u8 = 0x10;
pub const CMD_LED_TOGGLE: u8 = 0x11;
pub const CMD_ADD: u8 = 0x12;
pub const CMD_UPTIME: u8 = 0x13;
pub const CMD_ECHO: u8 = 0x14;

/// Number of registered commands
pub const COMMAND_COUNT: usize = 5;

pub const LED_SET: Signature = Signature::new(FunctionType::Void, &[FunctionType::Boolean]);
pub const LED_TOGGLE: Signature = Signature::new(FunctionType::Boolean, &[]);

pub const ADD: Function = Function::new(
    Signature::new(FunctionType::Int, &[FunctionType::Int, FunctionType::Int]),
    add,
);

pub const UPTIME: Function = Function::new(Signature::new(FunctionType::ULong, &[]), uptime_s);

pub const ECHO: Function = Function::new(
    Signature::new(FunctionType::Byte, &[FunctionType::Byte]),
    echo,
);

pub fn led_set(led: &RefCell<Output<'_>>, args: &Arguments<'_>) -> Value {
    let mut led = led.borrow_mut();
    if args.bool(0).unwrap_or(false) {
        led.set_high();
    } else {
        led.set_low();
    }
    Value::Void
}

pub fn led_toggle(led: &RefCell<Output<'_>>) -> Value {
    let mut led = led.borrow_mut();
    led.toggle();
    Value::Bool(led.is_set_high())
}

fn add(args: &Arguments<'_>) -> Value {
    let a = args.i16(0).unwrap_or(0);
    let b = args.i16(1).unwrap_or(0);
    Value::I16(a.wrapping_add(b))
}

fn uptime_s(_: &Arguments<'_>) -> Value {
    Value::U32(Instant::now().as_secs() as u32)
}

fn echo(args: &Arguments<'_>) -> Value {
    Value::U8(args.u8(0).unwrap_or(0))
}
