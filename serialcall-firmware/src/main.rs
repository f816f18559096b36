//! Serialcall - Remote Function Calls over a Serial Link
//!
//! Device firmware for RP2040 boards. Serves host requests on UART0
//! (GPIO0 TX, GPIO1 RX) and exposes the functions in [`commands`].

#![no_std]
#![no_main]

use core::cell::RefCell;

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use serialcall_core::{Arguments, Callable, CommandTable, CycleOutcome, Engine, Handler};
use serialcall_hal::IoTransport;

use crate::clock::EmbassyClock;

mod clock;
mod commands;
mod link_config;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

/// UART ring buffer size; one full request is at most 136 bytes
const UART_BUF_SIZE: usize = 256;

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; UART_BUF_SIZE]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; UART_BUF_SIZE]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Serialcall firmware starting...");

    let p = embassy_rp::init(Default::default());
    let config = link_config::engine_config();

    // Setup UART for the host link
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = config.baud_rate;

    let tx_buf = TX_BUF.init([0u8; UART_BUF_SIZE]);
    let rx_buf = RX_BUF.init([0u8; UART_BUF_SIZE]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let transport: IoTransport<_, UART_BUF_SIZE> = IoTransport::new(uart);

    info!("UART initialized at {} baud", config.baud_rate);

    // Onboard LED (Pico: GPIO25)
    let led = RefCell::new(Output::new(p.PIN_25, Level::Low));

    let mut led_set = Handler::new(commands::LED_SET, |args: &Arguments<'_>| {
        commands::led_set(&led, args)
    });
    let mut led_toggle = Handler::new(commands::LED_TOGGLE, |_: &Arguments<'_>| {
        commands::led_toggle(&led)
    });
    let mut add = commands::ADD;
    let mut uptime = commands::UPTIME;
    let mut echo = commands::ECHO;

    let entries: [(u8, &mut dyn Callable); commands::COMMAND_COUNT] = [
        (commands::CMD_LED_SET, &mut led_set),
        (commands::CMD_LED_TOGGLE, &mut led_toggle),
        (commands::CMD_ADD, &mut add),
        (commands::CMD_UPTIME, &mut uptime),
        (commands::CMD_ECHO, &mut echo),
    ];

    let mut table: CommandTable<'_, { commands::COMMAND_COUNT }> = CommandTable::new();
    for (id, callable) in entries {
        if let Err(e) = table.register(id, callable) {
            error!("Failed to register command {=u8:#x}: {}", id, e);
        }
    }
    info!("{} commands registered", table.len());

    let mut engine = match Engine::new(transport, EmbassyClock, table, config) {
        Ok(engine) => engine,
        Err(e) => {
            error!("Invalid link config: {}", e);
            return;
        }
    };

    if let Err(e) = engine.setup() {
        error!("UART setup failed: {}", e);
        return;
    }

    info!("Waiting for host");

    loop {
        match engine.run_cycle() {
            Ok(CycleOutcome::Aborted(abort)) => {
                debug!("Cycle aborted: {}", abort);
            }
            Ok(CycleOutcome::Rejected(fault)) => {
                warn!("Request rejected: {}", fault);
            }
            Ok(outcome) => {
                trace!("Served: {}", outcome);
            }
            Err(e) => {
                warn!("UART error: {}", e);
            }
        }
    }
}
