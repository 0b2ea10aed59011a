//! T-Minus - Network-synced countdown clock firmware
//!
//! Main firmware binary for an RP2040 board driving three chained HT16K33
//! quad alphanumeric backpacks, with a Wi-Fi bridge coprocessor on UART0
//! supplying the current time.
//!
//! Shows days and hours until the configured event, scrolls the event
//! message once it arrives, and restarts after any failure.

#![no_std]
#![no_main]

use cortex_m::peripheral::SCB;
use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::i2c::{Config as I2cConfig, I2c, InterruptHandler as I2cInterruptHandler};
use embassy_rp::peripherals::{I2C0, UART0};
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use embassy_time::{Delay, Timer};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use tminus_core::config::DEFAULT_SWAP_DELAY_S;
use tminus_drivers::display::{Ht16k33, DEFAULT_ADDRESSES};
use tminus_drivers::link::BridgeLink;

mod countdown;
mod settings;
mod timed;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
    I2C0_IRQ => I2cInterruptHandler<I2C0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("T-Minus firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // STEMMA QT connector: SDA = GPIO4, SCL = GPIO5
    let i2c = I2c::new_async(p.I2C0, p.PIN_5, p.PIN_4, Irqs, I2cConfig::default());
    let mut display = Ht16k33::new(i2c, Delay, &DEFAULT_ADDRESSES);
    if let Err(e) = display.init().await {
        // Nothing to show the error on
        error!("Failed to initialize display: {}", e);
        Timer::after_secs(DEFAULT_SWAP_DELAY_S as u64).await;
        SCB::sys_reset();
    }
    info!("Display initialized");

    // Bridge link at 115200 8N1
    let uart_config = UartConfig::default();
    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);
    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    info!("UART initialized for bridge communication");

    let fault = countdown::run(display, BridgeLink::new(uart)).await;

    error!("Resetting after {}", fault);
    SCB::sys_reset();
}
