//! RoadHub - Touch-Panel Status Console Firmware
//!
//! Controller firmware for the RP2040 that sits between the touch panel and
//! the network bridge. It recognizes gestures, keeps the screen and
//! notification state, and maintains the telemetry link to the metrics
//! server, falling back to local simulation while offline.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::{UART0, UART1};
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use embassy_time::Instant;
use embedded_alloc::LlffHeap as Heap;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use roadhub_core::config::{parse_config, HubConfig};

// Heap allocator for JSON decoding
#[global_allocator]
static HEAP: Heap = Heap::empty();

// Heap size: 16KB
const HEAP_SIZE: usize = 16 * 1024;

/// Embedded configuration (compiled into firmware)
/// Edit hub.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../hub.toml");

mod bridge;
mod channels;
mod display;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
    UART1_IRQ => BufferedInterruptHandler<UART1>;
});

// Static cells for UART buffers (must live forever)
static PANEL_TX_BUF: StaticCell<[u8; 1024]> = StaticCell::new();
static PANEL_RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static BRIDGE_TX_BUF: StaticCell<[u8; 512]> = StaticCell::new();
static BRIDGE_RX_BUF: StaticCell<[u8; 512]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("RoadHub firmware starting...");

    init_heap();

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = load_config();
    info!(
        "Server endpoint: {}:{}{}",
        config.server.host.as_str(),
        config.server.port,
        config.server.path.as_str()
    );

    // UART0: panel MCU (GPIO0 TX, GPIO1 RX), 115200 baud default
    let panel_tx_buf = PANEL_TX_BUF.init([0u8; 1024]);
    let panel_rx_buf = PANEL_RX_BUF.init([0u8; 256]);
    let panel_uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, UartConfig::default());
    let panel_uart = panel_uart.into_buffered(Irqs, panel_tx_buf, panel_rx_buf);
    let (panel_tx, panel_rx) = panel_uart.split();

    info!("UART initialized for panel communication");

    // UART1: network bridge MCU (GPIO4 TX, GPIO5 RX)
    let bridge_tx_buf = BRIDGE_TX_BUF.init([0u8; 512]);
    let bridge_rx_buf = BRIDGE_RX_BUF.init([0u8; 512]);
    let bridge_uart = Uart::new_blocking(p.UART1, p.PIN_4, p.PIN_5, UartConfig::default());
    let bridge_uart = bridge_uart.into_buffered(Irqs, bridge_tx_buf, bridge_rx_buf);
    let (bridge_tx, bridge_rx) = bridge_uart.split();

    info!("UART initialized for bridge communication");

    // Simulation seed; boot timing varies enough between power cycles
    let seed = Instant::now().as_ticks() ^ 0x5EED_0F_C0FFEE;

    // Spawn tasks
    spawner.spawn(tasks::tick_task()).unwrap();
    spawner.spawn(tasks::panel_rx_task(panel_rx)).unwrap();
    spawner.spawn(tasks::panel_tx_task(panel_tx)).unwrap();
    spawner.spawn(tasks::bridge_rx_task(bridge_rx)).unwrap();
    spawner.spawn(tasks::bridge_tx_task(bridge_tx)).unwrap();
    spawner
        .spawn(tasks::controller_task(config, seed))
        .unwrap();

    info!("All tasks spawned, firmware running");

    // Main task has nothing else to do - all work happens in spawned tasks
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}

/// Initialize the heap allocator
fn init_heap() {
    use core::mem::MaybeUninit;
    static mut HEAP_MEM: [MaybeUninit<u8>; HEAP_SIZE] = [MaybeUninit::uninit(); HEAP_SIZE];
    #[allow(static_mut_refs)]
    unsafe {
        HEAP.init(HEAP_MEM.as_ptr() as usize, HEAP_SIZE)
    }
}

/// Parse the hub.toml embedded at compile time
///
/// build.rs already validated it, so failure here means the firmware parser
/// and the build-time check disagree. Falls back to built-in defaults.
fn load_config() -> HubConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Parsed embedded configuration successfully");
            config
        }
        Err(e) => {
            error!("Failed to parse embedded config: {:?}", e);
            error!("Using built-in defaults");
            HubConfig::default()
        }
    }
}
