#![no_std]
#![no_main]

use defmt::{info, warn};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::UART1;
use embassy_rp::uart::{
    BufferedInterruptHandler, BufferedUartRx, BufferedUartTx, Config as UartConfig, Uart,
};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_time::{Duration, Ticker};
use static_cell::StaticCell;
use tuxctl::{Buttons, DriverError, PacketPump, TuxController, TxQueue, BAUD_RATE};
use tuxctl_rp2040::HexCounter;

#[cfg(feature = "dev-panic")]
use panic_probe as _;
#[cfg(feature = "prod-panic")]
use panic_reset as _;

bind_interrupts!(struct Irqs {
    UART1_IRQ => BufferedInterruptHandler<UART1>;
});

/// Frames waiting for the UART. A reset needs room for three at once.
const TX_QUEUE_DEPTH: usize = 8;

/// UART ring buffers. The longest frame is 6 bytes, packets are 3.
static TX_BUF: StaticCell<[u8; 32]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 32]> = StaticCell::new();

/// Button poll period.
const POLL_PERIOD: Duration = Duration::from_millis(20);

type Queue = TxQueue<CriticalSectionRawMutex, TX_QUEUE_DEPTH>;
type Controller = TuxController<CriticalSectionRawMutex, &'static Queue>;

static TX_QUEUE: Queue = TxQueue::new();

/// Driver session shared by the RX task and the main task.
static CONTROLLER: Controller = TuxController::new(&TX_QUEUE);

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("tuxctl starting...");

    let p = embassy_rp::init(embassy_rp::config::Config::default());

    // --- UART Setup ---
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = BAUD_RATE;

    let tx_buf = TX_BUF.init([0u8; 32]);
    let rx_buf = RX_BUF.init([0u8; 32]);

    let uart = Uart::new_blocking(
        p.UART1,
        p.PIN_8, // TX
        p.PIN_9, // RX
        uart_config,
    );
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();

    // Spawn tasks (unwrap the SpawnToken, then spawn)
    spawner.spawn(tx_task(tx).unwrap());
    spawner.spawn(rx_task(rx).unwrap());

    // Send failures are logged by the driver; init itself always succeeds
    let _ = CONTROLLER.init();
    info!("Tux controller initialized, polling buttons...");

    let mut counter = HexCounter::new();
    let mut ticker = Ticker::every(POLL_PERIOD);
    let mut reported_drops = 0;

    loop {
        ticker.next().await;

        let mut buttons = Buttons::NONE;
        if CONTROLLER.read_buttons(Some(&mut buttons)).is_ok() && !buttons.is_empty() {
            counter.apply(buttons);
        }

        if let Some(request) = counter.take_update() {
            match CONTROLLER.set_display(request) {
                Ok(()) => info!("display {=u16:#x}", counter.value()),
                Err(DriverError::Busy) => counter.retry(),
                Err(e) => warn!("display update failed: {}", e),
            }
        }

        let dropped = TX_QUEUE.dropped();
        if dropped != reported_drops && dropped.is_power_of_two() {
            warn!("{=u32} frames dropped on a full TX queue", dropped);
            reported_drops = dropped;
        }
    }
}

/// TX task - drains queued command frames to the UART.
#[embassy_executor::task]
async fn tx_task(mut tx: BufferedUartTx) {
    loop {
        let e = TX_QUEUE.run(&mut tx).await;
        warn!("UART TX error: {:?}", e);
    }
}

/// RX task - hands every framed status packet to the driver.
#[embassy_executor::task]
async fn rx_task(rx: BufferedUartRx) {
    let mut pump = PacketPump::new(rx);
    loop {
        let e = pump.run(&CONTROLLER).await;
        warn!("UART RX error: {:?}", e);
    }
}
