// Keine Standard-Bibliothek verwenden (Embedded System)
#![no_std]
// Kein normaler main() Einstiegspunkt (wird von esp_rtos bereitgestellt)
#![no_main]
// Verbiete mem::forget - gefährlich bei ESP HAL Types mit DMA-Buffern
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]
// Verbiete große Stack-Frames (Stack ist auf Embedded Systemen begrenzt)
#![deny(clippy::large_stack_frames)]

// Heap Allocator (WiFi benötigt dynamischen Speicher)
#[cfg(feature = "network")]
extern crate alloc;

use core::cell::Cell;

// Embassy Async Runtime
use embassy_executor::Spawner;
use embassy_sync::blocking_mutex::Mutex;
use embassy_time::{Duration, Timer};

// ESP32-C6 HAL
use esp_hal::clock::CpuClock;
use esp_hal::timer::timg::TimerGroup;

// Backtrace bei Panic und println!() Support
use {esp_backtrace as _, esp_println as _};

// Projekt-Module
use wortuhr::tasks::clock_task;
use wortuhr::{ClockStatusChannel, LatestStatus, TimeSetChannel};

// ESP-IDF App Descriptor - erforderlich für den Bootloader!
// Ohne diesen schlägt das Flashen mit "ESP-IDF App Descriptor missing" fehl
esp_bootloader_esp_idf::esp_app_desc!();

/// Main Entry Point
///
/// Initialisiert Hardware, startet Embassy Runtime und spawnt Tasks.
/// Danach schläft main() - alle Arbeit läuft in Tasks.
#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    // ESP32-C6 Konfiguration: CPU auf maximale Taktfrequenz (160 MHz)
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    // Heap Allocator initialisieren (WiFi braucht dynamischen Speicher!)
    #[cfg(feature = "network")]
    {
        use wortuhr::config::{EXTRA_HEAP_SIZE, WIFI_HEAP_SIZE};
        esp_alloc::heap_allocator!(
            #[esp_hal::ram(reclaimed)]
            size: WIFI_HEAP_SIZE
        );
        esp_alloc::heap_allocator!(size: EXTRA_HEAP_SIZE);
    }

    // Embassy Runtime initialisieren (Timer + Software Interrupt)
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    let sw_interrupt =
        esp_hal::interrupt::software::SoftwareInterruptControl::new(peripherals.SW_INTERRUPT);
    esp_rtos::start(timg0.timer0, sw_interrupt.software_interrupt0);

    // Status-Channel (Clock → WebSockets)
    // PubSubChannel für Broadcast: alle Subscribers bekommen jede Nachricht
    static STATUS_CHANNEL: static_cell::StaticCell<ClockStatusChannel> =
        static_cell::StaticCell::new();
    let status_channel = &*STATUS_CHANNEL.init(ClockStatusChannel::new());
    let status_publisher = status_channel.publisher().unwrap();

    static LATEST_STATUS: static_cell::StaticCell<LatestStatus> = static_cell::StaticCell::new();
    let latest_status = &*LATEST_STATUS.init(Mutex::new(Cell::new(None)));

    // Stell-Channel (WebSocket → Clock)
    static TIME_SET_CHANNEL: static_cell::StaticCell<TimeSetChannel> =
        static_cell::StaticCell::new();
    let time_set_channel = &*TIME_SET_CHANNEL.init(TimeSetChannel::new());

    // Spawn Clock Task (RMT auf GPIO8, DS3231 an I2C0 mit SDA=GPIO6, SCL=GPIO7)
    spawner
        .spawn(clock_task(
            peripherals.GPIO8,
            peripherals.RMT,
            peripherals.I2C0,
            peripherals.GPIO6,
            peripherals.GPIO7,
            status_publisher,
            latest_status,
            time_set_channel.receiver(),
        ))
        .unwrap();

    #[cfg(feature = "network")]
    {
        use embassy_net::{Config as NetConfig, Stack, StackResources};
        use esp_hal::rng::Rng;
        use wortuhr::tasks::{connection_task, dhcp_task, http_server_task, net_task};

        // WiFi Hardware initialisieren
        static RADIO_INIT: static_cell::StaticCell<esp_radio::Controller> =
            static_cell::StaticCell::new();
        let radio_init =
            RADIO_INIT.init(esp_radio::init().expect("Failed to initialize Wi-Fi/BLE controller"));

        let (wifi_controller, wifi_interface) =
            esp_radio::wifi::new(radio_init, peripherals.WIFI, Default::default())
                .expect("Failed to initialize Wi-Fi");

        // Random seed für TCP/IP Stack (von Hardware RNG)
        let rng = Rng::new();
        let seed = (rng.random() as u64) << 32 | rng.random() as u64;

        // Static resources für embassy-net
        // 4 HTTP-Listener + DHCP/DNS
        static RESOURCES: static_cell::StaticCell<StackResources<8>> =
            static_cell::StaticCell::new();
        let resources = RESOURCES.init(StackResources::new());

        let (stack, runner) = embassy_net::new(
            wifi_interface.sta,
            NetConfig::dhcpv4(Default::default()),
            resources,
            seed,
        );

        // Stack muss 'static sein für Tasks
        static STACK: static_cell::StaticCell<Stack<'static>> = static_cell::StaticCell::new();
        let stack = &*STACK.init(stack);

        // Spawn WiFi Tasks
        spawner.spawn(connection_task(wifi_controller)).unwrap();
        spawner.spawn(net_task(runner)).unwrap();
        spawner.spawn(dhcp_task(stack)).unwrap();

        // Spawn HTTP Server Tasks (4x für concurrent connections)
        let time_set_sender = time_set_channel.sender();
        for task_id in 0..4 {
            spawner
                .spawn(http_server_task(
                    task_id,
                    stack,
                    status_channel,
                    latest_status,
                    time_set_sender,
                ))
                .unwrap();
        }
    }

    // Main-Loop: schläft (alle Arbeit läuft in Tasks)
    loop {
        Timer::after(Duration::from_secs(3600)).await;
    }
}
