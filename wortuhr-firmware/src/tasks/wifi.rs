// WiFi Tasks - Station-Modus, Netzwerk-Stack und DHCP
//
// Die Uhr läuft auch ohne WLAN weiter; das Netzwerk wird nur zum Stellen
// über die Weboberfläche gebraucht.
use defmt::{Debug2Format, error, info, warn};
use embassy_net::{Runner, Stack};
use embassy_time::{Duration, Timer};
use esp_radio::wifi::{ClientConfig, ModeConfig, WifiController, WifiDevice, WifiEvent};

use crate::config::{WIFI_PASSWORD, WIFI_RETRY_DELAY_SECS, WIFI_SSID};

/// Konfiguriert und startet den Station-Modus, falls noch nicht geschehen
async fn ensure_started(controller: &mut WifiController<'static>) -> bool {
    if !matches!(controller.is_started(), Ok(false)) {
        return true;
    }

    let client_config = ModeConfig::Client(
        ClientConfig::default()
            .with_ssid(WIFI_SSID.into())
            .with_password(WIFI_PASSWORD.into()),
    );

    if let Err(e) = controller.set_config(&client_config) {
        error!("WiFi: Failed to set configuration: {}", Debug2Format(&e));
        return false;
    }

    if let Err(e) = controller.start_async().await {
        error!("WiFi: Failed to start: {}", Debug2Format(&e));
        return false;
    }

    info!("WiFi: Station started");
    true
}

/// WiFi Connection Task
///
/// Verbindet mit dem Access Point und verbindet nach einem Abbruch
/// automatisch neu.
#[embassy_executor::task]
pub async fn connection_task(mut controller: WifiController<'static>) {
    let retry_delay = Duration::from_secs(WIFI_RETRY_DELAY_SECS);

    loop {
        if !ensure_started(&mut controller).await {
            Timer::after(retry_delay).await;
            continue;
        }

        info!("WiFi: Connecting to '{}'...", WIFI_SSID);
        if let Err(e) = controller.connect_async().await {
            warn!("WiFi: Connection failed: {}", Debug2Format(&e));
            Timer::after(retry_delay).await;
            continue;
        }
        info!("WiFi: Connected");

        controller.wait_for_event(WifiEvent::StaDisconnected).await;
        warn!("WiFi: Disconnected from AP, will retry...");

        Timer::after(retry_delay).await;
    }
}

/// Network Task - treibt den embassy-net Stack
#[embassy_executor::task]
pub async fn net_task(mut runner: Runner<'static, WifiDevice<'static>>) -> ! {
    runner.run().await
}

/// DHCP Monitor Task
///
/// Wartet auf Link und IP-Adresse und loggt dann die Adresse der
/// Weboberfläche.
#[embassy_executor::task]
pub async fn dhcp_task(stack: &'static Stack<'static>) {
    stack.wait_link_up().await;
    info!("WiFi: Link is up, waiting for IP address...");

    stack.wait_config_up().await;
    if let Some(config) = stack.config_v4() {
        info!(
            "WiFi: Web interface at http://{}/",
            Debug2Format(&config.address.address())
        );
        info!("  Gateway: {}", Debug2Format(&config.gateway));
    }
}
