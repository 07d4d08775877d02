// Build-Script: Wird vor dem Kompilieren ausgeführt
// Reicht Build-Zeit-Konfiguration weiter und setzt die Linker-Skripte

/// Environment-Variablen, die in die Firmware eingebacken werden
/// WIFI_* nur mit Feature `network`, CLOCK_INITIAL_TIME optional ("HH:MM:SS")
const FORWARDED_ENV: [&str; 3] = ["WIFI_SSID", "WIFI_PASSWORD", "CLOCK_INITIAL_TIME"];

fn main() {
    // .env ist optional, die Werte können auch direkt gesetzt sein
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("⚠️  .env file nicht gefunden: {}", e);
    }

    for name in FORWARDED_ENV {
        println!("cargo:rerun-if-env-changed={}", name);
        if let Ok(value) = std::env::var(name) {
            println!("cargo:rustc-env={}={}", name, value);
        }
    }

    if let Some((kind, symbol)) = linker_error() {
        if let Some(hint) = linker_hint(&kind, &symbol) {
            eprintln!();
            eprintln!("💡 {}", hint);
            eprintln!();
        }
        std::process::exit(if kind == "undefined-symbol" { 0 } else { 1 });
    }

    // Dieses Script dient dem Linker zugleich als Error-Handler
    if let Ok(exe) = std::env::current_exe() {
        println!(
            "cargo:rustc-link-arg=--error-handling-script={}",
            exe.display()
        );
    }

    // defmt.x: Symbole für das binäre Log-Format
    println!("cargo:rustc-link-arg=-Tdefmt.x");
    // linkall.x: Flash/RAM-Layout, muss als LETZTES kommen
    println!("cargo:rustc-link-arg=-Tlinkall.x");
}

/// Aufruf durch den Linker: `build-script <fehler-typ> <symbol>`
fn linker_error() -> Option<(String, String)> {
    let mut args = std::env::args().skip(1);
    let kind = args.next()?;
    let symbol = args.next().unwrap_or_default();
    Some((kind, symbol))
}

fn linker_hint(kind: &str, symbol: &str) -> Option<&'static str> {
    if kind != "undefined-symbol" {
        return None;
    }
    match symbol {
        s if s.starts_with("_defmt_") => Some(
            "`defmt` not found - make sure `defmt.x` is added as a linker script and `use esp_println as _;` is in main.rs",
        ),
        "_stack_start" => Some("Is the linker script `linkall.x` missing?"),
        s if s.starts_with("esp_rtos_") => Some(
            "`esp-radio` has no scheduler enabled. Make sure `esp_rtos::start` runs before the radio is initialized.",
        ),
        "malloc" | "calloc" | "free" | "malloc_internal" | "free_internal" => Some(
            "WiFi needs a heap - build with the `network` feature so `esp-alloc` is linked",
        ),
        _ => None,
    }
}
