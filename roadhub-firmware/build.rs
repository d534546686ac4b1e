//! Build script for roadhub-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates hub.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Sections the firmware knows how to read
const KNOWN_SECTIONS: [&str; 5] = ["network", "server", "gesture", "link", "notifications"];

/// Field lengths accepted by the firmware parser
const MAX_SSID_LEN: usize = 32;
const MAX_PASSWORD_LEN: usize = 64;
const MAX_HOST_LEN: usize = 64;
const MAX_PATH_LEN: usize = 32;

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate hub.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=hub.toml");

    let config_path = Path::new("hub.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: hub.toml not found!                                      ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds hub.toml as its configuration.              ║\n\
            ║  Please create one in the roadhub-firmware directory.            ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read hub.toml                                  ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in hub.toml                          ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    validate_sections(&config);
    validate_network(&config);
    validate_server(&config);
    validate_timings(&config);

    println!("cargo:warning=hub.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Abort the build with a boxed list of problems
fn fail(title: &str, errors: &[String]) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        errors
            .iter()
            .map(|e| format!("║  • {:<62} ║", e))
            .collect::<Vec<_>>()
            .join("\n")
    );
}

/// Every top-level entry must be one of the known sections
fn validate_sections(config: &toml::Value) {
    let table = match config.as_table() {
        Some(t) => t,
        None => return,
    };

    let mut errors = Vec::new();

    for (name, value) in table {
        if !KNOWN_SECTIONS.contains(&name.as_str()) {
            errors.push(format!("Unknown section [{}]", name));
        } else if !value.is_table() {
            errors.push(format!("'{}' must be a [section]", name));
        }
    }

    if !errors.is_empty() {
        fail("Invalid sections in hub.toml", &errors);
    }
}

fn check_string(
    errors: &mut Vec<String>,
    section: &toml::value::Table,
    name: &str,
    key: &str,
    max: usize,
) {
    match section.get(key) {
        Some(toml::Value::String(s)) if s.len() > max => {
            errors.push(format!("[{}] {} longer than {} bytes", name, key, max));
        }
        Some(toml::Value::String(_)) | None => {}
        Some(_) => errors.push(format!("[{}] {} must be a string", name, key)),
    }
}

fn check_int(
    errors: &mut Vec<String>,
    section: &toml::value::Table,
    name: &str,
    key: &str,
    min: i64,
    max: i64,
) {
    match section.get(key) {
        Some(toml::Value::Integer(v)) if *v < min || *v > max => {
            errors.push(format!("[{}] {} must be {}-{}", name, key, min, max));
        }
        Some(toml::Value::Integer(_)) | None => {}
        Some(_) => errors.push(format!("[{}] {} must be an integer", name, key)),
    }
}

/// Validate network credentials
fn validate_network(config: &toml::Value) {
    let network = match config.get("network") {
        Some(toml::Value::Table(t)) => t,
        _ => return,
    };

    let mut errors = Vec::new();
    check_string(&mut errors, network, "network", "ssid", MAX_SSID_LEN);
    check_string(&mut errors, network, "network", "password", MAX_PASSWORD_LEN);

    if !errors.is_empty() {
        fail("Invalid network configuration", &errors);
    }
}

/// Validate the metrics server endpoint
fn validate_server(config: &toml::Value) {
    let server = match config.get("server") {
        Some(toml::Value::Table(t)) => t,
        _ => return,
    };

    let mut errors = Vec::new();
    check_string(&mut errors, server, "server", "host", MAX_HOST_LEN);
    check_string(&mut errors, server, "server", "path", MAX_PATH_LEN);
    check_int(&mut errors, server, "server", "port", 1, 65535);

    if let Some(toml::Value::String(path)) = server.get("path") {
        if !path.starts_with('/') {
            errors.push("[server] path must start with '/'".to_string());
        }
    }

    if !errors.is_empty() {
        fail("Invalid server configuration", &errors);
    }
}

/// Validate gesture thresholds and link timings
fn validate_timings(config: &toml::Value) {
    let mut errors = Vec::new();

    if let Some(toml::Value::Table(gesture)) = config.get("gesture") {
        check_int(&mut errors, gesture, "gesture", "debounce_ms", 0, 10_000);
        check_int(&mut errors, gesture, "gesture", "swipe_threshold_px", 0, 320);
        check_int(&mut errors, gesture, "gesture", "navbar_top_px", 0, 320);
        check_int(&mut errors, gesture, "gesture", "nav_button_width_px", 1, 240);
    }

    if let Some(toml::Value::Table(link)) = config.get("link") {
        check_int(&mut errors, link, "link", "join_attempts", 1, 255);
        check_int(&mut errors, link, "link", "join_retry_ms", 1, 60_000);
        check_int(&mut errors, link, "link", "rejoin_cooldown_ms", 0, 3_600_000);
        check_int(&mut errors, link, "link", "metrics_interval_ms", 1, 3_600_000);
        check_int(&mut errors, link, "link", "simulation_interval_ms", 1, 3_600_000);
    }

    if let Some(toml::Value::Table(notifications)) = config.get("notifications") {
        check_int(
            &mut errors,
            notifications,
            "notifications",
            "expiry_ms",
            0,
            3_600_000,
        );
    }

    if !errors.is_empty() {
        fail("Invalid gesture/link timings", &errors);
    }
}
