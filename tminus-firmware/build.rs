//! Build script for tminus-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates settings.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

/// Integer keys with their accepted ranges
const INTEGER_KEYS: [(&str, i64, i64); 8] = [
    ("EVENT_YEAR", 1970, 9999),
    ("EVENT_MONTH", 1, 12),
    ("EVENT_DAY", 1, 31),
    ("EVENT_HOUR", 0, 23),
    ("EVENT_MINUTE", 0, 59),
    ("SWAP_DELAY", 0, 86_400),
    ("SCROLL_SPEED", 1, 100),
    ("BRIGHTNESS", 1, 100),
];

/// String keys with their byte limits; the event texts are unbounded
const STRING_KEYS: [(&str, Option<usize>); 6] = [
    ("EVENT_NAME", None),
    ("EVENT_MSG", None),
    ("CIRCUITPY_WIFI_SSID", Some(32)),
    ("CIRCUITPY_WIFI_PASSWORD", Some(63)),
    ("AIO_USERNAME", Some(32)),
    ("AIO_KEY", Some(64)),
];

fn main() {
    setup_linker();
    validate_settings();
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

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate settings.toml at compile time
fn validate_settings() {
    println!("cargo:rerun-if-changed=settings.toml");

    let settings_path = Path::new("settings.toml");

    if !settings_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: settings.toml not found!                                 ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds a settings.toml file with the event and     ║\n\
            ║  network settings. Create one in the tminus-firmware directory.  ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let content = match fs::read_to_string(settings_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read settings.toml                             ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let settings: toml::Value = match toml::from_str(&content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in settings.toml                     ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_integers(&settings, &mut errors);
    validate_strings(&settings, &mut errors);
    validate_event_date(&settings, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid settings                                         ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=settings.toml validated successfully");
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

fn validate_integers(settings: &toml::Value, errors: &mut Vec<String>) {
    for (key, min, max) in INTEGER_KEYS {
        match settings.get(key) {
            Some(toml::Value::Integer(n)) => {
                if *n < min || *n > max {
                    errors.push(format!("{} must be {}-{}", key, min, max));
                }
            }
            Some(_) => errors.push(format!("{} must be an integer", key)),
            None => errors.push(format!("{} is missing", key)),
        }
    }
}

fn validate_strings(settings: &toml::Value, errors: &mut Vec<String>) {
    for (key, limit) in STRING_KEYS {
        match settings.get(key) {
            Some(toml::Value::String(s)) => {
                if let Some(limit) = limit.filter(|&limit| s.len() > limit) {
                    errors.push(format!("{} must be at most {} bytes", key, limit));
                }
            }
            Some(_) => errors.push(format!("{} must be a quoted string", key)),
            None => errors.push(format!("{} is missing", key)),
        }
    }

    if let Some(toml::Value::String(msg)) = settings.get("EVENT_MSG") {
        if msg.is_empty() {
            errors.push("EVENT_MSG cannot be empty".to_string());
        }
    }
}

/// Check that the event date exists (e.g. no February 30th)
fn validate_event_date(settings: &toml::Value, errors: &mut Vec<String>) {
    let field = |key: &str| settings.get(key).and_then(|v| v.as_integer());
    let (Some(year), Some(month), Some(day)) =
        (field("EVENT_YEAR"), field("EVENT_MONTH"), field("EVENT_DAY"))
    else {
        return;
    };

    // Out-of-range fields are already reported
    if !(1970..=9999).contains(&year)
        || !(1..=12).contains(&month)
        || !(1..=31).contains(&day)
    {
        return;
    }

    if NaiveDate::from_ymd_opt(year as i32, month as u32, day as u32).is_none() {
        errors.push(format!(
            "EVENT_DAY {} does not exist in {}-{:02}",
            day, year, month
        ));
    }
}
