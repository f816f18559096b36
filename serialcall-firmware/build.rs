//! Build script for serialcall-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates link.toml and compiles it into constants

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Baud rates the RP2040 UART divider hits within 1%
const SUPPORTED_BAUD_RATES: [i64; 8] = [
    9_600, 19_200, 38_400, 57_600, 115_200, 230_400, 460_800, 921_600,
];

fn main() {
    setup_linker();
    generate_link_config();
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

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validated contents of the [link] table
struct LinkSettings {
    baud_rate: i64,
    header_timeout_ms: i64,
    payload_timeout_ms: i64,
    wide_longs: bool,
}

/// Validate link.toml and write link_config.rs into OUT_DIR
fn generate_link_config() {
    println!("cargo:rerun-if-changed=link.toml");

    let config_path = Path::new("link.toml");
    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail(&[format!("Failed to read link.toml: {}", e)]),
    };

    let config: toml::Value = match toml::from_str(&content) {
        Ok(value) => value,
        Err(e) => fail(&e.to_string().lines().map(String::from).collect::<Vec<_>>()),
    };

    let settings = validate_link(&config);

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let mut f = File::create(out_dir.join("link_config.rs")).unwrap();
    writeln!(f, "// Generated from link.toml by build.rs").unwrap();
    writeln!(f, "pub const BAUD_RATE: u32 = {};", settings.baud_rate).unwrap();
    writeln!(
        f,
        "pub const HEADER_TIMEOUT_MS: u32 = {};",
        settings.header_timeout_ms
    )
    .unwrap();
    writeln!(
        f,
        "pub const PAYLOAD_TIMEOUT_MS: u32 = {};",
        settings.payload_timeout_ms
    )
    .unwrap();
    writeln!(f, "pub const WIDE_LONGS: bool = {};", settings.wide_longs).unwrap();

    println!("cargo:warning=link.toml validated successfully");
}

/// Check the [link] table, collecting every problem before failing
fn validate_link(config: &toml::Value) -> LinkSettings {
    let link = match config.get("link") {
        Some(toml::Value::Table(t)) => t,
        Some(_) => fail(&["[link] must be a table".to_string()]),
        None => fail(&["Missing [link] section".to_string()]),
    };

    let mut errors = Vec::new();

    let integer = |key: &str, errors: &mut Vec<String>| match link.get(key) {
        Some(toml::Value::Integer(v)) => *v,
        Some(_) => {
            errors.push(format!("[link] '{}' must be an integer", key));
            0
        }
        None => {
            errors.push(format!("[link] missing '{}'", key));
            0
        }
    };

    let baud_rate = integer("baud_rate", &mut errors);
    let header_timeout_ms = integer("header_timeout_ms", &mut errors);
    let payload_timeout_ms = integer("payload_timeout_ms", &mut errors);

    if baud_rate != 0 && !SUPPORTED_BAUD_RATES.contains(&baud_rate) {
        errors.push(format!(
            "[link] baud_rate {} is not a supported rate",
            baud_rate
        ));
    }
    for (key, value) in [
        ("header_timeout_ms", header_timeout_ms),
        ("payload_timeout_ms", payload_timeout_ms),
    ] {
        if value < 0 || value > u32::MAX as i64 {
            errors.push(format!("[link] {} must fit in 0..=4294967295", key));
        } else if value == 0 && link.contains_key(key) {
            errors.push(format!("[link] {} must be greater than 0", key));
        }
    }
    if header_timeout_ms > payload_timeout_ms {
        errors.push("[link] header_timeout_ms must not exceed payload_timeout_ms".to_string());
    }

    let wide_longs = match link.get("long_width") {
        None => false,
        Some(toml::Value::String(s)) if s == "compat16" => false,
        Some(toml::Value::String(s)) if s == "wide32" => true,
        Some(_) => {
            errors.push("[link] long_width must be 'compat16' or 'wide32'".to_string());
            false
        }
    };

    if !errors.is_empty() {
        fail(&errors);
    }

    LinkSettings {
        baud_rate,
        header_timeout_ms,
        payload_timeout_ms,
        wide_longs,
    }
}

/// Abort the build with a boxed error listing
fn fail(errors: &[String]) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: Invalid link.toml                                        ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        errors
            .iter()
            .map(|e| {
                let line = if e.len() > 62 {
                    format!("{}...", &e[..59])
                } else {
                    e.clone()
                };
                format!("║  • {:<62} ║", line)
            })
            .collect::<Vec<_>>()
            .join("\n")
    );
}
