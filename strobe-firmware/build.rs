//! Build script for strobe-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates scope.toml at compile time
//! - Generates the power-on defaults from scope.toml

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use strobe_core::config::{
    FIFO_DEPTH, MAX_DELAY, MAX_LEVEL_MV, MAX_SAMPLE_RATE, MIN_DELAY, MIN_LEVEL_MV, MIN_SAMPLE_RATE,
};

fn main() {
    setup_linker();
    let defaults = validate_config();
    write_defaults(&defaults);
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

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validated settings from scope.toml
struct ScopeDefaults {
    sample_rate: i64,
    pre_trigger: i64,
    overrun_poll_limit: i64,
    level_mv: i64,
    falling: bool,
    delay: i64,
    auto: bool,
    auto_timeout: i64,
    markers: bool,
}

/// Validate scope.toml at compile time
fn validate_config() -> ScopeDefaults {
    println!("cargo:rerun-if-changed=scope.toml");

    let config_path = Path::new("scope.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: scope.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a scope.toml settings file.               ║\n\
            ║  Please create one in the strobe-firmware directory.             ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read scope.toml                                ║\n\
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
                ║  ERROR: Invalid TOML syntax in scope.toml                        ║\n\
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

    let sample_rate = integer(
        &config,
        "acquisition",
        "sample_rate",
        MIN_SAMPLE_RATE as i64,
        MAX_SAMPLE_RATE as i64,
        &mut errors,
    );
    let pre_trigger = integer(
        &config,
        "acquisition",
        "pre_trigger",
        0,
        FIFO_DEPTH as i64,
        &mut errors,
    );
    let overrun_poll_limit = integer(
        &config,
        "acquisition",
        "overrun_poll_limit",
        1,
        u8::MAX as i64,
        &mut errors,
    );
    let level_mv = integer(
        &config,
        "trigger",
        "level_mv",
        MIN_LEVEL_MV as i64,
        MAX_LEVEL_MV as i64,
        &mut errors,
    );
    let delay = integer(
        &config,
        "trigger",
        "delay",
        MIN_DELAY as i64,
        MAX_DELAY as i64,
        &mut errors,
    );
    let auto_timeout = integer(
        &config,
        "trigger",
        "auto_timeout",
        1,
        u32::MAX as i64,
        &mut errors,
    );
    let auto = boolean(&config, "trigger", "auto", &mut errors);
    let markers = boolean(&config, "display", "markers", &mut errors);

    let falling = match config.get("trigger").and_then(|t| t.get("slope")) {
        Some(toml::Value::String(slope)) if slope == "rising" => false,
        Some(toml::Value::String(slope)) if slope == "falling" => true,
        Some(_) => {
            errors.push("[trigger] slope must be 'rising' or 'falling'".to_string());
            false
        }
        None => {
            errors.push("[trigger] missing 'slope'".to_string());
            false
        }
    };

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid settings in scope.toml                           ║\n\
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

    println!("cargo:warning=scope.toml validated successfully");

    ScopeDefaults {
        sample_rate,
        pre_trigger,
        overrun_poll_limit,
        level_mv,
        falling,
        delay,
        auto,
        auto_timeout,
        markers,
    }
}

/// Read `[section] key` as an integer within `min..=max`
fn integer(
    config: &toml::Value,
    section: &str,
    key: &str,
    min: i64,
    max: i64,
    errors: &mut Vec<String>,
) -> i64 {
    match config.get(section).and_then(|s| s.get(key)) {
        Some(toml::Value::Integer(value)) if (min..=max).contains(value) => *value,
        Some(toml::Value::Integer(_)) => {
            errors.push(format!("[{}] {} must be {}-{}", section, key, min, max));
            min
        }
        Some(_) => {
            errors.push(format!("[{}] {} must be an integer", section, key));
            min
        }
        None => {
            errors.push(format!("[{}] missing '{}'", section, key));
            min
        }
    }
}

/// Read `[section] key` as a boolean
fn boolean(config: &toml::Value, section: &str, key: &str, errors: &mut Vec<String>) -> bool {
    match config.get(section).and_then(|s| s.get(key)) {
        Some(toml::Value::Boolean(value)) => *value,
        Some(_) => {
            errors.push(format!("[{}] {} must be true or false", section, key));
            false
        }
        None => {
            errors.push(format!("[{}] missing '{}'", section, key));
            false
        }
    }
}

/// Write the validated settings as Rust constants
fn write_defaults(defaults: &ScopeDefaults) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let mut f = File::create(out_dir.join("scope_defaults.rs")).unwrap();

    let slope = if defaults.falling {
        "Slope::Falling"
    } else {
        "Slope::Rising"
    };

    writeln!(f, "/// Power-on settings from scope.toml").unwrap();
    writeln!(f, "pub const DEFAULT_REQUEST: ConfigRequest = ConfigRequest {{").unwrap();
    writeln!(f, "    sample_rate: {},", defaults.sample_rate).unwrap();
    writeln!(f, "    trigger_level_mv: {},", defaults.level_mv).unwrap();
    writeln!(f, "    trigger_slope: {},", slope).unwrap();
    writeln!(f, "    trigger_delay: {},", defaults.delay).unwrap();
    writeln!(f, "    auto_trigger: {},", defaults.auto).unwrap();
    writeln!(f, "    auto_trigger_timeout: {},", defaults.auto_timeout).unwrap();
    writeln!(f, "}};").unwrap();
    writeln!(f).unwrap();
    writeln!(f, "/// Samples of history kept before the trigger").unwrap();
    writeln!(f, "pub const PRE_TRIGGER: usize = {};", defaults.pre_trigger).unwrap();
    writeln!(f).unwrap();
    writeln!(f, "/// Full, empty polls that count as an overrun").unwrap();
    writeln!(
        f,
        "pub const OVERRUN_POLL_LIMIT: u8 = {};",
        defaults.overrun_poll_limit
    )
    .unwrap();
    writeln!(f).unwrap();
    writeln!(f, "/// Draw trigger markers").unwrap();
    writeln!(f, "pub const DISPLAY_MARKERS: bool = {};", defaults.markers).unwrap();
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
