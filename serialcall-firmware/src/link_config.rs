//! Link settings compiled in from link.toml

use serialcall_core::EngineConfig;
use serialcall_protocol::LongWidth;

include!(concat!(env!("OUT_DIR"), "/link_config.rs"));

/// Engine configuration for this build
pub fn engine_config() -> EngineConfig {
    EngineConfig {
        baud_rate: BAUD_RATE,
        header_timeout_ms: HEADER_TIMEOUT_MS,
        payload_timeout_ms: PAYLOAD_TIMEOUT_MS,
        long_width: if WIDE_LONGS {
            LongWidth::Wide32
        } else {
            LongWidth::Compat16
        },
    }
}
