/// Source name constants shared by the CLI, logs and metrics labels

pub const ARCORE_SOURCE: &str = "arcore";
pub const LIGAR_SOURCE: &str = "ligar";

// Default locations, overridable from config.toml or CLI flags
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";
pub const ARCORE_CSV_URL: &str =
    "https://raw.githubusercontent.com/rolandsmeenk/ARCore-devices/master/arcore_devicelist.csv";
pub const ARCORE_OUTPUT_PATH: &str = "data/arcore_devices.json";
pub const LIGAR_CSV_PATH: &str = "ref/adaptation_2026-02-13_19h51m18.csv";
pub const LIGAR_OUTPUT_PATH: &str = "data/ligar_devices.json";

// ARCore columns
pub const COL_MANUFACTURER: &str = "Manufacturer";
pub const COL_MODEL_NAME: &str = "Model Name";

// LiGAR columns
pub const COL_BRAND: &str = "Brand";
pub const COL_ADAPTED: &str = "Adapted";
pub const COL_DEVICE_MODEL_NAME: &str = "Device model name";
pub const COL_MODEL: &str = "Model";

/// Placeholder the exports use for "no value"
pub const SENTINEL: &str = "-";

/// Get all supported source names
pub fn get_supported_sources() -> Vec<&'static str> {
    vec![ARCORE_SOURCE, LIGAR_SOURCE]
}
