use crate::error::Result;
use crate::types::DeviceRecord;
use std::path::Path;

/// Answer to "is this device on the list?"
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SupportVerdict<'a> {
    /// Vendor or model could not be detected
    Undetected,
    Listed(&'a DeviceRecord),
    NotListed,
}

/// Look up a detected vendor/model in a device list.
///
/// Matching is loose: the detected vendor must contain the listed manufacturer,
/// and either model string may contain the other, all compared lowercased.
pub fn check_support<'a>(
    vendor: &str,
    model: &str,
    devices: &'a [DeviceRecord],
) -> SupportVerdict<'a> {
    let vendor = vendor.trim().to_lowercase();
    let model = model.trim().to_lowercase();
    if vendor.is_empty() || model.is_empty() {
        return SupportVerdict::Undetected;
    }

    devices
        .iter()
        .find(|device| {
            let listed_vendor = device.manufacturer.to_lowercase();
            let listed_model = device.model.to_lowercase();
            vendor.contains(&listed_vendor)
                && (model.contains(&listed_model) || listed_model.contains(&model))
        })
        .map_or(SupportVerdict::NotListed, SupportVerdict::Listed)
}

/// Load a device list previously written by the pipeline.
pub fn load_device_list(path: &Path) -> Result<Vec<DeviceRecord>> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
