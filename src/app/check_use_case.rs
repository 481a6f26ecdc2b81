use crate::error::Result;
use crate::support::{check_support, load_device_list, SupportVerdict};
use std::path::Path;

/// Check one detected device against a device list file and describe the verdict.
pub fn check_device(list: &Path, vendor: &str, model: &str) -> Result<String> {
    let devices = load_device_list(list)?;
    let message = match check_support(vendor, model, &devices) {
        SupportVerdict::Undetected => {
            "unknown device: vendor or model could not be detected".to_string()
        }
        SupportVerdict::Listed(device) => match device.status {
            Some(status) => format!(
                "supported by list: {} {} (status: {})",
                device.manufacturer,
                device.model,
                status.as_str()
            ),
            None => format!("supported by list: {} {}", device.manufacturer, device.model),
        },
        SupportVerdict::NotListed => format!("not listed in {}", list.display()),
    };
    Ok(message)
}
