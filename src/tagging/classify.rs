//! Cellular capability classification

use crate::meraki::sm::Device;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Cellular,
    WifiOnly,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::Cellular => write!(f, "cellular-capable"),
            Classification::WifiOnly => write!(f, "Wi-Fi only"),
        }
    }
}

/// A device is cellular-capable if any cellular identifier is present.
/// Blank values count as absent.
pub fn classify(device: &Device) -> Classification {
    let identifiers = [
        &device.imei,
        &device.iccid,
        &device.sim_carrier_network,
        &device.phone_number,
    ];

    let has_cellular = identifiers
        .iter()
        .any(|field| field.as_deref().is_some_and(|v| !v.trim().is_empty()));

    if has_cellular {
        Classification::Cellular
    } else {
        Classification::WifiOnly
    }
}
