//! Device identity for desktop hosts

use bridge_traits::device::{DeviceInfo, DeviceInfoProvider, RELEASE_CODENAME};

/// Device information derived from the build target.
///
/// The runtime is reported as this crate's name and version, the OS from
/// `std::env::consts`, and on Linux the kernel release from
/// `/proc/sys/kernel/osrelease`.
#[derive(Debug, Clone)]
pub struct DesktopDeviceInfo {
    info: DeviceInfo,
}

impl DesktopDeviceInfo {
    pub fn new() -> Self {
        Self {
            info: DeviceInfo {
                runtime_name: "AudioStreamer".to_string(),
                runtime_version: env!("CARGO_PKG_VERSION").to_string(),
                os_name: std::env::consts::OS.to_string(),
                os_release: os_release(),
                os_codename: RELEASE_CODENAME.to_string(),
                model: String::new(),
                build_id: String::new(),
            },
        }
    }

    /// Report a device model, e.g. the host application's product name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.info.model = model.into();
        self
    }

    pub fn with_build_id(mut self, build_id: impl Into<String>) -> Self {
        self.info.build_id = build_id.into();
        self
    }
}

impl Default for DesktopDeviceInfo {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceInfoProvider for DesktopDeviceInfo {
    fn device_info(&self) -> DeviceInfo {
        self.info.clone()
    }
}

#[cfg(target_os = "linux")]
fn os_release() -> String {
    std::fs::read_to_string("/proc/sys/kernel/osrelease")
        .map(|release| release.trim().to_string())
        .unwrap_or_default()
}

#[cfg(not(target_os = "linux"))]
fn os_release() -> String {
    String::new()
}
