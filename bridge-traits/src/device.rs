//! Device identity used to build HTTP user agents.

use crate::platform::PlatformSendSync;
use serde::{Deserialize, Serialize};

/// Codename reported by release (non-preview) OS builds.
pub const RELEASE_CODENAME: &str = "REL";

/// Static description of the host runtime and device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    /// Name of the managed runtime hosting the app (e.g. `Dalvik`).
    pub runtime_name: String,
    /// Version of that runtime (e.g. `2.1.0`).
    pub runtime_version: String,
    /// Operating system name (e.g. `Android`).
    pub os_name: String,
    /// OS release string; may be empty.
    pub os_release: String,
    /// OS build codename; [`RELEASE_CODENAME`] for release builds.
    pub os_codename: String,
    /// Device model; may be empty.
    pub model: String,
    /// OS build identifier; may be empty.
    pub build_id: String,
}

impl DeviceInfo {
    /// Returns `true` if the OS build is a release build.
    pub fn is_release_build(&self) -> bool {
        self.os_codename == RELEASE_CODENAME
    }
}

/// Source of [`DeviceInfo`] for the running host.
pub trait DeviceInfoProvider: PlatformSendSync {
    fn device_info(&self) -> DeviceInfo;
}
