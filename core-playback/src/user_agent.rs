//! HTTP user agent for stream requests.

use bridge_traits::device::DeviceInfo;

/// Format a user agent in the style of the platform's stock HTTP stack:
/// `Runtime/1.0 (Linux; U; Os 9; Model Build/ID)`.
///
/// The OS release falls back to `1.0` when empty. The model is only
/// reported for release builds.
pub fn default_user_agent(info: &DeviceInfo) -> String {
    let mut agent = String::with_capacity(64);
    agent.push_str(&info.runtime_name);
    agent.push('/');
    agent.push_str(&info.runtime_version);
    agent.push_str(" (Linux; U; ");
    agent.push_str(&info.os_name);
    agent.push(' ');

    if info.os_release.is_empty() {
        agent.push_str("1.0");
    } else {
        agent.push_str(&info.os_release);
    }

    if info.is_release_build() && !info.model.is_empty() {
        agent.push_str("; ");
        agent.push_str(&info.model);
    }

    if !info.build_id.is_empty() {
        agent.push_str(" Build/");
        agent.push_str(&info.build_id);
    }

    agent.push(')');
    agent
}

/// Agent used when the host provides neither an override nor device info.
pub fn generic_user_agent() -> String {
    format!(
        "AudioStreamer/{} (Linux; U; {} 1.0)",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS
    )
}
