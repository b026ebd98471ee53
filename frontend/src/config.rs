use shared::WheelConfig;
use web_sys::{window, Element};

use crate::wheel::wheel_utils::prefers_reduced_motion;

/// Id of the element the app mounts into.
pub const MOUNT_ID: &str = "fruit-wheel";
/// Attribute on the mount element holding a JSON `WheelConfig`.
pub const CONFIG_ATTRIBUTE: &str = "data-config";

pub fn mount_element() -> Option<Element> {
    window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(MOUNT_ID))
}

/// Reads the host page's configuration. A missing attribute yields the
/// defaults; a malformed one is logged and also yields the defaults.
pub fn load_wheel_config() -> WheelConfig {
    let raw = mount_element().and_then(|el| el.get_attribute(CONFIG_ATTRIBUTE));

    let mut config = match raw.as_deref().map(WheelConfig::from_json) {
        Some(Ok(config)) => config,
        Some(Err(e)) => {
            log::warn!("ignoring malformed {CONFIG_ATTRIBUTE}: {e}");
            WheelConfig::default()
        }
        None => WheelConfig::default(),
    };

    if prefers_reduced_motion() {
        config.spin.reduced_motion = true;
    }
    config
}
