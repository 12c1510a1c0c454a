//! Device quality profile, derived once at startup.

/// What we know about the device at startup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceInfo {
    pub touch_capable: bool,
    pub cores: usize,
    pub screen_width: u32,
    pub screen_height: u32,
    pub device_pixel_ratio: f32,
}

impl Default for DeviceInfo {
    fn default() -> Self {
        Self {
            touch_capable: false,
            cores: 8,
            screen_width: 1920,
            screen_height: 1080,
            device_pixel_ratio: 1.0,
        }
    }
}

impl DeviceInfo {
    /// Low-end heuristics: touch devices, few cores, or a small screen.
    pub fn is_low_end(&self) -> bool {
        self.touch_capable || self.cores <= 4 || self.screen_width.min(self.screen_height) < 720
    }
}

/// Render settings for the whole session. Immutable once detected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualityProfile {
    pub pixel_ratio: f32,
    pub shadows_enabled: bool,
    pub shadow_map_size: u32,
    pub camera_far: f32,
    pub fog_near: f32,
    pub fog_far: f32,
}

impl QualityProfile {
    pub const HIGH: QualityProfile = QualityProfile {
        pixel_ratio: 2.0,
        shadows_enabled: true,
        shadow_map_size: 2048,
        camera_far: 1500.0,
        fog_near: 250.0,
        fog_far: 1300.0,
    };

    pub const LOW: QualityProfile = QualityProfile {
        pixel_ratio: 1.5,
        shadows_enabled: false,
        shadow_map_size: 1024,
        camera_far: 900.0,
        fog_near: 180.0,
        fog_far: 750.0,
    };

    pub fn detect(device: &DeviceInfo) -> Self {
        let base = if device.is_low_end() { Self::LOW } else { Self::HIGH };
        let dpr = if device.device_pixel_ratio > 0.0 {
            device.device_pixel_ratio
        } else {
            1.0
        };
        let profile = Self {
            pixel_ratio: dpr.min(base.pixel_ratio),
            ..base
        };
        log::info!(
            "Quality: {} (pixel ratio {:.2}, shadows {}, far {})",
            if device.is_low_end() { "low" } else { "high" },
            profile.pixel_ratio,
            profile.shadows_enabled,
            profile.camera_far
        );
        profile
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn desktop_gets_shadows() {
        let q = QualityProfile::detect(&DeviceInfo::default());
        assert!(q.shadows_enabled);
        assert_eq!(q.pixel_ratio, 1.0);
        assert_eq!(q.camera_far, QualityProfile::HIGH.camera_far);
    }

    #[test]
    fn phone_gets_low_profile_and_capped_ratio() {
        let phone = DeviceInfo {
            touch_capable: true,
            cores: 8,
            screen_width: 390,
            screen_height: 844,
            device_pixel_ratio: 3.0,
        };
        let q = QualityProfile::detect(&phone);
        assert!(!q.shadows_enabled);
        assert_eq!(q.pixel_ratio, 1.5);
        assert!(q.fog_far <= q.camera_far);
    }

    #[test]
    fn bogus_pixel_ratio_defaults_to_one() {
        let device = DeviceInfo {
            device_pixel_ratio: 0.0,
            ..Default::default()
        };
        assert_eq!(QualityProfile::detect(&device).pixel_ratio, 1.0);
    }
}
