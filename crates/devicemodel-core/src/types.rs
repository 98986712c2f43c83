//! Shared types used across devicemodel.
//!
//! A [`Platform`] is the tag callers pass in and get back. A [`DeviceFamily`]
//! is one backing reference document. The two differ by exactly one alias:
//! `ipados` reads the `ios` document because upstream publishes no separate
//! tablet list.

use crate::error::DeviceModelError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Recognized platform tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// iPhone and iPod touch
    Ios,
    /// iPad
    #[serde(rename = "ipados")]
    IpadOs,
    /// Mac desktops and laptops
    #[serde(rename = "macos")]
    MacOs,
    /// Apple TV
    #[serde(rename = "tvos")]
    TvOs,
    /// Apple Watch
    #[serde(rename = "watchos")]
    WatchOs,
    /// Apple Vision headsets
    #[serde(rename = "visionos")]
    VisionOs,
}

impl Platform {
    /// All recognized platforms.
    pub const ALL: [Platform; 6] = [
        Self::Ios,
        Self::IpadOs,
        Self::MacOs,
        Self::TvOs,
        Self::WatchOs,
        Self::VisionOs,
    ];

    /// The lowercase tag for this platform.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ios => "ios",
            Self::IpadOs => "ipados",
            Self::MacOs => "macos",
            Self::TvOs => "tvos",
            Self::WatchOs => "watchos",
            Self::VisionOs => "visionos",
        }
    }

    /// The reference document backing this platform.
    #[must_use]
    pub fn family(&self) -> DeviceFamily {
        match self {
            Self::Ios | Self::IpadOs => DeviceFamily::Ios,
            Self::MacOs => DeviceFamily::Mac,
            Self::TvOs => DeviceFamily::Tvos,
            Self::WatchOs => DeviceFamily::Watchos,
            Self::VisionOs => DeviceFamily::Visionos,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = DeviceModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match PlatformSelector::parse(s) {
            PlatformSelector::Known(platform) => Ok(platform),
            PlatformSelector::Auto | PlatformSelector::Unrecognized => Err(
                DeviceModelError::Validation(format!("unknown platform tag '{}'", s.trim())),
            ),
        }
    }
}

/// Outcome of normalizing a caller-supplied platform token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformSelector {
    /// Empty after trimming: no explicit platform, auto-detect.
    Auto,
    /// One of the recognized tags.
    Known(Platform),
    /// Non-empty but not a recognized tag.
    Unrecognized,
}

impl PlatformSelector {
    /// Normalize a platform token. Case and surrounding whitespace are ignored.
    #[must_use]
    pub fn parse(token: &str) -> Self {
        let token = token.trim().to_lowercase();
        if token.is_empty() {
            return Self::Auto;
        }

        Platform::ALL
            .into_iter()
            .find(|platform| platform.as_str() == token)
            .map_or(Self::Unrecognized, Self::Known)
    }
}

/// One backing reference document published upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceFamily {
    /// iPhone, iPod touch and iPad identifiers
    Ios,
    /// Mac identifiers
    #[serde(rename = "macos")]
    Mac,
    /// Apple TV identifiers
    Tvos,
    /// Apple Watch identifiers
    Watchos,
    /// Apple Vision identifiers
    Visionos,
}

impl DeviceFamily {
    /// All published families.
    pub const ALL: [DeviceFamily; 5] = [
        Self::Ios,
        Self::Mac,
        Self::Tvos,
        Self::Watchos,
        Self::Visionos,
    ];

    /// Key used for this family in upstream metadata counts.
    #[must_use]
    pub fn key(&self) -> &'static str {
        match self {
            Self::Ios => "ios",
            Self::Mac => "macos",
            Self::Tvos => "tvos",
            Self::Watchos => "watchos",
            Self::Visionos => "visionos",
        }
    }

    /// File name of the reference document.
    #[must_use]
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Ios => "ios-device-identifiers.json",
            Self::Mac => "mac-device-identifiers.json",
            Self::Tvos => "tvos-device-identifiers.json",
            Self::Watchos => "watchos-device-identifiers.json",
            Self::Visionos => "visionos-device-identifiers.json",
        }
    }

}

impl fmt::Display for DeviceFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Detailed lookup result.
///
/// Platform and name are either both present or both absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawLookupDetail")]
pub struct LookupDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    platform: Option<Platform>,
    #[serde(skip_serializing_if = "String::is_empty")]
    name: String,
}

#[derive(Deserialize)]
struct RawLookupDetail {
    #[serde(default)]
    platform: Option<Platform>,
    #[serde(default)]
    name: String,
}

impl TryFrom<RawLookupDetail> for LookupDetail {
    type Error = DeviceModelError;

    fn try_from(raw: RawLookupDetail) -> Result<Self, Self::Error> {
        match (raw.platform, raw.name.is_empty()) {
            (Some(platform), false) => Ok(Self::found(platform, raw.name)),
            (None, true) => Ok(Self::default()),
            (Some(platform), true) => Err(DeviceModelError::Validation(format!(
                "platform '{platform}' without a name"
            ))),
            (None, false) => Err(DeviceModelError::Validation(format!(
                "name '{}' without a platform",
                raw.name
            ))),
        }
    }
}

impl LookupDetail {
    /// A match. An empty name yields the no-match result.
    #[must_use]
    pub fn found(platform: Platform, name: impl Into<String>) -> Self {
        let name = name.into();
        if name.is_empty() {
            return Self::default();
        }
        Self {
            platform: Some(platform),
            name,
        }
    }

    /// The platform that produced the match.
    #[must_use]
    pub fn platform(&self) -> Option<Platform> {
        self.platform
    }

    /// The platform tag, or `""` when nothing matched.
    #[must_use]
    pub fn platform_tag(&self) -> &'static str {
        self.platform.map_or("", |platform| platform.as_str())
    }

    /// The display name, or `""` when nothing matched.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this result is a match.
    #[must_use]
    pub fn is_match(&self) -> bool {
        self.platform.is_some()
    }

    /// Consume the result, keeping only the name.
    #[must_use]
    pub fn into_name(self) -> String {
        self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_normalizes_case_and_whitespace() {
        assert_eq!(
            PlatformSelector::parse(" WatchOS\t"),
            PlatformSelector::Known(Platform::WatchOs)
        );
        assert_eq!(
            PlatformSelector::parse("MACOS"),
            PlatformSelector::Known(Platform::MacOs)
        );
    }

    #[test]
    fn test_selector_empty_is_auto() {
        assert_eq!(PlatformSelector::parse(""), PlatformSelector::Auto);
        assert_eq!(PlatformSelector::parse("   "), PlatformSelector::Auto);
    }

    #[test]
    fn test_selector_unrecognized() {
        assert_eq!(
            PlatformSelector::parse("android"),
            PlatformSelector::Unrecognized
        );
        assert_eq!(PlatformSelector::parse("i os"), PlatformSelector::Unrecognized);
    }

    #[test]
    fn test_platform_from_str() {
        assert_eq!("tvOS".parse::<Platform>().unwrap(), Platform::TvOs);
        assert!("".parse::<Platform>().is_err());
        assert!("android".parse::<Platform>().is_err());
    }

    #[test]
    fn test_tablet_aliases_phone_family() {
        assert_eq!(Platform::IpadOs.family(), DeviceFamily::Ios);
        assert_eq!(Platform::Ios.family(), DeviceFamily::Ios);
    }

    #[test]
    fn test_every_family_has_a_platform() {
        for family in DeviceFamily::ALL {
            assert!(Platform::ALL.into_iter().any(|platform| platform.family() == family));
        }
    }

    #[test]
    fn test_platform_serde_tags() {
        for platform in Platform::ALL {
            let json = serde_json::to_string(&platform).unwrap();
            assert_eq!(json, format!("\"{}\"", platform.as_str()));
        }
    }

    #[test]
    fn test_lookup_detail_jointly_empty() {
        let detail = LookupDetail::found(Platform::Ios, "");
        assert!(!detail.is_match());
        assert_eq!(detail.platform_tag(), "");
        assert_eq!(detail.name(), "");
        assert_eq!(detail, LookupDetail::default());
    }

    #[test]
    fn test_lookup_detail_serialization() {
        let detail = LookupDetail::found(Platform::IpadOs, "iPad Pro 11-inch (M4)");
        let json = serde_json::to_string(&detail).unwrap();
        assert_eq!(json, r#"{"platform":"ipados","name":"iPad Pro 11-inch (M4)"}"#);

        let empty = serde_json::to_string(&LookupDetail::default()).unwrap();
        assert_eq!(empty, "{}");
    }

    #[test]
    fn test_lookup_detail_deserialization_keeps_fields_together() {
        let detail: LookupDetail =
            serde_json::from_str(r#"{"platform":"watchos","name":"Apple Watch Ultra 2"}"#)
                .expect("parse detail");
        assert_eq!(detail, LookupDetail::found(Platform::WatchOs, "Apple Watch Ultra 2"));

        let empty: LookupDetail = serde_json::from_str("{}").expect("parse empty detail");
        assert!(!empty.is_match());

        assert!(serde_json::from_str::<LookupDetail>(r#"{"platform":"ios"}"#).is_err());
        assert!(serde_json::from_str::<LookupDetail>(r#"{"name":"iPhone"}"#).is_err());
        assert!(
            serde_json::from_str::<LookupDetail>(r#"{"platform":"ios","name":""}"#).is_err()
        );
    }
}
