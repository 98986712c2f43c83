//! Platform inference from identifier prefixes.

use devicemodel_core::Platform;

/// Literal prefixes, checked in order. The first match wins.
pub const PREFIXES: [(&str, Platform); 8] = [
    ("iPhone", Platform::Ios),
    ("iPod", Platform::Ios),
    ("iPad", Platform::IpadOs),
    ("Watch", Platform::WatchOs),
    ("AppleTV", Platform::TvOs),
    ("RealityDevice", Platform::VisionOs),
    ("iMac", Platform::MacOs),
    ("Mac", Platform::MacOs),
];

/// Infer the platform of a trimmed identifier. Matching is case-sensitive.
#[must_use]
pub fn classify(identifier: &str) -> Option<Platform> {
    PREFIXES
        .iter()
        .find(|(prefix, _)| identifier.starts_with(prefix))
        .map(|(_, platform)| *platform)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_each_prefix() {
        let cases = [
            ("iPhone18,1", Platform::Ios),
            ("iPod9,1", Platform::Ios),
            ("iPad16,3", Platform::IpadOs),
            ("Watch7,1", Platform::WatchOs),
            ("AppleTV14,1", Platform::TvOs),
            ("RealityDevice14,1", Platform::VisionOs),
            ("iMac11,2", Platform::MacOs),
            ("MacBookPro18,3", Platform::MacOs),
            ("Macmini9,1", Platform::MacOs),
        ];

        for (identifier, expected) in cases {
            assert_eq!(classify(identifier), Some(expected), "{identifier}");
        }
    }

    #[test]
    fn test_classify_no_match() {
        assert_eq!(classify("Unknown,0"), None);
        assert_eq!(classify("SM-S9280"), None);
        assert_eq!(classify("AudioAccessory5,1"), None);
        assert_eq!(classify(""), None);
    }

    #[test]
    fn test_classify_is_case_sensitive() {
        assert_eq!(classify("iphone18,1"), None);
        assert_eq!(classify("IPAD16,3"), None);
        assert_eq!(classify("mac14,2"), None);
    }

    #[test]
    fn test_prefixes_are_disjoint() {
        for (i, (a, _)) in PREFIXES.iter().enumerate() {
            for (b, _) in &PREFIXES[i + 1..] {
                assert!(!a.starts_with(b) && !b.starts_with(a), "{a}/{b}");
            }
        }
    }
}
