//! Keyword tables driving text classification
//!
//! The tables are ordered association lists: scan order is part of the
//! contract (earlier category/placement rules shadow later ones), so
//! they are plain `Vec`s rather than maps.

/// Keyword tables consumed by [`super::Classifier`].
///
/// `Default` supplies the shipped tables; tests and callers can build
/// their own to extend classification without touching control flow.
#[derive(Debug, Clone)]
pub struct KeywordTables {
    /// Presence of any of these marks text as wearable-AI-relevant
    pub relevance: Vec<&'static str>,
    /// Ordered (category, keywords) rules; first hit wins
    pub categories: Vec<(&'static str, Vec<&'static str>)>,
    /// Category when no rule matched
    pub category_fallback: &'static str,
    /// Ordered (placement, keywords) rules; first hit wins
    pub placements: Vec<(&'static str, Vec<&'static str>)>,
    /// (modality, keywords) groups; every matching group accumulates
    pub sensory: Vec<(&'static str, Vec<&'static str>)>,
    /// Ordered feature keywords; each present keyword yields one tag
    pub features: Vec<&'static str>,
    /// Phrases marking an always-on device
    pub always_on: Vec<&'static str>,
}

impl Default for KeywordTables {
    fn default() -> Self {
        Self {
            relevance: vec![
                "ai",
                "artificial intelligence",
                "machine learning",
                "neural",
                "smart glasses",
                "smartwatch",
                "wearable",
                "wearable tech",
                "wearable ai",
                "smart ring",
                "health monitor",
                "fitness tracker",
                "always-on",
                "always listening",
                "voice assistant",
                "augmented reality",
                "ar glasses",
                "smart earbuds",
                "biometric",
                "sensor",
                "neural interface",
                "brain-computer interface",
                "bci",
                "eeg",
                "emg",
                "smart clothing",
                "smart jewelry",
            ],
            categories: vec![
                ("Smart Glasses", vec!["glasses", "ar", "vr"]),
                ("Smartwatch", vec!["watch"]),
                ("Smart Ring", vec!["ring"]),
                ("Smart Earwear", vec!["earbuds", "headphones"]),
                ("AI Assistant", vec!["pin", "clip", "badge"]),
                ("Health Monitor", vec!["health", "fitness", "medical"]),
            ],
            category_fallback: "Wearable AI",
            placements: vec![
                (
                    "Head-Mounted",
                    vec!["glasses", "headset", "earbuds", "headphones", "ar", "vr"],
                ),
                ("Wrist-Worn", vec!["watch", "wristband", "bracelet"]),
                ("Neck/Torso", vec!["necklace", "pendant", "pin", "clip", "badge"]),
                ("Finger-Worn", vec!["ring", "finger"]),
                ("Face-Mounted", vec!["mask", "face"]),
                ("Foot/Ankle", vec!["shoe", "insole", "sock", "ankle"]),
            ],
            sensory: vec![
                (
                    "Visual",
                    vec!["camera", "vision", "image", "photo", "video", "sight", "eye tracking"],
                ),
                (
                    "Audio",
                    vec!["microphone", "voice", "sound", "hearing", "listen", "speech"],
                ),
                (
                    "Touch/Haptic",
                    vec!["touch", "haptic", "vibration", "pressure", "accelerometer", "gyroscope"],
                ),
                (
                    "Biometric",
                    vec!["heart rate", "pulse", "temperature", "blood", "sweat", "eeg", "emg", "ecg"],
                ),
                ("Chemical", vec!["glucose", "oxygen", "ph", "hormone", "chemical"]),
            ],
            features: vec![
                "voice assistant",
                "health monitoring",
                "fitness tracking",
                "sleep tracking",
                "heart rate",
                "camera",
                "microphone",
                "gps",
                "bluetooth",
                "wifi",
                "waterproof",
                "battery life",
                "always-on",
                "touch control",
                "gesture control",
                "notification",
                "app",
                "ai assistant",
                "machine learning",
                "neural",
                "augmented reality",
                "virtual reality",
                "mixed reality",
            ],
            always_on: vec![
                "always on",
                "always-on",
                "continuous monitoring",
                "24/7",
                "all day",
            ],
        }
    }
}
