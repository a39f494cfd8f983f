// ABOUTME: Canonical option lists presented by the form UI - timezones,
// durations, language suggestions, interpreter preferences

/// `(wire value, display label)` pairs for the timezone selector.
pub const TIMEZONE_OPTIONS: &[(&str, &str)] = &[
    ("America/New_York", "Eastern (ET)"),
    ("America/Chicago", "Central (CT)"),
    ("America/Denver", "Mountain (MT)"),
    ("America/Los_Angeles", "Pacific (PT)"),
    ("America/Phoenix", "Arizona (MST)"),
    ("America/Anchorage", "Alaska (AKT)"),
    ("Pacific/Honolulu", "Hawaii (HST)"),
    ("UTC", "UTC"),
];

/// Appointment durations in hours.
pub const DURATION_OPTIONS: &[(&str, &str)] = &[
    ("0.5", "30 minutes"),
    ("1", "1 hour"),
    ("1.5", "1.5 hours"),
    ("2", "2 hours"),
    ("3", "3 hours"),
    ("4", "4 hours"),
    ("8", "Full day (8 hours)"),
];

/// Most-requested languages, offered as suggestions. Free text is accepted.
pub const LANGUAGE_SUGGESTIONS: &[&str] = &[
    "Spanish",
    "American Sign Language (ASL)",
    "Mandarin",
    "Cantonese",
    "Arabic",
    "Vietnamese",
    "French",
    "Russian",
    "Tagalog",
    "German",
    "Korean",
    "Hindi",
];

/// Interpreter preference choices.
pub const PREFERENCE_OPTIONS: &[(&str, &str)] = &[
    ("first-available", "First available interpreter"),
    ("specific-provider", "Specific interpreter requested"),
    ("gender-preference", "Gender preference noted"),
];
