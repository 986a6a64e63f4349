//! Air Quality Thresholds and Penalties
//!
//! Every breakpoint used by the scoring engine, the trend analyzer and the
//! advice aggregator. Values follow public exposure guidance; units are in
//! the constant names.

// ===== PM2.5 (µg/m³) =====

/// Upper bound of the "Good" PM2.5 band.
///
/// Source: US EPA AQI breakpoint (12 µg/m³, 24 h)
pub const PM25_GOOD_UGM3: f32 = 12.0;

/// PM2.5 level treated as elevated (warning, heavy penalty, trend peak).
///
/// Source: US EPA AQI breakpoint (35 µg/m³, unhealthy for sensitive groups)
pub const PM25_ELEVATED_UGM3: f32 = 35.0;

/// Upper bound of the "Poor" PM2.5 band.
pub const PM25_POOR_UGM3: f32 = 55.0;

/// Fraction of the window above [`PM25_ELEVATED_UGM3`] that counts as sustained.
pub const PM25_SUSTAINED_RATIO: f32 = 0.75;

/// Peaks in the window that count as repeated spikes in the trend view.
pub const PM25_SPIKE_COUNT: usize = 5;

/// Points lost above [`PM25_GOOD_UGM3`].
pub const PM25_MODERATE_PENALTY: i32 = -10;
/// Points lost above [`PM25_ELEVATED_UGM3`].
pub const PM25_SEVERE_PENALTY: i32 = -25;

// ===== CO₂ (ppm) =====

/// Upper bound of the "Good" CO₂ band; moderate penalty above.
///
/// Source: ASHRAE 62.1 guidance (~700 ppm above outdoor)
pub const CO2_GOOD_PPM: f32 = 800.0;

/// CO₂ level treated as elevated.
pub const CO2_ELEVATED_PPM: f32 = 1200.0;

/// Fraction of the window above [`CO2_ELEVATED_PPM`] that counts as sustained.
pub const CO2_SUSTAINED_RATIO: f32 = 0.70;

/// Points lost above [`CO2_GOOD_PPM`].
pub const CO2_MODERATE_PENALTY: i32 = -10;
/// Points lost above [`CO2_ELEVATED_PPM`].
pub const CO2_SEVERE_PENALTY: i32 = -20;

// ===== VOC PROXY (0–3 index) =====

/// VOC proxy level above which a moderate penalty applies.
pub const VOC_MODERATE_INDEX: f32 = 1.0;

/// VOC proxy level treated as elevated.
pub const VOC_ELEVATED_INDEX: f32 = 2.0;

/// Fraction of the window above [`VOC_ELEVATED_INDEX`] that counts as sustained.
pub const VOC_SUSTAINED_RATIO: f32 = 0.60;

/// Points lost above [`VOC_MODERATE_INDEX`].
pub const VOC_MODERATE_PENALTY: i32 = -10;
/// Points lost above [`VOC_ELEVATED_INDEX`].
pub const VOC_SEVERE_PENALTY: i32 = -20;

// ===== CARBON MONOXIDE (ppm) =====

/// CO level treated as elevated.
///
/// Source: US EPA NAAQS (9 ppm, 8 h average)
pub const CO_ELEVATED_PPM: f32 = 9.0;

/// CO level treated as immediately dangerous.
///
/// Source: US EPA NAAQS (35 ppm, 1 h average)
pub const CO_DANGER_PPM: f32 = 35.0;

/// Fraction of the window above [`CO_ELEVATED_PPM`] that counts as repeated detection.
pub const CO_SUSTAINED_RATIO: f32 = 0.30;

/// Points lost at or above [`CO_ELEVATED_PPM`].
pub const CO_ELEVATED_PENALTY: i32 = -20;
/// Points lost at or above the danger level.
pub const CO_DANGER_PENALTY: i32 = -60;

// ===== HUMIDITY (%RH) =====

/// Lower bound of the optimal humidity band.
pub const HUMIDITY_LOW_PCT: f32 = 30.0;

/// Upper bound of the optimal humidity band (severity display).
pub const HUMIDITY_OPTIMAL_MAX_PCT: f32 = 50.0;

/// Rolling mean above which humidity is reported as persistently high.
pub const HUMIDITY_HIGH_PCT: f32 = 55.0;

// ===== TEMPERATURE (°F) =====

/// Lower bound of the comfort band.
///
/// Source: ASHRAE 55 comfort envelope (approx. 20–25.5 °C)
pub const TEMP_COMFORT_MIN_F: f32 = 68.0;

/// Upper bound of the comfort band.
pub const TEMP_COMFORT_MAX_F: f32 = 78.0;

/// Max − min over the window above which temperature is unstable.
pub const TEMP_MAX_SWING_F: f32 = 6.0;

// ===== SCORE =====

/// Score before any penalties.
pub const SCORE_MAX: i32 = 100;

/// Lowest displayable score.
pub const SCORE_MIN: i32 = 0;

/// Score ceiling while the alert level is CRITICAL.
pub const CRITICAL_SCORE_CAP: i32 = 30;

/// Penalty at or below which the priority hint is Major (red).
pub const PENALTY_MAJOR: i32 = -20;

/// Penalty at or below which the priority hint is Moderate (orange).
pub const PENALTY_MODERATE: i32 = -10;

// ===== PATTERN ADVICE =====

/// Peaks in the window that trigger a "repeated spikes" advisory.
pub const ADVICE_SPIKE_COUNT: usize = 3;
