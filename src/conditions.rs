//! WMO weather interpretation codes as reported by the Open-Meteo archive.

pub const UNKNOWN_CONDITION: &str = "Unknown";

/// Maps a weather code to its grouped description. Codes outside the
/// documented set map to `"Unknown"`.
pub fn describe(code: i32) -> &'static str {
    match code {
        0 => "Clear sky",
        1 | 2 | 3 => "Mainly clear, partly cloudy, and overcast",
        45 | 48 => "Fog and depositing rime fog",
        51 | 53 | 55 => "Drizzle: Light, moderate, and dense intensity",
        56 | 57 => "Freezing Drizzle: Light and dense intensity",
        61 | 63 | 65 => "Rain: Slight, moderate and heavy intensity",
        66 | 67 => "Freezing Rain: Light and heavy intensity",
        71 | 73 | 75 => "Snow fall: Slight, moderate, and heavy intensity",
        77 => "Snow grains",
        80 | 81 | 82 => "Rain showers: Slight, moderate, and violent",
        85 | 86 => "Snow showers slight and heavy",
        95 => "Thunderstorm: Slight or moderate",
        96 | 99 => "Thunderstorm with hail",
        _ => UNKNOWN_CONDITION,
    }
}
