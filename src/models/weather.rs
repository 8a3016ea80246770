//! Weather report model and display methods

use serde::{Deserialize, Serialize};

/// Current conditions for a city
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WeatherReport {
    /// City name as known to the weather service
    pub city: String,
    /// ISO 3166-1 alpha-2 country code
    pub country: String,
    /// Condition text, e.g. "light rain"
    pub description: String,
    /// Temperature in Celsius
    pub temperature: f64,
    /// Relative humidity percentage
    pub humidity: u8,
    /// Wind speed in m/s
    pub wind_speed: f64,
}

impl WeatherReport {
    /// Condition text with every word capitalized
    #[must_use]
    pub fn format_description(&self) -> String {
        title_case(&self.description)
    }

    /// Multi-line reply text
    #[must_use]
    pub fn format_reply(&self) -> String {
        format!(
            "🌤️ Weather in {}, {}:\n• Condition: {}\n• Temperature: {}°C\n• Humidity: {}%\n• Wind: {} m/s",
            self.city,
            self.country,
            self.format_description(),
            self.temperature,
            self.humidity,
            self.wind_speed
        )
    }
}

fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for c in text.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("light rain", "Light Rain")]
    #[case("overcast clouds", "Overcast Clouds")]
    #[case("CLEAR SKY", "Clear Sky")]
    #[case("thunderstorm with light drizzle", "Thunderstorm With Light Drizzle")]
    #[case("", "")]
    fn test_title_case(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(title_case(input), expected);
    }

    #[test]
    fn test_format_reply() {
        let report = WeatherReport {
            city: "Nairobi".to_string(),
            country: "KE".to_string(),
            description: "scattered clouds".to_string(),
            temperature: 21.5,
            humidity: 64,
            wind_speed: 3.6,
        };
        assert_eq!(
            report.format_reply(),
            "🌤️ Weather in Nairobi, KE:\n• Condition: Scattered Clouds\n• Temperature: 21.5°C\n• Humidity: 64%\n• Wind: 3.6 m/s"
        );
    }
}
