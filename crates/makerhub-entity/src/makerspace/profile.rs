//! Makerspace public profile.

use serde::{Deserialize, Serialize};

/// Weekday keys required in [`WeeklyTimings`], in display order.
pub const WEEKDAYS: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

/// The full profile of an active makerspace.
///
/// Field names serialize in camelCase to match the public JSON contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MakerspaceProfile {
    /// Kind of facility (e.g. "university", "community").
    #[serde(rename = "type")]
    pub kind: String,
    /// Usage tags, in submission order.
    pub usage: Vec<String>,
    /// Display name.
    pub name: String,
    /// Public contact email. Distinct from the record's claim email.
    pub email: String,
    /// Contact phone number.
    pub number: String,
    /// Person in charge.
    pub in_charge_name: String,
    /// Opening hours for every day of the week.
    pub timings: WeeklyTimings,
    pub city: String,
    pub state: String,
    /// Street address.
    pub address: String,
    /// Postal code.
    pub zipcode: String,
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_map_link: Option<String>,
    /// Gallery image URLs.
    #[serde(default)]
    pub image_links: Vec<String>,
    /// Logo image URLs.
    #[serde(default)]
    pub logo_image_links: Vec<String>,
    /// Directions, one step per entry.
    #[serde(default)]
    pub how_to_reach: Vec<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub mentors: Vec<Mentor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_information: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    /// Whether the makerspace is shown in public listings.
    #[serde(default)]
    pub listed: bool,
}

/// Opening hours per weekday, as free-form strings (e.g. "9:00 AM - 6:00 PM").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyTimings {
    pub monday: String,
    pub tuesday: String,
    pub wednesday: String,
    pub thursday: String,
    pub friday: String,
    pub saturday: String,
    pub sunday: String,
}

impl WeeklyTimings {
    /// Hours for a weekday key from [`WEEKDAYS`].
    pub fn get(&self, day: &str) -> Option<&str> {
        let hours = match day {
            "monday" => &self.monday,
            "tuesday" => &self.tuesday,
            "wednesday" => &self.wednesday,
            "thursday" => &self.thursday,
            "friday" => &self.friday,
            "saturday" => &self.saturday,
            "sunday" => &self.sunday,
            _ => return None,
        };
        Some(hours.as_str())
    }
}

/// A mentor listed on the makerspace page. All fields are required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mentor {
    pub name: String,
    pub designation: String,
    /// Profile link.
    pub linkedin: String,
    /// Photo URL.
    pub image: String,
}
