// Demo alerts for POST /api/mock-data

use chrono::{DateTime, Duration, Utc};

use crate::alerts::models::{AlertSeverity, NewAlert};

/// A fixed set of alerts spread across the demo regions, each expiring
/// between one and seven days after `now`.
pub fn demo_alerts(now: DateTime<Utc>) -> Vec<NewAlert> {
    let alert = |title: &str,
                 description: &str,
                 alert_type: &str,
                 severity: AlertSeverity,
                 region: &str,
                 days: i64| NewAlert {
        title: title.to_string(),
        description: description.to_string(),
        alert_type: alert_type.to_string(),
        severity,
        region: region.to_string(),
        expires_at: now + Duration::days(days),
    };

    vec![
        alert(
            "Flash Flood Warning",
            "Heavy rainfall expected over the next 48 hours. Avoid low-lying areas and do not drive through flooded roads.",
            "flood",
            AlertSeverity::High,
            "north",
            2,
        ),
        alert(
            "Severe Thunderstorm Watch",
            "Conditions are favourable for severe thunderstorms with damaging winds and hail.",
            "storm",
            AlertSeverity::Moderate,
            "north",
            1,
        ),
        alert(
            "Wildfire Evacuation Advisory",
            "A wildfire is spreading toward residential areas. Prepare to evacuate and keep your go-bag ready.",
            "wildfire",
            AlertSeverity::Severe,
            "south",
            3,
        ),
        alert(
            "Heat Advisory",
            "Temperatures above 38°C expected. Stay hydrated and check on elderly neighbours.",
            "heat",
            AlertSeverity::Moderate,
            "east",
            5,
        ),
        alert(
            "Earthquake Preparedness Drill",
            "A regional earthquake drill takes place this week. Review your household plan.",
            "earthquake",
            AlertSeverity::Low,
            "west",
            7,
        ),
    ]
}
