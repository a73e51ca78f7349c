//! Contact profile store.
//!
//! Email and phone are stored exactly as dispatched; format checks belong to
//! whoever collects the input (see [`giftshelf_core::Email`]).

use giftshelf_core::PhoneCountryInfo;
use serde::{Deserialize, Serialize};

/// Contact details used to prefill purchase flows.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactProfile {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub phone_country_info: PhoneCountryInfo,
}

impl ContactProfile {
    #[must_use]
    pub fn with_email(&self, email: String) -> Self {
        Self {
            email,
            ..self.clone()
        }
    }

    /// Replace the phone number together with its country metadata.
    #[must_use]
    pub fn with_phone(&self, phone: String, phone_country_info: PhoneCountryInfo) -> Self {
        Self {
            phone,
            phone_country_info,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setters_are_independent() {
        let profile = ContactProfile::default()
            .with_phone("5551234567".into(), PhoneCountryInfo::new("1", "US"))
            .with_email("buyer@example.com".into());

        assert_eq!(profile.email, "buyer@example.com");
        assert_eq!(profile.phone, "5551234567");
        assert_eq!(profile.phone_country_info.country_iso_code, "US");

        let updated = profile.with_email(String::new());
        assert_eq!(updated.phone, profile.phone);
        assert_eq!(updated.phone_country_info, profile.phone_country_info);
    }

    #[test]
    fn test_phone_and_country_change_together() {
        let profile = ContactProfile::default()
            .with_phone("5551234567".into(), PhoneCountryInfo::new("1", "US"))
            .with_phone("7700900123".into(), PhoneCountryInfo::new("44", "GB"));

        assert_eq!(profile.phone, "7700900123");
        assert_eq!(profile.phone_country_info, PhoneCountryInfo::new("44", "GB"));
    }
}
