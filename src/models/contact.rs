use serde::{Deserialize, Serialize};

/// The single saved set of emergency contacts. Saving replaces it wholesale.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyContacts {
    #[serde(default)]
    pub contact_name: String,
    #[serde(default)]
    pub contact_phone: String,
    #[serde(default)]
    pub physician_name: String,
    #[serde(default)]
    pub physician_phone: String,
}

impl EmergencyContacts {
    pub fn trimmed(self) -> Self {
        Self {
            contact_name: self.contact_name.trim().to_string(),
            contact_phone: self.contact_phone.trim().to_string(),
            physician_name: self.physician_name.trim().to_string(),
            physician_phone: self.physician_phone.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyAlert {
    pub configured: bool,
    pub message: String,
    /// `tel:` target for the primary contact, when one is saved.
    pub dial_uri: Option<String>,
}

impl EmergencyAlert {
    pub fn for_contacts(contacts: Option<&EmergencyContacts>) -> Self {
        let Some(contact) = contacts else {
            return Self {
                configured: false,
                message: "EMERGENCY MODE ACTIVATED\n\n\
                          Please set up emergency contacts with `pots-tracker emergency set`."
                    .to_string(),
                dial_uri: None,
            };
        };

        let message = format!(
            "EMERGENCY ALERT\n\n\
             Primary Contact: {}\nPhone: {}\n\n\
             Physician: {}\nPhone: {}\n\n\
             Call emergency services if needed: 911",
            contact.contact_name,
            contact.contact_phone,
            contact.physician_name,
            contact.physician_phone
        );

        let dial_uri = (!contact.contact_phone.is_empty())
            .then(|| format!("tel:{}", contact.contact_phone));

        Self {
            configured: true,
            message,
            dial_uri,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unconfigured_alert_asks_for_setup() {
        let alert = EmergencyAlert::for_contacts(None);
        assert!(!alert.configured);
        assert!(alert.dial_uri.is_none());
        assert!(alert.message.contains("set up emergency contacts"));
    }

    #[test]
    fn alert_lists_contacts_and_dials_primary() {
        let contacts = EmergencyContacts {
            contact_name: " Morgan ".into(),
            contact_phone: "555-0142".into(),
            physician_name: "Dr. Chen".into(),
            physician_phone: "555-0190".into(),
        }
        .trimmed();

        let alert = EmergencyAlert::for_contacts(Some(&contacts));
        assert!(alert.configured);
        assert_eq!(alert.dial_uri.as_deref(), Some("tel:555-0142"));
        assert_eq!(
            alert.message,
            "EMERGENCY ALERT\n\nPrimary Contact: Morgan\nPhone: 555-0142\n\n\
             Physician: Dr. Chen\nPhone: 555-0190\n\n\
             Call emergency services if needed: 911"
        );
    }
}
