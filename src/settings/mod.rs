use crate::models::UserProfile;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Editable copy of the agent profile behind the settings form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSettings {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub brokerage: String,
    pub license_number: String,
}

impl ProfileSettings {
    /// Prefill from the signed-in user, blank when nobody is signed in
    pub fn from_user(user: Option<&UserProfile>) -> Self {
        let Some(user) = user else {
            return Self::default();
        };
        Self {
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone().unwrap_or_default(),
            brokerage: user.brokerage.clone().unwrap_or_default(),
            license_number: user.license_number.clone().unwrap_or_default(),
        }
    }

    /// Avatar fallback, e.g. "DU"
    pub fn initials(&self) -> String {
        self.first_name
            .chars()
            .take(1)
            .chain(self.last_name.chars().take(1))
            .flat_map(char::to_uppercase)
            .collect()
    }

    /// Write the form back onto the profile
    pub fn apply(&self, user: &mut UserProfile) {
        fn optional(value: &str) -> Option<String> {
            let trimmed = value.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }

        user.first_name = self.first_name.trim().to_string();
        user.last_name = self.last_name.trim().to_string();
        user.email = self.email.trim().to_string();
        user.phone = optional(&self.phone);
        user.brokerage = optional(&self.brokerage);
        user.license_number = optional(&self.license_number);
        info!("Profile updated for {}", user.email);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::demo::demo_user;

    #[test]
    fn prefills_from_user() {
        let user = demo_user();
        let form = ProfileSettings::from_user(Some(&user));
        assert_eq!(form.brokerage, "Demo Realty");
        assert_eq!(form.initials(), "DU");
        assert_eq!(ProfileSettings::from_user(None), ProfileSettings::default());
    }

    #[test]
    fn initials_handle_missing_names() {
        let form = ProfileSettings {
            first_name: "élise".to_string(),
            ..Default::default()
        };
        assert_eq!(form.initials(), "É");
        assert_eq!(ProfileSettings::default().initials(), "");
    }

    #[test]
    fn apply_clears_blank_optionals() {
        let mut user = demo_user();
        let mut form = ProfileSettings::from_user(Some(&user));
        form.phone = " ".to_string();
        form.brokerage = "Harbourfront Realty".to_string();

        form.apply(&mut user);
        assert_eq!(user.phone, None);
        assert_eq!(user.brokerage.as_deref(), Some("Harbourfront Realty"));
        assert_eq!(user.license_number.as_deref(), Some("12345"));
    }
}
