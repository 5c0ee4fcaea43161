use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::users::repo_types::{AppearanceSettings, User};

/// Request body for account creation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub username: String,
    pub category: String,
    #[serde(default)]
    pub profile_photo: Option<String>,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for minting a new access token.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Signup hands out both token classes along with the owner summary.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupResponse {
    pub token: String,
    pub refresh_token: String,
    pub user: UserSummary,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserSummary,
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub token: String,
}

/// Advisory logout acknowledgement.
#[derive(Debug, Serialize)]
pub struct AckResponse {
    pub success: bool,
}

/// Password-free user summary returned by signup and login.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub username: String,
    pub category: String,
    pub profile_photo: String,
    pub bio: String,
    pub banner_color: String,
    pub appearance_settings: AppearanceSettings,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        let appearance_settings = user.appearance();
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            username: user.username,
            category: user.category,
            profile_photo: user.profile_photo,
            bio: user.bio,
            banner_color: user.banner_color,
            appearance_settings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::users::repo_types::{ButtonStyle, Font, Layout, Theme};
    use time::OffsetDateTime;

    fn sample_user() -> User {
        User {
            id: Uuid::new_v4(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            username: "ada".into(),
            password_hash: "$2b$10$abcdefghijklmnopqrstuv".into(),
            category: "Engineering".into(),
            profile_photo: "https://example.com/ada.png".into(),
            bio: String::new(),
            banner_color: "#000000".into(),
            layout: Layout::Stack,
            button_style: ButtonStyle::Fill,
            font: Font::DmSans,
            theme: Theme::AirSnow,
            created_at: OffsetDateTime::now_utc(),
            updated_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn summary_is_camel_case_and_password_free() {
        let summary = UserSummary::from(sample_user());
        let json = serde_json::to_value(&summary).unwrap();
        let obj = json.as_object().unwrap();
        assert!(obj.contains_key("firstName"));
        assert!(obj.contains_key("appearanceSettings"));
        assert!(!obj.contains_key("password"));
        assert!(!obj.contains_key("passwordHash"));
        assert_eq!(json["appearanceSettings"]["font"], "DM Sans");
    }

    #[test]
    fn signup_request_accepts_an_optional_photo() {
        let body = r#"{
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "ada@example.com",
            "password": "secret1",
            "username": "ada",
            "category": "Engineering"
        }"#;
        let req: SignupRequest = serde_json::from_str(body).unwrap();
        assert!(req.profile_photo.is_none());
        assert_eq!(req.first_name, "Ada");
    }
}
