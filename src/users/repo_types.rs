use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

pub const DEFAULT_PROFILE_PHOTO: &str = "https://example.com/default-profile-photo.png";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "layout_style")]
pub enum Layout {
    Stack,
    Grid,
    List,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "button_style")]
pub enum ButtonStyle {
    Fill,
    Outline,
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "font_face")]
pub enum Font {
    #[serde(rename = "DM Sans")]
    #[sqlx(rename = "DM Sans")]
    DmSans,
    Roboto,
    #[serde(rename = "Open Sans")]
    #[sqlx(rename = "Open Sans")]
    OpenSans,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "theme_name")]
pub enum Theme {
    #[serde(rename = "Air Snow")]
    #[sqlx(rename = "Air Snow")]
    AirSnow,
    #[serde(rename = "Dark Mode")]
    #[sqlx(rename = "Dark Mode")]
    DarkMode,
    #[serde(rename = "Light Mode")]
    #[sqlx(rename = "Light Mode")]
    LightMode,
}

impl Layout {
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "Stack" => Some(Self::Stack),
            "Grid" => Some(Self::Grid),
            "List" => Some(Self::List),
            _ => None,
        }
    }
}

impl ButtonStyle {
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "Fill" => Some(Self::Fill),
            "Outline" => Some(Self::Outline),
            "Text" => Some(Self::Text),
            _ => None,
        }
    }
}

impl Font {
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "DM Sans" => Some(Self::DmSans),
            "Roboto" => Some(Self::Roboto),
            "Open Sans" => Some(Self::OpenSans),
            _ => None,
        }
    }
}

impl Theme {
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "Air Snow" => Some(Self::AirSnow),
            "Dark Mode" => Some(Self::DarkMode),
            "Light Mode" => Some(Self::LightMode),
            _ => None,
        }
    }
}

/// Fixed-shape appearance record embedded in every profile response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppearanceSettings {
    pub layout: Layout,
    pub button_style: ButtonStyle,
    pub font: Font,
    pub theme: Theme,
}

impl Default for AppearanceSettings {
    fn default() -> Self {
        Self {
            layout: Layout::Stack,
            button_style: ButtonStyle::Fill,
            font: Font::DmSans,
            theme: Theme::AirSnow,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "page_item_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Link,
    Shop,
}

impl ItemKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Link => "link",
            Self::Shop => "shop",
        }
    }
}

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub category: String,
    pub profile_photo: String,
    pub bio: String,
    pub banner_color: String,
    pub layout: Layout,
    pub button_style: ButtonStyle,
    pub font: Font,
    pub theme: Theme,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl User {
    pub fn appearance(&self) -> AppearanceSettings {
        AppearanceSettings {
            layout: self.layout,
            button_style: self.button_style,
            font: self.font,
            theme: self.theme,
        }
    }
}

/// One link or shop row nested under a user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PageItem {
    pub id: Uuid,
    pub user_id: Uuid,
    pub kind: ItemKind,
    pub title: String,
    pub url: String,
    pub enabled: bool,
    pub click_count: i64,
    pub position: i32,
}

/// Insert payload for a new account; appearance and counters take the
/// schema defaults.
#[derive(Debug)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub category: String,
    pub profile_photo: String,
}

/// Allowed-subset partial update; absent fields keep their stored values.
/// Password and email have no path through here.
#[derive(Debug, Default)]
pub struct BasicUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub profile_photo: Option<String>,
    pub username: Option<String>,
    pub category: Option<String>,
}

/// One submitted link/shop entry; a present `id` means "the same sub-entity
/// as before", which is what keeps counters stable across edits.
#[derive(Debug, Clone)]
pub struct ItemDraft {
    pub id: Option<Uuid>,
    pub title: String,
    pub url: String,
    pub enabled: bool,
    pub click_count: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enum_labels_round_trip_through_serde() {
        assert_eq!(serde_json::to_string(&Font::DmSans).unwrap(), "\"DM Sans\"");
        assert_eq!(
            serde_json::to_string(&Theme::AirSnow).unwrap(),
            "\"Air Snow\""
        );
        assert_eq!(serde_json::to_string(&Layout::Stack).unwrap(), "\"Stack\"");
        assert_eq!(serde_json::to_string(&ItemKind::Link).unwrap(), "\"link\"");

        let font: Font = serde_json::from_str("\"Open Sans\"").unwrap();
        assert_eq!(font, Font::OpenSans);
    }

    #[test]
    fn appearance_defaults_match_the_schema() {
        let defaults = AppearanceSettings::default();
        assert_eq!(defaults.layout, Layout::Stack);
        assert_eq!(defaults.button_style, ButtonStyle::Fill);
        assert_eq!(defaults.font, Font::DmSans);
        assert_eq!(defaults.theme, Theme::AirSnow);
    }

    #[test]
    fn parse_accepts_exact_labels_only() {
        assert_eq!(Layout::parse("Grid"), Some(Layout::Grid));
        assert_eq!(Layout::parse("grid"), None);
        assert_eq!(Font::parse("DM Sans"), Some(Font::DmSans));
        assert_eq!(Font::parse("Comic Sans"), None);
        assert_eq!(Theme::parse("Dark Mode"), Some(Theme::DarkMode));
        assert_eq!(Theme::parse(""), None);
    }
}
