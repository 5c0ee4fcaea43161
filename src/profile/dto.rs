use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::users::repo_types::{AppearanceSettings, ItemKind, PageItem};

/// Full password-free user document: profile fields, appearance, links,
/// shops and timestamps.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
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
    pub links: Vec<PageItemDto>,
    pub shops: Vec<PageItemDto>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// One link or shop entry as it appears on the wire.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageItemDto {
    pub id: Uuid,
    pub title: String,
    pub url: String,
    pub enabled: bool,
    pub click_count: i64,
}

impl From<PageItem> for PageItemDto {
    fn from(item: PageItem) -> Self {
        Self {
            id: item.id,
            title: item.title,
            url: item.url,
            enabled: item.enabled,
            click_count: item.click_count,
        }
    }
}

/// PUT /profile/basic body; absent fields keep their stored values.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBasicRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub profile_photo: Option<String>,
    pub username: Option<String>,
    pub category: Option<String>,
}

/// One submitted link/shop entry. Keeping the id keeps the counter.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageItemRequest {
    pub id: Option<Uuid>,
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub enabled: bool,
    pub click_count: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateLinksRequest {
    pub links: Vec<PageItemRequest>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateShopsRequest {
    pub shops: Vec<PageItemRequest>,
}

/// PUT /profile/appearance body; labels are validated against the fixed
/// enum sets rather than rejected by the deserializer, so the client gets
/// one violation per bad field.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAppearanceRequest {
    pub banner_color: String,
    pub appearance_settings: AppearanceSettingsRequest,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppearanceSettingsRequest {
    pub layout: String,
    pub button_style: String,
    pub font: String,
    pub theme: String,
}

/// POST /profile/track-click body. `item_id` stays a string so garbage ids
/// fall through to the silent no-op path instead of failing
/// deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackClickRequest {
    pub item_id: String,
    pub item_type: ItemKind,
}

#[derive(Debug, Serialize)]
pub struct TrackClickResponse {
    pub success: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemAnalytics {
    pub id: Uuid,
    pub title: String,
    pub url: String,
    pub click_count: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsResponse {
    pub links: Vec<ItemAnalytics>,
    pub shops: Vec<ItemAnalytics>,
    pub total_link_clicks: i64,
    pub total_shop_clicks: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn track_click_parses_both_kinds() {
        let req: TrackClickRequest =
            serde_json::from_str(r#"{"itemId": "abc", "itemType": "link"}"#).unwrap();
        assert_eq!(req.item_type, ItemKind::Link);
        let req: TrackClickRequest =
            serde_json::from_str(r#"{"itemId": "abc", "itemType": "shop"}"#).unwrap();
        assert_eq!(req.item_type, ItemKind::Shop);
    }

    #[test]
    fn track_click_rejects_unknown_item_types() {
        let result: Result<TrackClickRequest, _> =
            serde_json::from_str(r#"{"itemId": "abc", "itemType": "banner"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn item_request_defaults_enabled_and_count() {
        let req: PageItemRequest =
            serde_json::from_str(r#"{"title": "Blog", "url": "https://blog.example.com"}"#)
                .unwrap();
        assert!(!req.enabled);
        assert!(req.id.is_none());
        assert!(req.click_count.is_none());
    }

    #[test]
    fn analytics_serializes_camel_case_totals() {
        let response = AnalyticsResponse {
            links: vec![],
            shops: vec![],
            total_link_clicks: 3,
            total_shop_clicks: 0,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["totalLinkClicks"], 3);
        assert_eq!(json["totalShopClicks"], 0);
    }
}
