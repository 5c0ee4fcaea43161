use sqlx::PgPool;
use uuid::Uuid;

use crate::error::ApiError;
use crate::users::repo_types::{ItemKind, PageItem, User};

use super::dto::{AnalyticsResponse, ItemAnalytics, PageItemDto, UserProfile};

/// Load the full password-free document for a user.
pub async fn load_profile(db: &PgPool, user_id: Uuid) -> Result<UserProfile, ApiError> {
    let user = User::find_by_id(db, user_id)
        .await?
        .ok_or(ApiError::NotFound("User"))?;
    let items = PageItem::list_for_user(db, user_id).await?;
    Ok(build_profile(user, items))
}

pub fn build_profile(user: User, items: Vec<PageItem>) -> UserProfile {
    let appearance_settings = user.appearance();
    let (links, shops): (Vec<_>, Vec<_>) =
        items.into_iter().partition(|item| item.kind == ItemKind::Link);
    UserProfile {
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
        links: links.into_iter().map(PageItemDto::from).collect(),
        shops: shops.into_iter().map(PageItemDto::from).collect(),
        created_at: user.created_at,
        updated_at: user.updated_at,
    }
}

/// Per-item counters plus totals for both kinds.
pub async fn load_analytics(db: &PgPool, user_id: Uuid) -> Result<AnalyticsResponse, ApiError> {
    // A stale token for a vanished account gets 404, not empty analytics.
    if User::find_by_id(db, user_id).await?.is_none() {
        return Err(ApiError::NotFound("User"));
    }
    let items = PageItem::list_for_user(db, user_id).await?;
    Ok(aggregate_analytics(items))
}

pub fn aggregate_analytics(items: Vec<PageItem>) -> AnalyticsResponse {
    let mut links = Vec::new();
    let mut shops = Vec::new();
    for item in items {
        let entry = ItemAnalytics {
            id: item.id,
            title: item.title,
            url: item.url,
            click_count: item.click_count,
        };
        match item.kind {
            ItemKind::Link => links.push(entry),
            ItemKind::Shop => shops.push(entry),
        }
    }
    let total_link_clicks = links.iter().map(|l| l.click_count).sum();
    let total_shop_clicks = shops.iter().map(|s| s.click_count).sum();
    AnalyticsResponse {
        links,
        shops,
        total_link_clicks,
        total_shop_clicks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::users::repo_types::{ButtonStyle, Font, Layout, Theme};
    use time::OffsetDateTime;

    fn item(kind: ItemKind, title: &str, clicks: i64, position: i32) -> PageItem {
        PageItem {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            kind,
            title: title.into(),
            url: format!("https://example.com/{title}"),
            enabled: true,
            click_count: clicks,
            position,
        }
    }

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
            bio: "hello".into(),
            banner_color: "#112233".into(),
            layout: Layout::Grid,
            button_style: ButtonStyle::Outline,
            font: Font::Roboto,
            theme: Theme::DarkMode,
            created_at: OffsetDateTime::now_utc(),
            updated_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn totals_equal_the_sum_of_the_parts() {
        let items = vec![
            item(ItemKind::Link, "a", 3, 0),
            item(ItemKind::Link, "b", 4, 1),
            item(ItemKind::Shop, "s", 5, 0),
        ];
        let analytics = aggregate_analytics(items);
        assert_eq!(analytics.links.len(), 2);
        assert_eq!(analytics.shops.len(), 1);
        assert_eq!(
            analytics.total_link_clicks,
            analytics.links.iter().map(|l| l.click_count).sum::<i64>()
        );
        assert_eq!(analytics.total_link_clicks, 7);
        assert_eq!(analytics.total_shop_clicks, 5);
    }

    #[test]
    fn empty_page_has_zero_totals() {
        let analytics = aggregate_analytics(vec![]);
        assert!(analytics.links.is_empty());
        assert!(analytics.shops.is_empty());
        assert_eq!(analytics.total_link_clicks, 0);
        assert_eq!(analytics.total_shop_clicks, 0);
    }

    #[test]
    fn profile_partitions_items_and_never_serializes_the_hash() {
        let profile = build_profile(
            sample_user(),
            vec![
                item(ItemKind::Link, "a", 1, 0),
                item(ItemKind::Shop, "s", 2, 0),
            ],
        );
        assert_eq!(profile.links.len(), 1);
        assert_eq!(profile.shops.len(), 1);

        let json = serde_json::to_value(&profile).unwrap();
        let rendered = json.to_string();
        assert!(!rendered.contains("password"));
        assert!(!rendered.contains("$2b$10$"));
        assert_eq!(json["appearanceSettings"]["theme"], "Dark Mode");
        assert!(json["createdAt"].is_string());
    }
}
