use lazy_static::lazy_static;
use regex::Regex;

use crate::auth::dto::SignupRequest;
use crate::error::Violation;
use crate::profile::dto::{AppearanceSettingsRequest, PageItemRequest, UpdateBasicRequest};

use super::repo_types::{AppearanceSettings, ButtonStyle, Font, Layout, Theme};

pub const USERNAME_MIN: usize = 3;
pub const USERNAME_MAX: usize = 20;
pub const PASSWORD_MIN: usize = 6;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

fn require(field: &'static str, value: &str, violations: &mut Vec<Violation>) -> bool {
    if value.trim().is_empty() {
        violations.push(Violation {
            field,
            message: format!("{field} is required"),
        });
        return false;
    }
    true
}

fn check_username(username: &str, violations: &mut Vec<Violation>) {
    let len = username.trim().chars().count();
    if !(USERNAME_MIN..=USERNAME_MAX).contains(&len) {
        violations.push(Violation {
            field: "username",
            message: format!("username must be {USERNAME_MIN}-{USERNAME_MAX} characters"),
        });
    }
}

/// All constraints a signup body must satisfy, collected rather than
/// short-circuited so the client sees every problem at once.
pub fn validate_signup(req: &SignupRequest) -> Vec<Violation> {
    let mut violations = Vec::new();
    require("firstName", &req.first_name, &mut violations);
    require("lastName", &req.last_name, &mut violations);
    require("category", &req.category, &mut violations);
    if require("email", &req.email, &mut violations) && !is_valid_email(req.email.trim()) {
        violations.push(Violation {
            field: "email",
            message: "Invalid email address".into(),
        });
    }
    if require("username", &req.username, &mut violations) {
        check_username(&req.username, &mut violations);
    }
    if req.password.chars().count() < PASSWORD_MIN {
        violations.push(Violation {
            field: "password",
            message: format!("password must be at least {PASSWORD_MIN} characters"),
        });
    }
    violations
}

/// Constraints re-checked on a basic-profile update. Only supplied fields
/// are validated; absent fields keep their stored values.
pub fn validate_basic(req: &UpdateBasicRequest) -> Vec<Violation> {
    let mut violations = Vec::new();
    if let Some(first_name) = &req.first_name {
        require("firstName", first_name, &mut violations);
    }
    if let Some(last_name) = &req.last_name {
        require("lastName", last_name, &mut violations);
    }
    if let Some(category) = &req.category {
        require("category", category, &mut violations);
    }
    if let Some(username) = &req.username {
        if require("username", username, &mut violations) {
            check_username(username, &mut violations);
        }
    }
    violations
}

/// Title and url are required on every submitted link/shop entry.
pub fn validate_items(field: &'static str, items: &[PageItemRequest]) -> Vec<Violation> {
    let mut violations = Vec::new();
    for (index, item) in items.iter().enumerate() {
        if item.title.trim().is_empty() {
            violations.push(Violation {
                field,
                message: format!("{field}[{index}].title is required"),
            });
        }
        if item.url.trim().is_empty() {
            violations.push(Violation {
                field,
                message: format!("{field}[{index}].url is required"),
            });
        }
    }
    violations
}

/// Resolve submitted appearance labels against the fixed enum sets; one
/// violation per unrecognized field.
pub fn parse_appearance(
    req: &AppearanceSettingsRequest,
) -> Result<AppearanceSettings, Vec<Violation>> {
    let mut violations = Vec::new();

    let layout = Layout::parse(req.layout.trim());
    if layout.is_none() {
        violations.push(Violation {
            field: "layout",
            message: "layout must be one of Stack, Grid, List".into(),
        });
    }
    let button_style = ButtonStyle::parse(req.button_style.trim());
    if button_style.is_none() {
        violations.push(Violation {
            field: "buttonStyle",
            message: "buttonStyle must be one of Fill, Outline, Text".into(),
        });
    }
    let font = Font::parse(req.font.trim());
    if font.is_none() {
        violations.push(Violation {
            field: "font",
            message: "font must be one of DM Sans, Roboto, Open Sans".into(),
        });
    }
    let theme = Theme::parse(req.theme.trim());
    if theme.is_none() {
        violations.push(Violation {
            field: "theme",
            message: "theme must be one of Air Snow, Dark Mode, Light Mode".into(),
        });
    }

    match (layout, button_style, font, theme) {
        (Some(layout), Some(button_style), Some(font), Some(theme)) => Ok(AppearanceSettings {
            layout,
            button_style,
            font,
            theme,
        }),
        _ => Err(violations),
    }
}
