use serde::Deserialize;

use crate::error::ApiError;

// "my" is claimed by the feed routes, so it can never be a login.
const RESERVED_LOGINS: &[&str] = &["my"];

const LOGIN_MAX: usize = 30;
const EMAIL_MAX: usize = 50;
const PASSWORD_MIN: usize = 6;
const PASSWORD_MAX: usize = 100;
const IMAGE_MAX: usize = 200;
const CONTENT_MAX: usize = 1000;
const TAG_MAX: usize = 20;

pub const PAGE_LIMIT_DEFAULT: i64 = 5;
pub const PAGE_LIMIT_MAX: i64 = 50;

/// 1..=30 chars, letters, digits and `-` only, not a reserved word.
pub fn login(login: &str) -> Result<(), ApiError> {
    let len = login.chars().count();
    let ok = (1..=LOGIN_MAX).contains(&len)
        && login.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        && !RESERVED_LOGINS.contains(&login);
    if ok {
        Ok(())
    } else {
        Err(ApiError::validation("invalid login"))
    }
}

pub fn email(email: &str) -> Result<(), ApiError> {
    if (1..=EMAIL_MAX).contains(&email.chars().count()) {
        Ok(())
    } else {
        Err(ApiError::validation("invalid email"))
    }
}

/// 6..=100 chars with at least one lowercase, one uppercase and one digit.
pub fn password(password: &str) -> Result<(), ApiError> {
    let len = password.chars().count();
    let ok = (PASSWORD_MIN..=PASSWORD_MAX).contains(&len)
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit());
    if ok {
        Ok(())
    } else {
        Err(ApiError::validation("password is too weak"))
    }
}

/// `+` followed by at least one digit, nothing else.
pub fn phone(phone: &str) -> Result<(), ApiError> {
    let rest = phone.strip_prefix('+').unwrap_or("");
    if !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ApiError::validation("invalid phone number"))
    }
}

pub fn image(image: &str) -> Result<(), ApiError> {
    if image.chars().count() <= IMAGE_MAX {
        Ok(())
    } else {
        Err(ApiError::validation("image link is too long"))
    }
}

pub fn post_content(content: &str) -> Result<(), ApiError> {
    if content.chars().count() <= CONTENT_MAX {
        Ok(())
    } else {
        Err(ApiError::validation("post content is too long"))
    }
}

pub fn post_tags(tags: &[String]) -> Result<(), ApiError> {
    if tags
        .iter()
        .all(|tag| (1..=TAG_MAX).contains(&tag.chars().count()))
    {
        Ok(())
    } else {
        Err(ApiError::validation("invalid tags"))
    }
}

#[derive(Debug, Deserialize)]
pub struct PageParams {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    PAGE_LIMIT_DEFAULT
}

pub fn page(page: &PageParams) -> Result<(), ApiError> {
    if page.limit < 0 || page.limit > PAGE_LIMIT_MAX || page.offset < 0 {
        return Err(ApiError::validation("invalid limit or offset"));
    }
    Ok(())
}
