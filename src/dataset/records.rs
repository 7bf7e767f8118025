//! Row types for the four dataset tables

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A country referenced by users, blogs and views
#[derive(Debug, Clone, Deserialize)]
pub struct Country {
    pub id: i64,
    pub name: String,
    /// ISO-style country code (e.g., "US")
    pub code: String,
}

/// A platform user; authors blogs and views them
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    /// Country id, if the user set one
    #[serde(default)]
    pub country: Option<i64>,
}

/// A blog post
#[derive(Debug, Clone, Deserialize)]
pub struct Blog {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub content: String,
    /// Author user id
    pub author: i64,
    #[serde(default)]
    pub country: Option<i64>,
    pub created_at: DateTime<Utc>,
    /// Defaults to `created_at` when omitted
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default = "default_true")]
    pub is_published: bool,
}

/// A single view event; the root row of every analytics query
#[derive(Debug, Clone, Deserialize)]
pub struct BlogView {
    pub id: i64,
    /// Viewed blog id
    pub blog: i64,
    /// Viewer user id; `None` for anonymous views
    #[serde(default)]
    pub viewer: Option<i64>,
    #[serde(default)]
    pub country: Option<i64>,
    pub viewed_at: DateTime<Utc>,
    #[serde(default)]
    pub ip_address: Option<String>,
}

fn default_true() -> bool {
    true
}
