use chrono::DateTime;
use chrono::Utc;

/// Book aggregate. `quantity` is the available stock and never goes
/// negative; the store enforces that with a conditional decrement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub category: String,
    pub quantity: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct CreateBookCommand {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub category: String,
    pub quantity: i64,
}

/// Partial update; only provided fields change.
#[derive(Debug, Default)]
pub struct UpdateBookCommand {
    pub title: Option<String>,
    pub author: Option<String>,
    pub category: Option<String>,
    pub quantity: Option<i64>,
}
