#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "backend-sql", derive(sqlx::FromRow))]
pub struct User {
    pub id: i64,
    pub username: String,
    /// argon2 PHC string, never the clear-text password
    pub pwhash: String,
    pub role: String,
}
