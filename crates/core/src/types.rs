/// Identifier of an event, planning item, recurring series or assignment.
pub type ItemId = String;

/// Identifier of a user.
pub type UserId = String;

/// Identifier of a single client session (one user may hold several).
pub type SessionId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
