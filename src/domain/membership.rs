use chrono::{DateTime, Utc};
use uuid::Uuid;

/// One membership invite, linked to a profile once the invited email
/// registers.
#[derive(Debug, Clone)]
pub struct MembershipView {
    pub id: Uuid,
    pub shop_id: Uuid,
    pub email: String,
    pub user_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// A registered member as shown on the shop's membership roster.
#[derive(Debug, Clone)]
pub struct MemberProfile {
    pub user_id: Uuid,
    pub student_number: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub contact_number: String,
    pub college: Option<String>,
    pub program: Option<String>,
    pub year: i32,
    pub section: i32,
}

/// Roster of a shop: registered members plus invited emails that no
/// profile has claimed yet.
#[derive(Debug, Clone)]
pub struct MemberRoster {
    pub members: Vec<MemberProfile>,
    pub unregistered_emails: Vec<String>,
}
