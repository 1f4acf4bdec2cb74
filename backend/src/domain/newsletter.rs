//! Newsletter subscriber records.

use chrono::{DateTime, Utc};

/// A stored newsletter subscription. Emails are unique; subscribing twice is
/// a silent no-op at the service layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsletterSubscriber {
    pub id: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}
