use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Employee {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub manager_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl Employee {
    pub fn new(name: impl Into<String>, email: impl Into<String>, manager_id: Option<Uuid>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email: email.into(),
            manager_id,
            created_at: Utc::now(),
        }
    }
}
