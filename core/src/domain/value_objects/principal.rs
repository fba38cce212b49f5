//! The authenticated caller of a request.

use uuid::Uuid;

/// Identity extracted from a verified access token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub user_id: Uuid,
    pub is_staff: bool,
}

impl Principal {
    pub fn new(user_id: Uuid, is_staff: bool) -> Self {
        Self { user_id, is_staff }
    }

    /// Owner-or-staff rule applied to every listing mutation
    pub fn can_modify(&self, owner_id: Uuid) -> bool {
        self.is_staff || self.user_id == owner_id
    }
}
