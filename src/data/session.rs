use crate::domain::cycle::UserId;

/// Supplies the signed-in user.
pub trait SessionProvider {
    fn current_user(&self) -> Option<UserId>;
}

/// A session fixed at startup from the command line or saved settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticSession {
    user: Option<UserId>,
}

impl StaticSession {
    pub fn new(user: Option<UserId>) -> Self {
        Self {
            user: user.filter(|u| !u.0.trim().is_empty()),
        }
    }
}

impl SessionProvider for StaticSession {
    fn current_user(&self) -> Option<UserId> {
        self.user.clone()
    }
}
