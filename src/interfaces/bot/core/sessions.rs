use std::time::{Duration, Instant};

use dashmap::DashMap;
use uuid::Uuid;

use crate::interfaces::bot::ui::CreationKind;

/// Conversations are scoped to one user in one chat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ConversationKey {
    pub chat_id: i64,
    pub user_id: u64,
}

impl ConversationKey {
    pub fn new(chat_id: i64, user_id: u64) -> Self {
        Self { chat_id, user_id }
    }
}

#[derive(Clone, Debug)]
pub struct PendingCreation {
    pub kind: CreationKind,
    pub session: Uuid,
    pub started_at: Instant,
}

/// Creation flows waiting for their free-text reply.
pub struct ConversationRegistry {
    sessions: DashMap<ConversationKey, PendingCreation>,
    timeout: Duration,
}

impl ConversationRegistry {
    pub fn new(timeout: Duration) -> Self {
        Self {
            sessions: DashMap::new(),
            timeout,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Starts a flow, replacing whatever the same user had pending in this chat.
    pub fn begin(&self, key: ConversationKey, kind: CreationKind) -> Uuid {
        let session = Uuid::new_v4();
        let pending = PendingCreation {
            kind,
            session,
            started_at: Instant::now(),
        };
        if let Some(previous) = self.sessions.insert(key, pending) {
            log::info!(
                "Replacing pending {} creation for user {} in chat {}",
                previous.kind.label(),
                key.user_id,
                key.chat_id
            );
        }
        log::debug!("Pending conversations: {}", self.len());
        session
    }

    /// Removes and returns the pending flow. Expired flows are dropped and
    /// yield `None`.
    pub fn take(&self, key: &ConversationKey) -> Option<CreationKind> {
        let (_, pending) = self.sessions.remove(key)?;
        if pending.started_at.elapsed() >= self.timeout {
            return None;
        }
        Some(pending.kind)
    }

    /// Drops the flow only if `session` is still the one pending for `key`.
    pub fn expire(&self, key: &ConversationKey, session: Uuid) -> Option<CreationKind> {
        self.sessions
            .remove_if(key, |_, pending| pending.session == session)
            .map(|(_, pending)| pending.kind)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINUTE: Duration = Duration::from_secs(60);

    #[test]
    fn take_consumes_the_pending_flow() {
        let registry = ConversationRegistry::new(MINUTE);
        let key = ConversationKey::new(-100, 42);

        registry.begin(key, CreationKind::Task);

        assert_eq!(registry.take(&key), Some(CreationKind::Task));
        assert_eq!(registry.take(&key), None);
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn flows_are_scoped_to_chat_and_user() {
        let registry = ConversationRegistry::new(MINUTE);
        let owner = ConversationKey::new(-100, 42);

        registry.begin(owner, CreationKind::Giveaway);

        assert_eq!(registry.take(&ConversationKey::new(-100, 7)), None);
        assert_eq!(registry.take(&ConversationKey::new(-200, 42)), None);
        assert_eq!(registry.take(&owner), Some(CreationKind::Giveaway));
    }

    #[test]
    fn new_command_replaces_pending_flow() {
        let registry = ConversationRegistry::new(MINUTE);
        let key = ConversationKey::new(1, 1);

        registry.begin(key, CreationKind::Task);
        registry.begin(key, CreationKind::Poll);

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.take(&key), Some(CreationKind::Poll));
    }

    #[test]
    fn expired_flow_is_not_routed() {
        let registry = ConversationRegistry::new(Duration::ZERO);
        let key = ConversationKey::new(1, 1);

        registry.begin(key, CreationKind::Task);

        assert_eq!(registry.take(&key), None);
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn expire_ignores_superseded_sessions() {
        let registry = ConversationRegistry::new(MINUTE);
        let key = ConversationKey::new(1, 1);

        let stale = registry.begin(key, CreationKind::Task);
        let current = registry.begin(key, CreationKind::Giveaway);

        assert_eq!(registry.expire(&key, stale), None);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.expire(&key, current), Some(CreationKind::Giveaway));
        assert_eq!(registry.len(), 0);
    }
}
