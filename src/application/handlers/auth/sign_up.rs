//! SignUpHandler - Command handler for creating accounts.

use std::sync::Arc;

use crate::domain::auth::{SignUpForm, EMAIL_ALREADY_EXISTS};
use crate::domain::foundation::{
    DomainError, ErrorCode, EventId, SerializableDomainEvent, UserId,
};
use crate::domain::user::{User, UserRegistered, Username};
use crate::ports::{EventPublisher, PasswordHasher, UserRepository};

/// Gives up on finding a free handle after this many suffixes.
const MAX_USERNAME_ATTEMPTS: u32 = 100;

#[derive(Debug, Clone)]
pub struct SignUpCommand {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Debug, Clone)]
pub struct SignUpResult {
    pub user: User,
    pub event: UserRegistered,
}

/// Handler for account registration. Does not start a session.
pub struct SignUpHandler {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl SignUpHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            users,
            hasher,
            event_publisher,
        }
    }

    pub async fn handle(&self, cmd: SignUpCommand) -> Result<SignUpResult, DomainError> {
        let form = SignUpForm::parse(&cmd.name, &cmd.email, &cmd.password, &cmd.confirm_password)?;

        if self.users.find_by_email(&form.email).await?.is_some() {
            return Err(DomainError::new(ErrorCode::EmailTaken, EMAIL_ALREADY_EXISTS)
                .with_field_error("email", EMAIL_ALREADY_EXISTS));
        }

        let password_hash = self.hasher.hash(&form.password).await?;
        let base = Username::derive_from_email(&form.email);

        // A concurrent sign-up can claim the handle between the lookup and
        // the insert; the store's uniqueness check decides, and the next
        // suffix is tried.
        let mut attempt = 1;
        let user = loop {
            let (n, username) = self.free_username(&base, attempt).await?;
            let user = User::register(
                UserId::new(),
                form.email.clone(),
                username,
                form.name.clone(),
                password_hash.clone(),
            );
            match self.users.insert(&user).await {
                Ok(()) => break user,
                Err(e) if e.code == ErrorCode::UsernameTaken => {
                    tracing::debug!(username = %user.username(), "Username claimed concurrently, retrying");
                    attempt = n + 1;
                }
                Err(e) => return Err(e),
            }
        };

        tracing::info!(user_id = %user.id(), username = %user.username(), "User registered");

        let event = UserRegistered {
            event_id: EventId::new(),
            user_id: user.id(),
            username: user.username().as_str().to_string(),
            registered_at: user.created_at(),
        };
        let envelope = event.to_envelope()?.with_user_id(user.id().to_string());
        self.event_publisher.publish(envelope).await?;

        Ok(SignUpResult { user, event })
    }

    /// First unused handle among `base`, `base-2`, `base-3`, ... starting at
    /// position `from` (1 is the bare base). Returns the position with it.
    async fn free_username(&self, base: &Username, from: u32) -> Result<(u32, Username), DomainError> {
        for n in from..=MAX_USERNAME_ATTEMPTS {
            let candidate = if n == 1 { base.clone() } else { base.with_suffix(n) };
            if !self.users.username_exists(&candidate).await? {
                return Ok((n, candidate));
            }
        }
        Err(DomainError::new(
            ErrorCode::UsernameTaken,
            format!("No free username derived from {}", base),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::MockPasswordHasher;
    use crate::adapters::memory::InMemoryStore;
    use crate::adapters::InMemoryEventBus;
    use crate::domain::auth::PASSWORDS_DO_NOT_MATCH;
    use crate::domain::user::Email;
    use async_trait::async_trait;

    /// Store whose existence check never sees other sign-ups, as when two
    /// requests race for the same handle.
    struct StaleLookups(Arc<InMemoryStore>);

    #[async_trait]
    impl UserRepository for StaleLookups {
        async fn insert(&self, user: &User) -> Result<(), DomainError> {
            UserRepository::insert(self.0.as_ref(), user).await
        }
        async fn update(&self, user: &User) -> Result<(), DomainError> {
            UserRepository::update(self.0.as_ref(), user).await
        }
        async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
            UserRepository::find_by_id(self.0.as_ref(), id).await
        }
        async fn find_by_email(&self, email: &Email) -> Result<Option<User>, DomainError> {
            UserRepository::find_by_email(self.0.as_ref(), email).await
        }
        async fn find_by_username(&self, username: &Username) -> Result<Option<User>, DomainError> {
            UserRepository::find_by_username(self.0.as_ref(), username).await
        }
        async fn username_exists(&self, _: &Username) -> Result<bool, DomainError> {
            Ok(false)
        }
    }

    fn command(email: &str) -> SignUpCommand {
        SignUpCommand {
            name: "Ada Lovelace".to_string(),
            email: email.to_string(),
            password: "secret1".to_string(),
            confirm_password: "secret1".to_string(),
        }
    }

    fn handler(store: &Arc<InMemoryStore>, bus: &Arc<InMemoryEventBus>) -> SignUpHandler {
        SignUpHandler::new(store.clone(), Arc::new(MockPasswordHasher), bus.clone())
    }

    #[tokio::test]
    async fn registers_user_with_hashed_password() {
        let store = Arc::new(InMemoryStore::new());
        let bus = Arc::new(InMemoryEventBus::recording());

        let result = handler(&store, &bus).handle(command("Ada@Example.com")).await.unwrap();

        assert_eq!(result.user.email().as_str(), "ada@example.com");
        assert_eq!(result.user.username().as_str(), "ada");
        assert_ne!(result.user.password_hash(), "secret1");
        assert_eq!(store.user_count(), 1);
    }

    #[tokio::test]
    async fn publishes_user_registered_event() {
        let store = Arc::new(InMemoryStore::new());
        let bus = Arc::new(InMemoryEventBus::recording());

        let result = handler(&store, &bus).handle(command("ada@example.com")).await.unwrap();

        let events = bus.events_of_type("user.registered.v1");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].aggregate_id, result.user.id().to_string());
    }

    #[tokio::test]
    async fn rejects_existing_email_with_field_error() {
        let store = Arc::new(InMemoryStore::new());
        let bus = Arc::new(InMemoryEventBus::recording());
        let handler = handler(&store, &bus);
        handler.handle(command("ada@example.com")).await.unwrap();

        let err = handler.handle(command("ADA@example.com")).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::EmailTaken);
        assert_eq!(err.field_errors["email"], vec![EMAIL_ALREADY_EXISTS]);
        assert_eq!(store.user_count(), 1);
    }

    #[tokio::test]
    async fn suffixes_colliding_usernames() {
        let store = Arc::new(InMemoryStore::new());
        let bus = Arc::new(InMemoryEventBus::recording());
        let handler = handler(&store, &bus);

        handler.handle(command("ada@example.com")).await.unwrap();
        let second = handler.handle(command("ada@other.org")).await.unwrap();
        let third = handler.handle(command("ada@third.net")).await.unwrap();

        assert_eq!(second.user.username().as_str(), "ada-2");
        assert_eq!(third.user.username().as_str(), "ada-3");
    }

    #[tokio::test]
    async fn handle_claimed_during_sign_up_moves_to_next_suffix() {
        let store = Arc::new(InMemoryStore::new());
        let bus = Arc::new(InMemoryEventBus::recording());
        handler(&store, &bus).handle(command("ada@example.com")).await.unwrap();
        handler(&store, &bus).handle(command("ada@other.org")).await.unwrap();

        let racing = SignUpHandler::new(
            Arc::new(StaleLookups(store.clone())),
            Arc::new(MockPasswordHasher),
            bus.clone(),
        );
        let result = racing.handle(command("ada@third.net")).await.unwrap();

        assert_eq!(result.user.username().as_str(), "ada-3");
        assert_eq!(store.user_count(), 3);
        assert_eq!(bus.events_of_type("user.registered.v1").len(), 3);
    }

    #[tokio::test]
    async fn reports_validation_errors_without_storing() {
        let store = Arc::new(InMemoryStore::new());
        let bus = Arc::new(InMemoryEventBus::recording());
        let mut cmd = command("ada@example.com");
        cmd.confirm_password = "different".to_string();

        let err = handler(&store, &bus).handle(cmd).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.field_errors["confirm_password"], vec![PASSWORDS_DO_NOT_MATCH]);
        assert_eq!(store.user_count(), 0);
        assert_eq!(bus.event_count(), 0);
    }

    #[tokio::test]
    async fn stored_user_is_findable_by_email() {
        let store = Arc::new(InMemoryStore::new());
        let bus = Arc::new(InMemoryEventBus::recording());
        handler(&store, &bus).handle(command("ada@example.com")).await.unwrap();

        let email = Email::parse("ada@example.com").unwrap();
        let found = UserRepository::find_by_email(store.as_ref(), &email).await.unwrap();
        assert!(found.is_some());
    }
}
