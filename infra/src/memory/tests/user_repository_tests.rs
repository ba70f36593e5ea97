//! Tests for the in-memory user directory

use ak_core::domain::entities::user::NewUser;
use ak_core::errors::{AuthError, DomainError};
use ak_core::repositories::UserRepository;

use crate::memory::InMemoryUserRepository;

#[tokio::test]
async fn test_create_assigns_sequential_ids() {
    let repo = InMemoryUserRepository::new();

    let first = repo.create(NewUser::new("a", "a@example.com", "h")).await.unwrap();
    let second = repo.create(NewUser::new("b", "b@example.com", "h")).await.unwrap();

    assert_eq!(first.id, 1);
    assert_eq!(second.id, 2);
    assert_eq!(repo.list().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_duplicate_email() {
    let repo = InMemoryUserRepository::new();
    repo.create(NewUser::new("a", "a@example.com", "h")).await.unwrap();

    let result = repo.create(NewUser::new("b", "a@example.com", "h")).await;

    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::UserAlreadyExists))
    ));
    assert_eq!(repo.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_update_password() {
    let repo = InMemoryUserRepository::new();
    let user = repo.create(NewUser::new("a", "a@example.com", "old")).await.unwrap();

    assert!(repo.update_password(user.id, "new").await.unwrap());
    assert!(!repo.update_password(user.id + 1, "new").await.unwrap());
    assert_eq!(
        repo.find_by_email("a@example.com").await.unwrap().unwrap().password_hash,
        "new"
    );
}
