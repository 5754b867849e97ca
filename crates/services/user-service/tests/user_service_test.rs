//! End-to-end service behavior over the in-memory store.

use std::sync::Arc;

use common::AppError;
use domain::{Action, Role, Status, UpdateAction, UpdateRoles, UpdateStatus, UserInput};
use user_service_lib::repository::InMemoryUserStore;
use user_service_lib::service::{UserManager, UserService};

fn service() -> UserManager {
    UserManager::new(Arc::new(InMemoryUserStore::new()))
}

fn input(name: &str, email: &str, roles: Vec<Role>) -> UserInput {
    UserInput::new(name, email, roles)
}

#[tokio::test]
async fn created_user_can_be_fetched_back() {
    let service = service();

    let created = service
        .add_user(input("  Dana  ", "Dana@Example.com", vec![Role::Clinician]))
        .await
        .unwrap();
    let fetched = service.get_user_by_id(created.id).await.unwrap().unwrap();

    assert!(created.id > 0);
    assert_eq!(fetched, created);
    assert_eq!(fetched.name, "Dana");
    assert_eq!(fetched.email, "dana@example.com");
    assert_eq!(fetched.status, Status::None);
    assert_eq!(fetched.action, Action::None);
}

#[tokio::test]
async fn ids_are_unique_and_listed() {
    let service = service();

    let a = service.add_user(input("A", "a@example.com", vec![])).await.unwrap();
    let b = service.add_user(input("B", "b@example.com", vec![])).await.unwrap();

    assert_ne!(a.id, b.id);
    let ids: Vec<_> = service.get_all_users().await.unwrap().iter().map(|u| u.id).collect();
    assert_eq!(ids, vec![a.id, b.id]);
}

#[tokio::test]
async fn invalid_input_creates_nothing() {
    let service = service();

    let result = service
        .add_user(input(&"x".repeat(101), "not-an-email", vec![Role::Staff]))
        .await;

    match result {
        Err(AppError::ValidationFailed(errors)) => assert_eq!(errors.len(), 2),
        other => panic!("expected validation failure, got {:?}", other),
    }
    assert!(service.get_all_users().await.unwrap().is_empty());
}

#[tokio::test]
async fn deleted_user_is_gone() {
    let service = service();
    let created = service.add_user(input("A", "a@example.com", vec![])).await.unwrap();

    service.delete_user(created.id).await.unwrap();

    assert!(service.get_user_by_id(created.id).await.unwrap().is_none());
    assert!(matches!(
        service.delete_user(created.id).await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn role_replacement_is_total() {
    let service = service();
    let created = service
        .add_user(input("A", "a@example.com", vec![Role::Clinician, Role::Staff]))
        .await
        .unwrap();

    service
        .update_user_role(UpdateRoles {
            id: created.id,
            roles: vec![Role::Patient],
        })
        .await
        .unwrap();

    let user = service.get_user_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(user.roles, vec![Role::Patient]);
}

#[tokio::test]
async fn status_and_action_changes_touch_nothing_else() {
    let service = service();
    let created = service
        .add_user(input("A", "a@example.com", vec![Role::Staff]))
        .await
        .unwrap();

    service
        .update_user_status(UpdateStatus {
            id: created.id,
            status: Status::Invited,
        })
        .await
        .unwrap();
    service
        .update_user_action(UpdateAction {
            id: created.id,
            action: Action::ResendInvite,
        })
        .await
        .unwrap();

    let user = service.get_user_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(user.status, Status::Invited);
    assert_eq!(user.action, Action::ResendInvite);
    assert_eq!(user.name, created.name);
    assert_eq!(user.email, created.email);
    assert_eq!(user.roles, created.roles);
    assert_eq!(user.created_at, created.created_at);
}

#[tokio::test]
async fn update_user_keeps_lifecycle_fields() {
    let service = service();
    let created = service
        .add_user(input("A", "a@example.com", vec![Role::Clinician]))
        .await
        .unwrap();
    service
        .update_user_status(UpdateStatus {
            id: created.id,
            status: Status::Active,
        })
        .await
        .unwrap();

    let updated = service
        .update_user(input("B", "B@example.com", vec![Role::Staff]).with_id(created.id))
        .await
        .unwrap();

    assert_eq!(updated.name, "B");
    assert_eq!(updated.email, "b@example.com");
    assert_eq!(updated.roles, vec![Role::Staff]);
    assert_eq!(updated.status, Status::Active);
    assert_eq!(updated.created_at, created.created_at);
}

#[tokio::test]
async fn operations_on_missing_users_fail_with_not_found() {
    let service = service();

    assert!(matches!(
        service.update_user(input("A", "a@example.com", vec![]).with_id(99)).await,
        Err(AppError::NotFound(99))
    ));
    assert!(matches!(
        service
            .update_user_status(UpdateStatus { id: 99, status: Status::Active })
            .await,
        Err(AppError::NotFound(99))
    ));
    assert!(matches!(
        service
            .update_user_role(UpdateRoles { id: 99, roles: vec![Role::Staff] })
            .await,
        Err(AppError::NotFound(99))
    ));
}

#[tokio::test]
async fn summary_counts_each_bucket_independently() {
    let service = service();
    let mut ids = Vec::new();
    for (name, roles) in [
        ("a", vec![Role::Clinician]),
        ("b", vec![Role::Clinician, Role::Staff]),
        ("c", vec![Role::Staff]),
        ("d", vec![Role::Patient]),
    ] {
        let created = service
            .add_user(input(name, &format!("{}@example.com", name), roles))
            .await
            .unwrap();
        ids.push(created.id);
    }
    service
        .update_user_status(UpdateStatus {
            id: ids[1],
            status: Status::Deactive,
        })
        .await
        .unwrap();

    let summary = service.get_summary().await.unwrap();

    assert_eq!(summary.clinician_count, 2);
    assert_eq!(summary.staff_count, 2);
    assert_eq!(summary.deactivated_clinician_count, 1);
}

#[tokio::test]
async fn empty_store_summary_is_zero() {
    let summary = service().get_summary().await.unwrap();

    assert_eq!(summary.clinician_count, 0);
    assert_eq!(summary.staff_count, 0);
    assert_eq!(summary.deactivated_clinician_count, 0);
}
