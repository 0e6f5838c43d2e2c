use anyhow::Result;
use cloudsafe_core::{BackendType, SyncStatus};
use cloudsafe_provider::Error as ProviderError;
use cloudsafe_sdk::Error;
use cloudsafe_test_utils::{
    mock_clients, new_app, ObservedEvent, RecordingObserver,
};
use tokio::sync::mpsc;

async fn next_status(
    receiver: &mut mpsc::UnboundedReceiver<ObservedEvent>,
) -> SyncStatus {
    loop {
        match receiver.recv().await {
            Some(ObservedEvent::Status(status)) => return status,
            Some(_) => continue,
            None => panic!("event channel closed"),
        }
    }
}

#[tokio::test]
async fn sync_requires_authorization() -> Result<()> {
    let clients = mock_clients();
    let app = new_app(&clients);
    app.start().await?;

    let (observer, mut events) = RecordingObserver::new();
    app.set_observer(Some(observer))?;
    assert_eq!(SyncStatus::Ok, next_status(&mut events).await);

    // No linked account; the request is rejected locally
    app.sync_account(BackendType::Drive, true).await?;
    assert_eq!(SyncStatus::AuthRequired, next_status(&mut events).await);
    assert!(clients.drive.sync_requests().is_empty());

    app.link_account(BackendType::Drive).await?;
    app.tracker().wait_idle().await;
    assert_eq!(SyncStatus::Ok, next_status(&mut events).await);

    app.sync_account(BackendType::Drive, true).await?;
    app.sync_account(BackendType::Drive, false).await?;
    assert_eq!(vec![true, false], clients.drive.sync_requests());
    assert_eq!(SyncStatus::Ok, next_status(&mut events).await);
    assert_eq!(SyncStatus::Ok, next_status(&mut events).await);
    assert_eq!(SyncStatus::Ok, app.latest_status());

    Ok(())
}

#[tokio::test]
async fn resume_without_pending_links_is_empty() -> Result<()> {
    let clients = mock_clients();
    let app = new_app(&clients);
    app.start().await?;

    assert!(app.resume().await?.is_empty());
    assert!(clients.dropbox.completed_tokens().is_empty());

    Ok(())
}

#[tokio::test]
async fn shutdown_closes_the_registry() -> Result<()> {
    let clients = mock_clients();
    let app = new_app(&clients);
    app.start().await?;
    app.shutdown().await;

    let error = app
        .link_account(BackendType::Drive)
        .await
        .expect_err("registry must be closed");
    assert!(matches!(
        error,
        Error::Provider(ProviderError::RegistryClosed)
    ));

    Ok(())
}
