use anyhow::Result;
use cloudsafe_core::{BackendType, LinkOutcome, LinkPayload, SyncFrequency};
use cloudsafe_provider::Error as ProviderError;
use cloudsafe_sdk::{Error, LinkActivity};
use cloudsafe_store::{FileLinkState, LinkStateStorage};
use cloudsafe_test_utils::{
    mock_clients, new_app, new_app_with_link_state, MockAuth,
};
use tempfile::tempdir;

#[tokio::test]
async fn link_completes_in_turn() -> Result<()> {
    let clients = mock_clients();
    let app = new_app(&clients);
    app.start().await?;

    let activity = app.link_account(BackendType::Drive).await?;
    assert!(matches!(activity, LinkActivity::TaskStarted(_)));
    app.tracker().wait_idle().await;

    let accounts = app.accounts().await?;
    assert_eq!(1, accounts.len());
    assert_eq!(BackendType::Drive, accounts[0].backend);
    assert_eq!("drive user", accounts[0].display_name);
    assert!(accounts[0].authorized);

    let provider = app.registry().get(BackendType::Drive)?;
    assert!(provider.is_account_authorized());

    Ok(())
}

#[tokio::test]
async fn link_external_creates_account() -> Result<()> {
    let clients = mock_clients();
    let app = new_app(&clients);
    app.start().await?;

    let activity = app.link_account(BackendType::Dropbox).await?;
    let LinkActivity::Pending(token) = activity else {
        panic!("expected a pending link");
    };
    // Nothing written until the flow resolves
    assert!(app.accounts().await?.is_empty());

    let payload = LinkPayload::new("dropbox user", "token");
    let task_id = app
        .complete_link(
            BackendType::Dropbox,
            token,
            LinkOutcome::Success,
            Some(payload),
        )
        .await?;
    assert!(task_id.is_some());
    app.tracker().wait_idle().await;

    let accounts = app.accounts().await?;
    assert_eq!(1, accounts.len());
    assert_eq!(BackendType::Dropbox, accounts[0].backend);
    assert_eq!("dropbox user", accounts[0].display_name);
    assert!(accounts[0].authorized);

    Ok(())
}

#[tokio::test]
async fn link_completion_is_idempotent() -> Result<()> {
    let clients = mock_clients();
    let app = new_app(&clients);
    app.start().await?;

    let LinkActivity::Pending(token) =
        app.link_account(BackendType::Dropbox).await?
    else {
        panic!("expected a pending link");
    };

    let payload = LinkPayload::new("dropbox user", "token");
    let first = app
        .complete_link(
            BackendType::Dropbox,
            token,
            LinkOutcome::Success,
            Some(payload.clone()),
        )
        .await?;
    assert!(first.is_some());
    app.tracker().wait_idle().await;

    // Duplicate delivery of the same result resolves to nothing
    let second = app
        .complete_link(
            BackendType::Dropbox,
            token,
            LinkOutcome::Success,
            Some(payload),
        )
        .await?;
    assert!(second.is_none());

    assert_eq!(1, app.accounts().await?.len());

    Ok(())
}

#[tokio::test]
async fn pending_link_supersession() -> Result<()> {
    let clients = mock_clients();
    let app = new_app(&clients);
    app.start().await?;

    let LinkActivity::Pending(first) =
        app.link_account(BackendType::Dropbox).await?
    else {
        panic!("expected a pending link");
    };
    let LinkActivity::Pending(second) =
        app.link_account(BackendType::Dropbox).await?
    else {
        panic!("expected a pending link");
    };
    assert_ne!(first, second);

    // Resume resolves the newest attempt only
    let task_ids = app.resume().await?;
    assert_eq!(1, task_ids.len());
    app.tracker().wait_idle().await;

    assert_eq!(vec![second], clients.dropbox.completed_tokens());
    assert_eq!(1, app.accounts().await?.len());

    // The pending record was consumed
    assert!(app
        .coordinator()
        .link_state()
        .load_pending(BackendType::Dropbox)
        .await?
        .is_none());

    // The superseded token no longer resolves
    let stale = app
        .complete_link(
            BackendType::Dropbox,
            first,
            LinkOutcome::Success,
            None,
        )
        .await?;
    assert!(stale.is_none());

    Ok(())
}

#[tokio::test]
async fn pending_link_survives_restart() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("pending.json");

    let clients = mock_clients();
    let app =
        new_app_with_link_state(&clients, FileLinkState::new(&path));
    app.start().await?;
    let LinkActivity::Pending(token) =
        app.link_account(BackendType::Dropbox).await?
    else {
        panic!("expected a pending link");
    };
    app.shutdown().await;
    drop(app);

    // A fresh application over the same durable state; the
    // providers know nothing of the earlier attempt.
    let clients = mock_clients();
    let app =
        new_app_with_link_state(&clients, FileLinkState::new(&path));
    app.start().await?;

    let task_ids = app.resume().await?;
    assert_eq!(1, task_ids.len());
    app.tracker().wait_idle().await;

    assert_eq!(vec![token], clients.dropbox.completed_tokens());
    let accounts = app.accounts().await?;
    assert_eq!(1, accounts.len());
    assert_eq!(BackendType::Dropbox, accounts[0].backend);
    assert!(accounts[0].authorized);

    // The record was consumed
    assert!(app
        .coordinator()
        .link_state()
        .load_pending(BackendType::Dropbox)
        .await?
        .is_none());

    Ok(())
}

#[tokio::test]
async fn rejected_link_writes_nothing() -> Result<()> {
    let clients = mock_clients();
    let app = new_app(&clients);
    app.start().await?;

    let LinkActivity::Pending(token) =
        app.link_account(BackendType::Onedrive).await?
    else {
        panic!("expected a pending link");
    };
    let task_id = app
        .complete_link(
            BackendType::Onedrive,
            token,
            LinkOutcome::Cancelled,
            None,
        )
        .await?;
    assert!(task_id.is_none());

    assert!(app.accounts().await?.is_empty());
    let provider = app.registry().get(BackendType::Onedrive)?;
    assert!(!provider.is_account_authorized());

    Ok(())
}

#[tokio::test]
async fn failed_link_start_resets_provider() -> Result<()> {
    let clients = mock_clients();
    clients.drive.set_auth(MockAuth::Unreachable);
    let app = new_app(&clients);
    app.start().await?;

    let error = app
        .link_account(BackendType::Drive)
        .await
        .expect_err("link start must fail");
    assert!(matches!(
        error,
        Error::Provider(ProviderError::LinkStart { .. })
    ));

    let provider = app.registry().get(BackendType::Drive)?;
    assert!(!provider.is_account_authorized());

    // The provider recovers once the backend is reachable again
    clients.drive.set_auth(MockAuth::Completed {
        outcome: LinkOutcome::Success,
        payload: Some(LinkPayload::new("drive user", "token")),
    });
    let activity = app.link_account(BackendType::Drive).await?;
    assert!(matches!(activity, LinkActivity::TaskStarted(_)));
    app.tracker().wait_idle().await;
    assert_eq!(1, app.accounts().await?.len());

    Ok(())
}

#[tokio::test]
async fn relink_preserves_account_settings() -> Result<()> {
    let clients = mock_clients();
    let app = new_app(&clients);
    app.start().await?;

    app.link_account(BackendType::Drive).await?;
    app.tracker().wait_idle().await;
    let account_id = app.accounts().await?[0].account_id;

    app.set_sync_frequency(account_id, SyncFrequency::Weekly)
        .await?;
    app.tracker().wait_idle().await;

    // Linking again replaces identity fields only
    app.link_account(BackendType::Drive).await?;
    app.tracker().wait_idle().await;

    let accounts = app.accounts().await?;
    assert_eq!(1, accounts.len());
    assert_eq!(account_id, accounts[0].account_id);
    assert_eq!(SyncFrequency::Weekly, accounts[0].sync_frequency);

    Ok(())
}
