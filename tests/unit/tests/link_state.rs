use anyhow::Result;
use cloudsafe_core::{BackendType, RequestToken};
use cloudsafe_store::{FileLinkState, LinkStateStorage, PendingLink};
use tempfile::tempdir;

#[tokio::test]
async fn pending_links_survive_reopening() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("pending.json");

    let token = RequestToken::random();
    {
        let state = FileLinkState::new(&path);
        state
            .save_pending(PendingLink::new(BackendType::Dropbox, token))
            .await?;
    }

    // A fresh instance reads the same document
    let state = FileLinkState::new(&path);
    let pending = state
        .load_pending(BackendType::Dropbox)
        .await?
        .expect("pending link must survive");
    assert_eq!(token, pending.token);
    assert_eq!(BackendType::Dropbox, pending.backend);

    // Taking consumes the record exactly once
    let taken = state.take_pending(BackendType::Dropbox).await?;
    assert_eq!(Some(pending), taken);
    assert!(state.take_pending(BackendType::Dropbox).await?.is_none());

    Ok(())
}

#[tokio::test]
async fn saving_supersedes_the_previous_attempt() -> Result<()> {
    let dir = tempdir()?;
    let state = FileLinkState::new(dir.path().join("pending.json"));

    let first = RequestToken::random();
    let second = RequestToken::random();
    state
        .save_pending(PendingLink::new(BackendType::Onedrive, first))
        .await?;
    state
        .save_pending(PendingLink::new(BackendType::Onedrive, second))
        .await?;

    let pending = state
        .load_pending(BackendType::Onedrive)
        .await?
        .expect("pending link must exist");
    assert_eq!(second, pending.token);

    Ok(())
}

#[tokio::test]
async fn backends_are_tracked_independently() -> Result<()> {
    let dir = tempdir()?;
    let state = FileLinkState::new(dir.path().join("pending.json"));

    let dropbox = RequestToken::random();
    let onedrive = RequestToken::random();
    state
        .save_pending(PendingLink::new(BackendType::Dropbox, dropbox))
        .await?;
    state
        .save_pending(PendingLink::new(BackendType::Onedrive, onedrive))
        .await?;

    state.clear_pending(BackendType::Dropbox).await?;
    assert!(state.load_pending(BackendType::Dropbox).await?.is_none());

    let pending = state
        .take_pending(BackendType::Onedrive)
        .await?
        .expect("pending link must exist");
    assert_eq!(onedrive, pending.token);

    Ok(())
}

#[tokio::test]
async fn missing_file_is_empty_state() -> Result<()> {
    let dir = tempdir()?;
    let state = FileLinkState::new(dir.path().join("does-not-exist.json"));

    assert!(state.load_pending(BackendType::Drive).await?.is_none());
    assert!(state.take_pending(BackendType::Drive).await?.is_none());
    state.clear_pending(BackendType::Drive).await?;

    Ok(())
}
