use anyhow::Result;
use cloudsafe_core::SyncStatus;
use cloudsafe_events::StatusHub;
use cloudsafe_test_utils::{ObservedEvent, RecordingObserver};
use tokio::sync::oneshot;

#[tokio::test]
async fn attach_replays_latest_status() -> Result<()> {
    let hub = StatusHub::new();

    // Reported with no observer attached; only the cache sees it
    hub.report(SyncStatus::PendingAuth)?;

    let (observer, mut events) = RecordingObserver::new();
    hub.set_observer(Some(observer))?;

    assert_eq!(
        Some(ObservedEvent::Status(SyncStatus::PendingAuth)),
        events.recv().await
    );
    assert_eq!(SyncStatus::PendingAuth, hub.latest());

    hub.report(SyncStatus::Ok)?;
    assert_eq!(
        Some(ObservedEvent::Status(SyncStatus::Ok)),
        events.recv().await
    );
    assert_eq!(SyncStatus::Ok, hub.latest());

    Ok(())
}

#[tokio::test]
async fn reports_are_delivered_in_order() -> Result<()> {
    let hub = StatusHub::new();
    let (observer, mut events) = RecordingObserver::new();
    hub.set_observer(Some(observer))?;
    assert_eq!(
        Some(ObservedEvent::Status(SyncStatus::Ok)),
        events.recv().await
    );

    // Two reporting contexts, sequenced by a handshake
    let (tx, rx) = oneshot::channel();
    let first = hub.clone();
    let second = hub.clone();
    let task = tokio::spawn(async move {
        first.report(SyncStatus::AuthRequired)?;
        tx.send(()).map_err(|_| anyhow::anyhow!("receiver gone"))?;
        Ok::<_, anyhow::Error>(())
    });
    tokio::spawn(async move {
        rx.await?;
        second.report(SyncStatus::Ok)?;
        Ok::<_, anyhow::Error>(())
    });
    task.await??;

    assert_eq!(
        Some(ObservedEvent::Status(SyncStatus::AuthRequired)),
        events.recv().await
    );
    assert_eq!(
        Some(ObservedEvent::Status(SyncStatus::Ok)),
        events.recv().await
    );
    assert_eq!(SyncStatus::Ok, hub.latest());

    Ok(())
}

#[tokio::test]
async fn replacing_the_observer_redirects_delivery() -> Result<()> {
    let hub = StatusHub::new();

    let (first, mut first_events) = RecordingObserver::new();
    hub.set_observer(Some(first))?;
    assert_eq!(
        Some(ObservedEvent::Status(SyncStatus::Ok)),
        first_events.recv().await
    );

    // Detach; reports only update the cache
    hub.set_observer(None)?;
    hub.report(SyncStatus::AuthRequired)?;

    let (second, mut second_events) = RecordingObserver::new();
    hub.set_observer(Some(second))?;
    assert_eq!(
        Some(ObservedEvent::Status(SyncStatus::AuthRequired)),
        second_events.recv().await
    );

    hub.report(SyncStatus::Ok)?;
    assert_eq!(
        Some(ObservedEvent::Status(SyncStatus::Ok)),
        second_events.recv().await
    );

    // The detached observer saw nothing past its replay
    assert!(first_events.try_recv().is_err());

    Ok(())
}
