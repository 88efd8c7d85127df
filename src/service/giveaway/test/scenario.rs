use super::*;
use crate::scheduler::giveaway_timer::CronResolutionTimer;

/// Tests a full giveaway resolved by its timer.
///
/// Creates a one hour giveaway with two winners, has two users join (one of them
/// twice), then fires the timer.
///
/// Expected: Both entrants win, resolved once, record removed
#[tokio::test]
async fn timer_resolves_gift_card_giveaway() -> Result<(), AppError> {
    let test = TestGiveaways::new();
    let giveaway = test.start("Gift Card", "1h", 2).await?;

    test.service.join(giveaway.id, 2).await?;
    test.service.join(giveaway.id, 3).await?;
    let duplicate = test.service.join(giveaway.id, 2).await?;
    assert_eq!(duplicate.entry_count, 2);

    assert!(test.timer.fire(giveaway.completion_handle.unwrap()).await);

    let resolutions = test.notifier.resolutions();
    assert_eq!(resolutions.len(), 1);
    let winners: HashSet<u64> = resolutions[0].winners().iter().copied().collect();
    assert_eq!(winners, HashSet::from([2, 3]));
    assert!(test.service.registry().is_empty().await);

    Ok(())
}

/// Tests the same giveaway ended early by its host instead.
///
/// Expected: Both entrants win, the timer never fires afterwards
#[tokio::test]
async fn host_ends_gift_card_giveaway() -> Result<(), AppError> {
    let test = TestGiveaways::new();
    let giveaway = test.start("Gift Card", "1h", 2).await?;
    test.join_all(giveaway.id, &[2, 3, 2]).await;

    let resolution = test.service.end_early(giveaway.id, host()).await?;

    let winners: HashSet<u64> = resolution.winners().iter().copied().collect();
    assert_eq!(winners, HashSet::from([2, 3]));
    assert!(!test.timer.fire(giveaway.completion_handle.unwrap()).await);
    assert_eq!(test.notifier.resolutions().len(), 1);

    Ok(())
}

/// Tests natural timeout through the real job scheduler.
///
/// Expected: Giveaway resolved and removed shortly after its one second duration
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn cron_timer_resolves_after_duration() -> Result<(), AppError> {
    let notifier = Arc::new(RecordingNotifier::default());
    let timer = Arc::new(CronResolutionTimer::start().await?);
    let service = GiveawayService::new(GiveawayRegistry::new(), timer.clone(), notifier.clone());

    let giveaway = service
        .create(CreateGiveawayParams {
            prize: "Gift Card".to_string(),
            duration: "1s".to_string(),
            winner_count: 1,
            host_id: HOST,
            channel_id: CHANNEL,
        })
        .await?;
    service.join(giveaway.id, 2).await?;

    for _ in 0..100 {
        if service.registry().is_empty().await {
            break;
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }

    assert!(service.registry().is_empty().await);
    let resolutions = notifier.resolutions();
    assert_eq!(resolutions.len(), 1);
    assert_eq!(resolutions[0].winners(), &[2]);

    timer.shutdown().await?;

    Ok(())
}
