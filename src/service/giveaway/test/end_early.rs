use super::*;

/// Tests the host ending their own giveaway.
///
/// Verifies that the pending trigger is canceled and the giveaway is resolved and
/// removed right away.
///
/// Expected: Ok with resolution, trigger canceled, registry empty
#[tokio::test]
async fn host_can_end_early() -> Result<(), AppError> {
    let test = TestGiveaways::new();
    let giveaway = test.start("Gift Card", "1h", 1).await?;
    let handle = giveaway.completion_handle.unwrap();
    test.service.join(giveaway.id, 2).await?;

    let resolution = test.service.end_early(giveaway.id, host()).await?;

    assert_eq!(resolution.outcome, GiveawayOutcome::Winners(vec![2]));
    assert!(test.timer.canceled().contains(&handle));
    assert_eq!(test.timer.pending_count(), 0);
    assert!(test.service.registry().get(giveaway.id).await.is_none());
    assert_eq!(test.notifier.resolutions().len(), 1);

    Ok(())
}

/// Tests staff ending someone else's giveaway.
///
/// Expected: Ok with resolution
#[tokio::test]
async fn staff_can_end_early() -> Result<(), AppError> {
    let test = TestGiveaways::new();
    let giveaway = test.start("Gift Card", "1h", 1).await?;

    let resolution = test.service.end_early(giveaway.id, staff(77)).await?;

    assert_eq!(resolution.outcome, GiveawayOutcome::NoEntries);
    assert!(test.service.registry().is_empty().await);

    Ok(())
}

/// Tests a regular member trying to end a giveaway.
///
/// Verifies that the request is denied and the giveaway keeps running untouched,
/// including its pending trigger.
///
/// Expected: Err(PermissionDenied), giveaway still open
#[tokio::test]
async fn non_host_is_denied() -> Result<(), AppError> {
    let test = TestGiveaways::new();
    let giveaway = test.start("Gift Card", "1h", 1).await?;
    test.service.join(giveaway.id, 2).await?;

    let result = test.service.end_early(giveaway.id, member(2)).await;

    assert!(matches!(
        result,
        Err(AppError::GiveawayErr(GiveawayError::PermissionDenied {
            requester_id: 2,
            ..
        }))
    ));

    let stored = test.service.registry().get(giveaway.id).await.unwrap();
    assert_eq!(stored, giveaway_with_entries(&giveaway, &[2]));
    assert_eq!(test.timer.pending_count(), 1);
    assert!(test.timer.canceled().is_empty());
    assert!(test.notifier.resolutions().is_empty());

    // The host can still end it afterwards
    test.service.end_early(giveaway.id, host()).await?;
    assert!(test.service.registry().is_empty().await);

    Ok(())
}

/// Tests ending a giveaway that does not exist.
///
/// Expected: Err(GiveawayNotFound)
#[tokio::test]
async fn unknown_giveaway_is_not_found() {
    let test = TestGiveaways::new();

    let result = test.service.end_early(GiveawayId(5), host()).await;

    assert!(matches!(
        result,
        Err(AppError::GiveawayErr(GiveawayError::GiveawayNotFound(_)))
    ));
}

/// Tests ending a giveaway twice.
///
/// Expected: Ok then Err(GiveawayNotFound), one announcement
#[tokio::test]
async fn second_end_is_not_found() -> Result<(), AppError> {
    let test = TestGiveaways::new();
    let giveaway = test.start("Gift Card", "1h", 1).await?;

    test.service.end_early(giveaway.id, host()).await?;
    let result = test.service.end_early(giveaway.id, host()).await;

    assert!(matches!(
        result,
        Err(AppError::GiveawayErr(GiveawayError::GiveawayNotFound(_)))
    ));
    assert_eq!(test.notifier.resolutions().len(), 1);

    Ok(())
}

/// Tests the timer firing after an early end.
///
/// Simulates a trigger that was already in flight when the giveaway was ended: the
/// callback is taken out of the timer before the early end and run afterwards.
///
/// Expected: The late trigger is a no-op, one announcement
#[tokio::test]
async fn in_flight_timer_after_early_end_is_noop() -> Result<(), AppError> {
    let test = TestGiveaways::new();
    let giveaway = test.start("Gift Card", "1h", 1).await?;
    test.service.join(giveaway.id, 2).await?;
    let in_flight = test.timer.take(giveaway.completion_handle.unwrap()).unwrap();

    test.service.end_early(giveaway.id, host()).await?;
    in_flight().await;

    assert_eq!(test.notifier.resolutions().len(), 1);
    assert_eq!(test.notifier.audits().len(), 1);

    Ok(())
}

/// Tests the timer and an early end racing on separate threads.
///
/// Expected: Exactly one resolution announced every round
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn racing_timer_and_early_end_resolve_once() -> Result<(), AppError> {
    for _ in 0..50 {
        let test = TestGiveaways::new();
        let giveaway = test.start("Gift Card", "1h", 1).await?;
        test.join_all(giveaway.id, &[2, 3]).await;
        let in_flight = test.timer.take(giveaway.completion_handle.unwrap()).unwrap();

        let service = test.service.clone();
        let id = giveaway.id;
        let timer_task = tokio::spawn(async move { in_flight().await });
        let end_task = tokio::spawn(async move { service.end_early(id, host()).await });

        timer_task.await.unwrap();
        let ended = end_task.await.unwrap();

        assert_eq!(test.notifier.resolutions().len(), 1);
        match ended {
            Ok(resolution) => assert_eq!(resolution, test.notifier.resolutions()[0]),
            Err(err) => assert!(matches!(
                err,
                AppError::GiveawayErr(GiveawayError::GiveawayNotFound(_))
            )),
        }
        assert!(test.service.registry().is_empty().await);
    }

    Ok(())
}

fn giveaway_with_entries(giveaway: &Giveaway, entries: &[u64]) -> Giveaway {
    let mut expected = giveaway.clone();
    expected.entries = entries.iter().copied().collect();
    expected
}
