use super::*;

/// Tests joining an open giveaway.
///
/// Expected: Ok with participant recorded
#[tokio::test]
async fn adds_participant() -> Result<(), AppError> {
    let test = TestGiveaways::new();
    let giveaway = test.start("Gift Card", "1h", 1).await?;

    let outcome = test.service.join(giveaway.id, 2).await?;

    assert!(outcome.newly_added);
    assert_eq!(outcome.entry_count, 1);

    let stored = test.service.registry().get(giveaway.id).await.unwrap();
    assert_eq!(stored.entries, HashSet::from([2]));

    Ok(())
}

/// Tests that joining twice is a no-op.
///
/// Expected: Ok both times, entry count unchanged by the second call
#[tokio::test]
async fn joining_twice_is_idempotent() -> Result<(), AppError> {
    let test = TestGiveaways::new();
    let giveaway = test.start("Gift Card", "1h", 1).await?;

    let first = test.service.join(giveaway.id, 2).await?;
    let second = test.service.join(giveaway.id, 2).await?;

    assert!(first.newly_added);
    assert!(!second.newly_added);
    assert_eq!(first.entry_count, second.entry_count);

    Ok(())
}

/// Tests joining a giveaway that never existed.
///
/// Expected: Err(GiveawayNotFound)
#[tokio::test]
async fn unknown_giveaway_is_not_found() {
    let test = TestGiveaways::new();

    let result = test.service.join(GiveawayId(99), 2).await;

    assert!(matches!(
        result,
        Err(AppError::GiveawayErr(GiveawayError::GiveawayNotFound(GiveawayId(99))))
    ));
}

/// Tests joining after the giveaway was resolved.
///
/// Expected: Err(GiveawayNotFound)
#[tokio::test]
async fn resolved_giveaway_is_not_found() -> Result<(), AppError> {
    let test = TestGiveaways::new();
    let giveaway = test.start("Gift Card", "1h", 1).await?;
    test.service.resolve(giveaway.id).await;

    let result = test.service.join(giveaway.id, 2).await;

    assert!(matches!(
        result,
        Err(AppError::GiveawayErr(GiveawayError::GiveawayNotFound(_)))
    ));

    Ok(())
}

/// Tests joining while the giveaway is being resolved.
///
/// Expected: Err(GiveawayNotFound), entries unchanged
#[tokio::test]
async fn resolving_giveaway_rejects_entries() -> Result<(), AppError> {
    let test = TestGiveaways::new();
    let giveaway = test.start("Gift Card", "1h", 1).await?;
    test.service.join(giveaway.id, 2).await?;

    test.service.registry().begin_resolution(giveaway.id).await;
    let result = test.service.join(giveaway.id, 3).await;

    assert!(result.is_err());
    let stored = test.service.registry().get(giveaway.id).await.unwrap();
    assert_eq!(stored.state, GiveawayState::Resolving);
    assert_eq!(stored.entries, HashSet::from([2]));

    Ok(())
}

/// Tests many concurrent joins.
///
/// Expected: Every distinct participant recorded exactly once
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_joins_are_all_recorded() -> Result<(), AppError> {
    let test = TestGiveaways::new();
    let giveaway = test.start("Gift Card", "1h", 1).await?;

    let mut tasks = Vec::new();
    for user in 0..200u64 {
        let service = test.service.clone();
        let id = giveaway.id;
        // Every user joins twice
        tasks.push(tokio::spawn(async move { service.join(id, user % 100).await }));
    }
    for task in tasks {
        task.await.unwrap()?;
    }

    let stored = test.service.registry().get(giveaway.id).await.unwrap();
    assert_eq!(stored.entries.len(), 100);

    Ok(())
}
