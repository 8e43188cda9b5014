use super::{create_test_service, create_test_service_with, draft, group_with_members, kickoff, register};
use crate::core::errors::ChikokuError;
use crate::core::models::event::Participation;
use crate::core::services::ServiceOptions;
use crate::infrastructure::storage::{EventStore, GroupStore, UserStore};
use std::collections::HashSet;

#[tokio::test]
async fn test_board_is_union_of_group_events() {
    let service = create_test_service();
    let alice = register(&service, "alice").await;
    let bob = register(&service, "bob").await;
    let a = group_with_members(&service, "A", &alice, &[]).await;
    let b = group_with_members(&service, "B", &bob, &[]).await;
    let e1 = service.create_event(draft("e1", &alice, kickoff()), &a.id).await.unwrap();
    let e2 = service.create_event(draft("e2", &alice, kickoff()), &a.id).await.unwrap();
    let e3 = service.create_event(draft("e3", &bob, kickoff()), &b.id).await.unwrap();

    let board = service.build_event_board(&[a.id.clone(), b.id.clone()]).await.unwrap();

    assert_eq!(board.len(), 3);
    let ids: HashSet<&str> = board.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, HashSet::from([e1.id.as_str(), e2.id.as_str(), e3.id.as_str()]));

    // events of one group keep the group's order
    let a_events: Vec<&str> = board
        .iter()
        .filter(|e| e.group_id == a.id)
        .map(|e| e.id.as_str())
        .collect();
    assert_eq!(a_events, vec![e1.id.as_str(), e2.id.as_str()]);

    let third = board.iter().find(|e| e.id == e3.id).unwrap();
    assert_eq!(third.group_name, "B");
    assert_eq!(third.title, "e3");
    assert_eq!(third.author.as_ref().map(|a| a.name.as_str()), Some("bob"));
    assert!(third.options.is_empty());
}

#[tokio::test]
async fn test_board_fails_on_dangling_event_reference() {
    let service = create_test_service();
    let alice = register(&service, "alice").await;
    let bob = register(&service, "bob").await;
    let a = group_with_members(&service, "A", &alice, &[]).await;
    let b = group_with_members(&service, "B", &bob, &[]).await;
    service.create_event(draft("e1", &alice, kickoff()), &a.id).await.unwrap();
    service.create_event(draft("e2", &alice, kickoff()), &a.id).await.unwrap();

    let mut group_b = service.get_group(&b.id).await.unwrap();
    group_b.events.push("e3".to_string());
    service.storage().update_group(group_b).await.unwrap();

    let result = service.build_event_board(&[a.id.clone(), b.id.clone()]).await;
    match result {
        Err(ChikokuError::AggregationFailure(inner)) => {
            assert!(matches!(inner.as_ref(), ChikokuError::EventNotFound(id) if id == "e3"))
        }
        other => panic!("expected aggregation failure, got {:?}", other.map(|b| b.len())),
    }
}

#[tokio::test]
async fn test_board_fails_on_unknown_group_with_serial_fan_out() {
    let service = create_test_service_with(ServiceOptions {
        board_concurrency: 1,
        max_update_retries: 5,
    });
    let alice = register(&service, "alice").await;
    let a = group_with_members(&service, "A", &alice, &[]).await;
    service.create_event(draft("e1", &alice, kickoff()), &a.id).await.unwrap();

    let result = service
        .build_event_board(&[a.id.clone(), "missing".to_string()])
        .await;
    assert!(matches!(
        result,
        Err(ChikokuError::AggregationFailure(inner)) if matches!(*inner, ChikokuError::GroupNotFound(_))
    ));

    assert!(service.build_event_board(&[]).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_board_options_group_votes_in_first_seen_order() {
    let service = create_test_service();
    let manager = register(&service, "manager").await;
    let bob = register(&service, "bob").await;
    let carol = register(&service, "carol").await;
    let dave = register(&service, "dave").await;
    let group = group_with_members(&service, "Runners", &manager, &[&bob, &carol, &dave]).await;
    let event = service
        .create_event(draft("Picnic", &manager, kickoff()), &group.id)
        .await
        .unwrap();

    service.record_vote(&bob.id, &event.id, Participation::vote("no")).await.unwrap();
    service.record_vote(&carol.id, &event.id, Participation::vote("yes")).await.unwrap();
    service.record_vote(&dave.id, &event.id, Participation::vote("no")).await.unwrap();

    // dave's record stays on the event but the user no longer resolves
    service.storage().delete_user(&dave.id).await.unwrap();

    let board = service.build_event_board(&[group.id.clone()]).await.unwrap();
    let options = &board[0].options;
    let titles: Vec<&str> = options.iter().map(|o| o.title.as_str()).collect();
    assert_eq!(titles, vec!["no", "yes"]);

    assert_eq!(options[0].participant_count, 2);
    assert_eq!(options[0].participants.len(), 1);
    assert_eq!(options[0].participants[0].user_id, bob.id);
    assert_eq!(options[0].participants[0].user_name, "bob");

    assert_eq!(options[1].participant_count, 1);
    assert_eq!(options[1].participants[0].user_id, carol.id);
}

#[tokio::test]
async fn test_board_author_is_optional() {
    let service = create_test_service();
    let manager = register(&service, "manager").await;
    let bob = register(&service, "bob").await;
    let group = group_with_members(&service, "Runners", &manager, &[&bob]).await;
    let event = service
        .create_event(draft("Picnic", &bob, kickoff()), &group.id)
        .await
        .unwrap();

    service.storage().delete_user(&bob.id).await.unwrap();

    let board = service.build_event_board(&[group.id.clone()]).await.unwrap();
    assert_eq!(board.len(), 1);
    assert_eq!(board[0].id, event.id);
    assert!(board[0].author.is_none());
    assert_eq!(board[0].location_name, "Station");
    assert_eq!(board[0].cost, 500);
}

#[tokio::test]
async fn test_board_reads_do_not_mutate_events() {
    let service = create_test_service();
    let manager = register(&service, "manager").await;
    let group = group_with_members(&service, "Runners", &manager, &[]).await;
    let event = service
        .create_event(draft("Picnic", &manager, kickoff()), &group.id)
        .await
        .unwrap();

    service.build_event_board(&[group.id.clone()]).await.unwrap();

    let stored = service.storage().find_event_by_id(&event.id).await.unwrap().unwrap();
    assert_eq!(stored.version, event.version);
}
