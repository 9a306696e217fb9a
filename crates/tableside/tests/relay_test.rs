use std::time::Duration;
use tableside::events::Event;
use tableside::model::{ClientId, MenuItemId, Role};
use tableside::relay::{
    Channel, DeliveryReport, Dispatcher, RegistryActor, RegistryClient, RelayError,
};
use tokio::sync::mpsc;

fn start_registry() -> RegistryClient {
    let (actor, client) = RegistryActor::new(16);
    tokio::spawn(actor.run());
    client
}

fn event() -> Event {
    Event::MenuItemAvailability {
        item_id: MenuItemId(1),
        available: false,
    }
}

async fn connect(
    registry: &RegistryClient,
    identity: ClientId,
    role: Role,
    buffer: usize,
) -> (Channel, mpsc::Receiver<std::sync::Arc<str>>) {
    let (channel, receiver) = Channel::open(buffer);
    registry
        .register(identity, role, channel.clone())
        .await
        .unwrap();
    (channel, receiver)
}

fn received(receiver: &mut mpsc::Receiver<std::sync::Arc<str>>) -> Vec<serde_json::Value> {
    let mut frames = Vec::new();
    while let Ok(frame) = receiver.try_recv() {
        frames.push(serde_json::from_str(&frame).unwrap());
    }
    frames
}

// --- Registry ---

#[tokio::test]
async fn test_channel_set_is_registers_minus_deregisters() {
    let registry = start_registry();
    let identity = ClientId::new_v4();

    let (a, _ra) = Channel::open(4);
    let (b, _rb) = Channel::open(4);
    let (c, _rc) = Channel::open(4);

    registry.register(identity, Role::Client, a.clone()).await.unwrap();
    registry.register(identity, Role::Client, b.clone()).await.unwrap();
    // Same channel twice is kept once.
    registry.register(identity, Role::Client, a.clone()).await.unwrap();
    registry.register(identity, Role::Client, c.clone()).await.unwrap();

    assert!(registry.deregister(identity, b.id()).await);
    // Idempotent.
    assert!(!registry.deregister(identity, b.id()).await);
    assert!(!registry.deregister(ClientId::new_v4(), a.id()).await);

    let ids: Vec<_> = registry
        .channels_for(identity)
        .await
        .unwrap()
        .iter()
        .map(Channel::id)
        .collect();
    assert_eq!(ids, vec![a.id(), c.id()]);
}

#[tokio::test]
async fn test_role_conflict_keeps_original_binding() {
    let registry = start_registry();
    let identity = ClientId::new_v4();
    let (first, _r1) = connect(&registry, identity, Role::Client, 4).await;

    let (intruder, _r2) = Channel::open(4);
    let err = registry
        .register(identity, Role::Admin, intruder.clone())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RelayError::RoleConflict {
            bound: Role::Client,
            requested: Role::Admin,
            ..
        }
    ));

    assert_eq!(registry.role_of(identity).await.unwrap(), Some(Role::Client));
    let ids: Vec<_> = registry
        .channels_for(identity)
        .await
        .unwrap()
        .iter()
        .map(Channel::id)
        .collect();
    assert_eq!(ids, vec![first.id()]);
    assert!(registry
        .channels_for_role(Some(Role::Admin))
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_role_binding_outlives_channels() {
    let registry = start_registry();
    let identity = ClientId::new_v4();
    let (channel, _rx) = connect(&registry, identity, Role::Admin, 4).await;

    registry.deregister(identity, channel.id()).await;
    assert!(registry.channels_for(identity).await.unwrap().is_empty());
    assert_eq!(registry.role_of(identity).await.unwrap(), Some(Role::Admin));

    let (other, _rx2) = Channel::open(4);
    assert!(registry.register(identity, Role::Client, other).await.is_err());
}

#[tokio::test]
async fn test_channels_for_role_filters_by_binding() {
    let registry = start_registry();
    let admin = ClientId::new_v4();
    let client = ClientId::new_v4();
    let (_a1, _ra1) = connect(&registry, admin, Role::Admin, 4).await;
    let (_a2, _ra2) = connect(&registry, admin, Role::Admin, 4).await;
    let (_c1, _rc1) = connect(&registry, client, Role::Client, 4).await;

    let admins = registry.channels_for_role(Some(Role::Admin)).await.unwrap();
    assert_eq!(admins.len(), 2);
    assert!(admins.iter().all(|(id, _)| *id == admin));

    assert_eq!(registry.channels_for_role(None).await.unwrap().len(), 3);
    assert_eq!(registry.role_of(ClientId::new_v4()).await.unwrap(), None);
}

// --- Delivery ---

#[tokio::test]
async fn test_broadcast_to_admins_skips_clients() {
    let registry = start_registry();
    let dispatcher = Dispatcher::new(registry.clone());
    let (_a, mut admin_rx) = connect(&registry, ClientId::new_v4(), Role::Admin, 4).await;
    let (_c, mut client_rx) = connect(&registry, ClientId::new_v4(), Role::Client, 4).await;

    let report = dispatcher.broadcast(&event(), Some(Role::Admin)).await;
    assert_eq!(
        report,
        DeliveryReport {
            delivered: 1,
            dropped: 0,
            failed: 0
        }
    );
    let frames = received(&mut admin_rx);
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0]["name"], "menu-item-availability");
    assert_eq!(frames[0]["detail"]["item_id"], 1);
    assert!(received(&mut client_rx).is_empty());

    let report = dispatcher.broadcast(&event(), None).await;
    assert_eq!(report.delivered, 2);
    assert_eq!(received(&mut admin_rx).len(), 1);
    assert_eq!(received(&mut client_rx).len(), 1);
}

#[tokio::test]
async fn test_failed_channel_is_removed_and_others_still_receive() {
    let registry = start_registry();
    let dispatcher = Dispatcher::new(registry.clone());

    let mut receivers = Vec::new();
    for _ in 0..3 {
        receivers.push(connect(&registry, ClientId::new_v4(), Role::Admin, 4).await);
    }
    let dead_identity = ClientId::new_v4();
    let (dead, dead_rx) = connect(&registry, dead_identity, Role::Admin, 4).await;
    drop(dead_rx);

    let report = dispatcher.broadcast(&event(), Some(Role::Admin)).await;
    assert_eq!(report.delivered, 3);
    assert_eq!(report.failed, 1);
    for (_, rx) in receivers.iter_mut() {
        assert_eq!(received(rx).len(), 1);
    }

    assert!(registry.channels_for(dead_identity).await.unwrap().is_empty());
    assert!(!registry.deregister(dead_identity, dead.id()).await);
}

#[tokio::test]
async fn test_slow_peer_drops_event_but_stays_registered() {
    let registry = start_registry();
    let dispatcher = Dispatcher::new(registry.clone());
    let identity = ClientId::new_v4();
    let (_slow, mut slow_rx) = connect(&registry, identity, Role::Client, 1).await;

    assert_eq!(dispatcher.unicast(&event(), identity).await.delivered, 1);
    let report = dispatcher.unicast(&event(), identity).await;
    assert_eq!(report.dropped, 1);

    assert_eq!(registry.channels_for(identity).await.unwrap().len(), 1);
    assert_eq!(received(&mut slow_rx).len(), 1);
}

#[tokio::test]
async fn test_unicast_reaches_every_channel_of_one_identity_only() {
    let registry = start_registry();
    let dispatcher = Dispatcher::new(registry.clone());
    let target = ClientId::new_v4();
    let (_t1, mut t1) = connect(&registry, target, Role::Client, 4).await;
    let (_t2, mut t2) = connect(&registry, target, Role::Client, 4).await;
    let (_o, mut other) = connect(&registry, ClientId::new_v4(), Role::Client, 4).await;

    let report = dispatcher.unicast(&event(), target).await;
    assert_eq!(report.delivered, 2);
    assert_eq!(received(&mut t1).len(), 1);
    assert_eq!(received(&mut t2).len(), 1);
    assert!(received(&mut other).is_empty());
}

#[tokio::test]
async fn test_unicast_to_unknown_identity_is_a_no_op() {
    let registry = start_registry();
    let dispatcher = Dispatcher::new(registry);
    let report = dispatcher.unicast(&event(), ClientId::new_v4()).await;
    assert_eq!(report, DeliveryReport::default());
}

#[tokio::test]
async fn test_stopped_registry_never_fails_delivery() {
    let (actor, registry) = RegistryActor::new(4);
    drop(actor);
    let dispatcher = Dispatcher::new(registry.clone());

    let report = tokio::time::timeout(
        Duration::from_secs(1),
        dispatcher.broadcast(&event(), None),
    )
    .await
    .unwrap();
    assert_eq!(report, DeliveryReport::default());
    assert!(matches!(
        registry.role_of(ClientId::new_v4()).await,
        Err(RelayError::Unavailable(_))
    ));
}
