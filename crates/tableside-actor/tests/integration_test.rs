use async_trait::async_trait;
use tableside_actor::{ActorEntity, FrameworkError, ResourceActor, ResourceClient};

// --- Test Entities ---

#[derive(Clone, Debug, PartialEq)]
struct Ticket {
    id: u32,
    seat: String,
    punched: bool,
}

#[derive(Debug)]
struct TicketCreate {
    seat: String,
}

#[derive(Debug)]
struct Punch;

#[derive(Debug, thiserror::Error, PartialEq)]
enum TicketError {
    #[error("ticket already punched")]
    AlreadyPunched,
    #[error("seat {0} does not exist")]
    UnknownSeat(String),
}

/// Seats that exist, injected as the actor context.
type Venue = Vec<String>;

#[async_trait]
impl ActorEntity for Ticket {
    type Id = u32;
    type Create = TicketCreate;
    type Update = Punch;
    type Change = bool;
    type Context = Venue;
    type Error = TicketError;

    fn from_create_params(id: u32, params: TicketCreate) -> Result<Self, Self::Error> {
        Ok(Self {
            id,
            seat: params.seat,
            punched: false,
        })
    }

    async fn on_create(&mut self, venue: &Venue) -> Result<(), Self::Error> {
        if venue.contains(&self.seat) {
            Ok(())
        } else {
            Err(TicketError::UnknownSeat(self.seat.clone()))
        }
    }

    async fn on_update(&mut self, _update: Punch, _venue: &Venue) -> Result<bool, Self::Error> {
        if self.punched {
            return Err(TicketError::AlreadyPunched);
        }
        self.punched = true;
        Ok(true)
    }
}

fn start() -> ResourceClient<Ticket> {
    let (actor, client) = ResourceActor::<Ticket>::new(10);
    tokio::spawn(actor.run(vec!["A1".to_string(), "A2".to_string(), "B7".to_string()]));
    client
}

fn create(seat: &str) -> TicketCreate {
    TicketCreate {
        seat: seat.to_string(),
    }
}

// --- Tests ---

#[tokio::test]
async fn test_framework_full_lifecycle() {
    let client = start();

    let created = client.create(create("A1")).await.unwrap();
    assert_eq!(created.id, 1);
    let id = created.id;

    let ticket = client.get(id).await.unwrap().unwrap();
    assert_eq!(ticket.seat, "A1");
    assert!(!ticket.punched);

    let updated = client.update(id, Punch).await.unwrap();
    assert!(updated.change);
    assert!(updated.entity.punched);

    // The stored entity reflects the update.
    assert!(client.get(id).await.unwrap().unwrap().punched);
}

#[tokio::test]
async fn test_rejected_update_reports_entity_error() {
    let client = start();
    let id = client.create(create("A2")).await.unwrap().id;
    client.update(id, Punch).await.unwrap();

    let err = client.update(id, Punch).await.unwrap_err();
    assert_eq!(
        err.downcast_entity::<TicketError>().unwrap(),
        TicketError::AlreadyPunched
    );
}

#[tokio::test]
async fn test_on_create_uses_context_and_does_not_consume_ids() {
    let client = start();

    let err = client.create(create("Z9")).await.unwrap_err();
    assert_eq!(
        err.downcast_entity::<TicketError>().unwrap(),
        TicketError::UnknownSeat("Z9".to_string())
    );

    assert_eq!(client.create(create("B7")).await.unwrap().id, 1);
    assert!(client.list().await.unwrap().len() == 1);
}

#[tokio::test]
async fn test_list_returns_entities_in_id_order() {
    let client = start();
    for seat in ["B7", "A1", "A2"] {
        client.create(create(seat)).await.unwrap();
    }

    let seats: Vec<(u32, String)> = client
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|t| (t.id, t.seat))
        .collect();
    assert_eq!(
        seats,
        vec![
            (1, "B7".to_string()),
            (2, "A1".to_string()),
            (3, "A2".to_string())
        ]
    );
}

#[tokio::test]
async fn test_update_unknown_id_is_not_found() {
    let client = start();
    let err = client.update(42, Punch).await.unwrap_err();
    assert!(matches!(err, FrameworkError::NotFound(id) if id == "42"));
    assert!(client.get(42).await.unwrap().is_none());
}

#[tokio::test]
async fn test_create_returns_the_stored_entity() {
    let client = start();
    let created = client.create(create("B7")).await.unwrap();

    assert_eq!(
        created,
        Ticket {
            id: 1,
            seat: "B7".to_string(),
            punched: false,
        }
    );
    assert_eq!(client.get(created.id).await.unwrap(), Some(created));
}

#[tokio::test]
async fn test_zero_mailbox_is_clamped_to_one() {
    let (actor, client) = ResourceActor::<Ticket>::new(0);
    tokio::spawn(actor.run(vec!["A1".to_string()]));

    let first = client.create(create("A1"));
    let second = client.create(create("A1"));
    let (first, second) = tokio::join!(first, second);
    assert_eq!((first.unwrap().id, second.unwrap().id), (1, 2));
}

#[tokio::test]
async fn test_dropping_clients_stops_the_actor() {
    let (actor, client) = ResourceActor::<Ticket>::new(10);
    let handle = tokio::spawn(actor.run(vec![]));
    drop(client);
    handle.await.unwrap();
}
