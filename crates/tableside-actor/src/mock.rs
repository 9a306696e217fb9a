//! # Mock Clients
//!
//! Test doubles for [`ResourceClient`]: they let an actor under test talk to a dependency
//! whose replies are scripted, so the actor's own hooks can be exercised in isolation.
//!
//! Two styles are available:
//!
//! - [`MockClient`]: queue expectations up front (`expect_get(id).return_ok(..)`), hand the
//!   client to the code under test, then call [`MockClient::verify`].
//! - [`create_mock_client`] plus the `expect_*` helpers: receive each request yourself and
//!   answer it through its responder. Useful when a test needs to inspect the payload.
//!
//! ```rust
//! use tableside_actor::mock::MockClient;
//! use tableside_actor::{ActorEntity, FrameworkError};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)] struct Dish { id: u32 }
//! #[derive(Debug)] struct DishCreate;
//! #[derive(Debug)] struct DishUpdate;
//! #[derive(Debug, thiserror::Error)] #[error("dish error")] struct DishError;
//!
//! #[async_trait]
//! impl ActorEntity for Dish {
//!     type Id = u32; type Create = DishCreate; type Update = DishUpdate;
//!     type Change = (); type Context = (); type Error = DishError;
//!     fn from_create_params(id: u32, _: DishCreate) -> Result<Self, Self::Error> { Ok(Self { id }) }
//!     async fn on_update(&mut self, _: DishUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Dish>::new();
//!     mock.expect_get(7).return_err(FrameworkError::ActorClosed);
//!
//!     let result = mock.client().get(7).await;
//!     assert!(matches!(result, Err(FrameworkError::ActorClosed)));
//!     mock.verify();
//! }
//! ```

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::{ResourceRequest, Response, Updated};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

enum Expectation<T: ActorEntity> {
    Get {
        id: T::Id,
        response: Result<Option<T>, FrameworkError>,
    },
    List {
        response: Result<Vec<T>, FrameworkError>,
    },
    Create {
        response: Result<T, FrameworkError>,
    },
    Update {
        id: T::Id,
        response: Result<Updated<T>, FrameworkError>,
    },
}

type Expectations<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A mock client answering requests from a queue of expectations, in order.
///
/// A request that does not match the next expectation (wrong kind or wrong id)
/// panics the background task, and the caller sees [`FrameworkError::ActorDropped`].
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Expectations<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a new mock client with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Expectations<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = queue.lock().unwrap().pop_front();

                match (request, expectation) {
                    (
                        ResourceRequest::Get { id, respond_to },
                        Some(Expectation::Get { id: expected, response }),
                    ) => {
                        assert_eq!(id, expected, "get called with unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::List { respond_to }, Some(Expectation::List { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Create { respond_to, .. },
                        Some(Expectation::Create { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Update { id, respond_to, .. },
                        Some(Expectation::Update { id: expected, response }),
                    ) => {
                        assert_eq!(id, expected, "update called with unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (request, _) => {
                        panic!("Unexpected request or expectation mismatch: {}", describe(&request));
                    }
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    /// Expects a `get` for `id`.
    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        let expectations = self.expectations.clone();
        ExpectationBuilder::new(move |response| {
            expectations
                .lock()
                .unwrap()
                .push_back(Expectation::Get { id, response })
        })
    }

    /// Expects a `list`.
    pub fn expect_list(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        let expectations = self.expectations.clone();
        ExpectationBuilder::new(move |response| {
            expectations
                .lock()
                .unwrap()
                .push_back(Expectation::List { response })
        })
    }

    /// Expects a `create`.
    pub fn expect_create(&mut self) -> ExpectationBuilder<T, T> {
        let expectations = self.expectations.clone();
        ExpectationBuilder::new(move |response| {
            expectations
                .lock()
                .unwrap()
                .push_back(Expectation::Create { response })
        })
    }

    /// Expects an `update` of `id`.
    pub fn expect_update(&mut self, id: T::Id) -> ExpectationBuilder<T, Updated<T>> {
        let expectations = self.expectations.clone();
        ExpectationBuilder::new(move |response| {
            expectations
                .lock()
                .unwrap()
                .push_back(Expectation::Update { id, response })
        })
    }

    /// Panics if some expectations were never consumed.
    pub fn verify(&self) {
        let remaining = self.expectations.lock().unwrap().len();
        if remaining != 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }
}

/// Completes an expectation with the value the mock should answer.
pub struct ExpectationBuilder<T: ActorEntity, R> {
    push: Box<dyn FnOnce(Result<R, FrameworkError>) + Send>,
    _entity: std::marker::PhantomData<fn() -> T>,
}

impl<T: ActorEntity, R> ExpectationBuilder<T, R> {
    fn new(push: impl FnOnce(Result<R, FrameworkError>) + Send + 'static) -> Self {
        Self {
            push: Box::new(push),
            _entity: std::marker::PhantomData,
        }
    }

    /// Answer with a successful result.
    pub fn return_ok(self, value: R) {
        (self.push)(Ok(value))
    }

    /// Answer with an error.
    pub fn return_err(self, error: FrameworkError) {
        (self.push)(Err(error))
    }
}

fn describe<T: ActorEntity>(request: &ResourceRequest<T>) -> String {
    match request {
        ResourceRequest::Create { params, .. } => format!("Create({params:?})"),
        ResourceRequest::Get { id, .. } => format!("Get({id})"),
        ResourceRequest::List { .. } => "List".to_string(),
        ResourceRequest::Update { id, update, .. } => format!("Update({id}, {update:?})"),
    }
}

// =============================================================================
// CHANNEL-LEVEL HELPERS
// =============================================================================

/// Creates a client whose requests land on a receiver owned by the test.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Waits for the next request and returns it if it is a `Create`.
pub async fn expect_create<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Create, Response<T>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Waits for the next request and returns it if it is a `Get`.
pub async fn expect_get<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, Response<Option<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Waits for the next request and returns it if it is an `Update`.
pub async fn expect_update<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Update, Response<Updated<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Update {
            id,
            update,
            respond_to,
        }) => Some((id, update, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[derive(Clone, Debug, PartialEq)]
    struct Dish {
        id: u32,
        name: String,
    }

    #[derive(Debug)]
    struct DishCreate {
        name: String,
    }

    #[derive(Debug)]
    struct Rename(String);

    #[derive(Debug, thiserror::Error)]
    #[error("dish error")]
    struct DishError;

    #[async_trait]
    impl ActorEntity for Dish {
        type Id = u32;
        type Create = DishCreate;
        type Update = Rename;
        type Change = ();
        type Context = ();
        type Error = DishError;

        fn from_create_params(id: u32, params: DishCreate) -> Result<Self, Self::Error> {
            Ok(Self {
                id,
                name: params.name,
            })
        }

        async fn on_update(&mut self, update: Rename, _ctx: &()) -> Result<(), Self::Error> {
            self.name = update.0;
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_channel_helpers() {
        let (client, mut receiver) = create_mock_client::<Dish>(10);

        let create_task = tokio::spawn(async move {
            client
                .create(DishCreate {
                    name: "Soup".to_string(),
                })
                .await
        });

        let (payload, responder) = expect_create(&mut receiver)
            .await
            .expect("Expected Create request");
        assert_eq!(payload.name, "Soup");
        responder
            .send(Ok(Dish {
                id: 1,
                name: payload.name,
            }))
            .unwrap();

        let created = create_task.await.unwrap().unwrap();
        assert_eq!(created.id, 1);
        assert_eq!(created.name, "Soup");
    }

    #[tokio::test]
    async fn test_mock_client_with_expectations() {
        let mut mock = MockClient::<Dish>::new();
        mock.expect_create().return_ok(Dish {
            id: 1,
            name: "Soup".to_string(),
        });
        mock.expect_get(1).return_ok(Some(Dish {
            id: 1,
            name: "Soup".to_string(),
        }));
        mock.expect_update(1).return_ok(Updated {
            entity: Dish {
                id: 1,
                name: "Stew".to_string(),
            },
            change: (),
        });

        let client = mock.client();
        let created = client
            .create(DishCreate {
                name: "Soup".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(created.id, 1);
        assert_eq!(client.get(1).await.unwrap().unwrap().name, "Soup");
        let updated = client.update(1, Rename("Stew".to_string())).await.unwrap();
        assert_eq!(updated.entity.name, "Stew");

        mock.verify();
    }

    #[tokio::test]
    async fn test_mismatched_request_drops_reply() {
        let mut mock = MockClient::<Dish>::new();
        mock.expect_list().return_ok(vec![]);

        let result = mock.client().get(3).await;
        assert!(matches!(result, Err(FrameworkError::ActorDropped)));
    }
}
