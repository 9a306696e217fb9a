//! # Lifecycle Coordinator
//!
//! Turns an acknowledged menu or order write into the matching [`Event`] and hands it to
//! the [`Dispatcher`].
//!
//! | Mutation                     | Event                    | Routed to                         |
//! |------------------------------|--------------------------|-----------------------------------|
//! | availability changed         | `menu-item-availability` | everyone                          |
//! | order created                | `new-order`              | admins                            |
//! | order started / served       | `order-started/-served`  | admins, and the ordering client   |
//!
//! Callers invoke [`Coordinator::notify`] only after the owning actor has accepted the
//! write. Delivery problems never reach the caller.

use crate::events::Event;
use crate::model::{ClientId, MenuItemId, Order, OrderTransition, Role};
use crate::relay::{DeliveryReport, Dispatcher};
use tracing::{debug, instrument};

/// A write that has taken effect.
#[derive(Debug, Clone)]
pub enum Mutation {
    MenuItemAvailabilityChanged { item_id: MenuItemId, available: bool },
    OrderCreated(Order),
    /// `order` is the state after the transition.
    OrderPatched {
        order: Order,
        transition: OrderTransition,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// All identities of the role, or everyone for `None`.
    Broadcast(Option<Role>),
    Unicast(ClientId),
}

/// The events a mutation produces and where each goes.
pub fn plan(mutation: &Mutation) -> Vec<(Event, Route)> {
    match mutation {
        Mutation::MenuItemAvailabilityChanged { item_id, available } => vec![(
            Event::MenuItemAvailability {
                item_id: *item_id,
                available: *available,
            },
            Route::Broadcast(None),
        )],
        Mutation::OrderCreated(order) => vec![(
            Event::NewOrder {
                order: order.clone(),
            },
            Route::Broadcast(Some(Role::Admin)),
        )],
        Mutation::OrderPatched { order, transition } => {
            let event = match transition {
                OrderTransition::Started => Event::OrderStarted {
                    order_id: order.id,
                    started: order.started,
                },
                OrderTransition::Served => Event::OrderServed {
                    order_id: order.id,
                    served: order.served,
                },
            };
            vec![
                (event.clone(), Route::Broadcast(Some(Role::Admin))),
                (event, Route::Unicast(order.client_uuid)),
            ]
        }
    }
}

#[derive(Clone)]
pub struct Coordinator {
    dispatcher: Dispatcher,
}

impl Coordinator {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Publishes the events for an acknowledged mutation. Returns the combined counts.
    #[instrument(skip_all)]
    pub async fn notify(&self, mutation: Mutation) -> DeliveryReport {
        let mut total = DeliveryReport::default();
        for (event, route) in plan(&mutation) {
            total += match route {
                Route::Broadcast(role) => self.dispatcher.broadcast(&event, role).await,
                Route::Unicast(identity) => self.dispatcher.unicast(&event, identity).await,
            };
        }
        debug!(?total, "Mutation published");
        total
    }
}
