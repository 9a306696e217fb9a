use tableside::clients::{ActorClient, MenuClient, OrderClient};
use tableside::model::{
    ClientId, MenuCategory, MenuItem, MenuItemId, MenuOption, OptionKind, OptionValue, OrderCreate,
    OrderId, OrderItem, OrderOption, OrderTransition, Table,
};
use tableside::order_actor::{self, OrderError};
use tableside_actor::mock::MockClient;

fn burger(available: bool) -> MenuItem {
    MenuItem {
        id: MenuItemId(1),
        name: "Cheeseburger".to_string(),
        description: String::new(),
        image: String::new(),
        available,
        category: MenuCategory {
            name: "Mains".to_string(),
            slug: "mains".to_string(),
        },
        options: vec![MenuOption {
            slug: "cooking".to_string(),
            name: "Cooking".to_string(),
            kind: OptionKind::Text,
        }],
    }
}

fn tables() -> Vec<Table> {
    vec![Table {
        name: "Table 1".to_string(),
        slug: "table-1".to_string(),
    }]
}

fn order(table: &str, quantity: u32, option: Option<&str>) -> OrderCreate {
    OrderCreate {
        client_name: "Ada".to_string(),
        client_uuid: ClientId::new_v4(),
        table_slug: table.to_string(),
        items: vec![OrderItem {
            menu_item_id: MenuItemId(1),
            quantity,
            options: option
                .map(|slug| {
                    vec![OrderOption {
                        option_slug: slug.to_string(),
                        value: OptionValue::Text("rare".to_string()),
                    }]
                })
                .unwrap_or_default(),
        }],
    }
}

/// Real order actor, menu answered by a mock.
fn start(menu_mock: &MockClient<MenuItem>) -> (OrderClient, tokio::task::JoinHandle<()>) {
    let (actor, generic) = order_actor::new(16);
    let handle = tokio::spawn(actor.run((MenuClient::new(menu_mock.client()), tables())));
    (OrderClient::new(generic), handle)
}

#[tokio::test]
async fn test_order_actor_validates_against_mocked_menu() {
    let mut menu_mock = MockClient::<MenuItem>::new();
    menu_mock.expect_get(MenuItemId(1)).return_ok(Some(burger(true)));

    let (orders, handle) = start(&menu_mock);

    let params = order("table-1", 2, Some("cooking"));
    let client = params.client_uuid;
    let created = orders.create_order(params).await.unwrap();
    assert_eq!(created.status(), "pending");

    let stored = orders.get(created.id).await.unwrap().unwrap();
    assert_eq!(stored, created);
    assert_eq!(stored.client_uuid, client);
    assert_eq!(stored.table, "table-1");
    assert_eq!(stored.status(), "pending");

    menu_mock.verify();

    drop(orders);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_orders_progress_one_step_at_a_time() {
    let mut menu_mock = MockClient::<MenuItem>::new();
    menu_mock.expect_get(MenuItemId(1)).return_ok(Some(burger(true)));
    let (orders, _handle) = start(&menu_mock);
    let id = orders.create_order(order("table-1", 1, None)).await.unwrap().id;

    let err = orders
        .apply_transition(id, OrderTransition::Served)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        OrderError::InvalidTransition {
            order_id: id,
            requested: OrderTransition::Served,
            status: "pending",
        }
    );

    let started = orders
        .apply_transition(id, OrderTransition::Started)
        .await
        .unwrap();
    assert_eq!(started.change, OrderTransition::Started);
    assert!(started.entity.started && !started.entity.served);

    assert!(matches!(
        orders.apply_transition(id, OrderTransition::Started).await,
        Err(OrderError::InvalidTransition { status: "started", .. })
    ));

    let served = orders
        .apply_transition(id, OrderTransition::Served)
        .await
        .unwrap();
    assert_eq!(served.change, OrderTransition::Served);
    assert_eq!(served.entity.status(), "served");

    assert!(matches!(
        orders.apply_transition(id, OrderTransition::Served).await,
        Err(OrderError::InvalidTransition { status: "served", .. })
    ));
}

#[tokio::test]
async fn test_unavailable_and_unknown_items_are_rejected() {
    let mut menu_mock = MockClient::<MenuItem>::new();
    menu_mock.expect_get(MenuItemId(1)).return_ok(Some(burger(false)));
    menu_mock.expect_get(MenuItemId(1)).return_ok(None);
    menu_mock.expect_get(MenuItemId(1)).return_ok(Some(burger(true)));
    let (orders, _handle) = start(&menu_mock);

    assert_eq!(
        orders.create_order(order("table-1", 1, None)).await,
        Err(OrderError::Unavailable(MenuItemId(1)))
    );
    assert_eq!(
        orders.create_order(order("table-1", 1, None)).await,
        Err(OrderError::UnknownMenuItem(MenuItemId(1)))
    );
    assert_eq!(
        orders.create_order(order("table-1", 1, Some("extra-cheese"))).await,
        Err(OrderError::UnknownOption {
            menu_item_id: MenuItemId(1),
            option_slug: "extra-cheese".to_string(),
        })
    );
    menu_mock.verify();

    assert!(orders.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_payload_checks_run_before_the_menu_is_consulted() {
    // No expectations: any menu lookup would fail the test.
    let menu_mock = MockClient::<MenuItem>::new();
    let (orders, _handle) = start(&menu_mock);

    assert_eq!(
        orders.create_order(order("table-1", 0, None)).await,
        Err(OrderError::InvalidQuantity(MenuItemId(1)))
    );
    assert_eq!(
        orders.create_order(order("rooftop", 1, None)).await,
        Err(OrderError::UnknownTable("rooftop".to_string()))
    );

    let mut empty = order("table-1", 1, None);
    empty.items.clear();
    assert_eq!(orders.create_order(empty).await, Err(OrderError::Empty));

    assert_eq!(
        orders
            .apply_transition(OrderId(7), OrderTransition::Started)
            .await
            .unwrap_err(),
        OrderError::NotFound("7".to_string())
    );
}

#[tokio::test]
async fn test_menu_outage_surfaces_as_communication_error() {
    let mut menu_mock = MockClient::<MenuItem>::new();
    menu_mock
        .expect_get(MenuItemId(1))
        .return_err(tableside_actor::FrameworkError::ActorClosed);
    let (orders, _handle) = start(&menu_mock);

    assert!(matches!(
        orders.create_order(order("table-1", 1, None)).await,
        Err(OrderError::ActorCommunicationError(_))
    ));
}
