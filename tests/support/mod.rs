#![allow(dead_code)]

//! In-process stand-in for the Loumo backend.

use std::{
    net::SocketAddr,
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch, post, put},
};
use chrono::{DateTime, TimeZone, Utc};
use loumo_admin::{
    models::{
        Address, Agent, AgentStatus, AgentUpdate, Delivery, LoyaltyTier, NewDelivery, NewStock,
        Order, OrderCustomer, OrderStatus, OrderStatusUpdate, ProductVariant, Restock, Stock,
        User, UserUpdate, Zone,
    },
    state::AppState,
    upstream::LoumoClient,
};

#[derive(Debug, Default)]
pub struct FakeData {
    pub orders: Vec<Order>,
    pub agents: Vec<Agent>,
    pub users: Vec<User>,
    pub deliveries: Vec<Delivery>,
    pub stocks: Vec<Stock>,
    pub variants: Vec<ProductVariant>,
    pub zones: Vec<Zone>,
    pub loyalty_tiers: Vec<LoyaltyTier>,
    /// `METHOD path` of every call received.
    pub calls: Vec<String>,
    /// `(stock id, delta)` of every restock received.
    pub restocks: Vec<(i64, i64)>,
    pub fail_agent_updates: bool,
    pub next_id: i64,
}

impl FakeData {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        1000 + self.next_id
    }
}

type Shared = Arc<Mutex<FakeData>>;

pub struct FakeBackend {
    pub url: String,
    data: Shared,
}

impl FakeBackend {
    pub async fn spawn(data: FakeData) -> Self {
        let data: Shared = Arc::new(Mutex::new(data));
        let app = Router::new()
            .route("/orders", get(list_orders))
            .route("/orders/{id}", get(get_order).patch(patch_order))
            .route("/agents", get(list_agents))
            .route("/agents/{id}", get(get_agent).put(put_agent))
            .route("/users/{id}", put(put_user))
            .route("/deliveries", get(list_deliveries).post(create_delivery))
            .route("/stocks", get(list_stocks).post(create_stock))
            .route("/stocks/{id}/restock", patch(restock))
            .route("/product-variants", get(list_variants))
            .route("/zones", get(list_zones))
            .route("/loyalty-tiers", get(list_tiers))
            .route("/faqs", post(create_faq))
            .with_state(data.clone());

        let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
            .await
            .expect("bind fake backend");
        let addr = listener.local_addr().expect("fake backend addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("fake backend");
        });

        Self {
            url: format!("http://{addr}"),
            data,
        }
    }

    pub fn data(&self) -> MutexGuard<'_, FakeData> {
        self.data.lock().expect("fake data")
    }

    pub fn calls_to(&self, call: &str) -> usize {
        self.data().calls.iter().filter(|c| c.as_str() == call).count()
    }

    pub fn state(&self) -> AppState {
        let client =
            LoumoClient::new(&self.url, None, Duration::from_secs(5)).expect("backend client");
        AppState::new(client)
    }
}

fn lock<'a>(data: &'a Shared, call: String) -> MutexGuard<'a, FakeData> {
    let mut guard = data.lock().expect("fake data");
    guard.calls.push(call);
    guard
}

async fn list_orders(State(data): State<Shared>) -> Json<Vec<Order>> {
    Json(lock(&data, "GET /orders".into()).orders.clone())
}

async fn get_order(
    State(data): State<Shared>,
    Path(id): Path<i64>,
) -> Result<Json<Order>, StatusCode> {
    let data = lock(&data, format!("GET /orders/{id}"));
    data.orders
        .iter()
        .find(|o| o.id == id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn patch_order(
    State(data): State<Shared>,
    Path(id): Path<i64>,
    Json(body): Json<OrderStatusUpdate>,
) -> Result<Json<Order>, StatusCode> {
    let mut data = lock(&data, format!("PATCH /orders/{id}"));
    let order = data
        .orders
        .iter_mut()
        .find(|o| o.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    order.status = body.status;
    Ok(Json(order.clone()))
}

async fn list_agents(State(data): State<Shared>) -> Json<Vec<Agent>> {
    Json(lock(&data, "GET /agents".into()).agents.clone())
}

async fn get_agent(
    State(data): State<Shared>,
    Path(id): Path<i64>,
) -> Result<Json<Agent>, StatusCode> {
    let data = lock(&data, format!("GET /agents/{id}"));
    data.agents
        .iter()
        .find(|a| a.id == id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn put_agent(
    State(data): State<Shared>,
    Path(id): Path<i64>,
    Json(body): Json<AgentUpdate>,
) -> Result<Json<Agent>, StatusCode> {
    let mut data = lock(&data, format!("PUT /agents/{id}"));
    if data.fail_agent_updates {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }
    let zones: Vec<Zone> = data
        .zones
        .iter()
        .filter(|z| body.zone_ids.contains(&z.id))
        .cloned()
        .collect();
    let agent = data
        .agents
        .iter_mut()
        .find(|a| a.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    agent.status = body.status;
    agent.zone = zones;
    agent.transport = body.transport;
    Ok(Json(agent.clone()))
}

async fn put_user(
    State(data): State<Shared>,
    Path(id): Path<i64>,
    Json(body): Json<UserUpdate>,
) -> Result<Json<User>, StatusCode> {
    let mut data = lock(&data, format!("PUT /users/{id}"));
    let user = data
        .users
        .iter_mut()
        .find(|u| u.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    user.name = body.name;
    user.email = body.email;
    user.tel = body.tel;
    Ok(Json(user.clone()))
}

async fn list_deliveries(State(data): State<Shared>) -> Json<Vec<Delivery>> {
    Json(lock(&data, "GET /deliveries".into()).deliveries.clone())
}

async fn create_delivery(
    State(data): State<Shared>,
    Json(body): Json<NewDelivery>,
) -> Json<Delivery> {
    let mut data = lock(&data, "POST /deliveries".into());
    let delivery = Delivery {
        id: data.next_id(),
        reference: None,
        order_id: body.order_id,
        agent_id: Some(body.agent_id),
        status: body.status,
        scheduled_time: body.scheduled_time,
        delivered_time: None,
    };
    data.deliveries.push(delivery.clone());
    if let Some(order) = data.orders.iter_mut().find(|o| o.id == body.order_id) {
        order.delivery.push(delivery.clone());
    }
    if let Some(agent) = data.agents.iter_mut().find(|a| a.id == body.agent_id) {
        agent.delivery.push(delivery.clone());
    }
    Json(delivery)
}

async fn list_stocks(State(data): State<Shared>) -> Json<Vec<Stock>> {
    Json(lock(&data, "GET /stocks".into()).stocks.clone())
}

async fn create_stock(
    State(data): State<Shared>,
    Json(body): Json<NewStock>,
) -> Result<Json<Stock>, StatusCode> {
    let mut data = lock(&data, "POST /stocks".into());
    if data
        .stocks
        .iter()
        .any(|s| s.shop_id == body.shop_id && s.product_variant_id == body.product_variant_id)
    {
        return Err(StatusCode::CONFLICT);
    }
    let stock = stock(data.next_id(), body.shop_id, body.product_variant_id, body.quantity, body.threshold);
    data.stocks.push(stock.clone());
    Ok(Json(stock))
}

async fn restock(
    State(data): State<Shared>,
    Path(id): Path<i64>,
    Json(body): Json<Restock>,
) -> Result<Json<Stock>, StatusCode> {
    let mut data = lock(&data, format!("PATCH /stocks/{id}/restock"));
    data.restocks.push((id, body.quantity));
    let stock = data
        .stocks
        .iter_mut()
        .find(|s| s.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    stock.quantity += body.quantity;
    stock.restock_date = Utc::now();
    Ok(Json(stock.clone()))
}

async fn list_variants(State(data): State<Shared>) -> Json<Vec<ProductVariant>> {
    Json(lock(&data, "GET /product-variants".into()).variants.clone())
}

async fn list_zones(State(data): State<Shared>) -> Json<Vec<Zone>> {
    Json(lock(&data, "GET /zones".into()).zones.clone())
}

async fn list_tiers(State(data): State<Shared>) -> Json<Vec<LoyaltyTier>> {
    Json(lock(&data, "GET /loyalty-tiers".into()).loyalty_tiers.clone())
}

async fn create_faq(
    State(data): State<Shared>,
    Json(body): Json<serde_json::Value>,
) -> Json<serde_json::Value> {
    let mut data = lock(&data, "POST /faqs".into());
    let mut created = body;
    created["id"] = serde_json::json!(data.next_id());
    Json(created)
}

// Fixtures

pub fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, day, hour, 0, 0)
        .single()
        .expect("fixture date")
}

pub fn zone(id: i64, name: &str) -> Zone {
    Zone {
        id,
        name: name.to_string(),
        price: Some(1000),
        addresses: Vec::new(),
    }
}

pub fn order(id: i64, name: &str, zone_id: i64, total: i64, created_at: DateTime<Utc>) -> Order {
    Order {
        id,
        reference: format!("ORD-{id}"),
        user: OrderCustomer {
            name: name.to_string(),
            email: None,
            tel: None,
        },
        address: Some(Address {
            id: 500 + id,
            name: None,
            street: "Rue de la Joie".into(),
            zone_id,
            published: true,
        }),
        total,
        delivery_fee: 1500,
        weight: 1.0,
        status: OrderStatus::Accepted,
        payment: None,
        created_at,
        order_items: Vec::new(),
        delivery: Vec::new(),
    }
}

pub fn user(id: i64, name: &str) -> User {
    User {
        id,
        name: name.to_string(),
        email: format!("{}@loumo.test", name.to_lowercase()),
        tel: None,
        verified: true,
        role: Vec::new(),
    }
}

pub fn agent(id: i64, status: AgentStatus, zones: &[Zone]) -> Agent {
    Agent {
        id,
        user_id: 100 + id,
        user: None,
        status,
        zone: zones.to_vec(),
        delivery: Vec::new(),
        transport: Some("moto".into()),
    }
}

pub fn variant(id: i64, img_url: Option<&str>) -> ProductVariant {
    ProductVariant {
        id,
        name: format!("Variant {id}"),
        product_id: 1,
        price: 2500,
        weight: Some(0.5),
        img_url: img_url.map(str::to_string),
        status: true,
    }
}

pub fn stock(id: i64, shop_id: i64, product_variant_id: i64, quantity: i64, threshold: i64) -> Stock {
    Stock {
        id,
        product_variant_id,
        shop_id,
        quantity,
        threshold,
        restock_date: at(1, 8),
        product_variant: None,
        shop: None,
    }
}

pub fn tier(id: i64, name: &str, min_points: i64, max_points: Option<i64>) -> LoyaltyTier {
    LoyaltyTier {
        id,
        name: name.to_string(),
        min_points,
        max_points,
        discount: None,
        description: None,
    }
}
