use std::marker::PhantomData;

use reqwest::Method;
use serde::{Serialize, de::DeserializeOwned};

use super::{LoumoClient, UpstreamError};
use crate::models::{
    Agent, Delivery, Faq, LoyaltyTier, Notification, Order, Product, ProductVariant, Promotion,
    Restock, Role, Setting, Shop, Stock, Topic, User, Zone,
};

/// An entity family served by the backend under one collection path.
pub trait Resource: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    const PATH: &'static str;

    fn id(&self) -> i64;
}

macro_rules! resource {
    ($($model:ty => $path:literal),* $(,)?) => {
        $(
            impl Resource for $model {
                const PATH: &'static str = $path;

                fn id(&self) -> i64 {
                    self.id
                }
            }
        )*
    };
}

resource! {
    Order => "/orders",
    Agent => "/agents",
    Delivery => "/deliveries",
    Stock => "/stocks",
    Product => "/products",
    ProductVariant => "/product-variants",
    Shop => "/shops",
    Zone => "/zones",
    User => "/users",
    Role => "/roles",
    LoyaltyTier => "/loyalty-tiers",
    Promotion => "/promotions",
    Notification => "/notifications",
    Setting => "/settings",
    Topic => "/topics",
    Faq => "/faqs",
}

/// CRUD calls for one resource.
#[derive(Debug, Clone)]
pub struct ResourceQuery<T> {
    client: LoumoClient,
    _resource: PhantomData<fn() -> T>,
}

impl<T: Resource> ResourceQuery<T> {
    pub fn new(client: LoumoClient) -> Self {
        Self {
            client,
            _resource: PhantomData,
        }
    }

    fn item_path(id: i64) -> String {
        format!("{}/{}", T::PATH, id)
    }

    pub async fn list(&self) -> Result<Vec<T>, UpstreamError> {
        self.client.get(T::PATH).await
    }

    pub async fn get(&self, id: i64) -> Result<T, UpstreamError> {
        self.client.get(&Self::item_path(id)).await
    }

    pub async fn create<B: Serialize + ?Sized>(&self, body: &B) -> Result<T, UpstreamError> {
        self.client.send(Method::POST, T::PATH, body).await
    }

    pub async fn update<B: Serialize + ?Sized>(&self, id: i64, body: &B) -> Result<T, UpstreamError> {
        self.client.send(Method::PUT, &Self::item_path(id), body).await
    }

    pub async fn patch<B: Serialize + ?Sized>(&self, id: i64, body: &B) -> Result<T, UpstreamError> {
        self.client
            .send(Method::PATCH, &Self::item_path(id), body)
            .await
    }

    pub async fn delete(&self, id: i64) -> Result<(), UpstreamError> {
        self.client.delete(&Self::item_path(id)).await
    }
}

impl ResourceQuery<Stock> {
    /// Adds `delta` to the row's quantity server-side.
    pub async fn restock(&self, id: i64, delta: i64) -> Result<Stock, UpstreamError> {
        let path = format!("{}/restock", Self::item_path(id));
        self.client
            .send(Method::PATCH, &path, &Restock { quantity: delta })
            .await
    }
}

impl LoumoClient {
    pub fn query<T: Resource>(&self) -> ResourceQuery<T> {
        ResourceQuery::new(self.clone())
    }

    pub fn orders(&self) -> ResourceQuery<Order> {
        self.query()
    }

    pub fn agents(&self) -> ResourceQuery<Agent> {
        self.query()
    }

    pub fn deliveries(&self) -> ResourceQuery<Delivery> {
        self.query()
    }

    pub fn stocks(&self) -> ResourceQuery<Stock> {
        self.query()
    }

    pub fn variants(&self) -> ResourceQuery<ProductVariant> {
        self.query()
    }

    pub fn users(&self) -> ResourceQuery<User> {
        self.query()
    }

    pub fn loyalty_tiers(&self) -> ResourceQuery<LoyaltyTier> {
        self.query()
    }
}
