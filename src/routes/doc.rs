use utoipa::OpenApi;
use utoipa::openapi::OpenApi as OpenApiSpec;
use utoipa_scalar::{Scalar, Servable};

use crate::{
    cache::CacheStatus,
    dto::{
        agents::{AgentList, DriverEdit, EditDriverRequest},
        dashboard::{DailyRevenue, DashboardSummary, StatusCount, StockAlerts, ZoneRevenue},
        deliveries::{AssignDeliveryRequest, EligibilityState, EligibleAgents},
        loyalty::{TierResolution, TierTable},
        orders::{OrderList, UpdateOrderStatusRequest},
        stocks::{CreateStockRequest, RestockRequest, StockCandidates, StockList, StockView},
    },
    models::{
        Address, Agent, AgentStatus, AgentUpdate, Delivery, DeliveryStatus, LoyaltyTier, Order,
        OrderCustomer, OrderItem, OrderStatus, Payment, Permission, ProductVariant, Role, Shop,
        Stock, StockLevel, User, UserUpdate, Zone,
    },
    response::{ApiResponse, Meta},
    routes::{agents, catalog, dashboard, health, loyalty, orders, params, stocks},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        health::readiness,
        orders::list_orders,
        orders::get_order,
        orders::update_order_status,
        orders::list_eligible_agents,
        orders::assign_delivery,
        stocks::list_stocks,
        stocks::create_stock,
        stocks::restock,
        stocks::stock_candidates,
        agents::list_agents,
        agents::edit_driver,
        loyalty::list_tiers,
        loyalty::resolve_tier,
        dashboard::dashboard,
        catalog::list_variants
    ),
    components(
        schemas(
            Order,
            OrderCustomer,
            OrderItem,
            OrderStatus,
            Payment,
            Address,
            Zone,
            Agent,
            AgentStatus,
            AgentUpdate,
            Delivery,
            DeliveryStatus,
            Stock,
            StockLevel,
            ProductVariant,
            Shop,
            User,
            UserUpdate,
            Role,
            Permission,
            LoyaltyTier,
            CacheStatus,
            health::HealthData,
            health::Readiness,
            OrderList,
            UpdateOrderStatusRequest,
            AssignDeliveryRequest,
            EligibilityState,
            EligibleAgents,
            StockView,
            StockList,
            RestockRequest,
            CreateStockRequest,
            StockCandidates,
            AgentList,
            EditDriverRequest,
            DriverEdit,
            TierTable,
            TierResolution,
            StatusCount,
            DailyRevenue,
            ZoneRevenue,
            StockAlerts,
            DashboardSummary,
            params::Pagination,
            params::SortOrder,
            Meta,
            ApiResponse<Order>,
            ApiResponse<OrderList>,
            ApiResponse<Delivery>,
            ApiResponse<EligibleAgents>,
            ApiResponse<Stock>,
            ApiResponse<StockList>,
            ApiResponse<StockCandidates>,
            ApiResponse<AgentList>,
            ApiResponse<DriverEdit>,
            ApiResponse<TierTable>,
            ApiResponse<TierResolution>,
            ApiResponse<DashboardSummary>
        )
    ),
    tags(
        (name = "Health", description = "Liveness and per-list readiness"),
        (name = "Orders", description = "Order list filtering and status"),
        (name = "Deliveries", description = "Agent eligibility and delivery assignment"),
        (name = "Stocks", description = "Stock levels, restock and creation"),
        (name = "Agents", description = "Delivery agents"),
        (name = "Loyalty", description = "Loyalty tiers"),
        (name = "Dashboard", description = "Back-office figures"),
        (name = "Catalog", description = "Variants and content passthroughs"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
