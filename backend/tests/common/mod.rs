//! Shared test fixtures: an in-memory balance store over the domain entities
//!
//! Mirrors the join semantics of the PostgreSQL store so service-level tests
//! can drive the real engine without a database.

#![allow(dead_code)]

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use balance_backend::error::{AppError, AppResult};
use balance_backend::store::{
    BalanceRows, BalanceStore, CumulatedMaterialRow, ForEachMaterialRow, MaterialRows,
    MaterialTrackingRow, PieceworkRow, ProducedRow, ProducedRows, ProducedWasteRow, UnitPriceSet,
};
use shared::models::{
    BalanceConfig, BasicProductionCounting, CountingRole, MaterialType, Operation, Order, Product,
    ProductionCountingQuantity, ProductionTracking, RecordingMode, TechnologyOperationComponent,
    TrackingOperationProductInComponent, TrackingOperationProductOutComponent, TrackingState,
};

/// Helper to create Decimal from string
pub fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// In-memory entity store
#[derive(Default, Clone)]
pub struct InMemoryBalanceStore {
    pub orders: Vec<Order>,
    pub products: Vec<Product>,
    pub operations: Vec<Operation>,
    pub operation_components: Vec<TechnologyOperationComponent>,
    pub counting_quantities: Vec<ProductionCountingQuantity>,
    pub basic_countings: Vec<BasicProductionCounting>,
    pub trackings: Vec<ProductionTracking>,
    pub tracking_in: Vec<TrackingOperationProductInComponent>,
    pub tracking_out: Vec<TrackingOperationProductOutComponent>,
    pub balance_configs: HashMap<Uuid, BalanceConfig>,
    /// Snapshot fetches observed, for asserting single-snapshot behavior
    pub fetch_calls: Arc<AtomicUsize>,
}

impl InMemoryBalanceStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Fixture builders
    // ------------------------------------------------------------------

    pub fn add_product(&mut self, number: &str, name: &str, unit: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.products.push(Product {
            id,
            number: number.to_string(),
            name: name.to_string(),
            unit: unit.to_string(),
            nominal_cost: None,
            average_cost: None,
            last_purchase_cost: None,
            average_offer_cost: None,
            last_offer_cost: None,
        });
        id
    }

    pub fn set_nominal_cost(&mut self, product_id: Uuid, cost: &str) {
        let product = self
            .products
            .iter_mut()
            .find(|p| p.id == product_id)
            .expect("unknown product in fixture");
        product.nominal_cost = Some(dec(cost));
    }

    pub fn add_order(
        &mut self,
        number: &str,
        recording_mode: RecordingMode,
        product_id: Uuid,
        planned_quantity: &str,
    ) -> Uuid {
        let id = Uuid::new_v4();
        self.orders.push(Order {
            id,
            number: number.to_string(),
            name: None,
            planned_quantity: dec(planned_quantity),
            recording_mode,
            product_id,
            created_at: Utc::now(),
        });
        id
    }

    /// Register an operation and one occurrence of it in a routing,
    /// returning the occurrence id used by counting and tracking rows
    pub fn add_operation(&mut self, number: &str, name: &str) -> Uuid {
        let operation_id = Uuid::new_v4();
        self.operations.push(Operation {
            id: operation_id,
            number: number.to_string(),
            name: name.to_string(),
        });
        let component_id = Uuid::new_v4();
        self.operation_components.push(TechnologyOperationComponent {
            id: component_id,
            operation_id,
        });
        component_id
    }

    pub fn add_component_demand(
        &mut self,
        order_id: Uuid,
        product_id: Uuid,
        operation_component_id: Option<Uuid>,
        planned_quantity: &str,
    ) {
        self.counting_quantities.push(ProductionCountingQuantity {
            id: Uuid::new_v4(),
            order_id,
            product_id,
            technology_operation_component_id: operation_component_id,
            role: CountingRole::Used,
            material_type: MaterialType::Component,
            is_non_component: true,
            planned_quantity: dec(planned_quantity),
        });
    }

    pub fn add_produced_waste_registration(&mut self, order_id: Uuid, product_id: Uuid) {
        self.counting_quantities.push(ProductionCountingQuantity {
            id: Uuid::new_v4(),
            order_id,
            product_id,
            technology_operation_component_id: None,
            role: CountingRole::Produced,
            material_type: MaterialType::Waste,
            is_non_component: false,
            planned_quantity: Decimal::ZERO,
        });
    }

    pub fn add_basic_counting(&mut self, order_id: Uuid, product_id: Uuid, used_quantity: &str) {
        self.basic_countings.push(BasicProductionCounting {
            id: Uuid::new_v4(),
            order_id,
            product_id,
            used_quantity: Some(dec(used_quantity)),
        });
    }

    pub fn add_tracking(
        &mut self,
        order_id: Uuid,
        operation_component_id: Option<Uuid>,
        state: TrackingState,
        executed_operation_cycles: Option<&str>,
    ) -> Uuid {
        let id = Uuid::new_v4();
        self.trackings.push(ProductionTracking {
            id,
            order_id,
            technology_operation_component_id: operation_component_id,
            state,
            executed_operation_cycles: executed_operation_cycles.map(dec),
        });
        id
    }

    pub fn add_tracking_in(
        &mut self,
        tracking_id: Uuid,
        product_id: Uuid,
        used_quantity: Option<&str>,
        waste_used_quantity: Option<&str>,
        waste_unit: Option<&str>,
    ) {
        self.tracking_in.push(TrackingOperationProductInComponent {
            id: Uuid::new_v4(),
            production_tracking_id: tracking_id,
            product_id,
            used_quantity: used_quantity.map(dec),
            waste_used_quantity: waste_used_quantity.map(dec),
            waste_unit: waste_unit.map(str::to_string),
        });
    }

    pub fn add_tracking_out(
        &mut self,
        tracking_id: Uuid,
        product_id: Uuid,
        used_quantity: Option<&str>,
        wastes_quantity: Option<&str>,
    ) {
        self.tracking_out.push(TrackingOperationProductOutComponent {
            id: Uuid::new_v4(),
            production_tracking_id: tracking_id,
            product_id,
            used_quantity: used_quantity.map(dec),
            wastes_quantity: wastes_quantity.map(dec),
        });
    }

    pub fn add_balance_config(&mut self, config: BalanceConfig) -> Uuid {
        let id = Uuid::new_v4();
        self.balance_configs.insert(id, config);
        id
    }

    // ------------------------------------------------------------------
    // Join helpers
    // ------------------------------------------------------------------

    fn product(&self, product_id: Uuid) -> &Product {
        self.products
            .iter()
            .find(|p| p.id == product_id)
            .expect("unknown product in fixture")
    }

    fn operation_number(&self, component_id: Uuid) -> Option<String> {
        let component = self
            .operation_components
            .iter()
            .find(|c| c.id == component_id)?;
        self.operations
            .iter()
            .find(|op| op.id == component.operation_id)
            .map(|op| op.number.clone())
    }

    fn prices(product: &Product) -> UnitPriceSet {
        UnitPriceSet {
            nominal_cost: product.nominal_cost,
            average_cost: product.average_cost,
            last_purchase_cost: product.last_purchase_cost,
            average_offer_cost: product.average_offer_cost,
            last_offer_cost: product.last_offer_cost,
        }
    }

    fn accepted_trackings<'a>(
        &'a self,
        order: &'a Order,
    ) -> impl Iterator<Item = &'a ProductionTracking> + 'a {
        self.trackings
            .iter()
            .filter(move |t| t.order_id == order.id && t.state == TrackingState::Accepted)
    }

    fn is_component_demand(quantity: &ProductionCountingQuantity) -> bool {
        quantity.role == CountingRole::Used
            && quantity.material_type == MaterialType::Component
            && quantity.is_non_component
    }
}

#[async_trait]
impl BalanceStore for InMemoryBalanceStore {
    async fn fetch_balance_rows(&self, order_ids: &[Uuid]) -> AppResult<BalanceRows> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);

        let selected: Vec<&Order> = self
            .orders
            .iter()
            .filter(|o| order_ids.contains(&o.id))
            .collect();

        let mut material = MaterialRows::default();
        let mut produced = ProducedRows::default();
        let mut piecework = Vec::new();

        for order in &selected {
            // Material branches over component demands
            for quantity in self
                .counting_quantities
                .iter()
                .filter(|q| q.order_id == order.id && Self::is_component_demand(q))
            {
                let product = self.product(quantity.product_id);
                match order.recording_mode {
                    RecordingMode::Cumulated => {
                        let recorded = self
                            .basic_countings
                            .iter()
                            .find(|b| b.order_id == order.id && b.product_id == product.id)
                            .and_then(|b| b.used_quantity);
                        material.cumulated.push(CumulatedMaterialRow {
                            order_number: order.number.clone(),
                            product_number: product.number.clone(),
                            product_name: product.name.clone(),
                            product_unit: product.unit.clone(),
                            planned_quantity: Some(quantity.planned_quantity),
                            recorded_used_quantity: recorded,
                            prices: Self::prices(product),
                        });
                    }
                    RecordingMode::ForEach => {
                        let Some(operation_number) = quantity
                            .technology_operation_component_id
                            .and_then(|id| self.operation_number(id))
                        else {
                            continue;
                        };
                        material.for_each.push(ForEachMaterialRow {
                            order_number: order.number.clone(),
                            operation_number,
                            product_number: product.number.clone(),
                            product_name: product.name.clone(),
                            product_unit: product.unit.clone(),
                            planned_quantity: Some(quantity.planned_quantity),
                            prices: Self::prices(product),
                        });
                    }
                }
            }

            // Consumption details through accepted trackings
            for tracking in self.accepted_trackings(order) {
                let operation_number = tracking
                    .technology_operation_component_id
                    .and_then(|id| self.operation_number(id));
                for detail in self
                    .tracking_in
                    .iter()
                    .filter(|d| d.production_tracking_id == tracking.id)
                {
                    let product = self.product(detail.product_id);
                    material.tracking.push(MaterialTrackingRow {
                        order_number: order.number.clone(),
                        operation_number: operation_number.clone(),
                        product_number: product.number.clone(),
                        used_quantity: detail.used_quantity,
                        waste_used_quantity: detail.waste_used_quantity,
                        waste_unit: detail.waste_unit.clone(),
                    });
                }
            }

            // Produced output for the order's own product
            let ordered_product = self.product(order.product_id);
            let mut matched_output = false;
            for tracking in self.accepted_trackings(order) {
                for detail in self.tracking_out.iter().filter(|d| {
                    d.production_tracking_id == tracking.id && d.product_id == order.product_id
                }) {
                    matched_output = true;
                    produced.output.push(ProducedRow {
                        order_number: order.number.clone(),
                        product_number: ordered_product.number.clone(),
                        product_name: ordered_product.name.clone(),
                        product_unit: ordered_product.unit.clone(),
                        order_planned_quantity: order.planned_quantity,
                        used_quantity: detail.used_quantity,
                        wastes_quantity: detail.wastes_quantity,
                    });
                }
            }
            if !matched_output {
                produced.output.push(ProducedRow {
                    order_number: order.number.clone(),
                    product_number: ordered_product.number.clone(),
                    product_name: ordered_product.name.clone(),
                    product_unit: ordered_product.unit.clone(),
                    order_planned_quantity: order.planned_quantity,
                    used_quantity: None,
                    wastes_quantity: None,
                });
            }

            // Produced wastes: out-components matching a waste registration
            for tracking in self.accepted_trackings(order) {
                for detail in self
                    .tracking_out
                    .iter()
                    .filter(|d| d.production_tracking_id == tracking.id)
                {
                    let registered = self.counting_quantities.iter().any(|q| {
                        q.order_id == order.id
                            && q.role == CountingRole::Produced
                            && q.material_type == MaterialType::Waste
                            && q.product_id == detail.product_id
                    });
                    if registered {
                        produced.waste.push(ProducedWasteRow {
                            order_number: order.number.clone(),
                            used_quantity: detail.used_quantity,
                        });
                    }
                }
            }

            // Piecework: for-each orders only
            if order.recording_mode == RecordingMode::ForEach {
                for tracking in self.accepted_trackings(order) {
                    let Some(operation_number) = tracking
                        .technology_operation_component_id
                        .and_then(|id| self.operation_number(id))
                    else {
                        continue;
                    };
                    piecework.push(PieceworkRow {
                        order_number: order.number.clone(),
                        operation_number,
                        executed_operation_cycles: tracking.executed_operation_cycles,
                    });
                }
            }
        }

        Ok(BalanceRows {
            material,
            produced,
            piecework,
        })
    }

    async fn fetch_balance_config(&self, balance_id: Uuid) -> AppResult<BalanceConfig> {
        self.balance_configs
            .get(&balance_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound("Balance configuration".to_string()))
    }
}
