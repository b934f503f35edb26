use crate::store::{KvStore, namespaced};
use crate::types::*;
use chrono::{DateTime, Utc};
use print_quote::classify::effective_selection;
use print_quote::{OrderMode, PaperSize, PrintSide, RateCard};

/// Key the order list is stored under, inside the book's namespace
pub const ORDERS_KEY: &str = "orders";

/// The persisted list of submitted orders
pub struct OrderBook<S> {
    store: S,
    key: String,
    rates: RateCard,
}

impl<S: KvStore> OrderBook<S> {
    pub fn new(store: S, namespace: &str) -> Self {
        Self {
            store,
            key: namespaced(namespace, ORDERS_KEY),
            rates: RateCard::default(),
        }
    }

    /// Price new orders with `rates` instead of the standard card
    pub fn with_rates(mut self, rates: RateCard) -> Self {
        self.rates = rates;
        self
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// All orders, oldest first. Records saved without file paths or a
    /// status are normalized and written back.
    pub async fn orders(&mut self) -> Result<Vec<OrderRecord>> {
        let mut orders = self.read().await?;
        for order in &mut orders {
            order.normalize();
        }
        if !orders.is_empty() {
            self.write(&orders).await?;
        }
        Ok(orders)
    }

    /// Look up an order by id; surrounding whitespace is ignored
    pub async fn find(&self, order_id: &str) -> Result<Option<OrderRecord>> {
        let order_id = order_id.trim();
        let found = self
            .read()
            .await?
            .into_iter()
            .find(|order| order.order_id == order_id);
        Ok(found)
    }

    pub async fn submit(&mut self, request: OrderRequest) -> Result<OrderRecord> {
        self.submit_at(request, Utc::now()).await
    }

    /// Validate, price and store an order placed at `now`
    pub async fn submit_at(
        &mut self,
        request: OrderRequest,
        now: DateTime<Utc>,
    ) -> Result<OrderRecord> {
        request.validate()?;

        let mut orders = self.read().await?;
        let order_id = next_order_id(&orders, now);

        let record = if request.mode == OrderMode::CustomQuote {
            // Quoted by hand; the print options are fixed placeholders
            OrderRecord {
                order_id,
                full_name: request.full_name.trim().to_string(),
                phone_number: request.phone_number.trim().to_string(),
                print_type: request.mode.print_type(),
                binding_color_type: None,
                copies: 1,
                paper_size: PaperSize::A4,
                print_side: PrintSide::Single,
                selected_pages: Some("all".to_string()),
                color_pages: non_blank(&request.color_pages),
                bw_pages: non_blank(&request.bw_pages),
                special_instructions: request.special_instructions.as_deref().and_then(non_blank),
                files: request.files,
                order_date: now,
                status: OrderStatus::Pending,
                total_cost: 0.0,
            }
        } else {
            let result = self.rates.price(&request.pricing_input());
            OrderRecord {
                order_id,
                full_name: request.full_name.trim().to_string(),
                phone_number: request.phone_number.trim().to_string(),
                print_type: request.mode.print_type(),
                binding_color_type: request.mode.binding_color_type(),
                copies: request.copies.max(1),
                paper_size: request.paper_size,
                print_side: request.print_side,
                selected_pages: Some(effective_selection(&request.selected_pages).to_string()),
                color_pages: non_blank(&request.color_pages),
                bw_pages: non_blank(&request.bw_pages),
                special_instructions: request.special_instructions.as_deref().and_then(non_blank),
                files: request.files,
                order_date: now,
                status: OrderStatus::Pending,
                total_cost: result.total_cost(),
            }
        };

        orders.push(record.clone());
        self.write(&orders).await?;

        log::info!(
            "order {} submitted ({}, {})",
            record.order_id,
            record.print_type.as_str(),
            record.cost_label()
        );
        Ok(record)
    }

    pub async fn update_status(
        &mut self,
        order_id: &str,
        status: OrderStatus,
    ) -> Result<OrderRecord> {
        let order_id = order_id.trim();
        let mut orders = self.read().await?;
        let order = orders
            .iter_mut()
            .find(|order| order.order_id == order_id)
            .ok_or_else(|| OrderError::NotFound(order_id.to_string()))?;

        order.status = status;
        let updated = order.clone();
        self.write(&orders).await?;

        log::info!("order {} status updated to {}", order_id, status);
        Ok(updated)
    }

    /// Remove every order
    pub async fn clear(&mut self) -> Result<()> {
        self.store.clear(&self.key).await?;
        log::info!("all orders cleared");
        Ok(())
    }

    async fn read(&self) -> Result<Vec<OrderRecord>> {
        match self.store.get(&self.key).await? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Vec::new()),
        }
    }

    async fn write(&mut self, orders: &[OrderRecord]) -> Result<()> {
        let json = serde_json::to_string(orders)?;
        self.store.put(&self.key, json).await
    }
}

// Ids are `ORD-<unix millis>`, bumped past any id already taken.
fn next_order_id(orders: &[OrderRecord], now: DateTime<Utc>) -> String {
    let mut millis = now.timestamp_millis();
    loop {
        let candidate = format!("ORD-{}", millis);
        if !orders.iter().any(|order| order.order_id == candidate) {
            return candidate;
        }
        millis += 1;
    }
}
