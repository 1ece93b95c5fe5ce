//! Dispenser de la maquina. Toma los pedidos de la cola y los prepara en la salida pedida.
use std::{
    sync::{Arc, Mutex, RwLock},
    thread,
    time::Duration,
};

use log::{debug, error, info, warn};

use crate::{
    errors::MachineError,
    inventory::Inventory,
    order::{Order, OrderResult, PreparedBeverage},
    orders_queue::SharedOrdersQueue,
    outlet::OutletRegistry,
    statistics::Statistics,
};

/// Representa a un dispenser del pool de la maquina.
/// Tiene referencias a la cola de pedidos, las salidas, el inventario, y los contadores de pedidos procesados
pub struct Dispenser {
    id: usize,
    orders_queue: Arc<SharedOrdersQueue>,
    outlets: Arc<OutletRegistry>,
    inventory: Arc<Mutex<Inventory>>,
    statistics: Arc<RwLock<Statistics>>,
    pour_time_per_unit_in_ms: u64,
}

impl Dispenser {
    pub fn new(
        id: usize,
        orders_queue: Arc<SharedOrdersQueue>,
        outlets: Arc<OutletRegistry>,
        inventory: Arc<Mutex<Inventory>>,
        statistics: Arc<RwLock<Statistics>>,
        pour_time_per_unit_in_ms: u64,
    ) -> Dispenser {
        Dispenser {
            id,
            orders_queue,
            outlets,
            inventory,
            statistics,
            pour_time_per_unit_in_ms,
        }
    }

    /// Procesa pedidos hasta que la cola este vacia y cerrada
    pub fn handle_orders(&self) -> Result<(), MachineError> {
        while let Some(order) = self.orders_queue.pop()? {
            debug!(
                "[DISPENSER {}] Takes order {} ({} in outlet {})",
                self.id,
                order.id,
                order.beverage.name(),
                order.outlet_id
            );
            let result = self.process_order(&order);
            self.log_outcome(&order, &result);
            let prepared = result.is_ok();
            order.report(result);
            if let Err(err) = self.update_statistics(prepared) {
                error!("[DISPENSER {}] Could not count order {}: {}", self.id, order.id, err);
            }
        }
        debug!("[DISPENSER {}] No more orders, finishing", self.id);
        Ok(())
    }

    fn process_order(&self, order: &Order) -> OrderResult {
        let outlet = self.outlets.try_acquire(order.outlet_id)?;

        let running_low = {
            let mut inventory = self.inventory.lock()?;
            inventory.deduct(order.beverage.recipe())?;
            inventory.low_ingredients()
        };

        self.pour(order);
        info!(
            "[DISPENSER {}] {} is prepared in outlet {}",
            self.id,
            order.beverage.name(),
            outlet.id()
        );
        for ingredient in running_low {
            warn!("[DISPENSER {}] {} is running low", self.id, ingredient);
        }

        Ok(PreparedBeverage {
            order_id: order.id,
            outlet_id: outlet.id(),
            beverage: order.beverage.name().to_string(),
        })
    }

    /// Simula el tiempo de servir la bebida. La salida sigue ocupada pero el inventario ya esta libre.
    fn pour(&self, order: &Order) {
        let millis = self
            .pour_time_per_unit_in_ms
            .saturating_mul(order.beverage.total_quantity());
        if 0 < millis {
            thread::sleep(Duration::from_millis(millis));
        }
    }

    fn log_outcome(&self, order: &Order, result: &OrderResult) {
        match result {
            Ok(_) => {}
            Err(MachineError::Rejected(reason)) => {
                info!(
                    "[DISPENSER {}] Skipped order {}, {} cannot be prepared: {}",
                    self.id,
                    order.id,
                    order.beverage.name(),
                    reason
                );
            }
            Err(err) => {
                error!("[DISPENSER {}] Error processing order {}: {}", self.id, order.id, err);
            }
        }
    }

    fn update_statistics(&self, prepared: bool) -> Result<(), MachineError> {
        let mut statistics = self.statistics.write()?;
        if prepared {
            statistics.processed += 1;
        } else {
            statistics.rejected += 1;
        }
        Ok(())
    }
}
