//! Maquina expendedora con varias salidas que comparten un mismo inventario.
use std::{
    collections::{BTreeSet, HashMap},
    sync::{
        atomic::{AtomicU64, Ordering},
        mpsc, Arc, Mutex, RwLock,
    },
    thread::{self, JoinHandle},
};

use log::{debug, error, info};

use crate::{
    beverage::{Beverage, Ingredient},
    config::MachineConfig,
    dispenser::Dispenser,
    errors::{MachineError, PreparationError},
    inventory::Inventory,
    order::{Order, Ticket},
    orders_queue::SharedOrdersQueue,
    outlet::{OutletRegistry, OutletStatus},
    statistics::{Statistics, StatisticsPrinter},
};

/// Los pedidos se encolan y los toma un pool de dispensadores, uno por salida.
/// El inventario entero esta protegido por un unico lock: validar y descontar una
/// receta se hace sin soltarlo. Cada salida tiene su propio lock, que se toma antes
/// que el del inventario.
pub struct VendingMachine {
    beverages: HashMap<String, Arc<Beverage>>,
    orders_queue: Arc<SharedOrdersQueue>,
    outlets: Arc<OutletRegistry>,
    inventory: Arc<Mutex<Inventory>>,
    statistics: Arc<RwLock<Statistics>>,
    dispensers: Mutex<Vec<JoinHandle<()>>>,
    next_order_id: AtomicU64,
}

impl VendingMachine {
    pub fn new<B>(
        outlets: usize,
        inventory: HashMap<Ingredient, u64>,
        beverages: B,
        threshold_percentage: u64,
    ) -> VendingMachine
    where
        B: IntoIterator<Item = Beverage>,
    {
        VendingMachine::with_config(
            MachineConfig::new(outlets, threshold_percentage),
            inventory,
            beverages,
        )
    }

    pub fn with_config<B>(
        config: MachineConfig,
        inventory: HashMap<Ingredient, u64>,
        beverages: B,
    ) -> VendingMachine
    where
        B: IntoIterator<Item = Beverage>,
    {
        let beverages = beverages
            .into_iter()
            .map(|beverage| (beverage.name().to_string(), Arc::new(beverage)))
            .collect();
        let mut machine = VendingMachine {
            beverages,
            orders_queue: Arc::new(SharedOrdersQueue::new(config.queue_capacity())),
            outlets: Arc::new(OutletRegistry::new(config.outlets)),
            inventory: Arc::new(Mutex::new(Inventory::new(
                inventory,
                config.threshold_percentage,
            ))),
            statistics: Arc::new(RwLock::new(Statistics::default())),
            dispensers: Mutex::new(Vec::new()),
            next_order_id: AtomicU64::new(1),
        };
        machine.dispensers = Mutex::new(machine.spawn_dispensers(&config));
        info!(
            "[MACHINE] Ready with {} outlets and {} beverages",
            config.outlets,
            machine.beverages.len()
        );
        machine
    }

    fn spawn_dispensers(&self, config: &MachineConfig) -> Vec<JoinHandle<()>> {
        // Aun sin salidas hace falta alguien que rechace los pedidos
        (0..config.outlets.max(1))
            .map(|id| {
                let dispenser = Dispenser::new(
                    id,
                    self.orders_queue.clone(),
                    self.outlets.clone(),
                    self.inventory.clone(),
                    self.statistics.clone(),
                    config.pour_time_per_unit_in_ms,
                );
                thread::spawn(move || {
                    if let Err(err) = dispenser.handle_orders() {
                        error!("[DISPENSER {}] Stopped: {}", id, err);
                    }
                })
            })
            .collect()
    }

    /// Encola el pedido y vuelve sin esperar a que se prepare.
    /// Una bebida desconocida se rechaza en el momento. Si la cola esta llena
    /// espera a que algun dispensador tome un pedido.
    pub fn prepare(&self, outlet_id: usize, beverage_name: &str) -> Result<Ticket, MachineError> {
        let beverage = match self.beverages.get(beverage_name) {
            Some(beverage) => beverage.clone(),
            None => {
                info!("[MACHINE] {} is not a valid beverage", beverage_name);
                self.statistics.write()?.rejected += 1;
                return Err(PreparationError::UnknownBeverage(beverage_name.to_string()).into());
            }
        };

        let id = self.next_order_id.fetch_add(1, Ordering::Relaxed);
        let (sender, receiver) = mpsc::channel();
        self.orders_queue.push(Order::new(id, outlet_id, beverage, sender))?;
        debug!(
            "[MACHINE] Added order {} ({} in outlet {})",
            id, beverage_name, outlet_id
        );
        Ok(Ticket::new(id, receiver))
    }

    /// Agrega stock de un ingrediente, creandolo si no estaba. Devuelve la nueva cantidad.
    pub fn restock(&self, ingredient: &Ingredient, quantity: u64) -> Result<u64, MachineError> {
        let remaining = self.inventory.lock()?.restock(ingredient, quantity);
        info!(
            "[MACHINE] Restocked {} with {}, there is {}",
            ingredient, quantity, remaining
        );
        Ok(remaining)
    }

    pub fn inventory_snapshot(&self) -> Result<HashMap<Ingredient, u64>, MachineError> {
        Ok(self.inventory.lock()?.snapshot())
    }

    pub fn low_ingredients(&self) -> Result<BTreeSet<Ingredient>, MachineError> {
        Ok(self.inventory.lock()?.low_ingredients())
    }

    pub fn threshold_percentage(&self) -> Result<u64, MachineError> {
        Ok(self.inventory.lock()?.threshold_percentage())
    }

    pub fn set_threshold_percentage(&self, percentage: u64) -> Result<(), MachineError> {
        self.inventory.lock()?.set_threshold_percentage(percentage);
        debug!("[MACHINE] Threshold set to {}%", percentage);
        Ok(())
    }

    pub fn outlets(&self) -> usize {
        self.outlets.len()
    }

    pub fn outlet_status(&self, outlet_id: usize) -> Result<OutletStatus, MachineError> {
        self.outlets.status(outlet_id)
    }

    pub fn statistics(&self) -> Result<Statistics, MachineError> {
        Ok(*self.statistics.read()?)
    }

    pub fn statistics_printer(&self) -> StatisticsPrinter {
        StatisticsPrinter::new(self.statistics.clone(), self.inventory.clone())
    }

    /// Deja de aceptar pedidos y espera a que los dispensadores terminen los que quedan en la cola.
    /// Si otro hilo ya esta cerrando la maquina, espera a que termine.
    pub fn shutdown(&self) -> Result<(), MachineError> {
        self.orders_queue.finish()?;

        // El lock se mantiene hasta terminar los joins
        let mut dispensers = self.dispensers.lock()?;
        if dispensers.is_empty() {
            return Ok(());
        }
        for dispenser in dispensers.drain(..) {
            if dispenser.join().is_err() {
                error!("[MACHINE] A dispenser panicked");
            }
        }
        info!("[MACHINE] Shut down, all orders finished");
        Ok(())
    }
}

impl Drop for VendingMachine {
    fn drop(&mut self) {
        if let Err(err) = self.shutdown() {
            error!("[MACHINE] Error shutting down: {}", err);
        }
    }
}
