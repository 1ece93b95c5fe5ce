//! Maquina expendedora de bebidas con varias salidas que preparan pedidos en
//! paralelo a partir de un mismo inventario de ingredientes.
pub mod beverage;
pub mod config;
pub mod constants;
pub mod container;
pub mod dispenser;
pub mod errors;
pub mod inventory;
pub mod machine_reader;
pub mod order;
pub mod orders_queue;
pub mod outlet;
pub mod statistics;
pub mod threshold;
pub mod vending_machine;

pub use beverage::{Beverage, Ingredient};
pub use errors::{MachineError, PreparationError};
pub use vending_machine::VendingMachine;
