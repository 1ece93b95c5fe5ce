//! Pedidos que se le hacen a la maquina y su resultado.
use std::sync::{
    mpsc::{Receiver, Sender, TryRecvError},
    Arc,
};

use log::debug;

use crate::{beverage::Beverage, errors::MachineError};

pub type OrderResult = Result<PreparedBeverage, MachineError>;

/// Pedido de una bebida en una salida, ya validado contra el catalogo.
#[derive(Debug)]
pub struct Order {
    pub id: u64,
    pub outlet_id: usize,
    pub beverage: Arc<Beverage>,
    reply: Sender<OrderResult>,
}

impl Order {
    pub fn new(
        id: u64,
        outlet_id: usize,
        beverage: Arc<Beverage>,
        reply: Sender<OrderResult>,
    ) -> Order {
        Order {
            id,
            outlet_id,
            beverage,
            reply,
        }
    }

    /// Informa el resultado. Si nadie lo espera se descarta.
    pub fn report(&self, result: OrderResult) {
        if self.reply.send(result).is_err() {
            debug!("[ORDER {}] Nobody is waiting for the result", self.id);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedBeverage {
    pub order_id: u64,
    pub outlet_id: usize,
    pub beverage: String,
}

/// Comprobante de un pedido ya encolado. Se puede descartar si no interesa el resultado.
#[derive(Debug)]
pub struct Ticket {
    pub order_id: u64,
    outcome: Receiver<OrderResult>,
}

impl Ticket {
    pub fn new(order_id: u64, outcome: Receiver<OrderResult>) -> Ticket {
        Ticket { order_id, outcome }
    }

    /// Bloquea hasta que algun dispensador termine con el pedido
    pub fn wait(self) -> OrderResult {
        self.outcome.recv().map_err(|_| MachineError::Disconnected)?
    }

    pub fn try_outcome(&self) -> Option<OrderResult> {
        match self.outcome.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(MachineError::Disconnected)),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use super::*;

    #[test]
    fn should_deliver_the_result_to_the_ticket() {
        let (sender, receiver) = mpsc::channel();
        let order = Order::new(7, 1, Arc::new(Beverage::new("hot_tea", Vec::new())), sender);
        let ticket = Ticket::new(7, receiver);
        assert!(ticket.try_outcome().is_none());

        order.report(Ok(PreparedBeverage {
            order_id: 7,
            outlet_id: 1,
            beverage: "hot_tea".to_string(),
        }));

        let prepared = ticket.wait().expect("Order was prepared");
        assert_eq!(7, prepared.order_id);
        assert_eq!("hot_tea", prepared.beverage);
    }

    #[test]
    fn should_report_a_disconnected_dispenser() {
        let (sender, receiver) = mpsc::channel();
        let order = Order::new(1, 1, Arc::new(Beverage::new("hot_tea", Vec::new())), sender);
        let ticket = Ticket::new(1, receiver);

        drop(order);

        assert_eq!(Err(MachineError::Disconnected), ticket.wait());
    }

    #[test]
    fn should_not_fail_when_the_ticket_was_dropped() {
        let (sender, receiver) = mpsc::channel();
        let order = Order::new(1, 1, Arc::new(Beverage::new("hot_tea", Vec::new())), sender);
        drop(receiver);

        order.report(Err(MachineError::ShuttingDown));
    }
}
