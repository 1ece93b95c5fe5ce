//! Representacion de la cola de pedidos
use std::{
    collections::VecDeque,
    sync::{Condvar, Mutex},
};

use crate::{errors::MachineError, order::Order};

/// Cola de pedidos a realizar, con una capacidad maxima.
/// Se le agrega el campo `finished` para indicar que no se van a estar cargando más pedidos a la cola.
pub struct OrdersQueue {
    orders: VecDeque<Order>,
    capacity: usize,
    pub finished: bool,
}

impl OrdersQueue {
    pub fn new(capacity: usize) -> OrdersQueue {
        OrdersQueue {
            orders: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
            finished: false,
        }
    }

    pub fn push(&mut self, order: Order) {
        self.orders.push_back(order);
    }

    pub fn pop(&mut self) -> Option<Order> {
        self.orders.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.orders.len() >= self.capacity
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }
}

/// Cola compartida entre la maquina y los dispensadores, junto con sus variables condicionales:
/// `orders_cond` despierta a los dispensadores cuando hay pedidos, `space_cond` a los que
/// esperan lugar para encolar.
pub struct SharedOrdersQueue {
    orders: Mutex<OrdersQueue>,
    orders_cond: Condvar,
    space_cond: Condvar,
}

impl SharedOrdersQueue {
    pub fn new(capacity: usize) -> SharedOrdersQueue {
        SharedOrdersQueue {
            orders: Mutex::new(OrdersQueue::new(capacity)),
            orders_cond: Condvar::new(),
            space_cond: Condvar::new(),
        }
    }

    /// Encola el pedido, esperando si la cola esta llena.
    /// Una vez cerrada la cola ya no se aceptan pedidos.
    pub fn push(&self, order: Order) -> Result<(), MachineError> {
        let mut orders = self
            .space_cond
            .wait_while(self.orders.lock()?, |queue| {
                queue.is_full() && !queue.finished
            })?;
        if orders.finished {
            return Err(MachineError::ShuttingDown);
        }
        orders.push(order);
        self.orders_cond.notify_one();
        Ok(())
    }

    /// Espera el proximo pedido. Devuelve `None` cuando la cola esta vacia y cerrada.
    pub fn pop(&self) -> Result<Option<Order>, MachineError> {
        let mut orders = self
            .orders_cond
            .wait_while(self.orders.lock()?, |queue| {
                queue.is_empty() && !queue.finished
            })?;
        let order = orders.pop();
        if order.is_some() {
            self.space_cond.notify_one();
        }
        Ok(order)
    }

    /// Cierra la cola y despierta a todos los que estan esperando
    pub fn finish(&self) -> Result<(), MachineError> {
        self.orders.lock()?.finished = true;
        self.orders_cond.notify_all();
        self.space_cond.notify_all();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{mpsc, Arc};

    use super::*;
    use crate::beverage::Beverage;

    fn order(id: u64) -> Order {
        let (sender, _) = mpsc::channel();
        Order::new(id, 1, Arc::new(Beverage::new("hot_tea", Vec::new())), sender)
    }

    #[test]
    fn should_create_an_empty_order_queue() {
        let queue = OrdersQueue::new(2);
        assert_eq!(false, queue.finished);
        assert_eq!(true, queue.is_empty());
        assert_eq!(false, queue.is_full());
    }

    #[test]
    fn should_add_an_order_to_the_queue() {
        let mut queue = OrdersQueue::new(2);
        queue.push(order(1));
        assert_eq!(false, queue.finished);
        assert_eq!(false, queue.is_empty());
        assert_eq!(1, queue.len());
    }

    #[test]
    fn should_pop_orders_in_arrival_order() {
        let mut queue = OrdersQueue::new(2);
        queue.push(order(1));
        queue.push(order(2));
        assert_eq!(Some(1), queue.pop().map(|order| order.id));
        assert_eq!(Some(2), queue.pop().map(|order| order.id));
        assert_eq!(true, queue.is_empty());
    }

    #[test]
    fn should_pop_and_return_none_from_the_queue() {
        let mut queue = OrdersQueue::new(2);
        let order = queue.pop();
        assert_eq!(true, order.is_none());
        assert_eq!(true, queue.is_empty());
    }

    #[test]
    fn should_not_take_orders_once_finished() {
        let queue = SharedOrdersQueue::new(2);
        queue.finish().expect("Queue lock");
        assert_eq!(Err(MachineError::ShuttingDown), queue.push(order(1)));
    }

    #[test]
    fn should_give_pending_orders_before_reporting_the_end() {
        let queue = SharedOrdersQueue::new(2);
        queue.push(order(1)).expect("Queue has room");
        queue.finish().expect("Queue lock");
        assert_eq!(Some(1), queue.pop().expect("Queue lock").map(|order| order.id));
        assert!(queue.pop().expect("Queue lock").is_none());
    }

    #[test]
    fn should_be_full_at_capacity() {
        let mut queue = OrdersQueue::new(2);
        queue.push(order(1));
        queue.push(order(2));
        assert_eq!(true, queue.is_full());
    }
}
