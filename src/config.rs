use serde::Deserialize;

use crate::constants::{
    N_OUTLETS, POUR_TIME_PER_UNIT_IN_MS, QUEUE_CAPACITY_PER_OUTLET, X_PERCENTAGE_OF_CAPACITY,
};

/// Configuracion de la maquina. Los campos que no se indican toman el valor de `constants`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MachineConfig {
    /// Cantidad de salidas, y de dispensadores en el pool
    pub outlets: usize,
    pub threshold_percentage: u64,
    pub pour_time_per_unit_in_ms: u64,
    /// Pedidos que pueden esperar en la cola antes de frenar al que pide.
    /// Si no se indica, se dimensiona segun la cantidad de salidas.
    pub queue_capacity: Option<usize>,
}

impl MachineConfig {
    pub fn new(outlets: usize, threshold_percentage: u64) -> MachineConfig {
        MachineConfig {
            outlets,
            threshold_percentage,
            ..MachineConfig::default()
        }
    }

    pub fn with_pour_time(mut self, pour_time_per_unit_in_ms: u64) -> MachineConfig {
        self.pour_time_per_unit_in_ms = pour_time_per_unit_in_ms;
        self
    }

    pub fn with_queue_capacity(mut self, queue_capacity: usize) -> MachineConfig {
        self.queue_capacity = Some(queue_capacity);
        self
    }

    pub fn queue_capacity(&self) -> usize {
        self.queue_capacity
            .unwrap_or_else(|| self.outlets.max(1) * QUEUE_CAPACITY_PER_OUTLET)
    }
}

impl Default for MachineConfig {
    fn default() -> Self {
        MachineConfig {
            outlets: N_OUTLETS,
            threshold_percentage: X_PERCENTAGE_OF_CAPACITY,
            pour_time_per_unit_in_ms: POUR_TIME_PER_UNIT_IN_MS,
            queue_capacity: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_fill_missing_fields_with_defaults() {
        let config: MachineConfig =
            serde_json::from_str(r#"{ "outlets": 5 }"#).expect("Valid config");
        assert_eq!(5, config.outlets);
        assert_eq!(X_PERCENTAGE_OF_CAPACITY, config.threshold_percentage);
        assert_eq!(POUR_TIME_PER_UNIT_IN_MS, config.pour_time_per_unit_in_ms);
    }

    #[test]
    fn should_size_the_queue_by_the_outlets_read() {
        let config: MachineConfig =
            serde_json::from_str(r#"{ "outlets": 8 }"#).expect("Valid config");
        assert_eq!(8 * QUEUE_CAPACITY_PER_OUTLET, config.queue_capacity());
        assert_eq!(
            MachineConfig::new(8, X_PERCENTAGE_OF_CAPACITY).queue_capacity(),
            config.queue_capacity()
        );
    }

    #[test]
    fn should_keep_an_explicit_queue_capacity() {
        let config: MachineConfig =
            serde_json::from_str(r#"{ "outlets": 8, "queue_capacity": 2 }"#)
                .expect("Valid config");
        assert_eq!(2, config.queue_capacity());
        assert_eq!(1, MachineConfig::new(8, 20).with_queue_capacity(1).queue_capacity());
    }

    #[test]
    fn should_reject_unknown_fields() {
        let config = serde_json::from_str::<MachineConfig>(r#"{ "outlet": 5 }"#);
        assert!(config.is_err());
    }

    #[test]
    fn should_size_the_queue_by_outlets() {
        let config = MachineConfig::new(4, 15).with_pour_time(2);
        assert_eq!(4 * QUEUE_CAPACITY_PER_OUTLET, config.queue_capacity());
        assert_eq!(15, config.threshold_percentage);
        assert_eq!(2, config.pour_time_per_unit_in_ms);
    }
}
