//! Parametros de configuracion por defecto de la maquina expendedora

/// Cantidad de dispensadores (salidas) que tiene la maquina
pub const N_OUTLETS: usize = 3;

/// Porcentaje de la capacidad por debajo del cual se alerta que un ingrediente se esta acabando
pub const X_PERCENTAGE_OF_CAPACITY: u64 = 20;

/// Tiempo (en ms) que tarda en servirse cada unidad de ingrediente.
/// Con 0 la preparacion es instantanea.
pub const POUR_TIME_PER_UNIT_IN_MS: u64 = 0;

/// Cantidad maxima de pedidos esperando a ser tomados por un dispensador, por cada salida.
/// Si la cola esta llena el que hace el pedido espera a que se libere lugar.
pub const QUEUE_CAPACITY_PER_OUTLET: usize = 16;

/// Indica cuanto tiempo se debe de esperar (por lo menos) para imprimir por pantalla las estadisticas de la maquina
pub const STATISTICS_WAIT_IN_MS: u64 = 50;

/// Archivo con la descripcion de la maquina que se usa si no se indica otro
pub const DEFAULT_MACHINE_FILE: &str = "machine.json";
