use thiserror::Error;

/// Motivos por los que se rechaza un pedido. Ninguno es fatal para la maquina:
/// solo termina ese pedido y deja el estado como estaba.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PreparationError {
    #[error("{0} is not a valid beverage")]
    UnknownBeverage(String),

    #[error("invalid outlet: {0}")]
    UnknownOutlet(usize),

    #[error("outlet {0} is busy")]
    OutletBusy(usize),

    #[error("{0} is not available")]
    IngredientUnavailable(String),

    #[error("{0} is not sufficient")]
    IngredientInsufficient(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MachineError {
    #[error(transparent)]
    Rejected(#[from] PreparationError),

    #[error("a lock of the machine was poisoned")]
    LockError,

    #[error("the machine is shutting down, no more orders are taken")]
    ShuttingDown,

    #[error("the dispenser finished without reporting the order")]
    Disconnected,
}

impl<T> From<std::sync::PoisonError<T>> for MachineError {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        MachineError::LockError
    }
}

/// Errores al leer la descripcion de la maquina
#[derive(Debug, Error)]
pub enum ReaderError {
    #[error("could not read the machine file: {0}")]
    FileReaderError(#[from] std::io::Error),

    #[error("invalid machine file: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("invalid machine setup: {0}")]
    InvalidSetup(String),
}
