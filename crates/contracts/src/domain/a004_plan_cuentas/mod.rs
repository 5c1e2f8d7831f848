pub mod aggregate;

pub use aggregate::{buscar_cuenta, CuentaContable, CuentaId};
