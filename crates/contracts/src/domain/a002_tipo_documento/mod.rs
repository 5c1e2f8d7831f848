pub mod aggregate;
pub mod workflow;

pub use aggregate::{FuncionEspecial, TipoDocumento, TipoDocumentoId};
pub use workflow::{Parte, Secciones, WorkflowEvent, WorkflowState};
