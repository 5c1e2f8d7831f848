pub mod a001_documento;
pub mod a002_tipo_documento;
pub mod a003_tercero;
pub mod a004_plan_cuentas;
pub mod a005_centro_costo;
pub mod a006_factura;
pub mod a007_nomina;
pub mod a008_produccion;
