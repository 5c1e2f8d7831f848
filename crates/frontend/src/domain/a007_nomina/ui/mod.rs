pub mod liquidacion;
