pub mod cuenta_input;
