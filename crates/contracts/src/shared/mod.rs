pub mod api_error;
pub mod debounce;
pub mod download;
pub mod focus;
