pub mod api_utils;
pub mod date_utils;
pub mod debounce;
pub mod export;
pub mod focus;
pub mod http;
pub mod icons;
pub mod message_bar;
pub mod number_format;
pub mod page_frame;
pub mod page_standard;
