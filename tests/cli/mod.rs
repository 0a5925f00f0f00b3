pub mod support;

mod errors;
mod logging;
mod views;
