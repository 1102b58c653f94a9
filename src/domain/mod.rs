// Domain layer: budget models and ports. Row prices are parsed through core::money.

pub mod model;
pub mod ports;
