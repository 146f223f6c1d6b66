pub mod flows;
pub mod gateway;
