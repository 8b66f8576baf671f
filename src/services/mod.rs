pub mod calculator_service;
pub mod orientation;
pub mod presentation;
pub mod solar_engine;
