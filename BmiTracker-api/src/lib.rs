// BMI Tracker API lib.rs
//
// This is the main library file for the BMI Tracker API.
// It exposes the router, configuration and public entities.

// Public modules
pub mod api;
pub mod config;
pub mod entities;
pub mod openapi;
