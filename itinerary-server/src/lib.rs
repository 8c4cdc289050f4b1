//! Bus itinerary planner server.
//!
//! A web application that answers: "Which buses, and which changes between
//! them, take me from here to there with the least walking?"

pub mod cache;
pub mod catalog;
pub mod domain;
pub mod planner;
pub mod web;
