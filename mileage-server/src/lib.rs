//! Mileage-run itinerary finder.
//!
//! A web application that answers: "starting from this airport, which
//! round trips get my spend over the threshold, and which of them is
//! the best use of my time and money?"

pub mod catalog;
pub mod domain;
pub mod planner;
pub mod web;
