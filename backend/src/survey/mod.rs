//! Survey domain operations.
//!
//! Each operation takes the store explicitly and re-reads whatever tables it
//! needs, so nothing here holds state between calls:
//! - `catalog`: parse and validate an uploaded order spreadsheet, replace the catalog
//! - `links`: generate, resolve and reset survey tokens
//! - `responses`: record a customer's rating, first write wins
//! - `eligibility`: which orders may still receive a link
//! - `report`: dashboard counters, joined table and CSV export
//! - `route`: two-way dispatch between the survey form and the dashboard

pub mod catalog;
pub mod eligibility;
pub mod links;
pub mod report;
pub mod responses;
pub mod route;
