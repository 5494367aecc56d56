//! Per-facility aggregation of scored reviews.

pub mod facility;
pub mod series;

pub use facility::{aggregate, facility_overview, FacilityOverview};
pub use series::{backend_series, star_series};
