//! Data layer: report text, parsed tables, and step curves.
//!
//! Architecture:
//! ```text
//!   modal output .txt
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  locate markers, slice fixed-width fields → ModalReport
//!   └──────────┘
//!        │
//!        ▼
//!   ┌─────────────┐
//!   │ ModalReport  │  mode count, total mass, AxisTable × 3
//!   └─────────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │   step    │  cumulative ratios → StepCurve (2 points per mode)
//!   └──────────┘
//! ```

pub mod error;
pub mod loader;
pub mod model;
pub mod step;
