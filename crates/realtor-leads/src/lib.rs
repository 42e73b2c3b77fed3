//! # realtor-leads
//!
//! Lead dashboard for the realtor site: pulls contacts from the CRM,
//! classifies them by temperature and renders stats and cards.
//!
//! - [`client`]: `reqwest` client for the contacts endpoint
//! - [`lead`]: contact → [`Lead`] mapping, status and age label
//! - [`stats`]: counters and the [`StatusFilter`]
//! - [`render`]: plain-text cards
//! - [`notice`]: self-expiring banners
//! - [`dashboard`]: the [`LeadDashboard`] controller

#![deny(unsafe_code)]

pub mod client;
pub mod dashboard;
pub mod errors;
pub mod lead;
pub mod notice;
pub mod render;
pub mod stats;

pub use client::{Contact, CrmClient, PropertyValue};
pub use dashboard::{LeadDashboard, LoadingIndicator};
pub use errors::{LeadsError, Result};
pub use lead::{Lead, LeadStatus};
pub use notice::{Notice, NoticeBoard, NoticeKind};
pub use stats::{LeadStats, StatusFilter};
