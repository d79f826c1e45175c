//! # Event Bus Module
//!
//! Provides a unified event bus for decoupled communication between the
//! layout engine and whatever embeds it.
//!
//! ## Overview
//!
//! The event bus enables publish/subscribe patterns across the engine:
//! - Publishers emit typed events without knowing subscribers
//! - Subscribers filter and receive events of interest
//! - Supports both sync handlers and async receivers
//!
//! The sync layer uses it to surface remote failures to the user after a
//! rollback; the embedding UI subscribes to react with a prompt.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use floorkit_core::event_bus::{event_bus, AppEvent, EventCategory, EventFilter};
//!
//! let subscription = event_bus().subscribe(
//!     EventFilter::Categories(vec![EventCategory::Sync]),
//!     |event| {
//!         if let AppEvent::Sync(e) = event {
//!             println!("sync event: {:?}", e);
//!         }
//!     },
//! );
//!
//! // Unsubscribe when done
//! event_bus().unsubscribe(subscription);
//! ```

mod bus;
mod events;

pub use bus::*;
pub use events::*;
