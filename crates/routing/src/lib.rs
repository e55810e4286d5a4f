//! FuelMaster logging - Routing
//!
//! Compiled channel → file group routing.
//!
//! # Design
//!
//! Routing decisions are made when a channel is created, not per message.
//! The `RoutingTable` is compiled from the `files` section of the logging
//! configuration; a channel receives one `SinkId` per file group whose match
//! condition accepts its name.
//!
//! # Example
//!
//! ```
//! use fuellog_config::{ChannelMatch, FileGroupConfig};
//! use fuellog_routing::{RoutingTable, SinkId};
//!
//! let groups = vec![
//!     FileGroupConfig::new("system", "fuel_master.log"),
//!     FileGroupConfig::new("tx", "pump_transactions.log")
//!         .with_match(ChannelMatch::Exact("PumpMaster".into())),
//! ];
//! let table = RoutingTable::compile(&groups).unwrap();
//!
//! let sinks: Vec<SinkId> = table.route("PumpMaster");
//! assert_eq!(sinks.len(), 2);
//! ```

mod error;
mod sink_id;
mod table;


pub use error::{Result, RoutingError};
pub use sink_id::SinkId;
pub use table::RoutingTable;
