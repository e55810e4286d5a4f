//! Routing table for channel → file group lookup
//!
//! The table is compiled once per configuration. Channels resolve their
//! file groups on creation and cache the result, so `route()` never runs on
//! the emit path.

use fuellog_config::{ChannelMatch, FileGroupConfig};

use crate::{Result, RoutingError, SinkId};

/// A compiled match rule
#[derive(Debug, Clone)]
struct Rule {
    condition: ChannelMatch,
    sink: SinkId,
}

/// Pre-compiled routing table
///
/// Maps channel names to the file groups that receive them. Rules keep
/// configuration order; a channel goes to every group it matches.
///
/// # Example
///
/// ```
/// use fuellog_config::FileGroupConfig;
/// use fuellog_routing::{RoutingTable, SinkId};
///
/// let table = RoutingTable::compile(&FileGroupConfig::defaults()).unwrap();
///
/// // Driver traffic lands in the system file and the driver file
/// assert_eq!(table.route("mekser.driver"), vec![SinkId::new(0), SinkId::new(1)]);
///
/// // Everything else only in the system file
/// assert_eq!(table.route("API"), vec![SinkId::new(0)]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RoutingTable {
    /// Rules in configuration order
    rules: Vec<Rule>,

    /// Group names, indexed by SinkId
    group_names: Vec<String>,
}

impl RoutingTable {
    /// Create a new empty routing table
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile a routing table from file group configuration
    ///
    /// # Errors
    ///
    /// Returns error on duplicate group names or more groups than `SinkId`
    /// can address.
    pub fn compile(groups: &[FileGroupConfig]) -> Result<Self> {
        let max = SinkId::MAX as usize + 1;
        if groups.len() > max {
            return Err(RoutingError::TooManyGroups {
                count: groups.len(),
                max,
            });
        }

        let mut table = Self {
            rules: Vec::with_capacity(groups.len()),
            group_names: Vec::with_capacity(groups.len()),
        };
        for group in groups {
            table.add_group(&group.name, group.match_condition.clone())?;
        }
        Ok(table)
    }

    /// Register a file group and get its ID
    ///
    /// # Errors
    ///
    /// Returns error if a group with this name already exists or the table is full.
    pub fn add_group(&mut self, name: impl Into<String>, condition: ChannelMatch) -> Result<SinkId> {
        let name = name.into();
        if self.group_names.iter().any(|existing| *existing == name) {
            return Err(RoutingError::duplicate_group(name));
        }

        let index = u16::try_from(self.group_names.len()).map_err(|_| {
            RoutingError::TooManyGroups {
                count: self.group_names.len() + 1,
                max: SinkId::MAX as usize + 1,
            }
        })?;

        let sink = SinkId::new(index);
        self.group_names.push(name);
        self.rules.push(Rule { condition, sink });
        Ok(sink)
    }

    /// File groups that receive messages from this channel, in configuration order
    pub fn route(&self, channel: &str) -> Vec<SinkId> {
        self.rules
            .iter()
            .filter(|rule| rule.condition.matches(channel))
            .map(|rule| rule.sink)
            .collect()
    }

    /// Get the number of registered groups
    #[inline]
    pub fn group_count(&self) -> usize {
        self.group_names.len()
    }
}
