//! Per-connection cost breakdown of a path, for display.

use std::fmt::Display;

use crate::config::{CostConfig, Criterion};
use crate::network::{Connection, Network, PathfindingCost, Timestamp};
use crate::route::Segment;
use crate::utils;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("A start time is required to cost a schedule by time.")]
    MissingStartTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleRow<'a> {
    pub line: &'a str,
    pub departure_time: Timestamp,
    pub start_stop: &'a str,
    pub arrival_time: Timestamp,
    pub end_stop: &'a str,
    pub cost: PathfindingCost,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Schedule<'a> {
    pub criterion: Criterion,
    pub rows: Vec<ScheduleRow<'a>>,
}

impl<'a> Schedule<'a> {
    /// Costs each connection of `path` on its own.
    ///
    /// By time, a row costs its wait (from `start_time` for the first row, from the previous arrival otherwise)
    /// plus its travel time. By changes, a row costs the change cost when its line differs from the previous row.
    pub fn new(
        path: &[&'a Connection],
        network: &'a Network,
        criterion: Criterion,
        start_time: Option<Timestamp>,
        config: &CostConfig,
    ) -> Result<Self, ScheduleError> {
        let mut rows = Vec::with_capacity(path.len());
        let mut previous: Option<&Connection> = None;

        for &connection in path {
            let cost = match criterion {
                Criterion::Time => {
                    let ready_time = match previous {
                        Some(previous) => previous.arrival_time,
                        None => start_time.ok_or(ScheduleError::MissingStartTime)?,
                    };
                    let wait = connection.departure_time.saturating_sub(ready_time);
                    (wait + connection.travel_time()) as PathfindingCost * config.time_cost_per_sec
                }
                Criterion::Changes => match previous {
                    Some(previous) if previous.line != connection.line => config.change_cost_per_change,
                    _ => 0.,
                },
            };

            rows.push(ScheduleRow {
                line: network.get_line_name(connection.line),
                departure_time: connection.departure_time,
                start_stop: network.get_stop_name(connection.departure_stop),
                arrival_time: connection.arrival_time,
                end_stop: network.get_stop_name(connection.arrival_stop),
                cost,
            });
            previous = Some(connection);
        }

        Ok(Self { criterion, rows })
    }

    /// Flattens the segments of a route into one schedule.
    pub fn from_segments(
        segments: &[Segment<'a>],
        network: &'a Network,
        criterion: Criterion,
        start_time: Option<Timestamp>,
        config: &CostConfig,
    ) -> Result<Self, ScheduleError> {
        let path: Vec<&'a Connection> = segments
            .iter()
            .flat_map(|segment| segment.connections.iter().copied())
            .collect();
        Self::new(&path, network, criterion, start_time, config)
    }

    pub fn total_cost(&self) -> PathfindingCost {
        self.rows.iter().map(|row| row.cost).sum()
    }
}

impl Display for Schedule<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let line_width = self.rows.iter().map(|row| row.line.chars().count()).chain([4]).max().unwrap_or(4);
        let start_width = self.rows.iter().map(|row| row.start_stop.chars().count()).chain([10]).max().unwrap_or(10);
        let end_width = self.rows.iter().map(|row| row.end_stop.chars().count()).chain([8]).max().unwrap_or(8);

        writeln!(
            f,
            "{:<line_width$}  {:<9}  {:<start_width$}  {:<9}  {:<end_width$}  {:>8}",
            "line", "departure", "start_stop", "arrival", "end_stop", "cost"
        )?;
        for row in &self.rows {
            writeln!(
                f,
                "{:<line_width$}  {:<9}  {:<start_width$}  {:<9}  {:<end_width$}  {:>8}",
                row.line,
                utils::get_time_str(row.departure_time),
                row.start_stop,
                utils::get_time_str(row.arrival_time),
                row.end_stop,
                row.cost
            )?;
        }
        writeln!(f, "Total {} cost: {}", self.criterion, self.total_cost())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::parse_time;
    use crate::NetworkBuilder;

    fn t(time: &str) -> Timestamp {
        parse_time(time).unwrap()
    }

    fn sample_network() -> Network {
        let mut builder = NetworkBuilder::new();
        builder.add_connection("1", "A", t("08:05:00"), "B", t("08:10:00")).unwrap();
        builder.add_connection("1", "B", t("08:10:00"), "C", t("08:20:00")).unwrap();
        builder.add_connection("2", "C", t("08:25:00"), "D", t("08:30:00")).unwrap();
        builder.build()
    }

    #[test]
    fn time_costs_include_waiting() {
        let network = sample_network();
        let path: Vec<&Connection> = network.connections.iter().collect();
        let schedule = Schedule::new(&path, &network, Criterion::Time, Some(t("08:00:00")), &CostConfig::default()).unwrap();

        let costs: Vec<PathfindingCost> = schedule.rows.iter().map(|row| row.cost).collect();
        assert_eq!(costs, vec![600., 600., 600.]);
        assert_eq!(schedule.total_cost(), 1800.);
        assert_eq!(schedule.rows[2].line, "2");
        assert_eq!(schedule.rows[2].end_stop, "D");
    }

    #[test]
    fn time_costs_need_a_start_time() {
        let network = sample_network();
        let path: Vec<&Connection> = network.connections.iter().collect();
        let result = Schedule::new(&path, &network, Criterion::Time, None, &CostConfig::default());
        assert_eq!(result, Err(ScheduleError::MissingStartTime));
    }

    #[test]
    fn change_costs_mark_line_switches() {
        let network = sample_network();
        let path: Vec<&Connection> = network.connections.iter().collect();
        let config = CostConfig::default().with_change_cost_per_change(3.);
        let schedule = Schedule::new(&path, &network, Criterion::Changes, None, &config).unwrap();

        let costs: Vec<PathfindingCost> = schedule.rows.iter().map(|row| row.cost).collect();
        assert_eq!(costs, vec![0., 0., 3.]);
    }

    #[test]
    fn segments_are_flattened() {
        let network = sample_network();
        let connections = &network.connections;
        let segments = vec![
            Segment { from: 0, to: 2, connections: vec![&connections[0], &connections[1]] },
            Segment { from: 2, to: 2, connections: Vec::new() },
            Segment { from: 2, to: 3, connections: vec![&connections[2]] },
        ];
        let schedule =
            Schedule::from_segments(&segments, &network, Criterion::Time, Some(t("08:05:00")), &CostConfig::default())
                .unwrap();
        assert_eq!(schedule.rows.len(), 3);
        assert_eq!(schedule.total_cost(), 1500.);
    }

    #[test]
    fn renders_a_table() {
        let network = sample_network();
        let path: Vec<&Connection> = network.connections.iter().collect();
        let schedule = Schedule::new(&path, &network, Criterion::Changes, None, &CostConfig::default()).unwrap();
        let text = schedule.to_string();

        assert!(text.starts_with("line"));
        assert!(text.contains("08:25:00"));
        assert!(text.contains("Total change cost: 1"));
        assert_eq!(text.lines().count(), 5);
    }

    #[test]
    fn columns_are_measured_in_characters() {
        let mut builder = NetworkBuilder::new();
        builder.add_connection("Żółty", "A", t("08:00:00"), "B", t("08:10:00")).unwrap();
        let network = builder.build();
        let path: Vec<&Connection> = network.connections.iter().collect();
        let schedule = Schedule::new(&path, &network, Criterion::Changes, None, &CostConfig::default()).unwrap();
        let text = schedule.to_string();
        let mut lines = text.lines();

        // Five characters of line name plus two spaces of separation.
        let header = lines.next().unwrap();
        assert_eq!(header.find("departure"), Some(7));
        let row = lines.next().unwrap();
        assert_eq!(row.chars().position(|c| c == '0'), Some(7));
    }
}
