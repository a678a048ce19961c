//! Plain data row written once per completed cycle.

/// Summary of one cycle, as read from the `cycle_end` payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleSummaryRow {
    /// 1-based cycle index.
    pub cycle:         i64,
    pub total_cycles:  i64,
    /// Discharge capacity at the end of the cycle; `None` if not reported.
    pub capacity_ah:   Option<f64>,
    pub min_voltage_v: Option<f64>,
}

impl CycleSummaryRow {
    pub const HEADER: [&'static str; 4] = ["cycle", "total_cycles", "capacity_ah", "min_voltage_v"];

    pub(crate) fn to_record(self) -> [String; 4] {
        let opt = |v: Option<f64>| v.map(|x| x.to_string()).unwrap_or_default();
        [
            self.cycle.to_string(),
            self.total_cycles.to_string(),
            opt(self.capacity_ah),
            opt(self.min_voltage_v),
        ]
    }
}
