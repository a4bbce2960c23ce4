use serde::Serialize;

use super::generator::ClusterPoint;

/// Summary of one cluster for the legend panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterStats {
    pub label: usize,
    pub count: usize,
    #[serde(rename = "meanDemandKWh")]
    pub mean_demand_kwh: f64,
    #[serde(rename = "meanTemperatureF")]
    pub mean_temperature_f: f64,
    pub mean_humidity_pct: f64,
}

/// Per-cluster counts and attribute means for labels `0..cluster_count`.
///
/// Points labelled `>= cluster_count` are ignored. An empty cluster reports
/// zero for every mean.
pub fn summarize(points: &[ClusterPoint], cluster_count: usize) -> Vec<ClusterStats> {
    let mut stats: Vec<ClusterStats> = (0..cluster_count)
        .map(|label| ClusterStats {
            label,
            count: 0,
            mean_demand_kwh: 0.0,
            mean_temperature_f: 0.0,
            mean_humidity_pct: 0.0,
        })
        .collect();

    for p in points {
        if let Some(s) = stats.get_mut(p.cluster_label) {
            s.count += 1;
            s.mean_demand_kwh += p.demand_kwh;
            s.mean_temperature_f += p.temperature_f;
            s.mean_humidity_pct += p.humidity_pct;
        }
    }

    for s in stats.iter_mut().filter(|s| s.count > 0) {
        let n = s.count as f64;
        s.mean_demand_kwh /= n;
        s.mean_temperature_f /= n;
        s.mean_humidity_pct /= n;
    }
    stats
}
