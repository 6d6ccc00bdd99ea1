use co2_app::Snapshot;
use co2_core::{format_co2, format_data_units};

/// Renders the periodic status block printed to stdout.
pub fn render(snapshot: &Snapshot) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "Tracking Start Date: {}",
        snapshot.start_date.format("%Y-%m-%d")
    ));
    lines.push(format!(
        "Data Sent: {}",
        format_data_units(snapshot.lifetime_sent_mb)
    ));
    lines.push(format!(
        "Data Received: {}",
        format_data_units(snapshot.lifetime_received_mb)
    ));
    lines.push(format!(
        "Total Data Used: {}",
        format_data_units(snapshot.lifetime_usage_mb)
    ));
    lines.push(format!("Total CO2: {}", format_co2(snapshot.lifetime_co2_g)));
    lines.push(format!(
        "Current CO2 Rate: {:.2} g/hour",
        snapshot.current_co2_rate_g_per_hour
    ));
    lines.push(format!(
        "Overall Average: {:.2} g/hour",
        snapshot.average_co2_g_per_hour
    ));
    lines.push(format!("Today's CO2: {}", format_co2(snapshot.today_co2_g)));
    lines.push(format!(
        "Projected Yearly CO2: {}",
        format_co2(snapshot.projected_yearly_g)
    ));
    lines.push(format!(
        "Assumed Yearly Baseline: {}",
        format_co2(snapshot.yearly_baseline_g)
    ));
    lines.push(format!(
        "Personal Target: -{}% ({})",
        snapshot.personal_reduction_target_pct,
        format_co2(snapshot.target_g)
    ));
    lines.push(format!("Status: {}", snapshot.status.label()));
    lines.join("\n")
}
