use cityweather_core::{
    WeatherError, WeatherReport, format_day_label, format_local_time,
    model::{icon_url, round_temperature},
};

const UNKNOWN_TIME: &str = "--:--";

/// Current conditions block followed by the daily forecast cards.
pub fn report(report: &WeatherReport, icon_base_url: &str) -> String {
    let cur = &report.current;
    let unit = report.units.symbol();
    let offset = cur.timezone_offset_seconds;
    let clock = |ts| format_local_time(ts, offset).unwrap_or_else(|| UNKNOWN_TIME.to_string());

    let mut out = String::new();
    out.push_str(&format!("{}, {}\n", cur.location_name, cur.country_code));
    out.push_str(&format!(
        "  {}{}  {}\n",
        round_temperature(cur.temperature),
        unit,
        cur.condition_description
    ));
    out.push_str(&format!("  Icon:       {}\n", icon_url(icon_base_url, &cur.icon_id)));
    out.push_str(&format!("  Local Time: {}\n", clock(cur.timestamp)));
    out.push_str(&format!("  Sunrise:    {}\n", clock(cur.sunrise_timestamp)));
    out.push_str(&format!("  Sunset:     {}\n", clock(cur.sunset_timestamp)));

    if !report.forecast.is_empty() {
        out.push_str("\n5-Day Forecast\n");
        for day in &report.forecast {
            let label = format_day_label(day.timestamp, offset).unwrap_or_default();
            out.push_str(&format!(
                "  {:<12} {:>4}{}  {:<20} {}\n",
                label,
                round_temperature(day.temperature),
                unit,
                day.condition_description,
                icon_url(icon_base_url, &day.icon_id),
            ));
        }
    }

    out
}

/// Blocking notice shown when a fetch fails.
pub fn failure(err: &WeatherError) -> String {
    if err.is_not_found() {
        "City not found!".to_string()
    } else {
        format!("Could not load weather: {err}")
    }
}
