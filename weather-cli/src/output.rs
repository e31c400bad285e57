use chrono::Local;
use weather_tool::WeatherReport;

/// Multi-line, human-readable rendering of a lookup.
pub fn render_report(report: &WeatherReport) -> String {
    let summary = &report.summary;
    let observed = report.current.observed_at.with_timezone(&Local);

    format!(
        "{location} ({lat:.4}, {lon:.4})\n\
         Observed:    {observed}\n\
         Conditions:  {conditions}\n\
         Temperature: {temp:.1}°C (feels like {feels:.1}°C)\n\
         Humidity:    {humidity:.0}%\n\
         Wind:        {wind:.1} km/h, gusts {gust:.1} km/h",
        location = summary.location,
        lat = report.place.latitude,
        lon = report.place.longitude,
        observed = observed.format("%Y-%m-%d %H:%M %Z"),
        conditions = summary.conditions,
        temp = summary.temperature,
        feels = summary.feels_like,
        humidity = summary.humidity,
        wind = summary.wind_speed,
        gust = summary.wind_gust,
    )
}
