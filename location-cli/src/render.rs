//! Plain-text tables for a [`LocationInfoDto`].

use location_core::LocationInfoDto;
use num_format::{Locale, ToFormattedString};

const NO_INFO: &str = "No information";

pub fn country_table(info: &LocationInfoDto) -> String {
    let country = &info.location;

    let languages = country
        .languages
        .iter()
        .map(|l| format!("{} ({})", l.name, l.native_name))
        .collect::<Vec<_>>()
        .join(", ");

    tabulate(
        &[
            "Country",
            "Capital",
            "Latitude",
            "Longitude",
            "Subregion",
            "Area (km²)",
            "Languages",
            "Population",
            "Exchange rates",
        ],
        &[vec![
            country.name.clone(),
            country.capital.clone(),
            opt_number(country.capital_latitude),
            opt_number(country.capital_longitude),
            country.subregion.clone(),
            opt_number(country.area),
            languages,
            format_population(country.population),
            format_rates(info),
        ]],
    )
}

pub fn weather_table(info: &LocationInfoDto) -> String {
    let weather = &info.weather;

    tabulate(
        &[
            "Description",
            "Temperature (°C)",
            "Wind (m/s)",
            "Visibility (m)",
            "Time zone",
        ],
        &[vec![
            weather.description.clone(),
            format!("{:.1}", weather.temp),
            format!("{:.1}", weather.wind_speed),
            weather.visibility.to_string(),
            format_timezone(weather.timezone),
        ]],
    )
}

pub fn news_table(info: &LocationInfoDto) -> String {
    let news = match &info.news {
        None => return "News are not available.".to_string(),
        Some(news) if news.is_empty() => return "No news found.".to_string(),
        Some(news) => news,
    };

    let rows: Vec<Vec<String>> = news
        .iter()
        .map(|n| {
            vec![
                n.source.clone(),
                n.title.clone(),
                n.url.clone(),
                n.published_at.format("%Y-%m-%d %H:%M").to_string(),
                n.description.clone(),
            ]
        })
        .collect();

    tabulate(&["Source", "Title", "Link", "Published", "Description"], &rows)
}

/// `+05:30 UTC` style label for an offset in hours.
pub fn format_timezone(hours: f64) -> String {
    let sign = if hours < 0.0 { '-' } else { '+' };
    let total_minutes = (hours.abs() * 60.0).round() as u64;
    format!("{sign}{:02}:{:02} UTC", total_minutes / 60, total_minutes % 60)
}

/// Thousands grouped with dots: `9.894.888`.
pub fn format_population(population: u64) -> String {
    population.to_formatted_string(&Locale::de)
}

/// Price of one unit of each of the country's currencies in the base currency.
fn format_rates(info: &LocationInfoDto) -> String {
    let rates: Vec<String> = info
        .location
        .currencies
        .iter()
        .filter_map(|c| {
            let rate = info.currency_rates.get(&c.code)?;
            (*rate > 0.0).then(|| format!("{} = {:.2} RUB", c.code, 1.0 / rate))
        })
        .collect();

    if rates.is_empty() {
        NO_INFO.to_string()
    } else {
        rates.join(", ")
    }
}

fn opt_number(value: Option<f64>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| NO_INFO.to_string())
}

fn tabulate(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();

    let mut out = vec![
        line(headers.iter().copied(), &widths),
        line(rule.iter().map(String::as_str), &widths),
    ];
    for row in rows {
        out.push(line(row.iter().map(String::as_str), &widths));
    }
    out.join("\n")
}

fn line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths.iter().copied())
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}
