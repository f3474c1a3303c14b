use std::fmt::Write;

use crate::models::{AggregateDrain, DrainEstimate, Place, Town};

/// Format a dollar amount rounded to whole dollars, e.g. `$3,881,329`
pub fn format_money(amount: f64) -> String {
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{}${}", sign, format_count(rounded.abs() as u64))
}

/// Format an integer with thousands separators
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// One line per search result, numbered from 1
pub fn render_places(places: &[Place]) -> String {
    let mut out = String::new();
    for (i, place) in places.iter().enumerate() {
        let _ = write!(out, "  {:>2}. {}  Pop. {}", i + 1, place.display_name, format_count(place.population));
        if let Some(income) = place.median_household_income {
            let _ = write!(out, " · ${:.0}k HHI", income as f64 / 1000.0);
        }
        let _ = writeln!(out, "  ({})", place.official_name);
    }
    out
}

/// Card for a single town and its fee projection
pub fn render_town(position: usize, town: &Town, estimate: &DrainEstimate) -> String {
    let source = if town.is_manual_entry { "Manual entry" } else { "Census data" };
    let id = town.id.simple();

    let mut out = String::new();
    let _ = writeln!(
        out,
        "[{}] {}, {}  ({})  id {}",
        position,
        town.name,
        town.state,
        source,
        &id[..8]
    );

    let _ = write!(out, "    Pop. {}", format_count(town.population));
    if let Some(income) = town.median_household_income {
        let _ = write!(out, " · Median HHI {}", format_money(income as f64));
    }
    let _ = writeln!(out, " · ${:.0}/person/day", estimate.daily_spend_per_person);

    let _ = writeln!(
        out,
        "    Daily {} · Weekly {} · Monthly {} · Yearly {}",
        format_money(estimate.fees_daily),
        format_money(estimate.fees_weekly),
        format_money(estimate.fees_monthly),
        format_money(estimate.fees_yearly),
    );
    let _ = writeln!(
        out,
        "    Card volume {}/day · ~{} card txns/day · {}/person/yr in fees",
        format_money(estimate.total_card_volume),
        format_count(estimate.estimated_daily_transactions),
        format_money(estimate.yearly_fees_per_person),
    );
    out
}

pub fn render_totals(aggregate: &AggregateDrain) -> String {
    format!(
        "{} towns · {} people · Leaving daily {} · Weekly {} · Monthly {} · Yearly {}\n",
        aggregate.town_count,
        format_count(aggregate.total_population),
        format_money(aggregate.fees_daily),
        format_money(aggregate.fees_weekly),
        format_money(aggregate.fees_monthly),
        format_money(aggregate.fees_yearly),
    )
}
