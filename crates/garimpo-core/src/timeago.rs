//! Humanized elapsed-time labels for the public catalog (pt-BR).

use chrono::{DateTime, Utc};

/// Renders how long ago `date` was, relative to `now`.
///
/// Under a minute: `"Agora mesmo"`. Under an hour/day/week: a pluralized
/// minutes/hours/days phrase. Anything older (or in the future, from clock
/// skew) falls back to a `dd/mm/yyyy` date.
#[must_use]
pub fn time_elapsed(date: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - date).num_seconds();

    if (0..60).contains(&seconds) {
        return "Agora mesmo".to_string();
    }

    let minutes = seconds / 60;
    if (1..60).contains(&minutes) {
        let unit = if minutes == 1 { "minuto" } else { "minutos" };
        return format!("{minutes} {unit} atras");
    }

    let hours = minutes / 60;
    if (1..24).contains(&hours) {
        let unit = if hours == 1 { "hora" } else { "horas" };
        return format!("{hours} {unit} atras");
    }

    let days = hours / 24;
    if (1..7).contains(&days) {
        let unit = if days == 1 { "dia" } else { "dias" };
        return format!("{days} {unit} atras");
    }

    date.format("%d/%m/%Y").to_string()
}
