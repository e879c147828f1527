use time::{
    format_description::{well_known::Rfc3339, FormatItem},
    macros::format_description,
    OffsetDateTime,
};

// larghezza fissa: l'ordine lessicografico coincide con quello cronologico
const TIMESTAMP_FORMAT: &[FormatItem<'static>] = format_description!(
    "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
);

/// Istante corrente in millisecondi Unix (UTC).
pub fn now_millis() -> i64 {
    let nanos = OffsetDateTime::now_utc().unix_timestamp_nanos();
    (nanos / 1_000_000) as i64
}

/// Formatta millisecondi Unix come RFC3339 UTC (es. "2025-11-02T12:34:56.789Z").
pub fn format_timestamp(millis: i64) -> Result<String, time::Error> {
    let at = OffsetDateTime::from_unix_timestamp_nanos(i128::from(millis) * 1_000_000)?;
    Ok(at.format(TIMESTAMP_FORMAT)?)
}

/// Inverso di `format_timestamp`; accetta qualunque RFC3339.
pub fn parse_timestamp(s: &str) -> Option<i64> {
    let at = OffsetDateTime::parse(s, &Rfc3339).ok()?;
    Some((at.unix_timestamp_nanos() / 1_000_000) as i64)
}
