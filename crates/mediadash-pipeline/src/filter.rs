use mediadash_core::{Dataset, FilterSpec, Record};

/// True when `record` satisfies all four predicates of `spec`.
///
/// Dates compare at calendar-day granularity, so a record at 23:59 on
/// `end_date` is included.
#[must_use]
pub fn matches_filter(spec: &FilterSpec, record: &Record) -> bool {
    let day = record.day();
    day >= spec.start_date()
        && day <= spec.end_date()
        && spec.allowed_platforms().contains(&record.platform)
        && spec.allowed_sentiments().contains(&record.sentiment)
        && spec.allowed_media_types().contains(&record.media_type)
}

/// Selects the records of `dataset` matching `spec`, preserving order.
///
/// An empty result is valid; deciding how to present it is up to the caller.
#[must_use]
pub fn filter_dataset(dataset: &Dataset, spec: &FilterSpec) -> Dataset {
    let filtered: Dataset = dataset
        .iter()
        .filter(|r| matches_filter(spec, r))
        .cloned()
        .collect();

    tracing::debug!(
        before = dataset.len(),
        after = filtered.len(),
        start = %spec.start_date(),
        end = %spec.end_date(),
        "dataset filtered"
    );

    filtered
}
