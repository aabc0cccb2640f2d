//! Pre-fetch screening: is this identifier worth contacting the network
//! for, this run?

use chrono::NaiveDate;

use janwatch_core::InputRecord;
use janwatch_store::UnpostedSet;

/// Decides whether the pipeline should fetch for `record`, in this order:
///
/// 1. `include_unposted` forces a full re-check, ignoring history.
/// 2. A release date strictly after `today` always fetches — pre-release
///    items are expected to still be absent and must be polled.
/// 3. Otherwise fetch only if the identifier is not in the unposted set.
///
/// Identifiers confirmed absent are thus never re-polled until either
/// forced or their listing could plausibly have appeared.
#[must_use]
pub fn should_fetch(
    record: &InputRecord,
    unposted: &UnpostedSet,
    include_unposted: bool,
    today: NaiveDate,
) -> bool {
    if include_unposted {
        return true;
    }
    if record
        .release_date
        .is_some_and(|release_date| release_date > today)
    {
        return true;
    }
    !unposted.contains(&record.identifier)
}
