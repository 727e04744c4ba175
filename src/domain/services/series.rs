use serde::Deserialize;
use crate::domain::models::reservation::Reservation;

/// Whether a mutation applies to one occurrence or the whole series.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MutationScope {
    #[default]
    Single,
    All,
}

/// A reservation belongs to a series when it defines a recurrence, points
/// at a parent, is referenced as a parent, or shares a parent with a
/// sibling occurrence.
pub fn is_part_of_series(reservation: &Reservation, all: &[Reservation]) -> bool {
    if reservation.recurrence_json.is_some() {
        return true;
    }
    if reservation.parent_reservation_id.is_some() {
        return true;
    }
    if all.iter().any(|r| r.parent_reservation_id.as_deref() == Some(reservation.id.as_str())) {
        return true;
    }

    false
}

/// Resolves which reservation id a scoped mutation targets. `All` retargets
/// to the series parent (the reservation itself when it is the parent);
/// cascading to the children by `parent_reservation_id` is the store's job.
/// `Single` always targets the reservation's own id.
pub fn resolve_target<'a>(reservation: &'a Reservation, scope: MutationScope) -> &'a str {
    match scope {
        MutationScope::All => reservation
            .parent_reservation_id
            .as_deref()
            .unwrap_or(reservation.id.as_str()),
        MutationScope::Single => reservation.id.as_str(),
    }
}
