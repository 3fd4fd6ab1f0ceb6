//! Ordered Collection
//!
//! Scope-local display ordering over a numeric `sort_order` field. New
//! records append to the end of their scope; reordering swaps a record
//! with its neighbor. Nothing here assumes `sort_order` values are dense
//! or unique - a scope damaged by a past partial failure still yields a
//! deterministic order by `(sort_order, name, id)`.

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Anything that participates in a sort scope.
pub trait Sortable {
    fn sort_id(&self) -> Option<&RecordId>;
    fn sort_order(&self) -> i32;
    /// Secondary display key breaking `sort_order` ties
    fn sort_name(&self) -> &str;
}

/// Direction of an adjacent move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    Up,
    Down,
}

/// One half of a planned swap: assign `sort_order` to the record `id`
#[derive(Debug, Clone, PartialEq)]
pub struct SwapAssignment {
    pub id: RecordId,
    pub sort_order: i32,
}

/// The `sort_order` for a record appended to a scope: one past the
/// current maximum, or 1 for an empty scope.
pub fn next_sort_order(existing: &[i32]) -> i32 {
    existing.iter().copied().max().map_or(1, |max| max + 1)
}

/// Plan an adjacent swap for `id` within its scope.
///
/// `rows` is the scope's current state in any order; planning re-sorts by
/// `(sort_order, name, id)` so the neighbor matches what the caller
/// displays, even for rows without a display name. Returns `None` when
/// the move is a no-op: the record is already at the requested edge, the
/// scope has fewer than two rows, or `id` is absent. The returned pair
/// exchanges the two records' `sort_order` values.
pub fn plan_adjacent_swap<T: Sortable>(
    rows: &[T],
    id: &RecordId,
    direction: MoveDirection,
) -> Option<(SwapAssignment, SwapAssignment)> {
    let mut ordered: Vec<(&T, String)> = rows
        .iter()
        .filter_map(|r| r.sort_id().map(|rid| (r, rid.to_string())))
        .collect();
    if ordered.len() < 2 {
        return None;
    }
    ordered.sort_by(|(a, a_id), (b, b_id)| {
        a.sort_order()
            .cmp(&b.sort_order())
            .then_with(|| a.sort_name().cmp(b.sort_name()))
            .then_with(|| a_id.cmp(b_id))
    });

    let idx = ordered.iter().position(|(r, _)| r.sort_id() == Some(id))?;
    let target = match direction {
        MoveDirection::Up => idx.checked_sub(1)?,
        MoveDirection::Down => {
            if idx + 1 >= ordered.len() {
                return None;
            }
            idx + 1
        }
    };

    let (a, _) = ordered[idx];
    let (b, _) = ordered[target];
    Some((
        SwapAssignment {
            id: a.sort_id()?.clone(),
            sort_order: b.sort_order(),
        },
        SwapAssignment {
            id: b.sort_id()?.clone(),
            sort_order: a.sort_order(),
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row {
        id: RecordId,
        sort_order: i32,
        name: String,
    }

    impl Row {
        fn new(key: &str, sort_order: i32) -> Self {
            Self {
                id: RecordId::from_table_key("row", key),
                sort_order,
                name: key.to_string(),
            }
        }
    }

    impl Sortable for Row {
        fn sort_id(&self) -> Option<&RecordId> {
            Some(&self.id)
        }

        fn sort_order(&self) -> i32 {
            self.sort_order
        }

        fn sort_name(&self) -> &str {
            &self.name
        }
    }

    fn id(key: &str) -> RecordId {
        RecordId::from_table_key("row", key)
    }

    #[test]
    fn append_starts_at_one() {
        assert_eq!(next_sort_order(&[]), 1);
    }

    #[test]
    fn append_is_strictly_greater_than_every_existing_value() {
        assert_eq!(next_sort_order(&[1, 2, 3]), 4);
        // Gaps and duplicates from past partial failures do not matter
        assert_eq!(next_sort_order(&[7, 2, 2]), 8);
    }

    #[test]
    fn move_up_swaps_with_previous_neighbor() {
        let rows = vec![Row::new("a", 1), Row::new("b", 2), Row::new("c", 3)];
        let (first, second) = plan_adjacent_swap(&rows, &id("b"), MoveDirection::Up).unwrap();
        assert_eq!(first, SwapAssignment { id: id("b"), sort_order: 1 });
        assert_eq!(second, SwapAssignment { id: id("a"), sort_order: 2 });
    }

    #[test]
    fn move_down_swaps_with_next_neighbor() {
        let rows = vec![Row::new("a", 1), Row::new("b", 2), Row::new("c", 3)];
        let (first, second) = plan_adjacent_swap(&rows, &id("b"), MoveDirection::Down).unwrap();
        assert_eq!(first, SwapAssignment { id: id("b"), sort_order: 3 });
        assert_eq!(second, SwapAssignment { id: id("c"), sort_order: 2 });
    }

    #[test]
    fn edges_are_no_ops() {
        let rows = vec![Row::new("a", 1), Row::new("b", 2)];
        assert!(plan_adjacent_swap(&rows, &id("a"), MoveDirection::Up).is_none());
        assert!(plan_adjacent_swap(&rows, &id("b"), MoveDirection::Down).is_none());
    }

    #[test]
    fn tiny_scopes_are_no_ops() {
        let empty: Vec<Row> = vec![];
        assert!(plan_adjacent_swap(&empty, &id("a"), MoveDirection::Up).is_none());
        let one = vec![Row::new("a", 1)];
        assert!(plan_adjacent_swap(&one, &id("a"), MoveDirection::Down).is_none());
    }

    #[test]
    fn unknown_id_is_a_no_op() {
        let rows = vec![Row::new("a", 1), Row::new("b", 2)];
        assert!(plan_adjacent_swap(&rows, &id("zz"), MoveDirection::Up).is_none());
    }

    #[test]
    fn nameless_ties_fall_back_to_record_id() {
        // Rows with no display name (links) tied on sort_order: the record
        // id decides, so the chosen neighbor does not depend on fetch order.
        let nameless = |key: &str, sort_order: i32| Row {
            id: id(key),
            sort_order,
            name: String::new(),
        };

        let rows = vec![nameless("a", 5), nameless("b", 5), nameless("c", 9)];
        let (first, second) = plan_adjacent_swap(&rows, &id("c"), MoveDirection::Up).unwrap();
        assert_eq!(first.id, id("c"));
        assert_eq!(second.id, id("b"));

        let shuffled = vec![nameless("b", 5), nameless("a", 5), nameless("c", 9)];
        let (first, second) = plan_adjacent_swap(&shuffled, &id("c"), MoveDirection::Up).unwrap();
        assert_eq!(first.id, id("c"));
        assert_eq!(second.id, id("b"));
    }

    #[test]
    fn duplicate_sort_orders_break_ties_by_name() {
        // Two rows stuck at the same sort_order (interrupted swap): display
        // order falls back to name, and planning still works against it.
        let rows = vec![Row::new("b", 5), Row::new("a", 5), Row::new("c", 9)];
        let (first, second) = plan_adjacent_swap(&rows, &id("b"), MoveDirection::Up).unwrap();
        assert_eq!(first.id, id("b"));
        assert_eq!(second.id, id("a"));
    }
}
