//! Claim ordering
//!
//! Claims are always presented newest expense date first. Dates are
//! `YYYY-MM-DD` strings, so lexicographic order is calendar order. The sort
//! is stable: claims sharing a date keep their stream order.

use crate::models::Claim;

/// Sort claims by date, most recent first
pub fn sort_by_date_desc(claims: &mut [Claim]) {
    claims.sort_by(|a, b| b.date.cmp(&a.date));
}

/// Sorted copy of a claim slice
pub fn sorted_by_date_desc(claims: &[Claim]) -> Vec<Claim> {
    let mut sorted = claims.to_vec();
    sort_by_date_desc(&mut sorted);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, UserId};

    fn claim(date: &str, description: &str) -> Claim {
        Claim::new(
            UserId::from("u1"),
            None,
            None,
            date,
            description,
            Money::from_units(100),
        )
    }

    #[test]
    fn test_most_recent_first() {
        let claims = vec![claim("2024-11-18", "older"), claim("2024-11-20", "newer")];
        let sorted = sorted_by_date_desc(&claims);
        assert_eq!(sorted[0].date, "2024-11-20");
        assert_eq!(sorted[1].date, "2024-11-18");
    }

    #[test]
    fn test_ties_keep_stream_order() {
        let claims = vec![
            claim("2024-11-18", "first"),
            claim("2024-11-20", "newest"),
            claim("2024-11-18", "second"),
            claim("2024-11-18", "third"),
        ];
        let sorted = sorted_by_date_desc(&claims);
        let order: Vec<_> = sorted.iter().map(|c| c.description.as_str()).collect();
        assert_eq!(order, ["newest", "first", "second", "third"]);
    }

    #[test]
    fn test_sort_ignores_created_at() {
        let mut early = claim("2024-11-25", "submitted late");
        let late = claim("2024-11-10", "submitted early");
        early.created_at = late.created_at.map(|t| t + chrono::Duration::days(30));

        let sorted = sorted_by_date_desc(&[late, early]);
        assert_eq!(sorted[0].description, "submitted late");
    }
}
