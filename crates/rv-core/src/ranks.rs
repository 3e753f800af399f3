//! # Reputation Tiers
//!
//! Pure mapping from accumulated points to a named rank. Used by the
//! voting service on every point award, and independently by the API to
//! show the table to presentation layers.

use serde::Serialize;

/// One reputation tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rank {
    pub name: &'static str,
    pub min_points: i64,
}

/// Ascending by threshold. The 0-point tier is the starting rank for a
/// voter who has not cast any vote yet.
pub const RANKS: [Rank; 7] = [
    Rank { name: "novato", min_points: 0 },
    Rank { name: "aprendiz", min_points: 50 },
    Rank { name: "explorador", min_points: 120 },
    Rank { name: "crítico", min_points: 220 },
    Rank { name: "experto", min_points: 350 },
    Rank { name: "maestro", min_points: 500 },
    Rank { name: "leyenda", min_points: 700 },
];

/// Returns the highest tier whose minimum is <= `points`.
/// Negative input reads as zero.
pub fn rank_for(points: i64) -> &'static str {
    let p = points.max(0);
    let mut current = RANKS[0].name;
    for rank in &RANKS {
        if p >= rank.min_points {
            current = rank.name;
        }
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowest_tier_at_zero_and_below() {
        assert_eq!(rank_for(0), "novato");
        assert_eq!(rank_for(-5), "novato");
        assert_eq!(rank_for(49), "novato");
    }

    #[test]
    fn exact_thresholds_promote() {
        assert_eq!(rank_for(50), "aprendiz");
        assert_eq!(rank_for(120), "explorador");
        assert_eq!(rank_for(220), "crítico");
        assert_eq!(rank_for(350), "experto");
        assert_eq!(rank_for(500), "maestro");
        assert_eq!(rank_for(700), "leyenda");
        assert_eq!(rank_for(i64::MAX), "leyenda");
    }

    #[test]
    fn lookup_is_monotonic() {
        let tier_index = |points: i64| {
            RANKS
                .iter()
                .position(|r| r.name == rank_for(points))
                .unwrap()
        };
        let mut last = tier_index(-1);
        for points in 0..=800 {
            let idx = tier_index(points);
            assert!(idx >= last, "rank regressed at {points} points");
            last = idx;
        }
    }

    #[test]
    fn table_is_sorted_and_starts_at_zero() {
        assert_eq!(RANKS[0].min_points, 0);
        assert!(RANKS.windows(2).all(|w| w[0].min_points < w[1].min_points));
    }
}
