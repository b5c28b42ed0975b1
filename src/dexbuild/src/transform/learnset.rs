//! Learnset rows for vault documents
//!
//! A learnset is a flat list of (rank, move) pairs. Documents show it as a
//! two-column table, one bucket of rows per rank with a separator row between
//! buckets.

use serde::{Deserialize, Serialize};

use crate::record::LearnedMove;
use crate::reference::{rank_order, LOWEST_RANK};

/// Filler used for both cells of a separator row
pub const SEPARATOR_CELL: &str = "---------------------------";

/// One table row: rank and move link
pub type LearnsetRow = [String; 2];

/// How learnset entries are bucketed into rows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LearnsetLayout {
    /// One bucket per run of identical consecutive ranks
    #[default]
    Contiguous,
    /// One bucket per rank of the ladder, in ladder order
    ByRank,
}

impl std::str::FromStr for LearnsetLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "contiguous" => Ok(Self::Contiguous),
            "by-rank" | "byrank" | "rank" => Ok(Self::ByRank),
            other => Err(format!("unknown learnset layout '{}'", other)),
        }
    }
}

pub fn separator_row() -> LearnsetRow {
    [SEPARATOR_CELL.to_string(), SEPARATOR_CELL.to_string()]
}

/// Append the default maneuvers at the lowest rank
pub fn with_maneuvers(moves: &[LearnedMove], maneuvers: &[String]) -> Vec<LearnedMove> {
    let mut all = moves.to_vec();
    all.extend(maneuvers.iter().map(|name| LearnedMove {
        learned: LOWEST_RANK.to_string(),
        name: name.clone(),
    }));
    all
}

/// Group learned moves into buckets according to `layout`
///
/// With [`LearnsetLayout::ByRank`], ranks off the ladder keep a bucket of
/// their own after the ladder, in first-seen order.
pub fn buckets(moves: &[LearnedMove], layout: LearnsetLayout) -> Vec<Vec<&LearnedMove>> {
    match layout {
        LearnsetLayout::Contiguous => {
            let mut buckets: Vec<Vec<&LearnedMove>> = Vec::new();
            for mv in moves {
                match buckets.last_mut() {
                    Some(bucket) if bucket[0].learned == mv.learned => bucket.push(mv),
                    _ => buckets.push(vec![mv]),
                }
            }
            buckets
        }
        LearnsetLayout::ByRank => {
            let mut ranked: Vec<(Option<usize>, String, Vec<&LearnedMove>)> = Vec::new();
            for mv in moves {
                let order = rank_order(&mv.learned);
                let key = match order {
                    Some(_) => String::new(),
                    None => mv.learned.clone(),
                };
                match ranked.iter_mut().find(|(o, k, _)| *o == order && *k == key) {
                    Some((_, _, bucket)) => bucket.push(mv),
                    None => ranked.push((order, key, vec![mv])),
                }
            }
            // Stable sort keeps off-ladder buckets in first-seen order
            ranked.sort_by_key(|(order, _, _)| order.unwrap_or(usize::MAX));
            ranked.into_iter().map(|(_, _, bucket)| bucket).collect()
        }
    }
}

/// Render learned moves to table rows, separating buckets
pub fn rows<F>(moves: &[LearnedMove], layout: LearnsetLayout, link: F) -> Vec<LearnsetRow>
where
    F: Fn(&str) -> String,
{
    let mut rows = Vec::new();
    for (i, bucket) in buckets(moves, layout).into_iter().enumerate() {
        if i > 0 {
            rows.push(separator_row());
        }
        rows.extend(
            bucket
                .into_iter()
                .map(|mv| [mv.learned.clone(), link(&mv.name)]),
        );
    }
    rows
}
