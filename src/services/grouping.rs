// src/services/grouping.rs

//! Partitioning of classified episodes by show.

use std::collections::HashMap;

use crate::models::{Episode, ShowGroup};

/// Group episodes by their show slug.
///
/// Groups are ordered by the first appearance of each slug; episodes within a
/// group keep their input order. Nothing is re-sorted.
pub fn group_by_show(episodes: &[Episode]) -> Vec<ShowGroup> {
    let mut groups: Vec<ShowGroup> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for episode in episodes {
        let slug = episode.show_slug();
        let index = *positions.entry(slug).or_insert_with(|| {
            groups.push(ShowGroup::new(slug));
            groups.len() - 1
        });
        groups[index].episodes.push(episode.clone());
    }

    groups
}
