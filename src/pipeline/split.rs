// src/pipeline/split.rs

//! Pure split stage: raw feed text to rendered documents.

use std::collections::HashSet;

use crate::error::Result;
use crate::models::{Episode, OutputConfig, RenderedFeed, ShowGroup};
use crate::services::{
    FeedGenerator, classify_episode, extract_episodes, format_title, group_by_show,
};

/// Everything produced from one source feed.
#[derive(Debug, Clone)]
pub struct SplitOutcome {
    /// Classified episodes in source order
    pub episodes: Vec<Episode>,
    /// Episodes grouped by show, in first-appearance order
    pub groups: Vec<ShowGroup>,
    /// One document per group, then the aggregate document
    pub feeds: Vec<RenderedFeed>,
}

impl SplitOutcome {
    pub fn show_count(&self) -> usize {
        self.groups.len()
    }
}

/// Extract, classify, group and render a source feed.
pub fn split_feed(
    raw: &str,
    generator: &FeedGenerator,
    output: &OutputConfig,
) -> Result<SplitOutcome> {
    let episodes: Vec<Episode> = extract_episodes(raw)
        .into_iter()
        .map(classify_episode)
        .collect();
    let groups = group_by_show(&episodes);

    log::info!(
        "Classified {} episodes into {} shows",
        episodes.len(),
        groups.len()
    );

    let mut taken = HashSet::from([output.all_shows_file.clone()]);
    let mut feeds = Vec::with_capacity(groups.len() + 1);
    for group in &groups {
        let xml = generator.show_feed(&group.slug, &group.episodes)?;
        let file_name = show_file_name(&group.slug, &taken);
        taken.insert(file_name.clone());
        feeds.push(RenderedFeed {
            slug: Some(group.slug.clone()),
            title: format_title(&group.slug),
            file_name,
            episode_count: group.episode_count(),
            xml,
        });
    }

    feeds.push(RenderedFeed {
        slug: None,
        title: generator.channel().all_shows_title.clone(),
        file_name: output.all_shows_file.clone(),
        episode_count: episodes.len(),
        xml: generator.all_shows_feed(&episodes)?,
    });

    Ok(SplitOutcome {
        episodes,
        groups,
        feeds,
    })
}

/// `{slug}.xml`, unless that name is already `taken` (the aggregate file or an
/// earlier show). Clashes get `-show` appended until the name is free.
pub fn show_file_name(slug: &str, taken: &HashSet<String>) -> String {
    let mut stem = slug.to_string();
    loop {
        let name = format!("{stem}.xml");
        if !taken.contains(&name) {
            return name;
        }
        log::warn!("Feed file {name} is already used, trying {stem}-show.xml");
        stem.push_str("-show");
    }
}
