use std::collections::HashSet;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};
use url::Url;

use crate::app::{Result, StreamlistError};
use crate::domain::ChannelLink;
use crate::scraper::{ScraperConfig, TileLocator};

/// Finds channel tiles laid out as grid columns (`<div class="col-lg-2 ...">`)
pub struct GridTileLocator {
    container_class: Regex,
    player_link: Regex,
    container: Selector,
    anchor: Selector,
    name: Selector,
}

impl GridTileLocator {
    pub fn new(config: &ScraperConfig) -> Result<Self> {
        Ok(Self {
            container_class: Regex::new(&config.container_class_pattern)?,
            player_link: Regex::new(&config.player_link_pattern)?,
            container: parse_selector("div")?,
            anchor: parse_selector("a[href]")?,
            name: parse_selector(&config.name_selector)?,
        })
    }

    fn is_tile(&self, element: &ElementRef) -> bool {
        element
            .value()
            .classes()
            .any(|class| self.container_class.is_match(class))
    }

    fn player_anchor<'a>(&self, tile: ElementRef<'a>) -> Option<ElementRef<'a>> {
        tile.select(&self.anchor).find(|a| {
            a.value()
                .attr("href")
                .is_some_and(|href| self.player_link.is_match(href))
        })
    }

    fn channel_name(&self, anchor: ElementRef) -> String {
        anchor
            .select(&self.name)
            .next()
            .map(visible_text)
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| visible_text(anchor))
    }
}

impl TileLocator for GridTileLocator {
    fn locate(&self, listing: &str, listing_url: &str) -> Result<Vec<ChannelLink>> {
        let origin = site_origin(listing_url)?;
        let document = Html::parse_document(listing);

        let tiles: Vec<ElementRef> = document
            .select(&self.container)
            .filter(|div| self.is_tile(div))
            .collect();

        if tiles.is_empty() {
            return Err(StreamlistError::ParseMismatch(format!(
                "no element at {} has a class matching '{}'",
                listing_url,
                self.container_class.as_str()
            )));
        }

        let mut seen = HashSet::new();
        let mut links = Vec::new();

        for tile in tiles {
            let Some(anchor) = self.player_anchor(tile) else {
                debug!("Skipping tile without a player link");
                continue;
            };
            // Nested grid columns share one anchor
            if !seen.insert(anchor.id()) {
                continue;
            }

            let href = anchor.value().attr("href").unwrap_or_default();
            let player_url = absolute_link(&origin, href);

            let name = self.channel_name(anchor);
            if name.is_empty() {
                warn!("Skipping unnamed channel at {}", player_url);
                continue;
            }

            links.push(ChannelLink::new(name, player_url));
        }

        Ok(links)
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| StreamlistError::Selector(e.to_string()))
}

/// Trimmed text fragments of an element, joined by single spaces
fn visible_text(element: ElementRef) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// `scheme://host[:port]` of the listing page
fn site_origin(listing_url: &str) -> Result<String> {
    let url = Url::parse(listing_url)?;
    let origin = url.origin();
    if !origin.is_tuple() {
        return Err(StreamlistError::Config(format!(
            "listing URL has no host: {}",
            listing_url
        )));
    }
    Ok(origin.ascii_serialization())
}

fn absolute_link(origin: &str, href: &str) -> String {
    if href.starts_with("http") {
        href.to_string()
    } else {
        format!("{}/{}", origin, href.trim_start_matches('/'))
    }
}
