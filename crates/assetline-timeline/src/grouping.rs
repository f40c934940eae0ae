//! Location → product → asset aggregation.
//!
//! Locations and product groups are ordered by their end date (soonest
//! first) so the most urgent contracts appear at the top. Every sort is
//! stable: ties keep their original relative order.

use std::collections::HashMap;

use assetline_core::{LocationGroup, ParsedAssetRecord, ProductGroup};
use tracing::{debug, instrument};

/// Accumulated assets for one location, in first-seen order
struct LocationBucket<'a> {
    location_id: &'a str,
    /// First asset seen for this location; supplies name, city and country
    representative: &'a ParsedAssetRecord,
    products: Vec<(&'a str, Vec<&'a ParsedAssetRecord>)>,
    product_index: HashMap<&'a str, usize>,
}

impl<'a> LocationBucket<'a> {
    fn new(first: &'a ParsedAssetRecord) -> Self {
        Self {
            location_id: &first.location_id,
            representative: first,
            products: Vec::new(),
            product_index: HashMap::new(),
        }
    }

    fn push(&mut self, asset: &'a ParsedAssetRecord) {
        let name = asset.product_name.as_str();
        let slot = *self.product_index.entry(name).or_insert_with(|| {
            self.products.push((name, Vec::new()));
            self.products.len() - 1
        });
        self.products[slot].1.push(asset);
    }

    fn into_group(self) -> Option<LocationGroup> {
        let mut product_groups: Vec<ProductGroup> = self
            .products
            .into_iter()
            .filter_map(|(name, assets)| product_group(name, assets))
            .collect();
        product_groups.sort_by_key(|g| g.group_end);

        let location_start = product_groups.iter().map(|g| g.group_start).min()?;
        let location_end = product_groups.iter().map(|g| g.group_end).max()?;

        Some(LocationGroup {
            location_id: self.location_id.to_string(),
            location_name: self.representative.location_name.clone(),
            city: self.representative.city.clone(),
            country: self.representative.country.clone(),
            product_groups,
            location_start,
            location_end,
        })
    }
}

fn product_group(product_name: &str, assets: Vec<&ParsedAssetRecord>) -> Option<ProductGroup> {
    let mut assets: Vec<ParsedAssetRecord> = assets.into_iter().cloned().collect();
    assets.sort_by_key(|a| a.contract_end);

    let group_start = assets.iter().map(|a| a.install_date).min()?;
    let group_end = assets.iter().map(|a| a.contract_end).max()?;

    Some(ProductGroup {
        product_name: product_name.to_string(),
        assets,
        group_start,
        group_end,
    })
}

/// Group parsed assets by location id, then product name.
///
/// A single left-to-right scan builds the buckets. Location metadata comes
/// from the first asset seen for each location id in input order.
#[instrument(level = "debug", skip_all, fields(assets = assets.len()))]
pub fn group_assets(assets: &[ParsedAssetRecord]) -> Vec<LocationGroup> {
    let mut buckets: Vec<LocationBucket<'_>> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for asset in assets {
        let slot = *index
            .entry(asset.location_id.as_str())
            .or_insert_with(|| {
                buckets.push(LocationBucket::new(asset));
                buckets.len() - 1
            });
        buckets[slot].push(asset);
    }

    let mut locations: Vec<LocationGroup> = buckets
        .into_iter()
        .filter_map(LocationBucket::into_group)
        .collect();
    locations.sort_by_key(|l| l.location_end);

    debug!(locations = locations.len(), "grouped assets");
    locations
}
