//! Flattens location groups into the renderer's task list.

use assetline_core::{
    contract_status_color, GanttData, GanttTask, LocationGroup, ProductGroup, TaskId,
};
use tracing::{debug, instrument};

/// Sequential id source, starting at 1
struct IdCounter(TaskId);

impl IdCounter {
    fn next(&mut self) -> TaskId {
        self.0 += 1;
        self.0
    }
}

fn product_label(group: &ProductGroup) -> String {
    if group.assets.len() > 1 {
        format!("{} ({})", group.product_name, group.assets.len())
    } else {
        group.product_name.clone()
    }
}

/// Depth-first flattening: location, then its products, then their assets.
///
/// Ids follow traversal order. The link list is always empty.
#[instrument(level = "debug", skip_all, fields(locations = groups.len()))]
pub fn to_gantt_data(groups: &[LocationGroup]) -> GanttData {
    let mut ids = IdCounter(0);
    let mut tasks = Vec::new();

    for location in groups {
        let location_id = ids.next();
        tasks.push(
            GanttTask::summary(
                location_id,
                location.label(),
                location.location_start,
                location.location_end,
            )
            .open(true),
        );

        for product in &location.product_groups {
            let product_id = ids.next();
            tasks.push(
                GanttTask::summary(
                    product_id,
                    product_label(product),
                    product.group_start,
                    product.group_end,
                )
                .parent(location_id)
                .open(false),
            );

            for asset in &product.assets {
                tasks.push(
                    GanttTask::leaf(
                        ids.next(),
                        format!("{} ({})", asset.product_name, asset.asset_id),
                        asset.install_date,
                        asset.contract_end,
                    )
                    .parent(product_id)
                    .color(contract_status_color(asset.days_remaining)),
                );
            }
        }
    }

    debug!(tasks = tasks.len(), "flattened timeline");
    GanttData {
        tasks,
        links: Vec::new(),
    }
}
