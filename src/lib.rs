//! Bounded-degree spanning trees and their longest paths.
//!
//! [`domain::TreeBuilder`] grows a tree over nodes `1..=N` by frontier
//! expansion, capping every node at a fixed number of neighbors.
//! [`domain::DiameterFinder`] then searches depth-first from every node and
//! reports the longest simple path per start and overall.
//!
//! ```
//! use ntree::domain::{longest_path, TreeBuilder};
//!
//! let tree = TreeBuilder::new().build(5).unwrap();
//! assert_eq!(tree.neighbors(1), Some(&[2, 3, 4, 5][..]));
//! assert_eq!(longest_path(&tree).unwrap(), 2);
//! ```

use std::io::Write;

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;

use application::services::TreeService;
use application::ApplicationResult;
use config::Settings;
use infrastructure::render::RenderFormat;

/// Reference run over `nodes` nodes with default degree cap and frontier,
/// writing `<start> <length>` lines and the overall longest path to `out`.
///
/// Returns the overall longest path length.
pub fn run(nodes: usize, out: &mut dyn Write) -> ApplicationResult<usize> {
    let settings = Settings {
        nodes,
        ..Default::default()
    };
    let service = TreeService::new(settings, RenderFormat::None.renderer());
    Ok(service.run(out)?.report.longest)
}
