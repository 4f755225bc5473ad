//! Reading export documents.

mod parser;

pub use parser::decode;

use std::path::Path;

use crate::error::Result;
use crate::model::GuideExport;
use crate::sanitize::clean;

/// Read an export file from disk into a [`GuideExport`].
///
/// Runs the sanitizer before decoding, so exports polluted with stray
/// control characters load the same as clean ones.
///
/// # Examples
///
/// ```no_run
/// let export = lgx::read_export("export.xml")?;
/// println!("{} guides", export.guides.len());
/// # Ok::<(), lgx::Error>(())
/// ```
pub fn read_export<P: AsRef<Path>>(path: P) -> Result<GuideExport> {
    let src = std::fs::read(path)?;
    decode(&clean(&src))
}
