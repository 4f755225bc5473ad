//! # lgx
//!
//! Convert LibGuides XML exports to JSON.
//!
//! LibGuides (the library "subject guide" CMS) exports a site's content as
//! a single XML document: the subscribing customer, the site record, staff
//! accounts, groups, subjects, tags, and the content hierarchy of guides,
//! pages, boxes, and assets. `lgx` parses that document into a typed tree
//! and re-serializes it as JSON, preserving document order and omitting
//! empty optional fields.
//!
//! Real exports sometimes carry stray control characters pasted into guide
//! content; [`clean`] strips them so the XML parses. [`convert`] and
//! [`read_export`] run it for you.
//!
//! ## Quick Start
//!
//! ```
//! use lgx::{clean, decode};
//!
//! let xml = br#"<lgdata>
//!     <customer><id>17</id><name>Example University</name></customer>
//!     <guides><id>101</id><name>Data Guide</name></guides>
//! </lgdata>"#;
//!
//! let export = decode(&clean(xml))?;
//! assert_eq!(export.customer.as_ref().unwrap().name, "Example University");
//! assert_eq!(export.guides[0].id, 101);
//!
//! let json = export.to_json()?;
//! assert!(json.starts_with(b"{\"customer\""));
//! # Ok::<(), lgx::Error>(())
//! ```

pub mod error;
pub mod model;
pub mod sanitize;
pub mod slug;
mod util;
pub mod xml;

pub use error::{Error, Result};
pub use model::{
    Account, Asset, ContentBox, Customer, Group, Guide, GuideExport, Owner, Page, Site, Subject,
    Tag,
};
pub use sanitize::clean;
pub use slug::slugify;
pub use xml::{decode, read_export};

/// Convert raw export bytes straight to compact JSON.
///
/// Equivalent to [`clean`], then [`decode`], then
/// [`GuideExport::to_json`].
///
/// # Examples
///
/// ```
/// let json = lgx::convert(b"<lgdata><vendors>acme</vendors></lgdata>")?;
/// assert_eq!(
///     json,
///     br#"{"customer":null,"site":null,"accounts":[],"groups":[],"subjects":[],"tags":[],"vendors":"acme","guides":[]}"#
/// );
/// # Ok::<(), lgx::Error>(())
/// ```
pub fn convert(src: &[u8]) -> Result<Vec<u8>> {
    let export = decode(&clean(src))?;
    export.to_json()
}
