//! The export data model.
//!
//! One [`GuideExport`] owns the whole tree decoded from an export document:
//! site-wide records (customer, site, accounts, groups, subjects, tags) and
//! the guide hierarchy of guides, pages, boxes, and assets. Field names
//! mirror the export schema. Serialization to JSON omits empty optional
//! fields per field, so the output stays compact; identifying fields (ids,
//! structural integers, names, types) are always emitted, even when zero.

use serde::Serialize;

use crate::error::Result;

/// A complete decoded export document.
///
/// The eight top-level JSON keys are always present: an absent `customer`
/// or `site` renders as `null`, empty collections as `[]`, and an absent
/// `vendors` section as `""`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GuideExport {
    pub customer: Option<Customer>,
    pub site: Option<Site>,
    pub accounts: Vec<Account>,
    pub groups: Vec<Group>,
    pub subjects: Vec<Subject>,
    pub tags: Vec<Tag>,
    /// Opaque vendor data. The export schema never defines a structure for
    /// it, so it is carried verbatim rather than guessed at.
    pub vendors: String,
    pub guides: Vec<Guide>,
}

impl GuideExport {
    /// Serialize the tree to compact JSON.
    pub fn to_json(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Serialize the tree to pretty-printed JSON, for inspection.
    pub fn to_json_pretty(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(self)?)
    }
}

/// The subscribing organization behind a site.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Customer {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub url: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub city: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub state: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub country: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub time_zone: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub created: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub updated: String,
}

/// A guides instance. Decoded from the export's `libguides` element but
/// serialized under the `site` key.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Site {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub domain: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub admin: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub created: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub updated: String,
}

/// A staff or editor user.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Account {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub nickname: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub signature: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub image: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub address: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub phone: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub skype: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub website: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub created: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub updated: String,
}

/// The minimal projection of an [`Account`] the export embeds inline as an
/// owner reference on guides, boxes, and assets.
///
/// The reference is carried verbatim, never resolved against the top-level
/// accounts list, and all four fields are always serialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Owner {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

/// An organizational unit that guides can belong to.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Group {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    /// Rich text; may contain HTML markup.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub created: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub updated: String,
}

/// A taxonomy label assignable to guides.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Subject {
    pub id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub url: String,
}

/// A free-form label assignable to guides.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Tag {
    pub id: i64,
    pub name: String,
}

/// A published guide, the main content unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Guide {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<Owner>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<Group>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub redirect: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub status: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub published: String,
    /// Serialized under the singular `subject` key the reference format
    /// uses, even though it is a list.
    #[serde(rename = "subject")]
    pub subjects: Vec<Subject>,
    pub tags: Vec<Tag>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub created: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub updated: String,
    /// Document order, which is the display order. Never re-sorted.
    pub pages: Vec<Page>,
}

/// A tab within a guide.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Page {
    pub id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub url: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub redirect: String,
    /// Id of the page this one was copied from, or 0.
    pub source_page_id: i64,
    pub parent_page_id: i64,
    pub position: i64,
    /// 0 or 1 in practice; kept numeric to match the export.
    pub hidden: i64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub created: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub updated: String,
    pub boxes: Vec<ContentBox>,
}

/// A content box within a page column.
///
/// Named `ContentBox` to stay clear of `std::boxed::Box`; the JSON output
/// is unaffected since boxes only ever appear inside the `boxes` array.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ContentBox {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<Owner>,
    pub map_id: i64,
    /// 1-based column index within the page layout.
    pub column: i64,
    pub position: i64,
    pub hidden: i64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub created: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub updated: String,
    pub assets: Vec<Asset>,
}

/// A content item within a box: a link, a book record, a rich-text block,
/// a widget, and so on, discriminated by `kind`.
///
/// The trailing bibliographic fields only apply to some asset kinds and are
/// omitted whenever empty, `enabled` included (omitted when zero).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Asset {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub url: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub redirect: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<Owner>,
    pub map_id: i64,
    pub position: i64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub created: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub updated: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub author: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub call_number: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub cover_url: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub enabled: i64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub isbn: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub publication_date: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub first_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub last_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub email: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub more_info: String,
}

fn is_zero(n: &i64) -> bool {
    *n == 0
}
