//! Event-driven parsing of the export document.
//!
//! The export is one root element whose children map to the model by name.
//! Collections are repeated elements, one record each: every `<accounts>`
//! child of the root is one account, every `<pages>` child of a guide is
//! one page, and so on down to `<assets>`. A self-closed collection element
//! still counts as one (zero-valued) record. Unknown elements are skipped
//! wholesale, so exports from newer schema revisions still decode.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::QName;

use crate::error::{Error, Result};
use crate::model::{
    Account, Asset, ContentBox, Customer, Group, Guide, GuideExport, Owner, Page, Site, Subject,
    Tag,
};
use crate::util::{decode_text, extract_xml_encoding};

/// Decode an export document into a [`GuideExport`].
///
/// The root element may carry any name; its known children map per the
/// export schema. Malformed markup fails with the underlying parser
/// diagnostic, while missing elements produce zero-value fields, never
/// errors. Run [`crate::clean`] first if the source may contain stray
/// control characters.
pub fn decode(src: &[u8]) -> Result<GuideExport> {
    let text = decode_text(src, extract_xml_encoding(src));
    // No trim_text here: trimming operates per text fragment, so it would
    // eat the spaces around entity references ("Arts &amp; Humanities").
    let mut reader = Reader::from_str(&text);

    loop {
        match reader.read_event() {
            Ok(Event::Start(_)) => return read_export_root(&mut reader),
            Ok(Event::Empty(_)) => return Ok(GuideExport::default()),
            Ok(Event::Eof) => return Err(Error::MissingRoot),
            Ok(_) => {}
            Err(e) => return Err(xml_error(&reader, e)),
        }
    }
}

// ============================================================================
// Root
// ============================================================================

fn read_export_root(reader: &mut Reader<&[u8]>) -> Result<GuideExport> {
    let mut export = GuideExport::default();
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"customer" => export.customer = Some(read_customer(reader)?),
                b"libguides" => export.site = Some(read_site(reader)?),
                b"accounts" => export.accounts.push(read_account(reader)?),
                b"groups" => export.groups.push(read_group(reader)?),
                b"subjects" => export.subjects.push(read_subject(reader)?),
                b"tags" => export.tags.push(read_tag(reader)?),
                b"vendors" => export.vendors = read_text(reader, e.name())?,
                b"guides" => export.guides.push(read_guide(reader)?),
                _ => skip_element(reader, &e)?,
            },
            Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                b"customer" => export.customer = Some(Customer::default()),
                b"libguides" => export.site = Some(Site::default()),
                b"accounts" => export.accounts.push(Account::default()),
                b"groups" => export.groups.push(Group::default()),
                b"subjects" => export.subjects.push(Subject::default()),
                b"tags" => export.tags.push(Tag::default()),
                b"guides" => export.guides.push(Guide::default()),
                _ => {}
            },
            Ok(Event::End(_)) => return Ok(export),
            Ok(Event::Eof) => return Err(unexpected_eof("export root")),
            Ok(_) => {}
            Err(e) => return Err(xml_error(reader, e)),
        }
    }
}

// ============================================================================
// Site-wide Records
// ============================================================================

fn read_customer(reader: &mut Reader<&[u8]>) -> Result<Customer> {
    let mut customer = Customer::default();
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"id" => customer.id = read_int(reader, e.name())?,
                b"type" => customer.kind = read_text(reader, e.name())?,
                b"name" => customer.name = read_text(reader, e.name())?,
                b"url" => customer.url = read_text(reader, e.name())?,
                b"city" => customer.city = read_text(reader, e.name())?,
                b"state" => customer.state = read_text(reader, e.name())?,
                b"country" => customer.country = read_text(reader, e.name())?,
                b"time_zone" => customer.time_zone = read_text(reader, e.name())?,
                b"created" => customer.created = read_text(reader, e.name())?,
                b"updated" => customer.updated = read_text(reader, e.name())?,
                _ => skip_element(reader, &e)?,
            },
            Ok(Event::End(_)) => return Ok(customer),
            Ok(Event::Eof) => return Err(unexpected_eof("customer")),
            Ok(_) => {}
            Err(e) => return Err(xml_error(reader, e)),
        }
    }
}

fn read_site(reader: &mut Reader<&[u8]>) -> Result<Site> {
    let mut site = Site::default();
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"id" => site.id = read_int(reader, e.name())?,
                b"type" => site.kind = read_text(reader, e.name())?,
                b"name" => site.name = read_text(reader, e.name())?,
                b"domain" => site.domain = read_text(reader, e.name())?,
                b"admin" => site.admin = read_text(reader, e.name())?,
                b"created" => site.created = read_text(reader, e.name())?,
                b"updated" => site.updated = read_text(reader, e.name())?,
                _ => skip_element(reader, &e)?,
            },
            Ok(Event::End(_)) => return Ok(site),
            Ok(Event::Eof) => return Err(unexpected_eof("site")),
            Ok(_) => {}
            Err(e) => return Err(xml_error(reader, e)),
        }
    }
}

fn read_account(reader: &mut Reader<&[u8]>) -> Result<Account> {
    let mut account = Account::default();
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"id" => account.id = read_int(reader, e.name())?,
                b"email" => account.email = read_text(reader, e.name())?,
                b"first_name" => account.first_name = read_text(reader, e.name())?,
                b"last_name" => account.last_name = read_text(reader, e.name())?,
                b"nickname" => account.nickname = read_text(reader, e.name())?,
                b"signature" => account.signature = read_text(reader, e.name())?,
                b"image" => account.image = read_text(reader, e.name())?,
                b"address" => account.address = read_text(reader, e.name())?,
                b"phone" => account.phone = read_text(reader, e.name())?,
                b"skype" => account.skype = read_text(reader, e.name())?,
                b"website" => account.website = read_text(reader, e.name())?,
                b"created" => account.created = read_text(reader, e.name())?,
                b"updated" => account.updated = read_text(reader, e.name())?,
                _ => skip_element(reader, &e)?,
            },
            Ok(Event::End(_)) => return Ok(account),
            Ok(Event::Eof) => return Err(unexpected_eof("account")),
            Ok(_) => {}
            Err(e) => return Err(xml_error(reader, e)),
        }
    }
}

/// Owner references embed a reduced account inline. Only the projection
/// fields are kept; anything else in the element is dropped.
fn read_owner(reader: &mut Reader<&[u8]>) -> Result<Owner> {
    let mut owner = Owner::default();
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"id" => owner.id = read_int(reader, e.name())?,
                b"email" => owner.email = read_text(reader, e.name())?,
                b"first_name" => owner.first_name = read_text(reader, e.name())?,
                b"last_name" => owner.last_name = read_text(reader, e.name())?,
                _ => skip_element(reader, &e)?,
            },
            Ok(Event::End(_)) => return Ok(owner),
            Ok(Event::Eof) => return Err(unexpected_eof("owner")),
            Ok(_) => {}
            Err(e) => return Err(xml_error(reader, e)),
        }
    }
}

fn read_group(reader: &mut Reader<&[u8]>) -> Result<Group> {
    let mut group = Group::default();
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"id" => group.id = read_int(reader, e.name())?,
                b"type" => group.kind = read_text(reader, e.name())?,
                b"name" => group.name = read_text(reader, e.name())?,
                b"description" => group.description = read_text(reader, e.name())?,
                b"created" => group.created = read_text(reader, e.name())?,
                b"updated" => group.updated = read_text(reader, e.name())?,
                _ => skip_element(reader, &e)?,
            },
            Ok(Event::End(_)) => return Ok(group),
            Ok(Event::Eof) => return Err(unexpected_eof("group")),
            Ok(_) => {}
            Err(e) => return Err(xml_error(reader, e)),
        }
    }
}

fn read_subject(reader: &mut Reader<&[u8]>) -> Result<Subject> {
    let mut subject = Subject::default();
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"id" => subject.id = read_int(reader, e.name())?,
                b"name" => subject.name = read_text(reader, e.name())?,
                b"url" => subject.url = read_text(reader, e.name())?,
                _ => skip_element(reader, &e)?,
            },
            Ok(Event::End(_)) => return Ok(subject),
            Ok(Event::Eof) => return Err(unexpected_eof("subject")),
            Ok(_) => {}
            Err(e) => return Err(xml_error(reader, e)),
        }
    }
}

fn read_tag(reader: &mut Reader<&[u8]>) -> Result<Tag> {
    let mut tag = Tag::default();
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"id" => tag.id = read_int(reader, e.name())?,
                b"name" => tag.name = read_text(reader, e.name())?,
                _ => skip_element(reader, &e)?,
            },
            Ok(Event::End(_)) => return Ok(tag),
            Ok(Event::Eof) => return Err(unexpected_eof("tag")),
            Ok(_) => {}
            Err(e) => return Err(xml_error(reader, e)),
        }
    }
}

// ============================================================================
// Guide Hierarchy
// ============================================================================

fn read_guide(reader: &mut Reader<&[u8]>) -> Result<Guide> {
    let mut guide = Guide::default();
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"id" => guide.id = read_int(reader, e.name())?,
                b"type" => guide.kind = read_text(reader, e.name())?,
                b"name" => guide.name = read_text(reader, e.name())?,
                b"description" => guide.description = read_text(reader, e.name())?,
                b"url" => guide.url = read_text(reader, e.name())?,
                b"owner" => guide.owner = Some(read_owner(reader)?),
                b"group" => guide.group = Some(read_group(reader)?),
                b"redirect" => guide.redirect = read_text(reader, e.name())?,
                b"status" => guide.status = read_text(reader, e.name())?,
                b"published" => guide.published = read_text(reader, e.name())?,
                b"subject" => guide.subjects.push(read_subject(reader)?),
                b"tags" => guide.tags.push(read_tag(reader)?),
                b"created" => guide.created = read_text(reader, e.name())?,
                b"updated" => guide.updated = read_text(reader, e.name())?,
                b"pages" => guide.pages.push(read_page(reader)?),
                _ => skip_element(reader, &e)?,
            },
            Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                b"owner" => guide.owner = Some(Owner::default()),
                b"group" => guide.group = Some(Group::default()),
                b"subject" => guide.subjects.push(Subject::default()),
                b"tags" => guide.tags.push(Tag::default()),
                b"pages" => guide.pages.push(Page::default()),
                _ => {}
            },
            Ok(Event::End(_)) => return Ok(guide),
            Ok(Event::Eof) => return Err(unexpected_eof("guide")),
            Ok(_) => {}
            Err(e) => return Err(xml_error(reader, e)),
        }
    }
}

fn read_page(reader: &mut Reader<&[u8]>) -> Result<Page> {
    let mut page = Page::default();
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"id" => page.id = read_int(reader, e.name())?,
                b"name" => page.name = read_text(reader, e.name())?,
                b"description" => page.description = read_text(reader, e.name())?,
                b"url" => page.url = read_text(reader, e.name())?,
                b"redirect" => page.redirect = read_text(reader, e.name())?,
                b"source_page_id" => page.source_page_id = read_int(reader, e.name())?,
                b"parent_page_id" => page.parent_page_id = read_int(reader, e.name())?,
                b"position" => page.position = read_int(reader, e.name())?,
                b"hidden" => page.hidden = read_int(reader, e.name())?,
                b"created" => page.created = read_text(reader, e.name())?,
                b"updated" => page.updated = read_text(reader, e.name())?,
                b"boxes" => page.boxes.push(read_box(reader)?),
                _ => skip_element(reader, &e)?,
            },
            Ok(Event::Empty(e)) => {
                if e.local_name().as_ref() == b"boxes" {
                    page.boxes.push(ContentBox::default());
                }
            }
            Ok(Event::End(_)) => return Ok(page),
            Ok(Event::Eof) => return Err(unexpected_eof("page")),
            Ok(_) => {}
            Err(e) => return Err(xml_error(reader, e)),
        }
    }
}

fn read_box(reader: &mut Reader<&[u8]>) -> Result<ContentBox> {
    let mut content_box = ContentBox::default();
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"id" => content_box.id = read_int(reader, e.name())?,
                b"name" => content_box.name = read_text(reader, e.name())?,
                b"type" => content_box.kind = read_text(reader, e.name())?,
                b"description" => content_box.description = read_text(reader, e.name())?,
                b"url" => content_box.url = read_text(reader, e.name())?,
                b"owner" => content_box.owner = Some(read_owner(reader)?),
                b"map_id" => content_box.map_id = read_int(reader, e.name())?,
                b"column" => content_box.column = read_int(reader, e.name())?,
                b"position" => content_box.position = read_int(reader, e.name())?,
                b"hidden" => content_box.hidden = read_int(reader, e.name())?,
                b"created" => content_box.created = read_text(reader, e.name())?,
                b"updated" => content_box.updated = read_text(reader, e.name())?,
                b"assets" => content_box.assets.push(read_asset(reader)?),
                _ => skip_element(reader, &e)?,
            },
            Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                b"owner" => content_box.owner = Some(Owner::default()),
                b"assets" => content_box.assets.push(Asset::default()),
                _ => {}
            },
            Ok(Event::End(_)) => return Ok(content_box),
            Ok(Event::Eof) => return Err(unexpected_eof("box")),
            Ok(_) => {}
            Err(e) => return Err(xml_error(reader, e)),
        }
    }
}

fn read_asset(reader: &mut Reader<&[u8]>) -> Result<Asset> {
    let mut asset = Asset::default();
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"id" => asset.id = read_int(reader, e.name())?,
                b"name" => asset.name = read_text(reader, e.name())?,
                b"type" => asset.kind = read_text(reader, e.name())?,
                b"description" => asset.description = read_text(reader, e.name())?,
                b"url" => asset.url = read_text(reader, e.name())?,
                b"redirect" => asset.redirect = read_text(reader, e.name())?,
                b"owner" => asset.owner = Some(read_owner(reader)?),
                b"map_id" => asset.map_id = read_int(reader, e.name())?,
                b"position" => asset.position = read_int(reader, e.name())?,
                b"created" => asset.created = read_text(reader, e.name())?,
                b"updated" => asset.updated = read_text(reader, e.name())?,
                b"author" => asset.author = read_text(reader, e.name())?,
                b"call_number" => asset.call_number = read_text(reader, e.name())?,
                b"cover_url" => asset.cover_url = read_text(reader, e.name())?,
                b"enabled" => asset.enabled = read_int(reader, e.name())?,
                b"isbn" => asset.isbn = read_text(reader, e.name())?,
                b"publication_date" => asset.publication_date = read_text(reader, e.name())?,
                b"first_name" => asset.first_name = read_text(reader, e.name())?,
                b"last_name" => asset.last_name = read_text(reader, e.name())?,
                b"email" => asset.email = read_text(reader, e.name())?,
                b"more_info" => asset.more_info = read_text(reader, e.name())?,
                _ => skip_element(reader, &e)?,
            },
            Ok(Event::Empty(e)) => {
                if e.local_name().as_ref() == b"owner" {
                    asset.owner = Some(Owner::default());
                }
            }
            Ok(Event::End(_)) => return Ok(asset),
            Ok(Event::Eof) => return Err(unexpected_eof("asset")),
            Ok(_) => {}
            Err(e) => return Err(xml_error(reader, e)),
        }
    }
}

// ============================================================================
// Element Helpers
// ============================================================================

/// Collect the character data of the current element: text, CDATA sections,
/// and resolved entity references. Nested markup is skipped and dropped,
/// which is what the export's flat string fields expect; rich-text fields
/// carry their HTML inside CDATA instead.
fn read_text(reader: &mut Reader<&[u8]>, elem: QName<'_>) -> Result<String> {
    let mut text = String::new();
    loop {
        match reader.read_event() {
            Ok(Event::Text(e)) => text.push_str(&String::from_utf8_lossy(e.as_ref())),
            Ok(Event::CData(e)) => text.push_str(&String::from_utf8_lossy(e.as_ref())),
            Ok(Event::GeneralRef(e)) => {
                let entity = String::from_utf8_lossy(e.as_ref());
                if let Some(resolved) = resolve_entity(&entity) {
                    text.push_str(&resolved);
                }
            }
            Ok(Event::Start(child)) => skip_element(reader, &child)?,
            Ok(Event::End(_)) => return Ok(text),
            Ok(Event::Eof) => return Err(unexpected_eof(&name_string(elem))),
            Ok(_) => {}
            Err(e) => return Err(xml_error(reader, e)),
        }
    }
}

/// Parse the element's character data as an integer. Empty or
/// whitespace-only text is the zero value; non-numeric text is an error
/// naming the element.
fn read_int(reader: &mut Reader<&[u8]>, elem: QName<'_>) -> Result<i64> {
    let text = read_text(reader, elem)?;
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    trimmed
        .parse()
        .map_err(|e| Error::InvalidNumber(name_string(elem), e))
}

/// Skip an element and everything inside it, including same-named nested
/// elements.
fn skip_element(reader: &mut Reader<&[u8]>, start: &BytesStart) -> Result<()> {
    reader
        .read_to_end(start.name())
        .map_err(|e| xml_error(reader, e))?;
    Ok(())
}

/// Resolve a named or numeric character entity to its text.
///
/// Named entities beyond the five predefined ones would need a DTD to
/// resolve; they are dropped rather than failing the decode.
fn resolve_entity(entity: &str) -> Option<String> {
    match entity {
        "amp" => Some("&".to_string()),
        "lt" => Some("<".to_string()),
        "gt" => Some(">".to_string()),
        "apos" => Some("'".to_string()),
        "quot" => Some("\"".to_string()),
        _ => {
            let code = if let Some(hex) = entity.strip_prefix("#x") {
                u32::from_str_radix(hex, 16).ok()?
            } else {
                entity.strip_prefix('#')?.parse().ok()?
            };
            char::from_u32(code).map(|c| c.to_string())
        }
    }
}

fn xml_error(reader: &Reader<&[u8]>, source: quick_xml::Error) -> Error {
    Error::Xml {
        pos: reader.error_position(),
        source,
    }
}

fn unexpected_eof(context: &str) -> Error {
    Error::UnexpectedEof(context.to_string())
}

fn name_string(name: QName<'_>) -> String {
    String::from_utf8_lossy(name.as_ref()).into_owned()
}
